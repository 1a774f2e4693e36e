use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;
use std::time::Instant;

use crate::config::AppConfig;
use crate::menu::{ExerciseAction, MenuId, Menus, TopAction};
use crate::ui::{HitMap, Target};
use crate::workout::WorkoutRoutine;

/// Seconds a status message stays on the info line
const STATUS_SECONDS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
    Saved,
}

/// An editable text field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    WorkoutName,
    ExerciseName(usize),
    Weight(usize, usize),
    Reps(usize, usize),
}

impl Field {
    pub fn exercise(self) -> Option<usize> {
        match self {
            Field::WorkoutName => None,
            Field::ExerciseName(e) | Field::Weight(e, _) | Field::Reps(e, _) => Some(e),
        }
    }

    /// Same field, moved to another exercise
    pub fn with_exercise(self, exercise: usize) -> Self {
        match self {
            Field::WorkoutName => Field::WorkoutName,
            Field::ExerciseName(_) => Field::ExerciseName(exercise),
            Field::Weight(_, s) => Field::Weight(exercise, s),
            Field::Reps(_, s) => Field::Reps(exercise, s),
        }
    }
}

pub struct App {
    pub routine: WorkoutRoutine,
    pub menus: Menus,
    pub popup: Popup,
    pub focus: Field,

    // First exercise shown in the list
    pub scroll: usize,

    // Clickable regions from the last frame
    pub hits: HitMap,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,

    // Snapshot taken by the last save
    pub last_saved: Option<WorkoutRoutine>,

    pub config: AppConfig,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let routine = WorkoutRoutine::new(config.workout_name.clone());
        tracing::info!("Starting routine \"{}\"", routine.name);

        Self {
            routine,
            menus: Menus::default(),
            popup: Popup::None,
            focus: Field::WorkoutName,
            scroll: 0,
            hits: HitMap::default(),
            status_message: None,
            status_message_time: None,
            last_saved: None,
            config,
        }
    }

    /// Set a status message (auto-clears after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    pub fn set_workout_name(&mut self, text: impl Into<String>) {
        self.routine.set_name(text);
    }

    pub fn set_exercise_name(&mut self, exercise: usize, text: impl Into<String>) -> Result<()> {
        self.routine.set_exercise_name(exercise, text)?;
        Ok(())
    }

    pub fn set_weight(&mut self, exercise: usize, set: usize, text: impl Into<String>) -> Result<()> {
        self.routine.set_weight(exercise, set, text)?;
        Ok(())
    }

    pub fn set_reps(&mut self, exercise: usize, set: usize, text: impl Into<String>) -> Result<()> {
        self.routine.set_reps(exercise, set, text)?;
        Ok(())
    }

    pub fn add_exercise(&mut self) {
        let index = self.routine.add_exercise();
        self.menus.close_all();
        self.focus = Field::ExerciseName(index);
        self.ensure_focus_visible();
        tracing::debug!("Added exercise {}", index);
    }

    pub fn remove_exercise(&mut self, index: usize) -> Result<()> {
        let removed = self.routine.remove_exercise(index)?;
        self.menus.close_all();

        // Follow the exercise under focus to its new position
        match self.focus.exercise() {
            Some(e) if e > index => self.focus = self.focus.with_exercise(e - 1),
            Some(e) if e == index => self.focus = Field::ExerciseName(index),
            _ => {}
        }
        self.clamp_focus();
        self.scroll = self.scroll.min(self.routine.exercises.len().saturating_sub(1));
        tracing::debug!("Removed exercise {} ({:?})", index, removed.name);
        Ok(())
    }

    pub fn add_set(&mut self, exercise: usize) -> Result<()> {
        let count = self.routine.add_set(exercise)?;
        self.menus.close_all();
        tracing::debug!("Exercise {} now has {} sets", exercise, count);
        Ok(())
    }

    pub fn remove_set(&mut self, exercise: usize) -> Result<()> {
        let removed = self.routine.remove_set(exercise)?;
        self.menus.close_all();
        if removed {
            self.clamp_focus();
        } else {
            self.set_status("An exercise needs at least one set");
        }
        Ok(())
    }

    pub fn toggle_exercise_menu(&mut self, index: usize) -> Result<()> {
        if self.routine.exercise(index).is_none() {
            return Err(crate::workout::WorkoutError::ExerciseOutOfRange(index).into());
        }
        self.menus.toggle_exercise(index);
        Ok(())
    }

    pub fn toggle_top_menu(&mut self) {
        self.menus.toggle_top();
    }

    /// Emit the routine to the log and acknowledge on screen. Nothing is persisted.
    pub fn save_workout_routine(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.routine)?;
        tracing::info!(
            exercises = self.routine.exercises.len(),
            sets = self.routine.total_sets(),
            "Workout routine saved: {}",
            json
        );

        self.last_saved = Some(self.routine.clone());
        self.menus.close_all();
        self.popup = Popup::Saved;

        if self.config.notify_on_save {
            self.notify_saved();
        }
        Ok(())
    }

    fn notify_saved(&self) {
        let body = format!("{} saved", self.routine.name);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(move || {
                    if let Err(e) = notify_rust::Notification::new()
                        .summary("liftbook")
                        .body(&body)
                        .show()
                    {
                        tracing::warn!("Notification failed: {}", e);
                    }
                });
            }
            Err(_) => tracing::debug!("No runtime, skipping save notification"),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle popups first
        if self.popup != Popup::None {
            return self.handle_popup_key(key);
        }

        if self.menus.active().is_some() && self.handle_menu_key(key)? {
            return Ok(());
        }

        self.handle_normal_key(key)
    }

    fn handle_popup_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.popup {
            Popup::Help => {
                if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Enter) {
                    self.popup = Popup::None;
                }
            }
            Popup::Saved => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ')) {
                    self.popup = Popup::None;
                }
            }
            Popup::None => {}
        }
        Ok(())
    }

    /// Keys consumed by an open menu. Returns false to let the key reach the form.
    fn handle_menu_key(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Esc => self.menus.close_all(),
            KeyCode::Down => self.menus.move_cursor(true),
            KeyCode::Up => self.menus.move_cursor(false),
            KeyCode::Enter => self.activate_menu_cursor()?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn activate_menu_cursor(&mut self) -> Result<()> {
        match self.menus.active() {
            Some(MenuId::Top) => {
                if let Some(action) = TopAction::ALL.get(self.menus.cursor) {
                    self.run_top_action(*action)?;
                }
            }
            Some(MenuId::Exercise(index)) => {
                // Never act through a menu that is not on screen
                if self.hits.list_height().is_some()
                    && self.hits.rect_of(Target::ExerciseMenuItem(index, ExerciseAction::AddSet)).is_none()
                {
                    self.menus.exercise.close();
                    return Ok(());
                }
                if let Some(action) = ExerciseAction::ALL.get(self.menus.cursor) {
                    self.run_exercise_action(index, *action)?;
                }
            }
            None => {}
        }
        Ok(())
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('n') if ctrl => self.add_exercise(),
            KeyCode::Char('s') if ctrl => self.save_workout_routine()?,

            KeyCode::F(1) => self.popup = Popup::Help,

            // Top menu; opening one menu from the keyboard closes the other
            KeyCode::F(2) => {
                self.menus.exercise.close();
                self.toggle_top_menu();
            }

            // Menu of the exercise under focus
            KeyCode::F(3) => match self.focus.exercise() {
                Some(index) => {
                    self.menus.top.close();
                    self.toggle_exercise_menu(index)?;
                }
                None => self.set_status("Focus an exercise to open its menu"),
            },

            KeyCode::Esc => self.menus.close_all(),

            // Field navigation
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => self.move_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(false),

            // Editing
            KeyCode::Backspace => {
                let mut text = self.field_text(self.focus).to_string();
                if text.pop().is_some() {
                    self.set_field(self.focus, text)?;
                }
            }
            KeyCode::Char(c) if !ctrl => {
                let mut text = self.field_text(self.focus).to_string();
                text.push(c);
                self.set_field(self.focus, text)?;
            }

            _ => {}
        }
        Ok(())
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        let position = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(button) => self.handle_pointer_down(position, button),
            MouseEventKind::ScrollDown => {
                if self.scroll + 1 < self.routine.exercises.len() {
                    self.scroll_to(self.scroll + 1);
                }
                Ok(())
            }
            MouseEventKind::ScrollUp => {
                self.scroll_to(self.scroll.saturating_sub(1));
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Dismiss menus the pointer landed outside of, then act on what was clicked.
    ///
    /// Regions come from the most recent frame and the open menu is read from current
    /// state, so the check always applies to the menu that is open right now.
    pub fn handle_pointer_down(&mut self, position: Position, button: MouseButton) -> Result<()> {
        if self.popup != Popup::None {
            if button == MouseButton::Left {
                self.popup = Popup::None;
            }
            return Ok(());
        }

        let hits = &self.hits;
        let dismissal = self.menus.dismiss_outside(|menu| hits.menu_contains(menu, position));
        if dismissal.any() {
            tracing::debug!(top = dismissal.top, exercise = ?dismissal.exercise, "Dismissed menus");
        }

        if button != MouseButton::Left {
            return Ok(());
        }

        if let Some(target) = self.hits.target_at(position) {
            self.activate(target)?;
        }
        Ok(())
    }

    fn activate(&mut self, target: Target) -> Result<()> {
        match target {
            Target::TopMenuButton => self.toggle_top_menu(),
            Target::TopMenuItem(action) => self.run_top_action(action)?,
            Target::ExerciseMenuButton(index) => self.toggle_exercise_menu(index)?,
            Target::ExerciseMenuItem(index, action) => self.run_exercise_action(index, action)?,
            Target::Field(field) => self.focus = field,
            Target::MenuPanel => {}
        }
        Ok(())
    }

    fn run_top_action(&mut self, action: TopAction) -> Result<()> {
        match action {
            TopAction::AddExercise => self.add_exercise(),
            TopAction::SaveRoutine => self.save_workout_routine()?,
        }
        Ok(())
    }

    fn run_exercise_action(&mut self, index: usize, action: ExerciseAction) -> Result<()> {
        match action {
            ExerciseAction::AddSet => self.add_set(index),
            ExerciseAction::RemoveLastSet => self.remove_set(index),
            ExerciseAction::RemoveExercise => self.remove_exercise(index),
        }
    }

    /// Fields in screen order
    pub fn fields(&self) -> Vec<Field> {
        let mut fields = vec![Field::WorkoutName];
        for (e, exercise) in self.routine.exercises.iter().enumerate() {
            fields.push(Field::ExerciseName(e));
            for s in 0..exercise.sets.len() {
                fields.push(Field::Weight(e, s));
                fields.push(Field::Reps(e, s));
            }
        }
        fields
    }

    fn move_focus(&mut self, forward: bool) {
        let fields = self.fields();
        let current = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % fields.len()
        } else {
            current.checked_sub(1).unwrap_or(fields.len() - 1)
        };
        self.focus = fields[next];
        self.ensure_focus_visible();
    }

    /// Keep focus on a field that still exists after a removal
    fn clamp_focus(&mut self) {
        let exercises = &self.routine.exercises;
        self.focus = match self.focus {
            Field::WorkoutName => Field::WorkoutName,
            field => {
                let e = field.exercise().unwrap_or(0);
                match exercises.len() {
                    0 => Field::WorkoutName,
                    len if e >= len => Field::ExerciseName(len - 1),
                    _ => match field {
                        Field::Weight(_, s) if s >= exercises[e].sets.len() => {
                            Field::Weight(e, exercises[e].sets.len() - 1)
                        }
                        Field::Reps(_, s) if s >= exercises[e].sets.len() => {
                            Field::Reps(e, exercises[e].sets.len() - 1)
                        }
                        other => other,
                    },
                }
            }
        };
        self.ensure_focus_visible();
    }

    /// Move the list. A contextual menu is anchored to its exercise, so it closes when the list moves.
    fn scroll_to(&mut self, scroll: usize) {
        if scroll == self.scroll {
            return;
        }
        self.scroll = scroll;
        if self.menus.exercise.close() {
            self.menus.cursor = 0;
            tracing::debug!("Closed exercise menu on scroll");
        }
    }

    fn ensure_focus_visible(&mut self) {
        let Some(e) = self.focus.exercise() else {
            return;
        };
        if e >= self.routine.exercises.len() {
            return;
        }
        if e < self.scroll {
            self.scroll_to(e);
            return;
        }
        let Some(height) = self.hits.list_height() else {
            return;
        };
        let exercises = &self.routine.exercises;
        let needed = |from: usize| -> u32 {
            exercises[from..=e]
                .iter()
                .map(|ex| u32::from(crate::ui::exercise_height(ex)))
                .sum()
        };
        let mut scroll = self.scroll;
        while scroll < e && needed(scroll) > u32::from(height) {
            scroll += 1;
        }
        self.scroll_to(scroll);
    }

    pub fn field_text(&self, field: Field) -> &str {
        let exercises = &self.routine.exercises;
        match field {
            Field::WorkoutName => &self.routine.name,
            Field::ExerciseName(e) => exercises.get(e).map(|ex| ex.name.as_str()).unwrap_or(""),
            Field::Weight(e, s) => exercises
                .get(e)
                .and_then(|ex| ex.sets.get(s))
                .map(|set| set.weight.as_str())
                .unwrap_or(""),
            Field::Reps(e, s) => exercises
                .get(e)
                .and_then(|ex| ex.sets.get(s))
                .map(|set| set.reps.as_str())
                .unwrap_or(""),
        }
    }

    fn set_field(&mut self, field: Field, text: String) -> Result<()> {
        match field {
            Field::WorkoutName => self.set_workout_name(text),
            Field::ExerciseName(e) => self.set_exercise_name(e, text)?,
            Field::Weight(e, s) => self.set_weight(e, s, text)?,
            Field::Reps(e, s) => self.set_reps(e, s, text)?,
        }
        Ok(())
    }

    pub fn tick(&mut self) {
        // Clear status message after a few seconds
        if let Some(time) = self.status_message_time {
            if time.elapsed().as_secs() >= STATUS_SECONDS {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuState;
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App {
        App::new(AppConfig::default())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    /// Draw a frame and remember its hit map, like the main loop does
    fn render(app: &mut App, terminal: &mut Terminal<TestBackend>) {
        let mut hits = HitMap::default();
        terminal.draw(|f| hits = crate::ui::draw(f, app)).unwrap();
        app.hits = hits;
    }

    fn click(app: &mut App, target: Target) {
        let area = app.hits.rect_of(target).expect("target drawn");
        app.handle_pointer_down(Position::new(area.x, area.y), MouseButton::Left)
            .unwrap();
    }

    #[test]
    fn test_scenario_sets() {
        let mut app = app();
        app.add_set(0).unwrap();
        assert_eq!(app.routine.exercises[0].sets.len(), 2);
        app.remove_set(0).unwrap();
        assert_eq!(app.routine.exercises[0].sets.len(), 1);
        app.remove_set(0).unwrap();
        assert_eq!(app.routine.exercises[0].sets.len(), 1);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_structural_mutations_close_top_menu() {
        let mut app = app();

        app.toggle_top_menu();
        app.add_exercise();
        assert!(!app.menus.top.is_open());

        app.toggle_top_menu();
        app.remove_exercise(1).unwrap();
        assert!(!app.menus.top.is_open());

        app.toggle_top_menu();
        app.save_workout_routine().unwrap();
        assert!(!app.menus.top.is_open());
        assert_eq!(app.popup, Popup::Saved);
        assert_eq!(app.last_saved.as_ref(), Some(&app.routine));
    }

    #[test]
    fn test_remove_exercise_out_of_range_is_error() {
        let mut app = app();
        assert!(app.remove_exercise(5).is_err());
        assert!(app.toggle_exercise_menu(5).is_err());
        assert_eq!(app.menus.exercise, MenuState::Closed);
    }

    #[test]
    fn test_typing_into_exercise_name() {
        let mut app = app();
        app.add_exercise();
        app.focus = Field::ExerciseName(0);
        type_text(&mut app, "Bench Presss");
        press(&mut app, KeyCode::Backspace);

        assert_eq!(app.routine.exercises[0].name, "Bench Press");
        assert_eq!(app.routine.exercises[1].name, "");
    }

    #[test]
    fn test_tab_walks_fields_in_order() {
        let mut app = app();
        assert_eq!(app.focus, Field::WorkoutName);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Field::ExerciseName(0));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Field::Weight(0, 0));
        type_text(&mut app, "100");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "5");
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Field::WorkoutName);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, Field::Reps(0, 0));

        let set = &app.routine.exercises[0].sets[0];
        assert_eq!((set.weight.as_str(), set.reps.as_str()), ("100", "5"));
    }

    #[test]
    fn test_keyboard_menu_actions() {
        let mut app = app();
        app.focus = Field::Reps(0, 0);

        press(&mut app, KeyCode::F(3));
        assert!(app.menus.exercise.is_open_for(0));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.routine.exercises[0].sets.len(), 2);
        assert!(!app.menus.exercise.is_open());

        press(&mut app, KeyCode::F(2));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.popup, Popup::Saved);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.popup, Popup::None);
    }

    #[test]
    fn test_removing_focused_set_moves_focus() {
        let mut app = app();
        app.add_set(0).unwrap();
        app.focus = Field::Weight(0, 1);
        app.remove_set(0).unwrap();
        assert_eq!(app.focus, Field::Weight(0, 0));

        app.remove_exercise(0).unwrap();
        assert_eq!(app.focus, Field::WorkoutName);
        assert!(app.routine.exercises.is_empty());
    }

    #[test]
    fn test_click_toggles_and_outside_click_dismisses() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut app = app();
        app.add_exercise();

        render(&mut app, &mut terminal);
        click(&mut app, Target::TopMenuButton);
        assert!(app.menus.top.is_open());

        render(&mut app, &mut terminal);
        click(&mut app, Target::ExerciseMenuButton(1));
        // Clicking exercise 1's button lies outside the top menu
        assert!(!app.menus.top.is_open());
        assert!(app.menus.exercise.is_open_for(1));

        render(&mut app, &mut terminal);
        click(&mut app, Target::ExerciseMenuButton(0));
        assert_eq!(app.menus.exercise.open_id(), Some(0));

        render(&mut app, &mut terminal);
        click(&mut app, Target::ExerciseMenuButton(0));
        assert!(!app.menus.exercise.is_open());
    }

    #[test]
    fn test_outside_click_closes_both_menus() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut app = app();
        app.toggle_top_menu();
        app.toggle_exercise_menu(0).unwrap();

        render(&mut app, &mut terminal);
        // Bottom-left corner holds the footer hints, part of no menu
        app.handle_pointer_down(Position::new(0, 29), MouseButton::Right)
            .unwrap();

        assert!(!app.menus.top.is_open());
        assert!(!app.menus.exercise.is_open());
    }

    #[test]
    fn test_clicking_menu_items() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut app = app();

        render(&mut app, &mut terminal);
        click(&mut app, Target::ExerciseMenuButton(0));
        render(&mut app, &mut terminal);
        click(&mut app, Target::ExerciseMenuItem(0, ExerciseAction::AddSet));
        assert_eq!(app.routine.exercises[0].sets.len(), 2);
        assert!(!app.menus.exercise.is_open());

        render(&mut app, &mut terminal);
        click(&mut app, Target::TopMenuButton);
        render(&mut app, &mut terminal);
        click(&mut app, Target::TopMenuItem(TopAction::AddExercise));
        assert_eq!(app.routine.exercises.len(), 2);
        assert!(!app.menus.top.is_open());

        render(&mut app, &mut terminal);
        click(&mut app, Target::Field(Field::Reps(0, 1)));
        assert_eq!(app.focus, Field::Reps(0, 1));

        render(&mut app, &mut terminal);
        click(&mut app, Target::ExerciseMenuButton(1));
        render(&mut app, &mut terminal);
        click(&mut app, Target::ExerciseMenuItem(1, ExerciseAction::RemoveExercise));
        assert_eq!(app.routine.exercises.len(), 1);
    }

    #[test]
    fn test_removing_earlier_exercise_keeps_focus_on_same_exercise() {
        let mut app = app();
        app.add_exercise();
        app.add_exercise();
        app.set_exercise_name(1, "B".to_string()).unwrap();
        app.set_exercise_name(2, "C".to_string()).unwrap();

        app.focus = Field::ExerciseName(1);
        app.remove_exercise(0).unwrap();
        assert_eq!(app.focus, Field::ExerciseName(0));
        assert_eq!(app.field_text(app.focus), "B");

        app.focus = Field::Weight(1, 0);
        app.remove_exercise(0).unwrap();
        assert_eq!(app.focus, Field::Weight(0, 0));
        assert_eq!(app.routine.exercises[0].name, "C");
    }

    #[test]
    fn test_removing_focused_exercise_focuses_its_neighbour() {
        let mut app = app();
        app.add_exercise();
        app.add_exercise();
        app.set_exercise_name(2, "C".to_string()).unwrap();

        app.focus = Field::Reps(1, 0);
        app.remove_exercise(1).unwrap();
        assert_eq!(app.focus, Field::ExerciseName(1));
        assert_eq!(app.field_text(app.focus), "C");

        // Last one removed: focus moves back to the new last exercise
        app.remove_exercise(1).unwrap();
        assert_eq!(app.focus, Field::ExerciseName(0));

        app.remove_exercise(0).unwrap();
        assert_eq!(app.focus, Field::WorkoutName);
    }

    #[test]
    fn test_scrolling_closes_exercise_menu() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let mut app = app();
        for _ in 0..4 {
            app.add_exercise();
        }
        render(&mut app, &mut terminal);
        click(&mut app, Target::ExerciseMenuButton(0));
        assert!(app.menus.exercise.is_open_for(0));
        render(&mut app, &mut terminal);

        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        })
        .unwrap();
        assert!(!app.menus.exercise.is_open());

        render(&mut app, &mut terminal);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.routine.exercises[0].sets.len(), 1);
    }

    #[test]
    fn test_enter_ignores_exercise_menu_that_is_off_screen() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let mut app = app();
        for _ in 0..4 {
            app.add_exercise();
        }
        app.toggle_exercise_menu(0).unwrap();
        app.scroll = 1;
        render(&mut app, &mut terminal);

        press(&mut app, KeyCode::Enter);
        assert!(!app.menus.exercise.is_open());
        assert_eq!(app.routine.exercises[0].sets.len(), 1);
    }

    #[test]
    fn test_clicking_top_button_twice_closes_menu() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut app = app();

        render(&mut app, &mut terminal);
        click(&mut app, Target::TopMenuButton);
        assert!(app.menus.top.is_open());

        render(&mut app, &mut terminal);
        click(&mut app, Target::TopMenuButton);
        assert!(!app.menus.top.is_open());
    }

    #[test]
    fn test_tick_clears_status_after_timeout() {
        let mut app = app();
        app.set_status("hello");
        app.tick();
        assert!(app.status_message.is_some());

        app.status_message_time = Instant::now().checked_sub(std::time::Duration::from_secs(STATUS_SECONDS));
        app.tick();
        assert!(app.status_message.is_none());
    }
}
