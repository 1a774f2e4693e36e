mod hit;

pub use hit::{HitMap, Target};

use std::rc::Rc;
use std::sync::OnceLock;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Field, Popup};
use crate::menu::{ExerciseAction, MenuId, TopAction};
use crate::theme::Theme;
use crate::workout::Exercise;

// Theme is fixed for the lifetime of the process
static THEME: OnceLock<Theme> = OnceLock::new();

/// Install the theme built from config. Only the first call has an effect.
pub fn init_theme(theme: Theme) {
    if THEME.set(theme).is_err() {
        tracing::debug!("Theme already initialised");
    }
}

fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

// Helper functions to get theme colors
fn accent() -> Color { theme().accent }
fn danger() -> Color { theme().danger }
fn text() -> Color { theme().text }
fn text_dim() -> Color { theme().text_dim }
fn inactive() -> Color { theme().inactive }
fn menu_bg() -> Color { theme().menu_bg }
fn input_bg() -> Color { theme().input_bg }
fn selected_bg() -> Color { theme().selected_bg }
fn header() -> Color { theme().header }

const MENU_BUTTON_WIDTH: u16 = 3;
const TOP_MENU_WIDTH: u16 = 26;
const EXERCISE_MENU_WIDTH: u16 = 21;

/// Rows an exercise block takes: borders, name row and column headers around the sets
pub fn exercise_height(exercise: &Exercise) -> u16 {
    u16::try_from(exercise.sets.len())
        .unwrap_or(u16::MAX)
        .saturating_add(4)
}

/// Draw the whole view and return the clickable regions of this frame
pub fn draw(f: &mut Frame, app: &App) -> HitMap {
    let area = f.area();
    let mut hits = HitMap::default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),               // Workout name + menu button
            Constraint::Length(1),               // Info line
            Constraint::Min(3),                  // Exercises
            Constraint::Length(2),               // Navigation icons
            Constraint::Length(1),               // Key hints
        ])
        .split(area);

    draw_header(f, app, chunks[0], &mut hits);
    draw_info_line(f, app, chunks[1]);
    draw_exercises(f, app, chunks[2], &mut hits);
    draw_nav_bar(f, chunks[3]);
    draw_footer(f, app, chunks[4]);

    // Dropdowns sit above the form
    if app.menus.top.is_open() {
        draw_top_menu(f, app, chunks[0], &mut hits);
    }
    if let Some(index) = app.menus.exercise.open_id() {
        draw_exercise_menu(f, app, index, &mut hits);
    }

    match app.popup {
        Popup::None => {}
        Popup::Help => draw_help_popup(f),
        Popup::Saved => draw_saved_popup(f, app),
    }

    hits
}

/// Last characters of `value` that fit in `width` columns next to the cursor
fn visible_tail(value: &str, width: u16) -> &str {
    let room = usize::from(width.saturating_sub(1));
    let count = value.chars().count();
    if count <= room {
        return value;
    }
    match value.char_indices().nth(count - room) {
        Some((start, _)) => &value[start..],
        None => "",
    }
}

/// Text with a placeholder when empty and a cursor when focused.
/// A focused value scrolls so its end and the cursor stay inside `width`.
fn input_line<'a>(value: &'a str, placeholder: &'a str, focused: bool, width: u16) -> Line<'a> {
    let mut spans = if value.is_empty() && !focused {
        vec![Span::styled(placeholder, Style::default().fg(text_dim()))]
    } else if focused {
        vec![Span::raw(visible_tail(value, width))]
    } else {
        vec![Span::raw(value)]
    };
    if focused {
        spans.push(Span::styled("_", Style::default().fg(accent())));
    }
    Line::from(spans)
}

fn draw_header(f: &mut Frame, app: &App, area: Rect, hits: &mut HitMap) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(inactive()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(MENU_BUTTON_WIDTH),
        ])
        .split(inner);

    let focused = app.focus == Field::WorkoutName;
    let name = Paragraph::new(input_line(&app.routine.name, "Workout Name", focused, cols[0].width))
        .style(Style::default().fg(text()).add_modifier(Modifier::BOLD));
    f.render_widget(name, cols[0]);
    hits.push(cols[0], Target::Field(Field::WorkoutName));

    let button_color = if app.menus.top.is_open() { accent() } else { text_dim() };
    let button = Paragraph::new("☰")
        .style(Style::default().fg(button_color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(button, cols[1]);
    hits.push(cols[1], Target::TopMenuButton);
    hits.add_region(MenuId::Top, cols[1]);
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    // Priority: status message > routine totals
    let line = if let Some(ref status) = app.status_message {
        Line::from(Span::styled(status.as_str(), Style::default().fg(accent())))
    } else {
        let exercises = app.routine.exercises.len();
        Line::from(Span::styled(
            format!(
                "{} exercise{} · {} set{}",
                exercises,
                if exercises == 1 { "" } else { "s" },
                app.routine.total_sets(),
                if app.routine.total_sets() == 1 { "" } else { "s" },
            ),
            Style::default().fg(text_dim()),
        ))
    };

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_exercises(f: &mut Frame, app: &App, area: Rect, hits: &mut HitMap) {
    hits.set_list_height(area.height);

    if app.routine.exercises.is_empty() {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("No exercises. Press ", Style::default().fg(text_dim())),
                Span::styled("Ctrl-N", Style::default().fg(accent())),
                Span::styled(" or open ", Style::default().fg(text_dim())),
                Span::styled("☰", Style::default().fg(accent())),
                Span::styled(" to add one.", Style::default().fg(text_dim())),
            ]),
        ])
        .alignment(Alignment::Center);
        f.render_widget(hint, area);
        return;
    }

    let mut y = area.y;
    for (index, exercise) in app.routine.exercises.iter().enumerate().skip(app.scroll) {
        if y >= area.bottom() {
            break;
        }
        let height = exercise_height(exercise);
        let block_area = Rect::new(area.x, y, area.width, height).intersection(area);
        draw_exercise(f, app, index, exercise, block_area, hits);
        y = y.saturating_add(height);
    }
}

fn set_columns(row: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(5),   // Set number
            Constraint::Length(2),
            Constraint::Length(10),  // Weight
            Constraint::Length(2),
            Constraint::Length(10),  // Reps
            Constraint::Min(0),
        ])
        .split(row)
}

fn draw_exercise(f: &mut Frame, app: &App, index: usize, exercise: &Exercise, area: Rect, hits: &mut HitMap) {
    let has_focus = app.focus.exercise() == Some(index);
    let border_color = if has_focus { accent() } else { inactive() };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    // Name row with the menu button on the right
    let name_row = Rect::new(inner.x, inner.y, inner.width, 1);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(MENU_BUTTON_WIDTH),
        ])
        .split(name_row);

    let focused = app.focus == Field::ExerciseName(index);
    let name = Paragraph::new(input_line(&exercise.name, "Exercise Name", focused, cols[0].width))
        .style(Style::default().fg(text()).add_modifier(Modifier::BOLD));
    f.render_widget(name, cols[0]);
    hits.push(cols[0], Target::Field(Field::ExerciseName(index)));

    let button_color = if app.menus.exercise.is_open_for(index) { accent() } else { text_dim() };
    let button = Paragraph::new("⋮")
        .style(Style::default().fg(button_color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(button, cols[1]);
    hits.push(cols[1], Target::ExerciseMenuButton(index));
    hits.add_region(MenuId::Exercise(index), cols[1]);

    if inner.height < 2 {
        return;
    }

    let header_cols = set_columns(Rect::new(inner.x, inner.y + 1, inner.width, 1));
    for (col, label) in [(0, "SET"), (2, "WEIGHT"), (4, "REPS")] {
        let cell = Paragraph::new(label)
            .style(Style::default().fg(header()))
            .alignment(Alignment::Center);
        f.render_widget(cell, header_cols[col]);
    }

    for (set_index, set) in exercise.sets.iter().enumerate() {
        let y = inner
            .y
            .saturating_add(2)
            .saturating_add(u16::try_from(set_index).unwrap_or(u16::MAX));
        if y >= inner.bottom() {
            break;
        }
        let cols = set_columns(Rect::new(inner.x, y, inner.width, 1));

        let number = Paragraph::new((set_index + 1).to_string())
            .style(Style::default().fg(text()))
            .alignment(Alignment::Center);
        f.render_widget(number, cols[0]);

        let weight = Field::Weight(index, set_index);
        draw_set_input(f, cols[2], &set.weight, "Weight", app.focus == weight);
        hits.push(cols[2], Target::Field(weight));

        let reps = Field::Reps(index, set_index);
        draw_set_input(f, cols[4], &set.reps, "Reps", app.focus == reps);
        hits.push(cols[4], Target::Field(reps));
    }
}

fn draw_set_input(f: &mut Frame, area: Rect, value: &str, placeholder: &str, focused: bool) {
    let mut style = Style::default().bg(input_bg()).fg(text());
    if focused {
        style = style.add_modifier(Modifier::BOLD);
    }
    let input = Paragraph::new(input_line(value, placeholder, focused, area.width))
        .style(style)
        .alignment(Alignment::Center);
    f.render_widget(input, area);
}

/// Render a bordered list of menu items, returning the area of each visible item
fn draw_dropdown(f: &mut Frame, area: Rect, items: &[(&str, bool)], cursor: usize) -> Vec<Rect> {
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(inactive()))
        .style(Style::default().bg(menu_bg()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut rects = Vec::new();
    for (i, (label, destructive)) in items.iter().enumerate() {
        let row = Rect::new(
            inner.x,
            inner.y.saturating_add(u16::try_from(i).unwrap_or(u16::MAX)),
            inner.width,
            1,
        )
        .intersection(inner);
        if row.is_empty() {
            break;
        }

        let mut style = Style::default().fg(if *destructive { danger() } else { text() });
        if i == cursor {
            style = style.bg(selected_bg()).add_modifier(Modifier::BOLD);
        }
        f.render_widget(Paragraph::new(format!(" {}", label)).style(style), row);
        rects.push(row);
    }
    rects
}

fn draw_top_menu(f: &mut Frame, app: &App, header_area: Rect, hits: &mut HitMap) {
    let frame = f.area();
    let width = TOP_MENU_WIDTH.min(frame.width);
    let height = TopAction::ALL.len() as u16 + 2;
    let x = frame.right().saturating_sub(width + 1).max(frame.x);
    let area = Rect::new(x, header_area.bottom(), width, height).intersection(frame);
    if area.is_empty() {
        return;
    }

    let items: Vec<(&str, bool)> = TopAction::ALL.iter().map(|a| (a.label(), false)).collect();
    let rects = draw_dropdown(f, area, &items, app.menus.cursor);

    hits.add_region(MenuId::Top, area);
    hits.push(area, Target::MenuPanel);
    for (rect, action) in rects.into_iter().zip(TopAction::ALL) {
        hits.push(rect, Target::TopMenuItem(action));
    }
}

fn draw_exercise_menu(f: &mut Frame, app: &App, index: usize, hits: &mut HitMap) {
    // Anchored to the exercise's button; nothing to draw if it is scrolled away
    let Some(anchor) = hits.rect_of(Target::ExerciseMenuButton(index)) else {
        return;
    };

    let frame = f.area();
    let width = EXERCISE_MENU_WIDTH.min(frame.width);
    let height = ExerciseAction::ALL.len() as u16 + 2;
    let x = anchor.right().saturating_sub(width).max(frame.x);
    let y = if anchor.bottom().saturating_add(height) <= frame.bottom() {
        anchor.bottom()
    } else {
        anchor.y.saturating_sub(height)
    };
    let area = Rect::new(x, y, width, height).intersection(frame);
    if area.is_empty() {
        return;
    }

    let items: Vec<(&str, bool)> = ExerciseAction::ALL
        .iter()
        .map(|a| (a.label(), a.is_destructive()))
        .collect();
    let rects = draw_dropdown(f, area, &items, app.menus.cursor);

    hits.add_region(MenuId::Exercise(index), area);
    hits.push(area, Target::MenuPanel);
    for (rect, action) in rects.into_iter().zip(ExerciseAction::ALL) {
        hits.push(rect, Target::ExerciseMenuItem(index, action));
    }
}

fn draw_nav_bar(f: &mut Frame, area: Rect) {
    // Placeholder destinations, not wired to anything yet
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(inactive()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let icons = ["⌂", "♥", "▦", "▤", "⚙"];
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(icons.iter().map(|_| Constraint::Ratio(1, icons.len() as u32)))
        .split(inner);

    for (icon, col) in icons.iter().zip(cols.iter()) {
        let cell = Paragraph::new(*icon)
            .style(Style::default().fg(text_dim()))
            .alignment(Alignment::Center);
        f.render_widget(cell, *col);
    }
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints: Vec<(&str, &str)> = match app.menus.active() {
        Some(_) => vec![
            ("↑↓", "Select"),
            ("Enter", "Choose"),
            ("Esc", "Close"),
        ],
        None => vec![
            ("Tab", "Next"),
            ("F2", "Menu"),
            ("F3", "Exercise"),
            ("^N", "Add"),
            ("^S", "Save"),
            ("F1", "Help"),
            ("^Q", "Quit"),
        ],
    };

    // Responsive: show fewer hints on narrow terminals
    let max_hints = if area.width < 60 { 4 } else if area.width < 80 { 5 } else { hints.len() };

    let hint_spans: Vec<Span> = hints
        .iter()
        .take(max_hints)
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(accent())),
                Span::styled(format!(" {} │ ", action), Style::default().fg(text_dim())),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(hint_spans))
        .alignment(Alignment::Center);

    f.render_widget(footer, area);
}

fn draw_help_popup(f: &mut Frame) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 95 } else { 60 },
        if area.height < 30 { 95 } else { 70 },
        area
    );

    f.render_widget(Clear, popup_area);

    let section = |title: &'static str| {
        Line::from(Span::styled(title, Style::default().fg(header()).add_modifier(Modifier::BOLD)))
    };
    let binding = |keys: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", keys), Style::default().fg(accent())),
            Span::raw(what),
        ])
    };

    let help_text = vec![
        section("═══ Editing ═══"),
        binding("Tab ↓ Enter", "Next field"),
        binding("Shift-Tab ↑", "Previous field"),
        binding("Backspace", "Delete last character"),
        binding("Click", "Focus a field"),
        Line::from(""),
        section("═══ Routine ═══"),
        binding("F2 / ☰", "Routine menu (add exercise, save)"),
        binding("F3 / ⋮", "Exercise menu (add/remove set, remove exercise)"),
        binding("Ctrl-N", "Add exercise"),
        binding("Ctrl-S", "Save routine"),
        binding("Esc", "Close menus"),
        Line::from(""),
        section("═══ General ═══"),
        binding("Wheel", "Scroll exercises"),
        binding("Ctrl-Q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(text_dim())),
            Span::styled("F1", Style::default().fg(accent())),
            Span::styled("/", Style::default().fg(text_dim())),
            Span::styled("Esc", Style::default().fg(accent())),
            Span::styled(" to close", Style::default().fg(text_dim())),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" liftbook Help ", Style::default().fg(accent())))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn draw_saved_popup(f: &mut Frame, app: &App) {
    let popup_area = centered_rect(50, 30, f.area());

    f.render_widget(Clear, popup_area);

    let summary = format!(
        "{}: {} exercises, {} sets",
        app.routine.name,
        app.routine.exercises.len(),
        app.routine.total_sets()
    );

    let saved = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Workout Routine Saved!",
            Style::default().fg(text()).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(summary, Style::default().fg(text_dim()))),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(accent()).add_modifier(Modifier::BOLD)),
            Span::styled(" OK", Style::default().fg(text_dim())),
        ]),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent())),
    )
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    f.render_widget(saved, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
