//! Dropdown menu state
//!
//! Two menus exist: the top-level menu next to the workout name, and one contextual
//! menu per exercise (at most one of those open at a time). Each is a small
//! `Closed`/`Open(id)` state machine.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState<K> {
    Closed,
    Open(K),
}

impl<K> Default for MenuState<K> {
    fn default() -> Self {
        MenuState::Closed
    }
}

impl<K: Copy + PartialEq> MenuState<K> {
    /// Open for `id`, or close if already open for `id`
    pub fn toggle(&mut self, id: K) {
        *self = match *self {
            MenuState::Open(current) if current == id => MenuState::Closed,
            _ => MenuState::Open(id),
        };
    }

    /// Returns true if the menu was open
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        *self = MenuState::Closed;
        was_open
    }

    pub fn open_id(&self) -> Option<K> {
        match *self {
            MenuState::Open(id) => Some(id),
            MenuState::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, MenuState::Open(_))
    }

    pub fn is_open_for(&self, id: K) -> bool {
        self.open_id() == Some(id)
    }
}

/// Which menu a screen region belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuId {
    Top,
    Exercise(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopAction {
    AddExercise,
    SaveRoutine,
}

impl TopAction {
    pub const ALL: [TopAction; 2] = [TopAction::AddExercise, TopAction::SaveRoutine];

    pub fn label(self) -> &'static str {
        match self {
            TopAction::AddExercise => "Add Exercise",
            TopAction::SaveRoutine => "Save Workout Routine",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseAction {
    AddSet,
    RemoveLastSet,
    RemoveExercise,
}

impl ExerciseAction {
    pub const ALL: [ExerciseAction; 3] = [
        ExerciseAction::AddSet,
        ExerciseAction::RemoveLastSet,
        ExerciseAction::RemoveExercise,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExerciseAction::AddSet => "Add Set",
            ExerciseAction::RemoveLastSet => "Remove Last Set",
            ExerciseAction::RemoveExercise => "Remove Exercise",
        }
    }

    pub fn is_destructive(self) -> bool {
        self == ExerciseAction::RemoveExercise
    }
}

/// What a pointer-down dismissed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dismissal {
    pub top: bool,
    pub exercise: Option<usize>,
}

impl Dismissal {
    pub fn any(&self) -> bool {
        self.top || self.exercise.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Menus {
    pub top: MenuState<()>,
    pub exercise: MenuState<usize>,
    /// Keyboard highlight inside whichever menu is active
    pub cursor: usize,
}

impl Menus {
    pub fn toggle_top(&mut self) {
        self.top.toggle(());
        self.cursor = 0;
    }

    pub fn toggle_exercise(&mut self, index: usize) {
        self.exercise.toggle(index);
        self.cursor = 0;
    }

    pub fn close_all(&mut self) {
        self.top.close();
        self.exercise.close();
        self.cursor = 0;
    }

    /// The menu that receives keyboard navigation. A contextual menu wins over the top menu.
    pub fn active(&self) -> Option<MenuId> {
        if let Some(index) = self.exercise.open_id() {
            Some(MenuId::Exercise(index))
        } else if self.top.is_open() {
            Some(MenuId::Top)
        } else {
            None
        }
    }

    pub fn move_cursor(&mut self, down: bool) {
        let count = match self.active() {
            Some(MenuId::Top) => TopAction::ALL.len(),
            Some(MenuId::Exercise(_)) => ExerciseAction::ALL.len(),
            None => return,
        };
        self.cursor = if down {
            (self.cursor + 1) % count
        } else {
            self.cursor.checked_sub(1).unwrap_or(count - 1)
        };
    }

    /// Close every open menu whose region does not contain the pointer.
    ///
    /// `inside` answers whether the current pointer position lies within a menu's region.
    /// Both menus are checked independently on every call.
    pub fn dismiss_outside(&mut self, inside: impl Fn(MenuId) -> bool) -> Dismissal {
        let mut dismissal = Dismissal::default();

        if self.top.is_open() && !inside(MenuId::Top) {
            self.top.close();
            dismissal.top = true;
        }

        if let Some(index) = self.exercise.open_id() {
            if !inside(MenuId::Exercise(index)) {
                self.exercise.close();
                dismissal.exercise = Some(index);
            }
        }

        if dismissal.any() {
            self.cursor = 0;
        }
        dismissal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_same_exercise_twice_closes() {
        let mut menus = Menus::default();
        menus.toggle_exercise(2);
        assert!(menus.exercise.is_open_for(2));
        menus.toggle_exercise(2);
        assert_eq!(menus.exercise, MenuState::Closed);
    }

    #[test]
    fn test_toggle_a_then_b_leaves_b() {
        let mut menus = Menus::default();
        menus.toggle_exercise(0);
        menus.toggle_exercise(1);
        assert_eq!(menus.exercise.open_id(), Some(1));
        assert!(!menus.exercise.is_open_for(0));
    }

    #[test]
    fn test_outside_pointer_closes_both() {
        let mut menus = Menus::default();
        menus.toggle_top();
        menus.toggle_exercise(3);

        let dismissal = menus.dismiss_outside(|_| false);
        assert_eq!(dismissal, Dismissal { top: true, exercise: Some(3) });
        assert!(!menus.top.is_open());
        assert!(!menus.exercise.is_open());
    }

    #[test]
    fn test_pointer_inside_one_menu_closes_only_the_other() {
        let mut menus = Menus::default();
        menus.toggle_top();
        menus.toggle_exercise(1);

        let dismissal = menus.dismiss_outside(|menu| menu == MenuId::Exercise(1));
        assert!(dismissal.top);
        assert_eq!(dismissal.exercise, None);
        assert!(menus.exercise.is_open_for(1));

        menus.toggle_top();
        let dismissal = menus.dismiss_outside(|menu| menu == MenuId::Top);
        assert_eq!(dismissal.exercise, Some(1));
        assert!(menus.top.is_open());
    }

    #[test]
    fn test_dismissal_reads_current_index() {
        let mut menus = Menus::default();
        menus.toggle_exercise(0);
        menus.toggle_exercise(4);

        // Pointer sits inside exercise 0's old region only
        let dismissal = menus.dismiss_outside(|menu| menu == MenuId::Exercise(0));
        assert_eq!(dismissal.exercise, Some(4));
    }

    #[test]
    fn test_cursor_wraps_within_active_menu() {
        let mut menus = Menus::default();
        menus.move_cursor(true);
        assert_eq!(menus.cursor, 0);

        menus.toggle_exercise(0);
        menus.move_cursor(false);
        assert_eq!(menus.cursor, ExerciseAction::ALL.len() - 1);
        menus.move_cursor(true);
        assert_eq!(menus.cursor, 0);

        menus.close_all();
        menus.toggle_top();
        menus.move_cursor(true);
        menus.move_cursor(true);
        assert_eq!(menus.cursor, 0);
    }
}
