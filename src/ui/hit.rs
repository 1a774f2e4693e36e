//! Screen regions recorded during a draw, used to route pointer events

use ratatui::layout::{Position, Rect};

use crate::app::Field;
use crate::menu::{ExerciseAction, MenuId, TopAction};

/// Something clickable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    TopMenuButton,
    TopMenuItem(TopAction),
    ExerciseMenuButton(usize),
    ExerciseMenuItem(usize, ExerciseAction),
    Field(Field),
    /// Body of an open dropdown; swallows clicks so nothing underneath reacts
    MenuPanel,
}

#[derive(Debug, Clone, Default)]
pub struct HitMap {
    /// Later entries are drawn on top of earlier ones
    targets: Vec<(Rect, Target)>,
    regions: Vec<(MenuId, Rect)>,
    list_height: u16,
}

impl HitMap {
    pub fn push(&mut self, area: Rect, target: Target) {
        if !area.is_empty() {
            self.targets.push((area, target));
        }
    }

    /// Mark `area` as part of `menu`'s region; pointer-downs there don't dismiss it
    pub fn add_region(&mut self, menu: MenuId, area: Rect) {
        if !area.is_empty() {
            self.regions.push((menu, area));
        }
    }

    pub fn target_at(&self, position: Position) -> Option<Target> {
        self.targets
            .iter()
            .rev()
            .find(|(area, _)| area.contains(position))
            .map(|(_, target)| *target)
    }

    pub fn menu_contains(&self, menu: MenuId, position: Position) -> bool {
        self.regions
            .iter()
            .any(|(id, area)| *id == menu && area.contains(position))
    }

    pub fn rect_of(&self, target: Target) -> Option<Rect> {
        self.targets
            .iter()
            .rev()
            .find(|(_, t)| *t == target)
            .map(|(area, _)| *area)
    }

    pub fn set_list_height(&mut self, height: u16) {
        self.list_height = height;
    }

    /// Rows available to the exercise list in the previous frame, if one was drawn
    pub fn list_height(&self) -> Option<u16> {
        (self.list_height > 0).then_some(self.list_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topmost_target_wins() {
        let mut hits = HitMap::default();
        hits.push(Rect::new(0, 0, 20, 5), Target::Field(Field::WorkoutName));
        hits.push(Rect::new(5, 1, 10, 1), Target::TopMenuItem(TopAction::SaveRoutine));

        assert_eq!(
            hits.target_at(Position::new(6, 1)),
            Some(Target::TopMenuItem(TopAction::SaveRoutine))
        );
        assert_eq!(hits.target_at(Position::new(1, 1)), Some(Target::Field(Field::WorkoutName)));
        assert_eq!(hits.target_at(Position::new(30, 1)), None);
    }

    #[test]
    fn test_regions_are_per_menu() {
        let mut hits = HitMap::default();
        hits.add_region(MenuId::Top, Rect::new(70, 0, 5, 3));
        hits.add_region(MenuId::Exercise(1), Rect::new(60, 10, 3, 1));
        hits.add_region(MenuId::Exercise(1), Rect::new(40, 11, 22, 5));

        assert!(hits.menu_contains(MenuId::Top, Position::new(72, 1)));
        assert!(hits.menu_contains(MenuId::Exercise(1), Position::new(45, 13)));
        assert!(!hits.menu_contains(MenuId::Exercise(0), Position::new(45, 13)));
        assert!(!hits.menu_contains(MenuId::Top, Position::new(45, 13)));
    }

    #[test]
    fn test_empty_areas_are_ignored() {
        let mut hits = HitMap::default();
        hits.push(Rect::new(3, 3, 0, 1), Target::TopMenuButton);
        hits.add_region(MenuId::Top, Rect::new(3, 3, 4, 0));

        assert_eq!(hits.rect_of(Target::TopMenuButton), None);
        assert!(!hits.menu_contains(MenuId::Top, Position::new(3, 3)));
    }
}
