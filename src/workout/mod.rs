//! Workout routine model
//!
//! A routine is an ordered list of exercises, each holding an ordered list of sets.
//! Every field is free text; nothing here parses weights or reps.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name given to a fresh routine when nothing else is configured
pub const DEFAULT_WORKOUT_NAME: &str = "Workout Name";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkoutError {
    #[error("no exercise at position {0}")]
    ExerciseOutOfRange(usize),
    #[error("exercise {exercise} has no set {set}")]
    SetOutOfRange { exercise: usize, set: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetEntry {
    pub weight: String,
    pub reps: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    /// Never empty
    pub sets: Vec<SetEntry>,
}

impl Default for Exercise {
    fn default() -> Self {
        Self {
            name: String::new(),
            sets: vec![SetEntry::default()],
        }
    }
}

impl Exercise {
    fn set_mut(&mut self, exercise: usize, set: usize) -> Result<&mut SetEntry, WorkoutError> {
        self.sets
            .get_mut(set)
            .ok_or(WorkoutError::SetOutOfRange { exercise, set })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutRoutine {
    #[serde(rename = "workoutName")]
    pub name: String,
    pub exercises: Vec<Exercise>,
}

impl Default for WorkoutRoutine {
    fn default() -> Self {
        Self::new(DEFAULT_WORKOUT_NAME)
    }
}

impl WorkoutRoutine {
    /// A routine with one empty exercise holding one empty set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exercises: vec![Exercise::default()],
        }
    }

    pub fn set_name(&mut self, text: impl Into<String>) {
        self.name = text.into();
    }

    pub fn exercise(&self, index: usize) -> Option<&Exercise> {
        self.exercises.get(index)
    }

    fn exercise_mut(&mut self, index: usize) -> Result<&mut Exercise, WorkoutError> {
        self.exercises
            .get_mut(index)
            .ok_or(WorkoutError::ExerciseOutOfRange(index))
    }

    /// Append an empty exercise, returning its position
    pub fn add_exercise(&mut self) -> usize {
        self.exercises.push(Exercise::default());
        self.exercises.len() - 1
    }

    /// Remove the exercise at `index`. The list is allowed to become empty.
    pub fn remove_exercise(&mut self, index: usize) -> Result<Exercise, WorkoutError> {
        if index >= self.exercises.len() {
            return Err(WorkoutError::ExerciseOutOfRange(index));
        }
        Ok(self.exercises.remove(index))
    }

    /// Append an empty set, returning the new set count
    pub fn add_set(&mut self, exercise: usize) -> Result<usize, WorkoutError> {
        let ex = self.exercise_mut(exercise)?;
        ex.sets.push(SetEntry::default());
        Ok(ex.sets.len())
    }

    /// Drop the last set unless it is the only one. Returns whether a set was removed.
    pub fn remove_set(&mut self, exercise: usize) -> Result<bool, WorkoutError> {
        let ex = self.exercise_mut(exercise)?;
        if ex.sets.len() > 1 {
            ex.sets.pop();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn set_exercise_name(&mut self, exercise: usize, text: impl Into<String>) -> Result<(), WorkoutError> {
        self.exercise_mut(exercise)?.name = text.into();
        Ok(())
    }

    pub fn set_weight(&mut self, exercise: usize, set: usize, text: impl Into<String>) -> Result<(), WorkoutError> {
        self.exercise_mut(exercise)?.set_mut(exercise, set)?.weight = text.into();
        Ok(())
    }

    pub fn set_reps(&mut self, exercise: usize, set: usize, text: impl Into<String>) -> Result<(), WorkoutError> {
        self.exercise_mut(exercise)?.set_mut(exercise, set)?.reps = text.into();
        Ok(())
    }

    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }
}
