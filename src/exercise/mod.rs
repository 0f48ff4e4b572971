// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Fretboard exercises.
//!
//! Each exercise asks the user to mark every visible position of some note
//! or degree. The correct answer is itself a [`FretboardMap`], and an answer
//! is graded by map equality.

pub mod mark_degree;
pub mod mark_degree_on_string;
pub mod mark_note;
pub mod session;

pub use mark_degree::MarkDegree;
pub use mark_degree_on_string::MarkDegreeOnString;
pub use mark_note::MarkNote;
pub use session::{ExerciseSession, Grade};

use std::fmt;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fretboard::{FretWindow, FretboardMap, Tuning};
use crate::music::{Degree, PitchClass, Scale};

/// A question put to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Prompt text
    pub prompt: String,
    /// Degree being asked for
    pub degree: Degree,
    /// Note being asked for
    pub note: PitchClass,
    /// String the answer is restricted to, if any
    pub string: Option<usize>,
}

/// Scale, instrument and visible window shared by all exercises
#[derive(Debug, Clone)]
pub struct ExerciseContext {
    pub scale: Scale,
    pub tuning: Tuning,
    pub window: FretWindow,
}

impl ExerciseContext {
    /// Create a new context
    pub fn new(scale: Scale, tuning: Tuning, window: FretWindow) -> Self {
        Self {
            scale,
            tuning,
            window,
        }
    }

    /// An empty map over this instrument and scale
    pub fn empty_map(&self) -> FretboardMap {
        FretboardMap::new(self.tuning.clone(), self.scale.clone())
    }

    /// Every scale position in the window
    pub fn pattern(&self) -> FretboardMap {
        FretboardMap::for_scale(self.tuning.clone(), self.scale.clone(), &self.window)
    }
}

/// Trait for all exercise implementations
pub trait Exercise {
    /// Display name
    fn name(&self) -> &'static str;

    /// The scale, tuning and window this exercise runs in
    fn context(&self) -> &ExerciseContext;

    /// Pick the next question, avoiding an immediate repeat
    fn next_question(&mut self, rng: &mut dyn RngCore) -> Result<Question>;

    /// The map a correct answer to the current question must equal
    fn correct_answer(&self) -> FretboardMap;

    /// Grade a selection against the current question
    fn validate_answer(&self, selection: &FretboardMap) -> bool {
        selection.equals(&self.correct_answer())
    }
}

/// Exercise types selectable from settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseKind {
    #[default]
    MarkNote,
    MarkDegree,
    MarkDegreeOnString,
}

impl ExerciseKind {
    /// All exercise kinds
    pub const ALL: [ExerciseKind; 3] = [
        ExerciseKind::MarkNote,
        ExerciseKind::MarkDegree,
        ExerciseKind::MarkDegreeOnString,
    ];

    /// Create the exercise for a context
    pub fn build(self, context: ExerciseContext) -> Box<dyn Exercise> {
        match self {
            ExerciseKind::MarkNote => Box::new(MarkNote::new(context)),
            ExerciseKind::MarkDegree => Box::new(MarkDegree::new(context)),
            ExerciseKind::MarkDegreeOnString => Box::new(MarkDegreeOnString::new(context)),
        }
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            ExerciseKind::MarkNote => "Mark Note",
            ExerciseKind::MarkDegree => "Mark Degree",
            ExerciseKind::MarkDegreeOnString => "Mark Degree on String",
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
