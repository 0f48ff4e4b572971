// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! "Where do you find the note X?"

use rand::seq::SliceRandom;
use rand::RngCore;
use tracing::debug;

use super::{Exercise, ExerciseContext, Question};
use crate::error::{Result, TheoryError};
use crate::fretboard::FretboardMap;
use crate::music::PitchClass;

/// Mark every visible position of a scale note
#[derive(Debug, Clone)]
pub struct MarkNote {
    context: ExerciseContext,
    current: PitchClass,
}

impl MarkNote {
    /// Create the exercise, starting on the root
    pub fn new(context: ExerciseContext) -> Self {
        let current = context.scale.root();
        Self { context, current }
    }

    /// The note currently asked for
    pub fn current(&self) -> PitchClass {
        self.current
    }
}

impl Exercise for MarkNote {
    fn name(&self) -> &'static str {
        "Mark Note"
    }

    fn context(&self) -> &ExerciseContext {
        &self.context
    }

    fn next_question(&mut self, rng: &mut dyn RngCore) -> Result<Question> {
        let notes = self.context.scale.notes();
        let fresh: Vec<PitchClass> = notes
            .iter()
            .filter(|n| n.value() != self.current.value())
            .copied()
            .collect();
        let pool = if fresh.is_empty() { notes } else { &fresh[..] };

        self.current = *pool.choose(rng).ok_or_else(|| {
            TheoryError::NoQuestionAvailable(format!("{} has no notes", self.context.scale))
        })?;
        debug!(note = %self.current, "next mark-note question");

        Ok(Question {
            prompt: format!("Where do you find the note {}?", self.current.text()),
            degree: self.context.scale.degree_from_note(&self.current),
            note: self.current,
            string: None,
        })
    }

    fn correct_answer(&self) -> FretboardMap {
        let mut correct = self.context.empty_map();
        correct.populate_from_note(&self.current, &self.context.window);
        correct
    }
}
