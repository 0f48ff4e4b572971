// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! "In the key of R, where do you find the ♭3rd?"

use rand::seq::SliceRandom;
use rand::RngCore;
use tracing::debug;

use super::{Exercise, ExerciseContext, Question};
use crate::error::{Result, TheoryError};
use crate::fretboard::FretboardMap;
use crate::music::Degree;

/// Mark every visible position of a scale degree
#[derive(Debug, Clone)]
pub struct MarkDegree {
    context: ExerciseContext,
    current: Degree,
}

impl MarkDegree {
    /// Create the exercise, starting on the first degree of the pattern
    pub fn new(context: ExerciseContext) -> Self {
        let current = context
            .scale
            .degrees()
            .first()
            .copied()
            .unwrap_or(Degree::ROOT);
        Self { context, current }
    }

    /// The degree currently asked for
    pub fn current(&self) -> Degree {
        self.current
    }
}

impl Exercise for MarkDegree {
    fn name(&self) -> &'static str {
        "Mark Degree"
    }

    fn context(&self) -> &ExerciseContext {
        &self.context
    }

    fn next_question(&mut self, rng: &mut dyn RngCore) -> Result<Question> {
        let degrees = self.context.scale.degrees();
        let fresh: Vec<Degree> = degrees
            .iter()
            .filter(|d| d.value() != self.current.value())
            .copied()
            .collect();
        let pool = if fresh.is_empty() { degrees } else { &fresh[..] };

        self.current = *pool.choose(rng).ok_or_else(|| {
            TheoryError::NoQuestionAvailable(format!("{} has no degrees", self.context.scale))
        })?;
        debug!(degree = %self.current, "next mark-degree question");

        Ok(Question {
            prompt: format!(
                "In the key of {}, where do you find the {}?",
                self.context.scale.root().text(),
                self.current.text()
            ),
            degree: self.current,
            note: self.context.scale.note_from_degree(&self.current),
            string: None,
        })
    }

    fn correct_answer(&self) -> FretboardMap {
        let mut correct = self.context.empty_map();
        correct.populate_from_degree(&self.current, &self.context.window);
        correct
    }
}
