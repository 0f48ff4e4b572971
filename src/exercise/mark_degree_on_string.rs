// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! "... where do you find the 5th on the 3rd string?"

use rand::seq::SliceRandom;
use rand::RngCore;
use tracing::debug;

use super::{Exercise, ExerciseContext, Question};
use crate::error::{Result, TheoryError};
use crate::fretboard::{string_ordinal, FretboardMap};
use crate::music::Degree;

/// Mark a degree on a single string
#[derive(Debug, Clone)]
pub struct MarkDegreeOnString {
    context: ExerciseContext,
    current_string: usize,
    current_degree: Degree,
}

impl MarkDegreeOnString {
    /// Create the exercise, starting on the first string and first degree
    pub fn new(context: ExerciseContext) -> Self {
        let current_degree = context
            .scale
            .degrees()
            .first()
            .copied()
            .unwrap_or(Degree::ROOT);
        Self {
            context,
            current_string: 0,
            current_degree,
        }
    }

    /// The string currently asked about
    pub fn current_string(&self) -> usize {
        self.current_string
    }

    /// The degree currently asked for
    pub fn current_degree(&self) -> Degree {
        self.current_degree
    }

    /// Scale degrees visible on each string, in fret order, skipping empty strings
    fn degrees_by_string(
        &self,
        pattern: &FretboardMap,
        skip: Option<usize>,
    ) -> Vec<(usize, Vec<Degree>)> {
        (0..self.context.tuning.string_count())
            .filter(|&string| Some(string) != skip)
            .filter_map(|string| {
                let degrees: Vec<Degree> = pattern
                    .positions()
                    .iter()
                    .filter(|p| p.string == string)
                    .filter_map(|p| pattern.get(p).map(|c| c.degree))
                    .collect();
                (!degrees.is_empty()).then_some((string, degrees))
            })
            .collect()
    }
}

impl Exercise for MarkDegreeOnString {
    fn name(&self) -> &'static str {
        "Mark Degree on String"
    }

    fn context(&self) -> &ExerciseContext {
        &self.context
    }

    fn next_question(&mut self, rng: &mut dyn RngCore) -> Result<Question> {
        let pattern = self.context.pattern();

        let mut candidates = self.degrees_by_string(&pattern, Some(self.current_string));
        if candidates.is_empty() {
            candidates = self.degrees_by_string(&pattern, None);
        }

        let (string, degrees) = candidates.choose(rng).ok_or_else(|| {
            TheoryError::NoQuestionAvailable(format!(
                "no string has a note of {} between frets {} and {}",
                self.context.scale,
                self.context.window.first_fret(),
                self.context.window.last_fret()
            ))
        })?;
        let degree = degrees.choose(rng).copied().unwrap_or(Degree::ROOT);

        self.current_string = *string;
        self.current_degree = degree;
        debug!(string = *string, degree = %degree, "next mark-degree-on-string question");

        Ok(Question {
            prompt: format!(
                "In the key of {}, where do you find the {} on the {} string?",
                self.context.scale.root().text(),
                degree.text(),
                string_ordinal(*string)
            ),
            degree,
            note: self.context.scale.note_from_degree(&degree),
            string: Some(*string),
        })
    }

    fn correct_answer(&self) -> FretboardMap {
        let mut correct = self.context.empty_map();
        correct.populate_from_degree(&self.current_degree, &self.context.window);
        let string = self.current_string;
        correct.filter(|position, _| position.string == string);
        correct
    }
}
