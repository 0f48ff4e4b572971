// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Question/answer loop around an exercise.
//!
//! The session owns the user's selection between questions. Submitting a
//! correct selection advances to a fresh question with an empty selection;
//! an incorrect one keeps the selection for another attempt.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use super::{Exercise, Question};
use crate::error::Result;
use crate::fretboard::{FretboardMap, Position};

/// Outcome of submitting a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Correct,
    Incorrect,
}

/// A running exercise with the user's current selection
pub struct ExerciseSession {
    exercise: Box<dyn Exercise>,
    rng: StdRng,
    question: Question,
    selection: FretboardMap,
    questions_asked: u32,
    attempts: u32,
    correct: u32,
}

impl ExerciseSession {
    /// Start a session and ask the first question
    pub fn new(mut exercise: Box<dyn Exercise>, mut rng: StdRng) -> Result<Self> {
        let question = exercise.next_question(&mut rng)?;
        let selection = exercise.context().empty_map();
        info!(exercise = exercise.name(), scale = %exercise.context().scale, "started exercise");
        debug!(prompt = %question.prompt, "asked question");

        Ok(Self {
            exercise,
            rng,
            question,
            selection,
            questions_asked: 1,
            attempts: 0,
            correct: 0,
        })
    }

    /// Start a session seeded from the OS
    pub fn from_entropy(exercise: Box<dyn Exercise>) -> Result<Self> {
        Self::new(exercise, StdRng::from_entropy())
    }

    pub fn exercise(&self) -> &dyn Exercise {
        self.exercise.as_ref()
    }

    /// The question being answered
    pub fn question(&self) -> &Question {
        &self.question
    }

    /// The user's current selection
    pub fn selection(&self) -> &FretboardMap {
        &self.selection
    }

    /// The answer the selection is graded against
    pub fn correct_answer(&self) -> FretboardMap {
        self.exercise.correct_answer()
    }

    /// Scale positions in the window, for an optional pattern overlay
    pub fn pattern(&self) -> FretboardMap {
        self.exercise.context().pattern()
    }

    /// Select or deselect a position; returns whether it is now selected
    pub fn toggle(&mut self, position: Position) -> Result<bool> {
        self.selection.toggle(position)
    }

    /// Drop the whole selection
    pub fn clear_selection(&mut self) {
        self.selection.reset();
    }

    /// Grade the selection; a correct answer moves on to the next question
    pub fn submit(&mut self) -> Result<Grade> {
        self.attempts += 1;

        if !self.exercise.validate_answer(&self.selection) {
            info!(prompt = %self.question.prompt, selected = self.selection.len(), "incorrect answer");
            return Ok(Grade::Incorrect);
        }

        self.correct += 1;
        info!(prompt = %self.question.prompt, "correct answer");
        self.advance()?;
        Ok(Grade::Correct)
    }

    /// Skip to a new question without grading
    pub fn advance(&mut self) -> Result<&Question> {
        self.question = self.exercise.next_question(&mut self.rng)?;
        self.selection = self.exercise.context().empty_map();
        self.questions_asked += 1;
        debug!(prompt = %self.question.prompt, "asked question");
        Ok(&self.question)
    }

    pub fn questions_asked(&self) -> u32 {
        self.questions_asked
    }

    /// Submissions so far
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Correct submissions so far
    pub fn correct_count(&self) -> u32 {
        self.correct
    }
}
