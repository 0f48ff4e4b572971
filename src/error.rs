// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error type shared by the pitch model and the fretboard engine.

use thiserror::Error;

/// Validation failures raised while building model values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TheoryError {
    #[error("Invalid pitch value {0}: expected 0-11")]
    InvalidPitchValue(u8),

    #[error("Invalid note spelling: {0:?}")]
    InvalidSpelling(String),

    #[error("Invalid scale degree name: {0:?}")]
    InvalidDegreeName(String),

    #[error("Unknown scale pattern: {0:?}")]
    UnknownScaleName(String),

    #[error("Scale pattern {name:?} is degenerate: {reason}")]
    DegenerateScalePattern { name: String, reason: String },

    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("Position out of range: {0}")]
    PositionOutOfRange(String),

    #[error("{note} does not sound at string {string}, fret {fret}")]
    PitchMismatch { string: usize, fret: u8, note: String },

    #[error("No question available: {0}")]
    NoQuestionAvailable(String),
}

/// Result alias for model operations
pub type Result<T> = std::result::Result<T, TheoryError>;
