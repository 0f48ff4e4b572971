// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Open-string tunings.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TheoryError};
use crate::music::PitchClass;

/// Open-string pitch per string index (index 0 is the first string)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PitchClass>", into = "Vec<PitchClass>")]
pub struct Tuning {
    strings: Vec<PitchClass>,
}

impl Tuning {
    /// Spellings of standard six-string guitar tuning, first string first
    pub const STANDARD: [&'static str; 6] = ["E", "B", "G", "D", "A", "E"];

    /// Create a tuning from open-string pitches
    pub fn new(strings: Vec<PitchClass>) -> Result<Self> {
        if strings.is_empty() {
            return Err(TheoryError::InvalidTuning("no strings".to_string()));
        }
        Ok(Self { strings })
    }

    /// Parse a tuning from spellings
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let strings = names
            .iter()
            .map(|n| PitchClass::parse(n.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(strings)
    }

    /// Standard guitar tuning (E B G D A E)
    pub fn standard() -> Self {
        Self {
            strings: Self::STANDARD
                .iter()
                .filter_map(|n| PitchClass::parse(n).ok())
                .collect(),
        }
    }

    /// Number of strings
    pub fn string_count(&self) -> usize {
        self.strings.len()
    }

    /// Open pitch of a string, if it exists
    pub fn open_note(&self, string: usize) -> Option<PitchClass> {
        self.strings.get(string).copied()
    }

    /// Open pitches, first string first
    pub fn strings(&self) -> &[PitchClass] {
        &self.strings
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<PitchClass>> for Tuning {
    type Error = TheoryError;

    fn try_from(strings: Vec<PitchClass>) -> Result<Self> {
        Self::new(strings)
    }
}

impl From<Tuning> for Vec<PitchClass> {
    fn from(tuning: Tuning) -> Self {
        tuning.strings
    }
}

/// Human ordinal for a zero-based string index ("1st", "2nd", ...)
pub fn string_ordinal(string: usize) -> String {
    let n = string + 1;
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}
