// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale degrees, independent of any root.
//!
//! A degree is a natural number 1-7 plus an accidental ("b3", "#4").
//! Like pitch classes, two degrees can share a semitone value while
//! keeping different names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::pitch::{accidental_symbol, accidental_token, parse_accidental, MAX_ACCIDENTAL};
use super::scale::Scale;
use crate::error::{Result, TheoryError};

/// Semitone value of the natural degrees 1..=7
const NATURAL_VALUES: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];

/// A named scale degree such as "1", "b3" or "#4"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Degree {
    natural: u8,
    accidental: i8,
}

impl Degree {
    /// The root degree
    pub const ROOT: Degree = Degree::of(1, 0);

    /// Names used when the active scale has no degree with a given value
    pub const DEFAULT_NAMES: [Degree; 12] = [
        Degree::of(1, 0),
        Degree::of(2, -1),
        Degree::of(2, 0),
        Degree::of(3, -1),
        Degree::of(3, 0),
        Degree::of(4, 0),
        Degree::of(5, -1),
        Degree::of(5, 0),
        Degree::of(6, -1),
        Degree::of(6, 0),
        Degree::of(7, -1),
        Degree::of(7, 0),
    ];

    const fn of(natural: u8, accidental: i8) -> Self {
        Self {
            natural,
            accidental,
        }
    }

    /// Create a degree from its natural number and accidental
    pub fn new(natural: u8, accidental: i8) -> Result<Self> {
        if !(1..=7).contains(&natural) || accidental.abs() > MAX_ACCIDENTAL {
            return Err(TheoryError::InvalidDegreeName(format!(
                "{}{}",
                accidental_token(accidental),
                natural
            )));
        }
        Ok(Self::of(natural, accidental))
    }

    /// Parse a degree name such as "5", "b7" or "##4"
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || TheoryError::InvalidDegreeName(s.to_string());

        let (idx, number) = s.char_indices().last().ok_or_else(invalid)?;
        let natural = number
            .to_digit(10)
            .filter(|n| (1..=7).contains(n))
            .ok_or_else(invalid)? as u8;
        let accidental = parse_accidental(&s[..idx]).ok_or_else(invalid)?;

        Ok(Self::of(natural, accidental))
    }

    /// Name a semitone offset from the root.
    ///
    /// Prefers the scale's own degree with that value, otherwise falls back
    /// to [`Degree::DEFAULT_NAMES`].
    pub fn from_value(value: u8, scale: Option<&Scale>) -> Result<Self> {
        if value > 11 {
            return Err(TheoryError::InvalidPitchValue(value));
        }
        Ok(Self::resolve(value, scale))
    }

    pub(crate) fn resolve(value: u8, scale: Option<&Scale>) -> Self {
        let value = value % 12;
        scale
            .and_then(|s| s.degrees().iter().find(|d| d.value() == value).copied())
            .unwrap_or(Self::DEFAULT_NAMES[value as usize])
    }

    /// Natural degree number (1-7)
    pub fn natural(&self) -> u8 {
        self.natural
    }

    /// Accidental offset
    pub fn accidental(&self) -> i8 {
        self.accidental
    }

    /// The degree without its accidental
    pub fn natural_degree(&self) -> Degree {
        Self::of(self.natural, 0)
    }

    /// Semitones above the root (0-11)
    pub fn value(&self) -> u8 {
        let base = NATURAL_VALUES[(self.natural - 1) as usize] as i8;
        (base + self.accidental).rem_euclid(12) as u8
    }

    /// Whether this is the unaltered root
    pub fn is_root(&self) -> bool {
        *self == Self::ROOT
    }

    /// ASCII name, e.g. "b3"
    pub fn name(&self) -> String {
        format!("{}{}", accidental_token(self.accidental), self.natural)
    }

    /// Ordinal text for prompts: "root", "2nd", "♭3rd", "♯4th"
    pub fn text(&self) -> String {
        if self.is_root() {
            return "root".to_string();
        }
        let suffix = match self.natural {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        };
        format!("{}{}{}", accidental_symbol(self.accidental), self.natural, suffix)
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Degree {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Degree {
    type Error = TheoryError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<Degree> for String {
    fn from(degree: Degree) -> Self {
        degree.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_degree_names() {
        assert_eq!(Degree::parse("1").unwrap().value(), 0);
        assert_eq!(Degree::parse("b3").unwrap().value(), 3);
        assert_eq!(Degree::parse("#4").unwrap().value(), 6);
        assert_eq!(Degree::parse("b5").unwrap().value(), 6);
        assert_eq!(Degree::parse("bb7").unwrap().value(), 9);
        assert_eq!(Degree::parse("b1").unwrap().value(), 11);
        assert_eq!(Degree::parse("##7").unwrap().value(), 1);
    }

    #[test]
    fn test_parse_rejects_bad_names() {
        for bad in ["", "0", "8", "b", "x3", "3b", "###2", "\u{266D}3"] {
            assert_eq!(
                Degree::parse(bad),
                Err(TheoryError::InvalidDegreeName(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_new_validates() {
        assert!(Degree::new(0, 0).is_err());
        assert!(Degree::new(8, 0).is_err());
        assert!(Degree::new(3, 3).is_err());
        assert_eq!(Degree::new(3, -1).unwrap().name(), "b3");
    }

    #[test]
    fn test_default_names() {
        let names: Vec<String> = (0..12)
            .map(|v| Degree::from_value(v, None).unwrap().name())
            .collect();
        assert_eq!(
            names,
            ["1", "b2", "2", "b3", "3", "4", "b5", "5", "b6", "6", "b7", "7"]
        );
        assert!(Degree::from_value(12, None).is_err());
    }

    #[test]
    fn test_scale_names_take_precedence() {
        let lydian = Scale::parse("C", "lydian").unwrap();
        assert_eq!(Degree::from_value(6, Some(&lydian)).unwrap().name(), "#4");

        let locrian = Scale::parse("C", "locrian").unwrap();
        assert_eq!(Degree::from_value(6, Some(&locrian)).unwrap().name(), "b5");

        // Not in the pentatonic, so the default table answers
        let pentatonic = Scale::parse("C", "minor-pentatonic").unwrap();
        assert_eq!(Degree::from_value(1, Some(&pentatonic)).unwrap().name(), "b2");
    }

    #[test]
    fn test_text() {
        assert_eq!(Degree::ROOT.text(), "root");
        assert_eq!(Degree::parse("2").unwrap().text(), "2nd");
        assert_eq!(Degree::parse("b3").unwrap().text(), "\u{266D}3rd");
        assert_eq!(Degree::parse("#4").unwrap().text(), "\u{266F}4th");
        assert_eq!(Degree::parse("b1").unwrap().text(), "\u{266D}1st");
    }

    #[test]
    fn test_natural_degree() {
        let flat_seven = Degree::parse("b7").unwrap();
        assert_eq!(flat_seven.natural_degree().name(), "7");
        assert!(!flat_seven.is_root());
        assert!(Degree::parse("1").unwrap().is_root());
    }
}
