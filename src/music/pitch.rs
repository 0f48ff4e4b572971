// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch classes with letter + accidental spelling.
//!
//! A pitch class keeps the spelling it was created with, so `F#` and `Gb`
//! are different values that share the same semitone. Spelling a bare
//! semitone value goes through [`PitchClass::from_value`], which picks the
//! letter implied by the scale degree when a scale is supplied.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::degree::Degree;
use super::scale::Scale;
use crate::error::{Result, TheoryError};

/// Largest accidental (sharps or flats) a spelling may carry
pub const MAX_ACCIDENTAL: i8 = 2;

/// The seven natural note letters, in cycle order starting from C
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    /// All letters in cycle order
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Semitone value of the natural note
    pub fn base_value(self) -> u8 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    /// Position in the C..B cycle
    pub fn index(self) -> usize {
        self as usize
    }

    /// Letter `steps` positions further along the cycle
    pub fn offset(self, steps: usize) -> Self {
        Letter::ALL[(self.index() + steps) % Letter::ALL.len()]
    }

    /// Parse an uppercase letter
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Parse an ASCII accidental token ("", "b", "bb", "#", "##")
pub(crate) fn parse_accidental(token: &str) -> Option<i8> {
    match token {
        "" => Some(0),
        "b" => Some(-1),
        "bb" => Some(-2),
        "#" => Some(1),
        "##" => Some(2),
        _ => None,
    }
}

/// ASCII token for an accidental offset
pub(crate) fn accidental_token(accidental: i8) -> String {
    if accidental >= 0 {
        "#".repeat(accidental as usize)
    } else {
        "b".repeat(accidental.unsigned_abs() as usize)
    }
}

/// Accidental rendered with music symbols
pub(crate) fn accidental_symbol(accidental: i8) -> String {
    if accidental >= 0 {
        "\u{266F}".repeat(accidental as usize)
    } else {
        "\u{266D}".repeat(accidental.unsigned_abs() as usize)
    }
}

/// A spelled pitch class (note name without octave)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PitchClass {
    letter: Letter,
    accidental: i8,
}

impl PitchClass {
    /// Spellings used when no scale context is available (sharps preferred)
    pub const DEFAULT_SPELLINGS: [PitchClass; 12] = [
        PitchClass::natural(Letter::C),
        PitchClass::sharp(Letter::C),
        PitchClass::natural(Letter::D),
        PitchClass::sharp(Letter::D),
        PitchClass::natural(Letter::E),
        PitchClass::natural(Letter::F),
        PitchClass::sharp(Letter::F),
        PitchClass::natural(Letter::G),
        PitchClass::sharp(Letter::G),
        PitchClass::natural(Letter::A),
        PitchClass::sharp(Letter::A),
        PitchClass::natural(Letter::B),
    ];

    const fn natural(letter: Letter) -> Self {
        Self {
            letter,
            accidental: 0,
        }
    }

    const fn sharp(letter: Letter) -> Self {
        Self {
            letter,
            accidental: 1,
        }
    }

    /// Create a pitch class from a letter and accidental offset
    pub fn new(letter: Letter, accidental: i8) -> Result<Self> {
        if accidental.abs() > MAX_ACCIDENTAL {
            return Err(TheoryError::InvalidSpelling(format!(
                "{}{}",
                letter,
                accidental_token(accidental)
            )));
        }
        Ok(Self { letter, accidental })
    }

    /// Parse a spelling such as "C", "F#", "Bb" or "Ebb"
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || TheoryError::InvalidSpelling(s.to_string());

        let mut chars = s.chars();
        let letter = chars.next().and_then(Letter::from_char).ok_or_else(invalid)?;
        let accidental = parse_accidental(chars.as_str()).ok_or_else(invalid)?;

        Ok(Self { letter, accidental })
    }

    /// Spell a semitone value, using `scale` to pick the letter when given
    pub fn from_value(value: u8, scale: Option<&Scale>) -> Result<Self> {
        if value > 11 {
            return Err(TheoryError::InvalidPitchValue(value));
        }
        Ok(Self::spell(value, scale))
    }

    /// Spell a value already known to be a pitch class.
    ///
    /// With a scale the letter comes from the degree naming the interval
    /// above the root; the accidental is whichever of sharps or flats is
    /// shorter, flats winning a tie.
    pub(crate) fn spell(value: u8, scale: Option<&Scale>) -> Self {
        let value = value % 12;
        let Some(scale) = scale else {
            return Self::DEFAULT_SPELLINGS[value as usize];
        };

        let root = scale.root();
        let degree = Degree::resolve((value + 12 - root.value()) % 12, Some(scale));
        let letter = root.letter().offset(degree.natural() as usize - 1);

        let target = value as i8;
        let mut natural = letter.base_value() as i8;
        if natural > target {
            natural -= 12;
        }

        let sharps = target - natural;
        let flats = natural - target + 12;
        let accidental = if sharps < flats { sharps } else { -flats };

        if accidental.abs() > MAX_ACCIDENTAL {
            debug!(
                value,
                letter = %letter,
                accidental,
                "contextual spelling needs too many accidentals, using default"
            );
            return Self::DEFAULT_SPELLINGS[value as usize];
        }

        Self { letter, accidental }
    }

    /// The note letter
    pub fn letter(&self) -> Letter {
        self.letter
    }

    /// Accidental offset (-2 = double flat, 2 = double sharp)
    pub fn accidental(&self) -> i8 {
        self.accidental
    }

    /// Semitone value (0-11), C = 0
    pub fn value(&self) -> u8 {
        (self.letter.base_value() as i8 + self.accidental).rem_euclid(12) as u8
    }

    /// ASCII spelling, e.g. "Eb"
    pub fn name(&self) -> String {
        format!("{}{}", self.letter, accidental_token(self.accidental))
    }

    /// Spelling with music symbols, e.g. "E♭"
    pub fn text(&self) -> String {
        format!("{}{}", self.letter, accidental_symbol(self.accidental))
    }

    /// Whether both spellings name the same semitone
    pub fn is_enharmonic(&self, other: &PitchClass) -> bool {
        self.value() == other.value()
    }

    /// Ascending interval in semitones to another pitch class
    pub fn interval_to(&self, other: &PitchClass) -> u8 {
        (other.value() as i16 - self.value() as i16).rem_euclid(12) as u8
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PitchClass {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PitchClass {
    type Error = TheoryError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<PitchClass> for String {
    fn from(pitch: PitchClass) -> Self {
        pitch.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale(root: &str, pattern: &str) -> Scale {
        Scale::parse(root, pattern).unwrap()
    }

    #[test]
    fn test_letter_values() {
        assert_eq!(Letter::C.base_value(), 0);
        assert_eq!(Letter::A.base_value(), 9);
        assert_eq!(Letter::B.base_value(), 11);
        assert_eq!(Letter::A.offset(2), Letter::C);
        assert_eq!(Letter::B.offset(7), Letter::B);
    }

    #[test]
    fn test_parse_spellings() {
        assert_eq!(PitchClass::parse("C").unwrap().value(), 0);
        assert_eq!(PitchClass::parse("C#").unwrap().value(), 1);
        assert_eq!(PitchClass::parse("Db").unwrap().value(), 1);
        assert_eq!(PitchClass::parse("Cb").unwrap().value(), 11);
        assert_eq!(PitchClass::parse("Cbb").unwrap().value(), 10);
        assert_eq!(PitchClass::parse("B##").unwrap().value(), 1);
        assert_eq!(PitchClass::parse(" F# ").unwrap().name(), "F#");
    }

    #[test]
    fn test_parse_rejects_bad_spellings() {
        for bad in ["", "H", "c", "C###", "Cx", "bC", "C#b"] {
            assert_eq!(
                PitchClass::parse(bad),
                Err(TheoryError::InvalidSpelling(bad.trim().to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_spelling_is_preserved() {
        let sharp = PitchClass::parse("F#").unwrap();
        let flat = PitchClass::parse("Gb").unwrap();
        assert_ne!(sharp, flat);
        assert!(sharp.is_enharmonic(&flat));
        assert_eq!(flat.text(), "G\u{266D}");
    }

    #[test]
    fn test_default_spelling_prefers_sharps() {
        let names: Vec<String> = (0..12)
            .map(|v| PitchClass::from_value(v, None).unwrap().name())
            .collect();
        assert_eq!(
            names,
            ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"]
        );
    }

    #[test]
    fn test_from_value_rejects_out_of_range() {
        assert_eq!(
            PitchClass::from_value(12, None),
            Err(TheoryError::InvalidPitchValue(12))
        );
    }

    #[test]
    fn test_contextual_spelling_uses_flats_in_flat_keys() {
        let f_major = scale("F", "ionian");
        assert_eq!(PitchClass::from_value(10, Some(&f_major)).unwrap().name(), "Bb");

        let c_minor = scale("C", "minor-pentatonic");
        assert_eq!(PitchClass::from_value(3, Some(&c_minor)).unwrap().name(), "Eb");
        assert_eq!(PitchClass::from_value(10, Some(&c_minor)).unwrap().name(), "Bb");
    }

    #[test]
    fn test_contextual_spelling_of_tritone() {
        let lydian = scale("C", "lydian");
        assert_eq!(PitchClass::from_value(6, Some(&lydian)).unwrap().name(), "F#");

        let ionian = scale("C", "ionian");
        assert_eq!(PitchClass::from_value(6, Some(&ionian)).unwrap().name(), "Gb");
    }

    #[test]
    fn test_contextual_spelling_in_sharp_keys() {
        let e_major = scale("E", "ionian");
        let names: Vec<String> = e_major.notes().iter().map(|n| n.name()).collect();
        assert_eq!(names, ["E", "F#", "G#", "A", "B", "C#", "D#"]);

        let fs_major = scale("F#", "ionian");
        assert_eq!(fs_major.notes()[6].name(), "E#");
    }

    #[test]
    fn test_excess_accidentals_fall_back_to_default() {
        // B## lydian would need E### for its raised fourth
        let odd = scale("B##", "lydian");
        let spelled = PitchClass::from_value(7, Some(&odd)).unwrap();
        assert_eq!(spelled.value(), 7);
        assert_eq!(spelled.name(), "G");
    }

    #[test]
    fn test_spelling_round_trips_value() {
        for root in ["C", "F#", "Gb", "Bb", "E", "Cb", "A##"] {
            for pattern in ["ionian", "lydian", "locrian", "chromatic", "blues"] {
                let ctx = scale(root, pattern);
                for v in 0..12 {
                    assert_eq!(PitchClass::from_value(v, Some(&ctx)).unwrap().value(), v);
                }
            }
        }
    }

    #[test]
    fn test_interval_to() {
        let c = PitchClass::parse("C").unwrap();
        let g = PitchClass::parse("G").unwrap();
        assert_eq!(c.interval_to(&g), 7);
        assert_eq!(g.interval_to(&c), 5);
    }

    #[test]
    fn test_serde_as_string() {
        let pitch: PitchClass = serde_yaml::from_str("\"Eb\"").unwrap();
        assert_eq!(pitch.name(), "Eb");
        assert!(serde_yaml::from_str::<PitchClass>("\"Q\"").is_err());
    }
}
