// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Fretboard coordinates and visible fret windows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TheoryError};

/// Highest fret on the instrument
pub const MAX_FRET: u8 = 24;

/// A (string, fret) coordinate; fret 0 is the open string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// String index, 0 = first string
    pub string: usize,
    /// Fret number, 0 = open
    pub fret: u8,
}

impl Position {
    /// Create a position
    pub fn new(string: usize, fret: u8) -> Self {
        Self { string, fret }
    }

    /// Whether this is an open-string position
    pub fn is_open(&self) -> bool {
        self.fret == 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.string, self.fret)
    }
}

/// Parses "string:fret", e.g. "0:5"
impl FromStr for Position {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TheoryError::PositionOutOfRange(format!("cannot parse position {:?}", s));
        let (string, fret) = s.trim().split_once(':').ok_or_else(invalid)?;
        let string = string.trim().parse().map_err(|_| invalid())?;
        let fret = fret.trim().parse().map_err(|_| invalid())?;
        Ok(Self { string, fret })
    }
}

/// The visible part of the fretboard.
///
/// Fretted positions are visible when inside `first_fret..=last_fret`.
/// Open strings (fret 0) are governed by `open_strings` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FretWindow {
    first_fret: u8,
    last_fret: u8,
    open_strings: bool,
}

impl FretWindow {
    /// Create a window, rejecting reversed ranges and frets past [`MAX_FRET`]
    pub fn new(first_fret: u8, last_fret: u8, open_strings: bool) -> Result<Self> {
        if last_fret > MAX_FRET {
            return Err(TheoryError::PositionOutOfRange(format!(
                "last fret {} exceeds {}",
                last_fret, MAX_FRET
            )));
        }
        if first_fret > last_fret {
            return Err(TheoryError::PositionOutOfRange(format!(
                "fret window {}..={} is reversed",
                first_fret, last_fret
            )));
        }
        Ok(Self {
            first_fret,
            last_fret,
            open_strings,
        })
    }

    /// Every fret including open strings
    pub fn full() -> Self {
        Self {
            first_fret: 0,
            last_fret: MAX_FRET,
            open_strings: true,
        }
    }

    pub fn first_fret(&self) -> u8 {
        self.first_fret
    }

    pub fn last_fret(&self) -> u8 {
        self.last_fret
    }

    pub fn open_strings(&self) -> bool {
        self.open_strings
    }

    /// Whether a fret is visible in this window
    pub fn contains(&self, fret: u8) -> bool {
        if fret == 0 {
            self.open_strings
        } else {
            (self.first_fret..=self.last_fret).contains(&fret)
        }
    }

    /// Visible frets in ascending order
    pub fn frets(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=self.last_fret).filter(move |&fret| self.contains(fret))
    }
}

impl Default for FretWindow {
    fn default() -> Self {
        Self::full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_validation() {
        assert!(FretWindow::new(5, 8, false).is_ok());
        assert!(FretWindow::new(0, 24, true).is_ok());
        assert!(matches!(
            FretWindow::new(3, 25, false),
            Err(TheoryError::PositionOutOfRange(_))
        ));
        assert!(matches!(
            FretWindow::new(9, 8, false),
            Err(TheoryError::PositionOutOfRange(_))
        ));
    }

    #[test]
    fn test_open_strings_follow_flag() {
        let closed = FretWindow::new(0, 3, false).unwrap();
        assert!(!closed.contains(0));
        assert!(closed.contains(1));
        assert!(closed.contains(3));
        assert!(!closed.contains(4));

        let open = FretWindow::new(5, 8, true).unwrap();
        assert!(open.contains(0));
        assert!(!open.contains(4));
        assert_eq!(open.frets().collect::<Vec<_>>(), [0, 5, 6, 7, 8]);
    }

    #[test]
    fn test_full_window() {
        assert_eq!(FretWindow::full().frets().count(), 25);
    }

    #[test]
    fn test_parse_position() {
        assert_eq!("2:7".parse::<Position>().unwrap(), Position::new(2, 7));
        assert_eq!(" 0 : 0 ".parse::<Position>().unwrap(), Position::new(0, 0));
        assert!("2-7".parse::<Position>().is_err());
        assert!("a:1".parse::<Position>().is_err());
        assert!(Position::new(3, 0).is_open());
    }
}
