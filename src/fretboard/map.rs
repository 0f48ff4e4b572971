// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Sparse fretboard maps.
//!
//! A [`FretboardMap`] marks some positions of a tuned fretboard with the
//! note sounding there and the degree it plays in the bound scale. The same
//! structure describes a scale pattern for display, the correct answer to an
//! exercise question, and the user's selection; grading compares the last
//! two with [`FretboardMap::equals`].

use std::collections::HashMap;

use tracing::debug;

use super::position::{FretWindow, Position, MAX_FRET};
use super::tuning::Tuning;
use crate::error::{Result, TheoryError};
use crate::music::{Degree, PitchClass, Scale};

/// What a caller places on a position; the map resolves the other half
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionContent {
    Note(PitchClass),
    Degree(Degree),
}

/// A resolved mark: the note sounding at a position and its degree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FretboardContent {
    pub note: PitchClass,
    pub degree: Degree,
}

/// Sparse (string, fret) -> content map over a tuned fretboard
#[derive(Debug, Clone)]
pub struct FretboardMap {
    tuning: Tuning,
    scale: Scale,
    entries: HashMap<Position, FretboardContent>,
}

impl FretboardMap {
    /// Create an empty map for a tuning, naming notes in `scale`
    pub fn new(tuning: Tuning, scale: Scale) -> Self {
        Self {
            tuning,
            scale,
            entries: HashMap::new(),
        }
    }

    /// Map of every scale position inside `window`
    pub fn for_scale(tuning: Tuning, scale: Scale, window: &FretWindow) -> Self {
        let mut map = Self::new(tuning, scale);
        map.populate_from_scale(window);
        map
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    /// Number of marked positions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Content at a position, if marked
    pub fn get(&self, position: &Position) -> Option<&FretboardContent> {
        self.entries.get(position)
    }

    pub fn contains(&self, position: &Position) -> bool {
        self.entries.contains_key(position)
    }

    /// Marked entries in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&Position, &FretboardContent)> {
        self.entries.iter()
    }

    /// Marked positions sorted by string, then fret
    pub fn positions(&self) -> Vec<Position> {
        let mut positions: Vec<Position> = self.entries.keys().copied().collect();
        positions.sort();
        positions
    }

    /// Fail unless the position exists on this instrument
    pub fn check_position(&self, position: &Position) -> Result<()> {
        if position.string >= self.tuning.string_count() || position.fret > MAX_FRET {
            return Err(TheoryError::PositionOutOfRange(format!(
                "string {}, fret {} (instrument has {} strings, {} frets)",
                position.string,
                position.fret,
                self.tuning.string_count(),
                MAX_FRET
            )));
        }
        Ok(())
    }

    /// Every position inside `window`, string by string
    pub fn positions_in_range(&self, window: &FretWindow) -> Vec<Position> {
        (0..self.tuning.string_count())
            .flat_map(move |string| window.frets().map(move |fret| Position::new(string, fret)))
            .collect()
    }

    /// Note sounding at a position, spelled in the bound scale
    pub fn note_at(&self, position: &Position) -> Result<PitchClass> {
        self.check_position(position)?;
        Ok(self.sounding_note(position))
    }

    fn sounding_note(&self, position: &Position) -> PitchClass {
        let open = self.tuning.strings()[position.string];
        PitchClass::spell((open.value() + position.fret % 12) % 12, Some(&self.scale))
    }

    /// Mark every position in `window` whose note belongs to the scale
    pub fn populate_from_scale(&mut self, window: &FretWindow) -> usize {
        let mut inserted = 0;
        for position in self.positions_in_range(window) {
            let note = self.sounding_note(&position);
            if self.scale.contains_note(&note) {
                self.insert_note(position, note);
                inserted += 1;
            }
        }
        debug!(scale = %self.scale, inserted, "populated fretboard from scale");
        inserted
    }

    /// Mark every position in `window` where `note` sounds
    pub fn populate_from_note(&mut self, note: &PitchClass, window: &FretWindow) -> usize {
        let mut inserted = 0;
        for position in self.positions_in_range(window) {
            if self.sounding_note(&position).value() == note.value() {
                self.insert_note(position, *note);
                inserted += 1;
            }
        }
        debug!(note = %note, inserted, "populated fretboard from note");
        inserted
    }

    /// Mark every position in `window` where the scale's note for `degree` sounds
    pub fn populate_from_degree(&mut self, degree: &Degree, window: &FretWindow) -> usize {
        let note = self.scale.note_from_degree(degree);
        let mut inserted = 0;
        for position in self.positions_in_range(window) {
            if self.sounding_note(&position).value() == note.value() {
                self.entries.insert(
                    position,
                    FretboardContent {
                        note,
                        degree: *degree,
                    },
                );
                inserted += 1;
            }
        }
        debug!(degree = %degree, note = %note, inserted, "populated fretboard from degree");
        inserted
    }

    fn insert_note(&mut self, position: Position, note: PitchClass) {
        let degree = self.scale.degree_from_note(&note);
        self.entries.insert(position, FretboardContent { note, degree });
    }

    /// Mark a position, replacing any previous mark.
    ///
    /// The resolved note must be the one sounding at the position.
    pub fn set(&mut self, position: Position, content: PositionContent) -> Result<()> {
        self.check_position(&position)?;

        let resolved = match content {
            PositionContent::Note(note) => FretboardContent {
                note,
                degree: self.scale.degree_from_note(&note),
            },
            PositionContent::Degree(degree) => FretboardContent {
                note: self.scale.note_from_degree(&degree),
                degree,
            },
        };

        if resolved.note.value() != self.sounding_note(&position).value() {
            return Err(TheoryError::PitchMismatch {
                string: position.string,
                fret: position.fret,
                note: resolved.note.name(),
            });
        }

        self.entries.insert(position, resolved);
        Ok(())
    }

    /// Unmark a position; unmarked positions are left alone
    pub fn clear(&mut self, position: &Position) -> Result<()> {
        self.check_position(position)?;
        self.entries.remove(position);
        Ok(())
    }

    /// Mark the sounding note if unmarked, otherwise unmark.
    /// Returns whether the position is marked afterwards.
    pub fn toggle(&mut self, position: Position) -> Result<bool> {
        if self.contains(&position) {
            self.clear(&position)?;
            return Ok(false);
        }
        let note = self.note_at(&position)?;
        self.insert_note(position, note);
        Ok(true)
    }

    /// Remove every mark
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Keep only entries matching the predicate
    pub fn filter<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Position, &FretboardContent) -> bool,
    {
        self.entries.retain(|position, content| keep(position, content));
    }

    /// Drop entries outside the visible window
    pub fn clip(&mut self, window: &FretWindow) {
        self.entries.retain(|position, _| window.contains(position.fret));
    }

    /// Same marked positions with the same note value at each.
    ///
    /// Degree names and note spellings are ignored.
    pub fn equals(&self, other: &FretboardMap) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().all(|(position, content)| {
                other
                    .entries
                    .get(position)
                    .is_some_and(|theirs| theirs.note.value() == content.note.value())
            })
    }
}

impl PartialEq for FretboardMap {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for FretboardMap {}
