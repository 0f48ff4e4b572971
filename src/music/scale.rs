// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale patterns and concrete scales.
//!
//! A [`ScalePattern`] is a named, ordered list of degrees ("1", "b3", ...).
//! Binding a pattern to a root yields a [`Scale`], which spells its notes
//! from the degrees and answers note/degree conversions in its own context.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use super::degree::Degree;
use super::pitch::PitchClass;
use crate::error::{Result, TheoryError};

/// Built-in degree patterns, keyed by name
pub const BUILTIN_PATTERNS: &[(&str, &[&str])] = &[
    ("minor-pentatonic", &["1", "b3", "4", "5", "b7"]),
    ("major-pentatonic", &["1", "2", "3", "5", "6"]),
    ("minor-arpeggio", &["1", "b3", "5"]),
    ("major-arpeggio", &["1", "3", "5"]),
    ("ionian", &["1", "2", "3", "4", "5", "6", "7"]),
    ("dorian", &["1", "2", "b3", "4", "5", "6", "b7"]),
    ("phrygian", &["1", "b2", "b3", "4", "5", "b6", "b7"]),
    ("lydian", &["1", "2", "3", "#4", "5", "6", "7"]),
    ("mixolydian", &["1", "2", "3", "4", "5", "6", "b7"]),
    ("aeolian", &["1", "2", "b3", "4", "5", "b6", "b7"]),
    ("locrian", &["1", "b2", "b3", "4", "b5", "b6", "b7"]),
    ("harmonic-minor", &["1", "2", "b3", "4", "5", "b6", "7"]),
    ("melodic-minor", &["1", "2", "b3", "4", "5", "6", "7"]),
    ("blues", &["1", "b3", "4", "b5", "5", "b7"]),
    (
        "chromatic",
        &["1", "b2", "2", "b3", "3", "4", "b5", "5", "b6", "6", "b7", "7"],
    ),
];

/// Lookup key for a pattern name ("Minor Pentatonic" -> "minor-pentatonic")
fn pattern_key(name: &str) -> String {
    name.trim().to_lowercase().replace([' ', '_'], "-")
}

/// Pattern key with built-in aliases resolved
fn normalize_name(name: &str) -> String {
    let key = pattern_key(name);
    match key.as_str() {
        "major" => "ionian".to_string(),
        "minor" | "natural-minor" => "aeolian".to_string(),
        "pentatonic" | "pentatonic-minor" => "minor-pentatonic".to_string(),
        "pentatonic-major" => "major-pentatonic".to_string(),
        _ => key,
    }
}

/// A named, ordered set of scale degrees with unique values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalePattern {
    name: String,
    degrees: Vec<Degree>,
}

impl ScalePattern {
    /// Create a pattern, rejecting empty patterns and duplicate degree values
    pub fn new(name: impl Into<String>, degrees: Vec<Degree>) -> Result<Self> {
        let name = name.into();
        if degrees.is_empty() {
            return Err(TheoryError::DegenerateScalePattern {
                name,
                reason: "pattern has no degrees".to_string(),
            });
        }

        let mut seen = [None::<Degree>; 12];
        for degree in &degrees {
            if let Some(previous) = seen[degree.value() as usize] {
                return Err(TheoryError::DegenerateScalePattern {
                    name,
                    reason: format!("{} and {} share semitone {}", previous, degree, degree.value()),
                });
            }
            seen[degree.value() as usize] = Some(*degree);
        }

        Ok(Self { name, degrees })
    }

    /// Create a pattern from degree names
    pub fn from_names<S: AsRef<str>>(name: impl Into<String>, names: &[S]) -> Result<Self> {
        let degrees = names
            .iter()
            .map(|n| Degree::parse(n.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(name, degrees)
    }

    /// Look up a built-in pattern by name
    pub fn builtin(name: &str) -> Result<Self> {
        let key = normalize_name(name);
        BUILTIN_PATTERNS
            .iter()
            .find(|(n, _)| *n == key)
            .ok_or_else(|| TheoryError::UnknownScaleName(name.to_string()))
            .and_then(|(n, names)| Self::from_names(*n, *names))
    }

    /// Pattern name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Degrees in canonical order
    pub fn degrees(&self) -> &[Degree] {
        &self.degrees
    }
}

/// A pattern bound to a root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scale {
    name: String,
    root: PitchClass,
    degrees: Vec<Degree>,
    notes: Vec<PitchClass>,
}

impl Scale {
    /// Bind a pattern to a root and spell its notes
    pub fn new(root: PitchClass, pattern: &ScalePattern) -> Self {
        let mut scale = Self {
            name: pattern.name().to_string(),
            root,
            degrees: pattern.degrees().to_vec(),
            notes: Vec::new(),
        };

        let notes: Vec<PitchClass> = scale
            .degrees
            .iter()
            .map(|d| scale.note_from_degree(d))
            .collect();
        scale.notes = notes;

        debug!(scale = %scale, notes = ?scale.note_names(), "built scale");
        scale
    }

    /// Build a scale from a built-in pattern name
    pub fn named(root: PitchClass, pattern: &str) -> Result<Self> {
        Ok(Self::new(root, &ScalePattern::builtin(pattern)?))
    }

    /// Parse a scale from strings (e.g., "A", "minor-pentatonic")
    pub fn parse(root: &str, pattern: &str) -> Result<Self> {
        Self::named(PitchClass::parse(root)?, pattern)
    }

    /// Pattern name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the root note
    pub fn root(&self) -> PitchClass {
        self.root
    }

    /// Degrees in canonical order
    pub fn degrees(&self) -> &[Degree] {
        &self.degrees
    }

    /// Notes, one per degree
    pub fn notes(&self) -> &[PitchClass] {
        &self.notes
    }

    fn note_names(&self) -> Vec<String> {
        self.notes.iter().map(|n| n.name()).collect()
    }

    /// Number of degrees in this scale
    pub fn len(&self) -> usize {
        self.degrees.len()
    }

    /// Check if this scale is empty (patterns reject this on construction)
    pub fn is_empty(&self) -> bool {
        self.degrees.is_empty()
    }

    /// The note a degree lands on, spelled in this scale
    pub fn note_from_degree(&self, degree: &Degree) -> PitchClass {
        PitchClass::spell((self.root.value() + degree.value()) % 12, Some(self))
    }

    /// The degree a note plays in this scale, named in this scale
    pub fn degree_from_note(&self, note: &PitchClass) -> Degree {
        Degree::resolve((note.value() + 12 - self.root.value()) % 12, Some(self))
    }

    /// Membership by semitone value
    pub fn contains_note(&self, note: &PitchClass) -> bool {
        self.notes.iter().any(|n| n.value() == note.value())
    }

    /// Membership by semitone value
    pub fn contains_degree(&self, degree: &Degree) -> bool {
        self.degrees.iter().any(|d| d.value() == degree.value())
    }

    /// Same pattern on a different root
    pub fn with_root(&self, root: PitchClass) -> Self {
        let pattern = ScalePattern {
            name: self.name.clone(),
            degrees: self.degrees.clone(),
        };
        Self::new(root, &pattern)
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.root, self.name)
    }
}

/// Registry of custom patterns layered over the built-in table
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    custom_patterns: HashMap<String, ScalePattern>,
}

impl PatternRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom pattern, replacing any with the same lookup key.
    ///
    /// Custom names match regardless of case and `_`/space separators, and
    /// shadow built-ins and their aliases.
    pub fn register(&mut self, pattern: ScalePattern) {
        debug!(name = pattern.name(), "registered custom scale pattern");
        self.custom_patterns.insert(pattern_key(pattern.name()), pattern);
    }

    /// Get a pattern by name (checks custom first, then built-in)
    pub fn pattern(&self, name: &str) -> Result<ScalePattern> {
        if let Some(pattern) = self.custom_patterns.get(&pattern_key(name)) {
            return Ok(pattern.clone());
        }
        ScalePattern::builtin(name)
    }

    /// Build a scale from a root and pattern name
    pub fn scale(&self, root: PitchClass, name: &str) -> Result<Scale> {
        Ok(Scale::new(root, &self.pattern(name)?))
    }

    /// List all available pattern names
    pub fn available_patterns(&self) -> Vec<String> {
        let mut names: Vec<String> = self.custom_patterns.keys().cloned().collect();
        names.extend(BUILTIN_PATTERNS.iter().map(|(n, _)| n.to_string()));
        names.sort();
        names.dedup();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(notes: &[PitchClass]) -> Vec<String> {
        notes.iter().map(|n| n.name()).collect()
    }

    #[test]
    fn test_builtin_patterns_are_valid() {
        for (name, _) in BUILTIN_PATTERNS {
            let pattern = ScalePattern::builtin(name).unwrap();
            assert_eq!(pattern.name(), *name);
            assert_eq!(pattern.degrees()[0], Degree::ROOT);
        }
    }

    #[test]
    fn test_pattern_aliases() {
        assert_eq!(ScalePattern::builtin("major").unwrap().name(), "ionian");
        assert_eq!(ScalePattern::builtin("Natural Minor").unwrap().name(), "aeolian");
        assert_eq!(
            ScalePattern::builtin("minor_pentatonic").unwrap().name(),
            "minor-pentatonic"
        );
    }

    #[test]
    fn test_unknown_pattern() {
        assert_eq!(
            Scale::parse("C", "hyperlydian"),
            Err(TheoryError::UnknownScaleName("hyperlydian".to_string()))
        );
    }

    #[test]
    fn test_degenerate_patterns() {
        let duplicate = ScalePattern::from_names("broken", &["1", "#4", "b5"]);
        assert!(matches!(
            duplicate,
            Err(TheoryError::DegenerateScalePattern { ref name, .. }) if name == "broken"
        ));

        let empty = ScalePattern::new("empty", Vec::new());
        assert!(matches!(empty, Err(TheoryError::DegenerateScalePattern { .. })));
    }

    #[test]
    fn test_bad_degree_in_pattern() {
        assert_eq!(
            ScalePattern::from_names("typo", &["1", "b9"]),
            Err(TheoryError::InvalidDegreeName("b9".to_string()))
        );
    }

    #[test]
    fn test_c_minor_pentatonic() {
        let scale = Scale::parse("C", "minor-pentatonic").unwrap();
        let degrees: Vec<String> = scale.degrees().iter().map(|d| d.name()).collect();
        assert_eq!(degrees, ["1", "b3", "4", "5", "b7"]);
        assert_eq!(names(scale.notes()), ["C", "Eb", "F", "G", "Bb"]);
        assert_eq!(scale.len(), scale.notes().len());
    }

    #[test]
    fn test_modes_spell_seven_letters() {
        let d_dorian = Scale::parse("D", "dorian").unwrap();
        assert_eq!(names(d_dorian.notes()), ["D", "E", "F", "G", "A", "B", "C"]);

        let bb_ionian = Scale::parse("Bb", "ionian").unwrap();
        assert_eq!(names(bb_ionian.notes()), ["Bb", "C", "D", "Eb", "F", "G", "A"]);

        let a_harmonic = Scale::parse("A", "harmonic-minor").unwrap();
        assert_eq!(names(a_harmonic.notes()), ["A", "B", "C", "D", "E", "F", "G#"]);
    }

    #[test]
    fn test_note_degree_round_trip_keeps_names() {
        for (pattern, _) in BUILTIN_PATTERNS {
            for root in ["C", "G", "F#", "Db", "Ab", "B"] {
                let scale = Scale::parse(root, pattern).unwrap();
                for degree in scale.degrees() {
                    let note = scale.note_from_degree(degree);
                    assert_eq!(&scale.degree_from_note(&note), degree, "{scale} {degree}");
                }
            }
        }
    }

    #[test]
    fn test_degree_from_note_outside_scale() {
        let scale = Scale::parse("A", "minor-pentatonic").unwrap();
        let b = PitchClass::parse("B").unwrap();
        assert_eq!(scale.degree_from_note(&b).name(), "2");
        let ab = PitchClass::parse("Ab").unwrap();
        assert_eq!(scale.degree_from_note(&ab).name(), "7");
    }

    #[test]
    fn test_contains_by_value() {
        let scale = Scale::parse("C", "minor-pentatonic").unwrap();
        assert!(scale.contains_note(&PitchClass::parse("D#").unwrap()));
        assert!(scale.contains_note(&PitchClass::parse("Eb").unwrap()));
        assert!(!scale.contains_note(&PitchClass::parse("E").unwrap()));
        assert!(scale.contains_degree(&Degree::parse("#2").unwrap()));
        assert!(!scale.contains_degree(&Degree::parse("3").unwrap()));
    }

    #[test]
    fn test_with_root() {
        let c = Scale::parse("C", "lydian").unwrap();
        let g = c.with_root(PitchClass::parse("G").unwrap());
        assert_eq!(g.name(), "lydian");
        assert_eq!(names(g.notes()), ["G", "A", "B", "C#", "D", "E", "F#"]);
    }

    #[test]
    fn test_pattern_registry() {
        let mut registry = PatternRegistry::new();
        registry.register(
            ScalePattern::from_names("hirajoshi", &["1", "2", "b3", "5", "b6"]).unwrap(),
        );

        let custom = registry
            .scale(PitchClass::parse("A").unwrap(), "hirajoshi")
            .unwrap();
        assert_eq!(names(custom.notes()), ["A", "B", "C", "E", "F"]);

        let builtin = registry.scale(PitchClass::parse("C").unwrap(), "ionian");
        assert!(builtin.is_ok());

        let spelled = registry.scale(PitchClass::parse("A").unwrap(), "Hirajoshi");
        assert_eq!(spelled.unwrap().notes(), custom.notes());

        let available = registry.available_patterns();
        assert!(available.contains(&"hirajoshi".to_string()));
        assert!(available.contains(&"chromatic".to_string()));
    }

    #[test]
    fn test_display() {
        let scale = Scale::parse("Eb", "dorian").unwrap();
        assert_eq!(scale.to_string(), "Eb dorian");
    }

    #[test]
    fn test_custom_pattern_shadows_builtin_alias() {
        let mut registry = PatternRegistry::new();
        registry.register(ScalePattern::from_names("major", &["1", "3", "5"]).unwrap());

        let root = PitchClass::parse("C").unwrap();
        let shadowed = registry.scale(root, "Major").unwrap();
        assert_eq!(shadowed.name(), "major");
        assert_eq!(names(shadowed.notes()), ["C", "E", "G"]);

        // Other aliases of ionian still reach the built-in
        assert_eq!(registry.scale(root, "ionian").unwrap().len(), 7);
    }
}
