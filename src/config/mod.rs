// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Settings for the fretboard trainer.
//!
//! Settings are plain strings and numbers as a user would write them in a
//! YAML or TOML file. Turning them into model values (scale, tuning, fret
//! window) happens on demand and reports model errors with file context.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::exercise::{ExerciseContext, ExerciseKind};
use crate::fretboard::{FretWindow, LabelMode, Tuning};
use crate::music::{PatternRegistry, PitchClass, Scale, ScalePattern};

/// Root settings file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Open-string spellings, first string first
    #[serde(default = "default_tuning")]
    pub tuning: Vec<String>,
    /// Exercise to run
    #[serde(default)]
    pub exercise: ExerciseKind,
    /// Scale to display and drill
    #[serde(default)]
    pub scale: ScaleSettings,
    /// Visible part of the fretboard
    #[serde(default)]
    pub fretboard: FretboardSettings,
    /// Extra degree patterns by name
    #[serde(default)]
    pub patterns: BTreeMap<String, Vec<String>>,
}

fn default_tuning() -> Vec<String> {
    Tuning::STANDARD.iter().map(|s| s.to_string()).collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: default_tuning(),
            exercise: ExerciseKind::default(),
            scale: ScaleSettings::default(),
            fretboard: FretboardSettings::default(),
            patterns: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML or TOML file (chosen by extension)
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {:?}", path))?;

        let settings = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&contents),
            _ => Self::from_yaml(&contents),
        }
        .with_context(|| format!("Invalid settings file: {:?}", path))?;

        info!(
            path = ?path,
            root = %settings.scale.root,
            pattern = %settings.scale.pattern,
            "loaded settings"
        );
        Ok(settings)
    }

    /// Parse settings from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML settings")
    }

    /// Parse settings from TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML settings")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize settings to YAML")
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize settings to TOML")
    }

    /// Save settings to a YAML or TOML file (chosen by extension)
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => self.to_toml()?,
            _ => self.to_yaml()?,
        };
        fs::write(path, text)
            .with_context(|| format!("Failed to write settings file: {:?}", path))
    }

    /// Built-in patterns plus the custom ones from this file
    pub fn registry(&self) -> Result<PatternRegistry> {
        let mut registry = PatternRegistry::new();
        for (name, degrees) in &self.patterns {
            let pattern = ScalePattern::from_names(name.as_str(), degrees.as_slice())
                .with_context(|| format!("Invalid custom pattern {:?}", name))?;
            registry.register(pattern);
        }
        Ok(registry)
    }

    /// The configured scale
    pub fn scale(&self) -> Result<Scale> {
        let root = PitchClass::parse(&self.scale.root)
            .with_context(|| format!("Invalid scale root {:?}", self.scale.root))?;
        self.registry()?
            .scale(root, &self.scale.pattern)
            .with_context(|| format!("Invalid scale pattern {:?}", self.scale.pattern))
    }

    /// The configured tuning
    pub fn tuning(&self) -> Result<Tuning> {
        Tuning::parse(self.tuning.as_slice()).context("Invalid tuning")
    }

    /// The configured fret window
    pub fn window(&self) -> Result<FretWindow> {
        let fb = &self.fretboard;
        FretWindow::new(fb.first_fret, fb.last_fret, fb.open_strings)
            .context("Invalid fret window")
    }

    /// Everything an exercise needs
    pub fn exercise_context(&self) -> Result<ExerciseContext> {
        Ok(ExerciseContext::new(self.scale()?, self.tuning()?, self.window()?))
    }

    /// Build every model value once so errors surface early
    pub fn validate(&self) -> Result<()> {
        let context = self.exercise_context()?;
        debug!(scale = %context.scale, strings = context.tuning.string_count(), "settings valid");
        Ok(())
    }
}

/// Scale selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScaleSettings {
    /// Root spelling (e.g., "C", "F#", "Bb")
    #[serde(default = "default_root")]
    pub root: String,
    /// Pattern name (e.g., "ionian", "minor-pentatonic")
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

fn default_root() -> String {
    "C".to_string()
}
fn default_pattern() -> String {
    "ionian".to_string()
}

impl Default for ScaleSettings {
    fn default() -> Self {
        Self {
            root: default_root(),
            pattern: default_pattern(),
        }
    }
}

/// Fretboard display settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FretboardSettings {
    /// First visible fret
    #[serde(default)]
    pub first_fret: u8,
    /// Last visible fret
    #[serde(default = "default_last_fret")]
    pub last_fret: u8,
    /// Whether open strings are visible
    #[serde(default = "default_open_strings")]
    pub open_strings: bool,
    /// Label marked positions with notes or degrees
    #[serde(default)]
    pub labels: LabelMode,
    /// Show the scale pattern behind exercise selections
    #[serde(default)]
    pub pattern: bool,
}

fn default_last_fret() -> u8 {
    12
}
fn default_open_strings() -> bool {
    true
}

impl Default for FretboardSettings {
    fn default() -> Self {
        Self {
            first_fret: 0,
            last_fret: default_last_fret(),
            open_strings: default_open_strings(),
            labels: LabelMode::default(),
            pattern: false,
        }
    }
}

/// Load and validate a settings file
pub fn validate_config<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let settings = Settings::load(path)?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_yaml_settings() {
        let yaml = r#"
scale:
  root: "A"
  pattern: "minor-pentatonic"

fretboard:
  first_fret: 5
  last_fret: 8
  open_strings: false
  labels: scale-degrees
  pattern: true

exercise: mark-degree-on-string
"#;

        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.scale.root, "A");
        assert_eq!(settings.fretboard.first_fret, 5);
        assert_eq!(settings.fretboard.labels, LabelMode::ScaleDegrees);
        assert!(settings.fretboard.pattern);
        assert_eq!(settings.exercise, ExerciseKind::MarkDegreeOnString);
        assert_eq!(settings.tuning, ["E", "B", "G", "D", "A", "E"]);

        let scale = settings.scale().unwrap();
        assert_eq!(scale.to_string(), "A minor-pentatonic");
        let window = settings.window().unwrap();
        assert!(!window.contains(0));
        assert!(window.contains(5));
    }

    #[test]
    fn test_parse_toml_settings() {
        let text = r#"
tuning = ["D", "A", "F#", "D", "A", "D"]
exercise = "mark-note"

[scale]
root = "D"
pattern = "major"

[fretboard]
last_fret = 5
"#;

        let settings = Settings::from_toml(text).unwrap();
        assert_eq!(settings.tuning().unwrap().open_note(2).unwrap().name(), "F#");
        assert_eq!(settings.scale().unwrap().name(), "ionian");
        assert_eq!(settings.fretboard.first_fret, 0);
        assert!(settings.fretboard.open_strings);
    }

    #[test]
    fn test_default_values() {
        let settings = Settings::from_yaml("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.scale.root, "C");
        assert_eq!(settings.scale.pattern, "ionian");
        assert_eq!(settings.fretboard.last_fret, 12);
        assert_eq!(settings.exercise, ExerciseKind::MarkNote);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_custom_patterns() {
        let yaml = r#"
scale:
  root: "E"
  pattern: "hirajoshi"
patterns:
  hirajoshi: ["1", "2", "b3", "5", "b6"]
"#;

        let settings = Settings::from_yaml(yaml).unwrap();
        let notes: Vec<String> = settings
            .scale()
            .unwrap()
            .notes()
            .iter()
            .map(|n| n.name())
            .collect();
        assert_eq!(notes, ["E", "F#", "G", "B", "C"]);
        let available = settings.registry().unwrap().available_patterns();
        assert!(available.contains(&"hirajoshi".to_string()));
    }

    #[test]
    fn test_custom_pattern_names_ignore_case_and_shadow_builtins() {
        let yaml = r#"
scale:
  root: "E"
  pattern: "Hirajoshi"
patterns:
  hirajoshi: ["1", "2", "b3", "5", "b6"]
  major: ["1", "3", "5"]
"#;

        let mut settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.scale().unwrap().name(), "hirajoshi");

        settings.scale.root = "C".to_string();
        settings.scale.pattern = "Major".to_string();
        let scale = settings.scale().unwrap();
        assert_eq!(scale.name(), "major");
        assert_eq!(scale.len(), 3);
    }

    #[test]
    fn test_invalid_model_values_are_reported() {
        let mut settings = Settings::default();
        settings.scale.root = "H".to_string();
        let err = settings.validate().unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid scale root"));

        let mut settings = Settings::default();
        settings.scale.pattern = "nonesuch".to_string();
        assert!(settings.scale().is_err());

        let mut settings = Settings::default();
        settings.fretboard.first_fret = 9;
        settings.fretboard.last_fret = 3;
        assert!(settings.window().is_err());

        let mut settings = Settings::default();
        settings.patterns.insert(
            "bad".to_string(),
            vec!["1".to_string(), "b2".to_string(), "#1".to_string()],
        );
        assert!(settings.registry().is_err());
    }

    #[test]
    fn test_round_trip_files() {
        let dir = tempdir().unwrap();
        let mut original = Settings::default();
        original.scale.root = "Bb".to_string();
        original.scale.pattern = "mixolydian".to_string();
        original.fretboard.labels = LabelMode::ScaleDegrees;
        original.exercise = ExerciseKind::MarkDegree;

        for name in ["settings.yaml", "settings.toml"] {
            let path = dir.path().join(name);
            original.save(&path).unwrap();
            let loaded = Settings::load(&path).unwrap();
            assert_eq!(loaded, original);
        }
    }

    #[test]
    fn test_validate_config() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.yaml");
        fs::write(&good, "scale:\n  root: \"G\"\n  pattern: \"dorian\"\n").unwrap();
        assert_eq!(validate_config(&good).unwrap().scale.root, "G");

        let bad = dir.path().join("bad.yaml");
        fs::write(&bad, "this is not valid yaml: [").unwrap();
        assert!(validate_config(&bad).is_err());

        assert!(validate_config(dir.path().join("missing.yaml")).is_err());
    }
}
