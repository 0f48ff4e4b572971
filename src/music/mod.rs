// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory model for the fretboard trainer.
//!
//! This module provides spelled pitch classes, root-independent scale
//! degrees, and scales built from named degree patterns.

pub mod degree;
pub mod pitch;
pub mod scale;

pub use degree::Degree;
pub use pitch::{Letter, PitchClass};
pub use scale::{PatternRegistry, Scale, ScalePattern, BUILTIN_PATTERNS};
