// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Fretboard scale visualizer and note-placement trainer.
//!
//! The crate models pitch classes and scale degrees with contextual
//! enharmonic spelling, derives scales from named degree patterns, maps
//! fretboard positions to pitches under a tuning, and grades exercise
//! answers by comparing sparse fretboard maps.

pub mod config;
pub mod error;
pub mod exercise;
pub mod fretboard;
pub mod music;

pub use error::{Result, TheoryError};
