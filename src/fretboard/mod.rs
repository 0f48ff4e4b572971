// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Fretboard position engine.
//!
//! Maps (string, fret) coordinates to pitches under a tuning, keeps sparse
//! maps of marked positions, and turns them into render data.

pub mod map;
pub mod position;
pub mod render;
pub mod tuning;

pub use map::{FretboardContent, FretboardMap, PositionContent};
pub use position::{FretWindow, Position, MAX_FRET};
pub use render::{LabelMode, RenderCell, VisiblePosition};
pub use tuning::{string_ordinal, Tuning};
