// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Render data for fretboard views.
//!
//! Views (graphical or terminal) draw from [`cells`]: one entry per visible
//! position, carrying labels and a color key when the position is marked.
//! [`to_text`] is the terminal view used by the binary.

use serde::{Deserialize, Serialize};

use super::map::FretboardMap;
use super::position::{FretWindow, Position};

/// Which label a view shows on marked positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelMode {
    #[default]
    Notes,
    ScaleDegrees,
}

/// Labels and color for one marked position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderCell {
    /// Note spelling, e.g. "Eb"
    pub note_label: String,
    /// Degree name, e.g. "b3"
    pub degree_label: String,
    /// Degree value (0-11); the same degree gets the same color everywhere
    pub color_key: u8,
}

impl RenderCell {
    /// Label for the given mode
    pub fn label(&self, labels: LabelMode) -> &str {
        match labels {
            LabelMode::Notes => &self.note_label,
            LabelMode::ScaleDegrees => &self.degree_label,
        }
    }
}

/// A visible position and its cell, if marked
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisiblePosition {
    pub position: Position,
    pub cell: Option<RenderCell>,
}

/// Every visible position of `map`, string by string
pub fn cells(map: &FretboardMap, window: &FretWindow) -> Vec<VisiblePosition> {
    map.positions_in_range(window)
        .into_iter()
        .map(|position| VisiblePosition {
            position,
            cell: map.get(&position).map(|content| RenderCell {
                note_label: content.note.name(),
                degree_label: content.degree.name(),
                color_key: content.degree.value(),
            }),
        })
        .collect()
}

const CELL_WIDTH: usize = 4;

/// Draw the window as text, one line per string under a fret-number header
pub fn to_text(map: &FretboardMap, window: &FretWindow, labels: LabelMode) -> String {
    let mut out = format!("{:<4}", "");
    for fret in window.frets() {
        out.push_str(&format!("{:^width$} ", fret, width = CELL_WIDTH));
    }
    out.push('\n');

    let visible = cells(map, window);
    for (string, open) in map.tuning().strings().iter().enumerate() {
        out.push_str(&format!("{:<3}|", open.name()));
        for entry in visible.iter().filter(|v| v.position.string == string) {
            let label = entry.cell.as_ref().map_or("", |cell| cell.label(labels));
            out.push_str(&format!("{:-^width$}|", label, width = CELL_WIDTH));
        }
        out.push('\n');
    }

    out
}
