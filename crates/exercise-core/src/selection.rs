// SPDX-License-Identifier: AGPL-3.0-or-later
//! Cursor points and selections
//!
//! Offsets count grapheme clusters, so a cursor never lands inside a
//! combining sequence or an emoji.

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_segmentation::UnicodeSegmentation;

/// A position inside a text leaf
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Absolute path of the text leaf
    pub path: Vec<usize>,
    /// Grapheme offset into the leaf
    pub offset: usize,
}

impl Point {
    pub fn new(path: Vec<usize>, offset: usize) -> Self {
        Self { path, offset }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path: Vec<String> = self.path.iter().map(ToString::to_string).collect();
        write!(f, "{}:{}", path.join("."), self.offset)
    }
}

/// Anchor and focus of the editing selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub anchor: Point,
    pub focus: Point,
}

impl Selection {
    pub fn new(anchor: Point, focus: Point) -> Self {
        Self { anchor, focus }
    }

    /// Caret at a single point
    pub fn collapsed(point: Point) -> Self {
        Self {
            anchor: point.clone(),
            focus: point,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }
}

/// Byte index of the `offset`-th grapheme boundary, clamped to the end
pub fn byte_index(text: &str, offset: usize) -> usize {
    text.grapheme_indices(true)
        .nth(offset)
        .map_or(text.len(), |(index, _)| index)
}

/// Split `text` at a grapheme offset
pub fn split_at_grapheme(text: &str, offset: usize) -> (&str, &str) {
    text.split_at(byte_index(text, offset))
}

/// Number of grapheme clusters in `text`
pub fn grapheme_len(text: &str) -> usize {
    text.graphemes(true).count()
}
