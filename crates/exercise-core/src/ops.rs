// SPDX-License-Identifier: AGPL-3.0-or-later
//! Primitive document operations
//!
//! Every edit reaching the document is one of these. They are deliberately
//! shape-agnostic: an operation may leave an exercise half-built, and the
//! normalizer that runs after it puts the shape back.
//!
//! Paths are absolute child-index paths from the document root. Text offsets
//! count grapheme clusters.

use crate::ast::{Document, Node, NodeKind};
use crate::selection::{byte_index, grapheme_len, Point};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Primitive mutations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Insert a node; the last path index may equal the sibling count
    InsertNode { path: Vec<usize>, node: Node },

    /// Remove a node and its descendants
    RemoveNode { path: Vec<usize> },

    /// Insert text into a leaf
    InsertText { at: Point, text: String },

    /// Remove `len` graphemes from a leaf, clamped to its end
    RemoveText { at: Point, len: usize },

    /// Merge a node into its previous sibling
    MergeNode { path: Vec<usize> },

    /// Split a text leaf at a grapheme offset, or an element before a child
    /// index, leaving the tail in a new next sibling
    SplitNode { path: Vec<usize>, position: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Node not found at {0:?}")]
    NodeNotFound(Vec<usize>),

    #[error("Invalid path: {0:?}")]
    InvalidPath(Vec<usize>),

    #[error("Node at {0:?} is not text")]
    NotText(Vec<usize>),

    #[error("Node at {0:?} is not an element")]
    NotAnElement(Vec<usize>),

    #[error("Offset {offset} is out of range for text of length {len}")]
    OffsetOutOfRange { offset: usize, len: usize },

    #[error("Cannot merge {from} into {into}")]
    MergeMismatch { from: NodeKind, into: NodeKind },

    #[error("No selection")]
    NoSelection,

    #[error("Render error: {0}")]
    Render(#[from] crate::traits::RenderError),
}

impl Operation {
    /// Apply the operation to a document.
    ///
    /// A failed operation leaves the document untouched.
    pub fn apply(&self, doc: &mut Document) -> Result<(), EditError> {
        match self {
            Operation::InsertNode { path, node } => Self::apply_insert(doc, path, node.clone()),
            Operation::RemoveNode { path } => Self::apply_remove(doc, path).map(|_| ()),
            Operation::InsertText { at, text } => Self::apply_insert_text(doc, at, text),
            Operation::RemoveText { at, len } => Self::apply_remove_text(doc, at, *len),
            Operation::MergeNode { path } => Self::apply_merge(doc, path),
            Operation::SplitNode { path, position } => Self::apply_split(doc, path, *position),
        }
    }

    fn apply_insert(doc: &mut Document, path: &[usize], node: Node) -> Result<(), EditError> {
        let (parent, index) = split_path(path)?;
        let siblings = siblings_mut(doc, parent)?;
        if index > siblings.len() {
            return Err(EditError::InvalidPath(path.to_vec()));
        }
        siblings.insert(index, node);
        Ok(())
    }

    fn apply_remove(doc: &mut Document, path: &[usize]) -> Result<Node, EditError> {
        let (parent, index) = split_path(path)?;
        let siblings = siblings_mut(doc, parent)?;
        if index >= siblings.len() {
            return Err(EditError::NodeNotFound(path.to_vec()));
        }
        Ok(siblings.remove(index))
    }

    fn apply_insert_text(doc: &mut Document, at: &Point, text: &str) -> Result<(), EditError> {
        let leaf = text_mut(doc, &at.path)?;
        let len = grapheme_len(leaf);
        if at.offset > len {
            return Err(EditError::OffsetOutOfRange {
                offset: at.offset,
                len,
            });
        }
        let index = byte_index(leaf, at.offset);
        leaf.insert_str(index, text);
        Ok(())
    }

    fn apply_remove_text(doc: &mut Document, at: &Point, len: usize) -> Result<(), EditError> {
        let leaf = text_mut(doc, &at.path)?;
        let total = grapheme_len(leaf);
        if at.offset > total {
            return Err(EditError::OffsetOutOfRange {
                offset: at.offset,
                len: total,
            });
        }
        let start = byte_index(leaf, at.offset);
        let end = byte_index(leaf, at.offset.saturating_add(len));
        leaf.replace_range(start..end, "");
        Ok(())
    }

    fn apply_merge(doc: &mut Document, path: &[usize]) -> Result<(), EditError> {
        let (parent, index) = split_path(path)?;
        if index == 0 {
            return Err(EditError::InvalidPath(path.to_vec()));
        }
        let siblings = siblings_mut(doc, parent)?;
        if index >= siblings.len() {
            return Err(EditError::NodeNotFound(path.to_vec()));
        }

        let (from, into) = (siblings[index].kind(), siblings[index - 1].kind());
        if from != into {
            return Err(EditError::MergeMismatch { from, into });
        }

        let node = siblings.remove(index);
        match (&mut siblings[index - 1], node) {
            (Node::Text { text: prev }, Node::Text { text }) => prev.push_str(&text),
            (prev, node) => {
                if let Some(children) = prev.children_mut() {
                    children.extend(node.into_children());
                }
            }
        }
        Ok(())
    }

    fn apply_split(doc: &mut Document, path: &[usize], position: usize) -> Result<(), EditError> {
        let (parent, index) = split_path(path)?;
        let siblings = siblings_mut(doc, parent)?;
        let node = siblings
            .get_mut(index)
            .ok_or_else(|| EditError::NodeNotFound(path.to_vec()))?;

        let tail = match node {
            Node::Text { text } => {
                let len = grapheme_len(text);
                if position > len {
                    return Err(EditError::OffsetOutOfRange { offset: position, len });
                }
                Node::text(text.split_off(byte_index(text, position)))
            }
            element => {
                let kind = element.kind();
                let children = element
                    .children_mut()
                    .ok_or_else(|| EditError::NotAnElement(path.to_vec()))?;
                if position > children.len() {
                    return Err(EditError::OffsetOutOfRange {
                        offset: position,
                        len: children.len(),
                    });
                }
                Node::element(kind, children.split_off(position))
            }
        };

        siblings.insert(index + 1, tail);
        Ok(())
    }
}

fn split_path(path: &[usize]) -> Result<(&[usize], usize), EditError> {
    match path.split_last() {
        Some((&index, parent)) => Ok((parent, index)),
        None => Err(EditError::InvalidPath(Vec::new())),
    }
}

fn siblings_mut<'a>(doc: &'a mut Document, parent: &[usize]) -> Result<&'a mut Vec<Node>, EditError> {
    if !parent.is_empty() && doc.node(parent).is_none() {
        return Err(EditError::NodeNotFound(parent.to_vec()));
    }
    doc.children_at_mut(parent)
        .ok_or_else(|| EditError::NotAnElement(parent.to_vec()))
}

fn text_mut<'a>(doc: &'a mut Document, path: &[usize]) -> Result<&'a mut String, EditError> {
    match doc.node_mut(path) {
        Some(Node::Text { text }) => Ok(text),
        Some(_) => Err(EditError::NotText(path.to_vec())),
        None => Err(EditError::NodeNotFound(path.to_vec())),
    }
}
