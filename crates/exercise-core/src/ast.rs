// SPDX-License-Identifier: AGPL-3.0-or-later
//! Exercise document tree
//!
//! A document is an ordered list of exercises. Each exercise holds a question
//! and a solution, which in turn hold paragraphs and code blocks made of text.
//! The tree is free to drift out of that shape while it is being edited; the
//! [`crate::normalize`] pass brings it back.

use crate::selection::{Point, Selection};
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_segmentation::UnicodeSegmentation;

/// Placeholder text of a synthesized question
pub const DEFAULT_QUESTION_TEXT: &str = "Question text?";

/// Placeholder text of a synthesized solution
pub const DEFAULT_SOLUTION_TEXT: &str = "Solution text";

/// Kind tag of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Exercise,
    Question,
    Solution,
    Paragraph,
    CodeBlock,
    Text,
}

impl NodeKind {
    /// Name used in serialized documents and `data-type` attributes
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Exercise => "exercise",
            Self::Question => "question",
            Self::Solution => "solution",
            Self::Paragraph => "paragraph",
            Self::CodeBlock => "code-block",
            Self::Text => "text",
        }
    }

    /// Look a kind up by its label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }

    /// Question and solution: the two slots of an exercise
    pub const fn is_slot(&self) -> bool {
        matches!(self, Self::Question | Self::Solution)
    }

    /// Paragraph and code block: the containers of text
    pub const fn is_block(&self) -> bool {
        matches!(self, Self::Paragraph | Self::CodeBlock)
    }

    pub const ALL: [Self; 6] = [
        Self::Exercise,
        Self::Question,
        Self::Solution,
        Self::Paragraph,
        Self::CodeBlock,
        Self::Text,
    ];
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A node of the document tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Node {
    Exercise { children: Vec<Node> },
    Question { children: Vec<Node> },
    Solution { children: Vec<Node> },
    Paragraph { children: Vec<Node> },
    CodeBlock { children: Vec<Node> },
    /// Text leaf
    Text { text: String },
}

impl Node {
    /// Build an element of the given kind.
    ///
    /// A [`NodeKind::Text`] kind yields a text leaf holding the concatenated
    /// text of `children`.
    pub fn element(kind: NodeKind, children: Vec<Node>) -> Self {
        match kind {
            NodeKind::Exercise => Node::Exercise { children },
            NodeKind::Question => Node::Question { children },
            NodeKind::Solution => Node::Solution { children },
            NodeKind::Paragraph => Node::Paragraph { children },
            NodeKind::CodeBlock => Node::CodeBlock { children },
            NodeKind::Text => Node::Text {
                text: children.iter().map(Node::plain_text).collect(),
            },
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    /// Paragraph holding a single text leaf
    pub fn paragraph(text: impl Into<String>) -> Self {
        Node::Paragraph {
            children: vec![Node::text(text)],
        }
    }

    /// Code block holding a single text leaf
    pub fn code_block(text: impl Into<String>) -> Self {
        Node::CodeBlock {
            children: vec![Node::text(text)],
        }
    }

    pub fn question(children: Vec<Node>) -> Self {
        Node::Question { children }
    }

    pub fn solution(children: Vec<Node>) -> Self {
        Node::Solution { children }
    }

    pub fn exercise(question: Node, solution: Node) -> Self {
        Node::Exercise {
            children: vec![question, solution],
        }
    }

    /// `question{paragraph:[text]}`
    pub fn default_question(text: &str) -> Self {
        Node::question(vec![Node::paragraph(text)])
    }

    /// `solution{paragraph:[text]}`
    pub fn default_solution(text: &str) -> Self {
        Node::solution(vec![Node::paragraph(text)])
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Exercise { .. } => NodeKind::Exercise,
            Node::Question { .. } => NodeKind::Question,
            Node::Solution { .. } => NodeKind::Solution,
            Node::Paragraph { .. } => NodeKind::Paragraph,
            Node::CodeBlock { .. } => NodeKind::CodeBlock,
            Node::Text { .. } => NodeKind::Text,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text { .. })
    }

    /// Children of an element, empty for a text leaf
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Exercise { children }
            | Node::Question { children }
            | Node::Solution { children }
            | Node::Paragraph { children }
            | Node::CodeBlock { children } => children,
            Node::Text { .. } => &[],
        }
    }

    /// Mutable children of an element, `None` for a text leaf
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Exercise { children }
            | Node::Question { children }
            | Node::Solution { children }
            | Node::Paragraph { children }
            | Node::CodeBlock { children } => Some(children),
            Node::Text { .. } => None,
        }
    }

    /// Take the children out of an element, leaving it empty
    pub fn into_children(self) -> Vec<Node> {
        match self {
            Node::Exercise { children }
            | Node::Question { children }
            | Node::Solution { children }
            | Node::Paragraph { children }
            | Node::CodeBlock { children } => children,
            Node::Text { .. } => Vec::new(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Concatenated text of all leaves below this node
    pub fn plain_text(&self) -> String {
        match self {
            Node::Text { text } => text.clone(),
            _ => self.children().iter().map(Node::plain_text).collect(),
        }
    }

    /// Child at a relative path
    pub fn descendant(&self, path: &[usize]) -> Option<&Node> {
        match path.split_first() {
            None => Some(self),
            Some((&index, rest)) => self.children().get(index)?.descendant(rest),
        }
    }

    pub fn descendant_mut(&mut self, path: &[usize]) -> Option<&mut Node> {
        match path.split_first() {
            None => Some(self),
            Some((&index, rest)) => self.children_mut()?.get_mut(index)?.descendant_mut(rest),
        }
    }

    /// Relative path of the first text leaf, depth first
    pub fn first_text_path(&self) -> Option<Vec<usize>> {
        if self.is_text() {
            return Some(Vec::new());
        }
        self.children().iter().enumerate().find_map(|(i, child)| {
            child.first_text_path().map(|mut rest| {
                rest.insert(0, i);
                rest
            })
        })
    }

    /// Relative path of the last text leaf, depth first
    pub fn last_text_path(&self) -> Option<Vec<usize>> {
        if self.is_text() {
            return Some(Vec::new());
        }
        self.children().iter().enumerate().rev().find_map(|(i, child)| {
            child.last_text_path().map(|mut rest| {
                rest.insert(0, i);
                rest
            })
        })
    }

    /// `[question, solution]` exactly
    pub fn is_canonical_exercise(&self) -> bool {
        matches!(
            self.children(),
            [Node::Question { .. }, Node::Solution { .. }]
        ) && self.kind() == NodeKind::Exercise
    }

    /// Count words in this node
    pub fn word_count(&self) -> usize {
        match self {
            Node::Text { text } => text.split_whitespace().count(),
            _ => self.children().iter().map(|c| c.word_count()).sum(),
        }
    }

    /// Count grapheme clusters in this node
    pub fn char_count(&self) -> usize {
        match self {
            Node::Text { text } => text.graphemes(true).count(),
            _ => self.children().iter().map(|c| c.char_count()).sum(),
        }
    }

    fn write_outline(&self, output: &mut String, indent: &str, depth: usize) {
        output.push_str(&indent.repeat(depth));
        output.push_str("type: ");
        output.push_str(self.kind().label());
        if let Node::Text { text } = self {
            output.push_str(": ");
            output.push_str(text);
        }
        output.push('\n');
        for child in self.children() {
            child.write_outline(output, indent, depth + 1);
        }
    }
}

/// The document root
///
/// Owns the tree and the editing selection. Only the children are
/// serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub children: Vec<Node>,
    #[serde(skip)]
    pub selection: Option<Selection>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(children: Vec<Node>) -> Self {
        Self {
            children,
            selection: None,
        }
    }

    /// Node at an absolute path; the empty path has no node
    pub fn node(&self, path: &[usize]) -> Option<&Node> {
        let (&first, rest) = path.split_first()?;
        self.children.get(first)?.descendant(rest)
    }

    pub fn node_mut(&mut self, path: &[usize]) -> Option<&mut Node> {
        let (&first, rest) = path.split_first()?;
        self.children.get_mut(first)?.descendant_mut(rest)
    }

    /// Child list of the node at `path`; the empty path is the root list
    pub fn children_at_mut(&mut self, path: &[usize]) -> Option<&mut Vec<Node>> {
        if path.is_empty() {
            return Some(&mut self.children);
        }
        self.node_mut(path)?.children_mut()
    }

    /// Every exercise is `[question, solution]`
    pub fn is_canonical(&self) -> bool {
        self.children.iter().all(Node::is_canonical_exercise)
    }

    /// Start of the first text leaf at or below `path`
    pub fn start_of(&self, path: &[usize]) -> Option<Point> {
        let node = self.node(path)?;
        let mut full = path.to_vec();
        full.extend(node.first_text_path()?);
        Some(Point::new(full, 0))
    }

    /// End of the last text leaf at or below `path`
    pub fn end_of(&self, path: &[usize]) -> Option<Point> {
        let node = self.node(path)?;
        let mut full = path.to_vec();
        full.extend(node.last_text_path()?);
        let offset = self.node(&full)?.char_count();
        Some(Point::new(full, offset))
    }

    /// Start of the first text leaf in the document
    pub fn start(&self) -> Option<Point> {
        (0..self.children.len()).find_map(|i| self.start_of(&[i]))
    }

    /// Whether `point` addresses a text leaf and an offset inside it
    pub fn is_valid_point(&self, point: &Point) -> bool {
        match self.node(&point.path) {
            Some(node @ Node::Text { .. }) => point.offset <= node.char_count(),
            _ => false,
        }
    }

    pub fn plain_text(&self) -> String {
        self.children
            .iter()
            .map(Node::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Count words in the document
    pub fn word_count(&self) -> usize {
        self.children.iter().map(|n| n.word_count()).sum()
    }

    /// Count characters in the document
    pub fn char_count(&self) -> usize {
        self.children.iter().map(|n| n.char_count()).sum()
    }

    /// Indented `type: <kind>` listing of the tree, text leaves followed by
    /// their payload
    pub fn outline(&self) -> String {
        self.outline_with("    ")
    }

    /// [`Document::outline`] with a custom indentation unit
    pub fn outline_with(&self, indent: &str) -> String {
        let mut output = String::new();
        for child in &self.children {
            child.write_outline(&mut output, indent, 0);
        }
        output
    }
}
