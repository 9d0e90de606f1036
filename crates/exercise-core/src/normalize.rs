// SPDX-License-Identifier: AGPL-3.0-or-later
//! Shape normalization
//!
//! Runs after every committed mutation and restores the exercise shape:
//!
//! 1. Top-level pass, ascending index: every root child must be an exercise
//!    holding `[question, solution]`. Broken exercises are rebuilt in place,
//!    stray nodes are wrapped, removed or kept according to policy.
//! 2. Fallback pass: questions and solutions hold blocks, blocks hold text,
//!    and no container is left empty.
//! 3. The selection is re-validated against the repaired tree.
//!
//! A pass over a canonical document changes nothing and reports nothing, and
//! a second pass after any first pass is always a no-op.

use crate::ast::{Document, Node, NodeKind, DEFAULT_QUESTION_TEXT, DEFAULT_SOLUTION_TEXT};
use crate::selection::{Point, Selection};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, Level};

/// How an exercise with more than two children is repaired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtraChildrenPolicy {
    /// First question stays the question, everything else becomes the
    /// solution's content
    #[default]
    MergeIntoSolution,
    /// First question and first other child are kept, the rest dropped
    Truncate,
    /// Leave the exercise as it is
    Keep,
}

/// What happens to a root child that is not an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrayNodePolicy {
    /// Wrap each run of consecutive stray nodes into one exercise
    #[default]
    Wrap,
    /// Drop the node
    Remove,
    /// Leave the node in place
    Keep,
}

/// Configuration for normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    pub extra_children: ExtraChildrenPolicy,
    pub stray_nodes: StrayNodePolicy,
    /// Rebuild two-child exercises that are not `[question, solution]`
    pub repair_misordered_pairs: bool,
    pub default_question_text: String,
    pub default_solution_text: String,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            extra_children: ExtraChildrenPolicy::default(),
            stray_nodes: StrayNodePolicy::default(),
            repair_misordered_pairs: false,
            default_question_text: DEFAULT_QUESTION_TEXT.to_string(),
            default_solution_text: DEFAULT_SOLUTION_TEXT.to_string(),
        }
    }
}

/// Why an exercise was rebuilt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeViolation {
    Empty,
    MissingQuestion,
    MissingSolution,
    ExtraChildren(usize),
    Misordered,
}

/// Lower-level repair made by the fallback pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackFix {
    /// An empty container received an empty paragraph or text leaf
    FilledEmpty,
    /// Loose text inside a question or solution was wrapped in a paragraph
    WrappedText,
    /// Nested containers inside a question or solution were replaced by
    /// their blocks
    LiftedBlocks,
    /// Elements inside a paragraph or code block were replaced by their text
    FlattenedInline,
}

/// One structural change made by a pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "repair", rename_all = "kebab-case")]
pub enum Repair {
    ExerciseRebuilt { index: usize, violation: ShapeViolation },
    StrayWrapped { index: usize, count: usize },
    StrayRemoved { index: usize, kind: NodeKind },
    Fallback { path: Vec<usize>, fix: FallbackFix },
}

/// Everything a pass changed, in the order it changed it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeReport {
    pub repairs: Vec<Repair>,
}

impl NormalizeReport {
    /// Nothing was changed
    pub fn is_clean(&self) -> bool {
        self.repairs.is_empty()
    }

    /// Append another report's repairs
    pub fn extend(&mut self, other: NormalizeReport) {
        self.repairs.extend(other.repairs);
    }

    fn push(&mut self, repair: Repair) {
        self.repairs.push(repair);
    }
}

/// Shape normalizer
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizeConfig,
}

impl Normalizer {
    pub fn new(config: NormalizeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizeConfig {
        &self.config
    }

    /// Repair `doc` in place
    pub fn normalize(&self, doc: &mut Document) -> NormalizeReport {
        if tracing::enabled!(Level::TRACE) {
            trace!(exercises = doc.children.len(), outline = %doc.outline(), "normalizing");
        }

        let mut report = NormalizeReport::default();
        let replaced = self.normalize_root(doc, &mut report);
        for (i, child) in doc.children.iter_mut().enumerate() {
            self.fix_node(child, &mut vec![i], &mut report);
        }
        // The caret goes into the last replacement once its subtree is final
        if let Some(&index) = replaced.last() {
            select_start(doc, index);
        }
        revalidate_selection(doc);

        if !report.is_clean() {
            debug!(repairs = report.repairs.len(), "document normalized");
        }
        report
    }

    /// Top-level pass; returns the indices of replaced exercises, ascending
    fn normalize_root(&self, doc: &mut Document, report: &mut NormalizeReport) -> Vec<usize> {
        let mut replaced = Vec::new();
        let mut i = 0;
        while i < doc.children.len() {
            let kind = doc.children[i].kind();

            if kind == NodeKind::Exercise {
                if let Some(violation) = self.violation(&doc.children[i]) {
                    debug!(index = i, ?violation, "rebuilding exercise");
                    let children = doc.children[i]
                        .children_mut()
                        .map(std::mem::take)
                        .unwrap_or_default();
                    doc.children[i] = self.assemble(children);
                    replaced.push(i);
                    report.push(Repair::ExerciseRebuilt { index: i, violation });
                }
                i += 1;
                continue;
            }

            match self.config.stray_nodes {
                StrayNodePolicy::Keep => {
                    debug!(index = i, %kind, "keeping stray top-level node");
                    i += 1;
                }
                StrayNodePolicy::Remove => {
                    debug!(index = i, %kind, "removing stray top-level node");
                    doc.children.remove(i);
                    shift_selection_after_removal(doc, i);
                    report.push(Repair::StrayRemoved { index: i, kind });
                }
                StrayNodePolicy::Wrap => {
                    let end = (i..doc.children.len())
                        .find(|&j| doc.children[j].kind() == NodeKind::Exercise)
                        .unwrap_or(doc.children.len());
                    let run: Vec<Node> = doc.children.drain(i..end).collect();
                    let count = run.len();
                    debug!(index = i, count, "wrapping stray top-level nodes");
                    doc.children.insert(i, self.assemble(run));
                    replaced.push(i);
                    report.push(Repair::StrayWrapped { index: i, count });
                    i += 1;
                }
            }
        }
        replaced
    }

    fn violation(&self, exercise: &Node) -> Option<ShapeViolation> {
        match exercise.children() {
            [] => Some(ShapeViolation::Empty),
            [only] if only.kind() == NodeKind::Question => Some(ShapeViolation::MissingSolution),
            [_] => Some(ShapeViolation::MissingQuestion),
            [Node::Question { .. }, Node::Solution { .. }] => None,
            [_, _] if self.config.repair_misordered_pairs => Some(ShapeViolation::Misordered),
            [_, _] => None,
            extra => match self.config.extra_children {
                ExtraChildrenPolicy::Keep => None,
                _ => Some(ShapeViolation::ExtraChildren(extra.len())),
            },
        }
    }

    /// Build a canonical exercise out of arbitrary children.
    ///
    /// The first question fills the question slot; the remaining children
    /// make up the solution.
    fn assemble(&self, children: Vec<Node>) -> Node {
        let mut question = None;
        let mut rest = Vec::new();
        for child in children {
            if question.is_none() && child.kind() == NodeKind::Question {
                question = Some(child);
            } else {
                rest.push(child);
            }
        }

        let question =
            question.unwrap_or_else(|| Node::default_question(&self.config.default_question_text));

        let solution = match self.config.extra_children {
            ExtraChildrenPolicy::Truncate => rest.into_iter().next().map(into_solution),
            ExtraChildrenPolicy::MergeIntoSolution | ExtraChildrenPolicy::Keep => {
                if rest.len() > 1 {
                    Some(Node::solution(into_blocks(rest)))
                } else {
                    rest.into_iter().next().map(into_solution)
                }
            }
        }
        .unwrap_or_else(|| Node::default_solution(&self.config.default_solution_text));

        Node::exercise(question, solution)
    }
}

/// Normalize with the default policies
pub fn normalize(doc: &mut Document) -> NormalizeReport {
    Normalizer::default().normalize(doc)
}

fn select_start(doc: &mut Document, index: usize) {
    if let Some(point) = doc.start_of(&[index]) {
        doc.selection = Some(Selection::collapsed(point));
    }
}

/// Keep a node in the solution slot, coercing anything that is not a
/// solution into one
fn into_solution(node: Node) -> Node {
    match node {
        Node::Solution { .. } => node,
        other => Node::solution(into_blocks(vec![other])),
    }
}

/// Turn a mixed node list into paragraphs and code blocks.
///
/// Runs of text leaves share one paragraph; exercises, questions and
/// solutions are replaced by their own blocks.
fn into_blocks(nodes: Vec<Node>) -> Vec<Node> {
    let mut blocks = Vec::new();
    let mut texts = Vec::new();

    for node in nodes {
        match node.kind() {
            NodeKind::Text => texts.push(node),
            NodeKind::Paragraph | NodeKind::CodeBlock => {
                flush_texts(&mut texts, &mut blocks);
                blocks.push(node);
            }
            NodeKind::Exercise | NodeKind::Question | NodeKind::Solution => {
                flush_texts(&mut texts, &mut blocks);
                blocks.extend(into_blocks(node.into_children()));
            }
        }
    }
    flush_texts(&mut texts, &mut blocks);
    blocks
}

fn flush_texts(texts: &mut Vec<Node>, blocks: &mut Vec<Node>) {
    if !texts.is_empty() {
        blocks.push(Node::Paragraph {
            children: std::mem::take(texts),
        });
    }
}

/// Text leaves at or below `node`, in order
fn text_leaves(node: Node) -> Vec<Node> {
    match node {
        Node::Text { .. } => vec![node],
        other => other.into_children().into_iter().flat_map(text_leaves).collect(),
    }
}

impl Normalizer {
    /// Fallback pass over one subtree
    fn fix_node(&self, node: &mut Node, path: &mut Vec<usize>, report: &mut NormalizeReport) {
        let kind = node.kind();
        let Some(children) = node.children_mut() else {
            return;
        };

        match kind {
            NodeKind::Question | NodeKind::Solution => {
                if children.iter().any(Node::is_text) {
                    report.push(Repair::Fallback {
                        path: path.clone(),
                        fix: FallbackFix::WrappedText,
                    });
                }
                if children.iter().any(|c| c.kind() != NodeKind::Text && !c.kind().is_block()) {
                    report.push(Repair::Fallback {
                        path: path.clone(),
                        fix: FallbackFix::LiftedBlocks,
                    });
                }
                if children.iter().any(|c| !c.kind().is_block()) {
                    *children = into_blocks(std::mem::take(children));
                }
                if children.is_empty() {
                    children.push(Node::paragraph(""));
                    report.push(Repair::Fallback {
                        path: path.clone(),
                        fix: FallbackFix::FilledEmpty,
                    });
                }
            }
            NodeKind::Paragraph | NodeKind::CodeBlock => {
                if children.iter().any(|c| !c.is_text()) {
                    *children = std::mem::take(children)
                        .into_iter()
                        .flat_map(text_leaves)
                        .collect();
                    report.push(Repair::Fallback {
                        path: path.clone(),
                        fix: FallbackFix::FlattenedInline,
                    });
                }
                if children.is_empty() {
                    children.push(Node::text(""));
                    report.push(Repair::Fallback {
                        path: path.clone(),
                        fix: FallbackFix::FilledEmpty,
                    });
                }
            }
            NodeKind::Exercise => {
                // only reachable below the root
                if children.is_empty() {
                    children.push(Node::default_question(&self.config.default_question_text));
                    children.push(Node::default_solution(&self.config.default_solution_text));
                    report.push(Repair::Fallback {
                        path: path.clone(),
                        fix: FallbackFix::FilledEmpty,
                    });
                }
            }
            NodeKind::Text => {}
        }

        for (i, child) in children.iter_mut().enumerate() {
            path.push(i);
            self.fix_node(child, path, report);
            path.pop();
        }
    }
}

/// Keep selection points on their leaves after root child `index` is
/// removed. A point inside the removed node loses its path, so revalidation
/// moves it.
fn shift_selection_after_removal(doc: &mut Document, index: usize) {
    let Some(selection) = doc.selection.as_mut() else {
        return;
    };
    for point in [&mut selection.anchor, &mut selection.focus] {
        match point.path.first().copied() {
            Some(first) if first > index => point.path[0] = first - 1,
            Some(first) if first == index => point.path.clear(),
            _ => {}
        }
    }
}

/// Clamp the selection into the tree, or move it to the document start when
/// it no longer addresses a text leaf
fn revalidate_selection(doc: &mut Document) {
    let Some(selection) = &doc.selection else {
        return;
    };

    let clamp = |point: &Point| match doc.node(&point.path) {
        Some(leaf @ Node::Text { .. }) => Some(Point::new(
            point.path.clone(),
            point.offset.min(leaf.char_count()),
        )),
        _ => None,
    };

    let repaired = match (clamp(&selection.anchor), clamp(&selection.focus)) {
        (Some(anchor), Some(focus)) => Some(Selection::new(anchor, focus)),
        _ => doc.start().map(Selection::collapsed),
    };

    if repaired.as_ref() != doc.selection.as_ref() {
        trace!(?repaired, "selection re-validated");
        doc.selection = repaired;
    }
}
