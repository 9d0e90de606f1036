// SPDX-License-Identifier: AGPL-3.0-or-later
//! Edit surface adapter
//!
//! [`Editor`] owns a document and funnels every mutation through the same
//! commit step: apply, bump the version, normalize. Paste goes through the
//! importer registry in preference order and falls back to plain text.

use crate::ast::{Document, Node, NodeKind};
use crate::config::EditorConfig;
use crate::import::{encode_fragment, FRAGMENT_MIME, HTML_MIME, PLAIN_MIME};
use crate::normalize::{NormalizeReport, Normalizer};
use crate::ops::{EditError, Operation};
use crate::render::HtmlRenderer;
use crate::selection::{grapheme_len, Point, Selection};
use crate::traits::{ImportConfig, ImporterRegistry, RenderConfig};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Clipboard payloads keyed by MIME type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardData {
    items: BTreeMap<String, String>,
}

impl ClipboardData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clipboard holding only `text/plain`
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new().with(PLAIN_MIME, text)
    }

    /// Clipboard holding `text/html` with its plain-text flavour
    pub fn html(html: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new().with(HTML_MIME, html).with(PLAIN_MIME, text)
    }

    pub fn with(mut self, mime: &str, payload: impl Into<String>) -> Self {
        self.set(mime, payload);
        self
    }

    pub fn set(&mut self, mime: &str, payload: impl Into<String>) {
        self.items.insert(mime.to_string(), payload.into());
    }

    pub fn get(&self, mime: &str) -> Option<&str> {
        self.items.get(mime).map(String::as_str)
    }

    pub fn mimes(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Which payload a paste used
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteSource {
    /// A registered importer produced `nodes` top-level nodes
    Structured { mime: &'static str, nodes: usize },
    /// The `text/plain` payload, inserted verbatim
    PlainText,
    /// Nothing usable on the clipboard; the document is unchanged
    Nothing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteOutcome {
    pub source: PasteSource,
    pub report: NormalizeReport,
}

/// An editable exercise document
pub struct Editor {
    document: Document,
    normalizer: Normalizer,
    importers: ImporterRegistry,
    import_config: ImportConfig,
    render_config: RenderConfig,
    version: u64,
}

impl Editor {
    /// Wrap a document. The document is normalized once on the way in.
    pub fn new(document: Document, config: EditorConfig) -> Self {
        let mut editor = Self {
            document,
            normalizer: Normalizer::new(config.normalize),
            importers: ImporterRegistry::default(),
            import_config: config.import,
            render_config: config.render,
            version: 0,
        };
        let report = editor.normalize();
        if !report.is_clean() {
            info!(repairs = report.repairs.len(), "loaded document needed repair");
        }
        editor
    }

    pub fn with_defaults(document: Document) -> Self {
        Self::new(document, EditorConfig::default())
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.document.selection.as_ref()
    }

    /// Place the selection; both points must address text leaves
    pub fn set_selection(&mut self, selection: Option<Selection>) -> Result<(), EditError> {
        if let Some(selection) = &selection {
            for point in [&selection.anchor, &selection.focus] {
                if !self.document.is_valid_point(point) {
                    return Err(EditError::NodeNotFound(point.path.clone()));
                }
            }
        }
        self.document.selection = selection;
        Ok(())
    }

    /// Collapse the selection at the start of the node at `path`
    pub fn select_start_of(&mut self, path: &[usize]) -> Result<(), EditError> {
        let point = self
            .document
            .start_of(path)
            .ok_or_else(|| EditError::NodeNotFound(path.to_vec()))?;
        self.document.selection = Some(Selection::collapsed(point));
        Ok(())
    }

    /// Collapse the selection at the end of the node at `path`
    pub fn select_end_of(&mut self, path: &[usize]) -> Result<(), EditError> {
        let point = self
            .document
            .end_of(path)
            .ok_or_else(|| EditError::NodeNotFound(path.to_vec()))?;
        self.document.selection = Some(Selection::collapsed(point));
        Ok(())
    }

    /// Number of committed mutations
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Importers consulted by [`Editor::insert_data`], most preferred first
    pub fn importers_mut(&mut self) -> &mut ImporterRegistry {
        &mut self.importers
    }

    pub fn normalize(&mut self) -> NormalizeReport {
        self.normalizer.normalize(&mut self.document)
    }

    /// Apply one operation and commit it
    pub fn apply(&mut self, op: Operation) -> Result<NormalizeReport, EditError> {
        op.apply(&mut self.document)?;
        self.follow_text_edit(&op);
        Ok(self.commit())
    }

    /// Type `text` at the caret
    pub fn insert_text(&mut self, text: &str) -> Result<NormalizeReport, EditError> {
        let at = self.caret()?;
        self.apply(Operation::InsertText {
            at,
            text: text.to_string(),
        })
    }

    /// Insert a node sequence at the caret, or append it to the root without
    /// one. Each node lands at the level its kind belongs to: text inside the
    /// current leaf, blocks beside the current block, slots beside the
    /// current slot, exercises after the current exercise. Normalization
    /// runs once, after the whole sequence is in.
    pub fn insert_fragment(&mut self, nodes: Vec<Node>) -> Result<NormalizeReport, EditError> {
        if nodes.is_empty() {
            return Ok(NormalizeReport::default());
        }

        let caret = self
            .document
            .selection
            .as_ref()
            .map(|selection| selection.focus.clone())
            .filter(|point| self.document.is_valid_point(point));

        let mut scratch = self.document.clone();
        let selection = match caret {
            Some(mut cursor) => {
                for node in nodes {
                    cursor = insert_at_cursor(&mut scratch, cursor, node)?;
                }
                Some(cursor)
            }
            None => {
                scratch.children.extend(nodes);
                let last = scratch.children.len() - 1;
                scratch.end_of(&[last])
            }
        };
        scratch.selection = selection.map(Selection::collapsed);
        self.document = scratch;

        Ok(self.commit())
    }

    /// Paste clipboard data.
    ///
    /// Registered importers are tried in order; the first whose payload is
    /// present and imports cleanly wins. Failing that, `text/plain` is
    /// inserted as a single text leaf.
    pub fn insert_data(&mut self, data: &ClipboardData) -> Result<PasteOutcome, EditError> {
        let imported = self.importers.iter().find_map(|importer| {
            let mime = importer.mime();
            let payload = data.get(mime)?;
            match importer.import(payload, &self.import_config) {
                Ok(nodes) => Some((mime, nodes)),
                Err(err) => {
                    debug!(mime, error = %err, "clipboard payload rejected, falling back");
                    None
                }
            }
        });

        if let Some((mime, nodes)) = imported {
            let count = nodes.len();
            let report = self.insert_fragment(nodes)?;
            debug!(mime, nodes = count, "pasted structured content");
            return Ok(PasteOutcome {
                source: PasteSource::Structured { mime, nodes: count },
                report,
            });
        }

        match data.get(PLAIN_MIME) {
            Some(text) if !text.is_empty() => {
                let report = self.insert_fragment(vec![Node::text(text)])?;
                debug!(len = text.len(), "pasted plain text");
                Ok(PasteOutcome {
                    source: PasteSource::PlainText,
                    report,
                })
            }
            _ => {
                debug!("nothing to paste");
                Ok(PasteOutcome {
                    source: PasteSource::Nothing,
                    report: NormalizeReport::default(),
                })
            }
        }
    }

    /// Clipboard flavours of the node at `path`
    pub fn copy(&self, path: &[usize]) -> Result<ClipboardData, EditError> {
        let node = self
            .document
            .node(path)
            .ok_or_else(|| EditError::NodeNotFound(path.to_vec()))?;
        let nodes = std::slice::from_ref(node);
        let html = HtmlRenderer::new().render_nodes(nodes, &self.render_config)?;

        Ok(ClipboardData::new()
            .with(FRAGMENT_MIME, encode_fragment(nodes))
            .with(HTML_MIME, html)
            .with(PLAIN_MIME, node.plain_text()))
    }

    fn caret(&self) -> Result<Point, EditError> {
        self.document
            .selection
            .as_ref()
            .map(|selection| selection.focus.clone())
            .ok_or(EditError::NoSelection)
    }

    fn commit(&mut self) -> NormalizeReport {
        self.version += 1;
        self.normalize()
    }

    /// Shift selection points in an edited leaf past inserted or removed text
    fn follow_text_edit(&mut self, op: &Operation) {
        let Some(selection) = self.document.selection.as_mut() else {
            return;
        };
        for point in [&mut selection.anchor, &mut selection.focus] {
            match op {
                Operation::InsertText { at, text } if point.path == at.path && point.offset >= at.offset => {
                    point.offset += grapheme_len(text);
                }
                Operation::RemoveText { at, len } if point.path == at.path && point.offset > at.offset => {
                    point.offset = point.offset.saturating_sub(*len).max(at.offset);
                }
                _ => {}
            }
        }
    }
}

/// Insert one node relative to `cursor` and return the cursor after it
fn insert_at_cursor(doc: &mut Document, cursor: Point, node: Node) -> Result<Point, EditError> {
    match node.kind() {
        NodeKind::Text => {
            let text = node.plain_text();
            let offset = cursor.offset + grapheme_len(&text);
            Operation::InsertText {
                at: cursor.clone(),
                text,
            }
            .apply(doc)?;
            Ok(Point::new(cursor.path, offset))
        }
        NodeKind::Paragraph | NodeKind::CodeBlock => insert_block(doc, cursor, node),
        NodeKind::Question | NodeKind::Solution => insert_after_ancestor(doc, cursor, node, 2),
        NodeKind::Exercise => insert_after_ancestor(doc, cursor, node, 1),
    }
}

/// Split the block holding the cursor and put `block` between the halves.
/// Halves left without text are dropped.
fn insert_block(doc: &mut Document, cursor: Point, mut block: Node) -> Result<Point, EditError> {
    if block.last_text_path().is_none() {
        if let Some(children) = block.children_mut() {
            children.push(Node::text(""));
        }
    }

    let Some(block_path) = block_ancestor(doc, &cursor.path) else {
        let at = next_sibling(&cursor.path);
        Operation::InsertNode {
            path: at.clone(),
            node: block,
        }
        .apply(doc)?;
        return Ok(doc.end_of(&at).unwrap_or(cursor));
    };

    let direct = cursor.path.len() == block_path.len() + 1;
    let mut at = next_sibling(&block_path);

    if direct {
        let leaf = cursor.path[block_path.len()];
        Operation::SplitNode {
            path: cursor.path.clone(),
            position: cursor.offset,
        }
        .apply(doc)?;
        Operation::SplitNode {
            path: block_path.clone(),
            position: leaf + 1,
        }
        .apply(doc)?;
    }

    Operation::InsertNode {
        path: at.clone(),
        node: block,
    }
    .apply(doc)?;

    if direct {
        let tail = next_sibling(&at);
        if is_blank(doc, &tail) {
            Operation::RemoveNode { path: tail }.apply(doc)?;
        }
        if is_blank(doc, &block_path) {
            Operation::RemoveNode {
                path: block_path.clone(),
            }
            .apply(doc)?;
            at = block_path;
        }
    }

    doc.end_of(&at).ok_or(EditError::NodeNotFound(at))
}

/// Insert `node` after the ancestor of the cursor at `depth` (1 for the
/// exercise, 2 for its slot). The cursor stays put when the new node has no
/// text to land in.
fn insert_after_ancestor(
    doc: &mut Document,
    cursor: Point,
    node: Node,
    depth: usize,
) -> Result<Point, EditError> {
    let depth = depth.min(cursor.path.len());
    let at = next_sibling(&cursor.path[..depth]);
    Operation::InsertNode {
        path: at.clone(),
        node,
    }
    .apply(doc)?;
    Ok(doc.end_of(&at).unwrap_or(cursor))
}

/// Nearest paragraph or code block above a leaf
fn block_ancestor(doc: &Document, leaf: &[usize]) -> Option<Vec<usize>> {
    (1..leaf.len())
        .rev()
        .map(|depth| &leaf[..depth])
        .find(|path| doc.node(path).is_some_and(|node| node.kind().is_block()))
        .map(<[usize]>::to_vec)
}

fn next_sibling(path: &[usize]) -> Vec<usize> {
    let mut next = path.to_vec();
    if let Some(last) = next.last_mut() {
        *last += 1;
    }
    next
}

fn is_blank(doc: &Document, path: &[usize]) -> bool {
    doc.node(path)
        .is_some_and(|node| !node.is_text() && node.plain_text().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::FragmentImporter;
    use crate::normalize::Repair;
    use crate::seed::initial_document;
    use crate::traits::{ImportError, Importer};
    use pretty_assertions::assert_eq;

    fn editor() -> Editor {
        Editor::with_defaults(initial_document())
    }

    fn text_at(editor: &Editor, path: &[usize]) -> Option<String> {
        editor.document().node(path).map(Node::plain_text)
    }

    #[test]
    fn test_new_normalizes() {
        let editor = Editor::with_defaults(Document::from_nodes(vec![Node::Exercise {
            children: vec![],
        }]));
        assert!(editor.document().is_canonical());
        assert_eq!(editor.version(), 0);
    }

    #[test]
    fn test_apply_bumps_version_and_normalizes() {
        let mut editor = editor();
        let report = editor.apply(Operation::RemoveNode { path: vec![0, 1] }).unwrap();
        assert_eq!(editor.version(), 1);
        assert!(editor.document().is_canonical());
        assert_eq!(text_at(&editor, &[0, 1]).as_deref(), Some("Solution text"));
        assert_eq!(report.repairs.len(), 1);
    }

    #[test]
    fn test_failed_apply_keeps_version() {
        let mut editor = editor();
        let before = editor.document().clone();
        assert!(editor.apply(Operation::RemoveNode { path: vec![9] }).is_err());
        assert_eq!(editor.version(), 0);
        assert_eq!(editor.document(), &before);
    }

    #[test]
    fn test_insert_text_moves_caret() {
        let mut editor = editor();
        editor.select_end_of(&[1, 0]).unwrap();
        editor.insert_text("!").unwrap();
        editor.insert_text("?").unwrap();
        assert_eq!(text_at(&editor, &[1, 0]).as_deref(), Some("Question2?!?"));
        assert_eq!(
            editor.selection().map(|s| s.focus.clone()),
            Some(Point::new(vec![1, 0, 0, 0], 12))
        );
    }

    #[test]
    fn test_insert_text_without_selection() {
        let mut editor = editor();
        assert_eq!(editor.insert_text("x"), Err(EditError::NoSelection));
    }

    #[test]
    fn test_set_selection_validates() {
        let mut editor = editor();
        let bad = Selection::collapsed(Point::new(vec![0, 0], 0));
        assert!(editor.set_selection(Some(bad)).is_err());
        let good = Selection::collapsed(Point::new(vec![0, 0, 0, 0], 3));
        editor.set_selection(Some(good.clone())).unwrap();
        assert_eq!(editor.selection(), Some(&good));
    }

    #[test]
    fn test_fragment_text_lands_in_leaf() {
        let mut editor = editor();
        editor
            .set_selection(Some(Selection::collapsed(Point::new(vec![0, 1, 0, 0], 9))))
            .unwrap();
        editor.insert_fragment(vec![Node::text(" and more")]).unwrap();
        assert_eq!(text_at(&editor, &[0, 1, 0]).as_deref(), Some("Paragraph and more 1"));
    }

    #[test]
    fn test_fragment_block_splits_paragraph() {
        let mut editor = editor();
        editor
            .set_selection(Some(Selection::collapsed(Point::new(vec![0, 1, 0, 0], 4))))
            .unwrap();
        editor.insert_fragment(vec![Node::code_block("x = 1")]).unwrap();

        let solution = editor.document().node(&[0, 1]).unwrap();
        let texts: Vec<String> = solution.children().iter().map(Node::plain_text).collect();
        assert_eq!(texts, vec!["Para", "x = 1", "graph 1", "Paragraph 2"]);
        assert_eq!(solution.children()[1].kind(), NodeKind::CodeBlock);
        assert_eq!(
            editor.selection().map(|s| s.focus.clone()),
            Some(Point::new(vec![0, 1, 1, 0], 5))
        );
    }

    #[test]
    fn test_fragment_block_at_edges_drops_blank_halves() {
        let mut editor = editor();
        editor.select_end_of(&[0, 1, 1]).unwrap();
        editor.insert_fragment(vec![Node::paragraph("Paragraph 3")]).unwrap();
        assert_eq!(editor.document().node(&[0, 1]).unwrap().children().len(), 3);

        editor.select_start_of(&[0, 1, 0]).unwrap();
        editor.insert_fragment(vec![Node::paragraph("Paragraph 0")]).unwrap();
        let texts: Vec<String> = editor
            .document()
            .node(&[0, 1])
            .unwrap()
            .children()
            .iter()
            .map(Node::plain_text)
            .collect();
        assert_eq!(texts, vec!["Paragraph 0", "Paragraph 1", "Paragraph 2", "Paragraph 3"]);
    }

    #[test]
    fn test_fragment_exercise_goes_after_current() {
        let mut editor = editor();
        editor.select_start_of(&[0]).unwrap();
        let pasted = Node::exercise(Node::default_question("New?"), Node::default_solution("Yes"));
        editor.insert_fragment(vec![pasted.clone()]).unwrap();
        assert_eq!(editor.document().children.len(), 3);
        assert_eq!(editor.document().children[1], pasted);
        assert_eq!(
            editor.selection().map(|s| s.focus.clone()),
            Some(Point::new(vec![1, 1, 0, 0], 3))
        );
    }

    #[test]
    fn test_fragment_slot_is_merged_by_normalizer() {
        let mut editor = editor();
        editor.select_start_of(&[0, 1]).unwrap();
        editor.insert_fragment(vec![Node::default_solution("Berlin")]).unwrap();
        let exercise = editor.document().node(&[0]).unwrap();
        assert!(exercise.is_canonical_exercise());
        assert!(exercise.children()[1].plain_text().contains("Berlin"));
    }

    #[test]
    fn test_fragment_without_selection_appends() {
        let mut editor = editor();
        let report = editor.insert_fragment(vec![Node::paragraph("loose")]).unwrap();
        let doc = editor.document();
        assert_eq!(doc.children.len(), 3);
        assert!(doc.is_canonical());
        assert_eq!(doc.children[2].children()[1].plain_text(), "loose");
        assert_eq!(report.repairs[0], Repair::StrayWrapped { index: 2, count: 1 });
    }

    #[test]
    fn test_empty_fragment_is_a_no_op() {
        let mut editor = editor();
        assert!(editor.insert_fragment(vec![]).unwrap().is_clean());
        assert_eq!(editor.version(), 0);
    }

    #[test]
    fn test_paste_plain_text_is_verbatim() {
        let mut editor = Editor::with_defaults(Document::from_nodes(vec![Node::exercise(
            Node::default_question("Q"),
            Node::default_solution(""),
        )]));
        editor.select_start_of(&[0, 1]).unwrap();
        let payload = "  <b>not markup</b> & tabs\t\n";
        let outcome = editor.insert_data(&ClipboardData::plain(payload)).unwrap();
        assert_eq!(outcome.source, PasteSource::PlainText);
        assert_eq!(editor.document().node(&[0, 1, 0, 0]), Some(&Node::text(payload)));
    }

    #[test]
    fn test_paste_plain_text_without_selection() {
        let mut editor = Editor::with_defaults(Document::new());
        let outcome = editor.insert_data(&ClipboardData::plain("hello")).unwrap();
        assert_eq!(outcome.source, PasteSource::PlainText);
        let doc = editor.document();
        assert!(doc.is_canonical());
        assert_eq!(doc.node(&[0, 1, 0, 0]), Some(&Node::text("hello")));
    }

    #[test]
    fn test_paste_fragment_wins_over_html() {
        let mut editor = editor();
        editor.select_start_of(&[1]).unwrap();
        let fragment = encode_fragment(&[Node::exercise(
            Node::default_question("From fragment"),
            Node::default_solution("S"),
        )]);
        let data = ClipboardData::html("<p>from html</p>", "plain")
            .with(FRAGMENT_MIME, fragment);
        let outcome = editor.insert_data(&data).unwrap();
        assert_eq!(
            outcome.source,
            PasteSource::Structured {
                mime: FRAGMENT_MIME,
                nodes: 1
            }
        );
        assert_eq!(text_at(&editor, &[2, 0]).as_deref(), Some("From fragment"));
    }

    #[test]
    fn test_malformed_fragment_falls_back_to_plain_text() {
        let mut editor = editor();
        editor.select_end_of(&[0, 0]).unwrap();
        let data = ClipboardData::plain(" Berlin").with(FRAGMENT_MIME, "{not json");
        let outcome = editor.insert_data(&data).unwrap();
        assert_eq!(outcome.source, PasteSource::PlainText);
        assert_eq!(
            text_at(&editor, &[0, 0]).as_deref(),
            Some("What is the capital of Germany? Berlin")
        );
    }

    #[cfg(feature = "html")]
    #[test]
    fn test_paste_html() {
        let mut editor = editor();
        editor.select_end_of(&[0, 1, 1]).unwrap();
        let data = ClipboardData::html("<p>Berlin</p><p>on the Spree</p>", "Berlin\non the Spree");
        let outcome = editor.insert_data(&data).unwrap();
        assert_eq!(
            outcome.source,
            PasteSource::Structured {
                mime: HTML_MIME,
                nodes: 2
            }
        );
        let texts: Vec<String> = editor
            .document()
            .node(&[0, 1])
            .unwrap()
            .children()
            .iter()
            .map(Node::plain_text)
            .collect();
        assert_eq!(texts, vec!["Paragraph 1", "Paragraph 2", "Berlin", "on the Spree"]);
        assert!(editor.document().is_canonical());
    }

    #[test]
    fn test_paste_nothing() {
        let mut editor = editor();
        let before = editor.document().clone();
        let outcome = editor.insert_data(&ClipboardData::new()).unwrap();
        assert_eq!(outcome.source, PasteSource::Nothing);
        assert_eq!(editor.document(), &before);
        assert_eq!(editor.version(), 0);
    }

    #[test]
    fn test_custom_importer_is_consulted() {
        struct Shout;

        impl Importer for Shout {
            fn mime(&self) -> &'static str {
                "text/x-shout"
            }

            fn import(&self, payload: &str, _config: &ImportConfig) -> crate::traits::Result<Vec<Node>> {
                if payload.is_empty() {
                    return Err(ImportError::Empty {
                        mime: self.mime().to_string(),
                    });
                }
                Ok(vec![Node::text(payload.to_uppercase())])
            }
        }

        let mut editor = editor();
        editor.importers_mut().register(Box::new(Shout));
        editor.select_end_of(&[0, 0]).unwrap();
        editor
            .insert_data(&ClipboardData::new().with("text/x-shout", " yes"))
            .unwrap();
        assert_eq!(
            text_at(&editor, &[0, 0]).as_deref(),
            Some("What is the capital of Germany? YES")
        );
    }

    #[test]
    fn test_copy_round_trips_through_paste() {
        let mut editor = editor();
        let data = editor.copy(&[0]).unwrap();
        assert_eq!(
            data.get(PLAIN_MIME),
            Some("What is the capital of Germany?Paragraph 1Paragraph 2")
        );
        assert!(data.get(HTML_MIME).is_some_and(|h| h.contains("data-type=\"exercise\"")));
        assert_eq!(
            FragmentImporter::new()
                .import(data.get(FRAGMENT_MIME).unwrap(), &ImportConfig::default())
                .unwrap(),
            vec![editor.document().children[0].clone()]
        );

        editor.select_start_of(&[1]).unwrap();
        editor.insert_data(&data).unwrap();
        assert_eq!(editor.document().children.len(), 3);
        assert_eq!(editor.document().children[2], editor.document().children[0]);
    }

    #[test]
    fn test_copy_missing_node() {
        assert_eq!(editor().copy(&[7]), Err(EditError::NodeNotFound(vec![7])));
    }

    #[test]
    fn test_clipboard_data() {
        let data = ClipboardData::html("<p>x</p>", "x");
        assert_eq!(data.mimes().collect::<Vec<_>>(), vec![HTML_MIME, PLAIN_MIME]);
        assert_eq!(data.get(PLAIN_MIME), Some("x"));
        assert!(data.get(FRAGMENT_MIME).is_none());
        assert!(ClipboardData::new().is_empty());
    }
}
