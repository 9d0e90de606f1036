// SPDX-License-Identifier: AGPL-3.0-or-later
//! HTML clipboard importer using html5ever

use super::foreign::{import_foreign_tree, ForeignNode};
use super::HTML_MIME;
use crate::ast::Node;
use crate::traits::{ImportConfig, ImportError, Importer, Result};
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Rich-text paste handler
pub struct HtmlImporter;

impl HtmlImporter {
    pub fn new() -> Self {
        Self
    }

    /// Parse an HTML payload into a foreign tree rooted at `<body>`
    pub fn parse(&self, html: &str) -> Result<ForeignNode> {
        let dom: RcDom = parse_document(RcDom::default(), ParseOpts::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())?;

        find_body(&dom.document)
            .map(|body| to_foreign(&body))
            .ok_or_else(|| ImportError::Unparseable {
                mime: HTML_MIME.to_string(),
                message: "document has no body".to_string(),
            })
    }
}

impl Default for HtmlImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Importer for HtmlImporter {
    fn mime(&self) -> &'static str {
        HTML_MIME
    }

    fn import(&self, payload: &str, config: &ImportConfig) -> Result<Vec<Node>> {
        let root = self.parse(payload)?;
        let nodes = import_foreign_tree(&root, config);

        if has_content(&nodes) {
            Ok(nodes)
        } else {
            Err(ImportError::Empty {
                mime: HTML_MIME.to_string(),
            })
        }
    }
}

fn find_body(handle: &Handle) -> Option<Handle> {
    if let NodeData::Element { name, .. } = &handle.data {
        if &*name.local == "body" {
            return Some(handle.clone());
        }
    }
    handle.children.borrow().iter().find_map(find_body)
}

fn to_foreign(handle: &Handle) -> ForeignNode {
    match &handle.data {
        NodeData::Text { contents } => ForeignNode::Text(contents.borrow().to_string()),

        NodeData::Element { name, attrs, .. } => ForeignNode::Element {
            tag: name.local.to_string(),
            attrs: attrs
                .borrow()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect(),
            children: handle.children.borrow().iter().map(to_foreign).collect(),
        },

        NodeData::Document
        | NodeData::Doctype { .. }
        | NodeData::Comment { .. }
        | NodeData::ProcessingInstruction { .. } => ForeignNode::Other,
    }
}

/// Any element, or any text that is not whitespace
fn has_content(nodes: &[Node]) -> bool {
    nodes.iter().any(|node| match node {
        Node::Text { text } => !text.trim().is_empty(),
        _ => true,
    })
}
