// SPDX-License-Identifier: AGPL-3.0-or-later
//! Foreign tree to document node conversion
//!
//! The converter is total: every foreign node becomes zero or more document
//! nodes. Tags without a mapping are elided and their children spliced into
//! the parent's sequence, so text survives even when structure does not.

use crate::ast::{Node, NodeKind};
use crate::traits::ImportConfig;
use tracing::trace;

/// A node of an externally sourced tree (parsed clipboard markup)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForeignNode {
    Text(String),
    Element {
        /// Lowercase tag name
        tag: String,
        attrs: Vec<(String, String)>,
        children: Vec<ForeignNode>,
    },
    /// Comments, doctypes, processing instructions
    Other,
}

impl ForeignNode {
    pub fn text(text: impl Into<String>) -> Self {
        ForeignNode::Text(text.into())
    }

    pub fn element(tag: &str, children: Vec<ForeignNode>) -> Self {
        ForeignNode::Element {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            children,
        }
    }

    /// Builder-style attribute setter; no-op on non-elements
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        if let ForeignNode::Element { attrs, .. } = &mut self {
            attrs.push((name.to_ascii_lowercase(), value.to_string()));
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            ForeignNode::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            ForeignNode::Element { attrs, .. } => attrs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    pub fn children(&self) -> &[ForeignNode] {
        match self {
            ForeignNode::Element { children, .. } => children,
            _ => &[],
        }
    }
}

/// Tags whose content is the fragment itself rather than an element
const FRAGMENT_TAGS: [&str; 2] = ["html", "body"];

/// Converts foreign trees with a fixed configuration
pub struct ForeignImporter<'a> {
    config: &'a ImportConfig,
}

impl<'a> ForeignImporter<'a> {
    pub fn new(config: &'a ImportConfig) -> Self {
        Self { config }
    }

    /// Convert the root of a foreign tree into an ordered node sequence.
    ///
    /// The root acts as a fragment: its converted children are returned
    /// directly, or a single empty text leaf when there are none.
    pub fn import(&self, root: &ForeignNode) -> Vec<Node> {
        match root {
            ForeignNode::Element { children, .. } => self.convert_children(children, false),
            other => self.convert(other, false),
        }
    }

    fn convert(&self, node: &ForeignNode, in_pre: bool) -> Vec<Node> {
        match node {
            ForeignNode::Text(text) => {
                if self.config.skip_blank_text && !in_pre && text.trim().is_empty() {
                    Vec::new()
                } else {
                    vec![Node::text(text.as_str())]
                }
            }
            ForeignNode::Other => Vec::new(),
            ForeignNode::Element { tag, children, .. } => {
                if tag == "br" {
                    return vec![Node::text("\n")];
                }

                // <pre><code>..</code></pre> is one code block
                let source = match children.first() {
                    Some(code @ ForeignNode::Element { tag: inner, .. })
                        if tag == "pre" && inner == "code" =>
                    {
                        code.children()
                    }
                    _ => children.as_slice(),
                };
                let children = self.convert_children(source, in_pre || tag == "pre");

                if FRAGMENT_TAGS.contains(&tag.as_str()) {
                    return children;
                }

                match self.kind_of(node) {
                    Some(kind) => vec![Node::element(kind, children)],
                    None => {
                        trace!(tag = %tag, "eliding unmapped foreign element");
                        children
                    }
                }
            }
        }
    }

    fn convert_children(&self, children: &[ForeignNode], in_pre: bool) -> Vec<Node> {
        let converted: Vec<Node> = children
            .iter()
            .flat_map(|child| self.convert(child, in_pre))
            .collect();

        if converted.is_empty() {
            vec![Node::text("")]
        } else {
            converted
        }
    }

    fn kind_of(&self, node: &ForeignNode) -> Option<NodeKind> {
        let from_attr = if self.config.honor_data_type {
            node.attr("data-type").and_then(NodeKind::from_label)
        } else {
            None
        };

        from_attr
            .or_else(|| node.tag().and_then(|tag| self.config.tag_map.get(tag).copied()))
            .filter(|kind| *kind != NodeKind::Text)
    }
}

/// Convert a foreign tree with the given configuration
pub fn import_foreign_tree(root: &ForeignNode, config: &ImportConfig) -> Vec<Node> {
    ForeignImporter::new(config).import(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn el(tag: &str, children: Vec<ForeignNode>) -> ForeignNode {
        ForeignNode::element(tag, children)
    }

    fn txt(text: &str) -> ForeignNode {
        ForeignNode::text(text)
    }

    fn import(root: &ForeignNode) -> Vec<Node> {
        import_foreign_tree(root, &ImportConfig::default())
    }

    #[test]
    fn test_flatten_preserves_order() {
        // <p>one</p> gives one node, <span>two<br></span> gives two siblings
        let root = el(
            "body",
            vec![
                el("p", vec![txt("one")]),
                el("span", vec![txt("two"), el("br", vec![])]),
            ],
        );

        assert_eq!(
            import(&root),
            vec![Node::paragraph("one"), Node::text("two"), Node::text("\n")]
        );
    }

    #[test]
    fn test_empty_root_becomes_empty_leaf() {
        assert_eq!(import(&el("body", vec![])), vec![Node::text("")]);
    }

    #[test]
    fn test_empty_mapped_element_holds_empty_leaf() {
        let root = el("body", vec![el("p", vec![ForeignNode::Other])]);
        assert_eq!(import(&root), vec![Node::paragraph("")]);
    }

    #[test]
    fn test_unmapped_element_without_children_becomes_empty_leaf() {
        let root = el("body", vec![el("span", vec![])]);
        assert_eq!(import(&root), vec![Node::text("")]);
    }

    #[test]
    fn test_text_payload_is_literal() {
        let root = el("body", vec![el("p", vec![txt("  a <b> & c  ")])]);
        assert_eq!(import(&root), vec![Node::paragraph("  a <b> & c  ")]);
    }

    #[test]
    fn test_unmapped_tags_are_elided() {
        let root = el(
            "body",
            vec![el(
                "p",
                vec![
                    txt("plain "),
                    el("strong", vec![txt("bold")]),
                    el("em", vec![el("a", vec![txt(" link")])]),
                ],
            )],
        );

        assert_eq!(
            import(&root),
            vec![Node::Paragraph {
                children: vec![Node::text("plain "), Node::text("bold"), Node::text(" link")],
            }]
        );
    }

    #[test]
    fn test_pre_code_becomes_code_block() {
        let root = el(
            "body",
            vec![el("pre", vec![el("code", vec![txt("fn main() {}\n")])])],
        );
        assert_eq!(import(&root), vec![Node::code_block("fn main() {}\n")]);
    }

    #[test]
    fn test_whitespace_kept_inside_pre() {
        let root = el("body", vec![el("pre", vec![txt("a"), txt("   "), txt("b")])]);
        assert_eq!(
            import(&root),
            vec![Node::CodeBlock {
                children: vec![Node::text("a"), Node::text("   "), Node::text("b")],
            }]
        );
    }

    #[test]
    fn test_blank_text_between_blocks_is_dropped() {
        let root = el(
            "body",
            vec![txt("\n  "), el("p", vec![txt("a")]), txt("\n"), el("p", vec![txt("b")])],
        );
        assert_eq!(import(&root), vec![Node::paragraph("a"), Node::paragraph("b")]);
    }

    #[test]
    fn test_blank_text_kept_when_configured() {
        let config = ImportConfig {
            skip_blank_text: false,
            ..ImportConfig::default()
        };
        let root = el("body", vec![txt(" "), el("p", vec![txt("a")])]);
        assert_eq!(
            import_foreign_tree(&root, &config),
            vec![Node::text(" "), Node::paragraph("a")]
        );
    }

    #[test]
    fn test_data_type_attribute_maps_exercise_kinds() {
        let root = el(
            "body",
            vec![el(
                "div",
                vec![
                    el("div", vec![el("div", vec![txt("Q")]).with_attr("data-type", "paragraph")])
                        .with_attr("data-type", "question"),
                    el("div", vec![el("div", vec![txt("S")])]).with_attr("data-type", "solution"),
                ],
            )
            .with_attr("data-type", "exercise")],
        );

        assert_eq!(
            import(&root),
            vec![Node::exercise(
                Node::default_question("Q"),
                Node::default_solution("S"),
            )]
        );
    }

    #[test]
    fn test_data_type_ignored_when_disabled() {
        let config = ImportConfig {
            honor_data_type: false,
            ..ImportConfig::default()
        };
        let root = el(
            "body",
            vec![el("span", vec![txt("x")]).with_attr("data-type", "question")],
        );
        assert_eq!(import_foreign_tree(&root, &config), vec![Node::text("x")]);
    }

    #[test]
    fn test_text_kind_is_never_an_element() {
        let mut config = ImportConfig::default();
        config.tag_map.insert("mark".to_string(), NodeKind::Text);
        let root = el("body", vec![el("mark", vec![txt("hi")])]);
        assert_eq!(import_foreign_tree(&root, &config), vec![Node::text("hi")]);
    }

    #[test]
    fn test_custom_tag_map() {
        let mut config = ImportConfig::default();
        config.tag_map.insert("section".to_string(), NodeKind::Solution);
        let root = el("body", vec![el("section", vec![el("p", vec![txt("x")])])]);
        assert_eq!(
            import_foreign_tree(&root, &config),
            vec![Node::default_solution("x")]
        );
    }

    #[test]
    fn test_text_root() {
        assert_eq!(import(&txt("loose")), vec![Node::text("loose")]);
        assert_eq!(import(&ForeignNode::Other), Vec::<Node>::new());
    }
}
