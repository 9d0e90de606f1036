// SPDX-License-Identifier: AGPL-3.0-or-later
//! Document renderers
//!
//! [`HtmlRenderer`] produces the markup the edit surface shows and the
//! `text/html` flavour of a copy. Every element carries a `data-type`
//! attribute, so the output pastes back into the same structure.

use crate::ast::{Document, Node, NodeKind};
use crate::traits::{RenderConfig, RenderError, Renderer};
use std::fmt::Write;

/// HTML renderer
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render a node sequence, e.g. a copied fragment
    pub fn render_nodes(&self, nodes: &[Node], config: &RenderConfig) -> Result<String, RenderError> {
        let mut output = String::new();
        for node in nodes {
            render_node(&mut output, node, config)?;
        }
        Ok(output)
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for HtmlRenderer {
    fn name(&self) -> &'static str {
        "html"
    }

    fn render(&self, doc: &Document, config: &RenderConfig) -> Result<String, RenderError> {
        self.render_nodes(&doc.children, config)
    }
}

fn render_node(output: &mut String, node: &Node, config: &RenderConfig) -> std::fmt::Result {
    match node {
        Node::Text { text } => {
            output.push_str(&escape_html(text));
        }
        Node::CodeBlock { children } => {
            output.push_str("<pre data-type=\"code-block\"><code>");
            for child in children {
                render_node(output, child, config)?;
            }
            output.push_str("</code></pre>");
        }
        element => {
            let kind = element.kind();
            write!(output, "<div data-type=\"{}\"", kind.label())?;
            if config.inline_styles {
                if let Some(style) = container_style(kind) {
                    write!(output, " style=\"{}\"", style)?;
                }
            }
            output.push('>');
            for child in element.children() {
                render_node(output, child, config)?;
            }
            output.push_str("</div>");
        }
    }
    Ok(())
}

fn container_style(kind: NodeKind) -> Option<&'static str> {
    match kind {
        NodeKind::Exercise => Some("border: blue solid 1px; border-radius: 2px; padding: 0.3em"),
        NodeKind::Question => Some(
            "border: orange solid 1px; border-radius: 2px; padding: 0.3em; margin-bottom: 0.2em",
        ),
        NodeKind::Solution => Some(
            "border: green solid 1px; border-radius: 2px; padding: 0.3em; margin-bottom: 0.2em",
        ),
        NodeKind::Paragraph => Some(
            "border: pink solid 1px; border-radius: 2px; padding: 0.3em; margin-bottom: 0.2em",
        ),
        NodeKind::CodeBlock | NodeKind::Text => None,
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Indented structure dump, one `type: <kind>` line per node
pub struct OutlineRenderer;

impl OutlineRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OutlineRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for OutlineRenderer {
    fn name(&self) -> &'static str {
        "outline"
    }

    fn render(&self, doc: &Document, config: &RenderConfig) -> Result<String, RenderError> {
        Ok(doc.outline_with(&config.indent))
    }
}

/// Renderer registered under `name`
pub fn renderer_for(name: &str) -> Option<Box<dyn Renderer>> {
    match name {
        "html" => Some(Box::new(HtmlRenderer::new())),
        "outline" => Some(Box::new(OutlineRenderer::new())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plain() -> RenderConfig {
        RenderConfig {
            inline_styles: false,
            ..RenderConfig::default()
        }
    }

    #[test]
    fn test_render_structure() {
        let doc = Document::from_nodes(vec![Node::exercise(
            Node::default_question("Q?"),
            Node::solution(vec![Node::code_block("a < b")]),
        )]);
        let html = HtmlRenderer::new().render(&doc, &plain()).unwrap();
        assert_eq!(
            html,
            "<div data-type=\"exercise\">\
             <div data-type=\"question\"><div data-type=\"paragraph\">Q?</div></div>\
             <div data-type=\"solution\"><pre data-type=\"code-block\"><code>a &lt; b</code></pre></div>\
             </div>"
        );
    }

    #[test]
    fn test_render_styles() {
        let html = HtmlRenderer::new()
            .render_nodes(&[Node::default_question("Q")], &RenderConfig::default())
            .unwrap();
        assert!(html.starts_with("<div data-type=\"question\" style=\"border: orange solid 1px;"));
        assert!(html.contains("border: pink solid 1px"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape_html(r#"<a href="x">&</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }

    #[cfg(feature = "html")]
    #[test]
    fn test_html_reimports_to_same_tree() {
        use crate::import::HtmlImporter;
        use crate::traits::{ImportConfig, Importer};

        let doc = crate::seed::initial_document();
        let html = HtmlRenderer::new().render(&doc, &RenderConfig::default()).unwrap();
        let nodes = HtmlImporter::new().import(&html, &ImportConfig::default()).unwrap();
        assert_eq!(nodes, doc.children);
    }

    #[cfg(feature = "html")]
    #[test]
    fn test_code_block_reimports() {
        use crate::import::HtmlImporter;
        use crate::traits::{ImportConfig, Importer};

        let nodes = vec![Node::code_block("fn main() {\n    1 < 2;\n}")];
        let html = HtmlRenderer::new().render_nodes(&nodes, &plain()).unwrap();
        let back = HtmlImporter::new().import(&html, &ImportConfig::default()).unwrap();
        assert_eq!(back, nodes);
    }

    #[test]
    fn test_outline_indent() {
        let doc = Document::from_nodes(vec![Node::default_solution("S")]);
        let config = RenderConfig {
            indent: "  ".to_string(),
            ..RenderConfig::default()
        };
        let outline = OutlineRenderer::new().render(&doc, &config).unwrap();
        assert_eq!(outline, "type: solution\n  type: paragraph\n    type: text: S\n");
    }

    #[test]
    fn test_renderer_for() {
        assert_eq!(renderer_for("html").map(|r| r.name()), Some("html"));
        assert_eq!(renderer_for("outline").map(|r| r.name()), Some("outline"));
        assert!(renderer_for("pdf").is_none());
    }
}
