// SPDX-License-Identifier: AGPL-3.0-or-later
//! Importer and Renderer traits for clipboard payloads and presentation

use crate::ast::{Document, Node, NodeKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Error type for importing a clipboard payload
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Unparseable {mime} payload: {message}")]
    Unparseable { mime: String, message: String },

    #[error("{mime} payload holds no content")]
    Empty { mime: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ImportError>;

/// Error type for rendering a document
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

/// Configuration for importing foreign markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Foreign tag name (lowercase) to node kind; other tags are elided
    pub tag_map: BTreeMap<String, NodeKind>,
    /// Drop whitespace-only text outside of `pre`
    pub skip_blank_text: bool,
    /// Let a `data-type` attribute naming a node kind win over the tag map
    pub honor_data_type: bool,
}

impl ImportConfig {
    /// Tag table used when none is configured
    pub fn default_tag_map() -> BTreeMap<String, NodeKind> {
        let mut map = BTreeMap::new();
        for tag in ["p", "div", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "li"] {
            map.insert(tag.to_string(), NodeKind::Paragraph);
        }
        map.insert("pre".to_string(), NodeKind::CodeBlock);
        map
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            tag_map: Self::default_tag_map(),
            skip_blank_text: true,
            honor_data_type: true,
        }
    }
}

/// Configuration for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Emit the border styles of each container
    pub inline_styles: bool,
    /// Indentation string for nested output
    pub indent: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            inline_styles: true,
            indent: "    ".to_string(),
        }
    }
}

/// Importer trait: convert a clipboard payload into document nodes
pub trait Importer: Send + Sync {
    /// The clipboard MIME type this importer reads
    fn mime(&self) -> &'static str;

    /// Convert a payload into an ordered node sequence for insertion
    fn import(&self, payload: &str, config: &ImportConfig) -> Result<Vec<Node>>;
}

/// Renderer trait: present a document
pub trait Renderer: Send + Sync {
    /// Short name of the output (`html`, `outline`)
    fn name(&self) -> &'static str;

    /// Render a Document to a string
    fn render(&self, doc: &Document, config: &RenderConfig) -> std::result::Result<String, RenderError>;
}

/// Importers in paste preference order
pub struct ImporterRegistry {
    importers: Vec<Box<dyn Importer>>,
}

impl ImporterRegistry {
    pub fn new() -> Self {
        Self {
            importers: Vec::new(),
        }
    }

    /// Add an importer after the ones already registered, replacing any
    /// importer for the same MIME type in place
    pub fn register(&mut self, importer: Box<dyn Importer>) {
        let mime = importer.mime();
        match self.importers.iter_mut().find(|i| i.mime() == mime) {
            Some(slot) => *slot = importer,
            None => self.importers.push(importer),
        }
    }

    pub fn get(&self, mime: &str) -> Option<&dyn Importer> {
        self.importers
            .iter()
            .find(|i| i.mime() == mime)
            .map(|i| i.as_ref())
    }

    /// Registered importers, most preferred first
    pub fn iter(&self) -> impl Iterator<Item = &dyn Importer> {
        self.importers.iter().map(|i| i.as_ref())
    }

    pub fn len(&self) -> usize {
        self.importers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.importers.is_empty()
    }
}

impl Default for ImporterRegistry {
    /// Native fragments first, then HTML
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(crate::import::FragmentImporter::new()));
        #[cfg(feature = "html")]
        registry.register(Box::new(crate::import::HtmlImporter::new()));
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    impl Importer for Upper {
        fn mime(&self) -> &'static str {
            "text/x-upper"
        }

        fn import(&self, payload: &str, _config: &ImportConfig) -> Result<Vec<Node>> {
            Ok(vec![Node::text(payload.to_uppercase())])
        }
    }

    #[test]
    fn test_default_tag_map() {
        let map = ImportConfig::default_tag_map();
        assert_eq!(map.get("p"), Some(&NodeKind::Paragraph));
        assert_eq!(map.get("h3"), Some(&NodeKind::Paragraph));
        assert_eq!(map.get("pre"), Some(&NodeKind::CodeBlock));
        assert_eq!(map.get("span"), None);
    }

    #[test]
    fn test_registry_order_and_lookup() {
        let mut registry = ImporterRegistry::default();
        let before = registry.len();
        registry.register(Box::new(Upper));
        assert_eq!(registry.len(), before + 1);
        assert_eq!(registry.iter().last().map(|i| i.mime()), Some("text/x-upper"));

        let nodes = registry
            .get("text/x-upper")
            .unwrap()
            .import("abc", &ImportConfig::default())
            .unwrap();
        assert_eq!(nodes, vec![Node::text("ABC")]);
    }

    #[test]
    fn test_registry_replaces_same_mime() {
        let mut registry = ImporterRegistry::new();
        registry.register(Box::new(Upper));
        registry.register(Box::new(Upper));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_import_config_from_toml() {
        let config: ImportConfig = toml::from_str(
            r#"
            skip_blank_text = false
            [tag_map]
            section = "exercise"
            "#,
        )
        .unwrap();
        assert!(!config.skip_blank_text);
        assert!(config.honor_data_type);
        assert_eq!(config.tag_map.len(), 1);
        assert_eq!(config.tag_map.get("section"), Some(&NodeKind::Exercise));
    }
}
