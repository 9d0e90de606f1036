// SPDX-License-Identifier: AGPL-3.0-or-later
//! Native fragment clipboard format
//!
//! Copying out of the editor places the selected nodes on the clipboard as a
//! JSON array, so pasting them back keeps their exact structure.

use crate::ast::Node;
use crate::traits::{ImportConfig, ImportError, Importer, Result};

/// MIME type of native fragment payloads
pub const FRAGMENT_MIME: &str = "application/x-exercise-fragment";

/// Native fragment paste handler
pub struct FragmentImporter;

impl FragmentImporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FragmentImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Importer for FragmentImporter {
    fn mime(&self) -> &'static str {
        FRAGMENT_MIME
    }

    fn import(&self, payload: &str, _config: &ImportConfig) -> Result<Vec<Node>> {
        let nodes: Vec<Node> =
            serde_json::from_str(payload).map_err(|e| ImportError::Unparseable {
                mime: FRAGMENT_MIME.to_string(),
                message: e.to_string(),
            })?;

        if nodes.is_empty() {
            return Err(ImportError::Empty {
                mime: FRAGMENT_MIME.to_string(),
            });
        }
        Ok(nodes)
    }
}

/// Serialize nodes into a fragment payload
pub fn encode_fragment(nodes: &[Node]) -> String {
    // Serializing a node tree cannot fail
    serde_json::to_string(nodes).unwrap_or_else(|_| "[]".to_string())
}
