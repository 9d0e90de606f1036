// SPDX-License-Identifier: AGPL-3.0-or-later
//! Exercise Core - Structured exercise documents
//!
//! This crate provides:
//! - A document tree of exercises, each a question paired with a solution
//! - A normalizer that repairs the exercise shape after every edit
//! - Clipboard importers for native fragments and pasted HTML
//! - An editor that applies operations, pastes, copies and keeps a selection
//! - HTML and outline renderers

pub mod ast;
pub mod config;
pub mod editor;
pub mod import;
pub mod normalize;
pub mod ops;
pub mod render;
pub mod seed;
pub mod selection;
pub mod traits;

pub use ast::{Document, Node, NodeKind};
pub use config::{ConfigError, EditorConfig};
pub use editor::{ClipboardData, Editor, PasteOutcome, PasteSource};
pub use normalize::{normalize, NormalizeConfig, NormalizeReport, Normalizer, Repair};
pub use ops::{EditError, Operation};
pub use render::{HtmlRenderer, OutlineRenderer};
pub use selection::{Point, Selection};
pub use traits::{ImportConfig, ImportError, Importer, ImporterRegistry, RenderConfig, Renderer, Result};
