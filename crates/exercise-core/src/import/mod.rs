// SPDX-License-Identifier: AGPL-3.0-or-later
//! Paste-time importers
//!
//! Each importer turns one clipboard payload type into an ordered node
//! sequence. The sequence is not normalized; the editor inserts it at the
//! cursor and the normalizer repairs the result.

pub mod foreign;
pub mod fragment;
#[cfg(feature = "html")]
pub mod html;

pub use foreign::{import_foreign_tree, ForeignImporter, ForeignNode};
pub use fragment::{encode_fragment, FragmentImporter, FRAGMENT_MIME};
#[cfg(feature = "html")]
pub use html::HtmlImporter;

/// MIME type of plain-text clipboard payloads
pub const PLAIN_MIME: &str = "text/plain";

/// MIME type of rich-text clipboard payloads
pub const HTML_MIME: &str = "text/html";
