// SPDX-License-Identifier: AGPL-3.0-or-later
//! Starter document

use crate::ast::{Document, Node};

/// Two canonical exercises shown when an editor opens without content
pub fn initial_document() -> Document {
    Document::from_nodes(vec![
        starter("What is the capital of Germany?"),
        starter("Question2?"),
    ])
}

fn starter(question: &str) -> Node {
    Node::exercise(
        Node::default_question(question),
        Node::solution(vec![Node::paragraph("Paragraph 1"), Node::paragraph("Paragraph 2")]),
    )
}
