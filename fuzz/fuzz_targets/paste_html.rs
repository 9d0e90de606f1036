// SPDX-License-Identifier: AGPL-3.0-or-later
#![no_main]

use exercise_core::seed::initial_document;
use exercise_core::{normalize, ClipboardData, Editor, NodeKind};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(html) = std::str::from_utf8(data) else {
        return;
    };

    let mut editor = Editor::with_defaults(initial_document());
    let _ = editor.select_end_of(&[0, 1]);
    if editor.insert_data(&ClipboardData::html(html, html)).is_err() {
        return;
    }

    let mut doc = editor.into_document();
    assert!(doc.children.iter().all(|child| child.kind() == NodeKind::Exercise));
    assert!(normalize(&mut doc).is_clean());
});
