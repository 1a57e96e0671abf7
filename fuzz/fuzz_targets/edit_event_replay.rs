//! Fuzz target for the edit controller.
//!
//! Interprets the input as JSON-lines edit events and drives an editor with
//! every line that parses. No event sequence may panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use roimap::editor::{EditEvent, Editor};
use roimap::project::SurfaceSize;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mut editor = Editor::new(SurfaceSize::default());
    for line in text.lines() {
        let Ok(event) = serde_json::from_str::<EditEvent>(line) else {
            continue;
        };
        let _ = editor.handle(event);
    }
    let _ = editor.scene();
    let _ = editor.to_project();
});
