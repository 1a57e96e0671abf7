//! Fuzz target for project JSON parsing.
//!
//! Feeds arbitrary bytes to the project parser and, when they parse, runs
//! the invariant check and a round-trip through the writer.

#![no_main]

use libfuzzer_sys::fuzz_target;
use roimap::project::io_json::{from_json_slice, from_json_str, to_json_string};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(project) = from_json_slice(data) else {
        return;
    };
    let _ = project.check();

    if let Ok(json) = to_json_string(&project) {
        let _ = from_json_str(&json);
    }
});
