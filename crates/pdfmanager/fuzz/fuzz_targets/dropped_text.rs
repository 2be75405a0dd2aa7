#![no_main]

use libfuzzer_sys::fuzz_target;
use pdfmanager::drop_target::{DropTarget, parse_dropped_text};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let paths = parse_dropped_text(text);
        let outcome = DropTarget::new().drop_text(text);
        assert!(outcome.accepted.len() <= paths.len());
    }
});
