#![no_main]

use libfuzzer_sys::fuzz_target;
use pdfmanager::range::PageRange;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data)
        && let Ok(range) = PageRange::parse(text)
    {
        for token in range.tokens() {
            assert!(token.start() >= 1 && token.start() <= token.end());
        }
        let _ = range.validate(usize::MAX);
        let _ = range.file_label();
    }
});
