#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (&str, &str)| {
    // Arbitrary input must either load or return an error, and any loaded
    // index must survive arbitrary terms and snippet extraction
    let (raw, term) = data;
    if let Ok(index) = docsift::load_index(raw) {
        for hit in index.query(term).hits() {
            let _ = hit.snippet(40);
        }
    }
});
