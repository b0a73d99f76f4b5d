#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parsing never fails, so any panic here is a bug
    let query = docsift::query::parse_query(data);
    let _ = query.is_empty();
});
