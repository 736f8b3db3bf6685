#![no_main]

use std::path::Path;

use jpipe::testinfo::{decode_report, parse_report};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let origin = Path::new("fuzz.xml");
    if let Ok(xml) = decode_report(data, origin) {
        if let Ok(doc) = parse_report(&xml, origin) {
            for case in &doc.cases {
                let _ = case.id();
            }
        }
    }
});
