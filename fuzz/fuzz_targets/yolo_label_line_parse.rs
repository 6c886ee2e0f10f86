//! Fuzz target for YOLO label row parsing.
//!
//! Feeds arbitrary UTF-8 lines to the row parser and looks for panics or
//! hangs. Comment and blank lines are part of the input space.

#![no_main]

use libfuzzer_sys::fuzz_target;
use labelpad::ir::io_yolo::fuzz_parse_label_line;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };

    let _ = fuzz_parse_label_line(line);
});
