//! Fuzz target for the COCO `annotations` document reader.
//!
//! Run with:
//!   cargo +nightly fuzz run coco_json_parse

#![no_main]

use libfuzzer_sys::fuzz_target;
use labelpad::ir::io_coco_json::from_coco_slice;
use labelpad::ir::FrameSize;

fuzz_target!(|data: &[u8]| {
    // Exports are a few kilobytes; anything far larger is noise.
    if data.len() > 1024 * 1024 {
        return;
    }

    let _ = from_coco_slice(data, FrameSize::REFERENCE);
});
