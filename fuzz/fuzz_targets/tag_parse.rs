//! Fuzz target for Tag::parse with arbitrary byte input.
//!
//! Parsing must never panic and a parsed tag must serialize and parse back
//! to the same frames.
//!
//! Run with: cargo +nightly fuzz run tag_parse

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(Some(tag)) = id3tag::Tag::parse(data) else {
        return;
    };

    assert_eq!(
        tag.tag_size() as usize,
        tag.frames_size() + tag.padding_size()
    );

    // Serialization may legitimately fail (e.g. an oversized tag), but a
    // successful one must parse back to the same frames
    if let Ok(bytes) = tag.to_bytes() {
        let reparsed = id3tag::Tag::parse(&bytes)
            .expect("serialized tag parses")
            .expect("serialized tag is present");
        assert_eq!(reparsed.frames(), tag.frames());
    }
});
