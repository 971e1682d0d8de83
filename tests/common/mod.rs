//! Shared test utilities for integration tests.
//!
//! Raw tag builders produce byte-exact ID3v2 data independently of the
//! library's own serializer, so parsing can be checked against hand-laid
//! input.
//!
//! Note: `#![allow(dead_code)]` is required because each integration test file
//! compiles as a separate crate and may only use a subset of these helpers.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Encodes a value as 4 sync-safe bytes.
pub fn syncsafe(value: u32) -> [u8; 4] {
    assert!(value < 1 << 28, "value {} does not fit 28 bits", value);
    [
        (value >> 21) as u8 & 0x7F,
        (value >> 14) as u8 & 0x7F,
        (value >> 7) as u8 & 0x7F,
        value as u8 & 0x7F,
    ]
}

/// Builds a raw frame. The size field is sync-safe for `major >= 4`.
pub fn raw_frame(major: u8, id: &[u8; 4], flags: [u8; 2], body: &[u8]) -> Vec<u8> {
    let size = body.len() as u32;
    let mut data = id.to_vec();
    if major >= 4 {
        data.extend_from_slice(&syncsafe(size));
    } else {
        data.extend_from_slice(&size.to_be_bytes());
    }
    data.extend_from_slice(&flags);
    data.extend_from_slice(body);
    data
}

/// Builds a raw text frame with a Latin-1 body.
pub fn raw_text_frame(major: u8, id: &[u8; 4], text: &str) -> Vec<u8> {
    let mut body = vec![0u8];
    body.extend_from_slice(text.as_bytes());
    raw_frame(major, id, [0, 0], &body)
}

/// Builds a raw tag: header declaring `frames + padding`, the frames, then
/// `padding` zero bytes.
pub fn raw_tag(major: u8, frames: &[Vec<u8>], padding: usize) -> Vec<u8> {
    let body: Vec<u8> = frames.concat();
    let mut data = b"ID3".to_vec();
    data.extend_from_slice(&[major, 0, 0]);
    data.extend_from_slice(&syncsafe((body.len() + padding) as u32));
    data.extend_from_slice(&body);
    data.resize(data.len() + padding, 0);
    data
}

/// Generates deterministic pseudo-random audio bytes.
pub fn random_payload(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = vec![0u8; len];
    rng.fill_bytes(&mut data);
    // Make sure the payload cannot be mistaken for a tag
    if let Some(first) = data.first_mut() {
        *first = 0xFF;
    }
    data
}

/// Writes `parts` concatenated into `dir/name` and returns the path.
pub fn write_file(dir: &Path, name: &str, parts: &[&[u8]]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, parts.concat()).unwrap();
    path
}
