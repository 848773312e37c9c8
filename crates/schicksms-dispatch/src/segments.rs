// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SMS length and segment count.

use serde::Serialize;

/// Characters per segment once a message is split (UDH takes the rest).
pub const CONCAT_SEGMENT_CHARS: usize = 153;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SegmentInfo {
    pub length: usize,
    pub segments: usize,
    pub max_length: usize,
}

/// Count characters and the segments needed to send `message`.
pub fn calculate_segments(message: &str, max_length: usize) -> SegmentInfo {
    let length = message.chars().count();
    let segments = if length <= max_length {
        1
    } else {
        1 + (length - max_length).div_ceil(CONCAT_SEGMENT_CHARS)
    };
    SegmentInfo {
        length,
        segments,
        max_length,
    }
}
