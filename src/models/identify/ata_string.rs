// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::fmt;

use serde::{Serialize, Serializer};

/// Swap every adjacent byte pair: `out[2i] = in[2i+1]`, `out[2i+1] = in[2i]`.
///
/// Applying it twice gives back the input. A trailing odd byte is copied
/// unchanged.
pub fn swap_pairs(src: &[u8]) -> Vec<u8> {
    let mut out = src.to_vec();
    for pair in out.chunks_exact_mut(2) {
        pair.swap(0, 1);
    }
    out
}

/// Decoded ATA string, kept byte-for-byte: padding is not trimmed and
/// non-ASCII bytes are not replaced.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AtaString(Vec<u8>);

impl AtaString {
    /// Decode from the raw words of the field.
    pub fn from_wire(raw: &[u8]) -> Self {
        Self(swap_pairs(raw))
    }

    /// Take bytes that are already in reading order.
    pub fn from_host(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// `true` when the field holds nothing but spaces and NULs.
    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|&b| b == b' ' || b == 0)
    }

    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }
}

impl fmt::Debug for AtaString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_string_lossy())
    }
}

impl fmt::Display for AtaString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl Serialize for AtaString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_lossy())
    }
}
