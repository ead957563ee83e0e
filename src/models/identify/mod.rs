// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! IDENTIFY DEVICE / IDENTIFY PACKET DEVICE data: the raw 512-byte block
//! and its decoded view.

pub mod ata_string;
pub mod layout;
pub mod record;

use std::fmt;

use zerocopy::byteorder::{LittleEndian, U16};

pub use self::{
    ata_string::AtaString,
    layout::{IDENTIFY_FIELDS, IDENTIFY_LEN, IDENTIFY_WORDS, IdentifyWord, StringField},
    record::IdentifyRecord,
};
use self::layout::FieldKind;

/// The 512 bytes returned by a successful identify command, words in
/// device (little-endian) order.
#[derive(Clone, PartialEq, Eq)]
pub struct RawIdentifyBlock(pub [u8; IDENTIFY_LEN]);

impl Default for RawIdentifyBlock {
    fn default() -> Self {
        Self([0u8; IDENTIFY_LEN])
    }
}

impl RawIdentifyBlock {
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.0
    }

    /// A block with no set bit means the device did not answer.
    pub fn is_all_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// The block viewed as device-order words.
    pub fn words(&self) -> [U16<LittleEndian>; IDENTIFY_WORDS] {
        zerocopy::transmute!(self.0)
    }
}

impl fmt::Debug for RawIdentifyBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawIdentifyBlock")
            .field("len", &self.0.len())
            .field("head", &format_args!("{:02X?}", &self.0[..16]))
            .finish()
    }
}

/// Byte order a block arrives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockLayout {
    /// As returned by the device: little-endian words, byte-paired strings.
    Wire,
    /// As returned by `HDIO_GET_IDENTITY`: words and strings already fixed
    /// up by the kernel.
    Host,
}

/// Decode an IDENTIFY block as returned by the device.
///
/// Pure; each string field is swapped exactly once and each attribute word
/// is read as little-endian. Bytes outside [`IDENTIFY_FIELDS`] are ignored.
pub fn decode(raw: &RawIdentifyBlock) -> IdentifyRecord {
    decode_as(raw, BlockLayout::Wire)
}

/// Decode a block obtained through the legacy `HDIO_GET_IDENTITY` ioctl.
pub fn decode_legacy(raw: &RawIdentifyBlock) -> IdentifyRecord {
    decode_as(raw, BlockLayout::Host)
}

pub fn decode_as(raw: &RawIdentifyBlock, layout: BlockLayout) -> IdentifyRecord {
    let words = raw.words();
    let mut record = IdentifyRecord::empty();

    for spec in IDENTIFY_FIELDS {
        match spec.kind {
            FieldKind::AtaString(field) => {
                let bytes = &raw.0[spec.byte_range()];
                let value = match layout {
                    BlockLayout::Wire => AtaString::from_wire(bytes),
                    BlockLayout::Host => AtaString::from_host(bytes),
                };
                record.set_string(field, value);
            },
            FieldKind::Word(word) => {
                let value = match layout {
                    BlockLayout::Wire => words[spec.word_offset].get(),
                    BlockLayout::Host => {
                        let at = spec.word_offset * 2;
                        u16::from_ne_bytes([raw.0[at], raw.0[at + 1]])
                    },
                };
                record.words.insert(word, value);
            },
        }
    }

    record
}
