// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Fields of the 512-byte IDENTIFY (PACKET) DEVICE data that get decoded.
//!
//! Tracking another field is a new row in [`IDENTIFY_FIELDS`]; the decoder
//! walks the table and does not know about individual fields.

use serde::Serialize;

/// Bytes in one IDENTIFY data block.
pub const IDENTIFY_LEN: usize = 512;
/// 16-bit words in one IDENTIFY data block.
pub const IDENTIFY_WORDS: usize = IDENTIFY_LEN / 2;

/// ATA strings: two characters per word, first character in the high byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum StringField {
    Serial,
    FirmwareRevision,
    Model,
}

/// Single-word attributes, named after their role. The discriminant is the
/// word offset.
#[repr(usize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum IdentifyWord {
    /// General configuration.
    Configuration = 0,
    QueueDepth = 75,
    /// SATA capabilities; 0x0000 or 0xFFFF on parallel ATA.
    SataCapabilities = 76,
    CommandSetSupported1 = 82,
    CommandSetSupported2 = 83,
    CommandSetExtension = 84,
    CommandSetEnabled1 = 85,
    CommandSetEnabled2 = 86,
    CommandSetDefault = 87,
    /// Time required for SECURITY ERASE UNIT.
    SecurityEraseTime = 89,
    /// Time required for enhanced SECURITY ERASE UNIT.
    EnhancedSecurityEraseTime = 90,
    CurrentApm = 91,
    CurrentAam = 94,
    Wwn0 = 108,
    Wwn1 = 109,
    Wwn2 = 110,
    Wwn3 = 111,
    /// Security status / device lock function.
    DeviceLock = 128,
    NominalRotationRate = 217,
}

impl IdentifyWord {
    #[inline]
    pub fn offset(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Byte pairs swapped on the way out.
    AtaString(StringField),
    /// Little-endian word corrected to host order.
    Word(IdentifyWord),
}

/// One row of the layout table: `words` words starting at `word_offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub word_offset: usize,
    pub words: usize,
    pub kind: FieldKind,
}

impl FieldSpec {
    const fn string(field: StringField, word_offset: usize, len_bytes: usize) -> Self {
        Self {
            word_offset,
            words: len_bytes / 2,
            kind: FieldKind::AtaString(field),
        }
    }

    const fn word(word: IdentifyWord) -> Self {
        Self {
            word_offset: word as usize,
            words: 1,
            kind: FieldKind::Word(word),
        }
    }

    /// Byte range of this field inside the block.
    #[inline]
    pub fn byte_range(&self) -> core::ops::Range<usize> {
        self.word_offset * 2..(self.word_offset + self.words) * 2
    }
}

pub const IDENTIFY_FIELDS: &[FieldSpec] = &[
    FieldSpec::string(StringField::Serial, 10, 20),
    FieldSpec::string(StringField::FirmwareRevision, 23, 8),
    FieldSpec::string(StringField::Model, 27, 40),
    FieldSpec::word(IdentifyWord::Configuration),
    FieldSpec::word(IdentifyWord::QueueDepth),
    FieldSpec::word(IdentifyWord::SataCapabilities),
    FieldSpec::word(IdentifyWord::CommandSetSupported1),
    FieldSpec::word(IdentifyWord::CommandSetSupported2),
    FieldSpec::word(IdentifyWord::CommandSetExtension),
    FieldSpec::word(IdentifyWord::CommandSetEnabled1),
    FieldSpec::word(IdentifyWord::CommandSetEnabled2),
    FieldSpec::word(IdentifyWord::CommandSetDefault),
    FieldSpec::word(IdentifyWord::SecurityEraseTime),
    FieldSpec::word(IdentifyWord::EnhancedSecurityEraseTime),
    FieldSpec::word(IdentifyWord::CurrentApm),
    FieldSpec::word(IdentifyWord::CurrentAam),
    FieldSpec::word(IdentifyWord::Wwn0),
    FieldSpec::word(IdentifyWord::Wwn1),
    FieldSpec::word(IdentifyWord::Wwn2),
    FieldSpec::word(IdentifyWord::Wwn3),
    FieldSpec::word(IdentifyWord::DeviceLock),
    FieldSpec::word(IdentifyWord::NominalRotationRate),
];
