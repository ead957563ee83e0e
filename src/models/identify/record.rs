// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::collections::BTreeMap;

use bitflags::bitflags;
use serde::Serialize;

use crate::models::identify::{
    ata_string::AtaString,
    layout::{IdentifyWord, StringField},
};

bitflags! {
    /// Words 82 (supported) and 85 (enabled).
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CommandSet1: u16 {
        const SMART = 1 << 0;
        const SECURITY = 1 << 1;
        const POWER_MANAGEMENT = 1 << 3;
        const WRITE_CACHE = 1 << 5;
        const HPA = 1 << 10;
    }
}

bitflags! {
    /// Words 83 (supported) and 86 (enabled).
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CommandSet2: u16 {
        const DOWNLOAD_MICROCODE = 1 << 0;
        const CFA = 1 << 2;
        const APM = 1 << 3;
        const PUIS = 1 << 5;
        const AAM = 1 << 9;
    }
}

bitflags! {
    /// Word 128, security status.
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DeviceLock: u16 {
        const LOCKED = 1 << 2;
        const FROZEN = 1 << 3;
        const COUNT_EXPIRED = 1 << 4;
        const ENHANCED_ERASE = 1 << 5;
        const LEVEL_MAXIMUM = 1 << 8;
    }
}

/// Word 217.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RotationRate {
    NonRotating,
    Rpm(u16),
    NotReported,
}

/// Decoded view of an IDENTIFY data block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentifyRecord {
    pub serial: AtaString,
    pub firmware_revision: AtaString,
    pub model: AtaString,
    /// Attribute words in host order.
    pub words: BTreeMap<IdentifyWord, u16>,
    /// Whether the block came from IDENTIFY PACKET DEVICE.
    pub is_packet_device: bool,
}

impl IdentifyRecord {
    pub(crate) fn empty() -> Self {
        Self {
            serial: AtaString::default(),
            firmware_revision: AtaString::default(),
            model: AtaString::default(),
            words: BTreeMap::new(),
            is_packet_device: false,
        }
    }

    pub(crate) fn set_string(&mut self, field: StringField, value: AtaString) {
        match field {
            StringField::Serial => self.serial = value,
            StringField::FirmwareRevision => self.firmware_revision = value,
            StringField::Model => self.model = value,
        }
    }

    /// Host-order value of an attribute word; 0 if it was not decoded.
    #[inline]
    pub fn word(&self, word: IdentifyWord) -> u16 {
        self.words.get(&word).copied().unwrap_or(0)
    }

    pub fn configuration(&self) -> u16 {
        self.word(IdentifyWord::Configuration)
    }

    /// Bit 15 of the configuration word marks an ATAPI device.
    pub fn is_atapi(&self) -> bool {
        self.configuration() & 0x8000 != 0
    }

    /// ATAPI command packet set (configuration bits 12..8).
    pub fn atapi_device_type(&self) -> Option<u8> {
        self.is_atapi()
            .then(|| ((self.configuration() >> 8) & 0x1F) as u8)
    }

    /// Maximum queue depth minus one lives in bits 4..0.
    pub fn queue_depth(&self) -> u16 {
        (self.word(IdentifyWord::QueueDepth) & 0x1F) + 1
    }

    /// SATA capabilities, `None` on devices that do not claim SATA.
    pub fn sata_capabilities(&self) -> Option<u16> {
        match self.word(IdentifyWord::SataCapabilities) {
            0x0000 | 0xFFFF => None,
            w => Some(w),
        }
    }

    pub fn command_set1_supported(&self) -> CommandSet1 {
        CommandSet1::from_bits_truncate(self.word(IdentifyWord::CommandSetSupported1))
    }

    pub fn command_set1_enabled(&self) -> CommandSet1 {
        CommandSet1::from_bits_truncate(self.word(IdentifyWord::CommandSetEnabled1))
    }

    pub fn command_set2_supported(&self) -> CommandSet2 {
        CommandSet2::from_bits_truncate(self.word(IdentifyWord::CommandSetSupported2))
    }

    pub fn command_set2_enabled(&self) -> CommandSet2 {
        CommandSet2::from_bits_truncate(self.word(IdentifyWord::CommandSetEnabled2))
    }

    pub fn device_lock(&self) -> DeviceLock {
        DeviceLock::from_bits_truncate(self.word(IdentifyWord::DeviceLock))
    }

    /// Minutes needed for SECURITY ERASE UNIT (two per unit).
    pub fn security_erase_minutes(&self) -> u32 {
        u32::from(self.word(IdentifyWord::SecurityEraseTime)) * 2
    }

    /// Minutes needed for enhanced SECURITY ERASE UNIT (two per unit).
    pub fn enhanced_security_erase_minutes(&self) -> u32 {
        u32::from(self.word(IdentifyWord::EnhancedSecurityEraseTime)) * 2
    }

    /// Current APM level (low byte of word 91).
    pub fn apm_level(&self) -> u8 {
        (self.word(IdentifyWord::CurrentApm) & 0xFF) as u8
    }

    /// (vendor recommended, current) AAM values from word 94.
    pub fn aam_values(&self) -> (u8, u8) {
        let w = self.word(IdentifyWord::CurrentAam);
        ((w >> 8) as u8, (w & 0xFF) as u8)
    }

    pub fn rotation_rate(&self) -> RotationRate {
        match self.word(IdentifyWord::NominalRotationRate) {
            0x0001 => RotationRate::NonRotating,
            w @ 0x0401..=0xFFFE => RotationRate::Rpm(w),
            _ => RotationRate::NotReported,
        }
    }

    /// World Wide Name from words 108..=111, only for NAA 5 (IEEE
    /// registered).
    pub fn wwn(&self) -> Option<u64> {
        let parts = [
            IdentifyWord::Wwn0,
            IdentifyWord::Wwn1,
            IdentifyWord::Wwn2,
            IdentifyWord::Wwn3,
        ]
        .map(|w| self.word(w));
        if parts[0] & 0xF000 != 0x5000 {
            return None;
        }
        Some(parts.iter().fold(0u64, |acc, &w| (acc << 16) | u64::from(w)))
    }

    /// CompactFlash: signature configuration values, or CFA feature set
    /// bit with the validity pattern of word 83.
    pub fn is_cfa(&self) -> bool {
        matches!(self.configuration(), 0x848A | 0x844A)
            || self.word(IdentifyWord::CommandSetSupported2) & 0xC004 == 0x4004
    }
}
