// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use core::fmt;

use serde::Serialize;

/// Outcome of decoding the peripheral device type of standard INQUIRY
/// data. Decides which identify command may be sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PeripheralClassification {
    /// Type 0x00: disks. IDENTIFY DEVICE via ATA PASS-THROUGH (12).
    DirectAccessBlock,
    /// Type 0x05: CD/DVD. IDENTIFY PACKET DEVICE via ATA PASS-THROUGH (16).
    PacketDevice,
    /// Anything else. No identify command is legal.
    Unsupported(u8),
}

impl PeripheralClassification {
    pub const DIRECT_ACCESS_BLOCK: u8 = 0x00;
    pub const CD_DVD: u8 = 0x05;

    /// Map the 5-bit peripheral device type.
    pub fn from_peripheral_type(device_type: u8) -> Self {
        match device_type & 0x1F {
            Self::DIRECT_ACCESS_BLOCK => Self::DirectAccessBlock,
            Self::CD_DVD => Self::PacketDevice,
            other => Self::Unsupported(other),
        }
    }

    pub fn is_packet_device(self) -> bool {
        matches!(self, Self::PacketDevice)
    }
}

impl fmt::Display for PeripheralClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectAccessBlock => f.write_str("Direct-access block (disk)"),
            Self::PacketDevice => f.write_str("CD/DVD (packet device)"),
            Self::Unsupported(t) => write!(f, "unsupported peripheral type 0x{t:02x}"),
        }
    }
}
