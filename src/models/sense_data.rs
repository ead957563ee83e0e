// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::fmt;

/// Size of the sense buffer handed to every SG_IO request.
pub const SENSE_LEN: usize = 32;

/// Response code of *current, descriptor-format* sense data (SPC-4 § 4.5.2).
pub const DESCRIPTOR_FORMAT_CURRENT: u8 = 0x72;

/// Descriptor type code of the ATA Status Return descriptor (SAT § 12.2.2.6).
pub const ATA_STATUS_RETURN: u8 = 0x09;
/// Additional length of the ATA Status Return descriptor.
pub const ATA_STATUS_RETURN_LEN: u8 = 0x0C;

/// Offset of the first sense-data descriptor in descriptor-format sense.
pub const FIRST_DESCRIPTOR: usize = 8;

/// Sense bytes written by the transport on completion.
///
/// Each command owns its own zeroed buffer; nothing is carried between
/// commands.
#[derive(Clone, PartialEq, Eq)]
pub struct SenseBuffer(pub [u8; SENSE_LEN]);

impl Default for SenseBuffer {
    fn default() -> Self {
        Self([0u8; SENSE_LEN])
    }
}

impl SenseBuffer {
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.0
    }

    pub fn response_code(&self) -> u8 {
        self.0[0]
    }

    /// Type code and additional length of the first descriptor.
    pub fn first_descriptor(&self) -> [u8; 2] {
        [self.0[FIRST_DESCRIPTOR], self.0[FIRST_DESCRIPTOR + 1]]
    }

    /// `true` when the buffer holds descriptor-format sense whose first
    /// descriptor is an ATA Status Return.
    ///
    /// The two marker bytes are an opaque contract: nothing else in the
    /// descriptor is interpreted.
    pub fn has_ata_status_return(&self) -> bool {
        self.response_code() == DESCRIPTOR_FORMAT_CURRENT
            && self.first_descriptor() == [ATA_STATUS_RETURN, ATA_STATUS_RETURN_LEN]
    }
}

impl fmt::Debug for SenseBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SenseBuffer")
            .field(
                "response_code",
                &format_args!("{:#04x}", self.response_code()),
            )
            .field("first_descriptor", &format_args!("{:02X?}", self.first_descriptor()))
            .field("bytes", &format_args!("{:02X?}", &self.0[..]))
            .finish()
    }
}
