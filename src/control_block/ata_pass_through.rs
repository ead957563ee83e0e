// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! ATA PASS-THROUGH (12) and (16) CDBs (T10 04-262r8 / SAT).
//!
//! Both variants carry one ATA command with a PIO Data-in protocol, a
//! sector count of one and the control byte
//! `OFF_LINE=0, CK_COND=1, T_DIR=1, BYT_BLOK=1, T_LENGTH=2`, i.e. one
//! 512-byte block is moved from the device and the ATA registers come back
//! in an ATA Status Return sense descriptor.

/// OPERATION CODE: ATA PASS-THROUGH (12).
pub const ATA_PASS_THROUGH_12: u8 = 0xA1;
/// OPERATION CODE: ATA PASS-THROUGH (16).
pub const ATA_PASS_THROUGH_16: u8 = 0x85;

/// ATA command: IDENTIFY DEVICE.
pub const ATA_IDENTIFY_DEVICE: u8 = 0xEC;
/// ATA command: IDENTIFY PACKET DEVICE.
pub const ATA_IDENTIFY_PACKET_DEVICE: u8 = 0xA1;

/// Protocol field values (byte 1, bits 4..1).
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AtaProtocol {
    NonData = 3,
    PioDataIn = 4,
}

impl AtaProtocol {
    #[inline]
    fn byte(self) -> u8 {
        (self as u8) << 1
    }
}

/// Byte 2: CK_COND=1, T_DIR=1 (from device), BYT_BLOK=1, T_LENGTH=2 (sector
/// count field).
pub const CONTROL_CK_COND_T_DIR_BYT_BLOK: u8 = 0x2E;

/// Bytes moved per sector when BYT_BLOK=1.
pub const ATA_SECTOR_LEN: usize = 512;

/// Build an **ATA PASS-THROUGH (12)** CDB carrying `command` with a sector
/// count of `sectors`.
pub fn build_ata_pass_through12(protocol: AtaProtocol, command: u8, sectors: u8) -> [u8; 12] {
    let mut cdb = [0u8; 12];
    cdb[0] = ATA_PASS_THROUGH_12;
    cdb[1] = protocol.byte();
    cdb[2] = CONTROL_CK_COND_T_DIR_BYT_BLOK;
    cdb[3] = 0; // FEATURES
    cdb[4] = sectors;
    // [5..8] LBA low/mid/high, [8] DEVICE: all zero
    cdb[9] = command;
    cdb
}

/// Build an **ATA PASS-THROUGH (16)** CDB (non-extended) carrying `command`
/// with a sector count of `sectors`.
pub fn build_ata_pass_through16(protocol: AtaProtocol, command: u8, sectors: u16) -> [u8; 16] {
    let mut cdb = [0u8; 16];
    cdb[0] = ATA_PASS_THROUGH_16;
    cdb[1] = protocol.byte();
    cdb[2] = CONTROL_CK_COND_T_DIR_BYT_BLOK;
    // [3..5] FEATURES
    cdb[5..7].copy_from_slice(&sectors.to_be_bytes());
    // [7..13] LBA, [13] DEVICE
    cdb[14] = command;
    cdb[15] = 0; // CONTROL
    cdb
}

/// IDENTIFY DEVICE wrapped in ATA PASS-THROUGH (12).
#[inline]
pub fn build_identify_device() -> [u8; 12] {
    build_ata_pass_through12(AtaProtocol::PioDataIn, ATA_IDENTIFY_DEVICE, 1)
}

/// IDENTIFY PACKET DEVICE wrapped in ATA PASS-THROUGH (16).
///
/// The 16-byte form is used because MMC's BLANK shares opcode 0xA1 with
/// ATA PASS-THROUGH (12).
#[inline]
pub fn build_identify_packet_device() -> [u8; 16] {
    build_ata_pass_through16(AtaProtocol::PioDataIn, ATA_IDENTIFY_PACKET_DEVICE, 1)
}

/// Bytes a pass-through CDB asks the device to move, derived from
/// T_LENGTH / BYT_BLOK and the sector count.
pub fn declared_transfer_len(cdb: &[u8]) -> Option<usize> {
    let (control, sectors) = match (cdb.first()?, cdb.len()) {
        (&ATA_PASS_THROUGH_12, 12) => (cdb[2], cdb[4] as usize),
        (&ATA_PASS_THROUGH_16, 16) => {
            (cdb[2], u16::from_be_bytes([cdb[5], cdb[6]]) as usize)
        },
        _ => return None,
    };
    match (control & 0x03, control & 0x04 != 0) {
        (0, _) => Some(0),
        (2, true) => Some(sectors * ATA_SECTOR_LEN),
        (2, false) => Some(sectors),
        _ => None,
    }
}
