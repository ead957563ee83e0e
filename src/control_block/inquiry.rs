// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! INQUIRY (6): standard inquiry CDB and the one field of its response the
//! identify probe cares about.
//!
//! CDB layout (SPC-4 § 6.4):
//!   [0]    = 0x12 (INQUIRY)
//!   [1]    = EVPD (bit 0), always 0 here
//!   [2]    = Page Code (0 for standard data)
//!   [3..5] = Allocation Length (u16, big-endian)
//!   [5]    = Control

pub const INQUIRY_OPCODE: u8 = 0x12;

/// Size of the standard INQUIRY data the probe asks for.
pub const STANDARD_INQUIRY_LEN: usize = 36;

/// Build a **Standard INQUIRY (EVPD=0)** CDB for `allocation_len` bytes.
#[inline]
pub fn build_inquiry_standard(allocation_len: u16) -> [u8; 6] {
    let mut cdb = [0u8; 6];
    cdb[0] = INQUIRY_OPCODE;
    cdb[3..5].copy_from_slice(&allocation_len.to_be_bytes());
    cdb
}

/// Declared allocation length of a standard INQUIRY CDB.
#[inline]
pub fn allocation_len(cdb: &[u8; 6]) -> u16 {
    u16::from_be_bytes([cdb[3], cdb[4]])
}

/// Peripheral device type: bits 4..0 of byte 0 of standard INQUIRY data.
#[inline]
pub fn peripheral_device_type(buf: &[u8]) -> Option<u8> {
    buf.first().map(|b0| b0 & 0x1F)
}
