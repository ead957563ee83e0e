// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

pub mod ata_pass_through;
pub mod inquiry;

/// Bytes of data-in a CDB declares, for the command kinds this crate builds.
///
/// Returns `None` for opcodes it does not know how to read.
pub fn declared_transfer_len(cdb: &[u8]) -> Option<usize> {
    match cdb.first()? {
        &inquiry::INQUIRY_OPCODE => {
            let cdb: &[u8; 6] = cdb.try_into().ok()?;
            Some(inquiry::allocation_len(cdb) as usize)
        },
        _ => ata_pass_through::declared_transfer_len(cdb),
    }
}
