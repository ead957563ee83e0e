// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use thiserror::Error;

use crate::transport::TransportError;

/// Why a probe produced no IDENTIFY data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// The ioctl failed or reported a non-zero status.
    #[error("transport I/O error: {0}")]
    TransportIo(#[from] TransportError),
    /// Neither a direct-access block device nor a CD/DVD; no identify
    /// command was sent.
    #[error("peripheral device type 0x{peripheral_type:02x} is not eligible for IDENTIFY")]
    ClassificationRejected { peripheral_type: u8 },
    /// The ioctl succeeded but the sense data carries no ATA Status Return.
    #[error(
        "no ATA status return in sense data: response code 0x{response_code:02x}, descriptor {descriptor:02x?}"
    )]
    ResponseMalformed {
        response_code: u8,
        descriptor: [u8; 2],
    },
    #[error("IDENTIFY data is all zero bytes")]
    EmptyResponse,
}
