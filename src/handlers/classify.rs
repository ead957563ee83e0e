// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use tracing::debug;

use crate::{
    control_block::inquiry::{
        STANDARD_INQUIRY_LEN, build_inquiry_standard, peripheral_device_type,
    },
    handlers::error::ProbeError,
    models::classification::PeripheralClassification,
    transport::{CommandTransport, Direction, SgIo},
};

/// Send a standard INQUIRY and classify the peripheral device type.
///
/// A type that is neither 0x00 nor 0x05 comes back as
/// [`PeripheralClassification::Unsupported`]; the caller decides what to
/// do with it.
pub fn classify<D: SgIo>(
    transport: &mut CommandTransport<D>,
) -> Result<PeripheralClassification, ProbeError> {
    let cdb = build_inquiry_standard(STANDARD_INQUIRY_LEN as u16);
    let mut inquiry = [0u8; STANDARD_INQUIRY_LEN];

    transport.send(&cdb, &mut inquiry, Direction::FromDevice)?;

    let device_type = peripheral_device_type(&inquiry).unwrap_or(0x1F);
    let class = PeripheralClassification::from_peripheral_type(device_type);
    debug!(device_type, %class, "INQUIRY classified device");
    Ok(class)
}
