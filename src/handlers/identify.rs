// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use tracing::debug;

use crate::{
    control_block::ata_pass_through::{build_identify_device, build_identify_packet_device},
    handlers::{classify::classify, error::ProbeError},
    models::{
        classification::PeripheralClassification,
        identify::{IdentifyRecord, RawIdentifyBlock, decode},
    },
    transport::{CommandTransport, Direction, SgIo, StatusCheck},
};

/// Issue the identify command that `classification` allows and validate
/// the answer.
///
/// An unsupported classification fails before any CDB is built: ATA
/// PASS-THROUGH (12) shares its opcode with MMC BLANK, so guessing could
/// erase optical media.
pub fn identify<D: SgIo>(
    transport: &mut CommandTransport<D>,
    classification: PeripheralClassification,
) -> Result<RawIdentifyBlock, ProbeError> {
    let mut block = RawIdentifyBlock::default();

    let sense = match classification {
        PeripheralClassification::PacketDevice => transport.send_with(
            &build_identify_packet_device(),
            block.as_mut_slice(),
            Direction::FromDevice,
            StatusCheck::SenseExpected,
        )?,
        PeripheralClassification::DirectAccessBlock => transport.send_with(
            &build_identify_device(),
            block.as_mut_slice(),
            Direction::FromDevice,
            StatusCheck::SenseExpected,
        )?,
        PeripheralClassification::Unsupported(peripheral_type) => {
            debug!(peripheral_type, "refusing IDENTIFY on unclassified device");
            return Err(ProbeError::ClassificationRejected { peripheral_type });
        },
    };

    if !sense.has_ata_status_return() {
        debug!(?sense, "IDENTIFY answered without ATA status return");
        return Err(ProbeError::ResponseMalformed {
            response_code: sense.response_code(),
            descriptor: sense.first_descriptor(),
        });
    }

    if block.is_all_zero() {
        debug!("IDENTIFY data is all zero bytes");
        return Err(ProbeError::EmptyResponse);
    }

    Ok(block)
}

/// Result of a full probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub classification: PeripheralClassification,
    /// The block as returned by the device, before decoding.
    pub raw: RawIdentifyBlock,
    pub record: IdentifyRecord,
}

/// INQUIRY → IDENTIFY (PACKET) DEVICE → decode.
///
/// The device is borrowed for the call only; probes against one handle must
/// not overlap.
pub fn disk_identify<D: SgIo>(device: D) -> Result<Identity, ProbeError> {
    let mut transport = CommandTransport::new(device);

    let classification = classify(&mut transport)?;
    let raw = identify(&mut transport, classification)?;

    let mut record = decode(&raw);
    record.is_packet_device = classification.is_packet_device();

    Ok(Identity {
        classification,
        raw,
        record,
    })
}
