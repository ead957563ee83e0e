// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use tracing::{debug, warn};

use crate::{
    control_block::declared_transfer_len,
    models::sense_data::SenseBuffer,
    transport::{
        COMMAND_TIMEOUT, Completion, Direction, Interface, SgIo, TransportError,
        TransportRequest,
        fallback::{Transition, classify_attempt, decide},
    },
};

/// How the status fields of a completed request are judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCheck {
    /// Every status field must be zero.
    Strict,
    /// CHECK CONDITION with sense is expected (CK_COND commands); the
    /// caller validates the sense data. Transport/host status must still
    /// be zero.
    SenseExpected,
}

impl StatusCheck {
    fn accepts(self, completion: &Completion) -> bool {
        match self {
            Self::Strict => completion.is_clean(),
            Self::SenseExpected => completion.is_clean_or_check_condition(),
        }
    }
}

/// Issues CDBs through an [`SgIo`] device, v4 first, v3 once if v4 is
/// refused.
#[derive(Debug)]
pub struct CommandTransport<D> {
    device: D,
}

impl<D: SgIo> CommandTransport<D> {
    pub fn new(device: D) -> Self {
        Self { device }
    }

    /// Send `cdb`, moving `data` in `direction`; all status fields must be
    /// zero. Returns the sense bytes written by the device.
    pub fn send(
        &mut self,
        cdb: &[u8],
        data: &mut [u8],
        direction: Direction,
    ) -> Result<SenseBuffer, TransportError> {
        self.send_with(cdb, data, direction, StatusCheck::Strict)
    }

    pub fn send_with(
        &mut self,
        cdb: &[u8],
        data: &mut [u8],
        direction: Direction,
        check: StatusCheck,
    ) -> Result<SenseBuffer, TransportError> {
        match declared_transfer_len(cdb) {
            Some(declared) if declared != data.len() => {
                return Err(TransportError::LengthMismatch {
                    declared,
                    buffer: data.len(),
                });
            },
            _ => {},
        }

        let mut sense = SenseBuffer::default();
        let mut interface = Interface::V4;

        let completion = loop {
            let attempt = {
                let mut request = TransportRequest {
                    interface,
                    cdb,
                    sense: &mut sense,
                    data: &mut *data,
                    direction,
                    timeout: COMMAND_TIMEOUT,
                };
                debug!(
                    opcode = cdb.first().copied().unwrap_or(0),
                    ?interface,
                    len = request.data.len(),
                    "SG_IO submit"
                );
                classify_attempt(self.device.submit(&mut request))
            };

            match decide(interface, attempt) {
                Transition::Next(next) => {
                    warn!(?next, "SG_IO v4 not supported by driver, retrying with v3");
                    interface = next;
                },
                Transition::Done(r) => break r?,
            }
        };

        if !check.accepts(&completion) {
            debug!(?completion, ?check, "SG_IO status rejected");
            return Err(TransportError::Status(completion));
        }

        Ok(sense)
    }
}
