//! SG_IO command transport: one semantic request, two kernel interface
//! shapes (`sg_io_v4` and the older `sg_io_hdr`).

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// Sends a CDB and validates the completion.
pub mod command;
/// Pure decision function for the v4 → v3 retry.
pub mod fallback;
/// ioctl-backed [`SgIo`] over a borrowed file descriptor.
#[cfg(target_os = "linux")]
pub mod linux;

use std::time::Duration;

use nix::errno::Errno;
use thiserror::Error;

pub use self::command::{CommandTransport, StatusCheck};
use crate::models::sense_data::SenseBuffer;

/// Timeout applied to every command.
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Data transfer direction of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    None,
    ToDevice,
    #[default]
    FromDevice,
}

/// Kernel request shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interface {
    /// `struct sg_io_v4`, guard `'Q'`.
    V4,
    /// `struct sg_io_hdr`, interface id `'S'`.
    V3,
}

/// One SG_IO request. Buffers are borrowed from the caller for the
/// duration of the call only.
#[derive(Debug)]
pub struct TransportRequest<'a> {
    pub interface: Interface,
    pub cdb: &'a [u8],
    pub sense: &'a mut SenseBuffer,
    pub data: &'a mut [u8],
    pub direction: Direction,
    pub timeout: Duration,
}

impl TransportRequest<'_> {
    pub fn timeout_ms(&self) -> u32 {
        u32::try_from(self.timeout.as_millis()).unwrap_or(u32::MAX)
    }
}

/// SCSI status CHECK CONDITION.
pub const SAM_STAT_CHECK_CONDITION: u32 = 0x02;
/// Driver status set by the kernel when sense data was returned.
pub const DRIVER_SENSE: u32 = 0x08;

/// Status fields reported by a completed ioctl, per interface shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    V4 {
        device_status: u32,
        transport_status: u32,
        driver_status: u32,
    },
    V3 {
        status: u8,
        host_status: u16,
        driver_status: u16,
    },
}

impl Completion {
    pub const CLEAN_V4: Self = Self::V4 {
        device_status: 0,
        transport_status: 0,
        driver_status: 0,
    };
    pub const CLEAN_V3: Self = Self::V3 {
        status: 0,
        host_status: 0,
        driver_status: 0,
    };

    /// (device, transport/host, driver) status, widened.
    pub fn fields(&self) -> (u32, u32, u32) {
        match *self {
            Self::V4 {
                device_status,
                transport_status,
                driver_status,
            } => (device_status, transport_status, driver_status),
            Self::V3 {
                status,
                host_status,
                driver_status,
            } => (status.into(), host_status.into(), driver_status.into()),
        }
    }

    /// Every status field is zero.
    pub fn is_clean(&self) -> bool {
        self.fields() == (0, 0, 0)
    }

    /// The transport delivered the command and the device either succeeded
    /// or finished with CHECK CONDITION plus sense data.
    pub fn is_clean_or_check_condition(&self) -> bool {
        let (device, transport, driver) = self.fields();
        transport == 0
            && matches!(device, 0 | SAM_STAT_CHECK_CONDITION)
            && matches!(driver, 0 | DRIVER_SENSE)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The interface shape was refused (`EINVAL`). Consumed by the
    /// fallback, never returned from [`CommandTransport`].
    #[error("SG_IO interface shape not supported")]
    Unsupported,
    #[error("SG_IO ioctl failed: {0}")]
    Ioctl(Errno),
    #[error("SG_IO completed with error status: {0:?}")]
    Status(Completion),
    #[error("CDB declares {declared} bytes but the data buffer holds {buffer}")]
    LengthMismatch { declared: usize, buffer: usize },
}

/// The OS boundary: submit one request in the shape named by
/// `request.interface` and report the raw outcome.
pub trait SgIo {
    fn submit(&mut self, request: &mut TransportRequest<'_>) -> Result<Completion, Errno>;
}

impl<T: SgIo + ?Sized> SgIo for &mut T {
    fn submit(&mut self, request: &mut TransportRequest<'_>) -> Result<Completion, Errno> {
        (**self).submit(request)
    }
}
