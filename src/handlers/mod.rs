//! Probe operations built on the command transport.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// INQUIRY and peripheral device type classification.
pub mod classify;
/// Typed probe failures.
pub mod error;
/// IDENTIFY (PACKET) DEVICE and the full probe.
pub mod identify;

pub use self::{
    classify::classify,
    error::ProbeError,
    identify::{Identity, disk_identify, identify},
};
