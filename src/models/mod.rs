//! Data structures exchanged with the device: sense data, INQUIRY
//! classification and IDENTIFY data.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// Peripheral device type classification.
pub mod classification;
/// IDENTIFY (PACKET) DEVICE data and its decoder.
pub mod identify;
/// Sense buffer and ATA Status Return descriptor check.
pub mod sense_data;
