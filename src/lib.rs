//! Reads the ATA IDENTIFY block from disks and optical drives through the
//! Linux SG_IO pass-through interface and decodes it.
// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// Handles configuration, command-line parsing, and logging.
pub mod cfg;
/// Builders for the SCSI CDBs the probe sends.
pub mod control_block;
/// udev-style `ID_*` properties derived from an identify record.
pub mod export;
/// Probe operations: classification, identify, and the full probe.
pub mod handlers;
/// Sense data, classification and the decoded identify record.
pub mod models;
/// SG_IO submission with v4 to v3 fallback.
pub mod transport;
