// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! udev-style rendering of an [`IdentifyRecord`]: sanitised strings, the
//! `MODEL_SERIAL` short name and the `ID_*` property list.

use crate::models::identify::{
    AtaString, IdentifyRecord,
    record::{CommandSet1, CommandSet2, DeviceLock, RotationRate},
};

fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "#+-.:=@_".contains(c)
}

/// Bytes up to the first NUL, lossily as UTF-8.
fn text(s: &AtaString) -> String {
    let bytes = s.as_bytes();
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// Trim surrounding whitespace and collapse every inner run into one `_`.
pub fn replace_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Replace ASCII characters outside `[0-9A-Za-z#+-.:=@_]` with `_`.
/// Non-ASCII characters are kept.
pub fn replace_chars(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() && !is_safe_char(c) { '_' } else { c })
        .collect()
}

/// Escape everything outside the safe set as `\xNN`; non-ASCII characters
/// are kept.
pub fn encode_devnode_name(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if !c.is_ascii() || is_safe_char(c) {
            out.push(c);
        } else {
            out.push_str(&format!("\\x{:02x}", c as u32));
        }
    }
    out
}

fn sanitize(s: &AtaString) -> String {
    replace_chars(&replace_whitespace(&text(s)))
}

/// `MODEL_SERIAL`, or `MODEL` when the serial is blank.
pub fn short_name(record: &IdentifyRecord) -> String {
    let model = sanitize(&record.model);
    let serial = sanitize(&record.serial);
    if serial.is_empty() {
        model
    } else {
        format!("{model}_{serial}")
    }
}

fn flag(on: bool) -> String {
    u8::from(on).to_string()
}

/// The `ID_*` properties udev imports from `ata_id --export`.
pub fn udev_properties(record: &IdentifyRecord) -> Vec<(&'static str, String)> {
    let mut p: Vec<(&'static str, String)> = Vec::new();
    let model = sanitize(&record.model);
    let serial = sanitize(&record.serial);
    let revision = sanitize(&record.firmware_revision);

    p.push(("ID_ATA", "1".into()));
    let id_type = match record.atapi_device_type() {
        Some(0) | Some(5) => "cd",
        Some(1) => "tape",
        Some(7) => "optical",
        Some(_) => "generic",
        None => "disk",
    };
    p.push(("ID_TYPE", id_type.into()));
    p.push(("ID_BUS", "ata".into()));
    p.push(("ID_MODEL", model.clone()));
    p.push(("ID_MODEL_ENC", encode_devnode_name(&text(&record.model))));
    p.push(("ID_REVISION", revision));
    if serial.is_empty() {
        p.push(("ID_SERIAL", model));
    } else {
        p.push(("ID_SERIAL", format!("{model}_{serial}")));
        p.push(("ID_SERIAL_SHORT", serial));
    }

    let cs1 = record.command_set1_supported();
    let cs1_on = record.command_set1_enabled();
    for (bit, key) in [
        (CommandSet1::WRITE_CACHE, WRITE_CACHE),
        (CommandSet1::HPA, FEATURE_SET_HPA),
        (CommandSet1::POWER_MANAGEMENT, FEATURE_SET_PM),
    ] {
        if cs1.contains(bit) {
            push_feature(&mut p, key, cs1_on.contains(bit));
        }
    }

    if cs1.contains(CommandSet1::SECURITY) {
        let enabled = cs1_on.contains(CommandSet1::SECURITY);
        let lock = record.device_lock();
        p.push(("ID_ATA_FEATURE_SET_SECURITY", "1".into()));
        p.push(("ID_ATA_FEATURE_SET_SECURITY_ENABLED", flag(enabled)));
        p.push((
            "ID_ATA_FEATURE_SET_SECURITY_ERASE_UNIT_MIN",
            record.security_erase_minutes().to_string(),
        ));
        if enabled {
            let level = if lock.contains(DeviceLock::LEVEL_MAXIMUM) {
                "maximum"
            } else {
                "high"
            };
            p.push(("ID_ATA_FEATURE_SET_SECURITY_LEVEL", level.into()));
        }
        if lock.contains(DeviceLock::ENHANCED_ERASE) {
            p.push((
                "ID_ATA_FEATURE_SET_SECURITY_ENHANCED_ERASE_UNIT_MIN",
                record.enhanced_security_erase_minutes().to_string(),
            ));
        }
        if lock.contains(DeviceLock::COUNT_EXPIRED) {
            p.push(("ID_ATA_FEATURE_SET_SECURITY_EXPIRE", "1".into()));
        }
        if lock.contains(DeviceLock::FROZEN) {
            p.push(("ID_ATA_FEATURE_SET_SECURITY_FROZEN", "1".into()));
        }
        if lock.contains(DeviceLock::LOCKED) {
            p.push(("ID_ATA_FEATURE_SET_SECURITY_LOCKED", "1".into()));
        }
    }

    if cs1.contains(CommandSet1::SMART) {
        push_feature(&mut p, FEATURE_SET_SMART, cs1_on.contains(CommandSet1::SMART));
    }

    let cs2 = record.command_set2_supported();
    let cs2_on = record.command_set2_enabled();
    if cs2.contains(CommandSet2::AAM) {
        let (recommended, current) = record.aam_values();
        push_feature(&mut p, FEATURE_SET_AAM, cs2_on.contains(CommandSet2::AAM));
        p.push((
            "ID_ATA_FEATURE_SET_AAM_VENDOR_RECOMMENDED_VALUE",
            recommended.to_string(),
        ));
        p.push(("ID_ATA_FEATURE_SET_AAM_CURRENT_VALUE", current.to_string()));
    }
    if cs2.contains(CommandSet2::PUIS) {
        push_feature(&mut p, FEATURE_SET_PUIS, cs2_on.contains(CommandSet2::PUIS));
    }
    if cs2.contains(CommandSet2::APM) {
        let enabled = cs2_on.contains(CommandSet2::APM);
        push_feature(&mut p, FEATURE_SET_APM, enabled);
        if enabled {
            p.push((
                "ID_ATA_FEATURE_SET_APM_CURRENT_VALUE",
                record.apm_level().to_string(),
            ));
        }
    }
    if cs2.contains(CommandSet2::DOWNLOAD_MICROCODE) {
        p.push(("ID_ATA_DOWNLOAD_MICROCODE", "1".into()));
    }

    if let Some(sata) = record.sata_capabilities() {
        p.push(("ID_ATA_SATA", "1".into()));
        if sata & (1 << 2) != 0 {
            p.push(("ID_ATA_SATA_SIGNAL_RATE_GEN2", "1".into()));
        }
        if sata & (1 << 1) != 0 {
            p.push(("ID_ATA_SATA_SIGNAL_RATE_GEN1", "1".into()));
        }
    }

    match record.rotation_rate() {
        RotationRate::NonRotating => p.push(("ID_ATA_ROTATION_RATE_RPM", "0".into())),
        RotationRate::Rpm(rpm) => p.push(("ID_ATA_ROTATION_RATE_RPM", rpm.to_string())),
        RotationRate::NotReported => {},
    }

    if let Some(wwn) = record.wwn() {
        p.push(("ID_WWN", format!("0x{wwn:x}")));
        p.push(("ID_WWN_WITH_EXTENSION", format!("0x{wwn:x}")));
    }

    if record.is_cfa() {
        p.push(("ID_ATA_CFA", "1".into()));
    }

    p
}

/// (presence key, enabled key) of a feature set.
type FeatureKeys = (&'static str, &'static str);

const WRITE_CACHE: FeatureKeys = ("ID_ATA_WRITE_CACHE", "ID_ATA_WRITE_CACHE_ENABLED");
const FEATURE_SET_HPA: FeatureKeys = ("ID_ATA_FEATURE_SET_HPA", "ID_ATA_FEATURE_SET_HPA_ENABLED");
const FEATURE_SET_PM: FeatureKeys = ("ID_ATA_FEATURE_SET_PM", "ID_ATA_FEATURE_SET_PM_ENABLED");
const FEATURE_SET_SMART: FeatureKeys =
    ("ID_ATA_FEATURE_SET_SMART", "ID_ATA_FEATURE_SET_SMART_ENABLED");
const FEATURE_SET_AAM: FeatureKeys = ("ID_ATA_FEATURE_SET_AAM", "ID_ATA_FEATURE_SET_AAM_ENABLED");
const FEATURE_SET_PUIS: FeatureKeys =
    ("ID_ATA_FEATURE_SET_PUIS", "ID_ATA_FEATURE_SET_PUIS_ENABLED");
const FEATURE_SET_APM: FeatureKeys = ("ID_ATA_FEATURE_SET_APM", "ID_ATA_FEATURE_SET_APM_ENABLED");

fn push_feature(p: &mut Vec<(&'static str, String)>, (key, key_enabled): FeatureKeys, enabled: bool) {
    p.push((key, "1".into()));
    p.push((key_enabled, flag(enabled)));
}
