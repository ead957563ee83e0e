use anyhow::Result;
use ata_identify::{
    export::{short_name, udev_properties},
    models::identify::{decode, decode_legacy},
};

use super::common::{load_fixture, load_identify};

fn get<'a>(p: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
    p.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
}

#[test]
fn test_disk_export_properties() -> Result<()> {
    let raw = load_identify("tests/unit_tests/fixtures/identify_wd10ezex.hex")?;
    let rec = decode(&raw);
    let p = udev_properties(&rec);

    assert_eq!(short_name(&rec), "WDC_WD10EZEX-00BN5A0_WD-WXYZ1234");
    assert_eq!(get(&p, "ID_TYPE"), Some("disk"));
    assert_eq!(get(&p, "ID_MODEL"), Some("WDC_WD10EZEX-00BN5A0"));
    assert_eq!(get(&p, "ID_REVISION"), Some("01.01A01"));
    assert_eq!(get(&p, "ID_SERIAL_SHORT"), Some("WD-WXYZ1234"));
    assert_eq!(get(&p, "ID_ATA_WRITE_CACHE_ENABLED"), Some("1"));
    assert_eq!(get(&p, "ID_ATA_FEATURE_SET_SMART"), Some("1"));
    assert_eq!(get(&p, "ID_ATA_DOWNLOAD_MICROCODE"), Some("1"));
    assert_eq!(get(&p, "ID_ATA_SATA_SIGNAL_RATE_GEN2"), Some("1"));
    assert_eq!(get(&p, "ID_ATA_ROTATION_RATE_RPM"), Some("7200"));
    assert_eq!(get(&p, "ID_WWN"), Some("0x50014ee05ab12c3d"));
    assert_eq!(get(&p, "ID_ATA_FEATURE_SET_SECURITY"), None);
    assert_eq!(get(&p, "ID_ATA_CFA"), None);
    Ok(())
}

#[test]
fn test_dvd_export_properties() -> Result<()> {
    let raw = load_identify("tests/unit_tests/fixtures/identify_dvdram.hex")?;
    let rec = decode(&raw);
    let p = udev_properties(&rec);

    assert_eq!(get(&p, "ID_TYPE"), Some("cd"));
    assert_eq!(get(&p, "ID_MODEL"), Some("HL-DT-ST_DVDRAM_GH24NSD1"));
    assert_eq!(get(&p, "ID_SERIAL"), Some("HL-DT-ST_DVDRAM_GH24NSD1_K1234567890"));
    assert_eq!(get(&p, "ID_ATA_SATA"), None);
    Ok(())
}

#[test]
fn test_legacy_block_is_read_without_unscrambling() -> Result<()> {
    // HDIO_GET_IDENTITY hands strings over already in reading order.
    let mut bytes = load_fixture("tests/unit_tests/fixtures/identify_wd10ezex.hex")?;
    let model = b"WDC WD10EZEX-00BN5A0                    ";
    bytes[54..94].copy_from_slice(model);
    let raw = ata_identify::models::identify::RawIdentifyBlock(
        bytes.try_into().map_err(|_| anyhow::anyhow!("len"))?,
    );

    let rec = decode_legacy(&raw);
    assert_eq!(rec.model.as_bytes(), model);
    Ok(())
}

#[test]
fn test_json_output_carries_strings() -> Result<()> {
    let raw = load_identify("tests/unit_tests/fixtures/identify_wd10ezex.hex")?;
    let rec = decode(&raw);
    let v: serde_json::Value = serde_json::to_value(&rec)?;
    assert_eq!(v["firmware_revision"], "01.01A01");
    Ok(())
}
