use anyhow::Result;
use ata_identify::{
    handlers::{ProbeError, disk_identify},
    models::{classification::PeripheralClassification, identify::IdentifyWord},
    transport::{Completion, Interface, TransportError},
};
use nix::errno::Errno;
use hex_literal::hex;

use super::common::{FakeDrive, load_identify};

const DISK: &str = "tests/unit_tests/fixtures/identify_wd10ezex.hex";
const DVD: &str = "tests/unit_tests/fixtures/identify_dvdram.hex";

#[test]
fn test_direct_access_disk_uses_pass_through_12() -> Result<()> {
    let block = load_identify(DISK)?;
    let mut drive = FakeDrive::new(0x00, block.0);

    let identity = disk_identify(&mut drive)?;

    assert_eq!(identity.classification, PeripheralClassification::DirectAccessBlock);
    assert_eq!(drive.log.len(), 2);
    assert_eq!(drive.log[0].1, hex!("12 00 00 00 24 00"));
    assert_eq!(
        drive.log[1].1,
        hex!("a1 08 2e 00 01 00 00 00 00 ec 00 00")
    );

    let rec = &identity.record;
    assert_eq!(rec.serial.to_string_lossy().trim(), "WD-WXYZ1234");
    assert_eq!(rec.model.to_string_lossy().trim(), "WDC WD10EZEX-00BN5A0");
    assert_eq!(rec.firmware_revision.to_string_lossy(), "01.01A01");
    assert_eq!(rec.word(IdentifyWord::NominalRotationRate), 7200);
    assert!(!rec.is_packet_device);
    assert_eq!(identity.raw, block);
    Ok(())
}

#[test]
fn test_optical_drive_uses_identify_packet_device() -> Result<()> {
    let block = load_identify(DVD)?;
    let mut drive = FakeDrive::new(0x05, block.0);

    let identity = disk_identify(&mut drive)?;

    assert_eq!(identity.classification, PeripheralClassification::PacketDevice);
    let cdb = &drive.log[1].1;
    assert_eq!(cdb.len(), 16);
    assert_eq!(cdb[0], 0x85);
    assert_eq!(cdb[14], 0xa1);
    assert!(identity.record.is_packet_device);
    assert_eq!(identity.record.atapi_device_type(), Some(5));
    Ok(())
}

#[test]
fn test_unsupported_type_sends_only_inquiry() -> Result<()> {
    let block = load_identify(DISK)?;
    let mut drive = FakeDrive::new(0x0e, block.0);

    let err = disk_identify(&mut drive).unwrap_err();

    assert_eq!(err, ProbeError::ClassificationRejected { peripheral_type: 0x0e });
    assert_eq!(drive.opcodes(), vec![0x12]);
    Ok(())
}

#[test]
fn test_qualifier_bits_are_ignored() -> Result<()> {
    let block = load_identify(DISK)?;
    // Peripheral qualifier 001b over a direct-access device
    let mut drive = FakeDrive::new(0x20, block.0);

    let identity = disk_identify(&mut drive)?;
    assert_eq!(identity.classification, PeripheralClassification::DirectAccessBlock);
    Ok(())
}

#[test]
fn test_all_zero_identify_is_empty_response() {
    let mut drive = FakeDrive::new(0x00, [0u8; 512]);
    let err = disk_identify(&mut drive).unwrap_err();
    assert_eq!(err, ProbeError::EmptyResponse);
}

#[test]
fn test_missing_ata_status_return_is_malformed() -> Result<()> {
    let block = load_identify(DISK)?;
    let mut drive = FakeDrive::new(0x00, block.0);
    drive.ata_status_return = false;

    let err = disk_identify(&mut drive).unwrap_err();
    assert_eq!(
        err,
        ProbeError::ResponseMalformed {
            response_code: 0,
            descriptor: [0, 0],
        }
    );
    Ok(())
}

#[test]
fn test_probe_through_v3_only_kernel() -> Result<()> {
    let block = load_identify(DISK)?;
    let mut drive = FakeDrive::new(0x00, block.0);
    drive.v4_supported = false;

    let identity = disk_identify(&mut drive)?;
    assert_eq!(identity.record.serial.to_string_lossy().trim(), "WD-WXYZ1234");

    let shapes: Vec<Interface> = drive.log.iter().map(|(i, _)| *i).collect();
    assert_eq!(
        shapes,
        vec![Interface::V4, Interface::V3, Interface::V4, Interface::V3]
    );
    // the retry carries the same CDB
    assert_eq!(drive.log[2].1, drive.log[3].1);
    Ok(())
}

#[test]
fn test_identify_is_deterministic() -> Result<()> {
    let block = load_identify(DISK)?;
    let a = disk_identify(&mut FakeDrive::new(0x00, block.0))?;
    let b = disk_identify(&mut FakeDrive::new(0x00, block.0))?;
    assert_eq!(a, b);
    Ok(())
}

#[test]
fn test_inquiry_failure_is_propagated_unchanged() -> Result<()> {
    let block = load_identify(DISK)?;
    let mut drive = FakeDrive::new(0x00, block.0);
    drive.inquiry_error = Some(Errno::EIO);

    let err = disk_identify(&mut drive).unwrap_err();

    assert_eq!(err, ProbeError::TransportIo(TransportError::Ioctl(Errno::EIO)));
    assert_eq!(drive.opcodes(), vec![0x12]);
    Ok(())
}

#[test]
fn test_identify_host_error_is_transport_failure() -> Result<()> {
    let block = load_identify(DISK)?;
    let mut drive = FakeDrive::new(0x00, block.0);
    let failed = Completion::V4 {
        device_status: 0x02,
        transport_status: 0x07,
        driver_status: 0x08,
    };
    drive.identify_completion = Some(failed);

    let err = disk_identify(&mut drive).unwrap_err();

    assert_eq!(err, ProbeError::TransportIo(TransportError::Status(failed)));
    assert_eq!(drive.opcodes(), vec![0x12, 0xa1]);
    Ok(())
}

#[test]
fn test_identify_v3_host_error_is_transport_failure() -> Result<()> {
    let block = load_identify(DISK)?;
    let mut drive = FakeDrive::new(0x00, block.0);
    drive.v4_supported = false;
    drive.identify_completion = Some(Completion::V3 {
        status: 0,
        host_status: 0x01,
        driver_status: 0,
    });

    let err = disk_identify(&mut drive).unwrap_err();
    assert!(
        matches!(err, ProbeError::TransportIo(TransportError::Status(Completion::V3 { .. }))),
        "{err:?}"
    );
    Ok(())
}

#[test]
fn test_packet_device_missing_ata_status_return_is_malformed() -> Result<()> {
    let block = load_identify(DVD)?;
    let mut drive = FakeDrive::new(0x05, block.0);
    drive.ata_status_return = false;

    let err = disk_identify(&mut drive).unwrap_err();
    assert_eq!(
        err,
        ProbeError::ResponseMalformed {
            response_code: 0,
            descriptor: [0, 0],
        }
    );
    assert_eq!(drive.opcodes(), vec![0x12, 0x85]);
    Ok(())
}

#[test]
fn test_packet_device_all_zero_is_empty_response() {
    let mut drive = FakeDrive::new(0x05, [0u8; 512]);
    let err = disk_identify(&mut drive).unwrap_err();
    assert_eq!(err, ProbeError::EmptyResponse);
    assert_eq!(drive.opcodes(), vec![0x12, 0x85]);
}
