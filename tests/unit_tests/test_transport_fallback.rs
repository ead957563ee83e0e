use ata_identify::{
    control_block::{ata_pass_through::build_identify_device, inquiry::build_inquiry_standard},
    models::sense_data::SenseBuffer,
    transport::{
        Completion, CommandTransport, Direction, Interface, StatusCheck, TransportError,
        fallback::{Transition, decide},
    },
};
use nix::errno::Errno;

use super::common::FakeDrive;

#[test]
fn test_decide_walks_v4_then_v3() {
    assert_eq!(
        decide(Interface::V4, Err(TransportError::Unsupported)),
        Transition::Next(Interface::V3)
    );
    assert_eq!(
        decide(Interface::V3, Err(TransportError::Unsupported)),
        Transition::Done(Err(TransportError::Ioctl(Errno::EINVAL)))
    );
    assert_eq!(
        decide(Interface::V4, Ok(Completion::CLEAN_V4)),
        Transition::Done(Ok(Completion::CLEAN_V4))
    );
}

#[test]
fn test_v3_fallback_returns_pass_through_sense() {
    let mut drive = FakeDrive::new(0x00, [0x5a; 512]);
    drive.v4_supported = false;
    let mut block = [0u8; 512];

    let sense: SenseBuffer = CommandTransport::new(&mut drive)
        .send_with(
            &build_identify_device(),
            &mut block,
            Direction::FromDevice,
            StatusCheck::SenseExpected,
        )
        .expect("send");

    assert!(sense.has_ata_status_return());
    assert_eq!(block, [0x5a; 512]);
    assert_eq!(drive.log.len(), 2);
    assert_eq!(drive.log[1].0, Interface::V3);
}

#[test]
fn test_strict_check_rejects_check_condition() {
    let mut drive = FakeDrive::new(0x00, [0x5a; 512]);
    let mut block = [0u8; 512];

    let err = CommandTransport::new(&mut drive)
        .send(&build_identify_device(), &mut block, Direction::FromDevice)
        .unwrap_err();

    assert!(matches!(err, TransportError::Status(_)), "{err:?}");
}

#[test]
fn test_short_buffer_is_rejected_before_io() {
    let mut drive = FakeDrive::new(0x00, [0; 512]);
    let mut buf = [0u8; 8];

    let err = CommandTransport::new(&mut drive)
        .send(&build_inquiry_standard(36), &mut buf, Direction::FromDevice)
        .unwrap_err();

    assert_eq!(
        err,
        TransportError::LengthMismatch {
            declared: 36,
            buffer: 8,
        }
    );
    assert!(drive.log.is_empty());
}
