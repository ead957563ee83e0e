use std::fs;

use anyhow::{Context, Result};
use ata_identify::{
    control_block::{
        ata_pass_through::{ATA_PASS_THROUGH_12, ATA_PASS_THROUGH_16},
        inquiry::INQUIRY_OPCODE,
    },
    models::identify::RawIdentifyBlock,
    transport::{Completion, Interface, SgIo, TransportRequest},
};
use hex::FromHex;
use nix::errno::Errno;

pub fn load_fixture(path: &str) -> Result<Vec<u8>> {
    let s = fs::read_to_string(path).with_context(|| format!("read {path}"))?;
    let cleaned = s.trim().replace(|c: char| c.is_whitespace(), "");
    Ok(Vec::from_hex(&cleaned)?)
}

pub fn load_identify(path: &str) -> Result<RawIdentifyBlock> {
    let bytes = load_fixture(path)?;
    let arr: [u8; 512] = bytes
        .try_into()
        .map_err(|v: Vec<u8>| anyhow::anyhow!("fixture {path} is {} bytes", v.len()))?;
    Ok(RawIdentifyBlock(arr))
}

/// Emulated drive behind SG_IO: answers INQUIRY with a peripheral device
/// type and either ATA PASS-THROUGH form with the configured block.
#[derive(Debug)]
pub struct FakeDrive {
    pub peripheral_type: u8,
    pub identify: [u8; 512],
    /// Write the 0x72 / 0x09 0x0c sense bytes on pass-through.
    pub ata_status_return: bool,
    pub v4_supported: bool,
    /// Fail INQUIRY with this errno.
    pub inquiry_error: Option<Errno>,
    /// Complete pass-through with this status instead of CHECK CONDITION.
    pub identify_completion: Option<Completion>,
    pub log: Vec<(Interface, Vec<u8>)>,
}

impl FakeDrive {
    pub fn new(peripheral_type: u8, identify: [u8; 512]) -> Self {
        Self {
            peripheral_type,
            identify,
            ata_status_return: true,
            v4_supported: true,
            inquiry_error: None,
            identify_completion: None,
            log: Vec::new(),
        }
    }

    pub fn opcodes(&self) -> Vec<u8> {
        self.log.iter().map(|(_, cdb)| cdb[0]).collect()
    }
}

fn check_condition(interface: Interface) -> Completion {
    match interface {
        Interface::V4 => Completion::V4 {
            device_status: 0x02,
            transport_status: 0,
            driver_status: 0x08,
        },
        Interface::V3 => Completion::V3 {
            status: 0x02,
            host_status: 0,
            driver_status: 0x08,
        },
    }
}

impl SgIo for FakeDrive {
    fn submit(&mut self, req: &mut TransportRequest<'_>) -> Result<Completion, Errno> {
        self.log.push((req.interface, req.cdb.to_vec()));
        if req.interface == Interface::V4 && !self.v4_supported {
            return Err(Errno::EINVAL);
        }
        let clean = match req.interface {
            Interface::V4 => Completion::CLEAN_V4,
            Interface::V3 => Completion::CLEAN_V3,
        };
        match req.cdb[0] {
            INQUIRY_OPCODE => {
                if let Some(e) = self.inquiry_error {
                    return Err(e);
                }
                req.data.fill(0);
                req.data[0] = self.peripheral_type;
                Ok(clean)
            },
            ATA_PASS_THROUGH_12 | ATA_PASS_THROUGH_16 => {
                req.data.copy_from_slice(&self.identify);
                if self.ata_status_return {
                    req.sense.0[0] = 0x72;
                    req.sense.0[8] = 0x09;
                    req.sense.0[9] = 0x0c;
                }
                Ok(self
                    .identify_completion
                    .unwrap_or_else(|| check_condition(req.interface)))
            },
            _ => Err(Errno::EIO),
        }
    }
}
