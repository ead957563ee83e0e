// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! `SG_IO` and `HDIO_GET_IDENTITY` on Linux block and sg nodes.

use std::{
    os::fd::{AsRawFd, BorrowedFd},
    ptr,
};

use libc::{c_int, c_uchar, c_uint, c_ushort, c_void};
use nix::{errno::Errno, ioctl_read_bad, ioctl_readwrite_bad};
use tracing::debug;

use crate::{
    models::identify::{IDENTIFY_LEN, RawIdentifyBlock},
    transport::{Completion, Direction, Interface, SgIo, TransportRequest},
};

const SG_IO: u32 = 0x2285;
const HDIO_GET_IDENTITY: u32 = 0x030D;

const BSG_PROTOCOL_SCSI: u32 = 0;
const BSG_SUB_PROTOCOL_SCSI_CMD: u32 = 0;

const SG_DXFER_NONE: c_int = -1;
const SG_DXFER_TO_DEV: c_int = -2;
const SG_DXFER_FROM_DEV: c_int = -3;

/// `struct sg_io_v4` from `<linux/bsg.h>`.
#[repr(C)]
#[derive(Debug, Default)]
struct SgIoV4 {
    guard: i32,
    protocol: u32,
    subprotocol: u32,
    request_len: u32,
    request: u64,
    request_tag: u64,
    request_attr: u32,
    request_priority: u32,
    request_extra: u32,
    max_response_len: u32,
    response: u64,
    dout_iovec_count: u32,
    dout_xfer_len: u32,
    din_iovec_count: u32,
    din_xfer_len: u32,
    dout_xferp: u64,
    din_xferp: u64,
    timeout: u32,
    flags: u32,
    usr_ptr: u64,
    spare_in: u32,
    driver_status: u32,
    transport_status: u32,
    device_status: u32,
    retry_delay: u32,
    info: u32,
    duration: u32,
    response_len: u32,
    din_resid: i32,
    dout_resid: i32,
    generated_tag: u64,
    spare_out: u32,
    padding: u32,
}

/// `struct sg_io_hdr` from `<scsi/sg.h>`.
#[repr(C)]
#[derive(Debug)]
struct SgIoHdr {
    interface_id: c_int,
    dxfer_direction: c_int,
    cmd_len: c_uchar,
    mx_sb_len: c_uchar,
    iovec_count: c_ushort,
    dxfer_len: c_uint,
    dxferp: *mut c_void,
    cmdp: *mut c_uchar,
    sbp: *mut c_uchar,
    timeout: c_uint,
    flags: c_uint,
    pack_id: c_int,
    usr_ptr: *mut c_void,
    status: c_uchar,
    masked_status: c_uchar,
    msg_status: c_uchar,
    sb_len_wr: c_uchar,
    host_status: c_ushort,
    driver_status: c_ushort,
    resid: c_int,
    duration: c_uint,
    info: c_uint,
}

ioctl_readwrite_bad!(sg_io_v4, SG_IO, SgIoV4);
ioctl_readwrite_bad!(sg_io_v3, SG_IO, SgIoHdr);
ioctl_read_bad!(hdio_get_identity, HDIO_GET_IDENTITY, [u8; IDENTIFY_LEN]);

/// Device handle for SG_IO. Borrows the descriptor; opening and closing it
/// stays with the caller.
#[derive(Debug, Clone, Copy)]
pub struct SgDevice<'fd> {
    fd: BorrowedFd<'fd>,
}

impl<'fd> SgDevice<'fd> {
    pub fn new(fd: BorrowedFd<'fd>) -> Self {
        Self { fd }
    }

    /// Legacy `HDIO_GET_IDENTITY`: the kernel's cached IDENTIFY data, in
    /// host layout.
    pub fn legacy_identity(&self) -> Result<RawIdentifyBlock, Errno> {
        let mut block = RawIdentifyBlock::default();
        // SAFETY: the kernel writes at most 512 bytes into `block.0`.
        unsafe { hdio_get_identity(self.fd.as_raw_fd(), &mut block.0) }?;
        Ok(block)
    }

    fn submit_v4(&self, req: &mut TransportRequest<'_>) -> Result<Completion, Errno> {
        let mut io = SgIoV4 {
            guard: i32::from(b'Q'),
            protocol: BSG_PROTOCOL_SCSI,
            subprotocol: BSG_SUB_PROTOCOL_SCSI_CMD,
            request_len: req.cdb.len() as u32,
            request: req.cdb.as_ptr() as u64,
            max_response_len: req.sense.0.len() as u32,
            response: req.sense.as_mut_slice().as_mut_ptr() as u64,
            timeout: req.timeout_ms(),
            ..Default::default()
        };
        let len = req.data.len() as u32;
        let xferp = req.data.as_mut_ptr() as u64;
        match req.direction {
            Direction::FromDevice => {
                io.din_xfer_len = len;
                io.din_xferp = xferp;
            },
            Direction::ToDevice => {
                io.dout_xfer_len = len;
                io.dout_xferp = xferp;
            },
            Direction::None => {},
        }

        // SAFETY: every pointer in `io` refers to a buffer borrowed by `req`
        // that outlives the call, with the length given next to it.
        unsafe { sg_io_v4(self.fd.as_raw_fd(), &mut io) }?;

        Ok(Completion::V4 {
            device_status: io.device_status,
            transport_status: io.transport_status,
            driver_status: io.driver_status,
        })
    }

    fn submit_v3(&self, req: &mut TransportRequest<'_>) -> Result<Completion, Errno> {
        let dxfer_direction = match req.direction {
            Direction::FromDevice => SG_DXFER_FROM_DEV,
            Direction::ToDevice => SG_DXFER_TO_DEV,
            Direction::None => SG_DXFER_NONE,
        };
        let mut io = SgIoHdr {
            interface_id: c_int::from(b'S'),
            dxfer_direction,
            cmd_len: req.cdb.len() as c_uchar,
            mx_sb_len: req.sense.0.len() as c_uchar,
            iovec_count: 0,
            dxfer_len: req.data.len() as c_uint,
            dxferp: req.data.as_mut_ptr().cast(),
            cmdp: req.cdb.as_ptr().cast_mut(),
            sbp: req.sense.as_mut_slice().as_mut_ptr(),
            timeout: req.timeout_ms(),
            flags: 0,
            pack_id: 0,
            usr_ptr: ptr::null_mut(),
            status: 0,
            masked_status: 0,
            msg_status: 0,
            sb_len_wr: 0,
            host_status: 0,
            driver_status: 0,
            resid: 0,
            duration: 0,
            info: 0,
        };

        // SAFETY: as for v4; the kernel only reads through `cmdp`.
        unsafe { sg_io_v3(self.fd.as_raw_fd(), &mut io) }?;

        Ok(Completion::V3 {
            status: io.status,
            host_status: io.host_status,
            driver_status: io.driver_status,
        })
    }
}

impl SgIo for SgDevice<'_> {
    fn submit(&mut self, request: &mut TransportRequest<'_>) -> Result<Completion, Errno> {
        let res = match request.interface {
            Interface::V4 => self.submit_v4(request),
            Interface::V3 => self.submit_v3(request),
        };
        if let Err(e) = res {
            debug!(interface = ?request.interface, error = %e, "SG_IO ioctl returned error");
        }
        res
    }
}
