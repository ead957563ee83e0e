// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use nix::errno::Errno;

use crate::transport::{Completion, Interface, TransportError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition<R> {
    /// Reissue the same command in another interface shape.
    Next(Interface),
    Done(R),
}

/// Typed outcome of one attempt. `EINVAL` from SG_IO means the driver does
/// not understand the request shape.
pub fn classify_attempt(outcome: Result<Completion, Errno>) -> Result<Completion, TransportError> {
    match outcome {
        Ok(c) => Ok(c),
        Err(Errno::EINVAL) => Err(TransportError::Unsupported),
        Err(e) => Err(TransportError::Ioctl(e)),
    }
}

/// v4 refused as unsupported → retry as v3. Anything else is final.
pub fn decide(
    interface: Interface,
    attempt: Result<Completion, TransportError>,
) -> Transition<Result<Completion, TransportError>> {
    match (interface, attempt) {
        (Interface::V4, Err(TransportError::Unsupported)) => Transition::Next(Interface::V3),
        (Interface::V3, Err(TransportError::Unsupported)) => {
            Transition::Done(Err(TransportError::Ioctl(Errno::EINVAL)))
        },
        (_, r) => Transition::Done(r),
    }
}
