//! Mute control for the current default device of a class

use std::io::Write;

use tracing::debug;

use crate::audio::device::{DeviceType, MuteOp};
use crate::audio::directory::{DeviceStore, MuteScope};
use crate::error::{Error, Result};

/// Outcome of one applied mute operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuteChange {
    pub device_name: String,
    pub muted: bool,
}

fn scope_for(kind: DeviceType) -> Result<MuteScope> {
    match kind {
        DeviceType::Input => Ok(MuteScope::Input),
        DeviceType::Output => Ok(MuteScope::Output),
        // Rejected before any property access; the system-sound class has
        // no mutable mute state of its own.
        DeviceType::SystemOutput | DeviceType::All => Err(Error::Unsupported(format!(
            "audio device \"{kind}\" may not be muted"
        ))),
    }
}

/// Apply a mute operation to the current default device of `kind`.
///
/// Sequence: resolve the class's default device, read its mute boolean
/// under the class scope, resolve `Toggle` against the just-read value,
/// announce, write back. The announcement precedes the write, so a
/// failing write still shows what was attempted before its error. A read
/// or write failure aborts with the platform status; there is no
/// compensating action for a half-applied sequence.
pub fn set_mute<S, W>(store: &S, kind: DeviceType, op: MuteOp, out: &mut W) -> Result<MuteChange>
where
    S: DeviceStore + ?Sized,
    W: Write,
{
    let scope = scope_for(kind)?;
    let device = store.default_device(kind)?;
    let name = store.device_name(device);

    let muted = match op {
        MuteOp::Mute => true,
        MuteOp::Unmute => false,
        MuteOp::Toggle => !store.mute(device, scope)?,
    };

    writeln!(
        out,
        "Setting device {} to {}",
        name,
        if muted { "muted" } else { "unmuted" }
    )?;

    debug!(device, kind = %kind, muted, "writing mute state");
    store.set_mute(device, scope, muted)?;

    Ok(MuteChange {
        device_name: name,
        muted,
    })
}
