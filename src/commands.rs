//! Command execution
//!
//! One function per invocation, dispatched over the device store. `all`
//! device-type requests decompose into independent per-class operations:
//! failures are reported per class and aggregated, successes are never
//! rolled back.

use std::io::Write;

use tracing::warn;

use crate::audio::device::{DeviceId, DeviceType, MuteOp};
use crate::audio::directory::{self, DeviceStore};
use crate::audio::{mute, selector};
use crate::cli::Function;
use crate::discovery::NetworkDevice;
use crate::error::{Error, Result};
use crate::format::{render, OutputFormat};

/// One parsed invocation: the function plus its modifiers.
#[derive(Debug, Clone)]
pub struct Request {
    pub function: Function,
    pub device_type: Option<DeviceType>,
    pub format: OutputFormat,
}

/// Execute one request against the store, writing user-facing output to
/// `out`. `discover` runs the network browse round and is only consulted
/// for output/system listings.
pub fn execute<S, W, D>(store: &S, req: &Request, mut discover: D, out: &mut W) -> Result<()>
where
    S: DeviceStore + ?Sized,
    W: Write,
    D: FnMut() -> Result<Vec<NetworkDevice>>,
{
    match &req.function {
        Function::ShowAll => match req.device_type {
            Some(kind @ (DeviceType::Input | DeviceType::Output | DeviceType::SystemOutput)) => {
                show_all(store, kind, req.format, &mut discover, out)
            }
            Some(DeviceType::All) | None => {
                show_all(store, DeviceType::Input, req.format, &mut discover, out)?;
                show_all(store, DeviceType::Output, req.format, &mut discover, out)
            }
        },
        Function::ShowCurrent => {
            let kind = req.device_type.unwrap_or(DeviceType::Output);
            if kind == DeviceType::All {
                for_each_class(&DeviceType::CONCRETE, out, |out, k| {
                    show_current(store, k, req.format, out)
                })
            } else {
                show_current(store, kind, req.format, out)
            }
        }
        Function::CycleNext => {
            let kind = req.device_type.unwrap_or(DeviceType::Output);
            if kind == DeviceType::All {
                for_each_class(&DeviceType::CONCRETE, out, |out, k| cycle_one(store, k, out))
            } else {
                cycle_one(store, kind, out)
            }
        }
        Function::SetById(id) => {
            let kind = req.device_type.unwrap_or(DeviceType::Output);
            // Deliberately no existence check: a stale or mistyped id is
            // caught by the host when the default is written back.
            set_and_announce(store, kind, *id, &format!("Device with ID: {id}"), out)
        }
        Function::SetByUid(uid) => {
            let kind = req.device_type.unwrap_or(DeviceType::Output);
            let id = selector::find_by_uid_substring(store, uid, kind)?.ok_or_else(|| {
                Error::not_found(format!("audio device with UID \"{uid}\" of type {kind}"))
            })?;
            let printable = format!("Device with UID: {}", store.device_uid(id));
            set_and_announce(store, kind, id, &printable, out)
        }
        Function::SetByName(name) => {
            let kind = req.device_type.unwrap_or(DeviceType::Output);
            if kind == DeviceType::All {
                set_all_by_name(store, name, out)
            } else {
                let id = selector::find_by_name(store, name, kind)?.ok_or_else(|| {
                    Error::not_found(format!("audio device named \"{name}\" of type {kind}"))
                })?;
                set_and_announce(store, kind, id, name, out)
            }
        }
        Function::Mute(op) => {
            let kind = req.device_type.unwrap_or(DeviceType::Input);
            if kind == DeviceType::All {
                // System sound is excluded: it has no mute of its own.
                for_each_class(&[DeviceType::Input, DeviceType::Output], out, |out, k| {
                    apply_mute(store, k, *op, out)
                })
            } else {
                apply_mute(store, kind, *op, out)
            }
        }
    }
}

/// Run one sub-operation per class, printing failures as they occur.
/// Successes stand; any failure makes the whole command fail.
fn for_each_class<W, F>(classes: &[DeviceType], out: &mut W, mut op: F) -> Result<()>
where
    W: Write,
    F: FnMut(&mut W, DeviceType) -> Result<()>,
{
    let mut failed = false;
    for &kind in classes {
        if let Err(e) = op(out, kind) {
            writeln!(out, "{e}")?;
            failed = true;
        }
    }
    if failed {
        return Err(Error::Partial);
    }
    Ok(())
}

/// List one class in enumeration order; output and system listings are
/// followed by the network receivers from one discovery round.
fn show_all<S, W, D>(
    store: &S,
    kind: DeviceType,
    format: OutputFormat,
    discover: &mut D,
    out: &mut W,
) -> Result<()>
where
    S: DeviceStore + ?Sized,
    W: Write,
    D: FnMut() -> Result<Vec<NetworkDevice>>,
{
    for device in directory::devices_of_type(store, kind)? {
        writeln!(out, "{}", render(&device, format))?;
    }

    if matches!(kind, DeviceType::Output | DeviceType::SystemOutput) {
        // A failed browse degrades to an empty network contribution; the
        // hardware listing above already went out.
        match discover() {
            Ok(receivers) => {
                for receiver in receivers {
                    writeln!(out, "{}", render(&receiver.into_device(), format))?;
                }
            }
            Err(e) => warn!("network receiver discovery failed: {e}"),
        }
    }
    Ok(())
}

fn show_current<S, W>(store: &S, kind: DeviceType, format: OutputFormat, out: &mut W) -> Result<()>
where
    S: DeviceStore + ?Sized,
    W: Write,
{
    let device = directory::current_device(store, kind)?;
    writeln!(out, "{}", render(&device, format))?;
    Ok(())
}

fn cycle_one<S, W>(store: &S, kind: DeviceType, out: &mut W) -> Result<()>
where
    S: DeviceStore + ?Sized,
    W: Write,
{
    let current = store.default_device(kind)?;
    let next = selector::next_device(store, current, kind)?
        .ok_or_else(|| Error::not_found(format!("next audio device of type {kind}")))?;
    let name = store.device_name(next);
    set_and_announce(store, kind, next, &name, out)
}

fn set_and_announce<S, W>(
    store: &S,
    kind: DeviceType,
    id: DeviceId,
    printable: &str,
    out: &mut W,
) -> Result<()>
where
    S: DeviceStore + ?Sized,
    W: Write,
{
    store.set_default_device(kind, id)?;
    writeln!(out, "{kind} audio device set to \"{printable}\"")?;
    Ok(())
}

/// Set every class that has a device with this exact name; classes
/// without one are skipped silently.
fn set_all_by_name<S, W>(store: &S, name: &str, out: &mut W) -> Result<()>
where
    S: DeviceStore + ?Sized,
    W: Write,
{
    let mut failed = false;
    for kind in DeviceType::CONCRETE {
        if let Some(id) = selector::find_by_name(store, name, kind)? {
            if let Err(e) = set_and_announce(store, kind, id, name, out) {
                writeln!(out, "{e}")?;
                failed = true;
            }
        }
    }
    if failed {
        return Err(Error::Partial);
    }
    Ok(())
}

fn apply_mute<S, W>(store: &S, kind: DeviceType, op: MuteOp, out: &mut W) -> Result<()>
where
    S: DeviceStore + ?Sized,
    W: Write,
{
    mute::set_mute(store, kind, op, out)?;
    Ok(())
}
