//! Command-line surface
//!
//! One function selector per invocation (`-a`, `-c`, `-n`, `-i`, `-u`,
//! `-s`, `-m`), plus the `-t`/`-f` modifiers. The short-flag surface is
//! kept stable for scripts.

use clap::{ArgGroup, Parser};

use crate::audio::device::{DeviceId, DeviceType, MuteOp};
use crate::format::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "audio-switch",
    about = "Switch, inspect and mute the system's audio devices",
    group(ArgGroup::new("function")
        .args(["all", "current", "next", "id", "uid", "name", "mute"])
        .multiple(false))
)]
pub struct Cli {
    /// Shows all devices
    #[arg(short = 'a')]
    pub all: bool,

    /// Shows the current device
    #[arg(short = 'c')]
    pub current: bool,

    /// Cycles the audio device to the next one
    #[arg(short = 'n')]
    pub next: bool,

    /// Output format
    #[arg(short = 'f', value_enum, default_value = "human", value_name = "format")]
    pub format: OutputFormat,

    /// Device type; defaults per operation (output for most, input for mute)
    #[arg(short = 't', value_enum, value_name = "type")]
    pub device_type: Option<DeviceType>,

    /// Sets the mute status of the device selected with -t (input/output only)
    #[arg(short = 'm', value_enum, value_name = "mute")]
    pub mute: Option<MuteOp>,

    /// Sets the audio device to the given device by id
    #[arg(short = 'i', value_name = "device_id")]
    pub id: Option<DeviceId>,

    /// Sets the audio device to the given device by uid or a substring of the uid
    #[arg(short = 'u', value_name = "device_uid")]
    pub uid: Option<String>,

    /// Sets the audio device to the given device by name
    #[arg(short = 's', value_name = "device_name")]
    pub name: Option<String>,
}

/// The one operation an invocation performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Function {
    ShowAll,
    ShowCurrent,
    CycleNext,
    SetById(DeviceId),
    SetByUid(String),
    SetByName(String),
    Mute(MuteOp),
}

impl Cli {
    /// Resolve the selected function; `None` when no selector was given.
    pub fn function(&self) -> Option<Function> {
        if self.all {
            Some(Function::ShowAll)
        } else if self.current {
            Some(Function::ShowCurrent)
        } else if self.next {
            Some(Function::CycleNext)
        } else if let Some(id) = self.id {
            Some(Function::SetById(id))
        } else if let Some(uid) = &self.uid {
            Some(Function::SetByUid(uid.clone()))
        } else if let Some(name) = &self.name {
            Some(Function::SetByName(name.clone()))
        } else {
            self.mute.map(Function::Mute)
        }
    }
}
