//! Core device data model

use std::fmt;

use clap::ValueEnum;

/// Transient numeric handle for an audio device.
///
/// Valid only for the lifetime of one process invocation; the host may
/// renumber devices after reconnects, so ids must never be persisted.
pub type DeviceId = u32;

/// Device class a query or operation applies to.
///
/// `All` is a query-time modifier meaning "apply to input, output and
/// system independently" and never describes a concrete device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DeviceType {
    Input,
    Output,
    #[value(name = "system")]
    SystemOutput,
    All,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Input => "input",
            DeviceType::Output => "output",
            DeviceType::SystemOutput => "system",
            DeviceType::All => "all",
        }
    }

    /// The three concrete classes `All` decomposes into.
    pub const CONCRETE: [DeviceType; 3] = [
        DeviceType::Input,
        DeviceType::Output,
        DeviceType::SystemOutput,
    ];
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested mute operation.
///
/// `Toggle` is resolved to a concrete boolean only at apply time, from a
/// fresh read of the device's current mute state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MuteOp {
    Mute,
    Unmute,
    Toggle,
}

/// One enumerated audio device, hardware or network-discovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub kind: DeviceType,
    pub id: DeviceId,
    /// Stable platform identifier; empty when unavailable (some network
    /// receivers advertise none).
    pub uid: String,
    pub name: String,
}
