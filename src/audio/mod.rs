//! Audio subsystem module

pub mod device;
pub mod directory;
pub mod mute;
pub mod selector;

#[cfg(target_os = "macos")]
pub mod coreaudio;

pub use device::{Device, DeviceId, DeviceType, MuteOp};
pub use directory::{DeviceStore, MuteScope};

#[cfg(target_os = "macos")]
pub use coreaudio::CoreAudioStore;
