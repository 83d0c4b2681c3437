//! # audio-switch
//!
//! Single-shot command-line control of the host's audio devices: list
//! them, show or switch the default device per class (input / output /
//! system sound), cycle to the next device, and mute or unmute. Output
//! listings also include AirPlay-style network receivers found in one
//! DNS-SD browse round.
//!
//! ## Architecture Overview
//!
//! ```text
//!  CLI flags ──► commands ──┬──► audio::directory ──► DeviceStore (CoreAudio HAL)
//!                           │        │
//!                           │        ├──► audio::selector  (match / cycle)
//!                           │        └──► audio::mute      (read-flip-write)
//!                           │
//!                           ├──► discovery (one RAOP browse round, listing only)
//!                           │
//!                           └──► format (human / cli / json rows)
//! ```
//!
//! Everything above the `DeviceStore` trait is platform-independent; the
//! CoreAudio implementation is compiled on macOS only.

pub mod audio;
pub mod cli;
pub mod commands;
pub mod discovery;
pub mod error;
pub mod format;

pub use error::{Error, Result};
