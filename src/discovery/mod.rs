//! Network receiver discovery
//!
//! One synchronous DNS-SD browse round over the RAOP service type. The
//! round contributes to output listings only; switching, cycling and
//! muting never consult it.

pub mod parser;

use std::time::Duration;

use mdns_sd::{ServiceDaemon, ServiceEvent};
use tracing::{debug, warn};

use crate::audio::device::{Device, DeviceId, DeviceType};
use crate::error::{Error, Result};

/// Service type advertised by network audio receivers.
pub const SERVICE_TYPE: &str = "_raop._tcp.local.";

/// Wait for the first discovery event before giving up on the round.
const FIRST_EVENT_WAIT: Duration = Duration::from_secs(2);

/// Quiet period after a resolution that ends the round.
const QUIET_PERIOD: Duration = Duration::from_millis(500);

/// A receiver resolved during one discovery round.
///
/// The id is the ordinal of the resolution within the round; it is not
/// stable and must never be compared across invocations. The record lives
/// only for the round, nothing is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkDevice {
    pub id: DeviceId,
    pub uid: String,
    pub name: String,
}

impl NetworkDevice {
    /// Shape the receiver like a hardware output device for rendering.
    pub fn into_device(self) -> Device {
        Device {
            kind: DeviceType::Output,
            id: self.id,
            uid: self.uid,
            name: self.name,
        }
    }
}

/// Run one browse round and return the resolvable receivers in
/// resolution order.
///
/// Each resolved instance is handled to completion before the next event
/// is taken; the round ends once the event stream goes quiet. Malformed
/// advertisements and the inspecting host itself are skipped.
pub fn discover() -> Result<Vec<NetworkDevice>> {
    let daemon = ServiceDaemon::new().map_err(|e| Error::Discovery(e.to_string()))?;
    let events = daemon
        .browse(SERVICE_TYPE)
        .map_err(|e| Error::Discovery(e.to_string()))?;

    let mut devices = Vec::new();
    let mut timeout = FIRST_EVENT_WAIT;
    while let Ok(event) = events.recv_timeout(timeout) {
        match event {
            ServiceEvent::ServiceResolved(info) => {
                timeout = QUIET_PERIOD;
                if parser::is_local_host(info.get_hostname()) {
                    debug!(host = info.get_hostname(), "skipping local host");
                    continue;
                }
                match parser::parse_instance_name(info.get_fullname()) {
                    Some(ad) => {
                        debug!(name = %ad.name, uid = %ad.uid, "resolved receiver");
                        devices.push(NetworkDevice {
                            id: devices.len() as DeviceId,
                            uid: ad.uid,
                            name: ad.name,
                        });
                    }
                    None => {
                        warn!(fullname = info.get_fullname(), "malformed advertisement, skipped");
                    }
                }
            }
            // A found-but-unresolved instance keeps the full wait alive.
            ServiceEvent::ServiceFound(_, _) | ServiceEvent::SearchStarted(_) => {}
            _ => {}
        }
    }

    let _ = daemon.stop_browse(SERVICE_TYPE);
    let _ = daemon.shutdown();

    debug!(count = devices.len(), "discovery round complete");
    Ok(devices)
}
