//! Device directory: the host property-store contract and filtered
//! enumeration built on top of it.

use tracing::debug;

use crate::audio::device::{Device, DeviceId, DeviceType};
use crate::error::Result;

/// Scope a mute property read/write applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MuteScope {
    Input,
    Output,
}

/// Host audio property store.
///
/// One implementation talks to the real OS audio subsystem; tests use an
/// in-memory fake. All id-taking probes are best-effort: a device that
/// fails a probe simply does not match, mirroring how the host treats
/// devices that cannot answer for a scope.
pub trait DeviceStore {
    /// All device handles known to the host, in host enumeration order.
    /// Failure here is fatal for the invocation; there is no partial list.
    fn device_ids(&self) -> Result<Vec<DeviceId>>;

    /// Does the device carry input streams?
    fn is_input(&self, id: DeviceId) -> bool;

    /// Does the device carry output streams?
    fn is_output(&self, id: DeviceId) -> bool;

    /// Stricter output probe used for the system-sound class. Some
    /// transport types only answer correctly under this property path.
    fn is_system_output(&self, id: DeviceId) -> bool;

    /// Human-readable device name; empty when unavailable.
    fn device_name(&self, id: DeviceId) -> String;

    /// Stable device UID; empty string signals "unavailable", never an error.
    fn device_uid(&self, id: DeviceId) -> String;

    /// The host's current default device for a class. Implementations
    /// treat `All` as the output selector, matching the host's fallback.
    fn default_device(&self, kind: DeviceType) -> Result<DeviceId>;

    /// Write the host default-device property for a concrete class.
    /// No compatibility pre-check; a mismatched write surfaces as the
    /// host's own error status.
    fn set_default_device(&self, kind: DeviceType, id: DeviceId) -> Result<()>;

    /// Read the mute boolean for a device under the given scope.
    fn mute(&self, id: DeviceId, scope: MuteScope) -> Result<bool>;

    /// Write the mute boolean for a device under the given scope.
    fn set_mute(&self, id: DeviceId, scope: MuteScope, muted: bool) -> Result<()>;
}

/// Does `id` belong to the class `kind`?
///
/// `Input`/`Output` use the scoped stream probes; `SystemOutput` uses the
/// stricter output check; `All` applies no filter.
pub fn matches_type<S: DeviceStore + ?Sized>(store: &S, id: DeviceId, kind: DeviceType) -> bool {
    match kind {
        DeviceType::Input => store.is_input(id),
        DeviceType::Output => store.is_output(id),
        DeviceType::SystemOutput => store.is_system_output(id),
        DeviceType::All => true,
    }
}

/// Device ids of one concrete class, in host enumeration order.
pub fn ids_of_type<S: DeviceStore + ?Sized>(store: &S, kind: DeviceType) -> Result<Vec<DeviceId>> {
    let ids = store.device_ids()?;
    let filtered: Vec<DeviceId> = ids
        .into_iter()
        .filter(|&id| matches_type(store, id, kind))
        .collect();
    debug!(kind = %kind, count = filtered.len(), "filtered device ids");
    Ok(filtered)
}

/// Full device records of one concrete class, in host enumeration order.
///
/// System-sound listings render their rows with the output class, the
/// same way the host reports those devices.
pub fn devices_of_type<S: DeviceStore + ?Sized>(store: &S, kind: DeviceType) -> Result<Vec<Device>> {
    let row_kind = match kind {
        DeviceType::SystemOutput => DeviceType::Output,
        other => other,
    };
    let devices = ids_of_type(store, kind)?
        .into_iter()
        .map(|id| Device {
            kind: row_kind,
            id,
            uid: store.device_uid(id),
            name: store.device_name(id),
        })
        .collect();
    Ok(devices)
}

/// The current default device of a class, as a full record.
pub fn current_device<S: DeviceStore + ?Sized>(store: &S, kind: DeviceType) -> Result<Device> {
    let id = store.default_device(kind)?;
    Ok(Device {
        kind,
        id,
        uid: store.device_uid(id),
        name: store.device_name(id),
    })
}

#[cfg(test)]
pub(crate) mod fake {
    //! In-memory property store for tests.

    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;
    use crate::error::Error;

    #[derive(Debug, Clone)]
    pub struct FakeDevice {
        pub id: DeviceId,
        pub name: &'static str,
        pub uid: &'static str,
        pub input: bool,
        pub output: bool,
    }

    impl FakeDevice {
        pub fn output(id: DeviceId, name: &'static str, uid: &'static str) -> Self {
            FakeDevice {
                id,
                name,
                uid,
                input: false,
                output: true,
            }
        }

        pub fn input(id: DeviceId, name: &'static str, uid: &'static str) -> Self {
            FakeDevice {
                id,
                name,
                uid,
                input: true,
                output: false,
            }
        }
    }

    #[derive(Default)]
    pub struct FakeStore {
        pub devices: Vec<FakeDevice>,
        pub defaults: RefCell<HashMap<&'static str, DeviceId>>,
        pub mutes: RefCell<HashMap<(DeviceId, MuteScope), bool>>,
        /// Every mute write performed, in order.
        pub mute_writes: RefCell<Vec<(DeviceId, MuteScope, bool)>>,
        /// When set, mute writes fail with a platform status and are not
        /// recorded.
        pub fail_mute_writes: std::cell::Cell<bool>,
    }

    impl FakeStore {
        pub fn new(devices: Vec<FakeDevice>) -> Self {
            FakeStore {
                devices,
                ..Default::default()
            }
        }

        pub fn with_default(self, kind: DeviceType, id: DeviceId) -> Self {
            self.defaults.borrow_mut().insert(kind.as_str(), id);
            self
        }

        fn find(&self, id: DeviceId) -> Option<&FakeDevice> {
            self.devices.iter().find(|d| d.id == id)
        }

        fn default_key(kind: DeviceType) -> &'static str {
            match kind {
                DeviceType::All => DeviceType::Output.as_str(),
                other => other.as_str(),
            }
        }
    }

    impl DeviceStore for FakeStore {
        fn device_ids(&self) -> Result<Vec<DeviceId>> {
            Ok(self.devices.iter().map(|d| d.id).collect())
        }

        fn is_input(&self, id: DeviceId) -> bool {
            self.find(id).map(|d| d.input).unwrap_or(false)
        }

        fn is_output(&self, id: DeviceId) -> bool {
            self.find(id).map(|d| d.output).unwrap_or(false)
        }

        fn is_system_output(&self, id: DeviceId) -> bool {
            self.is_output(id)
        }

        fn device_name(&self, id: DeviceId) -> String {
            self.find(id).map(|d| d.name.to_string()).unwrap_or_default()
        }

        fn device_uid(&self, id: DeviceId) -> String {
            self.find(id).map(|d| d.uid.to_string()).unwrap_or_default()
        }

        fn default_device(&self, kind: DeviceType) -> Result<DeviceId> {
            self.defaults
                .borrow()
                .get(Self::default_key(kind))
                .copied()
                .ok_or_else(|| Error::not_found(format!("current {kind} audio device")))
        }

        fn set_default_device(&self, kind: DeviceType, id: DeviceId) -> Result<()> {
            self.defaults.borrow_mut().insert(Self::default_key(kind), id);
            Ok(())
        }

        fn mute(&self, id: DeviceId, scope: MuteScope) -> Result<bool> {
            Ok(self.mutes.borrow().get(&(id, scope)).copied().unwrap_or(false))
        }

        fn set_mute(&self, id: DeviceId, scope: MuteScope, muted: bool) -> Result<()> {
            if self.fail_mute_writes.get() {
                return Err(Error::platform(-1, "mute state write"));
            }
            self.mutes.borrow_mut().insert((id, scope), muted);
            self.mute_writes.borrow_mut().push((id, scope, muted));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::{FakeDevice, FakeStore};
    use super::*;

    fn store() -> FakeStore {
        FakeStore::new(vec![
            FakeDevice::input(1, "Internal Microphone", "BuiltInMicrophoneDevice"),
            FakeDevice::output(2, "Speakers", "BuiltInSpeakerDevice"),
            FakeDevice::output(3, "Headphones", "BuiltInHeadphoneDevice"),
        ])
    }

    #[test]
    fn test_ids_filtered_by_type() {
        let store = store();
        assert_eq!(ids_of_type(&store, DeviceType::Input).unwrap(), vec![1]);
        assert_eq!(ids_of_type(&store, DeviceType::Output).unwrap(), vec![2, 3]);
    }

    #[test]
    fn test_enumeration_order_preserved() {
        let store = FakeStore::new(vec![
            FakeDevice::output(9, "C", "c"),
            FakeDevice::output(4, "A", "a"),
            FakeDevice::output(7, "B", "b"),
        ]);
        assert_eq!(ids_of_type(&store, DeviceType::Output).unwrap(), vec![9, 4, 7]);
    }

    #[test]
    fn test_system_rows_render_as_output() {
        let store = store();
        let devices = devices_of_type(&store, DeviceType::SystemOutput).unwrap();
        assert!(devices.iter().all(|d| d.kind == DeviceType::Output));
    }
}
