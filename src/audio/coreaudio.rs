//! CoreAudio HAL implementation of the device property store
//!
//! Raw `AudioObjectGetPropertyData`/`AudioObjectSetPropertyData` access via
//! coreaudio-sys; CFString conversion via core-foundation. Only compiled on
//! macOS.

use std::mem::{self, MaybeUninit};
use std::ptr;

use core_foundation::base::TCFType;
use core_foundation::string::{CFString, CFStringRef};
use coreaudio_sys::{
    kAudioDevicePropertyDeviceNameCFString, kAudioDevicePropertyDeviceUID,
    kAudioDevicePropertyMute, kAudioDevicePropertyStreams,
    kAudioHardwarePropertyDefaultInputDevice, kAudioHardwarePropertyDefaultOutputDevice,
    kAudioHardwarePropertyDefaultSystemOutputDevice, kAudioHardwarePropertyDevices,
    kAudioObjectPropertyElementMaster, kAudioObjectPropertyScopeGlobal,
    kAudioObjectPropertyScopeInput, kAudioObjectPropertyScopeOutput, kAudioObjectSystemObject,
    AudioObjectGetPropertyData, AudioObjectGetPropertyDataSize, AudioObjectID,
    AudioObjectPropertyAddress, AudioObjectPropertyScope, AudioObjectPropertySelector,
    AudioObjectSetPropertyData,
};
use tracing::debug;

use crate::audio::device::{DeviceId, DeviceType};
use crate::audio::directory::{DeviceStore, MuteScope};
use crate::error::{Error, Result};

/// Property store backed by the live CoreAudio hardware object tree.
#[derive(Debug, Default)]
pub struct CoreAudioStore;

impl CoreAudioStore {
    pub fn new() -> Self {
        CoreAudioStore
    }
}

fn address(
    selector: AudioObjectPropertySelector,
    scope: AudioObjectPropertyScope,
) -> AudioObjectPropertyAddress {
    AudioObjectPropertyAddress {
        mSelector: selector,
        mScope: scope,
        mElement: kAudioObjectPropertyElementMaster,
    }
}

/// Read a fixed-size property value from an audio object.
fn get_property<T>(
    object: AudioObjectID,
    addr: &AudioObjectPropertyAddress,
    context: &str,
) -> Result<T> {
    let mut data = MaybeUninit::<T>::uninit();
    let mut size = mem::size_of::<T>() as u32;
    let status = unsafe {
        AudioObjectGetPropertyData(
            object,
            addr,
            0,
            ptr::null(),
            &mut size,
            data.as_mut_ptr() as *mut _,
        )
    };
    if status != 0 {
        return Err(Error::platform(status, context));
    }
    Ok(unsafe { data.assume_init() })
}

/// Write a fixed-size property value to an audio object.
fn set_property<T>(
    object: AudioObjectID,
    addr: &AudioObjectPropertyAddress,
    value: &T,
    context: &str,
) -> Result<()> {
    let status = unsafe {
        AudioObjectSetPropertyData(
            object,
            addr,
            0,
            ptr::null(),
            mem::size_of::<T>() as u32,
            value as *const T as *const _,
        )
    };
    if status != 0 {
        return Err(Error::platform(status, context));
    }
    Ok(())
}

/// Does the object report a non-empty value for the property? Used for the
/// stream-presence probes, where only the size matters.
fn has_property_data(object: AudioObjectID, addr: &AudioObjectPropertyAddress) -> bool {
    let mut size: u32 = 0;
    let status =
        unsafe { AudioObjectGetPropertyDataSize(object, addr, 0, ptr::null(), &mut size) };
    status == 0 && size > 0
}

/// Read a CFString-valued property, handing ownership of the created
/// string to core-foundation. Empty string on any failure.
fn get_string_property(object: AudioObjectID, selector: AudioObjectPropertySelector) -> String {
    let addr = address(selector, kAudioObjectPropertyScopeGlobal);
    match get_property::<CFStringRef>(object, &addr, "string property read") {
        Ok(r) if !r.is_null() => unsafe { CFString::wrap_under_create_rule(r) }.to_string(),
        _ => String::new(),
    }
}

fn default_selector(kind: DeviceType) -> AudioObjectPropertySelector {
    match kind {
        DeviceType::Input => kAudioHardwarePropertyDefaultInputDevice,
        DeviceType::SystemOutput => kAudioHardwarePropertyDefaultSystemOutputDevice,
        DeviceType::Output | DeviceType::All => kAudioHardwarePropertyDefaultOutputDevice,
    }
}

fn mute_address(scope: MuteScope) -> AudioObjectPropertyAddress {
    let scope = match scope {
        MuteScope::Input => kAudioObjectPropertyScopeInput,
        MuteScope::Output => kAudioObjectPropertyScopeOutput,
    };
    address(kAudioDevicePropertyMute, scope)
}

impl DeviceStore for CoreAudioStore {
    fn device_ids(&self) -> Result<Vec<DeviceId>> {
        let addr = address(kAudioHardwarePropertyDevices, kAudioObjectPropertyScopeGlobal);

        let mut size: u32 = 0;
        let status = unsafe {
            AudioObjectGetPropertyDataSize(
                kAudioObjectSystemObject,
                &addr,
                0,
                ptr::null(),
                &mut size,
            )
        };
        if status != 0 {
            return Err(Error::platform(status, "device list size query"));
        }

        let count = size as usize / mem::size_of::<AudioObjectID>();
        let mut ids: Vec<AudioObjectID> = vec![0; count];
        let status = unsafe {
            AudioObjectGetPropertyData(
                kAudioObjectSystemObject,
                &addr,
                0,
                ptr::null(),
                &mut size,
                ids.as_mut_ptr() as *mut _,
            )
        };
        if status != 0 {
            return Err(Error::platform(status, "device list query"));
        }

        // The list can shrink between the size query and the data query.
        ids.truncate(size as usize / mem::size_of::<AudioObjectID>());
        debug!(count = ids.len(), "enumerated hardware devices");
        Ok(ids)
    }

    fn is_input(&self, id: DeviceId) -> bool {
        let addr = address(kAudioDevicePropertyStreams, kAudioObjectPropertyScopeInput);
        has_property_data(id, &addr)
    }

    fn is_output(&self, id: DeviceId) -> bool {
        let addr = address(kAudioDevicePropertyStreams, kAudioObjectPropertyScopeOutput);
        has_property_data(id, &addr)
    }

    fn is_system_output(&self, id: DeviceId) -> bool {
        // Global-scope stream probe; some transports (AirPlay among them)
        // only answer for the output class under this path.
        let addr = address(kAudioDevicePropertyStreams, kAudioObjectPropertyScopeGlobal);
        has_property_data(id, &addr)
    }

    fn device_name(&self, id: DeviceId) -> String {
        get_string_property(id, kAudioDevicePropertyDeviceNameCFString)
    }

    fn device_uid(&self, id: DeviceId) -> String {
        get_string_property(id, kAudioDevicePropertyDeviceUID)
    }

    fn default_device(&self, kind: DeviceType) -> Result<DeviceId> {
        let addr = address(default_selector(kind), kAudioObjectPropertyScopeGlobal);
        let id: AudioObjectID = get_property(
            kAudioObjectSystemObject,
            &addr,
            &format!("default {kind} device read"),
        )?;
        if id == 0 {
            return Err(Error::not_found(format!("current {kind} audio device")));
        }
        Ok(id)
    }

    fn set_default_device(&self, kind: DeviceType, id: DeviceId) -> Result<()> {
        let addr = address(default_selector(kind), kAudioObjectPropertyScopeGlobal);
        set_property(
            kAudioObjectSystemObject,
            &addr,
            &id,
            &format!("default {kind} device write"),
        )
    }

    fn mute(&self, id: DeviceId, scope: MuteScope) -> Result<bool> {
        let muted: u32 = get_property(id, &mute_address(scope), "mute state read")?;
        Ok(muted != 0)
    }

    fn set_mute(&self, id: DeviceId, scope: MuteScope, muted: bool) -> Result<()> {
        let value: u32 = muted.into();
        set_property(id, &mute_address(scope), &value, "mute state write")
    }
}
