//! Device selection and cycling
//!
//! All lookups scan the type-filtered device sequence in host enumeration
//! order and return the first hit, or `None` when the scan exhausts.

use crate::audio::device::{DeviceId, DeviceType};
use crate::audio::directory::{self, DeviceStore};
use crate::error::Result;

/// First device of the class whose name equals `name` exactly.
///
/// Case-sensitive, no normalization; "Speakers" does not match "speakers".
pub fn find_by_name<S: DeviceStore + ?Sized>(
    store: &S,
    name: &str,
    kind: DeviceType,
) -> Result<Option<DeviceId>> {
    let ids = directory::ids_of_type(store, kind)?;
    Ok(ids.into_iter().find(|&id| store.device_name(id) == name))
}

/// First device of the class whose UID contains `fragment` as a contiguous
/// substring. Unanchored and case-sensitive, so an abbreviated UID works
/// as long as it is copied verbatim.
pub fn find_by_uid_substring<S: DeviceStore + ?Sized>(
    store: &S,
    fragment: &str,
    kind: DeviceType,
) -> Result<Option<DeviceId>> {
    let ids = directory::ids_of_type(store, kind)?;
    Ok(ids
        .into_iter()
        .find(|&id| store.device_uid(id).contains(fragment)))
}

/// Successor of `current` in `seq`, wrapping to the front.
///
/// When `current` is not in `seq` the cycle restarts at `seq[0]`. The
/// result depends only on enumeration order, never on usage history, so
/// repeated calls advance identically while the device set is stable.
pub fn next_in_sequence(seq: &[DeviceId], current: DeviceId) -> Option<DeviceId> {
    let first = *seq.first()?;
    match seq.iter().position(|&id| id == current) {
        Some(pos) if pos + 1 < seq.len() => Some(seq[pos + 1]),
        _ => Some(first),
    }
}

/// Next device after `current` in the type-filtered enumeration order.
pub fn next_device<S: DeviceStore + ?Sized>(
    store: &S,
    current: DeviceId,
    kind: DeviceType,
) -> Result<Option<DeviceId>> {
    let ids = directory::ids_of_type(store, kind)?;
    Ok(next_in_sequence(&ids, current))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::directory::fake::{FakeDevice, FakeStore};

    fn store() -> FakeStore {
        FakeStore::new(vec![
            FakeDevice::input(1, "Internal Microphone", "BuiltInMicrophoneDevice"),
            FakeDevice::output(2, "Speakers", "BuiltInSpeakerDevice"),
            FakeDevice::output(3, "Headphones", "BuiltInHeadphoneDevice"),
            FakeDevice::output(4, "USB DAC", "AppleUSBAudioEngine:ACME:DAC:14100000:2"),
        ])
    }

    #[test]
    fn test_find_by_name_exact() {
        let store = store();
        let found = find_by_name(&store, "Headphones", DeviceType::Output).unwrap();
        assert_eq!(found, Some(3));
    }

    #[test]
    fn test_find_by_name_is_case_sensitive() {
        let store = store();
        let found = find_by_name(&store, "headphones", DeviceType::Output).unwrap();
        assert_eq!(found, None);
    }

    #[test]
    fn test_find_by_name_respects_type_filter() {
        let store = store();
        // The microphone exists, but not as an output device.
        let found = find_by_name(&store, "Internal Microphone", DeviceType::Output).unwrap();
        assert_eq!(found, None);
        let found = find_by_name(&store, "Internal Microphone", DeviceType::Input).unwrap();
        assert_eq!(found, Some(1));
    }

    #[test]
    fn test_uid_match_full_and_substring() {
        let store = store();
        let full = "AppleUSBAudioEngine:ACME:DAC:14100000:2";
        assert_eq!(
            find_by_uid_substring(&store, full, DeviceType::Output).unwrap(),
            Some(4)
        );
        assert_eq!(
            find_by_uid_substring(&store, "ACME:DAC", DeviceType::Output).unwrap(),
            Some(4)
        );
    }

    #[test]
    fn test_uid_match_rejects_non_substring() {
        let store = store();
        assert_eq!(
            find_by_uid_substring(&store, "DAC:ACME", DeviceType::Output).unwrap(),
            None
        );
    }

    #[test]
    fn test_uid_match_first_in_enumeration_order() {
        let store = store();
        // "BuiltIn" is a fragment of both the speaker and headphone UIDs;
        // the earlier-enumerated device wins.
        assert_eq!(
            find_by_uid_substring(&store, "BuiltIn", DeviceType::Output).unwrap(),
            Some(2)
        );
    }

    #[test]
    fn test_cycle_is_modular_successor() {
        let seq = [2, 3, 4];
        assert_eq!(next_in_sequence(&seq, 2), Some(3));
        assert_eq!(next_in_sequence(&seq, 3), Some(4));
        assert_eq!(next_in_sequence(&seq, 4), Some(2)); // wraps
    }

    #[test]
    fn test_cycle_unknown_current_restarts_at_first() {
        let seq = [2, 3, 4];
        assert_eq!(next_in_sequence(&seq, 99), Some(2));
    }

    #[test]
    fn test_cycle_empty_sequence() {
        assert_eq!(next_in_sequence(&[], 2), None);
    }

    #[test]
    fn test_cycle_single_device_wraps_to_itself() {
        assert_eq!(next_in_sequence(&[7], 7), Some(7));
    }

    #[test]
    fn test_next_device_filters_by_type() {
        let store = store();
        // Cycling outputs never lands on the microphone.
        let mut id = 2;
        for _ in 0..6 {
            id = next_device(&store, id, DeviceType::Output).unwrap().unwrap();
            assert_ne!(id, 1);
        }
    }
}
