//! Advertisement-name parsing for network audio receivers
//!
//! RAOP instances advertise a composite full name of the form
//!
//! ```text
//! <uid> "@" <display-name> "._" <service-type-and-domain>
//! ```
//!
//! e.g. `D4A33D6F8BDC@Living\032Room._raop._tcp.local.`. The prefix before
//! the `@` is a stable uid-like token (usually the receiver's MAC digits);
//! the display-name run ends at the first `._` and carries the escape
//! token `\032` (backslash, `0`, `3`, `2`) for a literal space. All other
//! bytes pass through undecoded.

/// Uid and display name extracted from one advertisement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advertisement {
    pub uid: String,
    pub name: String,
}

/// Parse a composite instance name. `None` means the advertisement does
/// not follow the grammar and the instance should be skipped.
pub fn parse_instance_name(fullname: &str) -> Option<Advertisement> {
    let (uid, rest) = fullname.split_once('@')?;
    let end = rest.find("._")?;
    Some(Advertisement {
        uid: uid.to_string(),
        name: decode_escapes(&rest[..end]),
    })
}

/// Decode `\032` escape tokens into spaces; everything else is verbatim.
///
/// The lookahead compares raw bytes: the byte after a backslash may sit
/// inside a multibyte character, where a string slice would panic.
fn decode_escapes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if tail.as_bytes().get(1..4) == Some(b"032".as_slice()) {
            out.push(' ');
            rest = &tail[4..];
        } else {
            out.push('\\');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

/// Self-exclusion heuristic: skip resolved hosts naming the invoking
/// machine class, so the inspecting host never lists itself as a receiver.
pub fn is_local_host(hostname: &str) -> bool {
    hostname.contains("MacBook")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_advertisement() {
        let ad = parse_instance_name("D4A33D6F8BDC@Kitchen._raop._tcp.local.").unwrap();
        assert_eq!(ad.uid, "D4A33D6F8BDC");
        assert_eq!(ad.name, "Kitchen");
    }

    #[test]
    fn test_parse_decodes_space_escape() {
        let ad = parse_instance_name("AABBCC@Living\\032Room._raop._tcp.local.").unwrap();
        assert_eq!(ad.name, "Living Room");
    }

    #[test]
    fn test_parse_multiple_escapes() {
        let ad = parse_instance_name("AABBCC@A\\032B\\032C._raop._tcp.local.").unwrap();
        assert_eq!(ad.name, "A B C");
    }

    #[test]
    fn test_unknown_escape_passes_through() {
        let ad = parse_instance_name("AABBCC@A\\033B._raop._tcp.local.").unwrap();
        assert_eq!(ad.name, "A\\033B");
    }

    #[test]
    fn test_trailing_backslash_passes_through() {
        assert_eq!(decode_escapes("name\\"), "name\\");
    }

    #[test]
    fn test_multibyte_after_backslash_passes_through() {
        let ad = parse_instance_name("AABBCC@X\\ééé._raop._tcp.local.").unwrap();
        assert_eq!(ad.name, "X\\ééé");
    }

    #[test]
    fn test_multibyte_inside_escape_lookahead() {
        // é straddles the byte range the escape check inspects.
        assert_eq!(decode_escapes("a\\0é2b"), "a\\0é2b");
        assert_eq!(decode_escapes("\\é"), "\\é");
    }

    #[test]
    fn test_missing_at_is_malformed() {
        assert_eq!(parse_instance_name("JustAName._raop._tcp.local."), None);
    }

    #[test]
    fn test_missing_service_run_is_malformed() {
        assert_eq!(parse_instance_name("AABBCC@NameWithoutService"), None);
    }

    #[test]
    fn test_empty_uid_is_accepted() {
        let ad = parse_instance_name("@Bare._raop._tcp.local.").unwrap();
        assert_eq!(ad.uid, "");
        assert_eq!(ad.name, "Bare");
    }

    #[test]
    fn test_local_host_exclusion() {
        assert!(is_local_host("Roberts-MacBook-Pro.local."));
        assert!(!is_local_host("appletv.local."));
    }
}
