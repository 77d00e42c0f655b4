//! Telemetry identifier generation
//!
//! Three independent generators, each drawing fresh bytes from the
//! thread-local CSPRNG:
//! - `generate_uuid`: RFC-4122 version 4, lowercase, hyphenated
//! - `generate_machine_id`: 64 lowercase hex characters, no separators
//! - `generate_sqm_id`: uppercase UUID wrapped in braces

use rand::RngCore;
use uuid::Builder;

/// Random bytes consumed per UUID
pub const UUID_BYTES: usize = 16;

/// Random bytes consumed per machine ID
pub const MACHINE_ID_BYTES: usize = 32;

/// Format 16 bytes as a version 4 UUID.
///
/// The version nibble is forced to `4` and the top two bits of byte 8 to
/// `10`; all other bits are taken as given.
pub fn uuid_from_bytes(bytes: [u8; UUID_BYTES]) -> String {
    Builder::from_random_bytes(bytes)
        .into_uuid()
        .hyphenated()
        .to_string()
}

/// Format 32 bytes as an opaque machine ID (no version/variant bits)
pub fn machine_id_from_bytes(bytes: [u8; MACHINE_ID_BYTES]) -> String {
    hex::encode(bytes)
}

/// Wrap a UUID as an SQM ID: `{XXXXXXXX-XXXX-4XXX-XXXX-XXXXXXXXXXXX}`
pub fn sqm_id_from_uuid(uuid: &str) -> String {
    format!("{{{}}}", uuid.to_uppercase())
}

/// Generate a fresh random UUID
pub fn generate_uuid() -> String {
    let mut bytes = [0u8; UUID_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    uuid_from_bytes(bytes)
}

/// Generate a fresh random machine ID
pub fn generate_machine_id() -> String {
    let mut bytes = [0u8; MACHINE_ID_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    machine_id_from_bytes(bytes)
}

/// Generate a fresh random SQM ID
pub fn generate_sqm_id() -> String {
    sqm_id_from_uuid(&generate_uuid())
}

/// Check a string against `xxxxxxxx-xxxx-4xxx-[89ab]xxx-xxxxxxxxxxxx` (lowercase hex)
pub fn is_uuid_v4(s: &str) -> bool {
    let groups: Vec<&str> = s.split('-').collect();
    let lens = [8, 4, 4, 4, 12];
    if groups.len() != lens.len() {
        return false;
    }
    let shaped = groups
        .iter()
        .zip(lens)
        .all(|(g, len)| g.len() == len && g.bytes().all(is_lower_hex));
    shaped && groups[2].starts_with('4') && groups[3].starts_with(['8', '9', 'a', 'b'])
}

/// Check a string is exactly 64 lowercase hex characters
pub fn is_machine_id(s: &str) -> bool {
    s.len() == MACHINE_ID_BYTES * 2 && s.bytes().all(is_lower_hex)
}

/// Check a string is a braced uppercase UUID v4
pub fn is_sqm_id(s: &str) -> bool {
    let Some(inner) = s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) else {
        return false;
    };
    inner == inner.to_uppercase() && is_uuid_v4(&inner.to_lowercase())
}

fn is_lower_hex(b: u8) -> bool {
    b.is_ascii_digit() || (b'a'..=b'f').contains(&b)
}
