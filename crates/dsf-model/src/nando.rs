//! NANDO classification identifiers.
//!
//! NANDO ids look like `NANDO:1200002`. The leading digits encode the top of
//! the hierarchy (`1` designated intractable diseases, `2` chronic childhood
//! diseases), so group actions select records by a plain string prefix.

/// Scheme prefix carried by every NANDO identifier.
pub const NANDO_PREFIX: &str = "NANDO:";

/// Returns the full identifier prefix for a group, e.g. `"1"` -> `"NANDO:1"`.
#[must_use]
pub fn group_prefix(group: &str) -> String {
    format!("{NANDO_PREFIX}{group}")
}

/// Whether `nando_id` belongs to `group`.
///
/// This is a literal prefix test on the full identifier: group `"1"` matches
/// `NANDO:1200002` and `NANDO:12` but never `NANDO:21000`.
#[must_use]
pub fn nando_id_in_group(nando_id: &str, group: &str) -> bool {
    nando_id
        .strip_prefix(NANDO_PREFIX)
        .is_some_and(|rest| rest.starts_with(group))
}
