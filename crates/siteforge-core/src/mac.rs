// ── MAC address validation and reconciliation ──
//
// Candidate MACs arrive as free-form text (file lines or a comma-separated
// operator entry). They are canonicalized to 12 lowercase hex digits with
// no separators, which is the form the inventory API keys devices by.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;
use serde::Serialize;
use thiserror::Error;

use siteforge_api::InventoryDevice;

const MAC_HEX_DIGITS: usize = 12;

/// A candidate MAC that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MacError {
    #[error("device data invalid, empty string found")]
    Empty,

    /// `input` is the candidate exactly as it was supplied.
    #[error("invalid device mac detected: '{input}'")]
    Invalid { input: String },
}

/// Strip whitespace and colons, then lowercase.
///
/// No validation happens here; `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .flat_map(char::to_lowercase)
        .collect()
}

// ── MacAddress ──────────────────────────────────────────────────────

/// MAC address in canonical form (`aabbccddeeff`).
///
/// Only constructible through [`MacAddress::parse`], so holding one means
/// the value passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MacAddress(String);

impl MacAddress {
    /// Normalize and validate a single candidate.
    pub fn parse(raw: &str) -> Result<Self, MacError> {
        if raw.trim().is_empty() {
            return Err(MacError::Empty);
        }

        let canonical = normalize(raw);
        let valid = canonical.len() == MAC_HEX_DIGITS
            && canonical
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));

        if valid {
            Ok(Self(canonical))
        } else {
            Err(MacError::Invalid {
                input: raw.to_owned(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MacAddress {
    type Err = MacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for MacAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ── Batch operations ────────────────────────────────────────────────

/// Validate every candidate, stopping at the first bad one.
///
/// The result is deduplicated by canonical value and keeps the order in
/// which each MAC first appeared.
pub fn validate<I, S>(candidates: I) -> Result<Vec<MacAddress>, MacError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = IndexSet::new();
    for raw in candidates {
        seen.insert(MacAddress::parse(raw.as_ref())?);
    }
    Ok(seen.into_iter().collect())
}

/// Check that every MAC is in the unassigned pool.
///
/// Returns the first MAC that is not. Pool MACs are normalized before the
/// comparison so separator or case differences on the API side still match.
pub fn reconcile<'a>(
    macs: &'a [MacAddress],
    pool: &[InventoryDevice],
) -> Result<(), &'a MacAddress> {
    let available: HashSet<String> = pool.iter().map(|d| normalize(&d.mac)).collect();
    match macs.iter().find(|mac| !available.contains(mac.as_str())) {
        Some(missing) => Err(missing),
        None => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn device(mac: &str) -> InventoryDevice {
        InventoryDevice {
            mac: mac.into(),
            serial: None,
            device_type: Some("ap".into()),
            sku: None,
            model: None,
            name: None,
            site_id: None,
        }
    }

    #[test]
    fn normalize_strips_separators_and_case() {
        assert_eq!(normalize("AA:BB:CC:DD:EE:FF"), "aabbccddeeff");
        assert_eq!(normalize(" aa bb\tcc:dd:ee:FF \n"), "aabbccddeeff");
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in [
            "AA:BB:CC:DD:EE:FF",
            "  11 22 33 44 55 66 ",
            "Ab:Cd:eF:01:23:45:67",
            "not a mac",
            "::",
            "",
        ] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn normalize_leaves_dashes_alone() {
        assert_eq!(normalize("AA-BB-CC-DD-EE-FF"), "aa-bb-cc-dd-ee-ff");
    }

    #[test]
    fn parse_accepts_canonical_and_separated_forms() {
        for raw in ["aabbccddeeff", "AABBCCDDEEFF", "aa:bb:cc:dd:ee:ff", " 0123 4567 89ab "] {
            let mac = MacAddress::parse(raw).unwrap();
            assert_eq!(mac.as_str().len(), 12);
        }
    }

    #[test]
    fn parse_rejects_empty_and_blank() {
        assert_eq!(MacAddress::parse(""), Err(MacError::Empty));
        assert_eq!(MacAddress::parse("   "), Err(MacError::Empty));
    }

    #[test]
    fn parse_rejects_wrong_length_with_original_input() {
        let err = MacAddress::parse("AA:BB:CC:DD:EE").unwrap_err();
        assert_eq!(
            err,
            MacError::Invalid {
                input: "AA:BB:CC:DD:EE".into()
            }
        );
        assert_eq!(err.to_string(), "invalid device mac detected: 'AA:BB:CC:DD:EE'");

        assert!(MacAddress::parse("aabbccddeeff00").is_err());
    }

    #[test]
    fn parse_rejects_non_hex_with_original_input() {
        match MacAddress::parse("GG:BB:CC:DD:EE:FF") {
            Err(MacError::Invalid { input }) => assert_eq!(input, "GG:BB:CC:DD:EE:FF"),
            other => panic!("expected Invalid, got {other:?}"),
        }
        assert!(MacAddress::parse("aa-bb-cc-dd-ee-ff").is_err());
    }

    #[test]
    fn validate_deduplicates_equivalent_forms() {
        let macs = validate(["AA:BB:CC:DD:EE:FF", "aabbccddeeff"]).unwrap();
        assert_eq!(macs.len(), 1);
        assert_eq!(macs[0].as_str(), "aabbccddeeff");
    }

    #[test]
    fn validate_keeps_first_occurrence_order() {
        let macs = validate(["112233445566", "aabbccddeeff", "11:22:33:44:55:66"]).unwrap();
        let strs: Vec<_> = macs.iter().map(MacAddress::as_str).collect();
        assert_eq!(strs, vec!["112233445566", "aabbccddeeff"]);
    }

    #[test]
    fn validate_fails_on_first_bad_candidate() {
        let err = validate(["aabbccddeeff", "", "zz"]).unwrap_err();
        assert_eq!(err, MacError::Empty);
    }

    #[test]
    fn validate_empty_input_is_empty_output() {
        let macs = validate(Vec::<String>::new()).unwrap();
        assert!(macs.is_empty());
    }

    #[test]
    fn reconcile_accepts_macs_in_pool() {
        let pool = vec![device("aabbccddeeff"), device("112233445566")];
        let macs = validate(["AA:BB:CC:DD:EE:FF"]).unwrap();
        assert!(reconcile(&macs, &pool).is_ok());
    }

    #[test]
    fn reconcile_reports_first_missing_mac() {
        let pool = vec![device("aabbccddeeff")];
        let macs = validate(["aabbccddeeff", "112233445566", "665544332211"]).unwrap();
        let missing = reconcile(&macs, &pool).unwrap_err();
        assert_eq!(missing.as_str(), "112233445566");
    }

    #[test]
    fn reconcile_tolerates_formatted_pool_macs() {
        let pool = vec![device("AA:BB:CC:DD:EE:FF")];
        let macs = validate(["aabbccddeeff"]).unwrap();
        assert!(reconcile(&macs, &pool).is_ok());
    }
}
