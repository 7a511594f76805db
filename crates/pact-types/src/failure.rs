//! Failure taxonomy shared types (§3, §4.4).

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five fault families a failure code's leading digit selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultDomain {
    Policy,
    Identity,
    Negotiation,
    Settlement,
    Recursive,
}

impl FaultDomain {
    /// Passport severity multiplier for this family, per §4.4's table.
    pub fn severity_multiplier(self) -> f64 {
        match self {
            FaultDomain::Policy => 1.2,
            FaultDomain::Identity => 1.0,
            FaultDomain::Negotiation => 1.0,
            FaultDomain::Settlement => 0.8,
            FaultDomain::Recursive => 0.9,
        }
    }

    /// Base severity used in passport scoring (§4.6 step 7); defaults to
    /// 0.8 for any domain not named in the base table (there are none
    /// today, but the default keeps this forward-compatible, per §9).
    pub fn base_severity(self) -> f64 {
        match self {
            FaultDomain::Policy => 0.5,
            FaultDomain::Identity => 0.7,
            FaultDomain::Negotiation => 0.6,
            FaultDomain::Settlement => 0.9,
            FaultDomain::Recursive => 0.8,
        }
    }
}

impl fmt::Display for FaultDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FaultDomain::Policy => "policy",
            FaultDomain::Identity => "identity",
            FaultDomain::Negotiation => "negotiation",
            FaultDomain::Settlement => "settlement",
            FaultDomain::Recursive => "recursive",
        };
        write!(f, "{s}")
    }
}

/// Whether a failure ends the negotiation or is a retry hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terminality {
    Terminal,
    NonTerminal,
}

/// A `PACT-NNN` failure code. The leading digit selects the fault family;
/// see [`FailureCode::family`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FailureCode(pub String);

impl FailureCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The three-digit numeric suffix, e.g. `101` for `"PACT-101"`.
    /// Returns `None` if the code is not shaped like `PACT-NNN`.
    pub fn numeric(&self) -> Option<u32> {
        self.0.strip_prefix("PACT-")?.parse().ok()
    }

    /// The family digit (1-5) derived from the numeric suffix's hundreds
    /// place, per §4.4's `PACT-FCC` shape.
    pub fn family_digit(&self) -> Option<u32> {
        self.numeric().map(|n| n / 100)
    }

    pub fn is_family(&self, domain: FaultDomain) -> bool {
        self.family_digit() == Some(domain_family_digit(domain))
    }
}

impl fmt::Display for FailureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn domain_family_digit(domain: FaultDomain) -> u32 {
    match domain {
        FaultDomain::Policy => 1,
        FaultDomain::Identity => 2,
        FaultDomain::Negotiation => 3,
        FaultDomain::Settlement => 4,
        FaultDomain::Recursive => 5,
    }
}

/// The family severity multiplier for a failure code's leading digit,
/// per §4.4's table. Unknown/malformed codes default to the mildest
/// multiplier (0.8, the settlement-family value) so a bad code never
/// inflates blame.
pub fn family_multiplier(code: &FailureCode) -> f64 {
    match code.family_digit() {
        Some(1) => 1.2,
        Some(2) => 1.0,
        Some(3) => 1.0,
        Some(4) => 0.8,
        Some(5) => 0.9,
        _ => 0.8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_digit_extracts_leading_digit() {
        assert_eq!(FailureCode::new("PACT-101").family_digit(), Some(1));
        assert_eq!(FailureCode::new("PACT-430").family_digit(), Some(4));
    }

    #[test]
    fn malformed_code_has_no_family() {
        assert_eq!(FailureCode::new("nonsense").family_digit(), None);
    }

    #[test]
    fn is_family_matches_domain() {
        assert!(FailureCode::new("PACT-101").is_family(FaultDomain::Policy));
        assert!(!FailureCode::new("PACT-101").is_family(FaultDomain::Settlement));
    }
}
