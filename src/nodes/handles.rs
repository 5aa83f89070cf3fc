//! Handle contracts and connection compatibility
//!
//! Every handle declares what it emits (outputs) or what it accepts
//! (inputs). A candidate edge is admitted only when the matcher says the
//! two contracts agree; missing or empty constraints never match.

use crate::constants::handle::WILDCARD;
use serde::{Deserialize, Serialize};

/// Contract carried by a single handle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "direction", rename_all = "lowercase")]
pub enum HandleSpec {
    /// Source handle: the kind of producer and the data kind it emits
    Output { source: String, data_type: String },
    /// Target handle: the producer kinds and data kinds it accepts
    Input {
        accepted_sources: Vec<String>,
        accepted_types: Vec<String>,
    },
}

impl HandleSpec {
    /// Shorthand for an output contract
    pub fn output(source: impl Into<String>, data_type: impl Into<String>) -> Self {
        HandleSpec::Output {
            source: source.into(),
            data_type: data_type.into(),
        }
    }

    /// Shorthand for an input contract
    pub fn input(accepted_sources: &[&str], accepted_types: &[&str]) -> Self {
        HandleSpec::Input {
            accepted_sources: accepted_sources.iter().map(|s| s.to_string()).collect(),
            accepted_types: accepted_types.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Whether an output contract may connect to an input contract
///
/// Fail-closed: an absent output field or an empty accepted list is never
/// compatible. `"*"` on either side of an axis matches that axis.
pub fn is_compatible(
    output_source: Option<&str>,
    output_type: Option<&str>,
    accepted_sources: &[String],
    accepted_types: &[String],
) -> bool {
    let (source, data_type) = match (output_source, output_type) {
        (Some(source), Some(data_type)) => (source, data_type),
        _ => return false,
    };
    if accepted_sources.is_empty() || accepted_types.is_empty() {
        return false;
    }
    accepts(source, accepted_sources) && accepts(data_type, accepted_types)
}

fn accepts(value: &str, accepted: &[String]) -> bool {
    value == WILDCARD || accepted.iter().any(|a| a == WILDCARD || a == value)
}

/// Matcher over two resolved handle contracts
///
/// Only an output paired with an input can ever be compatible.
pub fn handles_compatible(from: &HandleSpec, to: &HandleSpec) -> bool {
    match (from, to) {
        (
            HandleSpec::Output { source, data_type },
            HandleSpec::Input {
                accepted_sources,
                accepted_types,
            },
        ) => is_compatible(
            Some(source),
            Some(data_type),
            accepted_sources,
            accepted_types,
        ),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_missing_output_fields_never_match() {
        assert!(!is_compatible(None, Some("str"), &strings(&["*"]), &strings(&["*"])));
        assert!(!is_compatible(Some("prompt"), None, &strings(&["*"]), &strings(&["*"])));
    }

    #[test]
    fn test_empty_accept_list_never_matches() {
        assert!(!is_compatible(Some("prompt"), Some("str"), &[], &strings(&["*"])));
        assert!(!is_compatible(Some("prompt"), Some("str"), &strings(&["*"]), &[]));
    }

    #[test]
    fn test_exact_membership_matches() {
        assert!(is_compatible(
            Some("prompt"),
            Some("str"),
            &strings(&["prompt"]),
            &strings(&["str"])
        ));
    }

    #[test]
    fn test_wildcard_output_source_matches() {
        assert!(is_compatible(
            Some("*"),
            Some("str"),
            &strings(&["prompt"]),
            &strings(&["str"])
        ));
    }

    #[test]
    fn test_wildcard_in_accept_list_matches() {
        assert!(is_compatible(
            Some("agent"),
            Some("message"),
            &strings(&["*"]),
            &strings(&["message", "json"])
        ));
    }

    #[test]
    fn test_one_axis_matching_is_not_enough() {
        // source accepted, type rejected
        assert!(!is_compatible(
            Some("agent"),
            Some("int"),
            &strings(&["agent"]),
            &strings(&["str"])
        ));
        // type accepted, source rejected
        assert!(!is_compatible(
            Some("agent"),
            Some("int"),
            &strings(&["prompt"]),
            &strings(&["int"])
        ));
        // neither accepted
        assert!(!is_compatible(
            Some("agent"),
            Some("int"),
            &strings(&["prompt"]),
            &strings(&["str"])
        ));
    }

    #[test]
    fn test_contract_pairing_requires_output_to_input() {
        let out = HandleSpec::output("agent", "message");
        let input = HandleSpec::input(&["agent"], &["message"]);
        assert!(handles_compatible(&out, &input));
        assert!(!handles_compatible(&input, &out));
        assert!(!handles_compatible(&out, &out));
        assert!(!handles_compatible(&input, &input));
    }
}
