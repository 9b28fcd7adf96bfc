//! Wire types for the BOOST REST API.
//!
//! # Design
//! The enumerations are opaque to the client: it never interprets a
//! strategy or a vendor, it only forwards the identifier. Each variant
//! therefore maps to exactly one wire string, and the same string is
//! accepted back by `FromStr` (case-insensitively) so command-line front
//! ends can take them as arguments.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BoostError;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $wire)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The identifier as it appears on the wire.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = BoostError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| BoostError::UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

wire_enum! {
    /// Alphabet of the sequences in a request.
    SequenceType, "sequence type" {
        Dna => "DNA",
        Rna => "RNA",
        Protein => "PROTEIN",
    }
}

wire_enum! {
    /// Codon replacement strategy applied by the juggler.
    Strategy, "strategy" {
        Random => "Random",
        Balanced => "Balanced",
        MostlyUsed => "MostlyUsed",
        LeastDifferentRscu => "LeastDifferentRSCU",
    }
}

wire_enum! {
    /// Commercial synthesis provider whose constraints are checked.
    Vendor, "vendor" {
        Jgi => "JGI",
        Gen9 => "GEN9",
        Idt => "IDT",
        Thermo => "THERMO",
    }
}

wire_enum! {
    /// Format of the sequences the server sends back.
    FileFormat, "file format" {
        Fasta => "FASTA",
        Genbank => "GENBANK",
        Sbol => "SBOL",
    }
}

wire_enum! {
    GeneticCode, "genetic code" {
        Standard => "STANDARD",
    }
}

/// Body of `POST auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Authentication token issued by a successful login.
///
/// Immutable once issued; clone it to hand the session to another client.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// The raw token, sent as the `authorization` header value.
    pub fn token(&self) -> &str {
        &self.token
    }
}

// Keep tokens out of logs and panic messages.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("token", &"<redacted>").finish()
    }
}

/// Sequence information section of a juggle or verify request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceData {
    pub text: String,
    pub sequence_type: Vec<SequenceType>,
    pub auto_annotate: bool,
}

/// Modification information section of a juggle request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModificationData {
    pub strategy_name: Strategy,
    pub text: String,
    pub strategy_genetic_code: GeneticCode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintsData {
    pub vendor: Vendor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputData {
    pub output_format: FileFormat,
}

/// Full request body for the juggle and verify resources. Absent sections
/// are left out of the JSON entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_information: Option<SequenceData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modification_information: Option<ModificationData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints_information: Option<ConstraintsData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_information: Option<OutputData>,
}

/// Decoded result of a juggle call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JuggleOutput {
    /// Result sequences returned inline.
    Text(String),
    /// Result returned as a file reference or file content.
    File(String),
    /// 200 response carrying neither member.
    Empty,
}

impl JuggleOutput {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JuggleOutput::Text(s) | JuggleOutput::File(s) => Some(s.as_str()),
            JuggleOutput::Empty => None,
        }
    }
}

impl fmt::Display for JuggleOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or_default())
    }
}

/// Violations per file, then per sequence id.
pub type ViolationReport = BTreeMap<String, BTreeMap<String, Vec<String>>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_serialize_to_wire_names() {
        assert_eq!(serde_json::to_value(SequenceType::Protein).unwrap(), "PROTEIN");
        assert_eq!(
            serde_json::to_value(Strategy::LeastDifferentRscu).unwrap(),
            "LeastDifferentRSCU"
        );
        assert_eq!(serde_json::to_value(Vendor::Gen9).unwrap(), "GEN9");
        assert_eq!(serde_json::to_value(FileFormat::Genbank).unwrap(), "GENBANK");
        assert_eq!(serde_json::to_value(GeneticCode::Standard).unwrap(), "STANDARD");
    }

    #[test]
    fn display_matches_serde() {
        for v in Strategy::ALL {
            assert_eq!(serde_json::to_value(v).unwrap(), v.to_string());
        }
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!("dna".parse::<SequenceType>().unwrap(), SequenceType::Dna);
        assert_eq!("mostlyused".parse::<Strategy>().unwrap(), Strategy::MostlyUsed);
        assert_eq!(" idt ".parse::<Vendor>().unwrap(), Vendor::Idt);
    }

    #[test]
    fn from_str_rejects_unknown_names() {
        let err = "PDB".parse::<FileFormat>().unwrap_err();
        match err {
            BoostError::UnknownVariant { kind, value } => {
                assert_eq!(kind, "file format");
                assert_eq!(value, "PDB");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_payload_serializes_to_empty_object() {
        let json = serde_json::to_string(&RequestPayload::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn session_debug_hides_token() {
        let session = Session::new("abc123");
        assert!(!format!("{session:?}").contains("abc123"));
        assert_eq!(session.token(), "abc123");
    }

    #[test]
    fn juggle_output_displays_content() {
        assert_eq!(JuggleOutput::Text(">s1\nATG".into()).to_string(), ">s1\nATG");
        assert_eq!(JuggleOutput::Empty.to_string(), "");
    }
}
