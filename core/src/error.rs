//! Error types for the BOOST client.
//!
//! # Design
//! Each failure the caller may want to branch on gets its own variant:
//! login failures are split into `Authentication` (the server said no with
//! a status code) and `InvalidCredentials` (the server said 200 but handed
//! back no token). Any other non-200 lands in `Service` with the raw status
//! and body, surfaced verbatim.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed cause carried by `BoostError::Transport`.
pub type TransportCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by `BoostClient` and the request builders.
#[derive(Debug, Error)]
pub enum BoostError {
    /// The HTTP round trip itself failed (connection, DNS, TLS, timeout).
    #[error("transport failure: {0}")]
    Transport(#[source] TransportCause),

    /// The login resource answered with a non-200 status.
    #[error("authentication failed ({status}): {message}")]
    Authentication { status: u16, message: String },

    /// The login resource answered 200 but the body carried no token.
    #[error("Invalid username/password!")]
    InvalidCredentials,

    /// An operation that needs a session was called before `login`.
    #[error("You must authenticate first!")]
    NotAuthenticated,

    /// A resource other than login answered with a non-200 status.
    #[error("service error ({status}): {message}")]
    Service { status: u16, message: String },

    /// A sequence or codon usage table file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be decoded.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// Text did not name a known enum variant.
    #[error("unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, BoostError>;
