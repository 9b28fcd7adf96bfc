//! Blocking client for the BOOST gene-synthesis web service.
//!
//! # Overview
//! BOOST does its work (codon juggling, reverse translation, verification
//! against synthesis vendor constraints) on the server. This crate only
//! logs in, marshals sequence files and typed parameters into JSON, posts
//! them to the three REST resources, and unwraps the replies.
//!
//! # Design
//! - `BoostClient` holds the base URL, a `Transport`, and the `Session`
//!   returned by `login`. Operations that need a session fail locally with
//!   `BoostError::NotAuthenticated` before touching the network.
//! - Payload sections are built by the stateless functions in `request`.
//! - HTTP requests and responses are plain data (`http`). `UreqTransport`
//!   executes them; tests plug in their own `Transport`.
//! - Logging goes through `tracing`; installing a subscriber is up to the
//!   binary.
//!
//! ```no_run
//! use boost_core::{BoostClient, FileFormat, Strategy};
//!
//! # fn main() -> boost_core::Result<()> {
//! let mut client: BoostClient = BoostClient::default();
//! client.login("user", "password")?;
//! let output = client.codon_juggle(
//!     "sequences.fasta",
//!     true,
//!     Strategy::MostlyUsed,
//!     "codon_usage.txt",
//!     FileFormat::Genbank,
//! )?;
//! println!("{output}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod files;
pub mod http;
pub mod request;
pub mod types;

pub use client::{BoostClient, DEFAULT_BASE_URL, JUGGLE_RESOURCE, LOGIN_RESOURCE, VERIFY_RESOURCE};
pub use error::{BoostError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use types::{
    FileFormat, GeneticCode, JuggleOutput, RequestPayload, SequenceType, Session, Strategy,
    Vendor, ViolationReport,
};
