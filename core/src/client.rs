//! Session-holding client for the BOOST REST API.
//!
//! # Design
//! `BoostClient` holds the base URL, a `Transport`, and at most one
//! `Session`. `login` is the only method that takes `&mut self`; every other
//! call borrows the client shared. The borrow checker therefore enforces the
//! single-owner contract: no call can be in flight while the session is
//! being replaced. A client is not meant to be shared across threads without
//! external synchronization; use one client per logical session instead.
//!
//! Each operation performs exactly one HTTP round trip and surfaces any
//! failure verbatim. Nothing is retried.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{BoostError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::request::{
    build_constraints_data, build_modification_data, build_output_data, build_sequence_data,
};
use crate::types::{
    FileFormat, JuggleOutput, LoginRequest, RequestPayload, SequenceType, Session, Strategy,
    Vendor, ViolationReport,
};

/// Public BOOST deployment.
pub const DEFAULT_BASE_URL: &str = "https://boost.jgi.doe.gov/rest/";

pub const LOGIN_RESOURCE: &str = "auth/login";
pub const JUGGLE_RESOURCE: &str = "juggler/juggle";
pub const VERIFY_RESOURCE: &str = "polisher/verify";

const AUTHORIZATION: &str = "authorization";

/// Synchronous client for the BOOST service.
#[derive(Debug)]
pub struct BoostClient<T: Transport = UreqTransport> {
    base_url: String,
    transport: T,
    session: Option<Session>,
}

impl BoostClient<UreqTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport::new())
    }
}

impl Default for BoostClient<UreqTransport> {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl<T: Transport> BoostClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            session: None,
        }
    }

    /// Resume a session issued earlier, skipping `login`.
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Authenticate and store the issued token for all later calls.
    ///
    /// On any failure the previously stored session, if any, is kept.
    pub fn login(&mut self, username: &str, password: &str) -> Result<&Session> {
        let body = to_json(&LoginRequest { username, password })?;
        let request = self.build_request(LOGIN_RESOURCE, body, None);
        let response = self.transport.execute(&request)?;

        if response.status != 200 {
            warn!(status = response.status, "login rejected");
            return Err(BoostError::Authentication {
                status: response.status,
                message: response.error_message(),
            });
        }

        let token = parse_token(&response.body).ok_or(BoostError::InvalidCredentials)?;
        info!(username, "logged in");
        Ok(&*self.session.insert(Session::new(token)))
    }

    /// Reverse-translate protein sequences into DNA. Auto-annotation is
    /// always on since every protein sequence is coding.
    pub fn reverse_translate(
        &self,
        sequences: impl AsRef<Path>,
        strategy: Strategy,
        codon_usage_table: impl AsRef<Path>,
        output_format: FileFormat,
    ) -> Result<JuggleOutput> {
        let response = self.invoke_juggler(
            sequences,
            SequenceType::Protein,
            true,
            strategy,
            codon_usage_table,
            output_format,
        )?;
        self.handle_response(response)
    }

    /// Replace codons of DNA sequences according to `strategy`.
    pub fn codon_juggle(
        &self,
        sequences: impl AsRef<Path>,
        auto_annotate: bool,
        strategy: Strategy,
        codon_usage_table: impl AsRef<Path>,
        output_format: FileFormat,
    ) -> Result<JuggleOutput> {
        let response = self.invoke_juggler(
            sequences,
            SequenceType::Dna,
            auto_annotate,
            strategy,
            codon_usage_table,
            output_format,
        )?;
        self.handle_response(response)
    }

    /// Assemble a full juggle request and post it. The raw 200 response is
    /// returned for the caller to interpret.
    pub fn invoke_juggler(
        &self,
        sequences: impl AsRef<Path>,
        sequence_type: SequenceType,
        auto_annotate: bool,
        strategy: Strategy,
        codon_usage_table: impl AsRef<Path>,
        output_format: FileFormat,
    ) -> Result<HttpResponse> {
        let payload = RequestPayload {
            sequence_information: Some(build_sequence_data(
                sequences,
                sequence_type,
                auto_annotate,
            )?),
            modification_information: Some(build_modification_data(
                strategy,
                codon_usage_table,
            )?),
            output_information: Some(build_output_data(output_format)),
            ..Default::default()
        };
        self.invoke(JUGGLE_RESOURCE, &payload)
    }

    /// Decode a juggle response into its `text` or `file` member.
    pub fn handle_response(&self, response: HttpResponse) -> Result<JuggleOutput> {
        check_status(&response)?;

        let body: Value = serde_json::from_str(&response.body)
            .map_err(|e| BoostError::Deserialization(e.to_string()))?;

        let output = if let Some(text) = body.get("text") {
            JuggleOutput::Text(render(text))
        } else if let Some(file) = body.get("file") {
            JuggleOutput::File(render(file))
        } else {
            JuggleOutput::Empty
        };
        info!("juggle completed");
        Ok(output)
    }

    /// Check the sequences in a file against a vendor's synthesis
    /// constraints.
    ///
    /// The server's violation report is not decoded: a 200 response always
    /// yields an empty report. Its schema is undocumented, so the body is
    /// deliberately left alone rather than guessed at.
    pub fn verify(
        &self,
        sequences: impl AsRef<Path>,
        sequence_type: SequenceType,
        vendor: Vendor,
    ) -> Result<ViolationReport> {
        self.require_session()?;

        let payload = RequestPayload {
            sequence_information: Some(build_sequence_data(sequences, sequence_type, false)?),
            constraints_information: Some(build_constraints_data(vendor)),
            ..Default::default()
        };
        let response = self.invoke(VERIFY_RESOURCE, &payload)?;
        debug!(bytes = response.body.len(), "verify response body not decoded");
        info!("verify completed");

        Ok(ViolationReport::new())
    }

    /// Verify sequences against a vendor's constraints and, on the server,
    /// modify coding regions to fix violations.
    ///
    /// `coding_sequences` marks every sequence as coding when the input
    /// format cannot carry feature annotations; formats that can ignore it.
    ///
    /// Only the sequence and constraints sections are sent. The
    /// modification section (strategy and codon usage table) is not
    /// assembled yet, so those two arguments currently have no effect.
    pub fn polish(
        &self,
        sequences: impl AsRef<Path>,
        sequence_type: SequenceType,
        coding_sequences: bool,
        vendor: Vendor,
        strategy: Strategy,
        codon_usage_table: impl AsRef<Path>,
    ) -> Result<()> {
        self.require_session()?;

        let payload = RequestPayload {
            sequence_information: Some(build_sequence_data(
                sequences,
                sequence_type,
                coding_sequences,
            )?),
            constraints_information: Some(build_constraints_data(vendor)),
            ..Default::default()
        };
        debug!(
            %strategy,
            codon_usage_table = %codon_usage_table.as_ref().display(),
            "modification information not sent with polish"
        );
        self.invoke(VERIFY_RESOURCE, &payload)?;

        info!("polish completed");
        Ok(())
    }

    /// Post `payload` as JSON to `resource` with the stored token in the
    /// `authorization` header (empty when not logged in). Any status other
    /// than 200 is returned as `BoostError::Service`.
    pub fn invoke<P: Serialize>(&self, resource: &str, payload: &P) -> Result<HttpResponse> {
        let body = to_json(payload)?;
        let token = self.session.as_ref().map(Session::token).unwrap_or_default();
        let request = self.build_request(resource, body, Some(token));

        let response = self.transport.execute(&request)?;
        check_status(&response)?;
        Ok(response)
    }

    fn require_session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(BoostError::NotAuthenticated)
    }

    fn build_request(
        &self,
        resource: &str,
        body: String,
        authorization: Option<&str>,
    ) -> HttpRequest {
        let mut headers = vec![("content-type".to_string(), "application/json".to_string())];
        if let Some(token) = authorization {
            headers.push((AUTHORIZATION.to_string(), token.to_string()));
        }
        debug!(resource, "building request");
        HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/{}", self.base_url, resource.trim_start_matches('/')),
            headers,
            body,
        }
    }
}

fn to_json<P: Serialize + ?Sized>(payload: &P) -> Result<String> {
    serde_json::to_string(payload).map_err(|e| BoostError::Serialization(e.to_string()))
}

/// Map a non-200 status to `BoostError::Service`.
fn check_status(response: &HttpResponse) -> Result<()> {
    if response.status == 200 {
        return Ok(());
    }
    warn!(status = response.status, "service returned an error");
    Err(BoostError::Service {
        status: response.status,
        message: response.error_message(),
    })
}

/// Extract the `token` member of a login response, if there is one.
fn parse_token(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value.get("token")?.as_str().map(str::to_string)
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
