//! Gateway request signing and callback authentication.
//!
//! Two schemes are supported:
//! - a static token, `sha256_hex(username ":" password)`, which the gateway
//!   sends verbatim in the `Authorization` header of webhook calls;
//! - the legacy `X-VERIFY` checksum, `sha256_hex(body + path + salt_key)`
//!   followed by `###<salt index>`, attached to pg v1 requests.
//!
//! Every function here is pure; the only inputs are the credentials fixed at
//! startup and the request being signed.

use std::fmt;

use base64::prelude::*;
use serde::Serialize;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::config::WebhookConfig;
use crate::core::{AppError, Result};

/// Separator between digest and salt index in an `X-VERIFY` value
const CHECKSUM_SEPARATOR: &str = "###";

/// Hex-encoded SHA-256 of `username:secret`
pub fn compute_static_token(username: &str, secret: &str) -> String {
    sha256_hex(format!("{}:{}", username, secret).as_bytes())
}

/// Compare a received header against the expected token in constant time.
///
/// Absent and empty headers are always rejected.
pub fn verify_inbound(received: Option<&str>, expected: &str) -> bool {
    match received {
        Some(received) if !received.is_empty() => {
            received.as_bytes().ct_eq(expected.as_bytes()).into()
        }
        _ => false,
    }
}

/// `X-VERIFY` value for a request carrying `payload` as its body
pub fn compute_checksum_token<T: Serialize + ?Sized>(
    payload: &T,
    path_suffix: &str,
    secret_key: &str,
    salt_index: u32,
) -> Result<String> {
    Ok(SignedRequest::new(payload, path_suffix, secret_key, salt_index)?.x_verify)
}

/// `X-VERIFY` value for a body-less request (status checks)
pub fn compute_status_checksum_token(path_suffix: &str, secret_key: &str, salt_index: u32) -> String {
    checksum(&format!("{}{}", path_suffix, secret_key), salt_index)
}

/// A payload encoded for the legacy API together with its checksum header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// Base64 of the JSON payload; sent as `{"request": <this>}`
    pub encoded_payload: String,
    /// `<sha256 hex>###<salt index>`
    pub x_verify: String,
}

impl SignedRequest {
    pub fn new<T: Serialize + ?Sized>(
        payload: &T,
        path_suffix: &str,
        secret_key: &str,
        salt_index: u32,
    ) -> Result<Self> {
        let json = serde_json::to_vec(payload)
            .map_err(|e| AppError::Encoding(format!("Failed to serialize payload: {}", e)))?;
        let encoded_payload = BASE64_STANDARD.encode(json);
        let x_verify = checksum(
            &format!("{}{}{}", encoded_payload, path_suffix, secret_key),
            salt_index,
        );

        Ok(Self {
            encoded_payload,
            x_verify,
        })
    }
}

/// Salt key and index for the legacy checksum scheme
#[derive(Clone)]
pub struct ChecksumSigner {
    salt_key: String,
    salt_index: u32,
}

impl ChecksumSigner {
    pub fn new(salt_key: impl Into<String>, salt_index: u32) -> Self {
        Self {
            salt_key: salt_key.into(),
            salt_index,
        }
    }

    pub fn sign_payload<T: Serialize + ?Sized>(
        &self,
        payload: &T,
        path_suffix: &str,
    ) -> Result<SignedRequest> {
        SignedRequest::new(payload, path_suffix, &self.salt_key, self.salt_index)
    }

    pub fn sign_path(&self, path_suffix: &str) -> String {
        compute_status_checksum_token(path_suffix, &self.salt_key, self.salt_index)
    }

    /// `X-VERIFY` the gateway attaches to a server-to-server callback whose
    /// body is `{"response": <encoded_response>}`
    pub fn sign_response(&self, encoded_response: &str) -> String {
        checksum(
            &format!("{}{}", encoded_response, self.salt_key),
            self.salt_index,
        )
    }

    /// Constant-time check of a callback's `X-VERIFY` header
    pub fn verify_response(&self, received: Option<&str>, encoded_response: &str) -> bool {
        verify_inbound(received, &self.sign_response(encoded_response))
    }
}

impl fmt::Debug for ChecksumSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChecksumSigner")
            .field("salt_index", &self.salt_index)
            .finish_non_exhaustive()
    }
}

/// How an outbound gateway request is authenticated
#[derive(Clone, PartialEq, Eq)]
pub enum RequestAuth {
    /// OAuth access token from the client-credentials exchange
    Bearer(String),
    /// Legacy `X-VERIFY` checksum
    Checksum(String),
}

impl RequestAuth {
    /// Header name and value to attach to the request
    pub fn header(&self) -> (&'static str, String) {
        match self {
            RequestAuth::Bearer(token) => ("Authorization", format!("O-Bearer {}", token)),
            RequestAuth::Checksum(x_verify) => ("X-VERIFY", x_verify.clone()),
        }
    }
}

impl fmt::Debug for RequestAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestAuth::Bearer(_) => f.write_str("Bearer(..)"),
            RequestAuth::Checksum(_) => f.write_str("Checksum(..)"),
        }
    }
}

/// Checks the `Authorization` header of inbound webhook calls.
///
/// The expected token is computed once from the configured credential pair.
#[derive(Clone)]
pub struct WebhookAuthenticator {
    expected_token: String,
}

impl WebhookAuthenticator {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            expected_token: compute_static_token(username, password),
        }
    }

    pub fn from_config(config: &WebhookConfig) -> Self {
        Self::new(&config.username, &config.password)
    }

    pub fn verify(&self, received: Option<&str>) -> bool {
        verify_inbound(received, &self.expected_token)
    }
}

impl fmt::Debug for WebhookAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookAuthenticator").finish_non_exhaustive()
    }
}

fn checksum(input: &str, salt_index: u32) -> String {
    format!("{}{}{}", sha256_hex(input.as_bytes()), CHECKSUM_SEPARATOR, salt_index)
}

fn sha256_hex(input: &[u8]) -> String {
    hex::encode(Sha256::digest(input))
}
