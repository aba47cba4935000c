//! Contract Signatures
//!
//! Capability URLs carry `order_id`, `payment_id`, `ts` and `sig`, where
//! `sig` is an HMAC-SHA-256 over the canonical string
//! `v1|order_id=<order>|payment_id=<payment>|ts=<ts>`, URL-safe base64
//! encoded without padding.

use std::fmt;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use jiff::{SignedDuration, Timestamp};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

/// Version tag of the canonical signing string.
pub const SIGNATURE_VERSION: &str = "v1";

/// Literals with at least this many digits are epoch milliseconds.
const MILLISECOND_DIGITS: usize = 13;

/// Errors raised while building a signer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SigningError {
    /// No secret, or an empty one, was configured.
    #[error("contract signing secret is not configured")]
    MissingSecret,

    /// The MAC rejected the key.
    #[error("invalid contract signing key")]
    InvalidKey,
}

/// Keyed contract signer built from the server-held secret.
#[derive(Clone)]
pub struct SigningKey {
    mac: HmacSha256,
}

impl SigningKey {
    /// Key a signer with a secret. The secret bytes are wiped once keyed.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::MissingSecret`] when the secret is empty.
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, SigningError> {
        let secret = Zeroizing::new(secret.into());

        if secret.is_empty() {
            return Err(SigningError::MissingSecret);
        }

        let mac = HmacSha256::new_from_slice(&secret)
            .map_err(|_length| SigningError::InvalidKey)?;

        Ok(Self { mac })
    }

    /// Key a signer with an optionally configured secret.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::MissingSecret`] when the secret is absent or empty.
    pub fn from_optional(secret: Option<String>) -> Result<Self, SigningError> {
        secret.map_or(Err(SigningError::MissingSecret), Self::new)
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

/// Canonical string covered by a contract signature.
#[must_use]
pub fn canonical_input(order_id: &str, payment_id: &str, ts: &str) -> String {
    format!("{SIGNATURE_VERSION}|order_id={order_id}|payment_id={payment_id}|ts={ts}")
}

/// Sign a contract capability.
#[must_use]
pub fn sign(key: &SigningKey, order_id: &str, payment_id: &str, ts: &str) -> String {
    let mut mac = key.mac.clone();

    mac.update(canonical_input(order_id, payment_id, ts).as_bytes());

    URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
}

/// Compare signatures in constant time.
#[must_use]
pub fn signatures_match(expected: &str, supplied: &str) -> bool {
    let expected = expected.as_bytes();
    let supplied = supplied.as_bytes();

    if expected.len() != supplied.len() {
        return false;
    }

    expected.ct_eq(supplied).into()
}

/// Parse an epoch timestamp literal.
///
/// Literals of 13 or more digits are milliseconds, shorter ones seconds.
///
/// # Errors
///
/// Returns [`ContractVerificationError::InvalidTimestamp`] when the literal
/// is not an integer or falls outside the representable range.
pub fn parse_timestamp(literal: &str) -> Result<Timestamp, ContractVerificationError> {
    let literal = literal.trim();
    let digits = literal.trim_start_matches('-');

    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ContractVerificationError::InvalidTimestamp);
    }

    let value: i64 = literal
        .parse()
        .map_err(|_parse| ContractVerificationError::InvalidTimestamp)?;

    let millis = if digits.len() >= MILLISECOND_DIGITS {
        value
    } else {
        value
            .checked_mul(1_000)
            .ok_or(ContractVerificationError::InvalidTimestamp)?
    };

    Timestamp::from_millisecond(millis).map_err(|_range| ContractVerificationError::InvalidTimestamp)
}

/// Reasons a contract redemption is refused.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ContractVerificationError {
    /// A required parameter is absent, or the version is not `v1`.
    #[error("missing or unsupported contract parameters")]
    MissingParams,

    /// The timestamp is not an epoch integer.
    #[error("invalid contract timestamp")]
    InvalidTimestamp,

    /// The timestamp is outside the freshness window.
    #[error("contract link has expired")]
    Expired,

    /// The signature does not match.
    #[error("contract signature is invalid")]
    BadSignature,

    /// No contract is stored for the identifiers.
    #[error("contract not found")]
    NotFound,
}

impl ContractVerificationError {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::MissingParams => "missing_params",
            Self::InvalidTimestamp => "invalid_timestamp",
            Self::Expired => "expired",
            Self::BadSignature => "bad_signature",
            Self::NotFound => "not_found",
        }
    }
}

/// Raw redemption parameters as supplied by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedemptionParams<'a> {
    /// Contract format version.
    pub version: Option<&'a str>,

    /// Gateway order id.
    pub order_id: Option<&'a str>,

    /// Gateway payment id.
    pub payment_id: Option<&'a str>,

    /// Epoch timestamp literal, seconds or milliseconds.
    pub ts: Option<&'a str>,

    /// Supplied signature.
    pub sig: Option<&'a str>,
}

/// Redemption parameters that passed every check short of the store lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedRedemption {
    /// Gateway order id.
    pub order_id: String,

    /// Gateway payment id.
    pub payment_id: String,

    /// Instant the capability was signed.
    pub signed_at: Timestamp,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Check redemption parameters: presence, timestamp, freshness, signature.
///
/// # Errors
///
/// Returns the first failing [`ContractVerificationError`].
pub fn verify_params(
    key: &SigningKey,
    params: RedemptionParams<'_>,
    now: Timestamp,
    max_age: SignedDuration,
) -> Result<VerifiedRedemption, ContractVerificationError> {
    let (Some(order_id), Some(payment_id), Some(ts), Some(sig)) = (
        present(params.order_id),
        present(params.payment_id),
        present(params.ts),
        present(params.sig),
    ) else {
        return Err(ContractVerificationError::MissingParams);
    };

    if present(params.version) != Some(SIGNATURE_VERSION) {
        return Err(ContractVerificationError::MissingParams);
    }

    let signed_at = parse_timestamp(ts)?;

    if now.duration_since(signed_at).abs() > max_age {
        return Err(ContractVerificationError::Expired);
    }

    if !signatures_match(&sign(key, order_id, payment_id, ts), sig) {
        return Err(ContractVerificationError::BadSignature);
    }

    Ok(VerifiedRedemption {
        order_id: order_id.to_string(),
        payment_id: payment_id.to_string(),
        signed_at,
    })
}
