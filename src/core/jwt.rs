//! HS256 JSON web tokens
//!
//! Tokens carry the account email, an expiration and the time of the original
//! login (`orig_iat`). Refreshing re-signs the claims with a fresh `exp` but
//! keeps `orig_iat`, which bounds how long a session can be kept alive.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::Sha256;

use crate::config::JwtConfig;

type HmacSha256 = Hmac<Sha256>;

/// Token failures, with the messages clients already know
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JwtError {
    #[error("Error decoding signature")]
    Decode,

    #[error("Signature has expired")]
    Expired,

    #[error("Invalid payload")]
    InvalidPayload,

    #[error("orig_iat field is required")]
    MissingOrigIat,

    #[error("Refresh has expired")]
    RefreshExpired,

    #[error("Token refresh is disabled")]
    RefreshDisabled,
}

impl JwtError {
    pub fn error_code(&self) -> &'static str {
        match self {
            JwtError::Decode | JwtError::InvalidPayload | JwtError::MissingOrigIat => {
                "INVALID_TOKEN"
            }
            JwtError::Expired => "TOKEN_EXPIRED",
            JwtError::RefreshExpired | JwtError::RefreshDisabled => "REFRESH_EXPIRED",
        }
    }
}

/// Claims carried by every token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account email, the login identifier
    pub email: String,

    /// Expiration as unix seconds
    pub exp: i64,

    /// Unix seconds of the login that started this token chain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orig_iat: Option<i64>,
}

/// Issues and verifies tokens
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    /// Scheme expected before the token in the `Authorization` header
    pub fn header_prefix(&self) -> &str {
        &self.config.header_prefix
    }

    /// Issue a token for `email` valid from now
    pub fn issue(&self, email: &str) -> String {
        self.issue_at(email, Utc::now().timestamp())
    }

    pub(crate) fn issue_at(&self, email: &str, now: i64) -> String {
        let claims = Claims {
            email: email.to_string(),
            exp: now + self.config.expiration_delta_secs,
            orig_iat: self.config.allow_refresh.then_some(now),
        };
        self.encode(&claims)
    }

    /// Verify the signature and, if configured, the expiration
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    pub(crate) fn verify_at(&self, token: &str, now: i64) -> Result<Claims, JwtError> {
        let Some((signing_input, signature)) = token.rsplit_once('.') else {
            return Err(JwtError::Decode);
        };
        let Some((header, payload)) = signing_input.split_once('.') else {
            return Err(JwtError::Decode);
        };
        if payload.contains('.') {
            return Err(JwtError::Decode);
        }

        let header: serde_json::Value = decode_segment(header)?;
        if header["alg"] != "HS256" {
            return Err(JwtError::Decode);
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| JwtError::Decode)?;
        let mut mac = self.mac();
        mac.update(signing_input.as_bytes());
        mac.verify_slice(&signature).map_err(|_| JwtError::Decode)?;

        let claims: Claims = decode_segment(payload).map_err(|_| JwtError::InvalidPayload)?;
        if self.config.verify_expiration && claims.exp < now {
            return Err(JwtError::Expired);
        }
        Ok(claims)
    }

    /// Exchange a valid token for a new one with a fresh expiration
    pub fn refresh(&self, token: &str) -> Result<(String, Claims), JwtError> {
        self.refresh_at(token, Utc::now().timestamp())
    }

    pub(crate) fn refresh_at(&self, token: &str, now: i64) -> Result<(String, Claims), JwtError> {
        if !self.config.allow_refresh {
            return Err(JwtError::RefreshDisabled);
        }
        let claims = self.verify_at(token, now)?;
        let orig_iat = claims.orig_iat.ok_or(JwtError::MissingOrigIat)?;
        if now - orig_iat > self.config.refresh_expiration_delta_secs {
            return Err(JwtError::RefreshExpired);
        }

        let refreshed = Claims {
            email: claims.email,
            exp: now + self.config.expiration_delta_secs,
            orig_iat: Some(orig_iat),
        };
        Ok((self.encode(&refreshed), refreshed))
    }

    fn encode(&self, claims: &Claims) -> String {
        let header = json!({
            "typ": "JWT",
            "alg": "HS256",
        });

        let mut jwt = String::new();
        // Serializing a json! value and a derive(Serialize) struct of plain fields cannot fail
        let header_json = serde_json::to_vec(&header).unwrap_or_default();
        let payload_json = serde_json::to_vec(claims).unwrap_or_default();
        URL_SAFE_NO_PAD.encode_string(header_json, &mut jwt);
        jwt.push('.');
        URL_SAFE_NO_PAD.encode_string(payload_json, &mut jwt);

        let mut mac = self.mac();
        mac.update(jwt.as_bytes());
        let signature = mac.finalize().into_bytes();
        jwt.push('.');
        URL_SAFE_NO_PAD.encode_string(signature, &mut jwt);

        jwt
    }

    fn mac(&self) -> HmacSha256 {
        // HMAC accepts keys of any length
        HmacSha256::new_from_slice(self.config.secret.as_bytes())
            .unwrap_or_else(|_| unreachable!("HMAC keys have no length limit"))
    }
}

fn decode_segment<T: serde::de::DeserializeOwned>(segment: &str) -> Result<T, JwtError> {
    let bytes = URL_SAFE_NO_PAD.decode(segment).map_err(|_| JwtError::Decode)?;
    serde_json::from_slice(&bytes).map_err(|_| JwtError::Decode)
}
