//! Signed session cookie, wire-compatible with the `s:<id>.<signature>`
//! format used by the vendor's web frontend.

use anyhow::{anyhow, Result};
use axum::http::{header::COOKIE, HeaderMap};
use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use chrono::{TimeDelta, Utc};
use hmac::{Hmac, Mac};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha2::Sha256;
use std::time::Duration;
use tracing::debug;

use super::SessionId;
use crate::config::settings::SessionConfig;

type HmacSha256 = Hmac<Sha256>;

const SIGNED_PREFIX: &str = "s:";
const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Everything outside the URI "unreserved" set gets escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Clone)]
pub struct SessionCookie {
    name: String,
    mac: HmacSha256,
    max_age: Duration,
}

impl SessionCookie {
    pub fn new(config: &SessionConfig) -> Result<Self> {
        let mac = HmacSha256::new_from_slice(config.secret.as_bytes())
            .map_err(|e| anyhow!("invalid session secret: {}", e))?;

        Ok(Self {
            name: config.cookie_name.clone(),
            mac,
            max_age: Duration::from_secs(config.ttl_seconds),
        })
    }

    /// Session id carried by the request, if any cookie with our name has a
    /// valid signature.
    pub fn session_id(&self, headers: &HeaderMap) -> Option<SessionId> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .filter(|(name, _)| *name == self.name)
            .find_map(|(_, value)| self.unsign(value))
    }

    /// `Set-Cookie` value establishing `id`.
    pub fn issue(&self, id: &SessionId) -> String {
        let expires = Utc::now() + TimeDelta::seconds(self.max_age.as_secs() as i64);
        format!(
            "{}={}; Path=/; Expires={}; Max-Age={}; HttpOnly",
            self.name,
            self.sign(id),
            expires.format(HTTP_DATE),
            self.max_age.as_secs()
        )
    }

    /// `Set-Cookie` value that makes the client drop the cookie.
    pub fn clear(&self) -> String {
        format!(
            "{}=; Path=/; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Max-Age=0; HttpOnly",
            self.name
        )
    }

    /// Encoded cookie value for `id`.
    pub fn sign(&self, id: &SessionId) -> String {
        let signed = format!("{}{}.{}", SIGNED_PREFIX, id, self.signature(id));
        encode_component(&signed)
    }

    fn unsign(&self, raw: &str) -> Option<SessionId> {
        let decoded = decode_component(raw)?;
        let signed = decoded.strip_prefix(SIGNED_PREFIX)?;
        let (id, signature) = signed.rsplit_once('.')?;

        let signature = STANDARD_NO_PAD.decode(signature).ok()?;
        let mut mac = self.mac.clone();
        mac.update(id.as_bytes());
        if mac.verify_slice(&signature).is_err() {
            debug!("Rejected session cookie with a bad signature");
            return None;
        }

        Some(id.to_string())
    }

    fn signature(&self, id: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(id.as_bytes());
        STANDARD_NO_PAD.encode(mac.finalize().into_bytes())
    }
}

fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, COMPONENT).to_string()
}

fn decode_component(raw: &str) -> Option<String> {
    percent_decode_str(raw)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}
