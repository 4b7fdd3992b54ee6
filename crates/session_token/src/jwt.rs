use base64ct::{Base64UrlUnpadded, Encoding};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::claims::{Principal, SessionClaims};
use crate::error::Error;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionTokenHeader {
    pub alg: String,
    pub typ: String,
}

impl SessionTokenHeader {
    fn hs256() -> Self {
        Self {
            alg: "HS256".to_string(),
            typ: "JWT".to_string(),
        }
    }
}

fn b64e_json<T: Serialize>(value: &T) -> Result<String, Error> {
    let json = serde_json::to_vec(value)?;
    Ok(Base64UrlUnpadded::encode_string(&json))
}

fn b64d_json<T: for<'de> Deserialize<'de>>(s: &str) -> Result<T, Error> {
    let bytes = Base64UrlUnpadded::decode_vec(s).map_err(|_| Error::Base64)?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn mac_for(secret: &[u8]) -> Result<HmacSha256, Error> {
    HmacSha256::new_from_slice(secret).map_err(|_| Error::Key)
}

/// Split a compact token into its three segments.
fn segments(token: &str) -> Result<(&str, &str, &str), Error> {
    let mut parts = token.split('.');
    let header = parts.next().ok_or(Error::TokenFormat)?;
    let claims = parts.next().ok_or(Error::TokenFormat)?;
    let signature = parts.next().ok_or(Error::TokenFormat)?;
    if parts.next().is_some() {
        return Err(Error::TokenFormat);
    }
    Ok((header, claims, signature))
}

/// Create an HS256-signed session token from explicit claims.
///
/// # Errors
///
/// Returns an error if the header/claims JSON cannot be encoded or the
/// secret cannot be used as an HMAC key.
pub fn sign_hs256(secret: &[u8], claims: &SessionClaims) -> Result<String, Error> {
    let header_b64 = b64e_json(&SessionTokenHeader::hs256())?;
    let claims_b64 = b64e_json(claims)?;
    let signing_input = format!("{header_b64}.{claims_b64}");

    let mut mac = mac_for(secret)?;
    mac.update(signing_input.as_bytes());
    let signature_b64 = Base64UrlUnpadded::encode_string(&mac.finalize().into_bytes());

    Ok(format!("{signing_input}.{signature_b64}"))
}

/// Issue a session token for `principal`, valid for `ttl_seconds` from
/// `now_unix_seconds`.
///
/// # Errors
///
/// Returns an error if encoding or signing fails, see [`sign_hs256`].
pub fn issue(
    principal: Principal,
    secret: &[u8],
    ttl_seconds: i64,
    now_unix_seconds: i64,
) -> Result<String, Error> {
    let claims = SessionClaims::new(principal, ttl_seconds, now_unix_seconds);
    sign_hs256(secret, &claims)
}

/// Verify an HS256 session token and return its decoded claims.
///
/// The signature is checked before any claim is trusted; expiration is
/// checked last. Every expected failure mode maps to a typed [`Error`],
/// this function never panics on untrusted input.
///
/// # Errors
///
/// Returns an error if:
/// - the token does not have exactly three base64url/json segments,
/// - the header algorithm is anything other than `HS256`,
/// - the signature does not verify against `secret`,
/// - `exp` is not in the future relative to `now_unix_seconds`.
pub fn verify_hs256(
    token: &str,
    secret: &[u8],
    now_unix_seconds: i64,
) -> Result<SessionClaims, Error> {
    let (header_b64, claims_b64, sig_b64) = segments(token)?;

    let header: SessionTokenHeader = b64d_json(header_b64)?;
    if header.alg != "HS256" {
        return Err(Error::UnsupportedAlg(header.alg));
    }

    let signature = Base64UrlUnpadded::decode_vec(sig_b64).map_err(|_| Error::Base64)?;
    let mut mac = mac_for(secret)?;
    mac.update(format!("{header_b64}.{claims_b64}").as_bytes());
    // Constant-time comparison via the Mac trait.
    mac.verify_slice(&signature)
        .map_err(|_| Error::InvalidSignature)?;

    let claims: SessionClaims = b64d_json(claims_b64)?;
    if claims.exp <= now_unix_seconds {
        return Err(Error::Expired);
    }

    Ok(claims)
}

/// Decode a token's claims WITHOUT verifying the signature.
///
/// Advisory only: clients use this to read `exp` ahead of a request and
/// decide whether to attempt a refresh. It must never gate a privileged
/// operation; only server-side [`verify_hs256`] establishes trust.
///
/// # Errors
///
/// Returns an error if the token segments or claims JSON cannot be parsed.
pub fn decode_insecure(token: &str) -> Result<SessionClaims, Error> {
    let (_, claims_b64, _) = segments(token)?;
    b64d_json(claims_b64)
}
