// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Firebase ID token verification.
//!
//! Tokens are RS256 JWTs signed by Google. The public keys are published as a
//! JWKS document and rotate every few days, so the fetched set is reused for
//! [`JWKS_CACHE_TTL`] before it is fetched again.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use crate::error::AuthError;
use crate::verifier::{TokenVerifier, VerifiedIdentity};

pub const DEFAULT_JWKS_URL: &str =
	"https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";
pub const JWKS_CACHE_TTL: Duration = Duration::from_secs(60 * 60);
const JWKS_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct FirebaseClaims {
	sub: String,
	#[serde(default)]
	email: Option<String>,
}

struct CachedKeys {
	keys: JwkSet,
	fetched_at: Instant,
}

pub struct FirebaseTokenVerifier {
	project_id: Option<String>,
	jwks_url: String,
	http_client: reqwest::Client,
	cache: RwLock<Option<CachedKeys>>,
}

impl FirebaseTokenVerifier {
	/// Without a project id every token is rejected with `NotConfigured`.
	pub fn new(project_id: Option<String>) -> Result<Self, AuthError> {
		let http_client = dash_common_http::client_with_timeout(JWKS_FETCH_TIMEOUT)
			.map_err(|e| AuthError::KeyFetch(e.to_string()))?;

		Ok(Self {
			project_id: project_id.filter(|id| !id.trim().is_empty()),
			jwks_url: DEFAULT_JWKS_URL.to_string(),
			http_client,
			cache: RwLock::new(None),
		})
	}

	pub fn with_jwks_url(mut self, url: impl Into<String>) -> Self {
		self.jwks_url = url.into();
		self
	}

	pub fn is_configured(&self) -> bool {
		self.project_id.is_some()
	}

	async fn fetch_keys(&self) -> Result<JwkSet, AuthError> {
		let response = self
			.http_client
			.get(&self.jwks_url)
			.send()
			.await
			.map_err(|e| AuthError::KeyFetch(e.to_string()))?;

		let status = response.status();
		if !status.is_success() {
			return Err(AuthError::KeyFetch(format!("JWKS endpoint returned {status}")));
		}

		let keys: JwkSet = response
			.json()
			.await
			.map_err(|e| AuthError::KeyFetch(format!("malformed JWKS: {e}")))?;
		debug!(keys = keys.keys.len(), "fetched signing keys");
		Ok(keys)
	}

	async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, AuthError> {
		{
			let cache = self.cache.read().await;
			if let Some(cached) = cache.as_ref().filter(|c| c.fetched_at.elapsed() < JWKS_CACHE_TTL) {
				return key_for(&cached.keys, kid);
			}
		}

		let mut cache = self.cache.write().await;
		if let Some(cached) = cache.as_ref().filter(|c| c.fetched_at.elapsed() < JWKS_CACHE_TTL) {
			return key_for(&cached.keys, kid);
		}

		let keys = self.fetch_keys().await?;
		let key = key_for(&keys, kid);
		*cache = Some(CachedKeys {
			keys,
			fetched_at: Instant::now(),
		});
		key
	}
}

fn key_for(keys: &JwkSet, kid: &str) -> Result<DecodingKey, AuthError> {
	let jwk = keys
		.find(kid)
		.ok_or_else(|| AuthError::invalid("unknown signing key"))?;
	DecodingKey::from_jwk(jwk).map_err(|e| AuthError::invalid(format!("unusable signing key: {e}")))
}

#[async_trait]
impl TokenVerifier for FirebaseTokenVerifier {
	#[instrument(skip(self, token))]
	async fn verify(&self, token: &str) -> Result<VerifiedIdentity, AuthError> {
		let project_id = self.project_id.as_deref().ok_or(AuthError::NotConfigured)?;

		let header = decode_header(token).map_err(|e| AuthError::invalid(e.to_string()))?;
		if header.alg != Algorithm::RS256 {
			return Err(AuthError::invalid(format!(
				"unexpected signing algorithm {:?}",
				header.alg
			)));
		}
		let kid = header
			.kid
			.ok_or_else(|| AuthError::invalid("token has no key id"))?;

		let key = self.decoding_key(&kid).await?;

		let mut validation = Validation::new(Algorithm::RS256);
		validation.set_audience(&[project_id]);
		validation.set_issuer(&[format!("https://securetoken.google.com/{project_id}")]);
		validation.required_spec_claims =
			HashSet::from(["exp", "aud", "iss", "sub"].map(String::from));

		let data = decode::<FirebaseClaims>(token, &key, &validation).map_err(|e| {
			warn!(error = %e, "ID token rejected");
			AuthError::invalid(e.to_string())
		})?;

		let claims = data.claims;
		if claims.sub.trim().is_empty() {
			return Err(AuthError::invalid("token has an empty subject"));
		}

		Ok(VerifiedIdentity {
			uid: claims.sub,
			email: claims.email.filter(|e| !e.is_empty()),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::OnceLock;
	use std::time::{SystemTime, UNIX_EPOCH};

	use base64::engine::general_purpose::URL_SAFE_NO_PAD;
	use base64::Engine;
	use jsonwebtoken::{encode, EncodingKey, Header};
	use rsa::pkcs8::{EncodePrivateKey, LineEnding};
	use rsa::traits::PublicKeyParts;
	use rsa::RsaPrivateKey;
	use serde_json::json;
	use wiremock::matchers::{method, path};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	const PROJECT: &str = "partner-dash-test";
	const KID: &str = "test-key-1";

	struct TestKey {
		pem: String,
		jwks: serde_json::Value,
	}

	fn test_key() -> &'static TestKey {
		static KEY: OnceLock<TestKey> = OnceLock::new();
		KEY.get_or_init(|| {
			let private = RsaPrivateKey::new(&mut rand::thread_rng(), 2048).unwrap();
			let public = private.to_public_key();
			let pem = private.to_pkcs8_pem(LineEnding::LF).unwrap().to_string();
			let jwks = json!({
				"keys": [{
					"kty": "RSA",
					"alg": "RS256",
					"use": "sig",
					"kid": KID,
					"n": URL_SAFE_NO_PAD.encode(public.n().to_bytes_be()),
					"e": URL_SAFE_NO_PAD.encode(public.e().to_bytes_be()),
				}]
			});
			TestKey { pem, jwks }
		})
	}

	fn now() -> u64 {
		SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs()
	}

	fn sign(claims: serde_json::Value, kid: Option<&str>) -> String {
		let mut header = Header::new(Algorithm::RS256);
		header.kid = kid.map(String::from);
		let key = EncodingKey::from_rsa_pem(test_key().pem.as_bytes()).unwrap();
		encode(&header, &claims, &key).unwrap()
	}

	fn valid_claims() -> serde_json::Value {
		json!({
			"sub": "uid-123",
			"email": "partner@example.com",
			"aud": PROJECT,
			"iss": format!("https://securetoken.google.com/{PROJECT}"),
			"iat": now(),
			"exp": now() + 600,
		})
	}

	async fn jwks_server(expected_fetches: u64) -> MockServer {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/jwks"))
			.respond_with(ResponseTemplate::new(200).set_body_json(&test_key().jwks))
			.expect(expected_fetches)
			.mount(&server)
			.await;
		server
	}

	fn verifier(server: &MockServer) -> FirebaseTokenVerifier {
		FirebaseTokenVerifier::new(Some(PROJECT.to_string()))
			.unwrap()
			.with_jwks_url(format!("{}/jwks", server.uri()))
	}

	#[tokio::test]
	async fn test_valid_token_and_key_reuse() {
		let server = jwks_server(1).await;
		let verifier = verifier(&server);
		let token = sign(valid_claims(), Some(KID));

		let identity = verifier.verify(&token).await.unwrap();
		assert_eq!(identity.uid, "uid-123");
		assert_eq!(identity.email.as_deref(), Some("partner@example.com"));

		// Second call is served from the cached key set.
		verifier.verify(&token).await.unwrap();
	}

	#[tokio::test]
	async fn test_wrong_audience_rejected() {
		let server = jwks_server(1).await;
		let mut claims = valid_claims();
		claims["aud"] = json!("someone-else");

		let err = verifier(&server)
			.verify(&sign(claims, Some(KID)))
			.await
			.unwrap_err();
		assert!(matches!(err, AuthError::InvalidToken(_)));
	}

	#[tokio::test]
	async fn test_wrong_issuer_rejected() {
		let server = jwks_server(1).await;
		let mut claims = valid_claims();
		claims["iss"] = json!("https://evil.example.com");

		let err = verifier(&server)
			.verify(&sign(claims, Some(KID)))
			.await
			.unwrap_err();
		assert!(matches!(err, AuthError::InvalidToken(_)));
	}

	#[tokio::test]
	async fn test_expired_token_rejected() {
		let server = jwks_server(1).await;
		let mut claims = valid_claims();
		claims["exp"] = json!(now() - 3600);

		let err = verifier(&server)
			.verify(&sign(claims, Some(KID)))
			.await
			.unwrap_err();
		assert!(matches!(err, AuthError::InvalidToken(_)));
	}

	#[tokio::test]
	async fn test_empty_subject_rejected() {
		let server = jwks_server(1).await;
		let mut claims = valid_claims();
		claims["sub"] = json!("");

		let err = verifier(&server)
			.verify(&sign(claims, Some(KID)))
			.await
			.unwrap_err();
		assert!(matches!(err, AuthError::InvalidToken(_)));
	}

	#[tokio::test]
	async fn test_unknown_kid_rejected() {
		let server = jwks_server(1).await;
		let err = verifier(&server)
			.verify(&sign(valid_claims(), Some("rotated-away")))
			.await
			.unwrap_err();
		assert_eq!(err, AuthError::invalid("unknown signing key"));
	}

	#[tokio::test]
	async fn test_missing_kid_rejected_without_fetch() {
		let server = jwks_server(0).await;
		let err = verifier(&server)
			.verify(&sign(valid_claims(), None))
			.await
			.unwrap_err();
		assert!(matches!(err, AuthError::InvalidToken(_)));
	}

	#[tokio::test]
	async fn test_hs256_token_rejected() {
		let server = jwks_server(0).await;
		let mut header = Header::new(Algorithm::HS256);
		header.kid = Some(KID.to_string());
		let token = encode(&header, &valid_claims(), &EncodingKey::from_secret(b"shared")).unwrap();

		let err = verifier(&server).verify(&token).await.unwrap_err();
		assert!(matches!(err, AuthError::InvalidToken(_)));
	}

	#[tokio::test]
	async fn test_garbage_token_rejected() {
		let server = jwks_server(0).await;
		let err = verifier(&server).verify("not-a-jwt").await.unwrap_err();
		assert!(matches!(err, AuthError::InvalidToken(_)));
	}

	#[tokio::test]
	async fn test_jwks_failure_is_key_fetch_error() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/jwks"))
			.respond_with(ResponseTemplate::new(500))
			.mount(&server)
			.await;

		let err = verifier(&server)
			.verify(&sign(valid_claims(), Some(KID)))
			.await
			.unwrap_err();
		assert!(matches!(err, AuthError::KeyFetch(_)));
		assert!(err.to_string().starts_with("Invalid token: "));
	}

	#[tokio::test]
	async fn test_unconfigured_verifier() {
		let verifier = FirebaseTokenVerifier::new(Some("  ".to_string())).unwrap();
		assert!(!verifier.is_configured());
		let err = verifier.verify("anything").await.unwrap_err();
		assert_eq!(err, AuthError::NotConfigured);
	}
}
