// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Encrypted query parameters for partner registration links.
//!
//! A registration link carries the space id as `a` and the invited email as
//! `b`. Both are sealed with AES-256-GCM and encoded as URL-safe base64
//! without padding, so the token needs no further escaping.
//!
//! Token layout: `nonce (12 bytes) || ciphertext || tag (16 bytes)`.

use aes_gcm::{
	aead::{Aead, KeyInit, OsRng},
	Aes256Gcm, Key, Nonce,
};
use base64::engine::general_purpose::{STANDARD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use rand::RngCore;
use zeroize::Zeroizing;

/// Size of the link key in bytes (256 bits for AES-256).
pub const KEY_SIZE: usize = 32;

/// Size of AES-GCM nonce in bytes.
pub const NONCE_SIZE: usize = 12;

const TAG_SIZE: usize = 16;

#[derive(Debug, thiserror::Error)]
pub enum LinkCryptError {
	#[error("invalid link key: {0}")]
	InvalidKey(String),

	#[error("link encryption failed: {0}")]
	Encryption(String),
}

/// Symmetric cipher for link parameters.
#[derive(Clone)]
pub struct LinkCipher {
	cipher: Aes256Gcm,
}

impl std::fmt::Debug for LinkCipher {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LinkCipher").finish_non_exhaustive()
	}
}

impl LinkCipher {
	pub fn new(key: &[u8; KEY_SIZE]) -> Self {
		Self {
			cipher: Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key)),
		}
	}

	/// Accepts URL-safe or standard base64, padded or not.
	pub fn from_base64_key(encoded: &str) -> Result<Self, LinkCryptError> {
		let encoded = encoded.trim();
		let bytes = Zeroizing::new(
			URL_SAFE_NO_PAD
				.decode(encoded.trim_end_matches('='))
				.or_else(|_| URL_SAFE.decode(encoded))
				.or_else(|_| STANDARD.decode(encoded))
				.map_err(|e| LinkCryptError::InvalidKey(e.to_string()))?,
		);

		let key: &[u8; KEY_SIZE] = bytes.as_slice().try_into().map_err(|_| {
			LinkCryptError::InvalidKey(format!("expected {KEY_SIZE} bytes, got {}", bytes.len()))
		})?;
		Ok(Self::new(key))
	}

	/// Cipher under a fresh random key. Tokens do not outlive the process.
	pub fn ephemeral() -> Self {
		let mut key = Zeroizing::new([0u8; KEY_SIZE]);
		OsRng.fill_bytes(key.as_mut());
		Self::new(&key)
	}

	/// A new random key, URL-safe base64 encoded.
	pub fn generate_key() -> String {
		let mut key = Zeroizing::new([0u8; KEY_SIZE]);
		OsRng.fill_bytes(key.as_mut());
		URL_SAFE_NO_PAD.encode(key.as_slice())
	}

	/// Empty input yields an empty token.
	pub fn encrypt_for_url(&self, plain: &str) -> Result<String, LinkCryptError> {
		if plain.is_empty() {
			return Ok(String::new());
		}

		let mut nonce_bytes = [0u8; NONCE_SIZE];
		OsRng.fill_bytes(&mut nonce_bytes);

		let ciphertext = self
			.cipher
			.encrypt(Nonce::from_slice(&nonce_bytes), plain.as_bytes())
			.map_err(|e| LinkCryptError::Encryption(e.to_string()))?;

		let mut token = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
		token.extend_from_slice(&nonce_bytes);
		token.extend_from_slice(&ciphertext);
		Ok(URL_SAFE_NO_PAD.encode(token))
	}

	/// `None` for anything that is not a token sealed under this key.
	pub fn decrypt_from_url(&self, token: &str) -> Option<String> {
		let token = token.trim();
		if token.is_empty() {
			return None;
		}

		let raw = match URL_SAFE_NO_PAD.decode(token.trim_end_matches('=')) {
			Ok(raw) => raw,
			Err(e) => {
				tracing::debug!(error = %e, "link token is not base64");
				return None;
			}
		};
		if raw.len() < NONCE_SIZE + TAG_SIZE {
			tracing::debug!(len = raw.len(), "link token too short");
			return None;
		}

		let (nonce, ciphertext) = raw.split_at(NONCE_SIZE);
		let plain = match self.cipher.decrypt(Nonce::from_slice(nonce), ciphertext) {
			Ok(plain) => plain,
			Err(_) => {
				tracing::debug!("link token failed authentication");
				return None;
			}
		};
		String::from_utf8(plain).ok()
	}

	pub fn encrypt_space_id(&self, space_id: &str) -> Result<String, LinkCryptError> {
		self.encrypt_for_url(space_id)
	}

	pub fn decrypt_space_id(&self, token: &str) -> Option<String> {
		self.decrypt_from_url(token)
	}

	pub fn encrypt_email(&self, email: &str) -> Result<String, LinkCryptError> {
		self.encrypt_for_url(email)
	}

	pub fn decrypt_email(&self, token: &str) -> Option<String> {
		self.decrypt_from_url(token)
	}

	/// The `(a, b)` query parameters of a partner registration link.
	pub fn registration_link_params(
		&self,
		space_id: &str,
		email: &str,
	) -> Result<(String, String), LinkCryptError> {
		Ok((self.encrypt_space_id(space_id)?, self.encrypt_email(email)?))
	}
}
