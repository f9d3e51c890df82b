//! Public/private key pair used for the client-credentials exchange.

// self
use crate::{
	_prelude::*,
	auth::Secret,
	error::{AuthError, ConfigError},
};

/// Immutable TCGplayer key pair supplied when a client is built.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
	/// Public key, sent as `client_id`.
	pub public_key: String,
	/// Private key, sent as `client_secret`.
	pub private_key: Secret,
}
impl Credential {
	/// Wraps a public/private key pair without validating it.
	///
	/// Empty keys are accepted here so callers can decide where to fail; use
	/// [`Credential::validate`] for an up-front configuration check. The authenticating
	/// transport rejects empty keys on every call regardless.
	pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
		Self { public_key: public_key.into(), private_key: Secret::new(private_key) }
	}

	/// Returns `true` when either half of the pair is empty.
	pub fn is_empty(&self) -> bool {
		self.public_key.is_empty() || self.private_key.is_empty()
	}

	/// Checks both keys are present, naming the first missing one.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.public_key.is_empty() {
			return Err(ConfigError::MissingCredential { field: "public" });
		}
		if self.private_key.is_empty() {
			return Err(ConfigError::MissingCredential { field: "private" });
		}

		Ok(())
	}

	pub(crate) fn ensure_present(&self) -> Result<(), AuthError> {
		if self.is_empty() { Err(AuthError::EmptyCredentials) } else { Ok(()) }
	}
}
impl Debug for Credential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credential")
			.field("public_key", &self.public_key)
			.field("private_key", &"<redacted>")
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn validate_names_missing_half() {
		let err = Credential::new("", "private").validate().expect_err("Empty public key.");

		assert!(matches!(err, ConfigError::MissingCredential { field: "public" }));

		let err = Credential::new("public", "").validate().expect_err("Empty private key.");

		assert!(matches!(err, ConfigError::MissingCredential { field: "private" }));
		assert!(Credential::new("public", "private").validate().is_ok());
	}

	#[test]
	fn call_time_check_rejects_empty_pairs() {
		assert!(matches!(
			Credential::new("public", "").ensure_present(),
			Err(AuthError::EmptyCredentials)
		));
		assert!(Credential::new("public", "private").ensure_present().is_ok());
	}

	#[test]
	fn debug_redacts_private_key() {
		let rendered = format!("{:?}", Credential::new("public", "hunter2"));

		assert!(rendered.contains("public"));
		assert!(!rendered.contains("hunter2"));
	}
}
