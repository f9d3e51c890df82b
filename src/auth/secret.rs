//! String wrapper for private keys and access tokens.

// self
use crate::_prelude::*;

/// Sensitive string whose `Debug` and `Display` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);
impl Secret {
	/// Wraps `value`.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Plain value, for the token exchange and the `Authorization` header only.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns `true` for an empty value.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl From<String> for Secret {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl Debug for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Secret").field(&"<redacted>").finish()
	}
}
impl Display for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let secret = Secret::from(String::from("private-key"));

		assert_eq!(format!("{secret:?}"), "Secret(\"<redacted>\")");
		assert_eq!(secret.to_string(), "<redacted>");
		assert_eq!(secret.expose(), "private-key");
		assert!(Secret::new("").is_empty());
	}
}
