//! Client-level error types shared across the transport, API, and export layers.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const BODY_PREVIEW_LIMIT: usize = 512;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Credential exchange or bearer injection failed.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// Transport failure that survived the retry policy.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// The service rejected the request.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// The service answered with a body that could not be decoded.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// The operation observed a fired [`CancelSignal`](crate::cancel::CancelSignal).
	#[error("Operation was cancelled.")]
	Cancelled,
}
impl Error {
	/// Returns `true` when the retry layer may attempt the call again.
	pub fn is_transient(&self) -> bool {
		matches!(self, Self::Transport(TransportError::Network { .. } | TransportError::Io(_)))
	}
}

/// Configuration and validation failures raised before any request is sent.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A credential field was empty or absent.
	#[error("Missing TCGplayer {field} key.")]
	MissingCredential {
		/// Which half of the credential pair is missing.
		field: &'static str,
	},
	/// No category identifier was supplied.
	#[error("Missing category id.")]
	MissingCategory,
	/// A batched lookup exceeded the service limit.
	#[error("Too many ids in request: {count} exceeds the limit of {max}.")]
	TooManyIds {
		/// Number of identifiers supplied.
		count: usize,
		/// Maximum accepted by the service.
		max: usize,
	},
	/// An endpoint URL could not be parsed or joined.
	#[error("Endpoint URL is invalid.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Rate limiter settings are out of range.
	#[error("Rate limit must be positive and finite with a non-zero burst (rate {rate}, burst {burst}).")]
	InvalidRateLimit {
		/// Configured steady rate in permits per second.
		rate: f64,
		/// Configured burst capacity.
		burst: u32,
	},
	/// Page size of zero.
	#[error("Page size must be greater than zero.")]
	InvalidPageSize,
	/// Worker count of zero.
	#[error("Worker count must be greater than zero.")]
	InvalidWorkerCount,
	/// No transport was supplied and the `reqwest` feature is disabled.
	#[error("No HTTP transport is configured.")]
	MissingTransport,
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<url::ParseError> for ConfigError {
	fn from(source: url::ParseError) -> Self {
		Self::InvalidEndpoint { source }
	}
}

/// Credential exchange and bearer injection failures.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// Public or private key was empty at call time.
	#[error("Missing public or private key.")]
	EmptyCredentials,
	/// Token endpoint rejected the exchange or answered unexpectedly.
	#[error("Token endpoint rejected the credential exchange: {message}.")]
	TokenEndpoint {
		/// Provider- or client-supplied message summarizing the failure.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token endpoint responded with malformed JSON.
	#[error("Token endpoint returned malformed JSON.")]
	TokenResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::error::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token endpoint response omitted `expires_in`.
	#[error("Token endpoint response is missing expires_in.")]
	MissingExpiresIn,
	/// Token endpoint returned an excessively large `expires_in`.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
	/// Token endpoint returned a non-positive duration.
	#[error("The expires_in value must be positive.")]
	NonPositiveExpiresIn,
	/// Token endpoint returned an empty access token.
	#[error("Token endpoint returned an empty access token.")]
	EmptyAccessToken,
	/// Access token cannot be carried in an `Authorization` header.
	#[error("Access token contains characters that are not valid in a header.")]
	InvalidBearer(#[from] oauth2::http::header::InvalidHeaderValue),
}

/// Transport-level failures (network, IO, exhausted retries).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the TCGplayer API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the TCGplayer API.")]
	Io(#[from] std::io::Error),
	/// Every attempt allowed by the retry policy failed.
	#[error("{method} {url} giving up after {attempts} attempt(s){}.", .status.map(|s| format!(" (last status {s})")).unwrap_or_default())]
	RetriesExhausted {
		/// Request method.
		method: String,
		/// Request URL.
		url: String,
		/// Attempts performed, including the first.
		attempts: u32,
		/// Last HTTP status observed, if any response arrived.
		status: Option<u16>,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Failures reported by the service inside a response envelope.
#[derive(Debug, ThisError)]
pub enum ApiError {
	/// Non-success HTTP status carrying explicit error messages.
	#[error("{}", .messages.join(" "))]
	Rejected {
		/// HTTP status code of the response.
		status: u16,
		/// Error strings reported by the envelope.
		messages: Vec<String>,
	},
	/// The service answered successfully but omitted an expected record.
	#[error("The service returned no {what} for id {id}.")]
	MissingResult {
		/// Record kind that was expected.
		what: &'static str,
		/// Identifier that was looked up.
		id: u32,
	},
}

/// Malformed response payloads.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// The uniform response envelope could not be parsed.
	#[error("Response envelope is malformed: {source}: {body}")]
	Envelope {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::error::Error>,
		/// Preview of the raw body for diagnosis.
		body: String,
	},
	/// The envelope's `results` payload did not match the expected record shape.
	#[error("Response results are malformed.")]
	Results {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::error::Error>,
	},
}
impl DecodeError {
	pub(crate) fn envelope(
		source: serde_path_to_error::Error<serde_json::error::Error>,
		body: &[u8],
	) -> Self {
		Self::Envelope { source, body: body_preview(body) }
	}
}

/// Returns a lossy, bounded preview of a response body.
pub(crate) fn body_preview(body: &[u8]) -> String {
	let text = String::from_utf8_lossy(body);

	match text.char_indices().nth(BODY_PREVIEW_LIMIT) {
		Some((idx, _)) => format!("{}…", &text[..idx]),
		None => text.into_owned(),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn api_rejection_joins_messages() {
		let err = ApiError::Rejected {
			status: 404,
			messages: vec!["No products".into(), "were found.".into()],
		};

		assert_eq!(err.to_string(), "No products were found.");
	}

	#[test]
	fn body_preview_truncates_long_bodies() {
		let body = "x".repeat(BODY_PREVIEW_LIMIT + 10);
		let preview = body_preview(body.as_bytes());

		assert_eq!(preview.chars().count(), BODY_PREVIEW_LIMIT + 1);
		assert!(preview.ends_with('…'));
		assert_eq!(body_preview(b"short"), "short");
	}

	#[test]
	fn only_network_failures_are_transient() {
		let network = Error::from(TransportError::Io(std::io::Error::other("reset")));

		assert!(network.is_transient());
		assert!(!Error::from(AuthError::EmptyCredentials).is_transient());
		assert!(!Error::Cancelled.is_transient());
	}
}
