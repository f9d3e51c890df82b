//! Uniform response wrapper returned by every catalog and pricing endpoint.

// crates.io
use serde::de::DeserializeOwned;
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	error::{ApiError, DecodeError},
};

/// Partially parsed response: counters and errors up front, records left raw.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
	/// Size of the whole collection the request addressed (not of this page).
	#[serde(default)]
	pub total_items: usize,
	/// Service-reported success flag.
	#[serde(default)]
	pub success: bool,
	/// Service-reported error messages.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub errors: Vec<String>,
	/// Undecoded `results` payload, decoded on demand.
	#[serde(default)]
	pub results: Value,
}
impl Envelope {
	/// Parses `body` and classifies the outcome.
	///
	/// Fails with [`ApiError::Rejected`] only when `status` is outside 2xx **and** the
	/// envelope carries at least one error string. Every other parseable envelope is
	/// returned intact, including `success: false` ones, so callers can use whatever
	/// partial payload exists.
	pub fn decode(body: &[u8], status: StatusCode) -> Result<Self> {
		let mut de = serde_json::Deserializer::from_slice(body);
		let envelope: Self = serde_path_to_error::deserialize(&mut de)
			.map_err(|source| DecodeError::envelope(source, body))?;

		if !status.is_success() && !envelope.errors.is_empty() {
			return Err(
				ApiError::Rejected { status: status.as_u16(), messages: envelope.errors }.into()
			);
		}

		Ok(envelope)
	}

	/// Decodes the `results` payload; a missing or `null` payload decodes as `T::default()`.
	pub fn results<T>(&self) -> Result<T>
	where
		T: DeserializeOwned + Default,
	{
		if self.results.is_null() {
			return Ok(T::default());
		}

		serde_path_to_error::deserialize(&self.results)
			.map_err(|source| DecodeError::Results { source }.into())
	}
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
	D: serde::Deserializer<'de>,
{
	Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
