//! Rate-limited, token-managed access to the TCGplayer catalog and pricing API, plus a
//! concurrent pagination engine that exports whole categories as deterministic snapshots.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod cancel;
pub mod envelope;
pub mod error;
pub mod export;
pub mod http;
pub mod model;
pub mod obs;
pub mod paginate;
pub mod rate_limit;

mod oauth;

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use oauth2::{HttpRequest, HttpResponse, http::StatusCode};
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(feature = "cli")] use {clap as _, tracing_subscriber as _};
#[cfg(test)] use {assert_cmd as _, color_eyre as _, httpmock as _};
