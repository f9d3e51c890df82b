//! Client-credentials exchange driven through the crate's own [`HttpTransport`].

// crates.io
use oauth2::{
	AsyncHttpClient, AuthType, ClientId, ClientSecret, RequestTokenError, TokenResponse, TokenUrl,
	basic::{BasicClient, BasicErrorResponse, BasicRequestTokenError},
};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, Credential},
	error::AuthError,
	http::{HttpTransport, ResponseMetadata, ResponseMetadataSlot},
};

/// [`AsyncHttpClient`] adapter that records response metadata for error mapping.
pub(crate) struct InstrumentedHandle {
	transport: Arc<dyn HttpTransport>,
	slot: ResponseMetadataSlot,
}
impl InstrumentedHandle {
	pub(crate) fn new(transport: Arc<dyn HttpTransport>, slot: ResponseMetadataSlot) -> Self {
		Self { transport, slot }
	}
}
impl<'c> AsyncHttpClient<'c> for InstrumentedHandle {
	type Error = Error;
	type Future = Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		Box::pin(async move {
			self.slot.take();

			let response = self.transport.send(request).await?;

			self.slot.store(ResponseMetadata::from_response(&response));

			Ok(response)
		})
	}
}

/// Exchanges the key pair for an access token (`grant_type=client_credentials`).
///
/// Keys travel in the form body (`client_id`/`client_secret`), which is what the service
/// expects instead of HTTP basic authentication.
pub(crate) async fn exchange_client_credentials(
	transport: Arc<dyn HttpTransport>,
	token_url: &Url,
	credential: &Credential,
) -> Result<AccessToken> {
	let meta = ResponseMetadataSlot::default();
	let handle = InstrumentedHandle::new(transport, meta.clone());
	let client = BasicClient::new(ClientId::new(credential.public_key.clone()))
		.set_client_secret(ClientSecret::new(credential.private_key.expose().to_owned()))
		.set_token_uri(TokenUrl::from_url(token_url.clone()))
		.set_auth_type(AuthType::RequestBody);
	let response = client
		.exchange_client_credentials()
		.request_async(&handle)
		.await
		.map_err(|err| map_request_error(meta.take(), err))?;
	let expires_in = response.expires_in().ok_or(AuthError::MissingExpiresIn)?.as_secs();
	let expires_in = i64::try_from(expires_in).map_err(|_| AuthError::ExpiresInOutOfRange)?;

	if expires_in <= 0 {
		return Err(AuthError::NonPositiveExpiresIn.into());
	}

	let value = response.access_token().secret();

	if value.is_empty() {
		return Err(AuthError::EmptyAccessToken.into());
	}

	Ok(AccessToken::new(value.to_owned(), OffsetDateTime::now_utc(), Duration::seconds(expires_in)))
}

fn map_request_error(meta: Option<ResponseMetadata>, err: BasicRequestTokenError<Error>) -> Error {
	let status = meta.and_then(|value| value.status);

	match err {
		RequestTokenError::ServerResponse(response) => map_server_response(response, status),
		RequestTokenError::Request(error) => error,
		RequestTokenError::Parse(source, _body) =>
			AuthError::TokenResponseParse { source, status }.into(),
		RequestTokenError::Other(message) => AuthError::TokenEndpoint { message, status }.into(),
	}
}

fn map_server_response(response: BasicErrorResponse, status: Option<u16>) -> Error {
	let message = match response.error_description() {
		Some(description) => format!("{}: {description}", response.error().as_ref()),
		None => response.error().as_ref().to_owned(),
	};

	AuthError::TokenEndpoint { message, status }.into()
}
