//! REST client for the SIGESCON backend.
//!
//! Wraps `reqwest` with the backend's conventions:
//! - the stored token is attached as `Authorization: <Scheme> <token>`, but
//!   only to URLs on the configured backend's origin
//! - JSON content type unless the body is multipart, form or raw bytes
//! - non-2xx responses become [`Error::Http`] carrying the server's message
//! - empty bodies parse as JSON `null`, malformed ones as [`Error::Parse`]

use std::sync::Arc;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sigescon_protocol::ErrorBody;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::tokens::{StoredToken, TokenStore};

pub use reqwest::Method;
pub use reqwest::multipart;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Request payload.
pub enum RequestBody {
	Empty,
	Json(Value),
	/// Flat object sent as `application/x-www-form-urlencoded`.
	Form(Value),
	Multipart(multipart::Form),
	Bytes {
		data: Vec<u8>,
		content_type: String,
	},
}

/// Which token, if any, authenticates a request.
#[derive(Debug, Clone, Default)]
pub enum Auth {
	/// Read from the token store at send time.
	#[default]
	Stored,
	/// Use this token regardless of what is stored.
	Explicit(StoredToken),
	Anonymous,
}

/// Per-request options for [`ApiClient::request`].
pub struct RequestOptions {
	pub method: Method,
	pub body: RequestBody,
	pub auth: Auth,
	pub query: Vec<(String, String)>,
}

impl RequestOptions {
	pub fn get() -> Self {
		Self::new(Method::GET)
	}

	pub fn post() -> Self {
		Self::new(Method::POST)
	}

	pub fn new(method: Method) -> Self {
		Self {
			method,
			body: RequestBody::Empty,
			auth: Auth::Stored,
			query: Vec::new(),
		}
	}

	/// Serializes `body` as the JSON payload.
	pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
		self.body = RequestBody::Json(serde_json::to_value(body).map_err(|e| Error::Parse(e.to_string()))?);
		Ok(self)
	}

	/// Serializes `body` as a urlencoded form; it must be a flat struct or map.
	pub fn form<T: Serialize>(mut self, body: &T) -> Result<Self> {
		let value = serde_json::to_value(body).map_err(|e| Error::Parse(e.to_string()))?;
		if !value.is_object() {
			return Err(Error::Parse("form body must serialize to an object".into()));
		}
		self.body = RequestBody::Form(value);
		Ok(self)
	}

	pub fn multipart(mut self, form: multipart::Form) -> Self {
		self.body = RequestBody::Multipart(form);
		self
	}

	pub fn bytes(mut self, data: Vec<u8>, content_type: impl Into<String>) -> Self {
		self.body = RequestBody::Bytes {
			data,
			content_type: content_type.into(),
		};
		self
	}

	pub fn auth(mut self, auth: Auth) -> Self {
		self.auth = auth;
		self
	}

	pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.push((key.into(), value.into()));
		self
	}
}

/// HTTP client bound to one backend and one token store.
#[derive(Debug, Clone)]
pub struct ApiClient {
	http: reqwest::Client,
	config: Arc<ClientConfig>,
	tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
	pub fn new(config: ClientConfig, tokens: Arc<dyn TokenStore>) -> Result<Self> {
		let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
		if let Some(timeout) = config.timeout {
			builder = builder.timeout(timeout);
		}
		let http = builder
			.build()
			.map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;
		Ok(Self {
			http,
			config: Arc::new(config),
			tokens,
		})
	}

	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	pub fn tokens(&self) -> &Arc<dyn TokenStore> {
		&self.tokens
	}

	/// Sends a request and returns the parsed JSON body (`null` when empty).
	pub async fn request(&self, endpoint: &str, options: RequestOptions) -> Result<Value> {
		let url = self.config.url_for(endpoint)?;
		let method = options.method.clone();

		let auth_header = self.authorization(&options.auth, &url)?;
		let mut builder = self.http.request(options.method, url).header(ACCEPT, JSON_CONTENT_TYPE);
		if let Some(header) = auth_header {
			builder = builder.header(AUTHORIZATION, header);
		}
		if !options.query.is_empty() {
			builder = builder.query(&options.query);
		}
		builder = match options.body {
			RequestBody::Empty => builder.header(CONTENT_TYPE, JSON_CONTENT_TYPE),
			RequestBody::Json(value) => builder.json(&value),
			RequestBody::Form(value) => builder.form(&value),
			RequestBody::Multipart(form) => builder.multipart(form),
			RequestBody::Bytes { data, content_type } => builder.header(CONTENT_TYPE, content_type).body(data),
		};

		debug!(target = "sigescon.api", %method, %endpoint, "sending request");
		let response = builder.send().await?;
		let status = response.status();
		let body = response.text().await?;

		if !status.is_success() {
			let err = error_from_body(status.as_u16(), &body);
			warn!(target = "sigescon.api", %method, %endpoint, status = status.as_u16(), error = %err, "request failed");
			return Err(err);
		}

		debug!(target = "sigescon.api", %method, %endpoint, status = status.as_u16(), bytes = body.len(), "request completed");
		parse_json_body(&body)
	}

	/// Sends a request and deserializes the JSON body into `T`.
	pub async fn request_json<T: DeserializeOwned>(&self, endpoint: &str, options: RequestOptions) -> Result<T> {
		let value = self.request(endpoint, options).await?;
		serde_json::from_value(value).map_err(|e| Error::Parse(format!("unexpected response shape from {endpoint}: {e}")))
	}

	/// Fetches a binary payload (file downloads).
	///
	/// Non-2xx responses raise a generic status error; the body is not parsed.
	pub async fn fetch_binary(&self, endpoint: &str) -> Result<Vec<u8>> {
		let url = self.config.url_for(endpoint)?;
		let auth_header = self.authorization(&Auth::Stored, &url)?;
		let mut builder = self.http.get(url);
		if let Some(header) = auth_header {
			builder = builder.header(AUTHORIZATION, header);
		}

		debug!(target = "sigescon.api", %endpoint, "fetching binary");
		let response = builder.send().await?;
		let status = response.status();
		if !status.is_success() {
			warn!(target = "sigescon.api", %endpoint, status = status.as_u16(), "binary fetch failed");
			return Err(Error::http_status(status.as_u16()));
		}
		Ok(response.bytes().await?.to_vec())
	}

	/// The stored token only goes to the configured backend's origin.
	fn authorization(&self, auth: &Auth, url: &Url) -> Result<Option<String>> {
		match auth {
			Auth::Stored if url.origin() != self.config.base_url.origin() => {
				debug!(target = "sigescon.api", host = ?url.host_str(), "not sending stored token to foreign origin");
				Ok(None)
			}
			Auth::Stored => Ok(self.tokens.read()?.map(|t| t.authorization())),
			Auth::Explicit(token) => Ok(Some(token.authorization())),
			Auth::Anonymous => Ok(None),
		}
	}
}

/// Builds the error for a failed response from its (possibly empty) body.
pub(crate) fn error_from_body(status: u16, body: &str) -> Error {
	let message = serde_json::from_str::<ErrorBody>(body).ok().and_then(|b| b.message());
	match message {
		Some(message) => Error::Http { status, message },
		None => Error::http_status(status),
	}
}

pub(crate) fn parse_json_body(body: &str) -> Result<Value> {
	if body.trim().is_empty() {
		return Ok(Value::Null);
	}
	serde_json::from_str(body).map_err(|e| Error::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_body_is_null() {
		assert_eq!(parse_json_body("").unwrap(), Value::Null);
		assert_eq!(parse_json_body("  \n").unwrap(), Value::Null);
	}

	#[test]
	fn malformed_body_is_parse_error() {
		assert!(matches!(parse_json_body("<html>oops</html>"), Err(Error::Parse(_))));
	}

	#[test]
	fn error_uses_server_detail() {
		let err = error_from_body(400, r#"{"detail":"Perfil não disponível"}"#);
		assert_eq!(err.to_string(), "Perfil não disponível");
		assert_eq!(err.status(), Some(400));
	}

	#[test]
	fn error_falls_back_to_status_message() {
		assert_eq!(error_from_body(500, "").to_string(), "HTTP error 500");
		assert_eq!(error_from_body(502, "<html>Bad gateway</html>").to_string(), "HTTP error 502");
		assert_eq!(error_from_body(404, r#"{"detail":""}"#).to_string(), "HTTP error 404");
	}

	#[test]
	fn form_body_must_be_an_object() {
		let options = RequestOptions::post()
			.form(&sigescon_protocol::LoginForm {
				username: "ana".into(),
				password: "x".into(),
			})
			.unwrap();
		assert!(matches!(options.body, RequestBody::Form(Value::Object(ref map)) if map.len() == 2));
		assert!(matches!(RequestOptions::post().form(&["a", "b"]), Err(Error::Parse(_))));
	}
}
