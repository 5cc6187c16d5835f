//! Errors raised while a request travels through the provider pipeline.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
	/// The request could not be delivered or the endpoint answered with a non-2xx status
	#[error("HTTP error: {0}")]
	Http(String),

	/// The endpoint answered with a JSON-RPC error object
	#[error("JSON-RPC error {code}: {message}")]
	Rpc { code: i64, message: String },

	/// The response body was not the expected JSON-RPC shape
	#[error("Response parse error: {0}")]
	ResponseParse(String),

	/// No stage could serve the method
	#[error("Unsupported method: {0}")]
	Unsupported(String),

	/// The handle was replaced and no longer accepts requests
	#[error("Node handle has been replaced")]
	Stopped,
}

impl TransportError {
	pub fn http(msg: impl Into<String>) -> Self {
		Self::Http(msg.into())
	}

	pub fn response_parse(msg: impl Into<String>) -> Self {
		Self::ResponseParse(msg.into())
	}

	pub fn unsupported(method: impl Into<String>) -> Self {
		Self::Unsupported(method.into())
	}
}

impl From<reqwest_middleware::Error> for TransportError {
	fn from(err: reqwest_middleware::Error) -> Self {
		Self::http(err.to_string())
	}
}

impl From<reqwest::Error> for TransportError {
	fn from(err: reqwest::Error) -> Self {
		Self::http(err.to_string())
	}
}
