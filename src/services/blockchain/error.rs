//! Blockchain error types and handling.
//!
//! Every failure surfaced by connection, proxy and resolution operations is one of four
//! kinds. Connection failures carry a stable [`ReasonCode`] so reporting layers can
//! present them without inspecting the message.

use log::error;
use std::fmt;
use thiserror::Error;

use crate::{
	models::ConfigError,
	repositories::RepositoryError,
	services::blockchain::transports::TransportError,
};

/// Machine-readable reason attached to connection failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReasonCode {
	/// The endpoint did not answer the reachability probe
	Web3ConnectionFail,
}

impl ReasonCode {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Web3ConnectionFail => "WEB3_CONNECTION_FAIL",
		}
	}
}

impl fmt::Display for ReasonCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Represents possible errors that can occur during blockchain operations
#[derive(Debug, Error)]
pub enum BlockChainError {
	/// Malformed endpoint, descriptor table, interface description or stage order
	#[error("Configuration error: {0}")]
	ConfigurationError(String),

	/// Endpoint unreachable at probe time
	#[error("Connection error ({reason}): {message}")]
	ConnectionError { reason: ReasonCode, message: String },

	/// No descriptor or interface description exists for the address
	#[error("Descriptor not found: {0}")]
	DescriptorNotFound(String),

	/// Hard failure while resolving; the partial record is discarded
	#[error("Resolution error: {0}")]
	ResolutionError(String),
}

impl BlockChainError {
	/// Creates a new configuration error with logging
	pub fn configuration_error(msg: impl Into<String>) -> Self {
		let error = Self::ConfigurationError(msg.into());
		error!("{}", error);
		error
	}

	/// Creates a new `WEB3_CONNECTION_FAIL` connection error with logging
	pub fn connection_error(msg: impl Into<String>) -> Self {
		let error = Self::ConnectionError {
			reason: ReasonCode::Web3ConnectionFail,
			message: msg.into(),
		};
		error!("{}", error);
		error
	}

	/// Creates a new descriptor-not-found error with logging
	pub fn descriptor_not_found(address: impl Into<String>) -> Self {
		let error = Self::DescriptorNotFound(address.into());
		error!("{}", error);
		error
	}

	/// Creates a new resolution error with logging
	pub fn resolution_error(msg: impl Into<String>) -> Self {
		let error = Self::ResolutionError(msg.into());
		error!("{}", error);
		error
	}

	/// Stable reason code, present for connection failures only
	pub fn reason(&self) -> Option<ReasonCode> {
		match self {
			Self::ConnectionError { reason, .. } => Some(*reason),
			_ => None,
		}
	}
}

impl From<TransportError> for BlockChainError {
	fn from(err: TransportError) -> Self {
		Self::resolution_error(err.to_string())
	}
}

impl From<ConfigError> for BlockChainError {
	fn from(err: ConfigError) -> Self {
		Self::configuration_error(err.to_string())
	}
}

impl From<RepositoryError> for BlockChainError {
	fn from(err: RepositoryError) -> Self {
		match err {
			RepositoryError::NotFound(key) => Self::descriptor_not_found(key),
			other => Self::configuration_error(other.to_string()),
		}
	}
}
