//! Error types for repository operations.
//!
//! Repositories load static configuration (sale descriptors and interface descriptions).
//! A missing entry is reported separately from a malformed one so callers can tell an
//! unknown contract from a broken configuration.

use log::error;
use thiserror::Error;

use crate::models::ConfigError;

/// Errors that can occur during repository operations
#[derive(Debug, Error)]
pub enum RepositoryError {
	/// Error that occurs when configuration validation fails
	#[error("Validation error: {0}")]
	ValidationError(String),

	/// Error that occurs when loading configurations from files
	#[error("Load error: {0}")]
	LoadError(String),

	/// No entry exists for the requested key
	#[error("Not found: {0}")]
	NotFound(String),
}

impl RepositoryError {
	/// Create a new validation error with the given message
	///
	/// Also logs the error message at the error level.
	pub fn validation_error(msg: impl Into<String>) -> Self {
		let error = Self::ValidationError(msg.into());
		error!("{}", error);
		error
	}

	/// Create a new load error with the given message
	///
	/// Also logs the error message at the error level.
	pub fn load_error(msg: impl Into<String>) -> Self {
		let error = Self::LoadError(msg.into());
		error!("{}", error);
		error
	}

	/// Create a new not-found error with the given key
	///
	/// The service layer logs the miss after conversion.
	pub fn not_found(msg: impl Into<String>) -> Self {
		Self::NotFound(msg.into())
	}
}

impl From<ConfigError> for RepositoryError {
	fn from(err: ConfigError) -> Self {
		match err {
			ConfigError::ValidationError(msg) => Self::validation_error(msg),
			other => Self::load_error(other.to_string()),
		}
	}
}
