//! Resolver configuration.
//!
//! Files may be TOML, YAML or JSON. `${VAR}` references are substituted from
//! the environment before parsing, and a handful of `RESOLVER_*` variables
//! override individual settings afterwards.

use thiserror::Error;

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("File not found: {0}")]
	FileNotFound(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Environment variable not found: {0}")]
	EnvVarNotFound(String),

	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),
}
