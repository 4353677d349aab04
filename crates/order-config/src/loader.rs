//! Configuration loading from files and environment.

use crate::{ConfigError, ResolverConfig};
use alloy::primitives::Address;
use regex::Regex;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader {
	file_path: Option<PathBuf>,
	env_prefix: String,
}

impl Default for ConfigLoader {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigLoader {
	pub fn new() -> Self {
		Self {
			file_path: None,
			env_prefix: "RESOLVER_".to_string(),
		}
	}

	pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
		self.file_path = Some(path.as_ref().to_path_buf());
		self
	}

	pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.env_prefix = prefix.into();
		self
	}

	pub async fn load(&self) -> Result<ResolverConfig, ConfigError> {
		let Some(file_path) = &self.file_path else {
			return Err(ConfigError::FileNotFound(
				"No configuration file specified".to_string(),
			));
		};
		info!("Loading configuration from {:?}", file_path);

		let mut config = self.load_from_file(file_path).await?;
		self.apply_env_overrides(&mut config)?;
		validate_config(&config)?;

		Ok(config)
	}

	async fn load_from_file(&self, path: &Path) -> Result<ResolverConfig, ConfigError> {
		let content = tokio::fs::read_to_string(path).await.map_err(|e| {
			if e.kind() == std::io::ErrorKind::NotFound {
				ConfigError::FileNotFound(path.display().to_string())
			} else {
				ConfigError::IoError(e)
			}
		})?;
		let content = substitute_env_vars(&content)?;

		match path.extension().and_then(|ext| ext.to_str()) {
			Some("toml") => {
				toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
			}
			Some("json") => {
				serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
			}
			Some("yaml") | Some("yml") => {
				serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
			}
			_ => Err(ConfigError::ParseError(format!(
				"Unsupported config format: {}",
				path.display()
			))),
		}
	}

	fn apply_env_overrides(&self, config: &mut ResolverConfig) -> Result<(), ConfigError> {
		if let Ok(log_level) = env::var(format!("{}LOG_LEVEL", self.env_prefix)) {
			debug!("Overriding log level from environment");
			config.resolver.log_level = log_level;
		}

		if let Ok(chain_id) = env::var(format!("{}CHAIN_ID", self.env_prefix)) {
			debug!("Overriding chain id from environment");
			config.resolver.chain_id = chain_id
				.parse()
				.map_err(|e| ConfigError::ValidationError(format!("Invalid chain id: {}", e)))?;
		}

		if let Ok(rpc_url) = env::var(format!("{}RPC_URL", self.env_prefix)) {
			debug!("Overriding chain state RPC URL from environment");
			match &mut config.chain_state.config {
				toml::Value::Table(table) => {
					table.insert("rpc_url".to_string(), toml::Value::String(rpc_url));
				}
				_ => {
					return Err(ConfigError::ValidationError(
						"chain_state.config must be a table".to_string(),
					))
				}
			}
		}

		Ok(())
	}
}

/// Replaces `${VAR_NAME}` references with the variable's value.
fn substitute_env_vars(content: &str) -> Result<String, ConfigError> {
	let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConfigError::ParseError(e.to_string()))?;

	let mut result = content.to_string();
	for cap in re.captures_iter(content) {
		let full_match = &cap[0];
		let var_name = &cap[1];

		let value =
			env::var(var_name).map_err(|_| ConfigError::EnvVarNotFound(var_name.to_string()))?;
		result = result.replace(full_match, &value);
	}

	Ok(result)
}

fn validate_config(config: &ResolverConfig) -> Result<(), ConfigError> {
	let Some(network) = config.network_addresses() else {
		return Err(ConfigError::ValidationError(format!(
			"Chain {} has no built-in addresses; set network.exchange and network.wrapped_native",
			config.resolver.chain_id
		)));
	};

	// Nonces must come from the exchange the orders name.
	if let Some(exchange) = config.chain_state.config.get("exchange").and_then(|v| v.as_str()) {
		let exchange = exchange.parse::<Address>().map_err(|e| {
			ConfigError::ValidationError(format!("Invalid chain_state exchange: {}", e))
		})?;
		if exchange != network.exchange {
			return Err(ConfigError::ValidationError(format!(
				"chain_state exchange {} differs from chain {} exchange {}",
				exchange, network.chain_id, network.exchange
			)));
		}
	}

	if config.fees.surcharge.bps > 10_000 {
		return Err(ConfigError::ValidationError(format!(
			"Surcharge of {} bps exceeds 10000",
			config.fees.surcharge.bps
		)));
	}

	if config.catalog.implementation.trim().is_empty() {
		return Err(ConfigError::ValidationError(
			"catalog.implementation must be set".to_string(),
		));
	}

	if config.chain_state.implementation.trim().is_empty() {
		return Err(ConfigError::ValidationError(
			"chain_state.implementation must be set".to_string(),
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	fn write_config(suffix: &str, content: &str) -> tempfile::NamedTempFile {
		let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
		file.write_all(content.as_bytes()).unwrap();
		file
	}

	const TOML_CONFIG: &str = r#"
[resolver]
chain_id = 1
log_level = "debug"

[fees.surcharge]
bps = 300

[catalog]
implementation = "file"
config = { path = "catalog.json" }

[chain_state]
implementation = "rpc"
config = { rpc_url = "http://localhost:8545" }
"#;

	#[tokio::test]
	async fn test_load_toml() {
		let file = write_config(".toml", TOML_CONFIG);
		let config = ConfigLoader::new()
			.with_env_prefix("TEST_LOAD_TOML_")
			.with_file(file.path())
			.load()
			.await
			.unwrap();

		assert_eq!(config.resolver.chain_id, 1);
		assert_eq!(config.resolver.log_level, "debug");
		assert_eq!(config.fees.surcharge.bps, 300);
		assert_eq!(config.fees.surcharge.orderbook, "opensea");
		assert_eq!(config.catalog.implementation, "file");
		assert_eq!(
			config.catalog.config.get("path").and_then(|v| v.as_str()),
			Some("catalog.json")
		);
	}

	#[tokio::test]
	async fn test_load_yaml_and_json() {
		let yaml = write_config(
			".yaml",
			"resolver:\n  chain_id: 4\ncatalog:\n  implementation: memory\nchain_state:\n  implementation: fixed\n  config:\n    default: 2\n",
		);
		let config = ConfigLoader::new()
			.with_env_prefix("TEST_LOAD_YAML_")
			.with_file(yaml.path())
			.load()
			.await
			.unwrap();
		assert_eq!(config.resolver.chain_id, 4);
		assert_eq!(
			config.chain_state.config.get("default").and_then(|v| v.as_integer()),
			Some(2)
		);

		let json = write_config(
			".json",
			r#"{"resolver": {"chain_id": 1}, "catalog": {"implementation": "memory"}, "chain_state": {"implementation": "fixed"}}"#,
		);
		let config = ConfigLoader::new()
			.with_env_prefix("TEST_LOAD_JSON_")
			.with_file(json.path())
			.load()
			.await
			.unwrap();
		assert_eq!(config.chain_state.implementation, "fixed");
	}

	#[tokio::test]
	async fn test_env_substitution() {
		env::set_var("TEST_SUBST_RPC_HOST", "node.internal");
		let file = write_config(
			".toml",
			r#"
[resolver]
chain_id = 1

[catalog]
implementation = "memory"

[chain_state]
implementation = "rpc"
config = { rpc_url = "http://${TEST_SUBST_RPC_HOST}:8545" }
"#,
		);

		let config = ConfigLoader::new()
			.with_env_prefix("TEST_SUBST_")
			.with_file(file.path())
			.load()
			.await
			.unwrap();
		assert_eq!(
			config.chain_state.config.get("rpc_url").and_then(|v| v.as_str()),
			Some("http://node.internal:8545")
		);
	}

	#[tokio::test]
	async fn test_missing_env_var() {
		let file = write_config(
			".toml",
			"[resolver]\nchain_id = ${TEST_MISSING_CHAIN_VAR}\n",
		);

		let result = ConfigLoader::new().with_file(file.path()).load().await;
		assert!(
			matches!(result, Err(ConfigError::EnvVarNotFound(name)) if name == "TEST_MISSING_CHAIN_VAR")
		);
	}

	#[tokio::test]
	async fn test_env_overrides() {
		env::set_var("TEST_OVERRIDE_LOG_LEVEL", "trace");
		env::set_var("TEST_OVERRIDE_CHAIN_ID", "4");
		env::set_var("TEST_OVERRIDE_RPC_URL", "https://rinkeby.node.local");
		let file = write_config(".toml", TOML_CONFIG);

		let config = ConfigLoader::new()
			.with_env_prefix("TEST_OVERRIDE_")
			.with_file(file.path())
			.load()
			.await
			.unwrap();

		assert_eq!(config.resolver.log_level, "trace");
		assert_eq!(config.resolver.chain_id, 4);
		assert_eq!(
			config.chain_state.config.get("rpc_url").and_then(|v| v.as_str()),
			Some("https://rinkeby.node.local")
		);
	}

	#[tokio::test]
	async fn test_chain_state_exchange_must_match_network() {
		let content = TOML_CONFIG.replace(
			"rpc_url = \"http://localhost:8545\"",
			"rpc_url = \"http://localhost:8545\", exchange = \"0x7f268357a8c2552623316e2562d90e642bb538e5\"",
		);
		let file = write_config(".toml", &content);

		let config = ConfigLoader::new()
			.with_env_prefix("TEST_PINNED_EXCHANGE_")
			.with_file(file.path())
			.load()
			.await
			.unwrap();
		assert_eq!(config.resolver.chain_id, 1);

		env::set_var("TEST_MOVED_EXCHANGE_CHAIN_ID", "4");
		let result = ConfigLoader::new()
			.with_env_prefix("TEST_MOVED_EXCHANGE_")
			.with_file(file.path())
			.load()
			.await;
		assert!(
			matches!(result, Err(ConfigError::ValidationError(msg)) if msg.contains("differs"))
		);
	}

	#[tokio::test]
	async fn test_validation() {
		let unknown_chain = write_config(
			".toml",
			"[resolver]\nchain_id = 137\n[catalog]\nimplementation = \"memory\"\n[chain_state]\nimplementation = \"fixed\"\n",
		);
		let result = ConfigLoader::new()
			.with_env_prefix("TEST_VALIDATION_")
			.with_file(unknown_chain.path())
			.load()
			.await;
		assert!(matches!(result, Err(ConfigError::ValidationError(_))));

		let excessive_fee = write_config(
			".toml",
			"[resolver]\nchain_id = 1\n[fees.surcharge]\nbps = 10001\n[catalog]\nimplementation = \"memory\"\n[chain_state]\nimplementation = \"fixed\"\n",
		);
		let result = ConfigLoader::new()
			.with_env_prefix("TEST_VALIDATION_")
			.with_file(excessive_fee.path())
			.load()
			.await;
		assert!(matches!(result, Err(ConfigError::ValidationError(_))));

		let unnamed = write_config(
			".toml",
			"[resolver]\nchain_id = 1\n[catalog]\nimplementation = \"\"\n[chain_state]\nimplementation = \"fixed\"\n",
		);
		let result = ConfigLoader::new()
			.with_env_prefix("TEST_VALIDATION_")
			.with_file(unnamed.path())
			.load()
			.await;
		assert!(matches!(result, Err(ConfigError::ValidationError(_))));
	}

	#[tokio::test]
	async fn test_unsupported_format_and_missing_file() {
		let file = write_config(".ini", "chain_id = 1");
		let result = ConfigLoader::new().with_file(file.path()).load().await;
		assert!(matches!(result, Err(ConfigError::ParseError(_))));

		let result = ConfigLoader::new()
			.with_file("/nonexistent/resolver.toml")
			.load()
			.await;
		assert!(matches!(result, Err(ConfigError::FileNotFound(_))));

		let result = ConfigLoader::new().load().await;
		assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
	}
}
