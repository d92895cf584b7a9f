//! Configurable value types that can load from environment variables or plain values
//!
//! Vendor API keys are configured this way so the config file can reference
//! an environment variable instead of embedding the secret.

use chorus_types::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A value that is either an environment-variable reference or plain text
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ConfigurableValue {
	/// "env" to read from an environment variable, "plain" for a literal
	#[serde(rename = "type")]
	pub value_type: ValueType,
	/// The environment variable name, or the literal value
	pub value: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
	Env,
	Plain,
}

impl ConfigurableValue {
	pub fn from_env(env_var_name: &str) -> Self {
		Self {
			value_type: ValueType::Env,
			value: env_var_name.to_string(),
		}
	}

	pub fn from_plain(plain_value: &str) -> Self {
		Self {
			value_type: ValueType::Plain,
			value: plain_value.to_string(),
		}
	}

	/// Resolve the actual value based on the type
	pub fn resolve(&self) -> Result<String, ConfigurableValueError> {
		match self.value_type {
			ValueType::Env => std::env::var(&self.value).map_err(|_| {
				ConfigurableValueError::EnvironmentVariableNotFound(self.value.clone())
			}),
			ValueType::Plain => Ok(self.value.clone()),
		}
	}

	/// Resolve straight into a [`SecretString`] for credential handling
	pub fn resolve_for_secret(&self) -> Result<SecretString, ConfigurableValueError> {
		let resolved = self.resolve()?;
		Ok(SecretString::new(resolved))
	}

	/// Describe where this value comes from, for startup logging
	pub fn description(&self) -> String {
		match self.value_type {
			ValueType::Env => format!("environment variable '{}'", self.value),
			ValueType::Plain => "configured plain value".to_string(),
		}
	}
}

/// Errors that can occur when resolving configurable values
#[derive(Debug, thiserror::Error)]
pub enum ConfigurableValueError {
	#[error("Environment variable '{0}' not found")]
	EnvironmentVariableNotFound(String),
}

// Display never shows the resolved value, only its provenance
impl fmt::Display for ConfigurableValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.value_type {
			ValueType::Env => write!(f, "env:{}", self.value),
			ValueType::Plain => write!(f, "plain:[REDACTED]"),
		}
	}
}

/// `"env:NAME"` strings become env references, anything else is plain
impl From<&str> for ConfigurableValue {
	fn from(value: &str) -> Self {
		if let Some(env_var) = value.strip_prefix("env:") {
			Self::from_env(env_var)
		} else {
			Self::from_plain(value)
		}
	}
}

impl From<String> for ConfigurableValue {
	fn from(value: String) -> Self {
		ConfigurableValue::from(value.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::env;

	#[test]
	fn test_plain_value() {
		let config = ConfigurableValue::from_plain("sk-plain-key");
		assert_eq!(config.resolve().unwrap(), "sk-plain-key");
	}

	#[test]
	fn test_env_value() {
		env::set_var("CHORUS_TEST_API_KEY", "sk-from-env");

		let config = ConfigurableValue::from_env("CHORUS_TEST_API_KEY");
		assert_eq!(config.resolve().unwrap(), "sk-from-env");

		env::remove_var("CHORUS_TEST_API_KEY");
	}

	#[test]
	fn test_env_value_not_found() {
		let config = ConfigurableValue::from_env("CHORUS_NO_SUCH_VAR");
		assert!(config.resolve().is_err());
	}

	#[test]
	fn test_from_string_conversion() {
		let plain = ConfigurableValue::from("sk-literal");
		assert_eq!(plain.value_type, ValueType::Plain);

		let env_ref = ConfigurableValue::from("env:OPENAI_API_KEY");
		assert_eq!(env_ref.value_type, ValueType::Env);
		assert_eq!(env_ref.value, "OPENAI_API_KEY");
	}

	#[test]
	fn test_secret_resolution() {
		let config = ConfigurableValue::from_plain("sk-secret");
		let secret = config.resolve_for_secret().unwrap();
		assert_eq!(secret.expose_secret(), "sk-secret");
	}

	#[test]
	fn test_display_never_leaks_plain_values() {
		let plain = ConfigurableValue::from_plain("sk-secret");
		assert_eq!(format!("{}", plain), "plain:[REDACTED]");

		let env_ref = ConfigurableValue::from_env("OPENAI_API_KEY");
		assert_eq!(format!("{}", env_ref), "env:OPENAI_API_KEY");
	}
}
