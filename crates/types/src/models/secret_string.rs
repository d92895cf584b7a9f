//! Secure string handling for sensitive data like vendor API keys
//!
//! Provides a `SecretString` type that zeroizes its contents when dropped
//! and redacts itself in Debug/Display/serialized output.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A string holding a credential that must never leak into logs
///
/// The underlying data is cleared from memory when the value is dropped.
/// Access the raw value only at the point where it is actually sent to a
/// vendor, via [`SecretString::expose_secret`].
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString {
	inner: String,
}

impl SecretString {
	pub fn new(secret: String) -> Self {
		Self { inner: secret }
	}

	pub fn from_str(secret: &str) -> Self {
		Self::new(secret.to_string())
	}

	/// Expose the secret value
	///
	/// Use sparingly, ideally only when building the outbound request.
	pub fn expose_secret(&self) -> &str {
		&self.inner
	}

	pub fn len(&self) -> usize {
		self.inner.len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SecretString")
			.field("inner", &"[REDACTED]")
			.finish()
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[REDACTED]")
	}
}

impl From<String> for SecretString {
	fn from(secret: String) -> Self {
		Self::new(secret)
	}
}

impl From<&str> for SecretString {
	fn from(secret: &str) -> Self {
		Self::from_str(secret)
	}
}

// Serialization always redacts so a Provider dumped into a log or an API
// response can never carry its key with it.
impl Serialize for SecretString {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str("[REDACTED]")
	}
}

impl<'de> Deserialize<'de> for SecretString {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let secret = String::deserialize(deserializer)?;
		Ok(SecretString::new(secret))
	}
}

impl PartialEq for SecretString {
	fn eq(&self, other: &Self) -> bool {
		constant_time_eq(self.inner.as_bytes(), other.inner.as_bytes())
	}
}

impl Eq for SecretString {}

/// Constant-time comparison to prevent timing attacks
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
	if a.len() != b.len() {
		return false;
	}

	let mut result = 0u8;
	for (x, y) in a.iter().zip(b.iter()) {
		result |= x ^ y;
	}
	result == 0
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_secret_string_creation() {
		let secret = SecretString::new("sk-test-key".to_string());
		assert_eq!(secret.expose_secret(), "sk-test-key");
		assert_eq!(secret.len(), 11);
		assert!(!secret.is_empty());
	}

	#[test]
	fn test_secret_string_redaction() {
		let secret = SecretString::from_str("sk-very-secret");
		let debug_str = format!("{:?}", secret);
		assert!(debug_str.contains("[REDACTED]"));
		assert!(!debug_str.contains("sk-very-secret"));
		assert_eq!(format!("{}", secret), "[REDACTED]");
	}

	#[test]
	fn test_secret_string_serialization_redacts() {
		let secret = SecretString::from_str("sk-api-key");
		let serialized = serde_json::to_string(&secret).unwrap();
		assert_eq!(serialized, "\"[REDACTED]\"");
	}

	#[test]
	fn test_secret_string_deserialization() {
		let secret: SecretString = serde_json::from_str("\"sk-from-config\"").unwrap();
		assert_eq!(secret.expose_secret(), "sk-from-config");
	}

	#[test]
	fn test_secret_string_equality() {
		let a = SecretString::from_str("same");
		let b = SecretString::from_str("same");
		let c = SecretString::from_str("different");

		assert_eq!(a, b);
		assert_ne!(a, c);
	}
}
