//! Client configuration: robot address, credentials, owner name and timeouts.

use std::fmt;
use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;

/// Owner name announced when taking control.
pub const DEFAULT_OWNER: &str = "franka_desk_client";
/// Bound on the take-control request.
pub const DEFAULT_TAKE_CONTROL_TIMEOUT: Duration = Duration::from_secs(5);
/// Bound on every other request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Desk login used for HTTP basic auth.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
	pub username: String,
	pub password: String,
}

impl Credentials {
	pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
		Self {
			username: username.into(),
			password: password.into(),
		}
	}
}

impl fmt::Debug for Credentials {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Credentials")
			.field("username", &self.username)
			.field("password", &"<redacted>")
			.finish()
	}
}

/// Immutable identity and timeout settings for a [`ControlSession`](crate::ControlSession).
#[derive(Debug, Clone)]
pub struct DeskConfig {
	/// Robot base URL; endpoint paths are appended to it.
	pub base_url: Url,
	pub credentials: Credentials,
	/// Owner name reported to the robot when taking control.
	pub owner: String,
	pub take_control_timeout: Duration,
	pub request_timeout: Duration,
	/// Accept the robot's self-signed TLS certificate.
	pub accept_invalid_certs: bool,
}

impl DeskConfig {
	/// Builds a config for `robot`, an IP/hostname or a full URL.
	pub fn new(robot: &str, credentials: Credentials) -> Result<Self, ConfigError> {
		Ok(Self {
			base_url: parse_robot_url(robot)?,
			credentials,
			owner: DEFAULT_OWNER.to_string(),
			take_control_timeout: DEFAULT_TAKE_CONTROL_TIMEOUT,
			request_timeout: DEFAULT_REQUEST_TIMEOUT,
			accept_invalid_certs: false,
		})
	}

	pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
		self.owner = owner.into();
		self
	}

	pub fn with_take_control_timeout(mut self, timeout: Duration) -> Self {
		self.take_control_timeout = timeout;
		self
	}

	pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = timeout;
		self
	}

	pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
		self.accept_invalid_certs = accept;
		self
	}

	/// Joins an endpoint path onto the base URL.
	pub fn url_for(&self, path: &str) -> String {
		format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
	}
}

/// Normalizes a robot address into a base URL, defaulting to `https`.
pub fn parse_robot_url(robot: &str) -> Result<Url, ConfigError> {
	let robot = robot.trim();
	let invalid = |reason: &str| ConfigError::InvalidAddress {
		address: robot.to_string(),
		reason: reason.to_string(),
	};

	if robot.is_empty() {
		return Err(invalid("address is empty"));
	}

	let candidate = if robot.contains("://") { robot.to_string() } else { format!("https://{robot}") };
	let url = Url::parse(&candidate).map_err(|e| invalid(&e.to_string()))?;

	if !matches!(url.scheme(), "http" | "https") {
		return Err(invalid("scheme must be http or https"));
	}
	if url.host_str().is_none_or(str::is_empty) {
		return Err(invalid("missing host"));
	}

	Ok(url)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bare_address_defaults_to_https() {
		let url = parse_robot_url("172.16.0.2").unwrap();
		assert_eq!(url.as_str(), "https://172.16.0.2/");
	}

	#[test]
	fn explicit_url_is_kept() {
		let url = parse_robot_url("http://127.0.0.1:8080").unwrap();
		assert_eq!(url.scheme(), "http");
		assert_eq!(url.port(), Some(8080));
	}

	#[test]
	fn rejects_empty_and_foreign_schemes() {
		assert!(parse_robot_url("  ").is_err());
		assert!(parse_robot_url("ftp://robot").is_err());
	}

	#[test]
	fn url_for_appends_endpoint_path() {
		let config = DeskConfig::new("robot.local", Credentials::new("admin", "secret")).unwrap();
		assert_eq!(config.url_for("/api/arm/joints"), "https://robot.local/api/arm/joints");
	}

	#[test]
	fn defaults_match_observed_contract() {
		let config = DeskConfig::new("robot.local", Credentials::new("admin", "secret")).unwrap();
		assert_eq!(config.owner, DEFAULT_OWNER);
		assert_eq!(config.take_control_timeout, Duration::from_secs(5));
		assert!(!config.accept_invalid_certs);
	}

	#[test]
	fn debug_redacts_password() {
		let rendered = format!("{:?}", Credentials::new("admin", "hunter2"));
		assert!(rendered.contains("admin"));
		assert!(!rendered.contains("hunter2"));
	}
}
