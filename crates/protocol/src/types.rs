//! Request/response bodies and remote enumerations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Body of `POST /api/system/control-token:take`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TakeControlRequest {
	pub owner: String,
}

/// Response of a successful take-control call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TakeControlResponse {
	#[serde(default)]
	pub token: Option<String>,
}

/// Body of `POST /api/system/operating-mode:change`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingModeChange {
	pub desired_operating_mode: OperatingMode,
}

/// Response of `GET /api/system/operating-mode`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingModeStatus {
	#[serde(default)]
	pub status: Option<OperatingMode>,
}

/// One element of the `GET /api/arm/joints` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JointState {
	#[serde(default)]
	pub brake_status: Option<JointBrakeStatus>,
}

/// Coarse lifecycle state of the robot's control stack.
///
/// Unrecognized values (e.g. `"Booting"`) are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OperatingMode {
	Execution,
	Programming,
	Other(String),
}

impl OperatingMode {
	pub fn as_str(&self) -> &str {
		match self {
			OperatingMode::Execution => "Execution",
			OperatingMode::Programming => "Programming",
			OperatingMode::Other(raw) => raw,
		}
	}

	/// Whether the robot is ready to hand out control and accept FCI.
	pub fn is_execution(&self) -> bool {
		matches!(self, OperatingMode::Execution)
	}
}

impl From<String> for OperatingMode {
	fn from(raw: String) -> Self {
		match raw.as_str() {
			"Execution" => OperatingMode::Execution,
			"Programming" => OperatingMode::Programming,
			_ => OperatingMode::Other(raw),
		}
	}
}

impl From<&str> for OperatingMode {
	fn from(raw: &str) -> Self {
		OperatingMode::from(raw.to_string())
	}
}

impl From<OperatingMode> for String {
	fn from(mode: OperatingMode) -> Self {
		match mode {
			OperatingMode::Other(raw) => raw,
			known => known.as_str().to_string(),
		}
	}
}

impl std::str::FromStr for OperatingMode {
	type Err = std::convert::Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(OperatingMode::from(s))
	}
}

impl fmt::Display for OperatingMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Brake state of a single joint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JointBrakeStatus {
	Locked,
	Unlocked,
	Other(String),
}

impl JointBrakeStatus {
	pub fn as_str(&self) -> &str {
		match self {
			JointBrakeStatus::Locked => "Locked",
			JointBrakeStatus::Unlocked => "Unlocked",
			JointBrakeStatus::Other(raw) => raw,
		}
	}
}

impl From<String> for JointBrakeStatus {
	fn from(raw: String) -> Self {
		if raw.eq_ignore_ascii_case("locked") {
			JointBrakeStatus::Locked
		} else if raw.eq_ignore_ascii_case("unlocked") {
			JointBrakeStatus::Unlocked
		} else {
			JointBrakeStatus::Other(raw)
		}
	}
}

impl From<JointBrakeStatus> for String {
	fn from(status: JointBrakeStatus) -> Self {
		match status {
			JointBrakeStatus::Other(raw) => raw,
			known => known.as_str().to_string(),
		}
	}
}

impl fmt::Display for JointBrakeStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
