//! Endpoint table for the Desk API.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix shared by every Desk API path.
pub const API_PREFIX: &str = "/api";

/// Header carrying the control token on control-gated requests.
pub const CONTROL_TOKEN_HEADER: &str = "X-Control-Token";

/// Status the firmware returns when unlocking open brakes or activating an
/// already active FCI.
pub const ALREADY_IN_STATE_STATUS: u16 = 500;

/// HTTP method used by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
	Get,
	Post,
}

impl fmt::Display for Method {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Method::Get => write!(f, "GET"),
			Method::Post => write!(f, "POST"),
		}
	}
}

/// Remote operations exposed by the Desk API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
	TakeControl,
	UnlockJoints,
	LockJoints,
	ChangeOperatingMode,
	Reboot,
	ActivateFci,
	DeactivateFci,
	JointStates,
	OperatingMode,
}

impl Endpoint {
	/// Every endpoint, in table order.
	pub const ALL: [Endpoint; 9] = [
		Endpoint::TakeControl,
		Endpoint::UnlockJoints,
		Endpoint::LockJoints,
		Endpoint::ChangeOperatingMode,
		Endpoint::Reboot,
		Endpoint::ActivateFci,
		Endpoint::DeactivateFci,
		Endpoint::JointStates,
		Endpoint::OperatingMode,
	];

	pub fn method(self) -> Method {
		match self {
			Endpoint::JointStates | Endpoint::OperatingMode => Method::Get,
			_ => Method::Post,
		}
	}

	/// Absolute path, including [`API_PREFIX`].
	pub fn path(self) -> &'static str {
		match self {
			Endpoint::TakeControl => "/api/system/control-token:take",
			Endpoint::UnlockJoints => "/api/arm/joints:unlock",
			Endpoint::LockJoints => "/api/arm/joints:lock",
			Endpoint::ChangeOperatingMode => "/api/system/operating-mode:change",
			Endpoint::Reboot => "/api/system:reboot",
			Endpoint::ActivateFci => "/api/fci:activate",
			Endpoint::DeactivateFci => "/api/fci:deactivate",
			Endpoint::JointStates => "/api/arm/joints",
			Endpoint::OperatingMode => "/api/system/operating-mode",
		}
	}

	/// Whether the request must carry [`CONTROL_TOKEN_HEADER`].
	pub fn requires_token(self) -> bool {
		matches!(
			self,
			Endpoint::UnlockJoints | Endpoint::LockJoints | Endpoint::ChangeOperatingMode | Endpoint::ActivateFci | Endpoint::DeactivateFci
		)
	}

	/// Non-200 status treated as an idempotent success, if any.
	pub fn tolerated_status(self) -> Option<u16> {
		match self {
			Endpoint::UnlockJoints | Endpoint::ActivateFci => Some(ALREADY_IN_STATE_STATUS),
			_ => None,
		}
	}

	/// Human-readable operation name used in logs and error messages.
	pub fn name(self) -> &'static str {
		match self {
			Endpoint::TakeControl => "take control",
			Endpoint::UnlockJoints => "unlock joints",
			Endpoint::LockJoints => "lock joints",
			Endpoint::ChangeOperatingMode => "change operating mode",
			Endpoint::Reboot => "reboot",
			Endpoint::ActivateFci => "activate FCI",
			Endpoint::DeactivateFci => "deactivate FCI",
			Endpoint::JointStates => "get joint states",
			Endpoint::OperatingMode => "get operating mode",
		}
	}
}

impl fmt::Display for Endpoint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}
