//! Error taxonomy for control-session operations.

use std::time::Duration;

use franka_desk_protocol::{Endpoint, OperatingMode};
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = DeskError> = std::result::Result<T, E>;

/// A request that produced no usable HTTP response.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
	#[error("{endpoint} timed out after {}ms", timeout.as_millis())]
	Timeout { endpoint: Endpoint, timeout: Duration },

	#[error("{endpoint} request failed: {message}")]
	Network { endpoint: Endpoint, message: String },

	#[error("{endpoint} returned an unreadable response: {message}")]
	Decode { endpoint: Endpoint, message: String },

	#[error("{endpoint} request body could not be encoded: {message}")]
	Encode { endpoint: Endpoint, message: String },
}

impl TransportError {
	pub fn endpoint(&self) -> Endpoint {
		match self {
			TransportError::Timeout { endpoint, .. }
			| TransportError::Network { endpoint, .. }
			| TransportError::Decode { endpoint, .. }
			| TransportError::Encode { endpoint, .. } => *endpoint,
		}
	}
}

/// Control could not be taken.
#[derive(Debug, Clone, Error)]
pub enum AcquisitionError {
	/// The robot refused to grant control (owned elsewhere, not ready, ...).
	#[error("robot refused control (HTTP {status}): {message}")]
	NotReady { status: u16, message: String },

	/// The bounded take-control request got no answer in time.
	#[error("robot did not answer the control request within {}ms", timeout.as_millis())]
	Timeout { timeout: Duration },

	#[error("credentials rejected by the robot (HTTP {status})")]
	Unauthorized { status: u16 },

	#[error("robot granted control but sent no token")]
	MissingToken,

	#[error("robot unreachable: {0}")]
	Unreachable(TransportError),
}

impl AcquisitionError {
	/// Whether a reboot of the control stack can plausibly fix this failure.
	pub fn is_recoverable(&self) -> bool {
		matches!(self, AcquisitionError::NotReady { .. } | AcquisitionError::Timeout { .. })
	}
}

/// Top-level error for session and bootstrap operations.
#[derive(Debug, Clone, Error)]
pub enum DeskError {
	#[error("cannot {endpoint} without control; take control first")]
	Precondition { endpoint: Endpoint },

	#[error("failed to take control: {0}")]
	Acquisition(#[from] AcquisitionError),

	#[error(transparent)]
	Transport(#[from] TransportError),

	#[error("{endpoint} rejected with HTTP {status}: {body}")]
	Status { endpoint: Endpoint, status: u16, body: String },

	#[error("robot did not reach {expected} after {attempts} polls (last seen: {})", last.as_ref().map_or("nothing".to_string(), |m| m.to_string()))]
	NotReady {
		expected: OperatingMode,
		attempts: u32,
		last: Option<OperatingMode>,
	},
}

impl DeskError {
	pub fn is_precondition(&self) -> bool {
		matches!(self, DeskError::Precondition { .. })
	}

	/// Remote HTTP status attached to this error, when one was received.
	pub fn status(&self) -> Option<u16> {
		match self {
			DeskError::Status { status, .. } => Some(*status),
			DeskError::Acquisition(AcquisitionError::NotReady { status, .. } | AcquisitionError::Unauthorized { status }) => Some(*status),
			_ => None,
		}
	}
}

/// Invalid client configuration.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
	#[error("invalid robot address {address:?}: {reason}")]
	InvalidAddress { address: String, reason: String },

	#[error("missing credentials: set the {variable} environment variable")]
	MissingCredentials { variable: &'static str },

	#[error("failed to create HTTP client: {0}")]
	HttpClient(String),
}
