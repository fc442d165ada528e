use franka_desk::{AcquisitionError, BootstrapError, ConfigError, DeskError, TransportError};
use serde_json::{Value, json};
use thiserror::Error;

use crate::output::ErrorCode;

#[derive(Debug, Error)]
pub enum CliError {
	#[error(transparent)]
	Config(#[from] ConfigError),

	#[error(transparent)]
	Desk(#[from] DeskError),

	#[error(transparent)]
	Bootstrap(#[from] BootstrapError),

	#[error("invalid input: {0}")]
	InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, CliError>;

impl CliError {
	/// Stable code reported in the output envelope.
	pub fn code(&self) -> ErrorCode {
		match self {
			CliError::Config(ConfigError::HttpClient(_)) => ErrorCode::InternalError,
			CliError::Config(_) | CliError::InvalidInput(_) => ErrorCode::InvalidInput,
			CliError::Desk(err) => desk_code(err),
			CliError::Bootstrap(err) => desk_code(&err.source),
		}
	}

	/// Machine-readable context: failing stage, endpoint and remote status, when known.
	pub fn details(&self) -> Option<Value> {
		let (stage, source) = match self {
			CliError::Bootstrap(err) => (Some(err.stage), &err.source),
			CliError::Desk(err) => (None, err),
			_ => return None,
		};

		let mut details = serde_json::Map::new();
		if let Some(stage) = stage {
			details.insert("stage".into(), json!(stage));
		}
		let endpoint = match source {
			DeskError::Precondition { endpoint } | DeskError::Status { endpoint, .. } => Some(*endpoint),
			DeskError::Transport(err) | DeskError::Acquisition(AcquisitionError::Unreachable(err)) => Some(err.endpoint()),
			_ => None,
		};
		if let Some(endpoint) = endpoint {
			details.insert("endpoint".into(), json!(endpoint.name()));
		}
		if let Some(status) = source.status() {
			details.insert("status".into(), json!(status));
		}
		if let DeskError::NotReady { attempts, last, .. } = source {
			details.insert("attempts".into(), json!(attempts));
			if let Some(last) = last {
				details.insert("lastMode".into(), json!(last.as_str()));
			}
		}
		(!details.is_empty()).then_some(Value::Object(details))
	}
}

fn desk_code(err: &DeskError) -> ErrorCode {
	match err {
		DeskError::Precondition { .. } => ErrorCode::PreconditionFailed,
		DeskError::Acquisition(cause) => match cause {
			AcquisitionError::NotReady { .. } => ErrorCode::ControlRefused,
			AcquisitionError::Timeout { .. } => ErrorCode::Timeout,
			AcquisitionError::Unauthorized { .. } => ErrorCode::AuthError,
			AcquisitionError::MissingToken => ErrorCode::ProtocolError,
			AcquisitionError::Unreachable(inner) => transport_code(inner),
		},
		DeskError::Transport(inner) => transport_code(inner),
		DeskError::Status { status: 401 | 403, .. } => ErrorCode::AuthError,
		DeskError::Status { .. } => ErrorCode::UnexpectedStatus,
		DeskError::NotReady { .. } => ErrorCode::RobotNotReady,
	}
}

fn transport_code(err: &TransportError) -> ErrorCode {
	match err {
		TransportError::Timeout { .. } => ErrorCode::Timeout,
		TransportError::Network { .. } => ErrorCode::Unreachable,
		TransportError::Decode { .. } | TransportError::Encode { .. } => ErrorCode::ProtocolError,
	}
}
