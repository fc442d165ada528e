use franka_desk::{ControlSession, DeskConfig, HttpTransport};

use crate::cli::RobotArgs;
use crate::config;
use crate::error::Result;

/// Resolved connection settings for one command invocation.
#[derive(Debug, Clone)]
pub struct CommandContext {
	config: DeskConfig,
}

impl CommandContext {
	pub fn new(config: DeskConfig) -> Self {
		Self { config }
	}

	/// Loads credentials from the environment and applies the robot flags.
	///
	/// Fails before any request is made when a credential variable is missing.
	pub fn from_env(robot: &RobotArgs) -> Result<Self> {
		let credentials = config::credentials_from_env()?;
		Ok(Self::new(config::desk_config(robot, credentials)?))
	}

	/// Robot base URL for log fields.
	pub fn robot(&self) -> &str {
		self.config.base_url.as_str()
	}

	/// Opens a fresh session without control.
	pub fn session(&self) -> Result<ControlSession<HttpTransport>> {
		let transport = HttpTransport::new(&self.config)?;
		Ok(ControlSession::new(self.config.clone(), transport))
	}
}
