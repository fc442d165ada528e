//! Turns command-line flags and environment into library configuration.

use std::time::Duration;

use franka_desk::{ConfigError, Credentials, DeskConfig, RecoveryPolicy};

use crate::cli::{RecoveryArgs, RobotArgs};

pub const USERNAME_VAR: &str = "FRANKA_DESK_USERNAME";
pub const PASSWORD_VAR: &str = "FRANKA_DESK_PASSWORD";

/// Reads Desk credentials from the process environment.
pub fn credentials_from_env() -> Result<Credentials, ConfigError> {
	credentials_from(|name| std::env::var(name).ok())
}

/// Reads credentials through `lookup`; unset and empty variables are both missing.
pub fn credentials_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Credentials, ConfigError> {
	let read = |variable: &'static str| {
		lookup(variable)
			.filter(|value| !value.is_empty())
			.ok_or(ConfigError::MissingCredentials { variable })
	};
	Ok(Credentials::new(read(USERNAME_VAR)?, read(PASSWORD_VAR)?))
}

pub fn desk_config(args: &RobotArgs, credentials: Credentials) -> Result<DeskConfig, ConfigError> {
	let mut config = DeskConfig::new(&args.robot, credentials)?.with_accept_invalid_certs(args.insecure);
	if let Some(owner) = &args.owner {
		config = config.with_owner(owner.clone());
	}
	if let Some(secs) = args.timeout_secs {
		config = config.with_request_timeout(Duration::from_secs(secs));
	}
	Ok(config)
}

pub fn recovery_policy(args: &RecoveryArgs) -> RecoveryPolicy {
	let mut policy = if args.no_reboot { RecoveryPolicy::disabled() } else { RecoveryPolicy::default() };
	if let Some(secs) = args.settle_secs {
		policy = policy.with_settle(Duration::from_secs(secs));
	}
	if let Some(secs) = args.poll_interval_secs {
		policy = policy.with_poll_interval(Duration::from_secs(secs));
	}
	if let Some(max_polls) = args.max_polls {
		policy = policy.with_max_polls(max_polls);
	}
	policy
}
