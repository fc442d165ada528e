use franka_desk::OperatingMode;
use tracing::info;

use crate::context::CommandContext;
use crate::error::{CliError, Result};
use crate::output::ModeData;

pub async fn execute(ctx: &CommandContext, mode: &str) -> Result<ModeData> {
	let desired = parse_mode(mode)?;
	info!(target = "franka_desk.cli", robot = ctx.robot(), mode = %desired, "mode");

	let mut session = ctx.session()?;
	session.take_control().await?;
	session.set_operating_mode(desired.clone()).await?;

	Ok(ModeData {
		message: format!("Operating mode set to {desired}"),
		operating_mode: desired.as_str().to_string(),
	})
}

/// Accepts the two modes the Desk API can switch to, in any case.
fn parse_mode(mode: &str) -> Result<OperatingMode> {
	match mode.trim().to_ascii_lowercase().as_str() {
		"execution" => Ok(OperatingMode::Execution),
		"programming" => Ok(OperatingMode::Programming),
		_ => Err(CliError::InvalidInput(format!("unknown operating mode {mode:?}; expected Execution or Programming"))),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn mode_names_are_case_insensitive() {
		assert_eq!(parse_mode("execution").unwrap(), OperatingMode::Execution);
		assert_eq!(parse_mode(" Programming ").unwrap(), OperatingMode::Programming);
	}

	#[test]
	fn unknown_mode_is_invalid_input() {
		assert!(matches!(parse_mode("Booting"), Err(CliError::InvalidInput(_))));
	}
}
