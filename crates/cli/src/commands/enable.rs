use franka_desk::SessionBootstrapper;
use tracing::info;

use crate::cli::RecoveryArgs;
use crate::config;
use crate::context::CommandContext;
use crate::error::Result;
use crate::output::EnableData;

pub async fn execute(ctx: &CommandContext, recovery: &RecoveryArgs) -> Result<EnableData> {
	let policy = config::recovery_policy(recovery);
	info!(target = "franka_desk.cli", robot = ctx.robot(), reboot = policy.enabled, "enable");

	let mut session = ctx.session()?;
	let report = SessionBootstrapper::new(&mut session, policy).enable().await?;

	let message = if report.recovered {
		"Robot enabled after reboot; FCI active"
	} else {
		"Robot enabled; FCI active"
	};

	Ok(EnableData {
		message: message.to_string(),
		state: report.state.as_str().to_string(),
		transitions: report.transitions.iter().map(|s| s.as_str().to_string()).collect(),
		recovered: report.recovered,
		polls: report.polls,
		control_token: report.token.map(|t| t.as_str().to_string()),
	})
}
