use franka_desk::{RecoveryPolicy, SessionBootstrapper};
use tracing::info;

use crate::context::CommandContext;
use crate::error::Result;
use crate::output::DisableData;

pub async fn execute(ctx: &CommandContext) -> Result<DisableData> {
	info!(target = "franka_desk.cli", robot = ctx.robot(), "disable");

	let mut session = ctx.session()?;
	let report = SessionBootstrapper::new(&mut session, RecoveryPolicy::disabled()).disable().await?;

	Ok(DisableData {
		message: "FCI deactivated; joints locked".to_string(),
		state: report.state.as_str().to_string(),
		transitions: report.transitions.iter().map(|s| s.as_str().to_string()).collect(),
	})
}
