use tracing::info;

use crate::context::CommandContext;
use crate::error::Result;
use crate::output::RebootData;

pub async fn execute(ctx: &CommandContext) -> Result<RebootData> {
	info!(target = "franka_desk.cli", robot = ctx.robot(), "reboot");

	let mut session = ctx.session()?;
	session.reboot().await?;

	Ok(RebootData {
		message: "Reboot requested; the robot needs about a minute to come back".to_string(),
	})
}
