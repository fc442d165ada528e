use franka_desk::JointBrakeStatus;
use tracing::info;

use crate::context::CommandContext;
use crate::error::Result;
use crate::output::StatusData;

pub async fn execute(ctx: &CommandContext) -> Result<StatusData> {
	info!(target = "franka_desk.cli", robot = ctx.robot(), "status");

	let session = ctx.session()?;
	let mode = session.operating_mode().await?;
	let joints = session.joint_states().await?;

	let all_unlocked = !joints.is_empty() && joints.iter().all(|j| *j == Some(JointBrakeStatus::Unlocked));
	let brakes = joints
		.iter()
		.map(|j| j.as_ref().map_or_else(|| "unknown".to_string(), |status| status.as_str().to_string()))
		.collect();

	Ok(StatusData {
		message: format!("Operating mode {mode}"),
		operating_mode: mode.as_str().to_string(),
		brakes,
		all_unlocked,
	})
}
