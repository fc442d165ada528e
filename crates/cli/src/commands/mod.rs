mod disable;
mod enable;
mod mode;
mod reboot;
mod status;

use tracing::debug;

use crate::cli::Commands;
use crate::context::CommandContext;
use crate::error::Result;
use crate::output::{CommandInputs, CommandOutput, DiagnosticLevel, OutputFormat, ResultBuilder, print_result};

/// Runs `command`, prints its result envelope and returns the failure, if any.
pub async fn dispatch(command: Commands, format: OutputFormat) -> Result<()> {
	let name = command.name();
	let mut builder = ResultBuilder::new(name).inputs(inputs_for(&command));

	let outcome = match CommandContext::from_env(command.robot()) {
		Ok(ctx) => run(command, &ctx).await,
		Err(err) => Err(err),
	};

	let failure = match outcome {
		Ok(data) => {
			if let CommandOutput::Enable(enabled) = &data {
				if enabled.recovered {
					builder = builder.diagnostic(DiagnosticLevel::Warning, "robot was rebooted to obtain control");
				}
			}
			builder = builder.data(data);
			None
		}
		Err(err) => {
			builder = builder.error_with_details(err.code(), err.to_string(), err.details());
			Some(err)
		}
	};

	print_result(&builder.build(), format);
	debug!(target = "franka_desk.cli", command = name, ok = failure.is_none(), "command finished");

	match failure {
		Some(err) => Err(err),
		None => Ok(()),
	}
}

async fn run(command: Commands, ctx: &CommandContext) -> Result<CommandOutput> {
	Ok(match command {
		Commands::Enable { recovery, .. } => CommandOutput::Enable(enable::execute(ctx, &recovery).await?),
		Commands::Disable { .. } => CommandOutput::Disable(disable::execute(ctx).await?),
		Commands::Status { .. } => CommandOutput::Status(status::execute(ctx).await?),
		Commands::Reboot { .. } => CommandOutput::Reboot(reboot::execute(ctx).await?),
		Commands::Mode { mode, .. } => CommandOutput::Mode(mode::execute(ctx, &mode).await?),
	})
}

fn inputs_for(command: &Commands) -> CommandInputs {
	let robot = command.robot();
	CommandInputs {
		robot: Some(robot.robot.clone()),
		owner: robot.owner.clone(),
		mode: match command {
			Commands::Mode { mode, .. } => Some(mode.clone()),
			_ => None,
		},
	}
}
