use clap::Parser;
use franka_desk_cli::{cli::Cli, commands, logging};
use tracing::error;

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	if let Err(err) = commands::dispatch(cli.command, cli.format).await {
		error!(target = "franka_desk.cli", code = %err.code(), error = %err, "command failed");
		std::process::exit(1);
	}
}
