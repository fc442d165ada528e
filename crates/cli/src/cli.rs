use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "franka-desk")]
#[command(about = "Take control of a Franka robot through its Desk API and prepare it for FCI")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug, -vvv trace)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Output format for command results
	#[arg(short = 'f', long, global = true, value_enum, default_value_t = OutputFormat::Text)]
	pub format: OutputFormat,

	#[command(subcommand)]
	pub command: Commands,
}

/// Connection settings shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct RobotArgs {
	/// Robot address (hostname, IP or full URL)
	#[arg(value_name = "ROBOT")]
	pub robot: String,

	/// Owner name announced when taking control
	#[arg(long, value_name = "NAME")]
	pub owner: Option<String>,

	/// Accept the robot's self-signed TLS certificate
	#[arg(long)]
	pub insecure: bool,

	/// Timeout for every request other than take-control (seconds)
	#[arg(long, value_name = "SECS")]
	pub timeout_secs: Option<u64>,
}

/// Reboot-and-retry tuning for `enable`.
#[derive(Args, Debug, Clone, Default)]
pub struct RecoveryArgs {
	/// Fail instead of rebooting when control is refused
	#[arg(long)]
	pub no_reboot: bool,

	/// Wait after the reboot request before polling (seconds)
	#[arg(long, value_name = "SECS")]
	pub settle_secs: Option<u64>,

	/// Delay between operating-mode polls (seconds)
	#[arg(long, value_name = "SECS")]
	pub poll_interval_secs: Option<u64>,

	/// Maximum number of operating-mode polls
	#[arg(long, value_name = "N")]
	pub max_polls: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Take control, unlock the joints and activate FCI
	Enable {
		#[command(flatten)]
		robot: RobotArgs,
		#[command(flatten)]
		recovery: RecoveryArgs,
	},

	/// Take control, deactivate FCI and lock the joints
	Disable {
		#[command(flatten)]
		robot: RobotArgs,
	},

	/// Show operating mode and joint brake status
	#[command(alias = "st")]
	Status {
		#[command(flatten)]
		robot: RobotArgs,
	},

	/// Reboot the robot's control stack
	Reboot {
		#[command(flatten)]
		robot: RobotArgs,
	},

	/// Take control and change the operating mode
	Mode {
		#[command(flatten)]
		robot: RobotArgs,
		/// Desired mode, e.g. Execution or Programming
		#[arg(value_name = "MODE")]
		mode: String,
	},
}

impl Commands {
	pub fn name(&self) -> &'static str {
		match self {
			Commands::Enable { .. } => "enable",
			Commands::Disable { .. } => "disable",
			Commands::Status { .. } => "status",
			Commands::Reboot { .. } => "reboot",
			Commands::Mode { .. } => "mode",
		}
	}

	pub fn robot(&self) -> &RobotArgs {
		match self {
			Commands::Enable { robot, .. }
			| Commands::Disable { robot }
			| Commands::Status { robot }
			| Commands::Reboot { robot }
			| Commands::Mode { robot, .. } => robot,
		}
	}
}
