use serde::{Deserialize, Serialize};

/// Result data for enable command.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnableData {
	pub message: String,
	pub state: String,
	pub transitions: Vec<String>,
	pub recovered: bool,
	#[serde(default, skip_serializing_if = "is_zero")]
	pub polls: u32,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub control_token: Option<String>,
}

/// Result data for disable command.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisableData {
	pub message: String,
	pub state: String,
	pub transitions: Vec<String>,
}

/// Result data for status command.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusData {
	pub message: String,
	pub operating_mode: String,
	/// One entry per joint; `unknown` when the robot omitted it.
	pub brakes: Vec<String>,
	pub all_unlocked: bool,
}

/// Result data for reboot command.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebootData {
	pub message: String,
}

/// Result data for mode command.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeData {
	pub message: String,
	pub operating_mode: String,
}

/// Payload of whichever command ran.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandOutput {
	Enable(EnableData),
	Disable(DisableData),
	Status(StatusData),
	Reboot(RebootData),
	Mode(ModeData),
}

fn is_zero(value: &u32) -> bool {
	*value == 0
}
