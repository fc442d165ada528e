use serde_json::json;

use super::*;

#[test]
fn successful_result_serializes_camel_case_envelope() {
	let result = ResultBuilder::new("reboot")
		.inputs(CommandInputs {
			robot: Some("172.16.0.2".into()),
			..Default::default()
		})
		.data(RebootData {
			message: "Reboot requested".into(),
		})
		.build();

	let value = serde_json::to_value(&result).unwrap();
	assert_eq!(value["ok"], true);
	assert_eq!(value["command"], "reboot");
	assert_eq!(value["schemaVersion"], SCHEMA_VERSION);
	assert_eq!(value["inputs"], json!({ "robot": "172.16.0.2" }));
	assert_eq!(value["data"]["message"], "Reboot requested");
	assert!(value["durationMs"].is_u64());
	assert!(value.get("error").is_none());
	assert!(value.get("diagnostics").is_none());
}

#[test]
fn error_result_is_not_ok_and_carries_code() {
	let result: CommandResult<RebootData> = ResultBuilder::new("enable")
		.error_with_details(ErrorCode::ControlRefused, "robot refused control", Some(json!({ "stage": "controlling" })))
		.build();

	assert!(!result.ok);
	let value = serde_json::to_value(&result).unwrap();
	assert_eq!(value["error"]["code"], "CONTROL_REFUSED");
	assert_eq!(value["error"]["details"]["stage"], "controlling");
	assert!(value.get("data").is_none());
}

#[test]
fn builder_without_data_is_not_ok() {
	let result: CommandResult<ModeData> = ResultBuilder::new("mode").build();
	assert!(!result.ok);
}

#[test]
fn error_code_display_matches_serde() {
	for code in [ErrorCode::PreconditionFailed, ErrorCode::RobotNotReady, ErrorCode::AuthError, ErrorCode::InvalidInput] {
		let serialized = serde_json::to_value(code).unwrap();
		assert_eq!(serialized, json!(code.to_string()));
	}
}

#[test]
fn enable_data_omits_zero_polls_and_missing_token() {
	let value = serde_json::to_value(EnableData {
		message: "Robot enabled".into(),
		state: "enabled".into(),
		transitions: vec!["start".into(), "enabled".into()],
		recovered: false,
		polls: 0,
		control_token: None,
	})
	.unwrap();

	assert!(value.get("polls").is_none());
	assert!(value.get("controlToken").is_none());
	assert_eq!(value["recovered"], false);
}

#[test]
fn diagnostics_are_serialized_with_level() {
	let result = ResultBuilder::new("enable")
		.data(RebootData { message: "ok".into() })
		.diagnostic(DiagnosticLevel::Warning, "robot was rebooted to obtain control")
		.build();

	let value = serde_json::to_value(&result).unwrap();
	assert_eq!(value["diagnostics"][0]["level"], "warning");
}
