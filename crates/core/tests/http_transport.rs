//! End-to-end tests of `HttpTransport` against an in-process Desk server.

mod desk_server;

use std::time::Duration;

use desk_server::{DeskServer, DeskState, PASSWORD, TOKEN, USERNAME};
use franka_desk::{
	AcquisitionError, BootstrapState, ControlSession, Credentials, DeskConfig, DeskError, HttpTransport, JointBrakeStatus, OperatingMode, RecoveryPolicy,
	SessionBootstrapper,
};
use serde_json::json;

fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().with_max_level(tracing::Level::DEBUG).try_init();
}

fn session_for(url: &str, password: &str) -> ControlSession<HttpTransport> {
	let config = DeskConfig::new(url, Credentials::new(USERNAME, password))
		.expect("valid config")
		.with_owner("integration-test")
		.with_take_control_timeout(Duration::from_millis(300))
		.with_request_timeout(Duration::from_secs(2));
	let transport = HttpTransport::new(&config).expect("http client");
	ControlSession::new(config, transport)
}

fn instant_recovery() -> RecoveryPolicy {
	RecoveryPolicy::default()
		.with_settle(Duration::ZERO)
		.with_poll_interval(Duration::from_millis(10))
		.with_max_polls(5)
}

#[tokio::test]
async fn take_control_sends_owner_with_basic_auth() -> anyhow::Result<()> {
	init_tracing();
	let server = DeskServer::start().await;
	let mut session = session_for(&server.url(), PASSWORD);

	session.take_control().await?;

	assert_eq!(session.token().map(|t| t.as_str()), Some(TOKEN));
	let seen = server.state.lock().seen.clone();
	assert_eq!(seen[0].method, "POST");
	assert_eq!(seen[0].path, "/api/system/control-token:take");
	assert_eq!(seen[0].body, Some(json!({ "owner": "integration-test" })));
	assert_eq!(server.state.lock().owner.as_deref(), Some("integration-test"));

	server.shutdown();
	Ok(())
}

#[tokio::test]
async fn enable_unlocks_and_activates_with_token_header() -> anyhow::Result<()> {
	init_tracing();
	let server = DeskServer::start().await;
	let mut session = session_for(&server.url(), PASSWORD);

	let report = SessionBootstrapper::new(&mut session, instant_recovery()).enable().await?;

	assert_eq!(report.state, BootstrapState::Enabled);
	assert!(!report.recovered);
	{
		let desk = server.state.lock();
		assert!(desk.brakes_open);
		assert!(desk.fci_active);
		assert_eq!(desk.reboots, 0);
		for request in desk.seen.iter().filter(|r| r.path.contains(':') && !r.path.contains("control-token")) {
			assert_eq!(request.control_token.as_deref(), Some(TOKEN), "{} lacked the token", request.path);
		}
	}

	let brakes = session.joint_states().await?;
	assert_eq!(brakes.len(), 7);
	assert!(brakes.iter().all(|b| *b == Some(JointBrakeStatus::Unlocked)));

	server.shutdown();
	Ok(())
}

#[tokio::test]
async fn rerunning_enable_tolerates_already_in_state() -> anyhow::Result<()> {
	let server = DeskServer::start().await;
	let mut session = session_for(&server.url(), PASSWORD);

	SessionBootstrapper::new(&mut session, instant_recovery()).enable().await?;
	let report = SessionBootstrapper::new(&mut session, instant_recovery()).enable().await?;

	assert_eq!(report.state, BootstrapState::Enabled);
	server.shutdown();
	Ok(())
}

#[tokio::test]
async fn refused_control_recovers_through_reboot() -> anyhow::Result<()> {
	init_tracing();
	let server = DeskServer::start_with(DeskState {
		refusals_left: 1,
		..DeskState::default()
	})
	.await;
	let mut session = session_for(&server.url(), PASSWORD);

	let report = SessionBootstrapper::new(&mut session, instant_recovery()).enable().await?;

	assert!(report.recovered);
	assert_eq!(server.state.lock().reboots, 1);
	assert_eq!(
		server.paths(),
		vec![
			"/api/system/control-token:take",
			"/api/system:reboot",
			"/api/system/operating-mode",
			"/api/system/control-token:take",
			"/api/arm/joints:unlock",
			"/api/fci:activate",
		]
	);

	server.shutdown();
	Ok(())
}

#[tokio::test]
async fn wrong_password_is_not_rebooted_away() {
	let server = DeskServer::start().await;
	let mut session = session_for(&server.url(), "wrong");

	let err = SessionBootstrapper::new(&mut session, instant_recovery()).enable().await.unwrap_err();

	assert!(matches!(err.source, DeskError::Acquisition(AcquisitionError::Unauthorized { status: 401 })));
	assert_eq!(server.state.lock().reboots, 0);
	server.shutdown();
}

#[tokio::test]
async fn slow_take_control_times_out() {
	let server = DeskServer::start_with(DeskState {
		take_control_delay: Some(Duration::from_secs(2)),
		..DeskState::default()
	})
	.await;
	let mut session = session_for(&server.url(), PASSWORD);

	let err = session.take_control().await.unwrap_err();

	assert!(matches!(err, DeskError::Acquisition(AcquisitionError::Timeout { .. })), "got {err:?}");
	assert!(!session.has_control());
	server.shutdown();
}

#[tokio::test]
async fn unreachable_robot_is_not_recoverable() {
	let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
	let addr = listener.local_addr().unwrap();
	drop(listener);

	let mut session = session_for(&format!("http://{addr}"), PASSWORD);
	let err = session.take_control().await.unwrap_err();

	match err {
		DeskError::Acquisition(cause @ AcquisitionError::Unreachable(_)) => assert!(!cause.is_recoverable()),
		other => panic!("expected unreachable, got {other:?}"),
	}
}

#[tokio::test]
async fn mode_change_and_readback() -> anyhow::Result<()> {
	let server = DeskServer::start().await;
	let mut session = session_for(&server.url(), PASSWORD);

	session.take_control().await?;
	session.set_operating_mode(OperatingMode::Programming).await?;

	assert_eq!(session.operating_mode().await?, OperatingMode::Programming);
	server.shutdown();
	Ok(())
}

#[tokio::test]
async fn stale_token_after_reboot_is_not_sent() -> anyhow::Result<()> {
	let server = DeskServer::start().await;
	let mut session = session_for(&server.url(), PASSWORD);

	session.take_control().await?;
	session.reboot().await?;

	assert!(session.lock_joints().await.unwrap_err().is_precondition());
	assert_eq!(server.paths().last().map(String::as_str), Some("/api/system:reboot"));
	server.shutdown();
	Ok(())
}
