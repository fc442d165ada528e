//! Sequencing of session operations into the enable/disable workflows.
//!
//! Enabling walks `Start → Controlling → Controlled → JointsUnlocking → Ready →
//! Enabled`. When the robot refuses control in a way a restart can fix, the
//! bootstrapper reboots it, waits `settle`, polls the operating mode until it
//! reads `Execution` and retries take-control exactly once.

use std::fmt;
use std::time::Duration;

use franka_desk_protocol::OperatingMode;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error::DeskError;
use crate::session::{ControlSession, ControlToken};
use crate::transport::Transport;

/// Reboot-and-retry settings used when control cannot be taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryPolicy {
	pub enabled: bool,
	/// Wait after the reboot request before the first poll.
	pub settle: Duration,
	pub poll_interval: Duration,
	/// Upper bound on operating-mode polls.
	pub max_polls: u32,
}

impl Default for RecoveryPolicy {
	fn default() -> Self {
		Self {
			enabled: true,
			settle: Duration::from_secs(60),
			poll_interval: Duration::from_secs(2),
			max_polls: 150,
		}
	}
}

impl RecoveryPolicy {
	/// Policy that propagates every acquisition failure.
	pub fn disabled() -> Self {
		Self {
			enabled: false,
			..Self::default()
		}
	}

	pub fn with_settle(mut self, settle: Duration) -> Self {
		self.settle = settle;
		self
	}

	pub fn with_poll_interval(mut self, interval: Duration) -> Self {
		self.poll_interval = interval;
		self
	}

	pub fn with_max_polls(mut self, max_polls: u32) -> Self {
		self.max_polls = max_polls;
		self
	}
}

/// Position of a bootstrap run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BootstrapState {
	Start,
	Controlling,
	Rebooting,
	Polling,
	Controlled,
	JointsUnlocking,
	/// Joints are open; FCI activation pending.
	Ready,
	Enabled,
	FciDeactivating,
	JointsLocking,
	Disabled,
}

impl BootstrapState {
	/// Stable snake_case name, identical to the serialized form.
	pub fn as_str(self) -> &'static str {
		match self {
			BootstrapState::Start => "start",
			BootstrapState::Controlling => "controlling",
			BootstrapState::Rebooting => "rebooting",
			BootstrapState::Polling => "polling",
			BootstrapState::Controlled => "controlled",
			BootstrapState::JointsUnlocking => "joints_unlocking",
			BootstrapState::Ready => "ready",
			BootstrapState::Enabled => "enabled",
			BootstrapState::FciDeactivating => "fci_deactivating",
			BootstrapState::JointsLocking => "joints_locking",
			BootstrapState::Disabled => "disabled",
		}
	}

	/// What the bootstrapper is doing while in this state.
	pub fn activity(self) -> &'static str {
		match self {
			BootstrapState::Start => "starting",
			BootstrapState::Controlling => "taking control",
			BootstrapState::Rebooting => "rebooting",
			BootstrapState::Polling => "waiting for Execution mode",
			BootstrapState::Controlled => "holding control",
			BootstrapState::JointsUnlocking => "unlocking joints",
			BootstrapState::Ready => "activating FCI",
			BootstrapState::Enabled => "enabled",
			BootstrapState::FciDeactivating => "deactivating FCI",
			BootstrapState::JointsLocking => "locking joints",
			BootstrapState::Disabled => "disabled",
		}
	}
}

impl fmt::Display for BootstrapState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.activity())
	}
}

/// A failed workflow step together with the underlying error.
#[derive(Debug, Clone, Error)]
#[error("{} failed: {source}", stage.activity())]
pub struct BootstrapError {
	pub stage: BootstrapState,
	pub source: DeskError,
}

/// Outcome of a completed workflow.
#[derive(Debug, Clone)]
pub struct BootstrapReport {
	pub state: BootstrapState,
	/// Every state entered, starting with [`BootstrapState::Start`].
	pub transitions: Vec<BootstrapState>,
	/// Whether the reboot branch ran.
	pub recovered: bool,
	pub polls: u32,
	pub token: Option<ControlToken>,
}

/// Drives a [`ControlSession`] through the enable or disable sequence.
pub struct SessionBootstrapper<'a, T> {
	session: &'a mut ControlSession<T>,
	policy: RecoveryPolicy,
	state: BootstrapState,
	transitions: Vec<BootstrapState>,
	recovered: bool,
	polls: u32,
}

impl<'a, T: Transport> SessionBootstrapper<'a, T> {
	pub fn new(session: &'a mut ControlSession<T>, policy: RecoveryPolicy) -> Self {
		Self {
			session,
			policy,
			state: BootstrapState::Start,
			transitions: vec![BootstrapState::Start],
			recovered: false,
			polls: 0,
		}
	}

	/// Takes control, unlocks the joints and activates FCI.
	pub async fn enable(mut self) -> Result<BootstrapReport, BootstrapError> {
		self.acquire().await?;

		self.advance(BootstrapState::JointsUnlocking);
		self.session.unlock_joints().await.map_err(|e| self.fail(e))?;

		self.advance(BootstrapState::Ready);
		self.session.activate_fci().await.map_err(|e| self.fail(e))?;

		self.advance(BootstrapState::Enabled);
		Ok(self.report())
	}

	/// Takes control, deactivates FCI and locks the joints.
	///
	/// No reboot is attempted: a robot that refuses control is left alone.
	pub async fn disable(mut self) -> Result<BootstrapReport, BootstrapError> {
		self.advance(BootstrapState::Controlling);
		self.session.take_control().await.map_err(|e| self.fail(e))?;
		self.advance(BootstrapState::Controlled);

		self.advance(BootstrapState::FciDeactivating);
		self.session.deactivate_fci().await.map_err(|e| self.fail(e))?;

		self.advance(BootstrapState::JointsLocking);
		self.session.lock_joints().await.map_err(|e| self.fail(e))?;

		self.advance(BootstrapState::Disabled);
		Ok(self.report())
	}

	async fn acquire(&mut self) -> Result<(), BootstrapError> {
		self.advance(BootstrapState::Controlling);
		let err = match self.session.take_control().await {
			Ok(()) => {
				self.advance(BootstrapState::Controlled);
				return Ok(());
			}
			Err(err) => err,
		};

		let recoverable = matches!(&err, DeskError::Acquisition(cause) if cause.is_recoverable());
		if !(self.policy.enabled && recoverable) {
			return Err(self.fail(err));
		}

		warn!(
			target = "franka_desk.bootstrap",
			error = %err,
			settle_secs = self.policy.settle.as_secs(),
			"failed to take control; rebooting robot and retrying"
		);
		self.recover().await?;

		self.advance(BootstrapState::Controlling);
		self.session.take_control().await.map_err(|e| self.fail(e))?;
		self.advance(BootstrapState::Controlled);
		Ok(())
	}

	async fn recover(&mut self) -> Result<(), BootstrapError> {
		self.recovered = true;
		self.advance(BootstrapState::Rebooting);
		self.session.reboot().await.map_err(|e| self.fail(e))?;
		tokio::time::sleep(self.policy.settle).await;

		self.advance(BootstrapState::Polling);
		self.wait_for_execution().await
	}

	async fn wait_for_execution(&mut self) -> Result<(), BootstrapError> {
		let max_polls = self.policy.max_polls.max(1);
		let mut last = None;

		loop {
			self.polls += 1;
			match self.session.operating_mode().await {
				Ok(mode) if mode.is_execution() => {
					info!(target = "franka_desk.bootstrap", polls = self.polls, "robot reached Execution mode");
					return Ok(());
				}
				Ok(mode) => {
					debug!(target = "franka_desk.bootstrap", %mode, attempt = self.polls, "robot not ready");
					last = Some(mode);
				}
				// The API is down while the control stack restarts.
				Err(err) => debug!(target = "franka_desk.bootstrap", error = %err, attempt = self.polls, "operating mode unavailable"),
			}

			if self.polls >= max_polls {
				return Err(self.fail(DeskError::NotReady {
					expected: OperatingMode::Execution,
					attempts: self.polls,
					last,
				}));
			}
			tokio::time::sleep(self.policy.poll_interval).await;
		}
	}

	fn advance(&mut self, next: BootstrapState) {
		debug!(target = "franka_desk.bootstrap", from = %self.state, to = %next, "transition");
		self.state = next;
		self.transitions.push(next);
	}

	fn fail(&self, source: DeskError) -> BootstrapError {
		warn!(target = "franka_desk.bootstrap", stage = %self.state, error = %source, "workflow step failed");
		BootstrapError { stage: self.state, source }
	}

	fn report(self) -> BootstrapReport {
		BootstrapReport {
			state: self.state,
			transitions: self.transitions,
			recovered: self.recovered,
			polls: self.polls,
			token: self.session.token().cloned(),
		}
	}
}
