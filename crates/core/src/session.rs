//! Control-token lifecycle and the capability operations gated on it.
//!
//! A [`ControlSession`] starts unowned. [`ControlSession::take_control`] stores
//! the token the robot hands out; every mutating call afterwards carries it in
//! the `X-Control-Token` header. Calls that need the token fail with
//! [`DeskError::Precondition`] before anything is sent when none is held.

use std::fmt;

use franka_desk_protocol::{
	Endpoint, JointBrakeStatus, JointState, OperatingMode, OperatingModeChange, OperatingModeStatus, TakeControlRequest, TakeControlResponse,
};
use tracing::{debug, info, warn};

use crate::config::DeskConfig;
use crate::error::{AcquisitionError, DeskError, Result, TransportError};
use crate::transport::{DeskRequest, DeskResponse, Transport};

/// Exclusive credential proving this client owns robot control.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ControlToken(String);

impl ControlToken {
	pub fn new(token: impl Into<String>) -> Self {
		Self(token.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for ControlToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "ControlToken({})", self.0)
	}
}

impl fmt::Display for ControlToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// A client's ownership of one robot.
pub struct ControlSession<T> {
	config: DeskConfig,
	transport: T,
	token: Option<ControlToken>,
}

impl<T: Transport> ControlSession<T> {
	/// Creates an unowned session.
	pub fn new(config: DeskConfig, transport: T) -> Self {
		Self {
			config,
			transport,
			token: None,
		}
	}

	pub fn has_control(&self) -> bool {
		self.token.is_some()
	}

	pub fn token(&self) -> Option<&ControlToken> {
		self.token.as_ref()
	}

	/// Drops the local token without contacting the robot.
	pub fn release(&mut self) -> Option<ControlToken> {
		self.token.take()
	}

	/// Requests a fresh control token naming the configured owner.
	///
	/// Bounded by `take_control_timeout`. A token already held is replaced.
	pub async fn take_control(&mut self) -> Result<()> {
		let endpoint = Endpoint::TakeControl;
		let request = self
			.prepare(endpoint)?
			.with_timeout(self.config.take_control_timeout)
			.with_json(&TakeControlRequest {
				owner: self.config.owner.clone(),
			})?;
		debug!(target = "franka_desk.session", owner = %self.config.owner, "requesting control");

		let response = self.transport.send(request).await.map_err(|err| match err {
			TransportError::Timeout { timeout, .. } => AcquisitionError::Timeout { timeout },
			other => AcquisitionError::Unreachable(other),
		})?;

		if !response.is_success() {
			return Err(classify_refusal(&response).into());
		}

		let token = response
			.json::<TakeControlResponse>(endpoint)?
			.token
			.filter(|t| !t.is_empty())
			.ok_or(AcquisitionError::MissingToken)?;

		info!(target = "franka_desk.session", owner = %self.config.owner, "control acquired");
		self.token = Some(ControlToken::new(token));
		Ok(())
	}

	/// Opens the brakes of every joint.
	///
	/// An "already unlocked" answer counts as success, so the step can be rerun.
	pub async fn unlock_joints(&self) -> Result<()> {
		self.call(Endpoint::UnlockJoints).await.map(drop)
	}

	/// Closes the brakes of every joint.
	pub async fn lock_joints(&self) -> Result<()> {
		self.call(Endpoint::LockJoints).await.map(drop)
	}

	pub async fn set_operating_mode(&self, mode: OperatingMode) -> Result<()> {
		let request = self.prepare(Endpoint::ChangeOperatingMode)?.with_json(&OperatingModeChange {
			desired_operating_mode: mode,
		})?;
		self.execute(request).await.map(drop)
	}

	/// Activates the Fast Control Interface; tolerates "already active".
	pub async fn activate_fci(&self) -> Result<()> {
		self.call(Endpoint::ActivateFci).await.map(drop)
	}

	pub async fn deactivate_fci(&self) -> Result<()> {
		self.call(Endpoint::DeactivateFci).await.map(drop)
	}

	/// Restarts the robot's control stack. Does not require control.
	///
	/// Any held token dies with the control stack. It is discarded before the
	/// request goes out, so it is gone even when sending fails, and returned on
	/// success. The response status is logged, not checked.
	pub async fn reboot(&mut self) -> Result<Option<ControlToken>> {
		let stale = self.token.take();
		if stale.is_some() {
			debug!(target = "franka_desk.session", "discarded control token invalidated by reboot");
		}

		let request = self.prepare(Endpoint::Reboot)?;
		debug!(target = "franka_desk.session", endpoint = %Endpoint::Reboot, "calling");
		let response = self.transport.send(request).await?;

		if response.is_success() {
			info!(target = "franka_desk.session", "reboot requested");
		} else {
			warn!(
				target = "franka_desk.session",
				status = response.status,
				body = %response.body,
				"reboot answered with non-success status"
			);
		}
		Ok(stale)
	}

	/// Brake status of every joint, in joint order.
	pub async fn joint_states(&self) -> Result<Vec<Option<JointBrakeStatus>>> {
		let response = self.call(Endpoint::JointStates).await?;
		let joints: Vec<JointState> = response.json(Endpoint::JointStates)?;
		Ok(joints.into_iter().map(|j| j.brake_status).collect())
	}

	pub async fn operating_mode(&self) -> Result<OperatingMode> {
		let endpoint = Endpoint::OperatingMode;
		let response = self.call(endpoint).await?;
		let status: OperatingModeStatus = response.json(endpoint)?;
		status.status.ok_or_else(|| {
			TransportError::Decode {
				endpoint,
				message: "response has no status field".to_string(),
			}
			.into()
		})
	}

	/// Builds a bodiless request, attaching the token where the endpoint requires one.
	///
	/// A token-gated endpoint without a held token fails here, before anything is sent.
	fn prepare(&self, endpoint: Endpoint) -> Result<DeskRequest> {
		let request = DeskRequest::new(endpoint, self.config.request_timeout);
		if !endpoint.requires_token() {
			return Ok(request);
		}
		match &self.token {
			Some(token) => Ok(request.with_token(token.clone())),
			None => Err(DeskError::Precondition { endpoint }),
		}
	}

	async fn call(&self, endpoint: Endpoint) -> Result<DeskResponse> {
		let request = self.prepare(endpoint)?;
		self.execute(request).await
	}

	async fn execute(&self, request: DeskRequest) -> Result<DeskResponse> {
		let endpoint = request.endpoint;
		debug!(
			target = "franka_desk.session",
			%endpoint,
			with_token = request.control_token.is_some(),
			"calling"
		);

		let response = self.transport.send(request).await?;
		if endpoint.tolerated_status() == Some(response.status) {
			debug!(
				target = "franka_desk.session",
				%endpoint,
				status = response.status,
				"robot already in requested state"
			);
			return Ok(response);
		}

		let response = expect_success(endpoint, response)?;
		debug!(target = "franka_desk.session", %endpoint, status = response.status, "done");
		Ok(response)
	}
}

fn expect_success(endpoint: Endpoint, response: DeskResponse) -> Result<DeskResponse> {
	if response.is_success() {
		Ok(response)
	} else {
		Err(DeskError::Status {
			endpoint,
			status: response.status,
			body: response.body,
		})
	}
}

fn classify_refusal(response: &DeskResponse) -> AcquisitionError {
	match response.status {
		401 | 403 => AcquisitionError::Unauthorized { status: response.status },
		status => AcquisitionError::NotReady {
			status,
			message: response.body.clone(),
		},
	}
}
