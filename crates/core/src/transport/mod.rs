//! Transport seam between [`ControlSession`](crate::ControlSession) and the robot.
//!
//! A transport moves one [`DeskRequest`] to the robot and hands back whatever
//! HTTP status and body came back. It never interprets statuses: token gating,
//! tolerated statuses and acquisition classification live in the session.

use std::time::Duration;

use async_trait::async_trait;
use franka_desk_protocol::Endpoint;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::TransportError;
use crate::session::ControlToken;

pub mod fake;
pub mod http;

pub use fake::{FakeTransport, FakeTransportBuilder, FakeTransportController, RecordedRequest};
pub use http::HttpTransport;

/// One call to a Desk endpoint.
#[derive(Debug, Clone)]
pub struct DeskRequest {
	pub endpoint: Endpoint,
	pub body: Option<Value>,
	/// Sent as `X-Control-Token` when present.
	pub control_token: Option<ControlToken>,
	pub timeout: Duration,
}

impl DeskRequest {
	pub fn new(endpoint: Endpoint, timeout: Duration) -> Self {
		Self {
			endpoint,
			body: None,
			control_token: None,
			timeout,
		}
	}

	pub fn with_body(mut self, body: Value) -> Self {
		self.body = Some(body);
		self
	}

	pub fn with_token(mut self, token: ControlToken) -> Self {
		self.control_token = Some(token);
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	/// Serializes `body` as the JSON payload.
	pub fn with_json<S: Serialize>(self, body: &S) -> Result<Self, TransportError> {
		let endpoint = self.endpoint;
		let value = serde_json::to_value(body).map_err(|e| TransportError::Encode {
			endpoint,
			message: e.to_string(),
		})?;
		Ok(self.with_body(value))
	}
}

/// Raw HTTP outcome of a [`DeskRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeskResponse {
	pub status: u16,
	pub body: String,
}

impl DeskResponse {
	pub fn new(status: u16, body: impl Into<String>) -> Self {
		Self { status, body: body.into() }
	}

	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Decodes the body as JSON, attributing failures to `endpoint`.
	pub fn json<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, TransportError> {
		serde_json::from_str(&self.body).map_err(|e| TransportError::Decode {
			endpoint,
			message: e.to_string(),
		})
	}
}

/// Sends requests to a robot.
#[async_trait]
pub trait Transport: Send + Sync {
	/// Performs `request`, returning any HTTP status the robot answered with.
	///
	/// Fails only when no response was obtained.
	async fn send(&self, request: DeskRequest) -> Result<DeskResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
	async fn send(&self, request: DeskRequest) -> Result<DeskResponse, TransportError> {
		(**self).send(request).await
	}
}
