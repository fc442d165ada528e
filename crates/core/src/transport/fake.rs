//! Fake transport for unit testing session and bootstrap logic.
//!
//! Provides an in-memory transport that replays scripted responses per
//! endpoint and records every request, so tests can assert call order without
//! a robot.
//!
//! # Example
//!
//! ```ignore
//! let (transport, controller) = FakeTransportBuilder::new()
//!     .respond(Endpoint::TakeControl, 200, r#"{"token":"abc"}"#)
//!     .build();
//! let mut session = ControlSession::new(config, transport);
//!
//! session.take_control().await?;
//! assert_eq!(controller.endpoints(), vec![Endpoint::TakeControl]);
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use franka_desk_protocol::Endpoint;
use parking_lot::Mutex;
use serde_json::Value;

use super::{DeskRequest, DeskResponse, Transport};
use crate::error::TransportError;

/// Scripted outcome for one request.
#[derive(Debug, Clone)]
pub enum FakeReply {
	Response(DeskResponse),
	Error(TransportError),
}

/// A request as the fake transport observed it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
	pub endpoint: Endpoint,
	pub body: Option<Value>,
	pub control_token: Option<String>,
}

#[derive(Debug, Default)]
struct Script {
	queue: VecDeque<FakeReply>,
	fallback: Option<FakeReply>,
}

#[derive(Debug, Default)]
struct FakeState {
	scripts: HashMap<Endpoint, Script>,
	sent: Vec<RecordedRequest>,
}

impl FakeState {
	fn script(&mut self, endpoint: Endpoint) -> &mut Script {
		self.scripts.entry(endpoint).or_default()
	}

	fn next_reply(&mut self, endpoint: Endpoint) -> Option<FakeReply> {
		let script = self.scripts.get_mut(&endpoint)?;
		script.queue.pop_front().or_else(|| script.fallback.clone())
	}
}

/// Builder for creating fake transport instances.
#[derive(Debug, Default)]
pub struct FakeTransportBuilder {
	state: FakeState,
}

impl FakeTransportBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Queues a one-shot response for `endpoint`.
	pub fn respond(mut self, endpoint: Endpoint, status: u16, body: &str) -> Self {
		self.state
			.script(endpoint)
			.queue
			.push_back(FakeReply::Response(DeskResponse::new(status, body)));
		self
	}

	/// Queues a one-shot transport failure for `endpoint`.
	pub fn fail(mut self, endpoint: Endpoint, error: TransportError) -> Self {
		self.state.script(endpoint).queue.push_back(FakeReply::Error(error));
		self
	}

	/// Response returned once the queue for `endpoint` is drained.
	pub fn always(mut self, endpoint: Endpoint, status: u16, body: &str) -> Self {
		self.state.script(endpoint).fallback = Some(FakeReply::Response(DeskResponse::new(status, body)));
		self
	}

	/// Builds the transport and the controller used to inspect it.
	pub fn build(self) -> (FakeTransport, FakeTransportController) {
		let state = Arc::new(Mutex::new(self.state));
		(
			FakeTransport { state: Arc::clone(&state) },
			FakeTransportController { state },
		)
	}
}

/// In-memory [`Transport`] replaying scripted replies.
#[derive(Debug, Clone)]
pub struct FakeTransport {
	state: Arc<Mutex<FakeState>>,
}

#[async_trait]
impl Transport for FakeTransport {
	async fn send(&self, request: DeskRequest) -> Result<DeskResponse, TransportError> {
		let endpoint = request.endpoint;
		let mut state = self.state.lock();
		state.sent.push(RecordedRequest {
			endpoint,
			body: request.body,
			control_token: request.control_token.map(|t| t.as_str().to_string()),
		});

		match state.next_reply(endpoint) {
			Some(FakeReply::Response(response)) => Ok(response),
			Some(FakeReply::Error(error)) => Err(error),
			None => Err(TransportError::Network {
				endpoint,
				message: "fake transport has no scripted reply".to_string(),
			}),
		}
	}
}

/// Controller for scripting replies and inspecting sent requests.
#[derive(Debug, Clone)]
pub struct FakeTransportController {
	state: Arc<Mutex<FakeState>>,
}

impl FakeTransportController {
	/// All requests sent so far, in order.
	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.state.lock().sent.clone()
	}

	/// Take all sent requests, clearing the buffer.
	pub fn take_requests(&self) -> Vec<RecordedRequest> {
		std::mem::take(&mut self.state.lock().sent)
	}

	/// Endpoints hit so far, in order.
	pub fn endpoints(&self) -> Vec<Endpoint> {
		self.state.lock().sent.iter().map(|r| r.endpoint).collect()
	}

	pub fn count(&self, endpoint: Endpoint) -> usize {
		self.state.lock().sent.iter().filter(|r| r.endpoint == endpoint).count()
	}
}
