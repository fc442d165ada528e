//! In-process fake of the Desk web API for integration tests.
//!
//! Serves plain HTTP on an ephemeral localhost port and keeps just enough state
//! (owner, brakes, FCI) to answer the way the firmware does.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "secret";
/// `base64("admin:secret")`
const BASIC_AUTH: &str = "Basic YWRtaW46c2VjcmV0";
pub const TOKEN: &str = "tok-1";

/// A request as the server saw it.
#[derive(Debug, Clone)]
pub struct SeenRequest {
	pub method: String,
	pub path: String,
	pub control_token: Option<String>,
	pub body: Option<Value>,
}

#[derive(Debug)]
pub struct DeskState {
	pub owner: Option<String>,
	pub brakes_open: bool,
	pub fci_active: bool,
	pub mode: String,
	/// Take-control refusals left before the server hands out a token.
	pub refusals_left: u32,
	pub take_control_delay: Option<Duration>,
	pub reboots: u32,
	pub seen: Vec<SeenRequest>,
}

impl Default for DeskState {
	fn default() -> Self {
		Self {
			owner: None,
			brakes_open: false,
			fci_active: false,
			mode: "Execution".to_string(),
			refusals_left: 0,
			take_control_delay: None,
			reboots: 0,
			seen: Vec::new(),
		}
	}
}

pub struct DeskServer {
	pub addr: SocketAddr,
	pub state: Arc<Mutex<DeskState>>,
	task: tokio::task::JoinHandle<()>,
}

impl DeskServer {
	pub async fn start() -> Self {
		Self::start_with(DeskState::default()).await
	}

	pub async fn start_with(initial: DeskState) -> Self {
		let state = Arc::new(Mutex::new(initial));
		let app = Router::new().fallback(handle).with_state(Arc::clone(&state));
		let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind fake desk");
		let addr = listener.local_addr().expect("local addr");
		let task = tokio::spawn(async move {
			axum::serve(listener, app).await.expect("fake desk server");
		});
		Self { addr, state, task }
	}

	pub fn url(&self) -> String {
		format!("http://{}", self.addr)
	}

	pub fn paths(&self) -> Vec<String> {
		self.state.lock().seen.iter().map(|r| r.path.clone()).collect()
	}

	pub fn shutdown(self) {
		self.task.abort();
	}
}

async fn handle(State(state): State<Arc<Mutex<DeskState>>>, method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> (StatusCode, String) {
	let path = uri.path().to_string();
	let control_token = headers.get("x-control-token").and_then(|v| v.to_str().ok()).map(str::to_string);
	let body: Option<Value> = serde_json::from_slice(&body).ok();

	let delay = {
		let mut desk = state.lock();
		desk.seen.push(SeenRequest {
			method: method.to_string(),
			path: path.clone(),
			control_token: control_token.clone(),
			body: body.clone(),
		});
		if path == "/api/system/control-token:take" { desk.take_control_delay } else { None }
	};
	if let Some(delay) = delay {
		tokio::time::sleep(delay).await;
	}

	let authorized = headers.get("authorization").and_then(|v| v.to_str().ok()) == Some(BASIC_AUTH);
	if !authorized {
		return (StatusCode::UNAUTHORIZED, "unauthorized".to_string());
	}

	let mut desk = state.lock();
	let token_ok = control_token.as_deref() == Some(TOKEN) && desk.owner.is_some();

	match (method.as_str(), path.as_str()) {
		("POST", "/api/system/control-token:take") => {
			if desk.refusals_left > 0 {
				desk.refusals_left -= 1;
				return (StatusCode::CONFLICT, "control held by another owner".to_string());
			}
			desk.owner = body.as_ref().and_then(|b| b["owner"].as_str()).map(str::to_string);
			(StatusCode::OK, json!({ "token": TOKEN }).to_string())
		}
		("POST", "/api/system:reboot") => {
			desk.reboots += 1;
			desk.owner = None;
			desk.brakes_open = false;
			desk.fci_active = false;
			(StatusCode::OK, String::new())
		}
		("GET", "/api/system/operating-mode") => (StatusCode::OK, json!({ "status": desk.mode }).to_string()),
		("GET", "/api/arm/joints") => {
			let brake = if desk.brakes_open { "Unlocked" } else { "Locked" };
			let joints: Vec<Value> = (0..7).map(|_| json!({ "brakeStatus": brake })).collect();
			(StatusCode::OK, Value::Array(joints).to_string())
		}
		("POST", _) if !token_ok => (StatusCode::FORBIDDEN, "missing or invalid control token".to_string()),
		("POST", "/api/arm/joints:unlock") => {
			if desk.brakes_open {
				return (StatusCode::INTERNAL_SERVER_ERROR, "brakes already open".to_string());
			}
			desk.brakes_open = true;
			(StatusCode::OK, String::new())
		}
		("POST", "/api/arm/joints:lock") => {
			desk.brakes_open = false;
			(StatusCode::OK, String::new())
		}
		("POST", "/api/fci:activate") => {
			if desk.fci_active {
				return (StatusCode::INTERNAL_SERVER_ERROR, "fci already active".to_string());
			}
			desk.fci_active = true;
			(StatusCode::OK, String::new())
		}
		("POST", "/api/fci:deactivate") => {
			desk.fci_active = false;
			(StatusCode::OK, String::new())
		}
		("POST", "/api/system/operating-mode:change") => {
			match body.as_ref().and_then(|b| b["desiredOperatingMode"].as_str()) {
				Some(mode) => {
					desk.mode = mode.to_string();
					(StatusCode::OK, String::new())
				}
				None => (StatusCode::BAD_REQUEST, "desiredOperatingMode missing".to_string()),
			}
		}
		_ => (StatusCode::NOT_FOUND, format!("no route for {method} {path}")),
	}
}
