//! reqwest-backed transport speaking HTTPS to the robot.

use async_trait::async_trait;
use franka_desk_protocol::{CONTROL_TOKEN_HEADER, Endpoint, Method};
use tracing::{debug, trace};

use super::{DeskRequest, DeskResponse, Transport};
use crate::config::{Credentials, DeskConfig};
use crate::error::{ConfigError, TransportError};

/// Authenticated HTTP(S) transport for a single robot.
#[derive(Debug, Clone)]
pub struct HttpTransport {
	client: reqwest::Client,
	config: DeskConfig,
}

impl HttpTransport {
	pub fn new(config: &DeskConfig) -> Result<Self, ConfigError> {
		let client = reqwest::Client::builder()
			.danger_accept_invalid_certs(config.accept_invalid_certs)
			.user_agent(concat!("franka-desk/", env!("CARGO_PKG_VERSION")))
			.build()
			.map_err(|e| ConfigError::HttpClient(e.to_string()))?;

		Ok(Self {
			client,
			config: config.clone(),
		})
	}

	fn credentials(&self) -> &Credentials {
		&self.config.credentials
	}
}

#[async_trait]
impl Transport for HttpTransport {
	async fn send(&self, request: DeskRequest) -> Result<DeskResponse, TransportError> {
		let endpoint = request.endpoint;
		let url = self.config.url_for(endpoint.path());

		let mut builder = match endpoint.method() {
			Method::Get => self.client.get(&url),
			Method::Post => self.client.post(&url),
		}
		.basic_auth(&self.credentials().username, Some(&self.credentials().password))
		.timeout(request.timeout);

		if let Some(token) = &request.control_token {
			builder = builder.header(CONTROL_TOKEN_HEADER, token.as_str());
		}
		if let Some(body) = &request.body {
			builder = builder.json(body);
		}

		debug!(
			target = "franka_desk.http",
			method = %endpoint.method(),
			%url,
			with_token = request.control_token.is_some(),
			"sending request"
		);

		let response = builder.send().await.map_err(|e| classify(endpoint, &request, e))?;
		let status = response.status().as_u16();
		let body = response.text().await.map_err(|e| match classify(endpoint, &request, e) {
			TransportError::Network { endpoint, message } => TransportError::Decode { endpoint, message },
			other => other,
		})?;

		trace!(target = "franka_desk.http", %url, status, body_len = body.len(), "received response");
		Ok(DeskResponse { status, body })
	}
}

fn classify(endpoint: Endpoint, request: &DeskRequest, err: reqwest::Error) -> TransportError {
	if err.is_timeout() {
		TransportError::Timeout {
			endpoint,
			timeout: request.timeout,
		}
	} else {
		TransportError::Network {
			endpoint,
			message: err.to_string(),
		}
	}
}
