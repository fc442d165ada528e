//! Control-session client for the Franka Desk API.
//!
//! Takes exclusive control of a robot arm over its Desk web API and prepares it
//! for an external real-time connection through the Fast Control Interface
//! (FCI). The real-time protocol itself is out of scope.
//!
//! # Example
//!
//! ```ignore
//! use franka_desk::{ControlSession, Credentials, DeskConfig, HttpTransport, RecoveryPolicy, SessionBootstrapper};
//!
//! let config = DeskConfig::new("172.16.0.2", Credentials::new("admin", "secret"))?.with_accept_invalid_certs(true);
//! let transport = HttpTransport::new(&config)?;
//! let mut session = ControlSession::new(config, transport);
//!
//! let report = SessionBootstrapper::new(&mut session, RecoveryPolicy::default()).enable().await?;
//! if let Some(token) = report.token {
//!     println!("enabled with token {token}");
//! }
//! ```

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod session;
pub mod transport;

pub use bootstrap::{BootstrapError, BootstrapReport, BootstrapState, RecoveryPolicy, SessionBootstrapper};
pub use config::{Credentials, DeskConfig};
pub use error::{AcquisitionError, ConfigError, DeskError, Result, TransportError};
pub use franka_desk_protocol as protocol;
pub use franka_desk_protocol::{Endpoint, JointBrakeStatus, OperatingMode};
pub use session::{ControlSession, ControlToken};
pub use transport::{DeskRequest, DeskResponse, HttpTransport, Transport};
