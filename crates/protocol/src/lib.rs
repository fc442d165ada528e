//! Wire types for the Franka Desk control API.
//!
//! This crate contains the serde-serializable types exchanged with the robot's
//! Desk web API, together with the endpoint table that names every remote
//! operation. These types represent the "protocol layer" - the shapes of data
//! as they appear on the wire.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! * Pure data: No I/O, no retry or status policy
//! * 1:1 with the API: Field names match the JSON the firmware emits
//! * Stable: Changes only when the firmware's API contract changes
//!
//! Session semantics (token gating, recovery) live in `franka-desk`.

pub mod endpoint;
pub mod types;

pub use endpoint::*;
pub use types::*;
