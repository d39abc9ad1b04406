//! Hosting-runtime adapters in front of the shared [`Forwarder`](crate::forward::Forwarder).
//!
//! Each adapter is an Axum fallback handler translating the served request
//! into the forwarder's input:
//!
//! - [`worker`] -- served at the root, forwards requests untouched.
//! - [`edge`] -- served under a fixed mount prefix (`/api` by default)
//!   which is removed before routing.

pub mod edge;
pub mod worker;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Runtime {
    Worker,
    Edge,
}

impl std::fmt::Display for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Worker => f.write_str("worker"),
            Self::Edge => f.write_str("edge"),
        }
    }
}
