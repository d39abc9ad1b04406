//! pixiv-forwarder is a header-rewriting reverse forwarder for the pixiv
//! app API.
//!
//! Each inbound request is classified by path prefix onto one of three
//! fixed upstreams (app API, image CDN, OAuth), has its client-identifying
//! headers replaced with a configured mobile client signature, and is sent
//! upstream exactly once. The upstream response is streamed back with
//! permissive CORS headers.
//!
//! # Architecture
//!
//! - [`adapter`] -- Hosting-runtime adapters (root-mounted `worker`,
//!   prefix-mounted `edge`) in front of the shared forwarder.
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (run, init, validate, health).
//! - [`config`] -- Static configuration: compiled-in defaults, optional file
//!   overlay, validation.
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`forward`] -- Core forwarding: route classification, header rewrite,
//!   the upstream seam, and locally produced responses.
//! - [`health`] -- Health endpoint returning runtime diagnostics.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`server`] -- Axum server setup, shared application state, HTTPS client,
//!   and graceful shutdown.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `yaml` | YAML config file support _(enabled by default)_ |
//! | `json` | Marker for JSON config files (always parsed) |
//! | `toml` | TOML config file support |
//! | `file-backends` | All file formats |
//! | `full` | All features |

// Binary crate: public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod adapter;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod forward;
pub mod health;
pub mod logging;
pub mod server;
