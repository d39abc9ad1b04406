//! `pixiv-forwarder run`: start the forwarder.
//!
//! Resolves the static configuration, builds the forwarder around the
//! pooled HTTPS client, and serves the selected runtime adapter with
//! graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::cli::RunArgs;
use crate::config;
use crate::error::ForwarderError;
use crate::forward::{Forwarder, HyperUpstream};
use crate::logging;
use crate::server::{self, AppState};

pub async fn execute(args: RunArgs) -> Result<(), ForwarderError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    logging::init(&args.log_level, log_format);

    let loaded = config::load(args.config.as_deref()).await?;
    let config = Arc::new(loaded.config);

    let upstream = Arc::new(HyperUpstream::new(server::build_http_client()));
    let state = Arc::new(AppState {
        forwarder: Forwarder::new(Arc::clone(&config), upstream),
        runtime: args.runtime,
        config_source: loaded.source.clone(),
        start_time: Instant::now(),
    });

    let router = server::build_router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        runtime = %args.runtime,
        config = %loaded.source,
        api = config.routes.api,
        image = config.routes.image,
        oauth = config.routes.oauth,
        "pixiv-forwarder started"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    tracing::info!("pixiv-forwarder stopped");
    Ok(())
}
