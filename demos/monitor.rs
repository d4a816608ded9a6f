// SPDX-License-Identifier: MPL-2.0

//! Live monitoring example.
//!
//! Logs in to a Home Solutions account, then prints the state of every
//! ventilation unit each time it changes, until Ctrl+C.
//!
//! # Usage
//!
//! ```bash
//! SYSTEMAIR_EMAIL=user@example.com SYSTEMAIR_PASSWORD=secret \
//!     cargo run --example monitor
//!
//! # With protocol traces
//! RUST_LOG=systemair_lib=debug cargo run --example monitor
//! ```

use std::env;

use systemair_lib::auth::Authenticator;
use systemair_lib::protocol::{ApiConfig, HttpApi};
use systemair_lib::session::{SessionConfig, SessionOrchestrator};
use systemair_lib::stream::WebSocketTransport;
use systemair_lib::{DeviceEvent, UpdateSource};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("systemair_lib=info")),
        )
        .init();

    let (Ok(email), Ok(password)) = (env::var("SYSTEMAIR_EMAIL"), env::var("SYSTEMAIR_PASSWORD"))
    else {
        eprintln!("Set SYSTEMAIR_EMAIL and SYSTEMAIR_PASSWORD");
        std::process::exit(1);
    };

    let api = ApiConfig::default();
    let session = SessionOrchestrator::new(
        Authenticator::new(api.clone(), email, password)?,
        HttpApi::new(api.clone())?,
        WebSocketTransport::new(&api),
        SessionConfig::default(),
    );

    let mut events = session.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                DeviceEvent::DeviceDiscovered { device } => {
                    println!("Found {} ({})", device.name(), device.id());
                }
                DeviceEvent::StateChanged { source, state, .. } => {
                    let via = match source {
                        UpdateSource::Pull => "pull",
                        UpdateSource::Push => "push",
                    };
                    println!("[{via}] {state}");
                }
                DeviceEvent::StreamDisconnected { error: Some(error) } => {
                    println!("Push stream lost: {error}");
                }
                _ => {}
            }
        }
    });

    let cancel = CancellationToken::new();
    let stop = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("Stopping...");
            stop.cancel();
        }
    });

    session.run(cancel).await;
    Ok(())
}
