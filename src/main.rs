// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `rotary-sync` - update smart bulbs from a rotary value file.
//!
//! # Usage
//!
//! ```bash
//! rotary-sync --file /run/rotary/value.txt --bulbs 192.168.1.20 192.168.1.21
//! rotary-sync --file value.txt --bulbs 192.168.1.20 --mode interval -n 5
//! ```
//!
//! Log verbosity follows `RUST_LOG` and defaults to `rotary_sync=info`.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rotary_sync::{CommandActuator, Settings, SyncArgs, Synchronizer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = SyncArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                let crate_name = env!("CARGO_CRATE_NAME");
                format!("{crate_name}=info").into()
            }),
        )
        .init();

    let settings = Settings::resolve(args).context("invalid configuration")?;
    let shutdown = shutdown_signal().context("could not install signal handlers")?;

    let actuator = CommandActuator::new(settings.command);
    let mut sync = Synchronizer::new(actuator, settings.sync);
    sync.run(shutdown).await;

    Ok(())
}

/// Registers the Ctrl-C and SIGTERM handlers now; the returned future
/// completes once either arrives.
#[cfg(unix)]
fn shutdown_signal() -> std::io::Result<impl Future<Output = ()>> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    Ok(async move {
        tokio::select! {
            _ = interrupt.recv() => tracing::debug!("Received Ctrl-C"),
            _ = terminate.recv() => tracing::debug!("Received SIGTERM"),
        }
    })
}

/// Registers the Ctrl-C handler now; the returned future completes once it
/// fires.
#[cfg(windows)]
fn shutdown_signal() -> std::io::Result<impl Future<Output = ()>> {
    let mut ctrl_c = tokio::signal::windows::ctrl_c()?;

    Ok(async move {
        ctrl_c.recv().await;
        tracing::debug!("Received Ctrl-C");
    })
}

#[cfg(all(test, unix))]
mod tests {
    use std::time::Duration;

    use super::*;

    fn send_to_self(signal: &str) {
        let status = std::process::Command::new("kill")
            .args([signal, &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());
    }

    #[tokio::test]
    async fn signal_before_first_poll_is_not_lost() {
        let shutdown = shutdown_signal().unwrap();

        // Delivered while nothing is awaiting the future yet
        send_to_self("-TERM");
        tokio::time::sleep(Duration::from_millis(50)).await;

        tokio::time::timeout(Duration::from_secs(5), shutdown)
            .await
            .unwrap();
    }
}
