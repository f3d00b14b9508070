use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use geolive_core::api::{ensure_token, resolve_system};
use geolive_core::{AccessToken, Credentials, GeoClient, Renderer, Surface, SystemId};

use crate::config::Settings;

/// State carried from one poll cycle to the next
#[derive(Debug, Default)]
pub struct PollContext {
    /// Last token obtained, reused while it stays fresh
    pub token: Option<AccessToken>,
    /// Explicit or discovered system, resolved once
    pub system_id: Option<SystemId>,
}

/// Fixed-interval driver: token, system, live data, render
pub struct Poller<S: Surface> {
    client: GeoClient,
    credentials: Credentials,
    refresh: Duration,
    renderer: Renderer<S>,
    context: PollContext,
}

impl<S: Surface> Poller<S> {
    /// Create a new poller
    pub fn new(settings: &Settings, client: GeoClient, surface: S) -> Self {
        Self {
            client,
            credentials: settings.credentials.clone(),
            refresh: settings.refresh,
            renderer: Renderer::new(settings.output, settings.chart, surface),
            context: PollContext {
                token: None,
                system_id: settings.system.clone(),
            },
        }
    }

    pub fn context(&self) -> &PollContext {
        &self.context
    }

    pub fn renderer(&self) -> &Renderer<S> {
        &self.renderer
    }

    /// Poll immediately, then every refresh interval, until `shutdown` completes.
    ///
    /// Cycle failures are logged and never end the loop. Cycles do not
    /// overlap: ticks missed while a slow cycle runs are skipped.
    pub async fn run_until(&mut self, shutdown: impl Future<Output = ()>) -> Result<()> {
        let mut ticker = tokio::time::interval(self.refresh);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        info!(
            "Polling every {}s ({} output)",
            self.refresh.as_secs(),
            self.renderer.mode()
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = &mut shutdown => break,
            }

            tokio::select! {
                result = self.poll_once() => {
                    if let Err(e) = result {
                        self.report_failure(&e);
                    }
                }
                _ = &mut shutdown => break,
            }
        }

        self.renderer.finish()?;
        info!("Stopped polling");
        Ok(())
    }

    /// Log a failed cycle below any chart block already drawn.
    ///
    /// The next redraw starts a fresh block instead of erasing the log line.
    fn report_failure(&mut self, e: &anyhow::Error) {
        if let Err(finish_err) = self.renderer.finish() {
            debug!("Failed to release surface: {}", finish_err);
        }
        error!("err: {:#}", e);
    }

    /// Perform a single fetch-and-render cycle
    pub async fn poll_once(&mut self) -> Result<()> {
        let token = ensure_token(&self.client, self.context.token.as_ref(), &self.credentials)
            .await
            .context("Failed to obtain access token")?;
        self.context.token = Some(token.clone());

        let system = resolve_system(&self.client, &token, self.context.system_id.as_ref())
            .await
            .context("Failed to resolve system")?;
        self.context.system_id = Some(system.clone());

        let snapshot = self
            .client
            .live_data(&token, &system)
            .await
            .with_context(|| format!("Failed to fetch live data for system {}", system))?;
        debug!(
            "Live data at {} with {} measurements",
            snapshot.utc,
            snapshot.power.len()
        );

        self.renderer.render(&snapshot)?;
        Ok(())
    }
}
