//! Rendering of live snapshots as text lines or a scrolling chart.

pub mod chart;
pub mod surface;
pub mod text;
pub mod window;

use std::fmt;
use std::str::FromStr;

use chrono::Local;
use thiserror::Error;
use tracing::debug;

use crate::api::LiveDataSnapshot;

pub use surface::{MemorySurface, Surface, TerminalSurface};
pub use window::{Reading, ReadingWindow};

/// Error type for rendering
#[derive(Debug, Error)]
pub enum RenderError {
    /// Chart mode needs an IMPORT measurement
    #[error("live data has no {} reading", LiveDataSnapshot::IMPORT)]
    MissingImport,

    /// Writing to the surface failed
    #[error("terminal write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// How readings are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Scrolling line chart of imported watts
    #[default]
    Chart,
    /// One block of text lines per reading
    Text,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chart" => Ok(Self::Chart),
            "text" => Ok(Self::Text),
            other => Err(format!("unknown output type: {}", other)),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chart => f.write_str("chart"),
            Self::Text => f.write_str("text"),
        }
    }
}

/// Target chart dimensions in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSize {
    pub width: usize,
    pub height: usize,
}

/// Draws snapshots onto a surface, keeping the reading history for the chart
pub struct Renderer<S: Surface> {
    mode: OutputMode,
    size: ChartSize,
    window: ReadingWindow,
    surface: S,
}

impl<S: Surface> Renderer<S> {
    pub fn new(mode: OutputMode, size: ChartSize, surface: S) -> Self {
        Self {
            mode,
            size,
            window: ReadingWindow::new(),
            surface,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn window(&self) -> &ReadingWindow {
        &self.window
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Show a snapshot. Snapshots without measurements are skipped silently.
    pub fn render(&mut self, snapshot: &LiveDataSnapshot) -> Result<(), RenderError> {
        if !snapshot.has_power() {
            debug!("Live data unavailable at {}, skipping", snapshot.utc);
            return Ok(());
        }

        match self.mode {
            OutputMode::Text => self.surface.print(&text::text_lines(snapshot, &Local))?,
            OutputMode::Chart => self.render_chart(snapshot)?,
        }
        Ok(())
    }

    /// Release the surface (leave the chart block in place)
    pub fn finish(&mut self) -> Result<(), RenderError> {
        self.surface.finish()?;
        Ok(())
    }

    fn render_chart(&mut self, snapshot: &LiveDataSnapshot) -> Result<(), RenderError> {
        let import_watts = snapshot
            .watts(LiveDataSnapshot::IMPORT)
            .ok_or(RenderError::MissingImport)?;

        self.window.push(Reading {
            timestamp: snapshot.utc,
            import_watts,
        });

        let series = self
            .window
            .trailing_imports(chart::plot_width(self.size.width));
        let lines = chart::plot(&series, self.size.height);
        self.surface.redraw(&lines)?;
        Ok(())
    }
}
