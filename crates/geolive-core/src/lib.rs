//! Core library for geolive.
//!
//! Talks to the geotogether HTTP API (login, system discovery, live data)
//! and turns live snapshots into text lines or a scrolling terminal chart.

pub mod api;
pub mod render;

pub use api::{AccessToken, ApiError, Credentials, GeoClient, LiveDataSnapshot, SystemId};
pub use render::{
    ChartSize, MemorySurface, OutputMode, RenderError, Renderer, Surface, TerminalSurface,
};
