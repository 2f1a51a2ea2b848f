//! # Vecpaint Renderer
//!
//! Replays declarative vector paths onto 2D raster surfaces.
//!
//! ## Rendering Backends
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │        PathRenderer<B: RenderBackend>       │
//! ├─────────────┬─────────────┬─────────────────┤
//! │ Canvas2D    │ Raster      │ Recording       │
//! │ (browser)   │ (tiny-skia) │ (call log)      │
//! └─────────────┴─────────────┴─────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use vecpaint_core::{Color, Point, Style};
//! use vecpaint_renderer::backend::recording::RecordingBackend;
//! use vecpaint_renderer::PathRenderer;
//!
//! let mut surface = PathRenderer::new(&RecordingBackend::new(), None, 64, 64)?;
//! let mut pass = surface.start();
//! pass.move_to(Point::new(0.0, 0.0))
//!     .line_to(Point::new(10.0, 0.0))
//!     .line_to(Point::new(10.0, 10.0))
//!     .join();
//! surface.end(pass, &Style::new().with_fill(Color::rgb(255, 0, 0)))?;
//! # Ok::<(), vecpaint_renderer::RenderError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod command;
pub mod context;
pub mod error;
pub mod registry;
pub mod surface;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use backend::RenderBackend;
pub use command::{Bounds, PathCommand, PathPass};
pub use context::{CompositeOperation, DrawingContext, Gradient, SurfaceElement};
pub use error::{RenderError, RenderResult};
pub use registry::BackendRegistry;
pub use surface::PathRenderer;

use serde::{Deserialize, Serialize};

/// Configuration for new surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Preferred backend (will fall back if unavailable).
    pub preferred_backend: BackendType,
    /// Initial surface width in pixels.
    pub width: u32,
    /// Initial surface height in pixels.
    pub height: u32,
    /// Prefix for generated element ids.
    pub id_prefix: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            preferred_backend: BackendType::Canvas2D,
            width: 800,
            height: 600,
            id_prefix: "vecpaint-".to_string(),
        }
    }
}

impl RendererConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Config`] if the JSON is malformed.
    pub fn from_json(json: &str) -> RenderResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// A fresh element id: the configured prefix plus a random UUID.
    #[must_use]
    pub fn generate_id(&self) -> String {
        format!("{}{}", self.id_prefix, uuid::Uuid::new_v4())
    }
}

/// Available rendering backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    /// Browser `<canvas>` with a `CanvasRenderingContext2D`.
    Canvas2D,
    /// In-memory tiny-skia pixmap (no browser required).
    Raster,
    /// Call log, paints nothing.
    Recording,
}
