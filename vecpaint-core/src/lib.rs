//! # Vecpaint Core
//!
//! Value types shared by every vecpaint rendering backend.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              vecpaint-core                  │
//! ├─────────────────────────────────────────────┤
//! │  Geometry        │  Style descriptor        │
//! │  - Points        │  - Fill / gradient mode  │
//! │  - Offsets       │  - Outline cap / join    │
//! │                  │  - Shadow                │
//! ├─────────────────────────────────────────────┤
//! │  Colors (hex / rgb() / rgba() parsing)      │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod error;
pub mod geometry;
pub mod style;

pub use color::Color;
pub use error::{CanvasError, CanvasResult};
pub use geometry::Point;
pub use style::{Fill, FillMode, LineCap, LineJoin, Style};

/// Vecpaint core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
