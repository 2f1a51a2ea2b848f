//! Rendering backend implementations.

#[cfg(feature = "wasm")]
pub mod canvas2d;
#[cfg(feature = "raster")]
pub mod raster;
pub mod recording;

use crate::context::{DrawingContext, SurfaceElement};
use crate::{BackendType, RenderResult};

/// Trait for rendering backends.
///
/// A backend knows how to obtain a display element and a 2D context bound
/// to it. [`PathRenderer`](crate::PathRenderer) drives the pair it returns.
pub trait RenderBackend {
    /// Display element owning the pixels.
    type Element: SurfaceElement;
    /// 2D context bound to the element.
    type Context: DrawingContext;

    /// Get the backend type.
    fn backend_type(&self) -> BackendType;

    /// Whether this backend can create surfaces in the current environment.
    fn probe(&self) -> bool;

    /// Create or adopt the element with `id` and bind a 2D context to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the element or its 2D context is unavailable.
    fn create_surface(&self, id: &str) -> RenderResult<(Self::Element, Self::Context)>;
}
