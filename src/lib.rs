//! # Penguin-Gfx
//!
//! Immediate-mode 2D drawing: geometry and colour value types, a midpoint
//! rasterizer for circles and ellipses, sprite placement, and a renderer
//! that composes shape, texture and sprite draws over any [`RenderBackend`].
//!
//! A pure-Rust [`SoftwareBackend`] draws into a framebuffer that can be
//! written out as PNG, so nothing here needs a window or a GPU.
//!
//! ## Quick Start
//!
//! ```rust
//! use penguin_gfx::prelude::*;
//!
//! let backend = SoftwareBackend::new(64, 64)?;
//! let mut renderer = Renderer::new(backend);
//!
//! renderer.clear(Colour::BLACK)?;
//! renderer.draw_circle(
//!     Circle2::new(Vector2::new(32.0, 32.0), 20.0),
//!     Colour::RED,
//!     DrawMode::Filled,
//! )?;
//!
//! let png = PngEncoder::to_bytes(renderer.backend().framebuffer())?;
//! assert_eq!(&png[1..4], b"PNG");
//! # Ok::<(), penguin_gfx::Error>(())
//! ```
//!
//! ## References
//!
//! - Bresenham, J. E. (1977). "A linear algorithm for incremental digital
//!   display of circular arcs." CACM 20(2).
//! - Van Aken, J. R. (1984). "An Efficient Ellipse-Drawing Algorithm."
//!   IEEE CG&A 4(9).
//!
//! [`RenderBackend`]: render::RenderBackend
//! [`SoftwareBackend`]: render::SoftwareBackend

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// RGBA colour type.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Vectors, rectangles and circles.
pub mod geometry;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Rendering backends and rasterization.
pub mod render;

/// Sprite placement.
pub mod sprite;

/// Textures and the texture cache.
pub mod texture;

/// Output encoders (PNG).
pub mod output;

// ============================================================================
// Support Modules
// ============================================================================

/// YAML configuration.
pub mod config;

/// Logger initialisation.
pub mod logging;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for penguin-gfx operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use penguin_gfx::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Colour;
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{Circle2, Rect2, Vector2, Vector2i};
    pub use crate::output::PngEncoder;
    pub use crate::render::{
        DrawMode, Flip, RenderBackend, Renderer, SoftwareBackend, Span, TextureDraw, TextureId,
    };
    pub use crate::sprite::Sprite;
    pub use crate::texture::{Texture, TextureCache};
}
