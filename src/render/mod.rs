//! Rendering backends and rasterization.
//!
//! [`raster`] turns circles, ellipses and triangles into pixels and spans
//! without touching any surface. [`RenderBackend`] is the surface boundary,
//! [`SoftwareBackend`] draws into a [`Framebuffer`](crate::framebuffer::Framebuffer),
//! and [`Renderer`] composes backend calls into shape, texture and sprite draws.
//!
//! # References
//!
//! - Bresenham, J. E. (1977). "A linear algorithm for incremental digital
//!   display of circular arcs." CACM 20(2).
//! - Van Aken, J. R. (1984). "An Efficient Ellipse-Drawing Algorithm."
//!   IEEE CG&A 4(9).

mod backend;
pub mod raster;
mod renderer;
mod software;

pub use backend::{Flip, RenderBackend, TextureId};
pub use raster::Span;
pub use renderer::{DrawMode, Renderer, TextureDraw};
pub use software::SoftwareBackend;
