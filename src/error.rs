//! Error types for penguin-gfx operations.
//!
//! Geometry degeneracies (zero radius, empty texture region) are never errors;
//! they produce empty output instead. Errors here come from I/O, image codecs,
//! configuration, and render backends reporting a failed call.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in penguin-gfx operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// PNG decoding error.
    #[error("PNG decoding error: {0}")]
    PngDecoding(#[from] png::DecodingError),

    /// Invalid dimensions for a framebuffer, texture or window.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Pixel data that cannot be converted to RGBA8.
    #[error("Unsupported pixel format: {0}")]
    UnsupportedPixelFormat(String),

    /// A texture handle the backend does not know about.
    #[error("Invalid texture handle: {0}")]
    InvalidTexture(u32),

    /// A render backend call failed.
    #[error("Backend error: {0}")]
    Backend(String),

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),
}
