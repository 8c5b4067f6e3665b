//! # qrpaint
//!
//! A Rust library for encoding text into QR codes and painting them onto image buffers.
//!
//! `qrpaint` encodes text in byte mode into QR Code Model 2 symbols of versions 1 to 10 at
//! any of the four error correction levels, picks the mask with the lowest penalty, and
//! rasterizes the result at the requested pixel size with nearest-neighbour scaling.
//!
//! ## Features
//!
//! - Byte-mode encoding of any UTF-8 text (or raw bytes, or UTF-16 code units).
//! - Four error correction levels: Low, Medium, Quartile, High.
//! - Output to any [`RasterTarget`]: `image` buffers, `DynamicImage`, or a borrowed
//!   [`Framebuffer`]. SVG, terminal text and image files are available in [`helper`].
//! - Safe Rust implementation with no unsafe code.
//!
//! ## Example
//!
//! Paint a symbol onto an in-memory image:
//!
//! ```rust
//! use image::GrayImage;
//! use qrpaint::{encode_and_render, RenderOptions};
//!
//! let mut img = GrayImage::new(1, 1);
//! let options = RenderOptions::default().with_level_name("Q");
//! encode_and_render(&mut img, "https://example.com", &options).unwrap();
//! assert_eq!(img.dimensions(), (320, 320));
//! ```
//!
//! ## Modules
//!
//! - [`qrcode`]: Symbol encoding (version selection, codewords, masking).
//! - [`helper`]: Rasterizing and other output formats.
//! - [`options`]: Render settings.

#![forbid(unsafe_code)]

pub mod bitbuffer;
pub mod bytes;
pub mod error;
pub mod format;
pub mod gf;
pub mod helper;
pub mod mask;
pub mod matrix;
pub mod options;
pub mod polynomial;
pub mod qrcode;
pub mod rs;
mod tables;

pub use error::QrError;
pub use helper::{Framebuffer, RasterTarget};
pub use mask::Mask;
pub use matrix::{Module, ModuleMatrix};
pub use options::{CapacityPolicy, RenderOptions};
pub use qrcode::{QrCode, QrCodeEcc, Version};

use tracing::debug;

/// Encodes `text` and paints the symbol onto `target`.
///
/// `text` is taken in its string form, so numbers and other `Display` values work too; an
/// empty string is valid. The target is resized to `options.size` square and fully
/// overwritten: white background, black modules, no antialiasing.
///
/// # Errors
///
/// - [`QrError::InvalidSize`] if `options.size` is below 48.
/// - [`QrError::InvalidTarget`] if the target cannot take the requested size.
/// - [`QrError::CapacityExceeded`] if the text does not fit and `options.capacity` is
///   [`CapacityPolicy::Reject`].
pub fn encode_and_render<T, S>(target: &mut T, text: &S, options: &RenderOptions) -> Result<(), QrError>
where
    T: RasterTarget + ?Sized,
    S: ToString + ?Sized,
{
    options.validate()?;
    let text = text.to_string();
    let qr = QrCode::encode_text(&text, options.level, options.capacity)?;
    debug!(
        version = qr.version().value(),
        mask = qr.mask().value(),
        size = options.size,
        margin = options.margin,
        "rendering symbol"
    );
    helper::paint(target, &qr, options)
}
