use crate::error::QrError;
use crate::options::RenderOptions;
use crate::qrcode::QrCode;

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, ImageBuffer, Luma, RgbImage, RgbaImage};
use std::fs;
use std::path::Path;

const DARK: u8 = 0;
const LIGHT: u8 = 255;

/*---- Raster targets ----*/

/// A surface the encoder can paint a symbol onto.
pub trait RasterTarget {
    /// Current width and height in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Resizes the surface to `width` x `height`. Its previous contents are not kept.
    ///
    /// Returns [`QrError::InvalidTarget`] when the surface cannot be given that size.
    fn resize(&mut self, width: u32, height: u32) -> Result<(), QrError>;

    /// Writes one pixel as a gray level (0 is black).
    fn put_pixel(&mut self, x: u32, y: u32, luma: u8);
}

impl RasterTarget for GrayImage {
    fn dimensions(&self) -> (u32, u32) {
        ImageBuffer::dimensions(self)
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), QrError> {
        *self = GrayImage::new(width, height);
        Ok(())
    }

    fn put_pixel(&mut self, x: u32, y: u32, luma: u8) {
        ImageBuffer::put_pixel(self, x, y, Luma([luma]));
    }
}

impl RasterTarget for RgbImage {
    fn dimensions(&self) -> (u32, u32) {
        ImageBuffer::dimensions(self)
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), QrError> {
        *self = RgbImage::new(width, height);
        Ok(())
    }

    fn put_pixel(&mut self, x: u32, y: u32, luma: u8) {
        ImageBuffer::put_pixel(self, x, y, image::Rgb([luma, luma, luma]));
    }
}

impl RasterTarget for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        ImageBuffer::dimensions(self)
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), QrError> {
        *self = RgbaImage::new(width, height);
        Ok(())
    }

    fn put_pixel(&mut self, x: u32, y: u32, luma: u8) {
        ImageBuffer::put_pixel(self, x, y, image::Rgba([luma, luma, luma, 255]));
    }
}

/// Painting a `DynamicImage` turns it into an 8-bit grayscale image.
impl RasterTarget for DynamicImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), QrError> {
        *self = DynamicImage::ImageLuma8(GrayImage::new(width, height));
        Ok(())
    }

    fn put_pixel(&mut self, x: u32, y: u32, luma: u8) {
        if let DynamicImage::ImageLuma8(img) = self {
            img.put_pixel(x, y, Luma([luma]));
        }
    }
}

/// An 8-bit grayscale surface over memory owned by someone else, such as a
/// display framebuffer. It cannot grow: resizing beyond its backing slice fails.
#[derive(Debug)]
pub struct Framebuffer<'a> {
    pixels: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> Framebuffer<'a> {
    pub fn new(pixels: &'a mut [u8], width: u32, height: u32) -> Result<Self, QrError> {
        check_fits(pixels.len(), width, height)?;
        Ok(Self { pixels, width, height })
    }

    /// The row-major pixels currently in use.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels[..self.width as usize * self.height as usize]
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> u8 {
        self.pixels[y as usize * self.width as usize + x as usize]
    }
}

impl RasterTarget for Framebuffer<'_> {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), QrError> {
        check_fits(self.pixels.len(), width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn put_pixel(&mut self, x: u32, y: u32, luma: u8) {
        let index = y as usize * self.width as usize + x as usize;
        self.pixels[index] = luma;
    }
}

fn check_fits(len: usize, width: u32, height: u32) -> Result<(), QrError> {
    let needed = (width as usize).checked_mul(height as usize);
    match needed {
        Some(n) if n <= len => Ok(()),
        _ => Err(QrError::InvalidTarget(format!(
            "{}x{} pixels do not fit in a buffer of {} bytes",
            width, height, len
        ))),
    }
}

/*---- Rasterizing ----*/

/// Rasterizes `qr` at one pixel per module with `margin` light modules around it.
pub fn to_image(qr: &QrCode, margin: u32) -> GrayImage {
    let border = margin as i32;
    let size = qr.size() as u32 + 2 * margin;
    let mut img = ImageBuffer::from_pixel(size, size, Luma([LIGHT]));

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let qr_x = x as i32 - border;
        let qr_y = y as i32 - border;
        if qr.get_module(qr_x, qr_y) {
            *pixel = Luma([DARK]);
        }
    }

    img
}

/// Rasterizes `qr` into a `size` x `size` image. The one-pixel-per-module image is scaled
/// once with nearest-neighbour sampling when it does not already have that size.
pub fn render(qr: &QrCode, size: u32, margin: u32) -> GrayImage {
    let raw = to_image(qr, margin);
    if raw.width() == size {
        return raw;
    }
    imageops::resize(&raw, size, size, FilterType::Nearest)
}

/// Resizes `target` to `size` x `size` and paints `qr` onto it.
pub fn paint<T: RasterTarget + ?Sized>(
    target: &mut T,
    qr: &QrCode,
    options: &RenderOptions,
) -> Result<(), QrError> {
    options.validate()?;
    let img = render(qr, options.size, options.margin);
    target.resize(options.size, options.size)?;
    for (x, y, pixel) in img.enumerate_pixels() {
        target.put_pixel(x, y, pixel.0[0]);
    }
    Ok(())
}

/*---- Other outputs ----*/

// Returns a string of SVG code for an image depicting
// the given QR Code, with the given number of border modules.
// The string always uses Unix newlines (\n), regardless of the platform.
pub fn to_svg_string(qr: &QrCode, border: u32) -> String {
    let border = border as i32;
    let mut result = String::new();
    result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
    result += "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n";
    let dimension = qr.size() + border * 2;
    result += &format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" viewBox=\"0 0 {0} {0}\" stroke=\"none\">\n",
        dimension
    );
    result += "\t<rect width=\"100%\" height=\"100%\" fill=\"#FFFFFF\"/>\n";
    result += "\t<path d=\"";
    let mut first = true;
    for y in 0..qr.size() {
        for x in 0..qr.size() {
            if qr.get_module(x, y) {
                if !first {
                    result += " ";
                }
                first = false;
                result += &format!("M{},{}h1v1h-1z", x + border, y + border);
            }
        }
    }
    result += "\" fill=\"#000000\"/>\n";
    result += "</svg>\n";
    result
}

/// Draws `qr` with block characters, two per module so it looks square in a terminal.
pub fn to_text(qr: &QrCode, border: u32) -> String {
    let border = border as i32;
    let mut result = String::new();
    for y in -border..qr.size() + border {
        for x in -border..qr.size() + border {
            let c: char = if qr.get_module(x, y) { '█' } else { ' ' };
            result.push(c);
            result.push(c);
        }
        result.push('\n');
    }
    result
}

/// Renders `qr` with `options` and writes it to `path`; the format follows the extension.
/// Missing parent directories are created.
///
/// # Example
///
/// ```no_run
/// use qrpaint::helper::save_image;
/// use qrpaint::options::{CapacityPolicy, RenderOptions};
/// use qrpaint::qrcode::{QrCode, QrCodeEcc};
///
/// let qr = QrCode::encode_text("Hello, World!", QrCodeEcc::Low, CapacityPolicy::Clamp).unwrap();
/// save_image(&qr, "images/qr_code.png", &RenderOptions::default()).unwrap();
/// ```
pub fn save_image<P: AsRef<Path>>(qr: &QrCode, path: P, options: &RenderOptions) -> Result<(), QrError> {
    options.validate()?;
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)?;
        }
    }
    render(qr, options.size, options.margin).save(path)?;
    Ok(())
}
