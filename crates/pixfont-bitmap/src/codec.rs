//! PNG boundary codec
//!
//! Glyphs live on disk as RGBA PNG files. Decoding keeps only one bit per
//! pixel: a pixel is ink when its alpha is above 127, whatever its color.
//! Encoding paints ink fully opaque in a single ink color and leaves
//! everything else fully transparent, so `decode(encode(b)) == b` always.
//!
//! The extended variant adds a third state. Opaque pure magenta pixels are
//! "reserved" background: they decode into a separate mask layer instead of
//! ink and are written back as magenta.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{BitmapError, Result};
use crate::MonoBitmap;

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Rgb {
    type Err = BitmapError;

    /// Parses `RRGGBB`, with or without a leading `#`
    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        let invalid = || BitmapError::InvalidArgument(format!("not an RRGGBB color: '{s}'"));
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// The reserved color marking mask cells in the extended encoding
pub const MASK_COLOR: Rgb = Rgb::new(255, 0, 255);

/// Ink layer plus the optional reserved-background layer of one glyph image
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlyphRaster {
    pub bitmap: MonoBitmap,
    /// Same size as `bitmap`; `None` when the image has no reserved cells
    pub mask: Option<MonoBitmap>,
}

impl GlyphRaster {
    /// Reads a PNG file with the extended decoder
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raster = decode_png_with_mask(&fs::read(path)?)?;
        log::debug!(
            "Decoded '{}' ({}x{}, mask: {})",
            path.display(),
            raster.bitmap.width(),
            raster.bitmap.height(),
            raster.mask.is_some()
        );
        Ok(raster)
    }

    /// Writes a PNG file with the extended encoder
    pub fn save(&self, path: impl AsRef<Path>, color: Rgb) -> Result<()> {
        let path = path.as_ref();
        let data = encode_png_with_mask(&self.bitmap, self.mask.as_ref(), color)?;
        fs::write(path, &data)?;
        log::debug!("Encoded '{}' ({} bytes)", path.display(), data.len());
        Ok(())
    }
}

impl MonoBitmap {
    /// Reads a PNG file; every pixel with alpha above 127 becomes ink
    pub fn load_png(path: impl AsRef<Path>) -> Result<Self> {
        decode_png(&fs::read(path.as_ref())?)
    }

    /// Writes the bitmap as an RGBA PNG with ink in `color`
    pub fn save_png(&self, path: impl AsRef<Path>, color: Rgb) -> Result<()> {
        let path = path.as_ref();
        let data = encode_png(self, color)?;
        fs::write(path, &data)?;
        log::debug!("Encoded '{}' ({} bytes)", path.display(), data.len());
        Ok(())
    }
}

/// Decodes PNG bytes into a bitmap, ignoring color channels
pub fn decode_png(data: &[u8]) -> Result<MonoBitmap> {
    let image = decode_rgba(data)?;
    let mut bitmap = MonoBitmap::create(image.width, image.height, false);
    for (index, pixel) in image.pixels.iter().enumerate() {
        if pixel[3] > 127 {
            bitmap.set(
                (index % image.width) as i32,
                (index / image.width) as i32,
                true,
            );
        }
    }
    Ok(bitmap)
}

/// Decodes PNG bytes, separating opaque magenta pixels into a mask layer
pub fn decode_png_with_mask(data: &[u8]) -> Result<GlyphRaster> {
    let image = decode_rgba(data)?;
    let mut bitmap = MonoBitmap::create(image.width, image.height, false);
    let mut mask = MonoBitmap::create(image.width, image.height, false);
    for (index, pixel) in image.pixels.iter().enumerate() {
        if pixel[3] <= 127 {
            continue;
        }
        let (x, y) = ((index % image.width) as i32, (index / image.width) as i32);
        if Rgb::new(pixel[0], pixel[1], pixel[2]) == MASK_COLOR {
            mask.set(x, y, true);
        } else {
            bitmap.set(x, y, true);
        }
    }
    let mask = mask.has_ink().then_some(mask);
    Ok(GlyphRaster { bitmap, mask })
}

/// Encodes a bitmap as an 8-bit RGBA PNG
pub fn encode_png(bitmap: &MonoBitmap, color: Rgb) -> Result<Vec<u8>> {
    encode_png_with_mask(bitmap, None, color)
}

/// Encodes a bitmap plus optional mask layer as an 8-bit RGBA PNG
///
/// Ink wins over mask where both are set. Encoder settings are fixed, so
/// equal inputs always produce identical bytes.
pub fn encode_png_with_mask(
    bitmap: &MonoBitmap,
    mask: Option<&MonoBitmap>,
    color: Rgb,
) -> Result<Vec<u8>> {
    if let Some(mask) = mask {
        if mask.width() != bitmap.width() || mask.height() != bitmap.height() {
            return Err(BitmapError::MaskMismatch {
                width: bitmap.width(),
                height: bitmap.height(),
                mask_width: mask.width(),
                mask_height: mask.height(),
            });
        }
    }

    let width = u32::try_from(bitmap.width()).ok();
    let height = u32::try_from(bitmap.height()).ok();
    let (width, height) = match (width, height) {
        (Some(width), Some(height)) if width > 0 && height > 0 => (width, height),
        _ => {
            return Err(BitmapError::InvalidDimensions {
                width: bitmap.width() as i64,
                height: bitmap.height() as i64,
            })
        },
    };

    let mut rgba = Vec::with_capacity(bitmap.width() * bitmap.height() * 4);
    for (y, row) in bitmap.rows().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            let reserved = mask.is_some_and(|mask| mask.is_ink(x as i32, y as i32));
            let pixel = if cell != 0 {
                [color.r, color.g, color.b, 255]
            } else if reserved {
                [MASK_COLOR.r, MASK_COLOR.g, MASK_COLOR.b, 255]
            } else {
                [color.r, color.g, color.b, 0]
            };
            rgba.extend_from_slice(&pixel);
        }
    }

    let mut png_data = Vec::new();
    let mut encoder = png::Encoder::new(&mut png_data, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder
        .write_header()
        .map_err(|e| BitmapError::PngEncode(e.to_string()))?;
    writer
        .write_image_data(&rgba)
        .map_err(|e| BitmapError::PngEncode(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| BitmapError::PngEncode(e.to_string()))?;

    Ok(png_data)
}

struct RgbaImage {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 4]>,
}

/// Decodes any PNG into straight 8-bit RGBA pixels
fn decode_rgba(data: &[u8]) -> Result<RgbaImage> {
    let mut decoder = png::Decoder::new(data);
    // Palette, low-bit gray and tRNS become plain 8-bit channels
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| BitmapError::PngDecode(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| BitmapError::PngDecode(e.to_string()))?;

    let width = info.width as usize;
    let height = info.height as usize;
    let channels = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        png::ColorType::Indexed => {
            return Err(BitmapError::PngDecode(
                "indexed image was not expanded".into(),
            ))
        },
    };

    let mut pixels = Vec::with_capacity(width * height);
    for line in buf.chunks(info.line_size).take(height) {
        for chunk in line.chunks_exact(channels).take(width) {
            let pixel = match *chunk {
                [gray] => [gray, gray, gray, 255],
                [gray, alpha] => [gray, gray, gray, alpha],
                [r, g, b] => [r, g, b, 255],
                [r, g, b, a] => [r, g, b, a],
                _ => continue,
            };
            pixels.push(pixel);
        }
    }

    if pixels.len() != width * height {
        return Err(BitmapError::PngDecode(format!(
            "expected {} pixels for {}x{}, got {}",
            width * height,
            width,
            height,
            pixels.len()
        )));
    }

    Ok(RgbaImage {
        width,
        height,
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph() -> MonoBitmap {
        MonoBitmap::from_rows(&[[0u8, 1, 0], [1, 1, 1], [0, 1, 0], [1, 0, 1]]).unwrap()
    }

    #[test]
    fn test_rgb_parse_and_display() {
        assert_eq!("ff0000".parse::<Rgb>().unwrap(), Rgb::new(255, 0, 0));
        assert_eq!("#00FF7f".parse::<Rgb>().unwrap(), Rgb::new(0, 255, 127));
        assert_eq!(Rgb::new(1, 2, 255).to_string(), "0102FF");
        assert!("12345".parse::<Rgb>().is_err());
        assert!("zzzzzz".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_round_trip() {
        let data = encode_png(&glyph(), Rgb::BLACK).unwrap();
        assert_eq!(decode_png(&data).unwrap(), glyph());
    }

    #[test]
    fn test_ink_color_does_not_matter_on_decode() {
        let black = encode_png(&glyph(), Rgb::BLACK).unwrap();
        let red = encode_png(&glyph(), Rgb::new(255, 0, 0)).unwrap();
        assert_ne!(black, red);
        assert_eq!(decode_png(&black).unwrap(), decode_png(&red).unwrap());
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let first = encode_png(&glyph(), Rgb::BLACK).unwrap();
        let reencoded = encode_png(&decode_png(&first).unwrap(), Rgb::BLACK).unwrap();
        assert_eq!(first, reencoded);
    }

    #[test]
    fn test_mask_round_trip() {
        let mask = MonoBitmap::from_rows(&[[1u8, 0, 0], [0, 0, 0], [0, 0, 1], [0, 0, 0]]).unwrap();
        let data = encode_png_with_mask(&glyph(), Some(&mask), Rgb::BLACK).unwrap();

        let raster = decode_png_with_mask(&data).unwrap();
        assert_eq!(raster.bitmap, glyph());
        assert_eq!(raster.mask, Some(mask));

        // The basic decoder sees reserved cells as ink
        let basic = decode_png(&data).unwrap();
        assert!(basic.is_ink(0, 0));
        assert!(basic.is_ink(2, 2));
    }

    #[test]
    fn test_mask_absent_when_no_reserved_cells() {
        let data = encode_png(&glyph(), Rgb::BLACK).unwrap();
        assert_eq!(decode_png_with_mask(&data).unwrap().mask, None);
    }

    #[test]
    fn test_mask_size_must_match() {
        let mask = MonoBitmap::create(2, 2, false);
        assert!(matches!(
            encode_png_with_mask(&glyph(), Some(&mask), Rgb::BLACK),
            Err(BitmapError::MaskMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_bitmap_cannot_be_encoded() {
        assert!(matches!(
            encode_png(&MonoBitmap::create(0, 3, false), Rgb::BLACK),
            Err(BitmapError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_grayscale_source_is_fully_opaque() {
        let mut data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut data, 2, 1);
            encoder.set_color(png::ColorType::Grayscale);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0, 255]).unwrap();
        }
        assert_eq!(
            decode_png(&data).unwrap(),
            MonoBitmap::create(2, 1, true)
        );
    }

    #[test]
    fn test_file_wrappers() {
        let dir = tempfile::TempDir::new().unwrap();
        let plain = dir.path().join("plain.png");
        glyph().save_png(&plain, Rgb::new(0, 0, 255)).unwrap();
        assert_eq!(MonoBitmap::load_png(&plain).unwrap(), glyph());

        let masked = dir.path().join("masked.png");
        let raster = GlyphRaster {
            bitmap: glyph(),
            mask: Some(MonoBitmap::from_rows(&[[1u8, 0, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0]]).unwrap()),
        };
        raster.save(&masked, Rgb::BLACK).unwrap();
        assert_eq!(GlyphRaster::load(&masked).unwrap(), raster);

        assert!(matches!(
            MonoBitmap::load_png(dir.path().join("missing.png")),
            Err(BitmapError::Io(_))
        ));
    }

    #[test]
    fn test_garbage_is_a_decode_error() {
        assert!(matches!(
            decode_png(b"not a png"),
            Err(BitmapError::PngDecode(_))
        ));
    }
}
