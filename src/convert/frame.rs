use crate::foundation::{
    core::FrameIndex,
    error::{GifferError, GifferResult},
};

/// Fixed-palette raster frame ready to be placed into a GIF.
///
/// `palette` holds packed RGB triplets (at most 256 entries) and `indices` holds one palette
/// index per pixel in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedFrame {
    /// Input position this frame was converted from.
    pub index: FrameIndex,
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
    /// Packed RGB color table.
    pub palette: Vec<u8>,
    /// One palette index per pixel.
    pub indices: Vec<u8>,
    /// Palette index that renders as fully transparent, if any.
    pub transparent: Option<u8>,
    /// Format the source buffer was detected as.
    pub source_format: image::ImageFormat,
}

impl IndexedFrame {
    /// Number of palette entries.
    pub fn color_count(&self) -> usize {
        self.palette.len() / 3
    }

    /// RGB color of the pixel at `(x, y)`, resolved through the palette.
    pub fn rgb_at(&self, x: u16, y: u16) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let pos = usize::from(y) * usize::from(self.width) + usize::from(x);
        let idx = usize::from(*self.indices.get(pos)?);
        let rgb = self.palette.get(idx * 3..idx * 3 + 3)?;
        Some([rgb[0], rgb[1], rgb[2]])
    }
}

/// Converts one encoded still image into one indexed frame.
///
/// Implementations must be pure functions of their input: the orchestrator calls them from many
/// worker threads at once and relies on identical input producing identical output.
pub trait FrameConverter: Sync {
    /// Convert the image at input position `index`.
    fn convert(&self, index: FrameIndex, bytes: &[u8]) -> GifferResult<IndexedFrame>;
}

/// Default converter: `image` for decoding, `gif` for palette reduction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteConverter {
    /// NeuQuant sampling speed, `1..=30`. Only consulted for frames above 256 colors.
    pub speed: i32,
}

impl PaletteConverter {
    /// Slowest, most accurate quantizer speed.
    pub const MIN_SPEED: i32 = 1;
    /// Fastest quantizer speed.
    pub const MAX_SPEED: i32 = 30;

    /// Create a converter, rejecting speeds outside `MIN_SPEED..=MAX_SPEED`.
    pub fn new(speed: i32) -> GifferResult<Self> {
        if !(Self::MIN_SPEED..=Self::MAX_SPEED).contains(&speed) {
            return Err(GifferError::validation(format!(
                "quantize speed must be in {}..={}, got {speed}",
                Self::MIN_SPEED,
                Self::MAX_SPEED
            )));
        }
        Ok(Self { speed })
    }
}

impl Default for PaletteConverter {
    fn default() -> Self {
        Self { speed: 10 }
    }
}

impl FrameConverter for PaletteConverter {
    fn convert(&self, index: FrameIndex, bytes: &[u8]) -> GifferResult<IndexedFrame> {
        let (decoded, format) = decode_image(index, bytes)?;
        quantize_frame(index, decoded, format, self.speed)
    }
}

/// Decode a buffer whose format is detected from its content, not from any file name.
pub fn decode_image(
    index: FrameIndex,
    bytes: &[u8],
) -> GifferResult<(image::DynamicImage, image::ImageFormat)> {
    let format = image::guess_format(bytes).map_err(|e| GifferError::decode(index.0, None, e))?;
    let decoded = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| GifferError::decode(index.0, Some(format), e))?;
    tracing::debug!(
        frame = index.0,
        ?format,
        width = decoded.width(),
        height = decoded.height(),
        "decoded input image"
    );
    Ok((decoded, format))
}

/// Reduce a decoded image to at most 256 colors.
///
/// Frames with no more than 256 distinct colors keep their exact colors; denser frames go
/// through NeuQuant. Both paths are deterministic.
pub fn quantize_frame(
    index: FrameIndex,
    decoded: image::DynamicImage,
    source_format: image::ImageFormat,
    speed: i32,
) -> GifferResult<IndexedFrame> {
    let speed = speed.clamp(PaletteConverter::MIN_SPEED, PaletteConverter::MAX_SPEED);
    let rgba = decoded.into_rgba8();
    let (width, height) = rgba.dimensions();
    let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
        return Err(GifferError::quantize(
            index.0,
            format!(
                "{width}x{height} exceeds the GIF frame limit of {max}x{max}",
                max = u16::MAX
            ),
        ));
    };

    let mut pixels = rgba.into_raw();
    // The quantizer only treats one alpha-0 color as transparent.
    for px in pixels.chunks_exact_mut(4) {
        if px[3] == 0 {
            px.copy_from_slice(&[0, 0, 0, 0]);
        }
    }
    let frame = gif::Frame::from_rgba_speed(w, h, &mut pixels, speed);
    let palette = frame
        .palette
        .ok_or_else(|| GifferError::quantize(index.0, "quantizer produced no palette"))?;

    Ok(IndexedFrame {
        index,
        width: frame.width,
        height: frame.height,
        palette,
        indices: frame.buffer.into_owned(),
        transparent: frame.transparent,
        source_format,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/convert/frame.rs"]
mod tests;
