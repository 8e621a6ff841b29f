use std::borrow::Cow;

use crate::{
    convert::frame::IndexedFrame,
    foundation::{
        core::LoopCount,
        error::{GifferError, GifferResult},
    },
};

/// Ordered frames plus timing, ready for the container encoder.
///
/// `frames[i]` and `delays[i]` both belong to input position `i`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Animation {
    /// Frames in input order.
    pub frames: Vec<IndexedFrame>,
    /// Per-frame display duration in centiseconds.
    pub delays: Vec<u16>,
    /// Replay count written to the container.
    pub loop_count: LoopCount,
}

impl Animation {
    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether there are no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Check that delays line up with frames and frames sit at their input position.
    pub fn validate(&self) -> GifferResult<()> {
        if self.frames.len() != self.delays.len() {
            return Err(GifferError::validation(format!(
                "animation has {} frames but {} delays",
                self.frames.len(),
                self.delays.len()
            )));
        }
        for (pos, frame) in self.frames.iter().enumerate() {
            if frame.index.0 != pos {
                return Err(GifferError::validation(format!(
                    "frame at position {pos} belongs to input {}",
                    frame.index
                )));
            }
        }
        Ok(())
    }

    /// Logical screen size: large enough to hold every frame.
    pub fn screen_size(&self) -> (u16, u16) {
        self.frames
            .iter()
            .fold((0, 0), |(w, h), f| (w.max(f.width), h.max(f.height)))
    }
}

/// Encode an [`Animation`] as GIF bytes.
///
/// Encoder failures are returned as [`GifferError::Assembly`] without retry. A GIF cannot hold
/// zero images, so an empty animation yields [`GifferError::EmptyAnimation`].
pub fn assemble_gif(anim: &Animation) -> GifferResult<Vec<u8>> {
    anim.validate()?;
    if anim.is_empty() {
        return Err(GifferError::EmptyAnimation);
    }

    let (width, height) = anim.screen_size();
    tracing::debug!(width, height, frames = anim.len(), "assembling gif");

    let mut encoder = gif::Encoder::new(Vec::new(), width, height, &[])?;
    encoder.set_repeat(anim.loop_count.into())?;

    for (frame, &delay) in anim.frames.iter().zip(&anim.delays) {
        let out = gif::Frame {
            width: frame.width,
            height: frame.height,
            delay,
            dispose: gif::DisposalMethod::Any,
            transparent: frame.transparent,
            palette: Some(frame.palette.clone()),
            buffer: Cow::Borrowed(frame.indices.as_slice()),
            ..gif::Frame::default()
        };
        encoder.write_frame(&out)?;
    }

    let bytes = encoder.into_inner().map_err(gif::EncodingError::from)?;
    Ok(bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/assemble.rs"]
mod tests;
