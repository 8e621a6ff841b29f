//! Giffer turns an ordered list of encoded still images into one animated GIF.
//!
//! # Pipeline overview
//!
//! 1. **Convert** (per input, concurrently): `bytes -> IndexedFrame` via [`FrameConverter`].
//!    The source format is detected from content, then reduced to a 256-color palette.
//! 2. **Gather**: every task writes into the slot fixed by its input position, so frame order
//!    never depends on which task finishes first. One failed frame fails the whole batch.
//! 3. **Assemble**: `Animation -> GIF bytes` via [`assemble_gif`].
//!
//! Everything happens in memory; file and CLI handling live in the `giffer` binary.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod convert;
mod encode;
mod foundation;
mod pipeline;

pub use config::options::{ConvertThreading, GifferOptions};
pub use convert::frame::{
    FrameConverter, IndexedFrame, PaletteConverter, decode_image, quantize_frame,
};
pub use encode::assemble::{Animation, assemble_gif};
pub use foundation::core::{DEFAULT_FRAME_DELAY_CS, FrameIndex, LoopCount};
pub use foundation::error::{GifferError, GifferResult};
pub use pipeline::orchestrate::{Giffer, encode_gif};
