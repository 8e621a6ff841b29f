use std::sync::{
    Mutex, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

use rayon::prelude::*;

use crate::{
    config::options::GifferOptions,
    convert::frame::{FrameConverter, IndexedFrame, PaletteConverter},
    encode::assemble::{Animation, assemble_gif},
    foundation::{
        core::FrameIndex,
        error::{GifferError, GifferResult},
    },
};

/// Converts an ordered list of encoded still images into one animated GIF.
///
/// Each input is converted on its own rayon task. Results land in a slot fixed by input position,
/// so frame order in the output always matches input order no matter which task finishes first.
/// Any failed frame fails the whole batch; when several fail, the lowest input index wins.
///
/// ```no_run
/// let inputs: Vec<Vec<u8>> = vec![std::fs::read("a.png")?, std::fs::read("b.jpg")?];
/// let gif = giffer::Giffer::new(giffer::GifferOptions::default())?.encode(&inputs)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Giffer<C = PaletteConverter> {
    options: GifferOptions,
    converter: C,
}

impl Giffer<PaletteConverter> {
    /// Create a converter pipeline using [`PaletteConverter`].
    pub fn new(options: GifferOptions) -> GifferResult<Self> {
        let converter = PaletteConverter::new(options.quantize_speed)?;
        Self::with_converter(options, converter)
    }
}

impl<C: FrameConverter> Giffer<C> {
    /// Create a pipeline with a custom [`FrameConverter`].
    pub fn with_converter(options: GifferOptions, converter: C) -> GifferResult<Self> {
        options.validate()?;
        Ok(Self { options, converter })
    }

    /// Options this pipeline was built with.
    pub fn options(&self) -> &GifferOptions {
        &self.options
    }

    /// Convert and assemble in one step.
    pub fn encode<B>(&self, inputs: &[B]) -> GifferResult<Vec<u8>>
    where
        B: AsRef<[u8]> + Sync,
    {
        let anim = self.convert_frames(inputs)?;
        assemble_gif(&anim)
    }

    /// Convert every input concurrently and gather the frames in input order.
    ///
    /// All tasks run to completion before this returns (unless fail-fast skips some). Nothing
    /// partially converted is ever returned.
    #[tracing::instrument(skip(self, inputs), fields(frames = inputs.len()))]
    pub fn convert_frames<B>(&self, inputs: &[B]) -> GifferResult<Animation>
    where
        B: AsRef<[u8]> + Sync,
    {
        let len = inputs.len();
        let mut slots: Vec<Option<IndexedFrame>> = vec![None; len];
        let mut delays = vec![0u16; len];
        let failure = FirstFailure::new();
        let fail_fast = self.options.threading.fail_fast;
        let delay_cs = self.options.delay_cs;

        let pool = build_thread_pool(self.options.threading.threads)?;
        pool.install(|| {
            slots
                .par_iter_mut()
                .zip(delays.par_iter_mut())
                .enumerate()
                .for_each(|(i, (slot, delay))| {
                    if fail_fast && failure.precedes(i) {
                        tracing::debug!(frame = i, "skipping frame after earlier failure");
                        return;
                    }
                    match self.converter.convert(FrameIndex(i), inputs[i].as_ref()) {
                        Ok(frame) => {
                            *slot = Some(frame);
                            *delay = delay_cs;
                        }
                        Err(err) => {
                            tracing::warn!(frame = i, error = %err, "frame conversion failed");
                            failure.record(i, err);
                        }
                    }
                });
        });

        if let Some((_, err)) = failure.into_inner() {
            return Err(err);
        }

        let frames = slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| {
                slot.ok_or_else(|| {
                    GifferError::validation(format!("internal error: frame slot {i} left empty"))
                })
            })
            .collect::<GifferResult<Vec<_>>>()?;

        tracing::debug!(frames = frames.len(), "all frames converted");
        Ok(Animation {
            frames,
            delays,
            loop_count: self.options.loop_count,
        })
    }
}

/// Convert `inputs` with default options: 8cs per frame, looping forever.
pub fn encode_gif<B>(inputs: &[B]) -> GifferResult<Vec<u8>>
where
    B: AsRef<[u8]> + Sync,
{
    Giffer::new(GifferOptions::default())?.encode(inputs)
}

/// Holds the error of the lowest-indexed failed frame.
///
/// `lowest` mirrors the index held in `slot` so workers can check it without taking the lock.
struct FirstFailure {
    lowest: AtomicUsize,
    slot: Mutex<Option<(usize, GifferError)>>,
}

impl FirstFailure {
    fn new() -> Self {
        Self {
            lowest: AtomicUsize::new(usize::MAX),
            slot: Mutex::new(None),
        }
    }

    fn record(&self, index: usize, err: GifferError) {
        self.lowest.fetch_min(index, Ordering::AcqRel);
        let mut guard = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some((held, _)) if *held <= index => {}
            _ => *guard = Some((index, err)),
        }
    }

    /// Whether a frame positioned before `index` has already failed.
    fn precedes(&self, index: usize) -> bool {
        self.lowest.load(Ordering::Acquire) < index
    }

    fn into_inner(self) -> Option<(usize, GifferError)> {
        self.slot
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn build_thread_pool(threads: Option<usize>) -> GifferResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(GifferError::validation(
            "threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("giffer-{i}"));
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| GifferError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/orchestrate.rs"]
mod tests;
