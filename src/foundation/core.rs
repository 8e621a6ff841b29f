/// Display duration of every frame when nothing else is configured, in centiseconds.
pub const DEFAULT_FRAME_DELAY_CS: u16 = 8;

/// 0-based position of an input image, and of the frame derived from it.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub usize);

impl std::fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of times the animation replays. `0` loops forever.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct LoopCount(pub u16);

impl LoopCount {
    /// Loop forever.
    pub const INFINITE: Self = Self(0);

    /// Whether this count means "loop forever".
    pub fn is_infinite(self) -> bool {
        self.0 == 0
    }
}

impl From<LoopCount> for gif::Repeat {
    fn from(count: LoopCount) -> Self {
        if count.is_infinite() {
            gif::Repeat::Infinite
        } else {
            gif::Repeat::Finite(count.0)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
