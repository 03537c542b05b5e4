//! Pre-allocated per-block scratch buffers shared by the effect chain.
//!
//! Every buffer an effect chain needs beyond its own owned state (deinterleave
//! targets, ping-pong targets, precomputed tables) comes from here. Buffers
//! are sized once, at stream-open time (`new`/`resize`), never inside
//! `process` — that's what makes the audio thread allocation-free.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

/// Number of scratch slots kept by a [`ScratchArena`].
///
/// Slot convention (mirrors the distilled layout):
/// - 0–1: I/O deinterleave/downmix targets
/// - 2–7: DSP primitive scratch (filter/delay temporaries)
/// - 8–19: effect-local temporaries
/// - 20–23: precomputed waveshaper tables' scratch
/// - 24–29: precomputed tube tables' scratch
/// - 30–31: chain ping-pong buffers
pub const SCRATCH_SLOTS: usize = 32;

/// A fixed pool of `block_size`-length scratch buffers.
///
/// `block(slot, n)` never allocates; `n` is clamped to `block_size` so a
/// caller requesting more frames than the arena was sized for gets silently
/// truncated rather than causing an out-of-bounds access.
#[derive(Debug, Clone)]
pub struct ScratchArena {
    slots: Vec<Vec<f32>>,
    block_size: usize,
}

impl ScratchArena {
    /// Creates an arena with `SCRATCH_SLOTS` buffers, each `block_size` long.
    pub fn new(block_size: usize) -> Self {
        Self {
            slots: (0..SCRATCH_SLOTS).map(|_| vec![0.0f32; block_size]).collect(),
            block_size,
        }
    }

    /// Grows every slot to accommodate at least `block_size` frames.
    ///
    /// Call only while the stream is stopped (control thread), never from
    /// the audio callback.
    pub fn resize(&mut self, block_size: usize) {
        self.block_size = block_size;
        for slot in self.slots.iter_mut() {
            slot.resize(block_size, 0.0);
        }
    }

    /// Returns a mutable view of `n` frames (clamped to `block_size`) from `slot`.
    #[inline]
    pub fn block(&mut self, slot: usize, n: usize) -> &mut [f32] {
        let n = n.min(self.block_size);
        &mut self.slots[slot][..n]
    }

    /// Zeroes the first `n` frames of `slot`.
    #[inline]
    pub fn clear(&mut self, slot: usize, n: usize) {
        for sample in self.block(slot, n).iter_mut() {
            *sample = 0.0;
        }
    }

    /// The block size this arena was sized for.
    pub fn block_size(&self) -> usize {
        self.block_size
    }
}
