//! Ordered, mutable effect chain with stable handles.
//!
//! Generalizes [`crate::EffectRegistry`]'s factory pattern into a live
//! sequence of boxed effects that a control thread can mutate (add, remove,
//! reorder, bypass) while the audio thread walks it block by block.

use parking_lot::Mutex;

use crate::{EffectRegistry, EffectTag, EffectWithParams};

/// Stable identity for a chain slot. Survives reordering — a `Handle` always
/// refers to the same effect instance until that instance is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(u32);

/// One effect instance owned by an [`EffectChain`].
struct ChainSlot {
    handle: Handle,
    tag: EffectTag,
    effect: Box<dyn EffectWithParams + Send>,
    enabled: bool,
    bypass: bool,
}

/// Ordered list of effects processed block by block.
///
/// `add`/`remove`/`move_to`/`clear` are structural mutations; under a real
/// audio callback they run behind a [`parking_lot::Mutex`] (see
/// [`SharedEffectChain`]) held only for the duration of the list traversal,
/// never during an individual effect's `process` call.
pub struct EffectChain {
    slots: Vec<ChainSlot>,
    next_handle: u32,
    buf_a: Vec<f32>,
    buf_b: Vec<f32>,
}

impl Default for EffectChain {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectChain {
    /// Create an empty chain with no preallocated scratch capacity.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            next_handle: 0,
            buf_a: Vec::new(),
            buf_b: Vec::new(),
        }
    }

    /// Construct an effect of the given tag via [`EffectRegistry`] and append
    /// it to the chain. Returns `None` only if the tag's registry id is
    /// somehow unregistered (should not happen for any [`EffectTag`] variant).
    pub fn add(&mut self, tag: EffectTag, sample_rate: f32) -> Option<Handle> {
        let registry = EffectRegistry::new();
        let effect = registry.create(tag.registry_id(), sample_rate)?;
        let handle = Handle(self.next_handle);
        self.next_handle += 1;
        self.slots.push(ChainSlot {
            handle,
            tag,
            effect,
            enabled: true,
            bypass: false,
        });
        Some(handle)
    }

    /// Remove the slot with the given handle, if present.
    pub fn remove(&mut self, handle: Handle) {
        self.slots.retain(|s| s.handle != handle);
    }

    /// Move the slot with the given handle to `position` (0 = head).
    /// `position` is clamped to the chain's length. No-op if the handle is
    /// unknown.
    pub fn move_to(&mut self, handle: Handle, position: usize) {
        let Some(idx) = self.slots.iter().position(|s| s.handle == handle) else {
            return;
        };
        let slot = self.slots.remove(idx);
        let position = position.min(self.slots.len());
        self.slots.insert(position, slot);
    }

    /// Find the handle of the first effect with the given tag.
    pub fn find(&self, tag: EffectTag) -> Option<Handle> {
        self.slots.iter().find(|s| s.tag == tag).map(|s| s.handle)
    }

    /// Remove every effect from the chain.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Number of effects currently in the chain.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if the chain has no effects.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Enable or disable the slot with the given handle. A disabled slot
    /// copies `in → out` unchanged.
    pub fn set_enabled(&mut self, handle: Handle, enabled: bool) {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.handle == handle) {
            slot.enabled = enabled;
        }
    }

    /// Bypass or un-bypass the slot with the given handle. Same `in → out`
    /// passthrough behavior as disabling, kept as a distinct flag so a UI can
    /// offer both "off" and "bypassed" states independently.
    pub fn set_bypass(&mut self, handle: Handle, bypass: bool) {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.handle == handle) {
            slot.bypass = bypass;
        }
    }

    /// Borrow the effect at `handle` for parameter access.
    pub fn effect_mut(&mut self, handle: Handle) -> Option<&mut (dyn EffectWithParams + Send)> {
        self.slots
            .iter_mut()
            .find(|s| s.handle == handle)
            .map(|s| s.effect.as_mut())
    }

    /// Ensure the ping-pong scratch buffers can hold at least `block_size`
    /// frames. Called at stream-open time, never from `process`.
    pub fn resize(&mut self, block_size: usize) {
        self.buf_a.resize(block_size, 0.0);
        self.buf_b.resize(block_size, 0.0);
    }

    /// Process `n` frames from `input` into `output`, running every
    /// non-disabled, non-bypassed effect in chain order.
    ///
    /// `input` and `output` may alias: an empty chain, or a chain of entirely
    /// disabled/bypassed effects, degrades to a straight copy.
    pub fn process(&mut self, input: &[f32], output: &mut [f32], n: usize) {
        let n = n.min(input.len()).min(output.len());

        if self.slots.is_empty() {
            output[..n].copy_from_slice(&input[..n]);
            return;
        }

        if self.buf_a.len() < n {
            self.buf_a.resize(n, 0.0);
            self.buf_b.resize(n, 0.0);
        }

        self.buf_a[..n].copy_from_slice(&input[..n]);
        let mut active_is_a = true;

        for slot in &mut self.slots {
            let (src, dst) = if active_is_a {
                let (a, b) = (&mut self.buf_a, &mut self.buf_b);
                (a, b)
            } else {
                let (b, a) = (&mut self.buf_b, &mut self.buf_a);
                (b, a)
            };

            if slot.enabled && !slot.bypass {
                slot.effect.process_block(&src[..n], &mut dst[..n]);
            } else {
                dst[..n].copy_from_slice(&src[..n]);
            }
            active_is_a = !active_is_a;
        }

        let result = if active_is_a { &self.buf_a } else { &self.buf_b };
        output[..n].copy_from_slice(&result[..n]);
    }
}

/// Thread-safe handle to an [`EffectChain`] shared between the control
/// thread and the audio callback.
///
/// Matches the mutex-around-the-vec mechanism documented for parameter
/// mutation elsewhere in the workspace: the audio thread locks only for the
/// duration of the list traversal inside [`EffectChain::process`], never
/// while an individual effect is mid-`process`.
pub struct SharedEffectChain {
    inner: Mutex<EffectChain>,
}

impl Default for SharedEffectChain {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedEffectChain {
    /// Wrap a new, empty chain in a mutex.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(EffectChain::new()),
        }
    }

    /// Lock the chain for a structural mutation or parameter edit.
    pub fn lock(&self) -> parking_lot::MutexGuard<'_, EffectChain> {
        self.inner.lock()
    }

    /// Process a block, locking only for the traversal itself.
    pub fn process(&self, input: &[f32], output: &mut [f32], n: usize) {
        self.inner.lock().process(input, output, n);
    }
}
