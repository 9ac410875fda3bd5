//! Seedable phrase picker backed by `rand`
//!
//! Production default for the [`PickerHandle`] capability. Phrase sampling
//! is the only nondeterminism in the engine, so the generator is injectable:
//! tests seed it (or swap in `FirstPicker`) to pin down exact wording.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sdk::capability::{PickerHandle, PickerImpl};
use std::sync::{Arc, Mutex};

/// Uniform picker over a `StdRng`
///
/// Thread-safe: the generator sits behind a mutex so one picker may be
/// shared by the transition, blending, and complexity components.
pub struct StdPicker {
    rng: Mutex<StdRng>,
}

impl StdPicker {
    /// Picker seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Picker with a fixed seed, for reproducible phrase selection
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Wrap a fresh entropy-seeded picker in a handle
    pub fn handle() -> PickerHandle {
        PickerHandle::new(Arc::new(Self::new()))
    }

    /// Wrap a fixed-seed picker in a handle
    pub fn seeded_handle(seed: u64) -> PickerHandle {
        PickerHandle::new(Arc::new(Self::seeded(seed)))
    }
}

impl Default for StdPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl PickerImpl for StdPicker {
    fn pick_index(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        // A poisoned lock still holds a valid generator; recover it
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        Some(rng.random_range(0..len))
    }
}
