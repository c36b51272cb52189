use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::errors::GenerationError;

pub const DEFAULT_TRUCK_COUNT: usize = 10;

/// Fixed, ordered set of truck identifiers used for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruckRoster {
    trucks: Vec<String>,
}

impl TruckRoster {
    /// `Truck1` through `Truck{count}`.
    pub fn numbered(count: usize) -> Result<Self, GenerationError> {
        if count == 0 {
            return Err(GenerationError::InvalidOptions(
                "truck roster needs at least one truck".to_string(),
            ));
        }
        Ok(Self {
            trucks: (1..=count).map(|n| format!("Truck{n}")).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.trucks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trucks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.trucks.get(index).map(String::as_str)
    }

    pub fn contains(&self, truck: &str) -> bool {
        self.trucks.iter().any(|candidate| candidate == truck)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.trucks.iter().map(String::as_str)
    }

    /// Truck chosen by `picker`; out-of-range indices wrap around.
    pub fn pick(&self, picker: &mut dyn TruckPicker) -> &str {
        let index = picker.pick_index(self.trucks.len()) % self.trucks.len();
        &self.trucks[index]
    }
}

impl Default for TruckRoster {
    fn default() -> Self {
        Self {
            trucks: (1..=DEFAULT_TRUCK_COUNT)
                .map(|n| format!("Truck{n}"))
                .collect(),
        }
    }
}

/// Source of truck assignments. Implementations must return an index in
/// `0..roster_len` for a non-empty roster.
pub trait TruckPicker {
    fn pick_index(&mut self, roster_len: usize) -> usize;
}

/// Uniform selection with replacement.
#[derive(Debug, Clone)]
pub struct RandomPicker<R> {
    rng: R,
}

impl<R: Rng> RandomPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomPicker<ChaCha8Rng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> TruckPicker for RandomPicker<R> {
    fn pick_index(&mut self, roster_len: usize) -> usize {
        if roster_len == 0 {
            return 0;
        }
        self.rng.random_range(0..roster_len)
    }
}

/// Replays a fixed index sequence, starting over when it runs out.
#[derive(Debug, Clone, Default)]
pub struct SequencePicker {
    indices: Vec<usize>,
    cursor: usize,
}

impl SequencePicker {
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            indices: indices.into_iter().collect(),
            cursor: 0,
        }
    }
}

impl TruckPicker for SequencePicker {
    fn pick_index(&mut self, roster_len: usize) -> usize {
        if self.indices.is_empty() || roster_len == 0 {
            return 0;
        }
        let index = self.indices[self.cursor % self.indices.len()];
        self.cursor = self.cursor.wrapping_add(1);
        index % roster_len
    }
}
