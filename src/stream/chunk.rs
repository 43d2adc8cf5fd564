//! Chunk type handed to downstream consumers.

use serde::{Deserialize, Serialize};

/// A contiguous window of samples with its absolute start time.
///
/// Serializable so chunks can cross process boundaries (e.g. to an
/// out-of-process inference worker) as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Audio samples as 32-bit floats.
    pub samples: Vec<f32>,
    /// Absolute start time of the first sample, in seconds.
    pub start_time: f64,
}

impl Chunk {
    /// Creates a new chunk.
    pub fn new(samples: Vec<f32>, start_time: f64) -> Self {
        Self {
            samples,
            start_time,
        }
    }

    /// Number of samples in this chunk.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if this chunk holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration of this chunk in seconds.
    pub fn duration(&self, sample_rate: u32) -> f64 {
        self.samples.len() as f64 / sample_rate as f64
    }

    /// Absolute end time of this chunk, in seconds.
    pub fn end_time(&self, sample_rate: u32) -> f64 {
        self.start_time + self.duration(sample_rate)
    }

    /// Returns true if every sample is exactly zero (gap-fill or pre-seeded
    /// silence, not low-energy audio).
    pub fn is_silent(&self) -> bool {
        self.samples.iter().all(|s| *s == 0.0)
    }
}
