//! Timeline store: time-indexed sample buffer with eviction.
//!
//! A ring buffer of samples addressed by a logical sample index counted from
//! the stream start time. Eviction from the front only advances the index, so
//! no large-array shifting happens on the hot path. Indices may be negative
//! (pre-seeded silence, writes timestamped before the stream start).

use std::collections::VecDeque;

/// Ordered, time-indexed sample buffer with an explicit absolute-time origin.
#[derive(Debug)]
pub struct TimelineStore {
    samples: VecDeque<f32>,
    /// Logical index of the first stored sample, in samples from the stream start.
    start_index: i64,
    sample_rate: u32,
    stream_start_time: f64,
    capacity_samples: usize,
}

impl TimelineStore {
    pub fn new(sample_rate: u32, stream_start_time: f64, capacity_samples: usize) -> Self {
        Self {
            samples: VecDeque::new(),
            start_index: 0,
            sample_rate,
            stream_start_time,
            capacity_samples,
        }
    }

    /// Pre-seeds the store with `count` zero samples ending at the stream
    /// start. Only meaningful before the first write.
    pub fn preseed_silence(&mut self, count: usize) {
        debug_assert!(self.samples.is_empty());
        self.samples.extend(std::iter::repeat_n(0.0, count));
        self.start_index = -(count as i64);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Logical index of the first stored sample.
    pub fn start_index(&self) -> i64 {
        self.start_index
    }

    /// Logical index one past the last stored sample.
    pub fn end_index(&self) -> i64 {
        self.start_index + self.samples.len() as i64
    }

    /// Converts an absolute time to the nearest logical sample index.
    pub fn index_at(&self, time: f64) -> i64 {
        ((time - self.stream_start_time) * self.sample_rate as f64).round() as i64
    }

    /// Converts a logical sample index to absolute time.
    pub fn time_at(&self, index: i64) -> f64 {
        self.stream_start_time + index as f64 / self.sample_rate as f64
    }

    /// Absolute time of the first stored sample.
    pub fn buffer_start_time(&self) -> f64 {
        self.time_at(self.start_index)
    }

    /// Absolute time one sample past the last stored sample.
    pub fn buffer_end_time(&self) -> f64 {
        self.time_at(self.end_index())
    }

    /// Reconciles a write against the current extent and appends the samples
    /// at logical index `target`: a target past the end inserts gap-fill
    /// zeros, a target before the end rolls back (truncates) the stored
    /// suffix, a target at the end appends plainly. Capacity eviction then
    /// drops samples from the front.
    ///
    /// Returns the number of samples evicted.
    pub fn write(&mut self, samples: &[f32], target: i64) -> usize {
        let end = self.end_index();
        let mut evicted = 0;
        if target > end {
            let gap = (target - end) as usize;
            if gap >= self.capacity_samples {
                // The whole stored extent plus any bridging zeros would be
                // evicted below; skip materializing them.
                evicted = self.samples.len();
                self.samples.clear();
                self.start_index = target;
                let fill = self.capacity_samples.saturating_sub(samples.len());
                if fill > 0 {
                    self.samples.extend(std::iter::repeat_n(0.0, fill));
                    self.start_index = target - fill as i64;
                }
            } else {
                self.samples.extend(std::iter::repeat_n(0.0, gap));
            }
        } else if target < end {
            // Rollback: discard everything at or after the target.
            if target <= self.start_index {
                self.samples.clear();
                self.start_index = target;
            } else {
                self.samples.truncate((target - self.start_index) as usize);
            }
        }
        self.samples.extend(samples.iter().copied());

        let excess = self.samples.len().saturating_sub(self.capacity_samples);
        if excess > 0 {
            self.samples.drain(..excess);
            self.start_index += excess as i64;
        }
        evicted + excess
    }

    /// Copies out the `len` samples starting at logical index `from`.
    ///
    /// The caller must keep the range within the stored extent; extraction
    /// cursors are clamped on eviction to guarantee this.
    pub fn slice(&self, from: i64, len: usize) -> Vec<f32> {
        debug_assert!(from >= self.start_index);
        debug_assert!(from + len as i64 <= self.end_index());
        let offset = (from - self.start_index) as usize;
        self.samples.range(offset..offset + len).copied().collect()
    }

    /// Copies out the newest `count` samples.
    pub fn tail(&self, count: usize) -> Vec<f32> {
        debug_assert!(count <= self.samples.len());
        let offset = self.samples.len() - count;
        self.samples.range(offset..).copied().collect()
    }
}
