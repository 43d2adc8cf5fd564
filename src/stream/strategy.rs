//! Chunk extraction strategies.
//!
//! The extractor operates purely on the timeline store's current extent and
//! produces ready chunks in chronological order; it knows nothing about
//! delivery. Startup behavior is folded in here: WaitForFullChunk gates on
//! the buffered extent, StartSilent relies on the pre-seeded store, and
//! RampUpChunkSize grows the effective window one hop at a time.

use crate::config::{ChunkingStrategy, StartupStrategy, StreamConfig};
use crate::stream::chunk::Chunk;
use crate::stream::timeline::TimelineStore;

/// Stateful chunk extractor for one stream.
#[derive(Debug)]
pub(crate) struct Extractor {
    strategy: ChunkingStrategy,
    chunk_size: usize,
    hop_size: usize,
    /// FixedSkip: logical index of the next chunk start. Monotonically
    /// non-decreasing except for the eviction clamp.
    cursor: i64,
    /// Current window size in samples; `chunk_size` once ramped.
    effective_size: usize,
    /// True while RampUpChunkSize is still growing the window.
    ramping: bool,
}

impl Extractor {
    pub fn new(config: &StreamConfig, initial_cursor: i64) -> Self {
        let ramping = config.startup_strategy == StartupStrategy::RampUpChunkSize;
        Self {
            strategy: config.chunking_strategy,
            chunk_size: config.chunk_size(),
            hop_size: config.hop_size(),
            cursor: initial_cursor,
            effective_size: if ramping {
                config.hop_size()
            } else {
                config.chunk_size()
            },
            ramping,
        }
    }

    /// Clamps the cursor forward past evicted samples so no chunk references
    /// discarded data. Chunks that would have covered the evicted range are
    /// skipped entirely.
    pub fn clamp_cursor(&mut self, start_index: i64) {
        if self.cursor < start_index {
            self.cursor = start_index;
        }
    }

    /// Collects every chunk made ready by the latest write, oldest first.
    pub fn ready_chunks(&mut self, store: &TimelineStore) -> Vec<Chunk> {
        match self.strategy {
            ChunkingStrategy::MostRecent => self.most_recent(store).into_iter().collect(),
            ChunkingStrategy::FixedSkip => self.fixed_skip(store),
        }
    }

    /// The newest `effective_size` samples, or nothing while the startup
    /// policy is still withholding.
    fn most_recent(&mut self, store: &TimelineStore) -> Option<Chunk> {
        let size = self.effective_size;
        if store.len() < size {
            return None;
        }
        let start = store.end_index() - size as i64;
        let chunk = Chunk::new(store.tail(size), store.time_at(start));
        if self.ramping {
            if size >= self.chunk_size {
                self.ramping = false;
            } else {
                self.effective_size = (size + self.hop_size).min(self.chunk_size);
            }
        }
        Some(chunk)
    }

    /// Sequential windows advanced by the hop. One write may make zero, one,
    /// or many chunks ready (a large forward jump reconstructs every
    /// intervening window, zero-padded by the gap fill).
    fn fixed_skip(&mut self, store: &TimelineStore) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        loop {
            let size = self.effective_size;
            if self.cursor + size as i64 > store.end_index() {
                break;
            }
            chunks.push(Chunk::new(
                store.slice(self.cursor, size),
                store.time_at(self.cursor),
            ));
            if self.ramping && size < self.chunk_size {
                // Hold the start position while the window grows.
                self.effective_size = (size + self.hop_size).min(self.chunk_size);
            } else {
                self.ramping = false;
                self.cursor += self.hop_size as i64;
            }
        }
        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config(strategy: ChunkingStrategy, startup: StartupStrategy) -> StreamConfig {
        StreamConfig {
            chunk_duration: 0.01, // 10 samples at 1kHz
            chunk_skip: None,
            sample_rate: 1000,
            stream_start_time: 0.0,
            chunking_strategy: strategy,
            startup_strategy: startup,
            buffer_capacity_secs: 0.1,
        }
    }

    fn make_store(config: &StreamConfig) -> TimelineStore {
        TimelineStore::new(
            config.sample_rate,
            config.stream_start_time,
            config.capacity_samples(),
        )
    }

    #[test]
    fn test_most_recent_waits_for_full_chunk() {
        let config = make_config(ChunkingStrategy::MostRecent, StartupStrategy::WaitForFullChunk);
        let mut store = make_store(&config);
        let mut extractor = Extractor::new(&config, 0);

        store.write(&[1.0; 6], 0);
        assert!(extractor.ready_chunks(&store).is_empty());

        store.write(&[2.0; 6], store.end_index());
        let chunks = extractor.ready_chunks(&store);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), 10);
        assert_eq!(chunks[0].start_time, 0.002);
        assert_eq!(&chunks[0].samples[..4], &[1.0; 4]);
        assert_eq!(&chunks[0].samples[4..], &[2.0; 6]);
    }

    #[test]
    fn test_fixed_skip_emits_every_intervening_window() {
        let config = make_config(ChunkingStrategy::FixedSkip, StartupStrategy::WaitForFullChunk);
        let mut store = make_store(&config);
        let mut extractor = Extractor::new(&config, 0);

        store.write(&[1.0; 35], 0);
        let chunks = extractor.ready_chunks(&store);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].start_time, 0.0);
        assert_eq!(chunks[1].start_time, 0.01);
        assert_eq!(chunks[2].start_time, 0.02);

        // Nothing new until the partial tail fills up
        assert!(extractor.ready_chunks(&store).is_empty());
        store.write(&[2.0; 5], store.end_index());
        let chunks = extractor.ready_chunks(&store);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].start_time, 0.03);
    }

    #[test]
    fn test_fixed_skip_overlap() {
        let config = StreamConfig {
            chunk_skip: Some(0.004), // hop 4, overlap 6
            ..make_config(ChunkingStrategy::FixedSkip, StartupStrategy::WaitForFullChunk)
        };
        let mut store = make_store(&config);
        let mut extractor = Extractor::new(&config, 0);

        let samples: Vec<f32> = (0..30).map(|i| i as f32).collect();
        store.write(&samples, 0);
        let chunks = extractor.ready_chunks(&store);
        assert!(chunks.len() >= 2);
        for pair in chunks.windows(2) {
            assert_eq!(pair[0].samples[4..], pair[1].samples[..6]);
        }
    }

    #[test]
    fn test_cursor_clamp_skips_evicted_windows() {
        let config = make_config(ChunkingStrategy::FixedSkip, StartupStrategy::WaitForFullChunk);
        let mut store = make_store(&config);
        let mut extractor = Extractor::new(&config, 0);

        // 250 samples into a 100-sample store: 150 evicted before any read
        let evicted = store.write(&[1.0; 250], 0);
        assert_eq!(evicted, 150);
        extractor.clamp_cursor(store.start_index());

        let chunks = extractor.ready_chunks(&store);
        assert_eq!(chunks[0].start_time, 0.15);
        for pair in chunks.windows(2) {
            assert!(pair[1].start_time >= pair[0].start_time);
        }
    }

    #[test]
    fn test_ramp_up_grows_by_one_hop_per_chunk() {
        let config = StreamConfig {
            chunk_duration: 0.03, // 30 samples
            chunk_skip: Some(0.01), // hop 10
            ..make_config(ChunkingStrategy::FixedSkip, StartupStrategy::RampUpChunkSize)
        };
        let mut store = make_store(&config);
        let mut extractor = Extractor::new(&config, 0);

        store.write(&[1.0; 10], 0);
        let chunks = extractor.ready_chunks(&store);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), 10);
        assert_eq!(chunks[0].start_time, 0.0);

        store.write(&[2.0; 10], store.end_index());
        let chunks = extractor.ready_chunks(&store);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), 20);
        assert_eq!(chunks[0].start_time, 0.0);

        store.write(&[3.0; 10], store.end_index());
        let chunks = extractor.ready_chunks(&store);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), 30);
        assert_eq!(chunks[0].start_time, 0.0);

        // Ramped: back to fixed-size windows advancing by one hop
        store.write(&[4.0; 10], store.end_index());
        let chunks = extractor.ready_chunks(&store);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), 30);
        assert_eq!(chunks[0].start_time, 0.01);
    }

    #[test]
    fn test_ramp_up_single_large_write() {
        let config = StreamConfig {
            chunk_duration: 0.03,
            chunk_skip: Some(0.01),
            ..make_config(ChunkingStrategy::FixedSkip, StartupStrategy::RampUpChunkSize)
        };
        let mut store = make_store(&config);
        let mut extractor = Extractor::new(&config, 0);

        store.write(&[1.0; 50], 0);
        let chunks = extractor.ready_chunks(&store);
        let sizes: Vec<usize> = chunks.iter().map(Chunk::len).collect();
        assert_eq!(sizes, vec![10, 20, 30, 30, 30]);
        let starts: Vec<f64> = chunks.iter().map(|c| c.start_time).collect();
        assert_eq!(starts, vec![0.0, 0.0, 0.0, 0.01, 0.02]);
    }

    #[test]
    fn test_most_recent_ramp_up() {
        let config = StreamConfig {
            chunk_duration: 0.03,
            chunk_skip: Some(0.01),
            ..make_config(ChunkingStrategy::MostRecent, StartupStrategy::RampUpChunkSize)
        };
        let mut store = make_store(&config);
        let mut extractor = Extractor::new(&config, 0);

        store.write(&[1.0; 10], 0);
        let chunk = extractor.ready_chunks(&store).pop().unwrap();
        assert_eq!(chunk.len(), 10);
        assert_eq!(chunk.start_time, 0.0);

        store.write(&[2.0; 10], store.end_index());
        let chunk = extractor.ready_chunks(&store).pop().unwrap();
        assert_eq!(chunk.len(), 20);
        assert_eq!(chunk.start_time, 0.0);

        store.write(&[3.0; 10], store.end_index());
        let chunk = extractor.ready_chunks(&store).pop().unwrap();
        assert_eq!(chunk.len(), 30);
        assert_eq!(chunk.start_time, 0.0);

        store.write(&[4.0; 10], store.end_index());
        let chunk = extractor.ready_chunks(&store).pop().unwrap();
        assert_eq!(chunk.len(), 30);
        assert_eq!(chunk.start_time, 0.01);
    }

    #[test]
    fn test_start_silent_preseed_emits_immediately() {
        let config = make_config(ChunkingStrategy::FixedSkip, StartupStrategy::StartSilent);
        let mut store = make_store(&config);
        store.preseed_silence(config.chunk_size());
        let mut extractor = Extractor::new(&config, -(config.chunk_size() as i64));

        store.write(&[1.0; 5], 0);
        let chunks = extractor.ready_chunks(&store);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].start_time, -0.01);
        assert!(chunks[0].is_silent());

        // One hop of real data later the next window carries a real tail
        store.write(&[2.0; 5], store.end_index());
        let chunks = extractor.ready_chunks(&store);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].start_time, 0.0);
        assert_eq!(&chunks[0].samples[..5], &[1.0; 5]);
    }
}
