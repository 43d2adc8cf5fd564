//! The chunked stream: write reconciliation, extraction, delivery.

use crate::config::{StartupStrategy, StreamConfig};
use crate::error::Result;
use crate::stream::chunk::Chunk;
use crate::stream::delivery::DeliveryController;
use crate::stream::strategy::Extractor;
use crate::stream::timeline::TimelineStore;

/// Streaming audio chunker.
///
/// Ingests timestamped `f32` samples through [`write`](Self::write) and emits
/// fixed-size (or ramping) chunks through either pull
/// ([`read_chunk_if_available`](Self::read_chunk_if_available)) or push
/// ([`bind`](Self::bind)) delivery. All state transitions happen
/// synchronously inside one `write` call; to share a stream across threads,
/// wrap it in a single mutex.
///
/// ```
/// use chunkstream::{ChunkedStream, StreamConfig};
///
/// let config = StreamConfig {
///     chunk_duration: 0.01,
///     sample_rate: 1000,
///     buffer_capacity_secs: 1.0,
///     ..Default::default()
/// };
/// let mut stream = ChunkedStream::new(config).unwrap();
/// stream.write(&[0.5; 25], None);
/// let chunk = stream.read_chunk_if_available().unwrap();
/// assert_eq!(chunk.samples.len(), stream.chunk_size());
/// assert_eq!(chunk.start_time, 0.0);
/// ```
#[derive(Debug)]
pub struct ChunkedStream {
    config: StreamConfig,
    store: TimelineStore,
    extractor: Extractor,
    delivery: DeliveryController,
}

impl ChunkedStream {
    /// Creates a stream from a validated configuration.
    ///
    /// Fails with [`ChunkStreamError::InvalidConfiguration`] when
    /// `chunk_duration` is not positive, `chunk_skip` is supplied outside
    /// `(0, chunk_duration)`, the sample rate is zero, or the buffer capacity
    /// does not exceed the chunk duration.
    ///
    /// [`ChunkStreamError::InvalidConfiguration`]: crate::ChunkStreamError::InvalidConfiguration
    pub fn new(config: StreamConfig) -> Result<Self> {
        config.validate()?;

        let mut store = TimelineStore::new(
            config.sample_rate,
            config.stream_start_time,
            config.capacity_samples(),
        );
        let mut initial_cursor = 0;
        if config.startup_strategy == StartupStrategy::StartSilent {
            // Conceptual silence before the stream start makes chunks
            // producible from the first write on.
            store.preseed_silence(config.chunk_size());
            initial_cursor = -(config.chunk_size() as i64);
        }

        Ok(Self {
            extractor: Extractor::new(&config, initial_cursor),
            delivery: DeliveryController::new(config.chunking_strategy),
            store,
            config,
        })
    }

    /// Appends samples at `at_time` (absolute seconds), or immediately after
    /// the last write when omitted.
    ///
    /// Timing anomalies are absorbed as defined behavior, never raised: a
    /// timestamp past the buffered end zero-fills the gap, an earlier
    /// timestamp rolls back (truncates) the not-yet-consumed suffix, and
    /// anything beyond the buffer capacity evicts the oldest samples. Every
    /// chunk made ready by the write is delivered (or queued) before this
    /// call returns.
    pub fn write(&mut self, samples: &[f32], at_time: Option<f64>) {
        let target = match at_time {
            Some(time) => self.store.index_at(time),
            None => self.store.end_index(),
        };
        self.store.write(samples, target);
        // No-op unless eviction moved the front past the cursor.
        self.extractor.clamp_cursor(self.store.start_index());
        let ready = self.extractor.ready_chunks(&self.store);
        self.delivery.dispatch(ready);
    }

    /// Pulls the next pending chunk, if any.
    ///
    /// Always returns `None` while a handler is bound: push and pull are
    /// mutually exclusive so a chunk can never be consumed twice.
    pub fn read_chunk_if_available(&mut self) -> Option<Chunk> {
        self.delivery.take()
    }

    /// Binds a push handler. Every chunk that becomes ready during a
    /// subsequent `write` is delivered synchronously, in chronological order,
    /// on the writer's call stack before `write` returns.
    ///
    /// Handlers must not re-enter the stream and should return quickly; they
    /// block the producer.
    pub fn bind<F>(&mut self, handler: F)
    where
        F: FnMut(Chunk) + Send + 'static,
    {
        self.delivery.bind(Box::new(handler));
    }

    /// Binds a handler that forwards every ready chunk into a channel.
    ///
    /// Sends are non-blocking; chunks are dropped if the channel is full or
    /// disconnected, keeping the write path non-failing.
    pub fn bind_channel(&mut self, sender: crossbeam_channel::Sender<Chunk>) {
        self.bind(move |chunk| {
            let _ = sender.try_send(chunk);
        });
    }

    /// Reverts to pull delivery, dropping the bound handler. Chunks queued
    /// before the bind remain available to
    /// [`read_chunk_if_available`](Self::read_chunk_if_available).
    pub fn unbind(&mut self) {
        self.delivery.unbind();
    }

    /// The configuration this stream was constructed from.
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Full chunk length in samples.
    pub fn chunk_size(&self) -> usize {
        self.config.chunk_size()
    }

    /// Shared samples between consecutive FixedSkip chunks.
    pub fn overlap_size(&self) -> usize {
        self.config.overlap_size()
    }

    /// True if a pull would currently return a chunk.
    pub fn has_new_chunk(&self) -> bool {
        self.delivery.has_new_chunk()
    }

    /// Absolute time of the oldest buffered sample.
    pub fn buffer_start_time(&self) -> f64 {
        self.store.buffer_start_time()
    }

    /// Absolute time one sample past the newest buffered sample.
    pub fn buffer_end_time(&self) -> f64 {
        self.store.buffer_end_time()
    }
}
