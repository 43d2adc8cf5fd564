//! Station wrapper for embedding a chunked stream in a channel pipeline.
//!
//! Owns the stream on one task, so the single-owner concurrency contract
//! holds without a lock: buffers in over one channel, chunks out over
//! another.

use crate::adapter::TimedBuffer;
use crate::stream::chunk::Chunk;
use crate::stream::stream::ChunkedStream;
use tokio::sync::mpsc;

/// Chunker station that feeds timed buffers into a stream and drains the
/// chunks each write makes ready.
#[derive(Debug)]
pub struct ChunkerStation {
    stream: ChunkedStream,
}

impl ChunkerStation {
    /// Wraps an unbound stream. The station drains chunks by polling, so the
    /// stream must stay unbound while the station owns it.
    pub fn new(stream: ChunkedStream) -> Self {
        Self { stream }
    }

    /// Feeds one buffer and returns every chunk it made ready, oldest first.
    pub fn process(&mut self, buffer: TimedBuffer) -> Vec<Chunk> {
        self.stream.write(&buffer.samples, buffer.timestamp);
        let mut chunks = Vec::new();
        while let Some(chunk) = self.stream.read_chunk_if_available() {
            chunks.push(chunk);
        }
        chunks
    }

    /// Runs the station until the input channel closes or the receiver for
    /// the output channel is dropped.
    pub async fn run(mut self, mut input: mpsc::Receiver<TimedBuffer>, output: mpsc::Sender<Chunk>) {
        while let Some(buffer) = input.recv().await {
            for chunk in self.process(buffer) {
                if output.send(chunk).await.is_err() {
                    return;
                }
            }
        }
    }

    /// Returns the wrapped stream.
    pub fn into_inner(self) -> ChunkedStream {
        self.stream
    }
}
