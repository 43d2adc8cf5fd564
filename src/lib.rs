//! chunkstream - streaming audio chunker
//!
//! Ingests an unbounded, possibly irregular, timestamped stream of audio
//! samples and emits fixed-size (or ramping) analysis chunks suitable for
//! feeding a downstream inference model, preserving temporal alignment and
//! overlap continuity, with gap zero-fill, rollback, and capacity-bounded
//! eviction under memory pressure.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod adapter;
pub mod config;
pub mod defaults;
pub mod error;
pub mod stream;

// Core surface
pub use stream::{Chunk, ChunkHandler, ChunkedStream, ChunkerStation, TimelineStore};

// Config
pub use config::{ChunkingStrategy, StartupStrategy, StreamConfig};

// Error handling
pub use error::{ChunkStreamError, Result};

// Boundary adapters
pub use adapter::{TimedBuffer, WavSource, pcm_f32_to_mono, pcm_i16_to_mono_f32};
