//! Default configuration constants for chunkstream.
//!
//! Shared constants used across configuration types to ensure consistency
//! and eliminate duplication.

/// Default audio sample rate in Hz.
///
/// 16kHz is the standard for speech recognition and provides a good balance
/// between quality and computational efficiency for voice applications.
pub const SAMPLE_RATE: u32 = 16000;

/// Default analysis chunk duration in seconds.
///
/// 3 seconds is long enough for downstream speech models to produce stable
/// output while keeping end-to-end latency tolerable.
pub const CHUNK_DURATION_SECS: f64 = 3.0;

/// Default buffer capacity in seconds.
///
/// Bounds how much audio the timeline store will hold before evicting the
/// oldest samples. Increase for slower consumers.
pub const BUFFER_CAPACITY_SECS: f64 = 10.0;

/// Default absolute start time of the stream, in seconds.
pub const STREAM_START_TIME: f64 = 0.0;
