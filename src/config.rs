use crate::defaults;
use crate::error::{ChunkStreamError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Chunk extraction policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ChunkingStrategy {
    /// Always the newest window; intermediate windows between two reads are lost.
    MostRecent,
    /// Sequential, possibly-overlapping windows advanced by a fixed hop.
    #[default]
    FixedSkip,
}

/// Governs what is emitted before the store holds a full chunk's worth of data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum StartupStrategy {
    /// Withhold chunks until the buffered extent reaches the chunk size.
    #[default]
    WaitForFullChunk,
    /// Pre-seed the timeline with silence so chunks are producible immediately.
    StartSilent,
    /// Grow the chunk size by one hop per emitted chunk until it is full.
    RampUpChunkSize,
}

/// Stream configuration, immutable once a stream is constructed from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StreamConfig {
    /// Duration of each emitted chunk in seconds. Must be positive.
    pub chunk_duration: f64,
    /// Time advance between consecutive FixedSkip chunks, in seconds.
    /// `None` means non-overlapping hops of one chunk duration.
    /// When set, must lie strictly between zero and `chunk_duration`.
    pub chunk_skip: Option<f64>,
    /// Sample rate of the incoming stream in Hz.
    pub sample_rate: u32,
    /// Absolute time of the first expected sample, in seconds. May be any
    /// real number, including negative.
    pub stream_start_time: f64,
    pub chunking_strategy: ChunkingStrategy,
    pub startup_strategy: StartupStrategy,
    /// How many seconds of audio the timeline store may hold before evicting
    /// the oldest samples. Must exceed `chunk_duration`.
    pub buffer_capacity_secs: f64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            chunk_duration: defaults::CHUNK_DURATION_SECS,
            chunk_skip: None,
            sample_rate: defaults::SAMPLE_RATE,
            stream_start_time: defaults::STREAM_START_TIME,
            chunking_strategy: ChunkingStrategy::default(),
            startup_strategy: StartupStrategy::default(),
            buffer_capacity_secs: defaults::BUFFER_CAPACITY_SECS,
        }
    }
}

impl StreamConfig {
    /// Validates the configuration.
    ///
    /// Invalid values are reported, never silently corrected.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_duration <= 0.0 {
            return Err(ChunkStreamError::invalid_config(
                "chunk_duration",
                "must be positive",
            ));
        }
        if let Some(skip) = self.chunk_skip
            && (skip <= 0.0 || skip >= self.chunk_duration)
        {
            return Err(ChunkStreamError::invalid_config(
                "chunk_skip",
                format!(
                    "must lie strictly between 0 and chunk_duration ({}), got {}",
                    self.chunk_duration, skip
                ),
            ));
        }
        if self.sample_rate == 0 {
            return Err(ChunkStreamError::invalid_config(
                "sample_rate",
                "must be positive",
            ));
        }
        if self.chunk_size() == 0 {
            return Err(ChunkStreamError::invalid_config(
                "chunk_duration",
                "chunk spans zero samples at this sample rate",
            ));
        }
        if self.hop_size() == 0 {
            return Err(ChunkStreamError::invalid_config(
                "chunk_skip",
                "hop spans zero samples at this sample rate",
            ));
        }
        if self.buffer_capacity_secs <= self.chunk_duration {
            return Err(ChunkStreamError::invalid_config(
                "buffer_capacity_secs",
                format!(
                    "must exceed chunk_duration ({}), got {}",
                    self.chunk_duration, self.buffer_capacity_secs
                ),
            ));
        }
        Ok(())
    }

    /// Effective chunk skip in seconds: the configured value, or one chunk
    /// duration when omitted.
    pub fn skip_secs(&self) -> f64 {
        self.chunk_skip.unwrap_or(self.chunk_duration)
    }

    /// Chunk length in samples.
    pub fn chunk_size(&self) -> usize {
        (self.chunk_duration * self.sample_rate as f64).round() as usize
    }

    /// Hop length in samples.
    pub fn hop_size(&self) -> usize {
        (self.skip_secs() * self.sample_rate as f64).round() as usize
    }

    /// Overlap between consecutive FixedSkip chunks, in samples.
    pub fn overlap_size(&self) -> usize {
        self.chunk_size().saturating_sub(self.hop_size())
    }

    /// Timeline store capacity in samples.
    pub fn capacity_samples(&self) -> usize {
        (self.buffer_capacity_secs * self.sample_rate as f64).round() as usize
    }

    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: StreamConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if the file doesn't exist
    ///
    /// Only returns defaults if the file is missing; invalid TOML is an error.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(e) => {
                if e.downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false)
                {
                    Ok(Self::default())
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - CHUNKSTREAM_SAMPLE_RATE → sample_rate
    /// - CHUNKSTREAM_CHUNK_DURATION → chunk_duration
    /// - CHUNKSTREAM_BUFFER_CAPACITY → buffer_capacity_secs
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(rate) = std::env::var("CHUNKSTREAM_SAMPLE_RATE")
            && let Ok(rate) = rate.parse::<u32>()
        {
            self.sample_rate = rate;
        }
        if let Ok(duration) = std::env::var("CHUNKSTREAM_CHUNK_DURATION")
            && let Ok(duration) = duration.parse::<f64>()
        {
            self.chunk_duration = duration;
        }
        if let Ok(capacity) = std::env::var("CHUNKSTREAM_BUFFER_CAPACITY")
            && let Ok(capacity) = capacity.parse::<f64>()
        {
            self.buffer_capacity_secs = capacity;
        }
        self
    }
}
