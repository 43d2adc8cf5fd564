//! Boundary adapters: platform audio buffers in, flat `f32` writes out.
//!
//! The stream itself only accepts flat `f32` samples at its configured rate.
//! These adapters convert interleaved PCM buffers and WAV files at that
//! boundary. They never resample and never substitute zero data: anything
//! they cannot convert faithfully is an error.

use crate::error::{ChunkStreamError, Result};
use crate::stream::ChunkedStream;
use std::io::Read;
use std::path::Path;

/// A flat sample buffer with an optional capture timestamp.
///
/// `timestamp` is the absolute time of the first sample; `None` means the
/// buffer continues immediately after the previous write.
#[derive(Debug, Clone)]
pub struct TimedBuffer {
    pub samples: Vec<f32>,
    pub timestamp: Option<f64>,
}

impl TimedBuffer {
    /// An untimed buffer, appended right after the last write.
    pub fn new(samples: Vec<f32>) -> Self {
        Self {
            samples,
            timestamp: None,
        }
    }

    /// A buffer captured at an absolute time.
    pub fn at(samples: Vec<f32>, timestamp: f64) -> Self {
        Self {
            samples,
            timestamp: Some(timestamp),
        }
    }
}

/// Converts interleaved i16 PCM into flat mono `f32` in `[-1, 1]`,
/// downmixing channels by averaging.
pub fn pcm_i16_to_mono_f32(samples: &[i16], channels: u16) -> Result<Vec<f32>> {
    if channels == 0 {
        return Err(ChunkStreamError::UnsupportedFormat {
            expected: "at least one channel".to_string(),
            actual: "0 channels".to_string(),
        });
    }
    let channels = channels as usize;
    if !samples.len().is_multiple_of(channels) {
        return Err(ChunkStreamError::AdapterRead {
            message: format!(
                "{} samples do not divide into {} channels",
                samples.len(),
                channels
            ),
        });
    }
    Ok(samples
        .chunks_exact(channels)
        .map(|frame| {
            let sum: i32 = frame.iter().map(|s| *s as i32).sum();
            (sum / channels as i32) as f32 / i16::MAX as f32
        })
        .collect())
}

/// Converts interleaved f32 PCM into flat mono, downmixing channels by
/// averaging. Non-finite samples are rejected rather than zeroed.
pub fn pcm_f32_to_mono(samples: &[f32], channels: u16) -> Result<Vec<f32>> {
    if channels == 0 {
        return Err(ChunkStreamError::UnsupportedFormat {
            expected: "at least one channel".to_string(),
            actual: "0 channels".to_string(),
        });
    }
    let channels = channels as usize;
    if !samples.len().is_multiple_of(channels) {
        return Err(ChunkStreamError::AdapterRead {
            message: format!(
                "{} samples do not divide into {} channels",
                samples.len(),
                channels
            ),
        });
    }
    if let Some(bad) = samples.iter().find(|s| !s.is_finite()) {
        return Err(ChunkStreamError::AdapterRead {
            message: format!("non-finite sample {}", bad),
        });
    }
    Ok(samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect())
}

/// WAV file audio source.
///
/// Decodes 16-bit integer or 32-bit float WAV data to flat mono `f32`,
/// downmixing stereo. The source keeps the file's own sample rate; feeding a
/// stream at a different rate is an error, since resampling is out of scope.
pub struct WavSource {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl WavSource {
    /// Create from any reader (for testing/flexibility).
    pub fn from_reader(reader: Box<dyn Read + Send>) -> Result<Self> {
        let mut wav_reader =
            hound::WavReader::new(reader).map_err(|e| ChunkStreamError::AdapterRead {
                message: format!("Failed to parse WAV file: {}", e),
            })?;

        let spec = wav_reader.spec();
        let raw_samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
            (hound::SampleFormat::Int, 16) => wav_reader
                .samples::<i16>()
                .map(|s| s.map(|v| v as f32 / i16::MAX as f32))
                .collect::<std::result::Result<Vec<_>, _>>(),
            (hound::SampleFormat::Float, 32) => wav_reader
                .samples::<f32>()
                .collect::<std::result::Result<Vec<_>, _>>(),
            (format, bits) => {
                return Err(ChunkStreamError::UnsupportedFormat {
                    expected: "16-bit int or 32-bit float WAV".to_string(),
                    actual: format!("{:?} with {} bits per sample", format, bits),
                });
            }
        }
        .map_err(|e| ChunkStreamError::AdapterRead {
            message: format!("Failed to read WAV samples: {}", e),
        })?;

        let samples = pcm_f32_to_mono(&raw_samples, spec.channels)?;

        Ok(Self {
            samples,
            sample_rate: spec.sample_rate,
        })
    }

    /// Create from a file path.
    pub fn open(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(Box::new(std::io::BufReader::new(file)))
    }

    /// Sample rate of the decoded audio.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of decoded mono samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the file held no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Consume the source and return all samples as a single buffer.
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// Feeds the decoded audio into a stream in untimed slices of
    /// `slice_len` samples, as a live producer would.
    ///
    /// Fails with `UnsupportedFormat` when the file's sample rate differs
    /// from the stream's; no silent resampling.
    pub fn feed(self, stream: &mut ChunkedStream, slice_len: usize) -> Result<()> {
        if self.sample_rate != stream.config().sample_rate {
            return Err(ChunkStreamError::UnsupportedFormat {
                expected: format!("{} Hz", stream.config().sample_rate),
                actual: format!("{} Hz", self.sample_rate),
            });
        }
        for slice in self.samples.chunks(slice_len.max(1)) {
            stream.write(slice, None);
        }
        Ok(())
    }
}
