//! Streaming audio chunker.
//!
//! A small real-time state machine turning an irregular, timestamped sample
//! stream into fixed-size analysis chunks:
//! ```text
//! ┌──────────┐  write   ┌──────────────┐  ready   ┌───────────┐  push/pull
//! │ Producer │─────────▶│   Timeline   │─────────▶│ Extractor │────────────▶ Consumer
//! │ (timed)  │          │    Store     │          │ (strategy)│   (delivery)
//! └──────────┘          └──────────────┘          └───────────┘
//!                        gap-fill, rollback,       MostRecent /
//!                        capacity eviction         FixedSkip + startup
//! ```
//! Reconciliation, extraction, and delivery all happen synchronously inside
//! one `write` call.

pub mod chunk;
pub mod delivery;
pub mod station;
#[allow(clippy::module_inception)]
pub mod stream;
pub mod strategy;
pub mod timeline;

pub use chunk::Chunk;
pub use delivery::ChunkHandler;
pub use station::ChunkerStation;
pub use stream::ChunkedStream;
pub use timeline::TimelineStore;
