//! Delivery controller: dual push/pull chunk consumption.
//!
//! Extraction produces ready chunks in chronological order; this module is
//! the separate dispatch step. Unbound, chunks accumulate for polling (a
//! last-write-wins slot for MostRecent, a FIFO queue for FixedSkip). Bound,
//! every ready chunk is forwarded synchronously to the handler on the
//! writer's call stack, and polling is suppressed.

use crate::config::ChunkingStrategy;
use crate::stream::chunk::Chunk;
use std::collections::VecDeque;
use std::fmt;

/// Handler invoked for each ready chunk while bound.
pub type ChunkHandler = Box<dyn FnMut(Chunk) + Send>;

/// Push-callback versus pull-polling consumption.
pub(crate) enum DeliveryMode {
    Unbound,
    Bound(ChunkHandler),
}

impl fmt::Debug for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryMode::Unbound => write!(f, "Unbound"),
            DeliveryMode::Bound(_) => write!(f, "Bound(..)"),
        }
    }
}

#[derive(Debug)]
pub(crate) struct DeliveryController {
    mode: DeliveryMode,
    strategy: ChunkingStrategy,
    /// MostRecent: single pending chunk, overwritten on every newly-ready one.
    slot: Option<Chunk>,
    has_new_chunk: bool,
    /// FixedSkip: ready chunks awaiting a pull.
    pending: VecDeque<Chunk>,
}

impl DeliveryController {
    pub fn new(strategy: ChunkingStrategy) -> Self {
        Self {
            mode: DeliveryMode::Unbound,
            strategy,
            slot: None,
            has_new_chunk: false,
            pending: VecDeque::new(),
        }
    }

    /// Dispatches ready chunks: forwards them while bound, stores them while
    /// unbound.
    pub fn dispatch(&mut self, chunks: Vec<Chunk>) {
        if chunks.is_empty() {
            return;
        }
        match &mut self.mode {
            DeliveryMode::Bound(handler) => {
                for chunk in chunks {
                    handler(chunk);
                }
            }
            DeliveryMode::Unbound => match self.strategy {
                ChunkingStrategy::MostRecent => {
                    self.slot = chunks.into_iter().next_back();
                    self.has_new_chunk = true;
                }
                ChunkingStrategy::FixedSkip => {
                    self.pending.extend(chunks);
                }
            },
        }
    }

    /// Pulls the next pending chunk. Always `None` while bound.
    pub fn take(&mut self) -> Option<Chunk> {
        if self.is_bound() {
            return None;
        }
        match self.strategy {
            ChunkingStrategy::MostRecent => {
                if !self.has_new_chunk {
                    return None;
                }
                self.has_new_chunk = false;
                self.slot.take()
            }
            ChunkingStrategy::FixedSkip => self.pending.pop_front(),
        }
    }

    pub fn bind(&mut self, handler: ChunkHandler) {
        self.mode = DeliveryMode::Bound(handler);
    }

    /// Reverts to pull mode, dropping the handler. Chunks queued before the
    /// bind survive for subsequent pulls.
    pub fn unbind(&mut self) {
        self.mode = DeliveryMode::Unbound;
    }

    pub fn is_bound(&self) -> bool {
        matches!(self.mode, DeliveryMode::Bound(_))
    }

    /// True if a pull would currently return a chunk (ignoring bind state).
    pub fn has_new_chunk(&self) -> bool {
        match self.strategy {
            ChunkingStrategy::MostRecent => self.has_new_chunk,
            ChunkingStrategy::FixedSkip => !self.pending.is_empty(),
        }
    }
}
