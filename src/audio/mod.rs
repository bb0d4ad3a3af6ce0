//! Audio loading, partitioning, and chunk encoding.

pub mod buffer;
pub mod partitioner;
pub mod writer;

pub use buffer::{AudioBuffer, AudioInfo};
pub use partitioner::{ChunkSpan, partition};
pub use writer::{ChunkWriteFailure, ChunkWriter};
