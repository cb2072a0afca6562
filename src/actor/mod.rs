//! Actor module: threads that talk to the animator over channels.
//!
//! The animator itself is single-threaded. Anything that produces chunks
//! concurrently hands them over through a crossbeam channel and the
//! animator's thread feeds them in with `add_chunk`.
//!
//! ```text
//! ┌──────────────┐   String chunks   ┌──────────────────────────┐
//! │ Feed Thread  │ ────────────────▶ │ Main Loop (animator,     │
//! └──────────────┘                   │ FadeView, OutputBuffer)  │
//!                                    └──────────────────────────┘
//! ```

mod feed;

pub use feed::{split_chunks, ChunkFeed};
