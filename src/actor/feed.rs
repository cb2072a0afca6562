//! Chunk Feed: a producer thread that streams text in small chunks.
//!
//! This stands in for an incremental response arriving from elsewhere.
//! Chunks are 1..=N grapheme clusters long, so a cluster is never split
//! across two chunks, and they are sent at a fixed interval over a bounded
//! channel. The channel closes once the whole text has been sent.

use crossbeam_channel::{bounded, Receiver, SendTimeoutError, Sender};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use unicode_segmentation::UnicodeSegmentation;

/// How long a blocked send waits before re-checking for shutdown.
const SEND_RETRY: Duration = Duration::from_millis(10);

/// Split `text` into chunks of 1..=`max_graphemes` grapheme clusters.
///
/// Sizes cycle deterministically so runs are reproducible.
pub fn split_chunks(text: &str, max_graphemes: usize) -> Vec<String> {
    let max = max_graphemes.max(1);
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    let mut chunks = Vec::new();
    let mut index = 0;

    while index < graphemes.len() {
        let size = (index * 7) % max + 1;
        let end = (index + size).min(graphemes.len());
        chunks.push(graphemes[index..end].concat());
        index = end;
    }

    chunks
}

/// Producer thread delivering chunks of a text.
pub struct ChunkFeed {
    /// Handle to the feed thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
    /// Receiver for chunks.
    chunk_rx: Receiver<String>,
}

impl ChunkFeed {
    /// Spawn a feed sending one chunk of `text` every `interval`.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the feed thread.
    pub fn spawn(text: &str, interval: Duration, max_graphemes: usize) -> io::Result<Self> {
        let chunks = split_chunks(text, max_graphemes);
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let (chunk_tx, chunk_rx) = bounded(16);

        let handle = thread::Builder::new()
            .name("fadestream-feed".to_string())
            .spawn(move || {
                Self::run_loop(chunks, &chunk_tx, &shutdown_clone, interval);
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
            chunk_rx,
        })
    }

    /// Get a reference to the chunk receiver.
    #[inline]
    pub const fn receiver(&self) -> &Receiver<String> {
        &self.chunk_rx
    }

    /// Take every chunk that has arrived, without blocking.
    pub fn drain(&self) -> Vec<String> {
        self.chunk_rx.try_iter().collect()
    }

    /// Whether the feed has sent everything and the queue is empty.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished) && self.chunk_rx.is_empty()
    }

    /// Signal the feed to stop.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Stop the feed and wait for its thread.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main feed loop.
    fn run_loop(chunks: Vec<String>, chunk_tx: &Sender<String>, shutdown: &AtomicBool, interval: Duration) {
        for mut chunk in chunks {
            if shutdown.load(Ordering::Relaxed) {
                return;
            }

            // Never drop a chunk: wait for room, but stay responsive to shutdown.
            loop {
                match chunk_tx.send_timeout(chunk, SEND_RETRY) {
                    Ok(()) => break,
                    Err(SendTimeoutError::Timeout(returned)) => {
                        if shutdown.load(Ordering::Relaxed) {
                            return;
                        }
                        chunk = returned;
                    }
                    Err(SendTimeoutError::Disconnected(_)) => return,
                }
            }

            thread::sleep(interval);
        }
    }
}

impl Drop for ChunkFeed {
    fn drop(&mut self) {
        self.shutdown();
    }
}
