// src/progress.rs
/// Lightweight progress reporting for the download passes.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Start of a batch (a folder's worth of items).
    fn begin(&mut self, _label: &str, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One file downloaded.
    fn item_done(&mut self, _name: &str) {}

    /// Already on disk from an earlier run.
    fn item_skipped(&mut self, _name: &str) {}

    /// Gave up on this item (download failed or nothing matched).
    fn item_failed(&mut self, _name: &str) {}

    /// End of the current batch.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
