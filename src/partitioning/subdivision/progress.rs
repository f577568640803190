use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Receives progress reports from a tree build running on several threads.
pub trait BuildProgress: Sync {
    /// Reports that `done` boxes out of an estimated `total` have been created.
    ///
    /// The estimate grows as the build discovers more boxes to subdivide.
    fn set(&self, done: usize, total: usize);

    /// Checked along with every progress report: returning `true` stops the build, which then
    /// fails with [`TreeError::Cancelled`](super::TreeError::Cancelled).
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Ignores progress reports.
impl BuildProgress for () {
    #[inline]
    fn set(&self, _: usize, _: usize) {}
}

/// A progress sink storing the last report, which can be read or cancelled from another thread.
///
/// # Example
///
/// ```
/// use hypertree::partitioning::{BuildProgress, ProgressCounter};
///
/// let progress = ProgressCounter::new();
/// progress.set(4096, 8192);
/// assert_eq!(progress.fraction(), 0.5);
///
/// progress.cancel();
/// assert!(progress.is_cancelled());
/// ```
#[derive(Debug, Default)]
pub struct ProgressCounter {
    done: AtomicUsize,
    total: AtomicUsize,
    cancelled: AtomicBool,
}

impl ProgressCounter {
    /// A counter with no progress reported yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last reported `(done, total)` pair.
    pub fn get(&self) -> (usize, usize) {
        (
            self.done.load(Ordering::Relaxed),
            self.total.load(Ordering::Relaxed),
        )
    }

    /// The last reported progress in `[0, 1]`, or zero if nothing was reported.
    pub fn fraction(&self) -> f64 {
        match self.get() {
            (_, 0) => 0.0,
            (done, total) => (done as f64 / total as f64).min(1.0),
        }
    }

    /// Requests the build using this sink to stop at its next progress report.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

impl BuildProgress for ProgressCounter {
    fn set(&self, done: usize, total: usize) {
        self.done.store(done, Ordering::Relaxed);
        self.total.store(total, Ordering::Relaxed);
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
