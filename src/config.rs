//! Tunables for the recursive multipliers.

use crate::error::{MatmulError, Result};

/// Default size at or below which recursion hands off to the iterative kernel.
pub const DEFAULT_THRESHOLD: usize = 128;

/// Default size at or below which a parallel call stops forking.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 128;

/// Configuration shared by divide-and-conquer and Strassen.
///
/// - `threshold`: blocks of side `<= threshold` are multiplied iteratively.
/// - `parallel_threshold`: in parallel mode, blocks of side
///   `<= parallel_threshold` continue with the sequential recursion instead of
///   forking more tasks.
/// - `parallel`: selects the fork-join variant.
///
/// ```
/// use recmatmul::RecursiveConfig;
///
/// let config = RecursiveConfig::parallel().with_threshold(32);
/// assert!(config.parallel);
/// assert_eq!(config.threshold, 32);
/// assert_eq!(config.parallel_threshold, 128);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecursiveConfig {
    pub threshold: usize,
    pub parallel_threshold: usize,
    pub parallel: bool,
}

impl RecursiveConfig {
    pub fn sequential() -> Self {
        Self::default()
    }

    pub fn parallel() -> Self {
        Self {
            parallel: true,
            ..Self::default()
        }
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Both thresholds must be positive.
    pub fn validate(&self) -> Result<()> {
        if self.threshold == 0 {
            return Err(MatmulError::InvalidConfig(
                "threshold must be > 0".to_string(),
            ));
        }
        if self.parallel_threshold == 0 {
            return Err(MatmulError::InvalidConfig(
                "parallel_threshold must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for RecursiveConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            parallel: false,
        }
    }
}
