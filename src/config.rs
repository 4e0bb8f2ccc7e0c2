//! Read-only batch configuration: what to extract and how long to wait.
//!
//! A config is built once and shared, unchanged, across every per-URL
//! extraction in a batch; it is the only state workers have in common.

/// Default ceiling for the document-ready wait.
pub const DEFAULT_READY_TIMEOUT_MS: u64 = 15_000;

/// Default interval between readiness probes.
pub const DEFAULT_READY_POLL_MS: u64 = 100;

/// Default settle delay for the fixed-wait readiness proxy.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 1_000;

/// Default bound on a single navigation.
pub const DEFAULT_NAVIGATION_TIMEOUT_MS: u64 = 30_000;

/// How to decide a rendered page has finished loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyWait {
    /// Poll `document.readyState` until `complete`, bounded by a ceiling.
    /// Exceeding the ceiling is a per-item failure, not a fatal error.
    DocumentReady { timeout_ms: u64, poll_interval_ms: u64 },
    /// Sleep a fixed settle delay and assume readiness. Cheap proxy for
    /// pages that render fast and expose no useful readiness signal.
    FixedDelay { delay_ms: u64 },
}

impl ReadyWait {
    /// The fixed settle variant with the default delay.
    pub fn fixed_settle() -> Self {
        ReadyWait::FixedDelay {
            delay_ms: DEFAULT_SETTLE_DELAY_MS,
        }
    }

    /// Upper bound on how long this strategy can wait, for error reporting.
    pub fn ceiling_ms(&self) -> u64 {
        match self {
            ReadyWait::DocumentReady { timeout_ms, .. } => *timeout_ms,
            ReadyWait::FixedDelay { delay_ms } => *delay_ms,
        }
    }
}

impl Default for ReadyWait {
    fn default() -> Self {
        ReadyWait::DocumentReady {
            timeout_ms: DEFAULT_READY_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_READY_POLL_MS,
        }
    }
}

/// Configuration for one batch run.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Exact id of the table element to locate on each page.
    pub table_id: String,
    /// Whether to run the profile-image fallback chain per item.
    pub resolve_image: bool,
    /// Readiness strategy applied after navigation.
    pub ready_wait: ReadyWait,
    /// Bound on a single page navigation.
    pub navigation_timeout_ms: u64,
    /// Number of concurrently live rendering contexts. 1 processes the
    /// batch sequentially through a single context at a time.
    pub pool_size: usize,
}

impl ExtractConfig {
    /// Config for the given table id with default waits and a pool of one.
    pub fn new(table_id: impl Into<String>) -> Self {
        Self {
            table_id: table_id.into(),
            resolve_image: false,
            ready_wait: ReadyWait::default(),
            navigation_timeout_ms: DEFAULT_NAVIGATION_TIMEOUT_MS,
            pool_size: 1,
        }
    }

    /// Enable or disable per-item image resolution.
    pub fn with_image(mut self, resolve: bool) -> Self {
        self.resolve_image = resolve;
        self
    }

    /// Replace the readiness strategy.
    pub fn with_ready_wait(mut self, wait: ReadyWait) -> Self {
        self.ready_wait = wait;
        self
    }

    /// Bound the number of concurrently live contexts. Clamped to >= 1.
    pub fn with_pool_size(mut self, size: usize) -> Self {
        self.pool_size = size.max(1);
        self
    }
}
