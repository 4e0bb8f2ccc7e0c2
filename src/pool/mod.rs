//! Bounded pool of rendering contexts.
//!
//! Controls how many browser contexts are live at once and guarantees each
//! one is exclusively owned by a single worker for its whole lease.

pub mod sessions;
