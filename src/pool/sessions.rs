//! Semaphore-bounded ownership of rendering contexts.

use crate::renderer::{RenderContext, Renderer};
use anyhow::Result;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Exclusive lease of one rendering context.
///
/// The owned permit keeps the pool slot occupied until the lease ends,
/// either through [`SessionPool::dispose`] or by dropping the lease.
pub struct LeasedSession {
    context: Option<Box<dyn RenderContext>>,
    _permit: tokio::sync::OwnedSemaphorePermit,
    live: Arc<AtomicUsize>,
}

impl LeasedSession {
    /// The context, for navigation and evaluation.
    pub fn context_mut(&mut self) -> &mut dyn RenderContext {
        self.context
            .as_mut()
            .expect("session already disposed")
            .as_mut()
    }

    fn take(mut self) -> Box<dyn RenderContext> {
        self.context.take().expect("session already disposed")
    }
}

impl Drop for LeasedSession {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Hands out exclusively owned rendering contexts, at most `capacity`
/// live at any moment. Waiting workers queue on the semaphore.
pub struct SessionPool {
    renderer: Arc<dyn Renderer>,
    slots: Arc<Semaphore>,
    live: Arc<AtomicUsize>,
    capacity: usize,
}

impl SessionPool {
    pub fn new(renderer: Arc<dyn Renderer>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            renderer,
            slots: Arc::new(Semaphore::new(capacity)),
            live: Arc::new(AtomicUsize::new(0)),
            capacity,
        }
    }

    /// Borrow a fresh context, waiting for a free slot.
    pub async fn lease(&self) -> Result<LeasedSession> {
        let permit = Arc::clone(&self.slots)
            .acquire_owned()
            .await
            .map_err(|e| anyhow::anyhow!("pool closed: {e}"))?;
        let context = self.renderer.new_context().await?;
        self.live.fetch_add(1, Ordering::SeqCst);
        Ok(LeasedSession {
            context: Some(context),
            _permit: permit,
            live: Arc::clone(&self.live),
        })
    }

    /// Close a leased context, freeing its slot. Each session goes through
    /// here exactly once, on success and failure paths alike.
    pub async fn dispose(&self, session: LeasedSession) -> Result<()> {
        session.take().close().await
    }

    /// Number of currently leased contexts.
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::mock::MockRenderer;

    #[tokio::test]
    async fn test_lease_and_dispose_track_live_count() {
        let renderer = Arc::new(MockRenderer::new().with_page("https://a", "<html></html>"));
        let pool = SessionPool::new(renderer.clone(), 2);

        let s1 = pool.lease().await.unwrap();
        let s2 = pool.lease().await.unwrap();
        assert_eq!(pool.live(), 2);
        assert_eq!(renderer.contexts_opened(), 2);

        pool.dispose(s1).await.unwrap();
        pool.dispose(s2).await.unwrap();
        assert_eq!(pool.live(), 0);
    }

    #[tokio::test]
    async fn test_capacity_bounds_concurrent_leases() {
        let renderer = Arc::new(MockRenderer::new());
        let pool = SessionPool::new(renderer, 1);

        let held = pool.lease().await.unwrap();
        // The only slot is taken; a second lease must not be ready yet.
        let pending = pool.lease();
        tokio::pin!(pending);
        assert!(futures::poll!(pending.as_mut()).is_pending());

        pool.dispose(held).await.unwrap();
        assert!(pending.await.is_ok());
    }

    #[tokio::test]
    async fn test_dropped_lease_frees_slot() {
        let renderer = Arc::new(MockRenderer::new());
        let pool = SessionPool::new(renderer, 1);
        drop(pool.lease().await.unwrap());
        assert_eq!(pool.live(), 0);
        assert!(pool.lease().await.is_ok());
    }

    #[tokio::test]
    async fn test_zero_capacity_clamped() {
        let renderer = Arc::new(MockRenderer::new());
        let pool = SessionPool::new(renderer, 0);
        assert_eq!(pool.capacity(), 1);
        assert!(pool.lease().await.is_ok());
    }
}
