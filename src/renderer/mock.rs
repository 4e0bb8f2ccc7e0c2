//! Canned renderer for exercising the batch driver without a browser.

use crate::renderer::{NavigationResult, RenderContext, Renderer};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Clone)]
struct MockPage {
    html: String,
    // false simulates a page whose readyState never reaches complete.
    ready: bool,
}

/// Renderer serving canned HTML per URL. URLs without a page fail to
/// navigate, like a dead hostname would.
pub struct MockRenderer {
    pages: Arc<HashMap<String, MockPage>>,
    shutdowns: Arc<AtomicUsize>,
    contexts_opened: Arc<AtomicUsize>,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self {
            pages: Arc::new(HashMap::new()),
            shutdowns: Arc::new(AtomicUsize::new(0)),
            contexts_opened: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_page(self, url: &str, html: &str) -> Self {
        self.insert(url, html, true)
    }

    /// A page that navigates fine but never reports document-ready.
    pub fn with_unready_page(self, url: &str, html: &str) -> Self {
        self.insert(url, html, false)
    }

    fn insert(mut self, url: &str, html: &str, ready: bool) -> Self {
        Arc::get_mut(&mut self.pages)
            .expect("configure the mock before sharing it")
            .insert(
                url.to_string(),
                MockPage {
                    html: html.to_string(),
                    ready,
                },
            );
        self
    }

    pub fn shutdown_count(&self) -> usize {
        self.shutdowns.load(Ordering::SeqCst)
    }

    pub fn contexts_opened(&self) -> usize {
        self.contexts_opened.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Renderer for MockRenderer {
    async fn new_context(&self) -> Result<Box<dyn RenderContext>> {
        self.contexts_opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockContext {
            pages: Arc::clone(&self.pages),
            current: None,
        }))
    }

    async fn shutdown(&self) -> Result<()> {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct MockContext {
    pages: Arc<HashMap<String, MockPage>>,
    current: Option<MockPage>,
}

#[async_trait]
impl RenderContext for MockContext {
    async fn navigate(&mut self, url: &str, _timeout_ms: u64) -> Result<NavigationResult> {
        let page = self
            .pages
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("net::ERR_NAME_NOT_RESOLVED"))?;
        self.current = Some(page);
        Ok(NavigationResult {
            final_url: url.to_string(),
            load_time_ms: 1,
        })
    }

    async fn execute_js(&self, script: &str) -> Result<serde_json::Value> {
        let current = self
            .current
            .as_ref()
            .ok_or_else(|| anyhow!("no page loaded"))?;
        if script == "document.readyState" {
            let state = if current.ready { "complete" } else { "loading" };
            return Ok(serde_json::Value::String(state.to_string()));
        }
        Ok(serde_json::Value::Null)
    }

    async fn content(&self) -> Result<String> {
        self.current
            .as_ref()
            .map(|p| p.html.clone())
            .ok_or_else(|| anyhow!("no page loaded"))
    }

    async fn close(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}
