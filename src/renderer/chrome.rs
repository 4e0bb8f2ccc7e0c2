//! Chromium renderer: one launched browser, one page per context.
//!
//! Pages execute scripts like a regular browser but with automation
//! signals suppressed: the stealth script is installed before any page
//! script runs and the user agent is overridden per context.

use crate::renderer::{NavigationResult, RenderContext, Renderer};
use crate::stealth;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig, HeadlessMode};
use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Renderer backed by a single headless Chromium process.
pub struct ChromeRenderer {
    // Taken exactly once by shutdown; None afterwards.
    browser: Mutex<Option<Browser>>,
    handler_task: JoinHandle<()>,
}

impl ChromeRenderer {
    /// Launch the browser and start driving its CDP event loop.
    ///
    /// This is the only failure that aborts a whole batch: without a
    /// browser there is nothing to render with.
    pub async fn launch() -> Result<Self> {
        let config = BrowserConfig::builder()
            .headless_mode(HeadlessMode::New)
            .no_sandbox()
            .window_size(1920, 1080)
            .args(vec![
                "--disable-dev-shm-usage",
                "--disable-blink-features=AutomationControlled",
            ])
            .build()
            .map_err(|e| anyhow!("building browser config: {e}"))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("launching chromium")?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            browser: Mutex::new(Some(browser)),
            handler_task,
        })
    }
}

#[async_trait]
impl Renderer for ChromeRenderer {
    async fn new_context(&self) -> Result<Box<dyn RenderContext>> {
        let guard = self.browser.lock().await;
        let browser = guard
            .as_ref()
            .ok_or_else(|| anyhow!("renderer already shut down"))?;
        let page = browser
            .new_page("about:blank")
            .await
            .context("opening page")?;
        drop(guard);

        let stealth_params = AddScriptToEvaluateOnNewDocumentParams::builder()
            .source(stealth::fingerprint::STEALTH_SCRIPT)
            .build()
            .map_err(|e| anyhow!("building stealth script params: {e}"))?;
        page.execute(stealth_params)
            .await
            .context("installing stealth script")?;
        page.set_user_agent(USER_AGENT)
            .await
            .context("overriding user agent")?;

        Ok(Box::new(ChromePage { page }))
    }

    async fn shutdown(&self) -> Result<()> {
        let mut guard = self.browser.lock().await;
        let Some(mut browser) = guard.take() else {
            return Ok(());
        };
        drop(guard);

        let closed = browser.close().await;
        let _ = browser.wait().await;
        self.handler_task.abort();
        closed.context("closing browser")?;
        debug!("browser shut down");
        Ok(())
    }
}

impl Drop for ChromeRenderer {
    fn drop(&mut self) {
        self.handler_task.abort();
        // Early-abort path: shutdown never ran. Spawn the teardown if a
        // runtime is still around; otherwise the browser's own drop kills
        // the child process.
        if let Some(mut browser) = self.browser.get_mut().take() {
            if let Ok(handle) = tokio::runtime::Handle::try_current() {
                handle.spawn(async move {
                    if let Err(e) = browser.close().await {
                        warn!("browser teardown in drop failed: {e}");
                    }
                    let _ = browser.wait().await;
                });
            }
        }
    }
}

/// One browser tab, exclusively owned by a single extraction worker.
pub struct ChromePage {
    page: Page,
}

#[async_trait]
impl RenderContext for ChromePage {
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> Result<NavigationResult> {
        let started = Instant::now();
        let nav = async {
            self.page.goto(url).await?;
            self.page.wait_for_navigation().await?;
            Ok::<_, anyhow::Error>(())
        };
        tokio::time::timeout(Duration::from_millis(timeout_ms), nav)
            .await
            .map_err(|_| anyhow!("navigation timed out after {timeout_ms} ms"))??;

        let final_url = self
            .page
            .url()
            .await
            .context("reading final url")?
            .unwrap_or_else(|| url.to_string());
        Ok(NavigationResult {
            final_url,
            load_time_ms: started.elapsed().as_millis() as u64,
        })
    }

    async fn execute_js(&self, script: &str) -> Result<serde_json::Value> {
        let result = self
            .page
            .evaluate(script)
            .await
            .context("evaluating script")?;
        Ok(result.value().cloned().unwrap_or(serde_json::Value::Null))
    }

    async fn content(&self) -> Result<String> {
        self.page.content().await.context("reading page content")
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.page.close().await.context("closing page")
    }
}
