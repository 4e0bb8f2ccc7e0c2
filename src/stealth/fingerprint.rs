//! Browser fingerprint patching to hide automation signals.

/// Injected into every new document before page scripts run.
pub const STEALTH_SCRIPT: &str = r#"
(() => {
    // Hide the webdriver flag
    Object.defineProperty(navigator, 'webdriver', {
        get: () => undefined,
        configurable: true,
    });

    // Patch plugins to appear non-empty
    Object.defineProperty(navigator, 'plugins', {
        get: () => [1, 2, 3, 4, 5],
        configurable: true,
    });

    // Patch languages
    Object.defineProperty(navigator, 'languages', {
        get: () => ['en-US', 'en'],
        configurable: true,
    });
})();
"#;
