//! Stealth measures for browser automation.
//!
//! Patches fingerprint signals that naive bot checks look at, so rendered
//! pages behave the way they do for a human-driven browser.

pub mod fingerprint;
