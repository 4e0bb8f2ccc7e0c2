//! Ordered batch extraction across page URLs.

pub mod driver;
