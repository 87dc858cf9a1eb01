//! # Unit Components
//!
//! Unit tests organized to mirror the crate's module tree.
