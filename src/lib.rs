//! # Tagbayes
//!
//! A supervised text classifier based on naive-Bayes token statistics.
//!
//! ## Features
//!
//! - Pure Rust implementation
//! - Per-tag token statistics with train, untrain, rename and merge
//! - Lazily rebuilt per-token discriminating probabilities
//! - Robinson and Robinson-Fisher score combination
//! - Pluggable text analysis pipeline
//! - JSON persistence of the training state

pub mod analysis;
pub mod bayes;
pub mod cli;
pub mod config;
pub mod error;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
