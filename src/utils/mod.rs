//! Utility functions for the tracker.
//!
//! This module is organized into focused submodules:
//!
//! - [`conversion`] - Raw amount parsing (BigDecimal) and ratio helpers

mod conversion;

// ============================================
// Re-exports
// ============================================

// Conversion utilities
pub use conversion::{amount_to_f64, pct_change, share_pct};
