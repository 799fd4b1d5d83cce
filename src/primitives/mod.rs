//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the fundamental data structures used throughout the crate:
//! - The error type shared by every fallible operation
//! - Dense column-major matrix storage
//! - The circle parameter triple
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Error types.
pub mod errors;

/// Dense matrix storage.
pub mod matrix;

/// Circle parameters.
pub mod params;
