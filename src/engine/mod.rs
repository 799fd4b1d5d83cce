//! Layer 4: Engine
//!
//! # Purpose
//!
//! This layer orchestrates the circle fit:
//! - Input and configuration validation
//! - The fixed-iteration gradient-descent loop
//! - Result assembly
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Gradient-descent executor.
pub mod optimizer;

/// Result types.
pub mod output;

/// Input validation.
pub mod validator;
