//! Lens module
//!
//! This module provides high-level "lens" abstractions that combine business logic
//! with output formatting. Lenses are designed to be reusable from the CLI and
//! from library callers.
//!
//! # Feature Requirements
//!
//! | Lens | Feature Required | Dependencies |
//! |------|-----------------|--------------|
//! | `TimeLens` | `lens-core` | chrono, dateparser |
//! | `EventsLens` | `lens-events` | ureq |
//!
//! # Architecture
//!
//! Each lens module exports:
//! - A **Lens struct** (e.g., `TimeLens`, `EventsLens`) - the main entry point for all operations
//! - **Args structs** - input arguments for lens methods
//! - **Output types** - return types of lens methods
//!
//! # Usage
//!
//! ```rust,ignore
//! // Time parsing (lens-core)
//! use seisquery::lens::time::TimeLens;
//!
//! // Event queries (lens-events)
//! use seisquery::lens::events::{EventsLens, EventsQueryArgs, EventQuery};
//! ```

// =============================================================================
// Core lenses (lens-core feature)
// =============================================================================

// TimeLens - time parsing and formatting
pub mod time;

// =============================================================================
// Service lenses (lens-events feature)
// =============================================================================

// EventsLens - event query assembly, request and output
#[cfg(feature = "lens-events")]
pub mod events;
