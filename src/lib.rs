#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

//! Seisquery - earthquake event lookup from the IRIS DMC catalog
//!
//! Seisquery turns temporal, spatial, magnitude and catalog filters into a
//! single request against the FDSN event web service and prints the matching
//! events. It can be used as both a command-line application and a library.
//!
//! # Feature Flags
//!
//! | Feature | Description | Key Dependencies |
//! |---------|-------------|------------------|
//! | `lens-core` | Time parsing (TimeLens) | `dateparser` |
//! | `lens-events` | Query building and the HTTP request (EventsLens) | `ureq` |
//! | `cli` | CLI binary | All above + `clap`, `tracing-subscriber` |
//!
//! ```toml
//! # Query building and fetching without the CLI
//! seisquery = { version = "0.1", default-features = false, features = ["lens-events"] }
//!
//! # Default (CLI binary)
//! seisquery = "0.1"
//! ```
//!
//! # Architecture
//!
//! - **[`lens`]**: High-level business logic (feature-gated)
//!   - `time`: Time parsing and formatting (requires `lens-core`)
//!   - `events`: Event query building, request and output (requires `lens-events`)
//! - **[`config`]**: Configuration management
//! - **[`error`]**: The error type every failure is reported through
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seisquery::lens::events::{EventsLens, EventsQueryArgs};
//! use seisquery::SeisqueryConfig;
//!
//! let query = EventsQueryArgs::new("2016-01-01", "2016-01-02")
//!     .with_region("120/150/20/50")
//!     .with_magnitude("5/10/Mw")
//!     .with_sort("mag")
//!     .to_query()?;
//!
//! let lens = EventsLens::new(&SeisqueryConfig::default());
//! let body = lens.fetch(&lens.build_url(&query))?;
//! lens.render(&body, query.include_comments(), &mut std::io::stdout())?;
//! ```

pub mod config;
pub mod error;

// Lens module - feature gated
#[cfg(feature = "lens-core")]
pub mod lens;

pub use config::SeisqueryConfig;
pub use error::SeisqueryError;
