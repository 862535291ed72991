//! Earthquake event query lens
//!
//! This module turns validated filters into a request against the FDSN event
//! web service run by the IRIS DMC, performs the request, and writes the
//! service's text response back out, optionally without its comment lines.
//!
//! # Feature Requirements
//!
//! This module requires the `lens-events` feature.
//!
//! # Example
//!
//! ```rust,ignore
//! use seisquery::lens::events::{EventsLens, EventsQueryArgs};
//!
//! let query = EventsQueryArgs::new("2016-01-01", "2016-01-02")
//!     .with_magnitude("6/10")
//!     .to_query()?;
//!
//! let lens = EventsLens::default();
//! println!("{}", lens.build_url(&query));
//! lens.run(&query, &mut std::io::stdout().lock())?;
//! ```

mod args;
mod types;

pub use args::EventsQueryArgs;
pub use types::{
    parse_catalog, DepthRange, EventQuery, MagnitudeRange, RenderStats, SortOrder, SpatialFilter,
    TimeRange,
};

use crate::config::SeisqueryConfig;
use crate::error::SeisqueryError;
use std::io::{ErrorKind, Write};
use tracing::{debug, info};

/// Response bodies larger than this are refused
const MAX_RESPONSE_BYTES: u64 = 256 * 1024 * 1024;

/// Parameter appended to every request to select the pipe-delimited text output
const TEXT_FORMAT_PARAM: &str = "format=text";

/// Whether a response line is a comment (header) line rather than an event
///
/// In the service's text format these lines start with `#`, e.g.
/// `#EventID | Time | Latitude | Longitude | ...`.
pub fn is_comment_line(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// Earthquake event query lens
///
/// Holds the service endpoint and the client identity. One call to
/// [`EventsLens::run`] performs exactly one HTTP GET.
pub struct EventsLens {
    endpoint: String,
    user_agent: String,
}

impl EventsLens {
    /// Create a new events lens from configuration
    pub fn new(config: &SeisqueryConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            user_agent: config.user_agent.clone(),
        }
    }

    /// Use a different service endpoint
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// Assemble the complete request URL for a query
    pub fn build_url(&self, query: &EventQuery) -> String {
        let endpoint = self.endpoint.trim_end_matches(['?', '&']);
        format!(
            "{}?{}{}",
            endpoint,
            query.query_string(),
            TEXT_FORMAT_PARAM
        )
    }

    /// Perform a single blocking GET and return the body as text
    ///
    /// Redirects are followed. Connection failures, non-success statuses and
    /// unreadable bodies all become [`SeisqueryError::Request`].
    pub fn fetch(&self, url: &str) -> Result<String, SeisqueryError> {
        info!("requesting {}", url);
        let mut response = ureq::get(url)
            .header("User-Agent", self.user_agent.as_str())
            .call()?;
        debug!("response status: {}", response.status());

        let body = response
            .body_mut()
            .with_config()
            .limit(MAX_RESPONSE_BYTES)
            .read_to_string()
            .map_err(|e| SeisqueryError::Request(format!("unable to read response: {}", e)))?;
        debug!("received {} bytes", body.len());

        Ok(body)
    }

    /// Write a response body line by line, dropping comment lines unless
    /// `include_comments` is set
    ///
    /// Kept lines are written byte for byte, including `\r\n` endings and a
    /// missing newline on the last line.
    ///
    /// A closed pipe on the reader's side ends the output without an error.
    pub fn render<W: Write>(
        &self,
        body: &str,
        include_comments: bool,
        writer: &mut W,
    ) -> Result<RenderStats, SeisqueryError> {
        let mut stats = RenderStats::default();

        // lines keep their own terminators so the body passes through unaltered
        for line in body.split_inclusive('\n') {
            if !include_comments && is_comment_line(line.trim_end_matches(['\r', '\n'])) {
                stats.dropped += 1;
                continue;
            }
            if let Err(e) = writer.write_all(line.as_bytes()) {
                if e.kind() == ErrorKind::BrokenPipe {
                    debug!("output closed after {} lines", stats.written);
                    return Ok(stats);
                }
                return Err(e.into());
            }
            stats.written += 1;
        }

        match writer.flush() {
            Err(e) if e.kind() != ErrorKind::BrokenPipe => Err(e.into()),
            _ => Ok(stats),
        }
    }

    /// Build the URL, fetch it and render the response
    pub fn run<W: Write>(
        &self,
        query: &EventQuery,
        writer: &mut W,
    ) -> Result<RenderStats, SeisqueryError> {
        let url = self.build_url(query);
        let body = self.fetch(&url)?;
        let stats = self.render(&body, query.include_comments(), writer)?;
        debug!(
            "wrote {} lines, dropped {} comment lines",
            stats.written, stats.dropped
        );
        Ok(stats)
    }
}

impl Default for EventsLens {
    fn default() -> Self {
        Self::new(&SeisqueryConfig::default())
    }
}

// =============================================================================
// Tests
// =============================================================================
