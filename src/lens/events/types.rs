//! Types for the events lens
//!
//! Each filter knows how to validate its command-line text and how to render
//! itself as a self-terminating query fragment (`key=value&...&`).

use crate::error::SeisqueryError;
use crate::lens::time::TimeLens;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Field helpers
// =============================================================================

/// Split a slash-separated flag value into exactly `min..=max` fields
fn split_fields(
    flag: char,
    value: &str,
    min: usize,
    max: usize,
) -> Result<Vec<String>, SeisqueryError> {
    let fields: Vec<String> = value.split('/').map(|s| s.to_string()).collect();
    if fields.len() < min || fields.len() > max {
        let expected = if min == max {
            format!("{}", min)
        } else {
            format!("{} or {}", min, max)
        };
        return Err(SeisqueryError::InvalidFilter {
            flag,
            value: value.to_string(),
            reason: format!(
                "expected {} slash-separated components, found {}",
                expected,
                fields.len()
            ),
        });
    }
    Ok(fields)
}

/// Check that a field is a finite number, keeping the user's text
fn numeric_field(flag: char, value: &str, field: &str) -> Result<String, SeisqueryError> {
    match field.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(field.to_string()),
        _ => Err(SeisqueryError::InvalidFilter {
            flag,
            value: value.to_string(),
            reason: format!("'{}' is not a number", field),
        }),
    }
}

/// Check that a free-text field can be placed in a query string verbatim
fn token_field(flag: char, value: &str, field: &str) -> Result<String, SeisqueryError> {
    if field.is_empty() {
        return Err(SeisqueryError::InvalidFilter {
            flag,
            value: value.to_string(),
            reason: "empty value".to_string(),
        });
    }
    if let Some(c) = field
        .chars()
        .find(|c| c.is_whitespace() || matches!(c, '&' | '=' | '?' | '#'))
    {
        return Err(SeisqueryError::InvalidFilter {
            flag,
            value: value.to_string(),
            reason: format!("'{}' is not allowed", c),
        });
    }
    Ok(field.to_string())
}

// =============================================================================
// Filters
// =============================================================================

/// Geographic restriction of the search, either a box or a circle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpatialFilter {
    /// Rectangular box in degrees
    Box {
        min_lon: String,
        max_lon: String,
        min_lat: String,
        max_lat: String,
    },
    /// Center point plus a distance range in degrees
    Radial {
        lat: String,
        lon: String,
        min_radius: String,
        max_radius: String,
    },
}

impl SpatialFilter {
    /// Parse `lon1/lon2/lat1/lat2` (the `-R` value)
    pub fn parse_box(value: &str) -> Result<Self, SeisqueryError> {
        let f = split_fields('R', value, 4, 4)?;
        Ok(SpatialFilter::Box {
            min_lon: numeric_field('R', value, &f[0])?,
            max_lon: numeric_field('R', value, &f[1])?,
            min_lat: numeric_field('R', value, &f[2])?,
            max_lat: numeric_field('R', value, &f[3])?,
        })
    }

    /// Parse `lat/lon/minradius/maxradius` (the `-D` value)
    pub fn parse_radial(value: &str) -> Result<Self, SeisqueryError> {
        let f = split_fields('D', value, 4, 4)?;
        Ok(SpatialFilter::Radial {
            lat: numeric_field('D', value, &f[0])?,
            lon: numeric_field('D', value, &f[1])?,
            min_radius: numeric_field('D', value, &f[2])?,
            max_radius: numeric_field('D', value, &f[3])?,
        })
    }

    pub fn fragment(&self) -> String {
        match self {
            SpatialFilter::Box {
                min_lon,
                max_lon,
                min_lat,
                max_lat,
            } => format!(
                "minlat={}&maxlat={}&minlon={}&maxlon={}&",
                min_lat, max_lat, min_lon, max_lon
            ),
            SpatialFilter::Radial {
                lat,
                lon,
                min_radius,
                max_radius,
            } => format!(
                "lat={}&lon={}&maxradius={}&minradius={}&",
                lat, lon, max_radius, min_radius
            ),
        }
    }
}

/// Depth range in kilometers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthRange {
    pub min: String,
    pub max: String,
}

impl DepthRange {
    /// Parse `mindepth/maxdepth` (the `-H` value)
    pub fn parse(value: &str) -> Result<Self, SeisqueryError> {
        let f = split_fields('H', value, 2, 2)?;
        Ok(DepthRange {
            min: numeric_field('H', value, &f[0])?,
            max: numeric_field('H', value, &f[1])?,
        })
    }

    pub fn fragment(&self) -> String {
        format!("mindepth={}&maxdepth={}&", self.min, self.max)
    }
}

/// Magnitude range with an optional magnitude scale (e.g. Mw, ML, mb)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagnitudeRange {
    pub min: String,
    pub max: String,
    pub mag_type: Option<String>,
}

impl MagnitudeRange {
    /// Parse `minmag/maxmag[/magtype]` (the `-M` value)
    pub fn parse(value: &str) -> Result<Self, SeisqueryError> {
        let f = split_fields('M', value, 2, 3)?;
        let mag_type = match f.get(2) {
            Some(t) => Some(token_field('M', value, t)?),
            None => None,
        };
        Ok(MagnitudeRange {
            min: numeric_field('M', value, &f[0])?,
            max: numeric_field('M', value, &f[1])?,
            mag_type,
        })
    }

    pub fn fragment(&self) -> String {
        match &self.mag_type {
            Some(t) => format!("minmag={}&maxmag={}&magtype={}&", self.min, self.max, t),
            None => format!("minmag={}&maxmag={}&", self.min, self.max),
        }
    }
}

/// Validate a catalog name (the `-c` value); it is passed through verbatim
pub fn parse_catalog(value: &str) -> Result<String, SeisqueryError> {
    token_field('c', value, value)
}

/// Mandatory event time window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn fragment(&self) -> String {
        let lens = TimeLens::new();
        format!(
            "start={}&end={}&",
            lens.format_query_time(&self.start),
            lens.format_query_time(&self.end)
        )
    }
}

/// Result ordering requested from the service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Newest first, the service default
    #[default]
    Time,
    /// Largest magnitude first
    Magnitude,
}

impl SortOrder {
    /// Time order is implicit, so it contributes nothing to the query
    pub fn fragment(&self) -> String {
        match self {
            SortOrder::Time => String::new(),
            SortOrder::Magnitude => "orderby=magnitude&".to_string(),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Time => write!(f, "time"),
            SortOrder::Magnitude => write!(f, "mag"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = SeisqueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "time" => Ok(SortOrder::Time),
            "mag" => Ok(SortOrder::Magnitude),
            _ => Err(SeisqueryError::InvalidSortOrder(s.to_string())),
        }
    }
}

// =============================================================================
// Query
// =============================================================================

/// A fully validated event query
///
/// Built once from [`EventsQueryArgs`](super::EventsQueryArgs) and consumed by
/// [`EventsLens`](super::EventsLens). Fields are private so that a value can
/// only come out of validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventQuery {
    spatial: Option<SpatialFilter>,
    depth: Option<DepthRange>,
    magnitude: Option<MagnitudeRange>,
    catalog: Option<String>,
    time_range: TimeRange,
    sort: SortOrder,
    include_comments: bool,
}

impl EventQuery {
    pub(crate) fn new(
        spatial: Option<SpatialFilter>,
        depth: Option<DepthRange>,
        magnitude: Option<MagnitudeRange>,
        catalog: Option<String>,
        time_range: TimeRange,
        sort: SortOrder,
        include_comments: bool,
    ) -> Self {
        Self {
            spatial,
            depth,
            magnitude,
            catalog,
            time_range,
            sort,
            include_comments,
        }
    }

    pub fn spatial(&self) -> Option<&SpatialFilter> {
        self.spatial.as_ref()
    }

    pub fn depth(&self) -> Option<&DepthRange> {
        self.depth.as_ref()
    }

    pub fn magnitude(&self) -> Option<&MagnitudeRange> {
        self.magnitude.as_ref()
    }

    pub fn catalog(&self) -> Option<&str> {
        self.catalog.as_deref()
    }

    pub fn time_range(&self) -> &TimeRange {
        &self.time_range
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn include_comments(&self) -> bool {
        self.include_comments
    }

    /// Query fragments in their fixed order: spatial, depth, magnitude,
    /// catalog, time, sort
    pub fn fragments(&self) -> [String; 6] {
        [
            self.spatial
                .as_ref()
                .map(|s| s.fragment())
                .unwrap_or_default(),
            self.depth.as_ref().map(|d| d.fragment()).unwrap_or_default(),
            self.magnitude
                .as_ref()
                .map(|m| m.fragment())
                .unwrap_or_default(),
            self.catalog
                .as_ref()
                .map(|c| format!("catalog={}&", c))
                .unwrap_or_default(),
            self.time_range.fragment(),
            self.sort.fragment(),
        ]
    }

    /// The concatenated query string; every parameter ends with `&`
    pub fn query_string(&self) -> String {
        self.fragments().concat()
    }
}

/// Counters reported after writing a response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderStats {
    /// Lines written to the output
    pub written: usize,
    /// Comment lines dropped
    pub dropped: usize,
}
