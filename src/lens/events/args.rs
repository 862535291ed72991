//! Argument types for the events lens

use crate::error::SeisqueryError;
use crate::lens::events::types::{
    parse_catalog, DepthRange, EventQuery, MagnitudeRange, SortOrder, SpatialFilter, TimeRange,
};
use crate::lens::time::TimeLens;
use serde::{Deserialize, Serialize};

/// Raw event query flags, as typed by the user
///
/// Nothing is interpreted until [`EventsQueryArgs::to_query`] validates the
/// whole set and produces an [`EventQuery`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
pub struct EventsQueryArgs {
    /// BOX search terms: lon1/lon2/lat1/lat2 (incompatible with the radial search)
    #[cfg_attr(
        feature = "cli",
        clap(
            short = 'R',
            long = "region",
            value_name = "LON1/LON2/LAT1/LAT2",
            allow_hyphen_values = true
        )
    )]
    #[serde(default)]
    pub region: Option<String>,

    /// RADIAL search terms: lat/lon/minradius/maxradius (incompatible with the box search)
    #[cfg_attr(
        feature = "cli",
        clap(
            short = 'D',
            long = "radial",
            value_name = "LAT/LON/MINRADIUS/MAXRADIUS",
            allow_hyphen_values = true
        )
    )]
    #[serde(default)]
    pub radial: Option<String>,

    /// Limit to events with depth (km) between this range
    #[cfg_attr(
        feature = "cli",
        clap(
            short = 'H',
            long = "depth",
            value_name = "MINDEPTH/MAXDEPTH",
            allow_hyphen_values = true
        )
    )]
    #[serde(default)]
    pub depth: Option<String>,

    /// Limit to events with magnitude between this range, optionally of a
    /// magnitude type, e.g. ML, Ms, mb, Mw
    #[cfg_attr(
        feature = "cli",
        clap(
            short = 'M',
            long = "magnitude",
            value_name = "MINMAG/MAXMAG[/MAGTYPE]",
            allow_hyphen_values = true
        )
    )]
    #[serde(default)]
    pub magnitude: Option<String>,

    /// Catalog from which origins and magnitudes will be retrieved,
    /// e.g. ANF, GCMT, ISC, UoFW, NEIC
    #[cfg_attr(feature = "cli", clap(short = 'c', long = "catalog"))]
    #[serde(default)]
    pub catalog: Option<String>,

    /// Limit to events occurring on or after the specified start time
    #[cfg_attr(feature = "cli", clap(short = 'b', long = "begin", value_name = "TIME"))]
    #[serde(default)]
    pub begin: Option<String>,

    /// Limit to events occurring on or before the specified end time
    #[cfg_attr(feature = "cli", clap(short = 'e', long = "end", value_name = "TIME"))]
    #[serde(default)]
    pub end: Option<String>,

    /// Order results by "time" or "mag" ("time" is default)
    #[cfg_attr(feature = "cli", clap(short = 's', long = "sort", value_name = "time|mag"))]
    #[serde(default)]
    pub sort: Option<String>,

    /// Do not include comment lines in the results
    #[cfg_attr(feature = "cli", clap(short = 'C', long = "no-comments"))]
    #[serde(default)]
    pub no_comments: bool,
}

impl EventsQueryArgs {
    /// Create new args for the given time window
    pub fn new(begin: &str, end: &str) -> Self {
        Self {
            begin: Some(begin.to_string()),
            end: Some(end.to_string()),
            ..Default::default()
        }
    }

    /// Set a box search (`lon1/lon2/lat1/lat2`)
    pub fn with_region(mut self, region: &str) -> Self {
        self.region = Some(region.to_string());
        self
    }

    /// Set a radial search (`lat/lon/minradius/maxradius`)
    pub fn with_radial(mut self, radial: &str) -> Self {
        self.radial = Some(radial.to_string());
        self
    }

    /// Set a depth range (`mindepth/maxdepth`)
    pub fn with_depth(mut self, depth: &str) -> Self {
        self.depth = Some(depth.to_string());
        self
    }

    /// Set a magnitude range (`minmag/maxmag[/magtype]`)
    pub fn with_magnitude(mut self, magnitude: &str) -> Self {
        self.magnitude = Some(magnitude.to_string());
        self
    }

    /// Set the catalog
    pub fn with_catalog(mut self, catalog: &str) -> Self {
        self.catalog = Some(catalog.to_string());
        self
    }

    /// Set the sort order (`time` or `mag`)
    pub fn with_sort(mut self, sort: &str) -> Self {
        self.sort = Some(sort.to_string());
        self
    }

    /// Drop comment lines from the output
    pub fn without_comments(mut self) -> Self {
        self.no_comments = true;
        self
    }

    /// Validate every flag and build the query
    ///
    /// The time window is checked first; a missing `-b` or `-e` is reported
    /// before anything else is looked at.
    pub fn to_query(&self) -> Result<EventQuery, SeisqueryError> {
        let (begin, end) = match (&self.begin, &self.end) {
            (Some(b), Some(e)) => (b, e),
            _ => return Err(SeisqueryError::MissingTimeRange),
        };

        let sort = match &self.sort {
            Some(s) => s.parse::<SortOrder>()?,
            None => SortOrder::default(),
        };

        let spatial = match (&self.region, &self.radial) {
            (Some(_), Some(_)) => return Err(SeisqueryError::ConflictingSpatialFilters),
            (Some(r), None) => Some(SpatialFilter::parse_box(r)?),
            (None, Some(d)) => Some(SpatialFilter::parse_radial(d)?),
            (None, None) => None,
        };

        let depth = self.depth.as_deref().map(DepthRange::parse).transpose()?;
        let magnitude = self
            .magnitude
            .as_deref()
            .map(MagnitudeRange::parse)
            .transpose()?;
        let catalog = self.catalog.as_deref().map(parse_catalog).transpose()?;

        let lens = TimeLens::new();
        let parse_time = |flag: char, value: &str| {
            lens.parse_time_string(value)
                .map_err(|e| SeisqueryError::InvalidTime {
                    flag,
                    value: value.to_string(),
                    reason: e.to_string(),
                })
        };
        let time_range = TimeRange {
            start: parse_time('b', begin)?,
            end: parse_time('e', end)?,
        };

        Ok(EventQuery::new(
            spatial,
            depth,
            magnitude,
            catalog,
            time_range,
            sort,
            !self.no_comments,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_fragment_from_dates() {
        let query = EventsQueryArgs::new("2016-01-01", "2016-01-02")
            .to_query()
            .unwrap();
        assert_eq!(
            query.query_string(),
            "start=2016-01-01T00:00:00&end=2016-01-02T00:00:00&"
        );
        assert!(query.include_comments());
        assert_eq!(query.sort(), SortOrder::Time);
    }

    #[test]
    fn test_missing_time_range() {
        let mut args = EventsQueryArgs::new("2016-01-01", "2016-01-02");
        args.end = None;
        assert_eq!(args.to_query(), Err(SeisqueryError::MissingTimeRange));

        let mut args = EventsQueryArgs::new("2016-01-01", "2016-01-02");
        args.begin = None;
        assert_eq!(args.to_query(), Err(SeisqueryError::MissingTimeRange));

        // reported even when other flags are malformed too
        let args = EventsQueryArgs {
            region: Some("1/2".to_string()),
            sort: Some("depth".to_string()),
            ..Default::default()
        };
        assert_eq!(args.to_query(), Err(SeisqueryError::MissingTimeRange));
    }

    #[test]
    fn test_invalid_time() {
        let err = EventsQueryArgs::new("yesterday-ish", "2016-01-02")
            .to_query()
            .unwrap_err();
        assert!(matches!(err, SeisqueryError::InvalidTime { flag: 'b', .. }));

        let err = EventsQueryArgs::new("2016-01-01", "garbage")
            .to_query()
            .unwrap_err();
        assert!(matches!(err, SeisqueryError::InvalidTime { flag: 'e', .. }));
    }

    #[test]
    fn test_sort_flag() {
        let query = EventsQueryArgs::new("2016-01-01", "2016-01-02")
            .with_sort("mag")
            .to_query()
            .unwrap();
        assert!(query.query_string().ends_with("&orderby=magnitude&"));

        let query = EventsQueryArgs::new("2016-01-01", "2016-01-02")
            .with_sort("time")
            .to_query()
            .unwrap();
        assert!(!query.query_string().contains("orderby"));

        let err = EventsQueryArgs::new("2016-01-01", "2016-01-02")
            .with_sort("size")
            .to_query()
            .unwrap_err();
        assert_eq!(err, SeisqueryError::InvalidSortOrder("size".to_string()));
        assert!(!err.show_usage());
    }

    #[test]
    fn test_box_and_radial_conflict() {
        let err = EventsQueryArgs::new("2016-01-01", "2016-01-02")
            .with_region("10/20/30/40")
            .with_radial("35/139/0/10")
            .to_query()
            .unwrap_err();
        assert_eq!(err, SeisqueryError::ConflictingSpatialFilters);
    }

    #[test]
    fn test_full_query() {
        let query = EventsQueryArgs::new("2016-01-01", "2016-01-02 12:00:00")
            .with_radial("35/139/0/10")
            .with_depth("10/700")
            .with_magnitude("3/5")
            .with_catalog("GCMT")
            .with_sort("MAG")
            .without_comments()
            .to_query()
            .unwrap();

        assert!(!query.include_comments());
        assert_eq!(
            query.query_string(),
            "lat=35&lon=139&maxradius=10&minradius=0&\
             mindepth=10&maxdepth=700&\
             minmag=3&maxmag=5&\
             catalog=GCMT&\
             start=2016-01-01T00:00:00&end=2016-01-02T12:00:00&\
             orderby=magnitude&"
        );
    }

    #[test]
    fn test_each_key_appears_once() {
        let qs = EventsQueryArgs::new("2016-01-01", "2016-01-02")
            .with_region("10/20/30/40")
            .with_depth("0/50")
            .with_magnitude("3/5/Mw")
            .with_catalog("ISC")
            .with_sort("mag")
            .to_query()
            .unwrap()
            .query_string();

        let keys: Vec<&str> = qs
            .trim_end_matches('&')
            .split('&')
            .map(|kv| kv.split('=').next().unwrap_or_default())
            .collect();
        assert_eq!(
            keys,
            vec![
                "minlat", "maxlat", "minlon", "maxlon", "mindepth", "maxdepth", "minmag",
                "maxmag", "magtype", "catalog", "start", "end", "orderby"
            ]
        );
    }

    #[test]
    fn test_malformed_filters_show_usage() {
        let err = EventsQueryArgs::new("2016-01-01", "2016-01-02")
            .with_region("10/20/30")
            .to_query()
            .unwrap_err();
        assert!(matches!(err, SeisqueryError::InvalidFilter { flag: 'R', .. }));
        assert!(err.show_usage());

        let err = EventsQueryArgs::new("2016-01-01", "2016-01-02")
            .with_magnitude("3")
            .to_query()
            .unwrap_err();
        assert!(matches!(err, SeisqueryError::InvalidFilter { flag: 'M', .. }));
    }

    #[cfg(feature = "cli")]
    mod cli {
        use super::*;
        use clap::Parser;

        #[derive(Parser)]
        struct TestCli {
            #[clap(flatten)]
            query: EventsQueryArgs,
        }

        fn parse(args: &[&str]) -> Result<EventsQueryArgs, clap::Error> {
            let mut argv = vec!["seisquery"];
            argv.extend_from_slice(args);
            TestCli::try_parse_from(argv).map(|c| c.query)
        }

        #[test]
        fn test_short_flags() {
            let args = parse(&[
                "-R", "10/20/30/40", "-H", "0/100", "-M", "3/5/Mw", "-c", "ISC", "-b",
                "2016-01-01", "-e", "2016-01-02", "-s", "mag", "-C",
            ])
            .unwrap();
            assert_eq!(args.region.as_deref(), Some("10/20/30/40"));
            assert_eq!(args.depth.as_deref(), Some("0/100"));
            assert_eq!(args.magnitude.as_deref(), Some("3/5/Mw"));
            assert_eq!(args.catalog.as_deref(), Some("ISC"));
            assert_eq!(args.sort.as_deref(), Some("mag"));
            assert!(args.no_comments);
        }

        #[test]
        fn test_attached_and_negative_values() {
            let args = parse(&["-R-120/-110/30/40", "-D", "-35/139/0/10", "-b2016-01-01"])
                .unwrap();
            assert_eq!(args.region.as_deref(), Some("-120/-110/30/40"));
            assert_eq!(args.radial.as_deref(), Some("-35/139/0/10"));
            assert_eq!(args.begin.as_deref(), Some("2016-01-01"));
        }

        #[test]
        fn test_comments_kept_by_default() {
            let args = parse(&["-b", "2016-01-01", "-e", "2016-01-02"]).unwrap();
            assert!(!args.no_comments);
            assert!(args.to_query().unwrap().include_comments());
        }

        #[test]
        fn test_parse_errors() {
            // unknown flag
            assert!(parse(&["-x", "1"]).is_err());
            // missing value
            assert!(parse(&["-b"]).is_err());
        }

        #[test]
        fn test_missing_end_passes_parsing_but_fails_validation() {
            let args = parse(&["-b", "2016-01-01"]).unwrap();
            assert_eq!(args.to_query(), Err(SeisqueryError::MissingTimeRange));
        }
    }
}
