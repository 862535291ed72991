//! Error type shared by the option parser and the query executor
//!
//! Every failure the program can hit ends up as a [`SeisqueryError`], so the
//! binary has exactly one place that prints messages and picks exit codes.

/// Errors that can occur while building or running an event query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeisqueryError {
    /// The program was started without any argument
    NoArguments,
    /// Command-line parsing failed (unknown flag, missing value, ...)
    InvalidArguments(String),
    /// `-b` or `-e` was not given
    MissingTimeRange,
    /// A `-b`/`-e` value could not be parsed as a date/time
    InvalidTime {
        flag: char,
        value: String,
        reason: String,
    },
    /// A slash-separated filter value is malformed
    InvalidFilter {
        flag: char,
        value: String,
        reason: String,
    },
    /// Both a box (`-R`) and a radial (`-D`) search were given
    ConflictingSpatialFilters,
    /// `-s` was given something other than `time` or `mag`
    InvalidSortOrder(String),
    /// Configuration could not be loaded
    Config(String),
    /// The HTTP request failed or returned a non-success status
    Request(String),
    /// Writing results to the output failed
    Output(String),
}

impl SeisqueryError {
    /// Whether the full usage text should follow the error message
    pub fn show_usage(&self) -> bool {
        matches!(
            self,
            SeisqueryError::NoArguments
                | SeisqueryError::InvalidArguments(_)
                | SeisqueryError::InvalidFilter { .. }
                | SeisqueryError::ConflictingSpatialFilters
        )
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        1
    }
}

impl std::fmt::Display for SeisqueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeisqueryError::NoArguments => write!(f, "No argument is found"),
            SeisqueryError::InvalidArguments(msg) => write!(f, "Invalid arguments: {}", msg),
            SeisqueryError::MissingTimeRange => write!(f, "\"-b\" and \"-e\" must be specified."),
            SeisqueryError::InvalidTime {
                flag,
                value,
                reason,
            } => write!(f, "invalid time for \"-{}\": {} ({})", flag, value, reason),
            SeisqueryError::InvalidFilter {
                flag,
                value,
                reason,
            } => write!(f, "invalid value for \"-{}\": {} ({})", flag, value, reason),
            SeisqueryError::ConflictingSpatialFilters => write!(
                f,
                "\"-R\" (box search) and \"-D\" (radial search) cannot be used together"
            ),
            SeisqueryError::InvalidSortOrder(value) => {
                write!(f, "Wrong option of \"-s\": {}", value)
            }
            SeisqueryError::Config(msg) => write!(f, "configuration error: {}", msg),
            SeisqueryError::Request(msg) => write!(f, "event request failed: {}", msg),
            SeisqueryError::Output(msg) => write!(f, "failed to write output: {}", msg),
        }
    }
}

impl std::error::Error for SeisqueryError {}

impl From<std::io::Error> for SeisqueryError {
    fn from(err: std::io::Error) -> Self {
        SeisqueryError::Output(err.to_string())
    }
}

#[cfg(feature = "lens-events")]
impl From<ureq::Error> for SeisqueryError {
    fn from(err: ureq::Error) -> Self {
        SeisqueryError::Request(err.to_string())
    }
}

#[cfg(feature = "cli")]
impl From<clap::Error> for SeisqueryError {
    fn from(err: clap::Error) -> Self {
        // keep clap's first line only; usage is printed separately
        let rendered = err.to_string();
        let msg = rendered
            .lines()
            .next()
            .unwrap_or_default()
            .trim_start_matches("error: ")
            .to_string();
        SeisqueryError::InvalidArguments(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_is_shown_for_parse_errors_only() {
        assert!(SeisqueryError::NoArguments.show_usage());
        assert!(SeisqueryError::InvalidArguments("x".to_string()).show_usage());
        assert!(SeisqueryError::ConflictingSpatialFilters.show_usage());

        // missing -b/-e and a bad -s value report a targeted message only
        assert!(!SeisqueryError::MissingTimeRange.show_usage());
        assert!(!SeisqueryError::InvalidSortOrder("depth".to_string()).show_usage());
        assert!(!SeisqueryError::Request("timeout".to_string()).show_usage());
    }

    #[test]
    fn test_every_error_exits_with_one() {
        let errors = vec![
            SeisqueryError::NoArguments,
            SeisqueryError::MissingTimeRange,
            SeisqueryError::InvalidSortOrder("x".to_string()),
            SeisqueryError::Config("x".to_string()),
            SeisqueryError::Request("x".to_string()),
            SeisqueryError::Output("x".to_string()),
        ];
        for e in errors {
            assert_eq!(e.exit_code(), 1);
        }
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            SeisqueryError::MissingTimeRange.to_string(),
            "\"-b\" and \"-e\" must be specified."
        );
        assert_eq!(
            SeisqueryError::InvalidSortOrder("depth".to_string()).to_string(),
            "Wrong option of \"-s\": depth"
        );
        let e = SeisqueryError::InvalidFilter {
            flag: 'R',
            value: "1/2/3".to_string(),
            reason: "expected 4 components, found 3".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "invalid value for \"-R\": 1/2/3 (expected 4 components, found 3)"
        );
    }
}
