use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use seisquery::lens::events::{EventsLens, EventsQueryArgs};
use seisquery::{SeisqueryConfig, SeisqueryError};
use std::ffi::OsString;
use tracing::{debug, Level};

const AFTER_HELP: &str = "\
Available catalogs: ANF, GCMT, ISC, UoFW, NEIC

Examples:
    seisquery -b 2016-01-01 -e 2016-02-01 -M 6/10 -s mag
    seisquery -b 2016-01-01 -e 2016-01-02 -R 120/150/20/50 -H 0/100 -C
    seisquery -b \"2016-06-02 08:00:00\" -e 2016-06-03 -D 35/139/0/10 -c ISC";

/// Fetch event (earthquake) information from the catalogs submitted to the IRIS DMC.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(after_help = AFTER_HELP)]
struct Cli {
    /// configuration file path, by default $HOME/.seisquery/seisquery.toml is used
    #[clap(long)]
    config: Option<String>,

    /// Print debug information
    #[clap(long)]
    debug: bool,

    /// Print the request URL and exit without querying the service
    #[clap(long)]
    dry_run: bool,

    #[clap(flatten)]
    query: EventsQueryArgs,
}

fn main() {
    let _ = dotenvy::dotenv();

    if let Err(e) = run(std::env::args_os()) {
        report(e);
    }
}

/// Parse, validate and execute one invocation; `args` includes the program name
fn run<I, T>(args: I) -> Result<(), SeisqueryError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.len() <= 1 {
        return Err(SeisqueryError::NoArguments);
    }

    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => return Err(e.into()),
        },
    };

    if cli.debug {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }

    // validation happens before configuration is even read
    let query = cli.query.to_query()?;

    let config =
        SeisqueryConfig::new(&cli.config).map_err(|e| SeisqueryError::Config(e.to_string()))?;
    debug!("configuration:\n{}", config.summary());

    let lens = EventsLens::new(&config);

    if cli.dry_run {
        println!("{}", lens.build_url(&query));
        return Ok(());
    }

    let mut stdout = std::io::stdout().lock();
    lens.run(&query, &mut stdout)?;

    Ok(())
}

/// Print an error, the usage text when it helps, and exit
fn report(err: SeisqueryError) -> ! {
    eprintln!("ERROR: {}", err);
    if err.show_usage() {
        eprintln!();
        eprintln!("{}", Cli::command().render_help());
    }
    std::process::exit(err.exit_code());
}
