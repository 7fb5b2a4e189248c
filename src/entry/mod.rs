use std::ffi::OsString;
use std::sync::Arc;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use tamperx::args::{OutputFormat, ProbeArgs};
use tamperx::config::{apply_config, load_config};
use tamperx::error::AppResult;
use tamperx::http::{Dispatcher, HttpExecutor, PROBE_METHODS};
use tamperx::report::{RunSummary, write_report};
use tamperx::system::{banner::print_cli_banner, logger::init_logging};

/// Exit code used when no target URL was supplied.
const EXIT_MISSING_URL: i32 = 1;

pub(crate) fn run() -> AppResult<()> {
    let (mut args, matches) = parse_args()?;

    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, &matches, &config)?;
    }

    init_logging(args.verbose, args.no_color);

    let Some(target) = target_url(&args) else {
        tracing::debug!("No target URL on the command line, in the environment, or in config");
        print_missing_url();
        std::process::exit(EXIT_MISSING_URL);
    };

    let show_banner = !args.no_banner && args.output_format == OutputFormat::Text;
    if show_banner {
        print_cli_banner(args.no_color);
    }

    let executor = HttpExecutor::new(&args.probe_config())?;
    let dispatcher = Dispatcher::new(Arc::new(executor), args.concurrency_limit());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    tracing::debug!(
        "Probing {} with {} methods, concurrency {}",
        target,
        PROBE_METHODS.len(),
        dispatcher.pool().limit()
    );
    let outcomes = runtime.block_on(dispatcher.dispatch(&target, &PROBE_METHODS));
    tracing::debug!(
        "Peak in-flight probes: {}",
        dispatcher.pool().peak_in_flight()
    );

    let summary = show_banner.then(|| RunSummary::from_args(&args, &target));
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, args.output_format, summary.as_ref(), &outcomes)
}

fn parse_args() -> AppResult<(ProbeArgs, ArgMatches)> {
    let raw_args: Vec<OsString> = std::env::args_os().collect();
    let matches = ProbeArgs::command().get_matches_from(raw_args);
    let args = ProbeArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

fn target_url(args: &ProbeArgs) -> Option<String> {
    args.url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_owned)
}

fn print_missing_url() {
    let usage = ProbeArgs::command().render_usage();
    println!("[-] URL not provided");
    println!("{}", usage);
    println!("Try 'tamperx --help' for more information.");
}
