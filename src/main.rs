//! CIPWE main entry point
//!
//! This is the command-line interface for the CIPWE AI-crawlability auditor.

use anyhow::Context;
use cipwe::config::{load_config, validate_fetch_config, Config};
use cipwe::output::{
    error_json, score_line, write_markdown_report, JsonReport, ReportRenderer, TerminalReport,
};
use cipwe::url::{resolve_target, Target};
use cipwe::{AuditError, AuditResult};
use clap::{Args, Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Audits below this percentage exit with status 1
const PASSING_PERCENTAGE: u32 = 50;

/// CIPWE: how well can AI agents read your site?
///
/// Fetches a page together with its robots.txt, sitemap.xml and llms.txt,
/// runs 19 independent checks, and scores the result out of 100.
#[derive(Parser, Debug)]
#[command(name = "cipwe")]
#[command(version)]
#[command(about = "AI crawlability auditor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan a URL or local build and print the full report
    Audit {
        #[command(flatten)]
        target: TargetArgs,

        /// Print the result as JSON instead of the terminal report
        #[arg(long)]
        json: bool,

        /// Also write a markdown report to this path
        #[arg(long, value_name = "PATH")]
        markdown: Option<PathBuf>,
    },

    /// Print only the one-line score
    Score {
        #[command(flatten)]
        target: TargetArgs,
    },
}

#[derive(Args, Debug)]
struct TargetArgs {
    /// URL, bare domain, or local directory to audit
    #[arg(value_name = "TARGET")]
    target: String,

    /// Skip TLS certificate verification
    #[arg(short = 'k', long)]
    insecure: bool,

    /// Per-attempt timeout in milliseconds
    #[arg(long, value_name = "MS")]
    timeout: Option<u64>,

    /// Retries after the first attempt for transient failures
    #[arg(long, value_name = "N")]
    retries: Option<u32>,

    /// Path to TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Audit {
            target,
            json,
            markdown,
        } => handle_audit(&target, json, markdown, cli.quiet).await,
        Command::Score { target } => handle_score(&target).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so that stdout carries only the report.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("cipwe=warn,warn"),
            1 => EnvFilter::new("cipwe=info,warn"),
            2 => EnvFilter::new("cipwe=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Merges the optional config file with command-line overrides
fn build_config(args: &TargetArgs) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(timeout) = args.timeout {
        config.fetch.timeout_ms = timeout;
    }
    if let Some(retries) = args.retries {
        config.fetch.retries = retries;
    }
    if args.insecure {
        config.fetch.insecure = true;
    }

    validate_fetch_config(&config.fetch).context("Invalid command-line options")?;
    Ok(config)
}

/// Runs the audit pipeline for the given arguments
async fn run_audit(args: &TargetArgs) -> anyhow::Result<AuditResult> {
    let config = build_config(args)?;
    let options = config.fetch_options();
    if options.insecure_tls {
        tracing::warn!("TLS certificate verification disabled");
    }
    Ok(cipwe::audit(&args.target, &options).await?)
}

/// Handles the `audit` command: full report, JSON, and optional markdown file
async fn handle_audit(
    args: &TargetArgs,
    json: bool,
    markdown: Option<PathBuf>,
    quiet: bool,
) -> ExitCode {
    if !json && !quiet {
        println!();
        println!("  Auditing: {}", display_target(&args.target));
    }

    let audit = match run_audit(args).await {
        Ok(audit) => audit,
        Err(e) => {
            report_failure(&e, json);
            return ExitCode::FAILURE;
        }
    };

    let rendered = if json {
        JsonReport.render(&audit)
    } else {
        TerminalReport::new(std::io::stdout().is_terminal()).render(&audit)
    };
    match rendered {
        Ok(text) => print!("{}", text),
        Err(e) => {
            report_failure(&anyhow::Error::new(e), json);
            return ExitCode::FAILURE;
        }
    }
    if json {
        println!();
    }

    if let Some(path) = markdown {
        if let Err(e) = write_markdown_report(&audit, &path) {
            report_failure(&anyhow::Error::new(e), json);
            return ExitCode::FAILURE;
        }
        tracing::info!("Markdown report written to: {}", path.display());
    }

    exit_code(&audit)
}

/// Handles the `score` command: one line, same exit code contract
async fn handle_score(args: &TargetArgs) -> ExitCode {
    match run_audit(args).await {
        Ok(audit) => {
            println!("{}", score_line(&audit));
            exit_code(&audit)
        }
        Err(e) => {
            report_failure(&e, false);
            ExitCode::FAILURE
        }
    }
}

fn exit_code(audit: &AuditResult) -> ExitCode {
    if audit.percentage < PASSING_PERCENTAGE {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Prints a failure on stderr, with a remediation hint when one applies
fn report_failure(err: &anyhow::Error, json: bool) {
    if json {
        eprintln!("{}", error_json(&format!("{:#}", err)));
        return;
    }

    eprintln!();
    eprintln!("  Error: {:#}", err);
    if let Some(hint) = err.downcast_ref::<AuditError>().and_then(AuditError::hint) {
        eprintln!("  {}", hint);
    }
    eprintln!();
}

/// The form the target will be audited under
fn display_target(target: &str) -> String {
    match resolve_target(target) {
        Ok(Target::Remote(url)) => url.to_string(),
        Ok(Target::Local(path)) => path.display().to_string(),
        Err(_) => target.to_string(),
    }
}
