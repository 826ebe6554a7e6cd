//! CLI binary for pdf2docx.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig`. stdout carries exactly one status line, `SUCCESS` or
//! `ERROR: <message>`; logs, progress and the error chain go to stderr.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2docx::{
    convert_to_file, ConversionConfig, ConversionProgressCallback, ConversionReport, FooterScope,
    PageSelection, ProgressCallback,
};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: pdf2docx <input.pdf> <output.docx>";

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a bar on stderr plus one log line per page.
struct CliProgressCallback {
    bar: ProgressBar,
    page_started: Mutex<Option<Instant>>,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Opening PDF…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            page_started: Mutex::new(None),
        })
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, total_pages: usize) {
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} pages  {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");
        self.bar.set_length(total_pages as u64);
        self.bar.set_style(style);
        self.bar.set_prefix("Converting");
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Converting {total_pages} page(s)…"))
        ));
    }

    fn on_page_start(&self, page_num: usize, _total_pages: usize) {
        if let Ok(mut started) = self.page_started.lock() {
            *started = Some(Instant::now());
        }
        self.bar.set_message(format!("page {page_num}"));
    }

    fn on_page_complete(&self, page_num: usize, _total_pages: usize, tables: usize) {
        let elapsed_ms = self
            .page_started
            .lock()
            .ok()
            .and_then(|mut started| started.take())
            .map(|t| t.elapsed().as_millis())
            .unwrap_or(0);

        self.bar.println(format!(
            "  {} Page {:>3}  {}  {}",
            green("✓"),
            page_num,
            dim(&format!("{tables:>2} table(s)")),
            dim(&format!("{elapsed_ms}ms")),
        ));
        self.bar.inc(1);
    }

    fn on_conversion_complete(&self, _total_pages: usize, _total_tables: usize) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert a payslip
  pdf2docx payslip.pdf payslip.docx

  # Only the first two pages, write a JSON report
  pdf2docx --pages 1-2 --report report.json statement.pdf statement.docx

  # Encrypted PDF, explicit pdfium library
  pdf2docx --password secret --pdfium-lib /opt/pdfium/lib/libpdfium.so in.pdf out.docx

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH         Path to libpdfium
  RUST_LOG                Override the log filter (e.g. pdf2docx=debug)
"#;

/// Convert tabular PDF documents to styled Word documents.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2docx",
    version,
    about = "Convert tabular PDF documents (payslips, invoices, forms) to Word",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input PDF file.
    input: PathBuf,

    /// Output .docx file.
    output: PathBuf,

    /// Page selection: all, 5, 3-15, or 1,3,5,7.
    #[arg(long, env = "PDF2DOCX_PAGES", default_value = "all")]
    pages: String,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDF2DOCX_PASSWORD")]
    password: Option<String>,

    /// Path to the pdfium shared library.
    #[arg(long = "pdfium-lib", env = "PDFIUM_LIB_PATH")]
    pdfium_lib: Option<PathBuf>,

    /// Which pages are searched for the "computer generated" footer note.
    #[arg(long, env = "PDF2DOCX_FOOTER_SCOPE", value_enum, default_value = "last-page")]
    footer_scope: FooterScopeArg,

    /// Write the conversion report as JSON to this file.
    #[arg(long, env = "PDF2DOCX_REPORT")]
    report: Option<PathBuf>,

    /// Disable progress bar.
    #[arg(long, env = "PDF2DOCX_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2DOCX_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2DOCX_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FooterScopeArg {
    LastPage,
    AnyPage,
}

impl From<FooterScopeArg> for FooterScope {
    fn from(v: FooterScopeArg) -> Self {
        match v {
            FooterScopeArg::LastPage => FooterScope::LastPage,
            FooterScopeArg::AnyPage => FooterScope::AnyPage,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            if e.kind() != ErrorKind::MissingRequiredArgument {
                let _ = e.print();
            }
            println!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    // ── Logging setup ────────────────────────────────────────────────────
    // INFO-level library logs are redundant while the progress bar is shown.
    let show_progress = !cli.quiet && !cli.no_progress;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match run(&cli, show_progress).await {
        Ok(report) => {
            if !cli.quiet {
                eprintln!(
                    "{}  {} page(s)  {} table(s)  {}ms  →  {}",
                    green("✔"),
                    report.processed_pages,
                    report.total_tables(),
                    report.total_duration_ms,
                    bold(&cli.output.display().to_string()),
                );
            }
            println!("SUCCESS");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("ERROR: {e:#}");
            eprintln!("{e:?}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, show_progress: bool) -> Result<ConversionReport> {
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };

    let config = build_config(cli, progress_cb)?;
    let report = convert_to_file(&cli.input, &cli.output, &config)
        .await
        .context("Conversion failed")?;

    if let Some(ref path) = cli.report {
        let json = report.to_json().context("Failed to serialise report")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
    }

    Ok(report)
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder()
        .pages(parse_pages(&cli.pages)?)
        .footer_scope(cli.footer_scope.into());

    if let Some(ref password) = cli.password {
        builder = builder.password(password.clone());
    }
    if let Some(ref lib) = cli.pdfium_lib {
        builder = builder.pdfium_library_path(lib.clone());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

fn parse_page_number(s: &str) -> Result<usize> {
    let page: usize = s
        .trim()
        .parse()
        .with_context(|| format!("Invalid page number: '{}'", s.trim()))?;
    if page < 1 {
        anyhow::bail!("Pages are 1-indexed, minimum is 1 (got {})", page);
    }
    Ok(page)
}

/// Parse `--pages` string into `PageSelection`.
fn parse_pages(s: &str) -> Result<PageSelection> {
    let s = s.trim().to_lowercase();

    if s == "all" {
        return Ok(PageSelection::All);
    }

    if let Some((start, end)) = s.split_once('-') {
        let start = parse_page_number(start)?;
        let end = parse_page_number(end)?;
        if start > end {
            anyhow::bail!("Invalid page range '{}-{}': start must be <= end", start, end);
        }
        return Ok(PageSelection::Range(start, end));
    }

    if s.contains(',') {
        let pages = s
            .split(',')
            .map(parse_page_number)
            .collect::<Result<Vec<_>>>()?;
        return Ok(PageSelection::Set(pages));
    }

    Ok(PageSelection::Single(parse_page_number(&s)?))
}
