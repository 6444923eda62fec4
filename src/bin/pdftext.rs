//! CLI binary for pdftext-ocr.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ExtractionConfig` and prints the extracted text.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdftext_ocr::{
    ExtractionConfig, ExtractionProgressCallback, ExtractionResult, Extractor, PdfiumLoader,
    ProgressCallback, Provenance, TesseractCli,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress bar with one log line per page.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_prefix("Preparing");
        bar.set_message("Opening PDF…");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl ExtractionProgressCallback for CliProgressCallback {
    fn on_extraction_start(&self, total_pages: usize) {
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} pages  ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");
        self.bar.set_length(total_pages as u64);
        self.bar.set_style(style);
        self.bar.set_prefix("Extracting");
    }

    fn on_page_start(&self, page_num: usize, _total: usize) {
        self.bar.set_message(format!("page {page_num}"));
    }

    fn on_page_resolved(&self, page_num: usize, total: usize, provenance: Provenance, chars: usize) {
        let (mark, source) = match provenance {
            Provenance::Native => (green("✓"), "text"),
            Provenance::Ocr => (green("✓"), "ocr"),
            Provenance::OcrEmpty => (yellow("∅"), "ocr, empty"),
        };
        self.bar.println(format!(
            "  {} Page {:>3}/{:<3}  {:<12}  {}",
            mark,
            page_num,
            total,
            dim(source),
            dim(&format!("{chars:>5} chars")),
        ));
        self.bar.inc(1);
    }

    fn on_extraction_complete(&self, total_pages: usize, empty_pages: usize) {
        self.bar.finish_and_clear();
        if empty_pages == 0 {
            eprintln!("{} {} pages extracted", green("✔"), bold(&total_pages.to_string()));
        } else {
            eprintln!(
                "{} {} pages extracted  ({} without text)",
                yellow("⚠"),
                bold(&total_pages.to_string()),
                empty_pages
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Print the text of a PDF
  pdftext resume.pdf

  # Write to a file
  pdftext scan.pdf -o scan.txt

  # Faint scan: render finer, binarise more aggressively
  pdftext --dpi 600 --threshold 170 faint.pdf

  # Structured output with per-document stats
  pdftext --json resume.pdf > resume.json

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH   Path to an existing libpdfium
  RUST_LOG          Log filter, overrides --verbose / --quiet

SETUP:
  Scanned pages need the `tesseract` executable with English data
  (Debian/Ubuntu: apt install tesseract-ocr tesseract-ocr-eng).
"#;

/// Extract text from PDF files, with OCR for scanned pages.
#[derive(Parser, Debug)]
#[command(
    name = "pdftext",
    version,
    about = "Extract text from PDF files, falling back to OCR for scanned pages",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file path.
    input: PathBuf,

    /// Write text to this file instead of stdout.
    #[arg(short, long, env = "PDFTEXT_OUTPUT")]
    output: Option<PathBuf>,

    /// Rendering DPI for pages that need OCR (72–1200).
    #[arg(long, env = "PDFTEXT_DPI", default_value_t = 400,
          value_parser = clap::value_parser!(u32).range(72..=1200))]
    dpi: u32,

    /// Binarisation threshold (0–255); darker samples become black.
    #[arg(long, env = "PDFTEXT_THRESHOLD", default_value_t = 150)]
    threshold: u8,

    /// OCR language code (tesseract `-l`).
    #[arg(long = "lang", env = "PDFTEXT_LANG", default_value = "eng")]
    language: String,

    /// Minimum characters before the result is flagged low-confidence.
    #[arg(long, env = "PDFTEXT_MIN_CHARS", default_value_t = 50)]
    min_chars: usize,

    /// Path to the tesseract executable.
    #[arg(long, env = "PDFTEXT_TESSERACT", default_value = "tesseract")]
    tesseract: PathBuf,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDFTEXT_PASSWORD")]
    password: Option<String>,

    /// Output structured JSON (ExtractionResult) instead of plain text.
    #[arg(long, env = "PDFTEXT_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "PDFTEXT_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDFTEXT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDFTEXT_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces INFO logs unless --verbose asks for them.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
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

    let progress: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn ExtractionProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress)?;

    let ocr = TesseractCli::with_program(&cli.tesseract);
    if !ocr.is_available() && !cli.quiet {
        eprintln!(
            "{} '{}' not found; scanned pages will come back empty",
            yellow("⚠"),
            ocr.program().display()
        );
    }

    let loader = PdfiumLoader::bind(config.max_rendered_pixels)
        .context("Failed to load the PDFium engine")?;
    let extractor = Extractor::new(config, Box::new(loader), Box::new(ocr));

    let start = Instant::now();
    let result = extractor
        .extract_file(&cli.input)
        .context("Extraction failed")?;
    let elapsed_ms = start.elapsed().as_millis();

    write_result(&cli, &result)?;

    if !cli.quiet && !cli.json {
        if result.low_confidence {
            eprintln!(
                "{}  low confidence: little text could be recovered from {}",
                yellow("⚠"),
                cli.input.display()
            );
        }
        eprintln!(
            "   {} native  /  {} ocr  /  {} empty  —  {}ms total",
            dim(&result.stats.native_pages.to_string()),
            dim(&result.stats.ocr_pages.to_string()),
            dim(&result.stats.empty_pages.to_string()),
            elapsed_ms,
        );
    }

    Ok(())
}

/// Map CLI args to `ExtractionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ExtractionConfig> {
    let mut builder = ExtractionConfig::builder()
        .dpi(cli.dpi)
        .threshold(cli.threshold)
        .language(cli.language.clone())
        .min_text_chars(cli.min_chars);

    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd.clone());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

fn write_result(cli: &Cli, result: &ExtractionResult) -> Result<()> {
    let body = if cli.json {
        serde_json::to_string_pretty(result).context("Failed to serialise output")?
    } else {
        result.text.clone()
    };

    match cli.output {
        Some(ref path) => {
            std::fs::write(path, format!("{body}\n"))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if !cli.quiet {
                eprintln!("{}  →  {}", green("✔"), bold(&path.display().to_string()));
            }
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(body.as_bytes())
                .context("Failed to write to stdout")?;
            handle.write_all(b"\n").ok();
        }
    }
    Ok(())
}
