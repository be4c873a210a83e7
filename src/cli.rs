//! Command-line interface for snipcheck.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::{self, Config};
use crate::detect::{explain_rule, Dispatcher, Language, Rule};
use crate::fix::apply_bulk_fix;
use crate::format::Formatter;
use crate::report::{self, FileReport};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Path argument meaning "read from stdin".
const STDIN_PATH: &str = "-";

/// Directory names never descended into.
const SKIPPED_DIRS: &[&str] = &["node_modules", "vendor", "target", "__pycache__"];

/// Quick syntax checker for code snippets.
///
/// Flags missing semicolons, missing block colons and malformed JSON in
/// JavaScript, TypeScript, Python and JSON snippets, fixes what it can, and
/// re-indents.
#[derive(Parser)]
#[command(name = "snipcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check snippets for syntax slips
    #[command(visible_alias = "lint")]
    Check(CheckArgs),
    /// Re-indent a snippet or pretty-print a JSON document
    Fmt(FmtArgs),
    /// Explain what a rule means
    Explain(ExplainArgs),
    /// Create a snipcheck config file with the default settings
    Init(InitArgs),
}

/// Arguments for the check command.
#[derive(Parser)]
pub struct CheckArgs {
    /// File or directory to check, or "-" for stdin
    pub path: PathBuf,

    /// Language of the input (javascript, typescript, python, json, structured-message)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty, json, or sarif
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Apply available fixes, write them back, and report what remains
    #[arg(long)]
    pub fix: bool,

    /// Print an explanation under each finding
    #[arg(long)]
    pub explain: bool,
}

/// Arguments for the fmt command.
#[derive(Parser)]
pub struct FmtArgs {
    /// File to format, or "-" for stdin
    pub path: PathBuf,

    /// Language of the input (default: from the file extension)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Rewrite the file in place instead of printing
    #[arg(short, long)]
    pub write: bool,
}

/// Arguments for the explain command.
#[derive(Parser)]
pub struct ExplainArgs {
    /// Rule id, e.g. missing_terminator
    pub rule: String,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "snipcheck.yaml")]
    pub output: PathBuf,
}

/// Default config written by `init`.
const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("templates/default.yaml");

fn debug_enabled() -> bool {
    std::env::var("SNIPCHECK_DEBUG").is_ok()
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_PATH
}

/// Load an explicit config, or discover one in the working directory.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => Config::discover(Path::new(".")),
    };

    let config = match path {
        Some(p) => {
            if debug_enabled() {
                eprintln!("[debug] Loading config from {}", p.display());
            }
            Config::parse_file(&p).with_context(|| format!("parsing config {}", p.display()))?
        }
        None => Config::default(),
    };

    config::validate(&config).context("invalid config")?;
    Ok(config)
}

/// Resolve the language of an input from the flag or the file name.
fn resolve_language(flag: Option<Language>, path: &Path) -> anyhow::Result<Language> {
    if let Some(language) = flag {
        return Ok(language);
    }
    if is_stdin(path) {
        anyhow::bail!("--language is required when reading from stdin");
    }
    Language::from_path(path).ok_or_else(|| {
        anyhow::anyhow!(
            "cannot tell the language of {}; pass --language",
            path.display()
        )
    })
}

fn parse_language_flag(flag: Option<&str>) -> anyhow::Result<Option<Language>> {
    flag.map(|s| s.parse::<Language>().map_err(anyhow::Error::from))
        .transpose()
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if is_stdin(path) {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Collect checkable files under `root`.
fn collect_files(root: &Path, config: &Config) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            if e.depth() > 0 && e.file_type().is_dir() {
                // Skip hidden and dependency directories
                if name.starts_with('.') || SKIPPED_DIRS.contains(&&*name) {
                    return false;
                }
            }
            true
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if Language::from_path(path).is_none() || config.is_path_excluded(path) {
            continue;
        }
        files.push(path.to_path_buf());
    }

    Ok(files)
}

/// Analyze one snippet, optionally fixing it and analyzing again.
///
/// Returns the report and, when fixes were applied, the fixed text.
pub fn check_text(
    dispatcher: &Dispatcher,
    file: &str,
    text: &str,
    language: Language,
    fix: bool,
) -> (FileReport, Option<String>) {
    if debug_enabled() {
        eprintln!("[debug] Checking {} as {}", file, language);
    }
    let diagnostics = dispatcher.analyze(text, language);

    if fix {
        let result = apply_bulk_fix(text, &diagnostics);
        if result.applied > 0 {
            if debug_enabled() {
                eprintln!("[debug] Applied {} fixes to {}", result.applied, file);
            }
            // The old diagnostics describe the old text.
            let diagnostics = dispatcher.analyze(&result.text, language);
            let report = FileReport {
                file: file.to_string(),
                language,
                diagnostics,
                fixed: result.applied,
            };
            return (report, Some(result.text));
        }
    }

    let report = FileReport {
        file: file.to_string(),
        language,
        diagnostics,
        fixed: 0,
    };
    (report, None)
}

/// Run the check command.
pub fn run_check(args: &CheckArgs) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "json" && args.format != "sarif" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty', 'json', or 'sarif'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let language_flag = match parse_language_flag(args.language.as_deref()) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return Ok(EXIT_ERROR);
        }
    };
    let dispatcher = Dispatcher::with_config(&config);

    // Stdin with --fix prints the fixed snippet instead of a report.
    if is_stdin(&args.path) {
        let language = match resolve_language(language_flag, &args.path) {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error: {}", e);
                return Ok(EXIT_ERROR);
            }
        };
        let text = read_input(&args.path)?;
        let (file_report, fixed) = check_text(&dispatcher, STDIN_PATH, &text, language, args.fix);

        if args.fix {
            print!("{}", fixed.as_deref().unwrap_or(&text));
        } else {
            write_report(&args.format, std::slice::from_ref(&file_report), args.explain)?;
        }
        return Ok(exit_code(std::slice::from_ref(&file_report)));
    }

    let metadata = match std::fs::metadata(&args.path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    let files = if metadata.is_dir() {
        collect_files(&args.path, &config)?
    } else {
        vec![args.path.clone()]
    };

    if debug_enabled() {
        eprintln!("[debug] Collected {} files to check", files.len());
    }

    if files.is_empty() {
        eprintln!("Warning: no files to check");
        return Ok(EXIT_SUCCESS);
    }

    let mut reports = Vec::with_capacity(files.len());
    for path in &files {
        let language = match resolve_language(language_flag, path) {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error: {}", e);
                return Ok(EXIT_ERROR);
            }
        };
        // Skip files we can't read; earlier files may already be fixed.
        let text = match read_input(path) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("Warning: skipping {}: {:#}", path.display(), e);
                continue;
            }
        };
        let name = path.to_string_lossy().to_string();
        let (file_report, fixed) = check_text(&dispatcher, &name, &text, language, args.fix);

        if let Some(fixed) = fixed {
            std::fs::write(path, fixed).with_context(|| format!("writing {}", path.display()))?;
        }
        reports.push(file_report);
    }

    write_report(&args.format, &reports, args.explain)?;
    Ok(exit_code(&reports))
}

fn write_report(format: &str, reports: &[FileReport], explain: bool) -> anyhow::Result<()> {
    match format {
        "json" => report::write_json(reports),
        "sarif" => report::write_sarif(reports),
        _ => {
            report::write_pretty(reports, explain);
            Ok(())
        }
    }
}

fn exit_code(reports: &[FileReport]) -> i32 {
    if reports.iter().any(FileReport::has_errors) {
        EXIT_FAILED
    } else {
        EXIT_SUCCESS
    }
}

/// Run the fmt command.
pub fn run_fmt(args: &FmtArgs) -> anyhow::Result<i32> {
    let language = match parse_language_flag(args.language.as_deref())
        .and_then(|flag| resolve_language(flag, &args.path))
    {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    if args.write && is_stdin(&args.path) {
        eprintln!("Error: --write cannot be used with stdin");
        return Ok(EXIT_ERROR);
    }

    let config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let text = read_input(&args.path)?;
    let formatted = match Formatter::new(config.format.indent_width).format(&text, language) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let formatted = keep_trailing_newline(&text, formatted);
    if args.write {
        std::fs::write(&args.path, &formatted)
            .with_context(|| format!("writing {}", args.path.display()))?;
        println!("Formatted {}", args.path.display());
    } else if formatted.ends_with('\n') {
        print!("{}", formatted);
    } else {
        println!("{}", formatted);
    }

    Ok(EXIT_SUCCESS)
}

/// Give `formatted` a trailing newline when `input` had one.
fn keep_trailing_newline(input: &str, mut formatted: String) -> String {
    if input.ends_with('\n') && !formatted.ends_with('\n') {
        formatted.push('\n');
    }
    formatted
}

/// Run the explain command.
pub fn run_explain(args: &ExplainArgs) -> anyhow::Result<i32> {
    match Rule::parse(&args.rule) {
        Some(rule) => {
            println!("{} ({})", rule, rule.severity());
            println!();
            println!("{}", explain_rule(rule));
            Ok(EXIT_SUCCESS)
        }
        None => {
            eprintln!("Error: unknown rule {:?}", args.rule);
            eprintln!("Known rules:");
            for rule in Rule::ALL {
                eprintln!("  {}", rule);
            }
            Ok(EXIT_ERROR)
        }
    }
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    // Check if output already exists
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    // Create output directory if needed
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, DEFAULT_CONFIG_TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to tune the heuristics", args.output.display());
    println!("  2. Run: snipcheck check . --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}
