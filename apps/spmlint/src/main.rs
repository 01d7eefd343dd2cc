use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use log::{LevelFilter, debug, error, info};
use spmlint_core::{Configuration, FileSystem, LiveFileSystem, MANIFEST_FILE_NAME};
use spmlint_sanitizer::CheckResult;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

/// Exit status when no manifest exists in the package directory.
const EXIT_MANIFEST_NOT_FOUND: i32 = 255;
/// Exit status when the manifest cannot be read or decoded.
const EXIT_MANIFEST_UNREADABLE: i32 = 254;
/// Largest exit status used to report the number of findings.
const MAX_FINDINGS_EXIT_CODE: usize = 253;

/// How a run ends, as far as the exit status is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    ManifestNotFound,
    ManifestUnreadable,
    Findings(usize),
}

impl Outcome {
    fn exit_code(self) -> i32 {
        match self {
            Outcome::ManifestNotFound => EXIT_MANIFEST_NOT_FOUND,
            Outcome::ManifestUnreadable => EXIT_MANIFEST_UNREADABLE,
            Outcome::Findings(count) => count.min(MAX_FINDINGS_EXIT_CODE) as i32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "spmlint")]
#[command(
    about = "Checks that Swift package targets declare exactly the dependencies they import",
    long_about = None
)]
struct Cli {
    /// Directory containing Package.swift (defaults to the current directory)
    #[arg(short = 'p', long)]
    package_manifest_dir: Option<PathBuf>,

    /// How findings are printed
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    output_format: OutputFormat,

    /// Enable debug logging
    #[arg(short = 'd', long)]
    debug_logging: bool,

    /// Write a sample configuration file into the package directory
    #[arg(short = 'w', long)]
    write_configuration: bool,
}

fn init_logging(debug_logging: bool) {
    let level = if debug_logging { LevelFilter::Debug } else { LevelFilter::Info };
    // RUST_LOG still takes precedence over the flag.
    env_logger::Builder::new().filter_level(level).parse_default_env().init();
}

fn locate_manifest(manifest_dir: &Path) -> Result<PathBuf, Outcome> {
    let manifest = manifest_dir.join(MANIFEST_FILE_NAME);
    if !manifest.is_file() {
        error!("No {} found in {}", MANIFEST_FILE_NAME, manifest_dir.display());
        return Err(Outcome::ManifestNotFound);
    }
    Ok(manifest)
}

fn check_package(
    manifest_dir: &Path,
    config: &Configuration,
    file_system: &impl FileSystem,
) -> Result<CheckResult, Outcome> {
    spmlint_sanitizer::run_dependency_check(manifest_dir, config, file_system).map_err(|e| {
        error!("{:#}", e);
        Outcome::ManifestUnreadable
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug_logging);
    debug!("Parsed CLI arguments: {:?}", cli);

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    let mut stdout = BufWriter::new(std::io::stdout());

    let cwd = std::env::current_dir().context("Failed to determine the current directory")?;
    let manifest_dir = cli.package_manifest_dir.clone().unwrap_or_else(|| cwd.clone());

    match locate_manifest(&manifest_dir) {
        Ok(manifest) => debug!("Found manifest at {}", manifest.display()),
        Err(outcome) => process::exit(outcome.exit_code()),
    }

    if cli.write_configuration {
        let path = Configuration::write_sample(&manifest_dir)?;
        info!("Wrote sample configuration to {}", path.display());
    }

    let mut config = Configuration::load(&Configuration::candidate_paths(&manifest_dir, &cwd));
    config.enable_debug_logging = cli.debug_logging;
    debug!(
        "Config: swift={}, system frameworks={}, exported imports={}, \
         ignored frameworks={}, ignored targets={}",
        config.swift_exec_path.display(),
        config.system_frameworks.len(),
        config.exported_imports.len(),
        config.ignored_frameworks.len(),
        config.ignored_targets.len()
    );

    let num_threads = rayon::current_num_threads();
    info!("Checking {} (using {} threads)", manifest_dir.display(), num_threads);
    let start = Instant::now();

    let result = match check_package(&manifest_dir, &config, &LiveFileSystem) {
        Ok(result) => result,
        Err(outcome) => process::exit(outcome.exit_code()),
    };
    let elapsed_ms = start.elapsed().as_millis();

    match cli.output_format {
        OutputFormat::Json => spmlint_sanitizer::print_json(&mut stdout, &result.errors)?,
        OutputFormat::Table => {
            spmlint_sanitizer::print_table(&mut stdout, &result.errors)?;
            writeln!(
                stdout,
                "\n{} Finished in {}ms on {} targets and {} imports (using {} threads).",
                "●".bright_blue(),
                elapsed_ms.to_string().cyan(),
                result.targets_analyzed.to_string().cyan(),
                result.imports_found.to_string().cyan(),
                num_threads.to_string().cyan()
            )?;
        }
    }
    stdout.flush()?;

    if !result.errors.is_empty() {
        // Non-zero exit to fail CI
        process::exit(Outcome::Findings(result.errors.len()).exit_code());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Outcome::Findings(1).exit_code(), 1);
        assert_eq!(Outcome::Findings(253).exit_code(), 253);
        assert_eq!(Outcome::Findings(1000).exit_code(), 253);
        assert_eq!(Outcome::ManifestNotFound.exit_code(), 255);
        assert_eq!(Outcome::ManifestUnreadable.exit_code(), 254);
    }

    #[test]
    fn test_locate_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let outcome = locate_manifest(temp_dir.path()).unwrap_err();
        assert_eq!(outcome, Outcome::ManifestNotFound);
        assert_eq!(outcome.exit_code(), 255);

        let manifest = temp_dir.path().join(MANIFEST_FILE_NAME);
        std::fs::write(&manifest, "// swift-tools-version:5.9").unwrap();
        assert_eq!(locate_manifest(temp_dir.path()), Ok(manifest));
    }

    #[test]
    fn test_check_package_with_unreadable_manifest() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(MANIFEST_FILE_NAME), "// swift-tools-version:5.9")
            .unwrap();
        let config = Configuration {
            swift_exec_path: temp_dir.path().join("no-such-swift"),
            ..Configuration::default()
        };

        let outcome = check_package(temp_dir.path(), &config, &LiveFileSystem).unwrap_err();
        assert_eq!(outcome, Outcome::ManifestUnreadable);
        assert_eq!(outcome.exit_code(), 254);
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from(["spmlint", "-p", "/tmp/pkg", "-o", "json", "-d", "-w"]);
        assert_eq!(cli.package_manifest_dir, Some(PathBuf::from("/tmp/pkg")));
        assert_eq!(cli.output_format, OutputFormat::Json);
        assert!(cli.debug_logging);
        assert!(cli.write_configuration);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["spmlint"]);
        assert_eq!(cli.package_manifest_dir, None);
        assert_eq!(cli.output_format, OutputFormat::Table);
        assert!(!cli.debug_logging);
        assert!(!cli.write_configuration);
    }
}
