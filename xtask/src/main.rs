use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};
use walkdir::WalkDir;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the layer publishing workspace",
    long_about = "A unified CLI for CI checks, packaging layer archives,\n\
                  and publishing them with upload_layer."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run CI checks (fmt, clippy, tests)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
    /// Zip a directory into a Lambda layer archive
    PackageLayer {
        /// Directory whose files become the layer contents
        #[arg(long)]
        source: String,
        /// Output zip path
        #[arg(long, default_value = "dist/layer.zip")]
        output: String,
        /// Root folder inside the archive (Python layers load from `python/`)
        #[arg(long, default_value = "python")]
        prefix: String,
    },
    /// Publish a layer zip via the upload_layer binary
    PublishLayer {
        /// Arguments forwarded to upload_layer
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting and clippy
    Lint,
    /// Workspace tests
    Test,
    /// Lint + test
    Check,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn archive_entry_name(prefix: &str, relative: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();
    let prefix = prefix.trim_matches('/');
    if !prefix.is_empty() {
        parts.push(prefix.to_string());
    }
    parts.extend(
        relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy().into_owned()),
    );
    parts.join("/")
}

fn package_layer_zip(source: &Path, zip_path: &Path, prefix: &str) -> usize {
    if !source.is_dir() {
        panic!("expected layer source directory at '{}'", source.display());
    }

    if let Some(parent) = zip_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).expect("failed to create layer output directory");
        }
    }

    let file = fs::File::create(zip_path).expect("failed to create layer zip");
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut entries = 0usize;
    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry.expect("failed to walk layer source directory");
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(source)
            .expect("walked path should live under the source directory");
        let contents = fs::read(entry.path()).expect("failed to read layer file");
        zip.start_file(archive_entry_name(prefix, relative), options)
            .expect("failed to start layer zip entry");
        zip.write_all(&contents)
            .expect("failed to write layer zip entry");
        entries += 1;
    }
    zip.finish().expect("failed to finish layer zip");

    eprintln!(
        "\nPackaged {entries} file(s) into:\n- {}",
        zip_path.display()
    );
    entries
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_lint() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);
}

fn ci_test() {
    step("Test layer_publish_core");
    run_cargo(&["test", "-p", "layer_publish_core"]);

    step("Test layer_publish_aws");
    run_cargo(&["test", "-p", "layer_publish_aws"]);

    step("Test xtask");
    run_cargo(&["test", "-p", "xtask"]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci { job } => {
            match job {
                CiJob::Lint => ci_lint(),
                CiJob::Test => ci_test(),
                CiJob::Check => {
                    ci_lint();
                    ci_test();
                }
            }
            eprintln!("\nCI job passed.");
        }
        Commands::PackageLayer {
            source,
            output,
            prefix,
        } => {
            step("Package layer zip");
            package_layer_zip(Path::new(&source), Path::new(&output), &prefix);
        }
        Commands::PublishLayer { args } => {
            let mut cargo_args = vec![
                "run",
                "-p",
                "layer_publish_aws",
                "--bin",
                "upload_layer",
                "--",
            ];
            cargo_args.extend(args.iter().map(String::as_str));
            run_cargo(&cargo_args);
        }
    }
}
