//! Build automation for airbyte-kube
//!
//! Usage: cargo xtask <command>
//!
//! Available commands:
//! - build: Build the project
//! - test: Run tests
//! - manifests: Render the default chart into dist/
//! - ci: Run CI checks

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use xshell::{cmd, Shell};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for airbyte-kube")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the project
    Build {
        /// Build in release mode
        #[arg(long)]
        release: bool,
    },
    /// Run tests
    Test {
        /// Run only the chart image tests
        #[arg(long)]
        images: bool,
    },
    /// Render manifests and the image list for a values file into dist/
    Manifests {
        /// Values file passed through to the renderer
        #[arg(long, short = 'f')]
        values: Option<String>,
    },
    /// Run CI checks (format, clippy, test)
    Ci,
    /// Format code
    Format {
        /// Check formatting without modifying files
        #[arg(long)]
        check: bool,
    },
    /// Run clippy
    Clippy,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let sh = Shell::new()?;

    sh.change_dir(project_root()?);

    match cli.command {
        Commands::Build { release } => build(&sh, release),
        Commands::Test { images } => test(&sh, images),
        Commands::Manifests { values } => manifests(&sh, values),
        Commands::Ci => ci(&sh),
        Commands::Format { check } => format(&sh, check),
        Commands::Clippy => clippy(&sh),
    }
}

fn build(sh: &Shell, release: bool) -> Result<()> {
    println!("🔨 Building airbyte-kube...");

    if release {
        cmd!(sh, "cargo build --release").run()?;
        println!("✅ Release build completed: target/release/airbyte-kube");
    } else {
        cmd!(sh, "cargo build").run()?;
        println!("✅ Debug build completed: target/debug/airbyte-kube");
    }

    Ok(())
}

fn test(sh: &Shell, images: bool) -> Result<()> {
    println!("🧪 Running tests...");

    if images {
        cmd!(sh, "cargo test --test image_test").run()?;
    } else {
        cmd!(sh, "cargo test --all").run()?;
    }

    println!("✅ All tests passed");
    Ok(())
}

fn manifests(sh: &Shell, values: Option<String>) -> Result<()> {
    println!("📦 Rendering manifests...");

    let dist_dir = project_root()?.join("dist");
    sh.create_dir(&dist_dir)?;

    let values_args: Vec<String> = match values {
        Some(file) => vec!["-f".to_string(), file],
        None => Vec::new(),
    };

    let manifests = cmd!(sh, "cargo run --quiet -- render {values_args...}")
        .read()
        .context("Failed to render manifests")?;
    let manifests_path = dist_dir.join("airbyte.yaml");
    sh.write_file(&manifests_path, manifests)?;

    let images = cmd!(sh, "cargo run --quiet -- images {values_args...}")
        .env("NO_COLOR", "1")
        .read()
        .context("Failed to list images")?;
    let images_path = dist_dir.join("images.txt");
    sh.write_file(&images_path, images)?;

    println!(
        "✅ Wrote {} and {}",
        manifests_path.display(),
        images_path.display()
    );
    Ok(())
}

fn ci(sh: &Shell) -> Result<()> {
    println!("🔍 Running CI checks...");

    println!("\n📝 Checking formatting...");
    format(sh, true)?;

    println!("\n🔧 Running clippy...");
    clippy(sh)?;

    println!("\n🧪 Running tests...");
    test(sh, false)?;

    println!("\n✅ All CI checks passed!");
    Ok(())
}

fn format(sh: &Shell, check: bool) -> Result<()> {
    if check {
        cmd!(sh, "cargo fmt --all -- --check").run()?;
        println!("✅ Code formatting is correct");
    } else {
        cmd!(sh, "cargo fmt --all").run()?;
        println!("✅ Code formatted");
    }
    Ok(())
}

fn clippy(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo clippy --all-targets --all-features -- -D warnings").run()?;
    println!("✅ Clippy checks passed");
    Ok(())
}

fn project_root() -> Result<PathBuf> {
    Path::new(&env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(1)
        .map(Path::to_path_buf)
        .context("xtask must live one level below the workspace root")
}
