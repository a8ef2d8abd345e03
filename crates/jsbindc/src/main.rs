//! The jsbind code generator CLI.
//!
//! Provides the `jsbindc` command with the following subcommands:
//!
//! - `jsbindc gen <manifest>` - Print argument conversion code for every function
//! - `jsbindc check <manifest>` - Resolve every function without printing code
//!
//! Options:
//! - `--function` - Only generate the named function
//! - `--json` - Output one JSON object per function instead of Go text
//! - `--no-color` - Disable colorized diagnostics
//!
//! Set `RUST_LOG` (e.g. `RUST_LOG=jsbind_gen=trace`) to see resolver decisions.

mod diagnostics;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use jsbind_gen::printer::render_binding;
use manifest::{Manifest, Project};

#[derive(Parser)]
#[command(
    name = "jsbindc",
    version,
    about = "Generate JS-to-native argument conversion code"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the argument conversion code for each function in a manifest
    Gen {
        /// Path to the jsbind.toml manifest
        manifest: PathBuf,

        /// Only generate this function
        #[arg(long)]
        function: Option<String>,

        /// Output one JSON object per line instead of Go text
        #[arg(long)]
        json: bool,

        /// Disable colorized output
        #[arg(long = "no-color")]
        no_color: bool,
    },
    /// Resolve every function in a manifest and report problems
    Check {
        /// Path to the jsbind.toml manifest
        manifest: PathBuf,

        /// Disable colorized output
        #[arg(long = "no-color")]
        no_color: bool,
    },
}

/// Logs go to stderr so generated code on stdout stays clean.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Gen {
            manifest,
            function,
            json,
            no_color,
        } => gen(&manifest, function.as_deref(), json, !no_color && !json),
        Commands::Check { manifest, no_color } => check(&manifest, !no_color),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

/// Load a manifest and read its type expressions. Bad type text is reported
/// here, all of it at once.
fn load(path: &Path, json: bool, color: bool) -> Result<Project, String> {
    let manifest = Manifest::from_file(path)?;
    debug!(
        path = %path.display(),
        package = %manifest.package.name,
        description = manifest.package.description.as_deref().unwrap_or(""),
        types = manifest.types.len(),
        functions = manifest.functions.len(),
        "manifest loaded"
    );

    manifest.lower().map_err(|errors| {
        for err in &errors {
            if json {
                eprintln!("{}", diagnostics::type_error_json(err));
            } else {
                eprint!("{}", diagnostics::render_type_error(err, color));
            }
        }
        format!(
            "{} invalid type expression(s) in '{}'",
            errors.len(),
            path.display()
        )
    })
}

fn gen(path: &Path, only: Option<&str>, json: bool, color: bool) -> Result<(), String> {
    let mut project = load(path, json, color)?;

    if let Some(name) = only {
        project.signatures.retain(|sig| sig.name == name);
        if project.signatures.is_empty() {
            return Err(format!(
                "no function named '{}' in '{}'",
                name,
                path.display()
            ));
        }
    }

    let results = jsbind_gen::bind_all(&project.aliases, &project.options, &project.signatures);
    let mut failed = 0;
    let mut first = true;

    for (sig, result) in project.signatures.iter().zip(&results) {
        match result {
            Ok(binding) => {
                let code = render_binding(binding);
                if json {
                    let obj = serde_json::json!({
                        "function": binding.name,
                        "binding": binding,
                        "go": code,
                    });
                    println!("{}", obj);
                } else {
                    if !first {
                        println!();
                    }
                    println!("// {}", binding.name);
                    println!("{}", code);
                }
                first = false;
            }
            Err(err) => {
                failed += 1;
                warn!(function = %sig.name, "resolution failed");
                if json {
                    eprintln!("{}", diagnostics::resolve_error_json(&sig.name, err));
                } else {
                    eprintln!("error: function `{}`: {}", sig.name, err);
                }
            }
        }
    }

    info!(
        package = %project.name,
        generated = results.len() - failed,
        failed,
        "generation finished"
    );

    if failed > 0 {
        return Err(format!("{} of {} function(s) failed", failed, results.len()));
    }
    Ok(())
}

fn check(path: &Path, color: bool) -> Result<(), String> {
    let project = load(path, false, color)?;
    let results = jsbind_gen::bind_all(&project.aliases, &project.options, &project.signatures);

    let mut failed = 0;
    for (sig, result) in project.signatures.iter().zip(&results) {
        if let Err(err) = result {
            failed += 1;
            eprintln!("error: function `{}`: {}", sig.name, err);
        }
    }

    if failed > 0 {
        return Err(format!("{} of {} function(s) failed", failed, results.len()));
    }
    eprintln!(
        "  Checked: {} ({} function(s))",
        project.name,
        results.len()
    );
    Ok(())
}
