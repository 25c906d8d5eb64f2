use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser};
use rtb_targets::TargetId;

mod check;

#[derive(Parser, Debug)]
#[command(name = "rtb")]
#[command(about = "Runtime builtins ABI utilities.", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Emit the C header declaring the builtins of a target.
    Header(EmitArgs),
    /// Emit the JSON symbol manifest of a target.
    Manifest(EmitArgs),
    /// Verify that a generated module only requires builtins the target provides.
    Check(check::CheckArgs),
}

#[derive(Debug, Args)]
struct EmitArgs {
    #[arg(long, value_enum, default_value = "full")]
    target: TargetId,

    /// Write to PATH instead of stdout.
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,
}

fn main() -> std::process::ExitCode {
    match try_main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            std::process::ExitCode::from(2)
        }
    }
}

fn try_main() -> Result<std::process::ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Command::Header(args) => {
            let text = rtb_abi::render_c_header(args.target);
            write_output(args.out.as_deref(), text.as_bytes())?;
            Ok(std::process::ExitCode::SUCCESS)
        }
        Command::Manifest(args) => {
            let manifest = rtb_abi::manifest_for(args.target);
            let mut bytes = serde_json::to_vec_pretty(&manifest)?;
            bytes.push(b'\n');
            write_output(args.out.as_deref(), &bytes)?;
            Ok(std::process::ExitCode::SUCCESS)
        }
        Command::Check(args) => check::cmd_check(args),
    }
}

pub(crate) fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        None => std::io::Write::write_all(&mut std::io::stdout(), bytes).context("write stdout"),
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("create dir: {}", parent.display()))?;
                }
            }
            std::fs::write(path, bytes).with_context(|| format!("write: {}", path.display()))
        }
    }
}
