use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use rtb_contracts::RTB_CHECK_REPORT_SCHEMA_VERSION;
use rtb_targets::TargetId;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Builtins requires JSON emitted alongside the generated module.
    #[arg(long, value_name = "PATH")]
    pub requires: PathBuf,

    /// Target to check against (defaults to the document's `target`, then full).
    #[arg(long, value_enum)]
    pub target: Option<TargetId>,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    schema_version: &'static str,
    ok: bool,
    command: &'static str,
    target: &'static str,
    checked: usize,
    unknown: Vec<String>,
    unavailable: Vec<String>,
}

pub fn cmd_check(args: CheckArgs) -> Result<std::process::ExitCode> {
    let text = std::fs::read_to_string(&args.requires)
        .with_context(|| format!("read builtins requires: {}", args.requires.display()))?;
    let requires = rtb_abi::parse_requires(&text)
        .with_context(|| format!("load builtins requires: {}", args.requires.display()))?;
    let target = requires.resolve_target(args.target)?;
    let outcome = rtb_abi::check_requires(&requires, target)?;

    let ok = outcome.ok();
    let report = CheckReport {
        schema_version: RTB_CHECK_REPORT_SCHEMA_VERSION,
        ok,
        command: "check",
        target: target.as_str(),
        checked: outcome.checked,
        unknown: outcome.unknown,
        unavailable: outcome.unavailable,
    };

    let mut bytes = serde_json::to_vec(&report)?;
    bytes.push(b'\n');
    crate::write_output(None, &bytes)?;

    if !ok {
        for name in &report.unavailable {
            eprintln!("error: builtin {name} is not available in target {target}");
        }
        for name in &report.unknown {
            eprintln!("error: unknown builtin {name}");
        }
    }

    Ok(if ok {
        std::process::ExitCode::SUCCESS
    } else {
        std::process::ExitCode::from(1)
    })
}
