use std::collections::BTreeSet;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use rtb_contracts::{ABI_MAJOR_V1, RTB_BUILTINS_REQUIRES_SCHEMA_VERSION};
use rtb_targets::TargetId;

use crate::lookup;

/// Builtins a generated module links against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuiltinsRequires {
    pub schema_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub abi_major: u32,
    pub symbols: Vec<String>,
}

impl BuiltinsRequires {
    /// `target_override` wins over the document's own `target`; neither means full.
    pub fn resolve_target(&self, target_override: Option<TargetId>) -> Result<TargetId> {
        if let Some(t) = target_override {
            return Ok(t);
        }
        match self.target.as_deref() {
            None => Ok(TargetId::default()),
            Some(s) => TargetId::parse(s).ok_or_else(|| {
                anyhow::anyhow!("unknown target {s:?} (expected one of: full, restricted)")
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub target: TargetId,
    pub checked: usize,
    /// Not part of the ABI at all.
    pub unknown: Vec<String>,
    /// Part of the ABI but compiled out of `target`.
    pub unavailable: Vec<String>,
}

impl CheckOutcome {
    pub fn ok(&self) -> bool {
        self.unknown.is_empty() && self.unavailable.is_empty()
    }

    pub fn into_result(self) -> Result<()> {
        if self.ok() {
            return Ok(());
        }
        let mut lines: Vec<String> = Vec::new();
        for name in &self.unavailable {
            lines.push(format!(
                "builtin {name} is not available in target {}",
                self.target
            ));
        }
        for name in &self.unknown {
            lines.push(format!("unknown builtin {name}"));
        }
        anyhow::bail!("{}", lines.join("\n"));
    }
}

pub fn parse_requires(text: &str) -> Result<BuiltinsRequires> {
    let doc: BuiltinsRequires =
        serde_json::from_str(text).context("parse builtins requires JSON")?;
    Ok(doc)
}

pub fn check_requires(requires: &BuiltinsRequires, target: TargetId) -> Result<CheckOutcome> {
    if requires.schema_version != RTB_BUILTINS_REQUIRES_SCHEMA_VERSION {
        anyhow::bail!(
            "builtins requires schema_version mismatch: expected {} got {}",
            RTB_BUILTINS_REQUIRES_SCHEMA_VERSION,
            requires.schema_version
        );
    }
    if requires.abi_major != ABI_MAJOR_V1 {
        anyhow::bail!(
            "builtins ABI mismatch: requires abi_major={}, library has abi_major={}",
            requires.abi_major,
            ABI_MAJOR_V1
        );
    }

    let names: BTreeSet<&str> = requires.symbols.iter().map(|s| s.trim()).collect();

    let mut unknown: Vec<String> = Vec::new();
    let mut unavailable: Vec<String> = Vec::new();
    for name in &names {
        match lookup(name) {
            None => unknown.push((*name).to_string()),
            Some(sym) if !sym.available_in(target) => unavailable.push((*name).to_string()),
            Some(_) => {}
        }
    }

    Ok(CheckOutcome {
        target,
        checked: names.len(),
        unknown,
        unavailable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requires(symbols: &[&str]) -> BuiltinsRequires {
        BuiltinsRequires {
            schema_version: RTB_BUILTINS_REQUIRES_SCHEMA_VERSION.to_string(),
            target: None,
            abi_major: ABI_MAJOR_V1,
            symbols: symbols.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn full_target_accepts_every_builtin() {
        let req = requires(&[
            "rtb_builtins_print_str_v1",
            "rtb_builtins_abs_v1",
            "rtb_builtins_print_i32_v1",
            "rtb_builtins_abs_v1",
        ]);
        let out = check_requires(&req, TargetId::Full).expect("check");
        assert!(out.ok());
        assert_eq!(out.checked, 3);
        out.into_result().expect("ok");
    }

    #[test]
    fn restricted_target_rejects_print_builtins() {
        let req = requires(&[
            "rtb_builtins_abs_v1",
            "rtb_builtins_print_str_v1",
            "rtb_builtins_print_i32_v1",
        ]);
        let out = check_requires(&req, TargetId::Restricted).expect("check");
        assert!(!out.ok());
        assert_eq!(
            out.unavailable,
            ["rtb_builtins_print_i32_v1", "rtb_builtins_print_str_v1"]
        );
        assert!(out.unknown.is_empty());

        let err = out.into_result().unwrap_err();
        assert_eq!(
            err.to_string(),
            "builtin rtb_builtins_print_i32_v1 is not available in target restricted\n\
             builtin rtb_builtins_print_str_v1 is not available in target restricted"
        );
    }

    #[test]
    fn unknown_symbols_are_reported() {
        let req = requires(&["rtb_builtins_abs_v1", "rtb_builtins_sqrt_v1"]);
        let out = check_requires(&req, TargetId::Full).expect("check");
        assert_eq!(out.unknown, ["rtb_builtins_sqrt_v1"]);
        assert!(out.unavailable.is_empty());
    }

    #[test]
    fn schema_and_abi_mismatches_are_errors() {
        let mut req = requires(&["rtb_builtins_abs_v1"]);
        req.abi_major = 2;
        let err = check_requires(&req, TargetId::Full).unwrap_err();
        assert!(err.to_string().contains("abi_major=2"), "{err:#}");

        let mut req = requires(&["rtb_builtins_abs_v1"]);
        req.schema_version = "rtb.builtins-requires@9.9.9".to_string();
        let err = check_requires(&req, TargetId::Full).unwrap_err();
        assert!(err.to_string().contains("schema_version mismatch"), "{err:#}");
    }

    #[test]
    fn target_resolution_order() {
        let mut req = requires(&[]);
        assert_eq!(req.resolve_target(None).unwrap(), TargetId::Full);

        req.target = Some("restricted".to_string());
        assert_eq!(req.resolve_target(None).unwrap(), TargetId::Restricted);
        assert_eq!(
            req.resolve_target(Some(TargetId::Full)).unwrap(),
            TargetId::Full
        );

        req.target = Some("wasm".to_string());
        assert!(req.resolve_target(None).is_err());
    }

    #[test]
    fn parse_rejects_unknown_fields() {
        let text = format!(
            r#"{{"schema_version":"{RTB_BUILTINS_REQUIRES_SCHEMA_VERSION}","abi_major":1,"symbols":[],"world":"x"}}"#
        );
        assert!(parse_requires(&text).is_err());
    }
}
