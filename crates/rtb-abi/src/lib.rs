//! Description of the builtins ABI for toolchains.
//!
//! The symbol table here is authoritative: headers, manifests and requires checks
//! are all derived from it, and it must list exactly what `rtb-builtins-native`
//! exports for each target.

use rtb_targets::TargetId;

pub mod header;
pub mod manifest;
pub mod requires;

pub use header::render_c_header;
pub use manifest::{manifest_for, BuiltinsManifest, ManifestSymbol};
pub use requires::{check_requires, parse_requires, BuiltinsRequires, CheckOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CType {
    Void,
    I32,
    U32,
    StrPtr,
}

impl CType {
    pub fn as_c(self) -> &'static str {
        match self {
            CType::Void => "void",
            CType::I32 => "int32_t",
            CType::U32 => "uint32_t",
            CType::StrPtr => "const rtb_str *",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinSymbol {
    pub name: &'static str,
    pub ret: CType,
    pub params: &'static [(&'static str, CType)],
    /// Compiled out of targets without a console.
    pub needs_console: bool,
    pub doc: &'static str,
}

impl BuiltinSymbol {
    pub fn available_in(&self, target: TargetId) -> bool {
        !self.needs_console || target.caps().allow_console
    }

    /// C prototype without the trailing semicolon, e.g. `int32_t rtb_builtins_abs_v1(int32_t x)`.
    pub fn c_signature(&self) -> String {
        let params = if self.params.is_empty() {
            "void".to_string()
        } else {
            self.params
                .iter()
                .map(|(name, ty)| {
                    let ty = ty.as_c();
                    if ty.ends_with('*') {
                        format!("{ty}{name}")
                    } else {
                        format!("{ty} {name}")
                    }
                })
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!("{} {}({})", self.ret.as_c(), self.name, params)
    }
}

pub const SYMBOLS_V1: &[BuiltinSymbol] = &[
    BuiltinSymbol {
        name: "rtb_builtins_abs_v1",
        ret: CType::I32,
        params: &[("x", CType::I32)],
        needs_console: false,
        doc: "Absolute value; INT32_MIN maps to itself.",
    },
    BuiltinSymbol {
        name: "rtb_builtins_target_v1",
        ret: CType::U32,
        params: &[],
        needs_console: false,
        doc: "Target the library was built for: 0 = full, 1 = restricted.",
    },
    BuiltinSymbol {
        name: "rtb_builtins_print_i32_v1",
        ret: CType::Void,
        params: &[("x", CType::I32)],
        needs_console: true,
        doc: "Writes x in base 10 to stdout, no newline.",
    },
    BuiltinSymbol {
        name: "rtb_builtins_print_str_v1",
        ret: CType::Void,
        params: &[("s", CType::StrPtr)],
        needs_console: true,
        doc: "Writes the bytes of s to stdout, no newline. Traps on an invalid handle.",
    },
    BuiltinSymbol {
        name: "rtb_builtins_print_newline_v1",
        ret: CType::Void,
        params: &[],
        needs_console: true,
        doc: "Writes a single newline to stdout.",
    },
];

pub fn symbols_for(target: TargetId) -> impl Iterator<Item = &'static BuiltinSymbol> {
    SYMBOLS_V1.iter().filter(move |s| s.available_in(target))
}

pub fn lookup(name: &str) -> Option<&'static BuiltinSymbol> {
    SYMBOLS_V1.iter().find(|s| s.name == name)
}
