//! Build targets for the builtins surface.
//!
//! This crate exists so both:
//! - the native builtins library (Rust, linked into generated code)
//! - toolchain code (header/manifest emitters, requires checks)
//!
//! can share an authoritative list of targets and what each one is allowed to do.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum TargetId {
    /// Hosted build: every builtin is present.
    #[default]
    Full,
    /// Sandboxed build with no console; print builtins are compiled out.
    Restricted,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TargetCaps {
    pub allow_console: bool,
}

impl TargetId {
    pub const ALL: [TargetId; 2] = [TargetId::Full, TargetId::Restricted];

    pub fn as_str(self) -> &'static str {
        match self {
            TargetId::Full => "full",
            TargetId::Restricted => "restricted",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "full" => Some(TargetId::Full),
            "restricted" => Some(TargetId::Restricted),
            _ => None,
        }
    }

    pub fn caps(self) -> TargetCaps {
        match self {
            TargetId::Full => TargetCaps {
                allow_console: true,
            },
            TargetId::Restricted => TargetCaps {
                allow_console: false,
            },
        }
    }

    /// Numeric code reported across the C ABI by `rtb_builtins_target_v1`.
    pub fn abi_code(self) -> u32 {
        match self {
            TargetId::Full => 0,
            TargetId::Restricted => 1,
        }
    }

    pub fn from_abi_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(TargetId::Full),
            1 => Some(TargetId::Restricted),
            _ => None,
        }
    }
}

impl std::fmt::Display for TargetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_parse() {
        for &t in &TargetId::ALL {
            assert_eq!(TargetId::parse(t.as_str()), Some(t));
            assert_eq!(t.to_string(), t.as_str());
        }
        assert_eq!(TargetId::parse("  restricted\n"), Some(TargetId::Restricted));
        assert_eq!(TargetId::parse("wasm"), None);
        assert_eq!(TargetId::parse(""), None);
    }

    #[test]
    fn only_full_target_has_console() {
        assert!(TargetId::Full.caps().allow_console);
        assert!(!TargetId::Restricted.caps().allow_console);
        assert_eq!(TargetId::default(), TargetId::Full);
    }

    #[test]
    fn abi_codes_are_stable() {
        assert_eq!(TargetId::Full.abi_code(), 0);
        assert_eq!(TargetId::Restricted.abi_code(), 1);
        for &t in &TargetId::ALL {
            assert_eq!(TargetId::from_abi_code(t.abi_code()), Some(t));
        }
        assert_eq!(TargetId::from_abi_code(2), None);
    }
}
