//! Shared, version-pinned identifiers for the builtins ABI.
//!
//! These constants are the single source of truth for schema/version strings that
//! appear in machine-readable I/O and for the ABI major baked into symbol names.

pub const RTB_BUILTINS_MANIFEST_SCHEMA_VERSION: &str = "rtb.builtins-manifest@0.1.0";
pub const RTB_BUILTINS_REQUIRES_SCHEMA_VERSION: &str = "rtb.builtins-requires@0.1.0";
pub const RTB_CHECK_REPORT_SCHEMA_VERSION: &str = "rtb.check.report@0.1.0";

/// ABI major of the exported builtins; every symbol carries the `_v1` suffix.
pub const ABI_MAJOR_V1: u32 = 1;

/// Library name generated code links against (`librtb_builtins.a` / `rtb_builtins.lib`).
pub const LIB_NAME: &str = "rtb_builtins";

// Trap codes reported when a builtin fails fast. Also emitted into the C header.
pub const RTB_TRAP_INVALID_HANDLE: i32 = 9900;
pub const RTB_TRAP_INTERNAL: i32 = 9901;
