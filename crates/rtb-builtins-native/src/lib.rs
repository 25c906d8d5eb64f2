#![allow(non_camel_case_types)]
#![allow(clippy::missing_safety_doc)]

//! Builtins linked into generated programs.
//!
//! Exported names are the ABI: generated code calls them by exact symbol, so a
//! rename breaks every caller. Without the `console` feature the print symbols
//! are not compiled at all and a program referencing them fails to link.

pub mod surface;
pub mod text;

use rtb_targets::TargetId;

pub use surface::{abs_i32, BuiltinError, Builtins, Restricted, Surface};
#[cfg(feature = "console")]
pub use surface::{Console, ConsoleBuiltins};
pub use surface::{RTB_TRAP_INTERNAL, RTB_TRAP_INVALID_HANDLE};
pub use text::{rtb_str, HandleFault, Text, TextBuf};

/// Target this library was built for.
#[cfg(feature = "console")]
pub const TARGET: TargetId = TargetId::Full;
#[cfg(not(feature = "console"))]
pub const TARGET: TargetId = TargetId::Restricted;

#[cfg(feature = "console")]
fn trap(code: i32, detail: &dyn std::fmt::Display) -> ! {
    use std::io::Write as _;

    let _ = writeln!(std::io::stderr().lock(), "rtb: trap {code}: {detail}");
    std::process::abort()
}

#[no_mangle]
pub extern "C" fn rtb_builtins_abs_v1(x: i32) -> i32 {
    abs_i32(x)
}

/// 0 = full, 1 = restricted. Lets a host confirm which archive it linked.
#[no_mangle]
pub extern "C" fn rtb_builtins_target_v1() -> u32 {
    TARGET.abi_code()
}

#[cfg(feature = "console")]
#[no_mangle]
pub extern "C" fn rtb_builtins_print_i32_v1(x: i32) {
    // The host owns stdout; a failed write is dropped, only a panic traps.
    let r = std::panic::catch_unwind(|| Console::stdout().print_i32(x));
    if r.is_err() {
        trap(RTB_TRAP_INTERNAL, &"panic in print_i32");
    }
}

#[cfg(feature = "console")]
#[no_mangle]
pub unsafe extern "C" fn rtb_builtins_print_str_v1(s: *const rtb_str) {
    let text = match Text::from_raw(s) {
        Ok(text) => text,
        Err(fault) => {
            let err = BuiltinError::from(fault);
            trap(err.trap_code(), &err)
        }
    };
    let r = std::panic::catch_unwind(|| Console::stdout().print_str(text));
    if r.is_err() {
        trap(RTB_TRAP_INTERNAL, &"panic in print_str");
    }
}

#[cfg(feature = "console")]
#[no_mangle]
pub extern "C" fn rtb_builtins_print_newline_v1() {
    let r = std::panic::catch_unwind(|| Console::stdout().print_newline());
    if r.is_err() {
        trap(RTB_TRAP_INTERNAL, &"panic in print_newline");
    }
}
