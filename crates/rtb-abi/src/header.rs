use std::fmt::Write as _;

use rtb_contracts::{ABI_MAJOR_V1, RTB_TRAP_INTERNAL, RTB_TRAP_INVALID_HANDLE};
use rtb_targets::TargetId;

use crate::symbols_for;

/// C header declaring the builtins available in `target`.
///
/// The restricted header carries no print prototypes, so generated code that
/// calls one is rejected by the C compiler before it ever reaches the linker.
pub fn render_c_header(target: TargetId) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "/* Generated by rtb (target={}, abi_major={}). Do not edit. */",
        target.as_str(),
        ABI_MAJOR_V1
    );
    out.push_str("#ifndef RTB_BUILTINS_H\n#define RTB_BUILTINS_H\n\n");
    out.push_str("#include <stddef.h>\n#include <stdint.h>\n\n");

    let _ = writeln!(out, "#define RTB_BUILTINS_ABI_MAJOR {ABI_MAJOR_V1}");
    let _ = writeln!(out, "#define RTB_BUILTINS_TARGET {}", target.abi_code());
    if !target.caps().allow_console {
        out.push_str("#define RTB_BUILTINS_RESTRICTED 1\n");
    }
    let _ = writeln!(out, "#define RTB_TRAP_INVALID_HANDLE {RTB_TRAP_INVALID_HANDLE}");
    let _ = writeln!(out, "#define RTB_TRAP_INTERNAL {RTB_TRAP_INTERNAL}");
    out.push('\n');

    out.push_str("#ifdef __cplusplus\nextern \"C\" {\n#endif\n\n");

    out.push_str("/* Length-prefixed text; owned by the caller, borrowed for one call. */\n");
    out.push_str("typedef struct rtb_str {\n    size_t len;\n    const char utf8[];\n} rtb_str;\n");

    for sym in symbols_for(target) {
        out.push('\n');
        let _ = writeln!(out, "/* {} */", sym.doc);
        let _ = writeln!(out, "{};", sym.c_signature());
    }

    out.push_str("\n#ifdef __cplusplus\n}\n#endif\n\n#endif /* RTB_BUILTINS_H */\n");
    out
}
