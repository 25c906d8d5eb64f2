use serde::{Deserialize, Serialize};

use rtb_contracts::{ABI_MAJOR_V1, LIB_NAME, RTB_BUILTINS_MANIFEST_SCHEMA_VERSION};
use rtb_targets::TargetId;

use crate::symbols_for;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuiltinsManifest {
    pub schema_version: String,
    pub abi_major: u32,
    pub target: String,
    pub lib_name: String,
    pub symbols: Vec<ManifestSymbol>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestSymbol {
    pub name: String,
    pub signature: String,
}

pub fn manifest_for(target: TargetId) -> BuiltinsManifest {
    BuiltinsManifest {
        schema_version: RTB_BUILTINS_MANIFEST_SCHEMA_VERSION.to_string(),
        abi_major: ABI_MAJOR_V1,
        target: target.as_str().to_string(),
        lib_name: LIB_NAME.to_string(),
        symbols: symbols_for(target)
            .map(|s| ManifestSymbol {
                name: s.name.to_string(),
                signature: s.c_signature(),
            })
            .collect(),
    }
}
