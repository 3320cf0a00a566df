//! Identity of this module, for subsystems that need to load from it.

use serde::Serialize;

/// Static identity of the diagnostics module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModuleInfo {
    pub name: &'static str,
    pub version: &'static str,
}

static MODULE_INFO: ModuleInfo = ModuleInfo {
    name: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
};

/// The module's own identity.
pub fn module_info() -> &'static ModuleInfo {
    &MODULE_INFO
}
