//! Onekeymap configuration.
//!
//! Two independent inputs live here: the action-mapping table that ties
//! universal action ids to editor commands, and the settings file of the
//! command line tool.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use onekeymap_config::MappingConfig;
//! use onekeymap_common::EditorType;
//!
//! let mappings = MappingConfig::builtin().expect("built-in table is valid");
//! let copy = mappings.get("actions.edit.copy").unwrap();
//! assert!(copy.is_supported(EditorType::Zed).0);
//! ```

pub mod mappings;
pub mod settings;

pub use mappings::{
    ensure_trailing_colon, ActionMappingConfig, EditorActionMapping, HelixMappingConfig, HelixMode,
    IntelliJMappingConfig, MappingConfig, VscodeMappingConfig, XcodeMappingConfig, XcodeMenuAction, ZedMappingConfig,
    EXPLICITLY_NOT_SUPPORTED,
};
pub use settings::{EditorSettings, Settings};
