//! CLI settings file loading.

mod loader;
mod paths;
mod schema;

#[cfg(test)]
mod tests;

pub use loader::{apply_env_overrides, load_default, load_from_path};
pub use paths::{default_onekeymap_path, default_settings_path};
pub use schema::{EditorSettings, Settings};
