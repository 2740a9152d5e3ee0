use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use onekeymap_common::{OnekeymapError, Platform, Result};
use onekeymap_config::{settings, MappingConfig, Settings};
use onekeymap_keymap::{load_setting, save_setting, Keymap};
use onekeymap_plugins::{Plugin, Registry};
use tracing::{debug, info};

/// Everything a subcommand needs: settings, the mapping table and the
/// plugins built from it.
pub struct App {
    pub settings: Settings,
    pub mappings: Arc<MappingConfig>,
    pub registry: Registry,
}

impl App {
    pub fn new(settings: Settings, mappings_path: Option<&Path>) -> Result<Self> {
        let mappings = match mappings_path {
            Some(path) => MappingConfig::load_from_path(path)?,
            None => MappingConfig::builtin()?,
        };
        info!("Action mappings loaded ({} actions)", mappings.len());
        let mappings = Arc::new(mappings);
        let registry = Registry::with_builtin(mappings.clone())?;
        Ok(Self {
            settings,
            mappings,
            registry,
        })
    }

    pub fn plugin(&self, editor: &str) -> Result<Arc<dyn Plugin>> {
        self.registry.get_by_name(editor)
    }

    /// `explicit`, else the configured `onekeymap.json`, else the default one.
    pub fn onekeymap_path(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }
        match &self.settings.onekeymap {
            Some(path) => Ok(path.clone()),
            None => Ok(settings::default_onekeymap_path()?),
        }
    }

    /// `explicit`, else the configured path for the editor, else the first
    /// detected location.
    pub fn editor_path(&self, plugin: &dyn Plugin, explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }
        let editor = plugin.editor_type();
        if let Some(path) = self.settings.editor_keymap_path(editor.as_str()) {
            return Ok(path.clone());
        }
        let detected = plugin.config_detect(Platform::current());
        debug!("detected {} keymap locations for {editor}", detected.len());
        detected.into_iter().next().ok_or_else(|| {
            OnekeymapError::Other(format!(
                "could not locate the {} keymap file, pass it explicitly",
                editor.app_name()
            ))
        })
    }

    /// The keymap in `path`. A missing file is an empty keymap.
    pub fn load_keymap(&self, path: &Path) -> Result<Keymap> {
        match read_optional(path)? {
            Some(data) => load_setting(&data),
            None => {
                debug!("{} does not exist yet", path.display());
                Ok(Keymap::default())
            }
        }
    }

    pub fn save_keymap(&self, path: &Path, keymap: &Keymap) -> Result<()> {
        write_file(path, &save_setting(keymap, Platform::MacOs)?)
    }
}

/// File content, or `None` when the file does not exist.
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(data) => Ok(Some(data)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    info!("wrote {}", path.display());
    Ok(())
}
