use std::collections::BTreeMap;
use std::sync::Arc;

use onekeymap_common::{EditorFamily, EditorType, OnekeymapError, Result};
use onekeymap_config::MappingConfig;
use tracing::debug;

use crate::{HelixPlugin, IntelliJPlugin, Plugin, VscodePlugin, XcodePlugin, ZedPlugin};

/// Maps editors to their [`Plugin`].
///
/// Built once from the mapping table; every built-in plugin shares it.
#[derive(Clone, Default)]
pub struct Registry {
    plugins: BTreeMap<EditorType, Arc<dyn Plugin>>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with a plugin for every [`EditorType`].
    pub fn with_builtin(mappings: Arc<MappingConfig>) -> Result<Self> {
        let mut registry = Self::new();
        for editor in EditorType::ALL {
            let plugin: Arc<dyn Plugin> = match editor.family() {
                EditorFamily::VsCode => Arc::new(VscodePlugin::new(editor, mappings.clone())?),
                EditorFamily::IntelliJ => Arc::new(IntelliJPlugin::new(editor, mappings.clone())?),
                EditorFamily::Zed => Arc::new(ZedPlugin::new(mappings.clone())),
                EditorFamily::Xcode => Arc::new(XcodePlugin::new(mappings.clone())),
                EditorFamily::Helix => Arc::new(HelixPlugin::new(mappings.clone())),
            };
            registry.register(plugin);
        }
        Ok(registry)
    }

    /// Adds `plugin` under its editor type, replacing any previous one.
    pub fn register(&mut self, plugin: Arc<dyn Plugin>) {
        let editor = plugin.editor_type();
        if self.plugins.insert(editor, plugin).is_some() {
            debug!("replaced plugin for {editor}");
        }
    }

    pub fn get(&self, editor: EditorType) -> Option<Arc<dyn Plugin>> {
        self.plugins.get(&editor).cloned()
    }

    /// Looks a plugin up by its string name, e.g. `intellij.goland`.
    pub fn get_by_name(&self, name: &str) -> Result<Arc<dyn Plugin>> {
        let editor: EditorType = name
            .parse()
            .map_err(|_| OnekeymapError::UnknownEditor(name.to_string()))?;
        self.get(editor)
            .ok_or_else(|| OnekeymapError::Other(format!("no plugin registered for {editor}")))
    }

    /// Registered editor names in declaration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.plugins.keys().map(EditorType::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
