//! Tests for the Zed plugin.

use super::*;
use onekeymap_common::ExportSkipReason;
use onekeymap_keymap::{Action, Keybinding};
use pretty_assertions::assert_eq;
use serde_json::json;

const MAPPINGS: &str = r#"
mappings:
  - id: actions.edit.copy
    zed: { action: "editor::Copy", context: Editor }
  - id: actions.find.replace
    zed:
      action: "pane::DeploySearch"
      context: Workspace
      args: { replace_enabled: true }
  - id: actions.find.findInFiles
    zed: { action: "pane::DeploySearch", context: Workspace }
  - id: actions.view.commandPalette
    zed: { action: "command_palette::Toggle" }
  - id: actions.view.zen
    zed: { notSupported: true }
"#;

fn plugin() -> ZedPlugin {
    ZedPlugin::new(Arc::new(MappingConfig::from_yaml_str(MAPPINGS).unwrap()))
}

fn kb(text: &str) -> Keybinding {
    Keybinding::parse(text, "+").unwrap()
}

fn macos(existing: Option<&str>) -> ExportOptions<'_> {
    ExportOptions {
        existing,
        platform: Platform::MacOs,
    }
}

#[test]
fn keybinding_uses_dash_separator_and_mac_names() {
    let binding = parse_keybinding("ctrl-k cmd-shift-s").unwrap();
    assert_eq!(binding, kb("ctrl+k meta+shift+s"));
    assert_eq!(format_keybinding(&kb("ctrl+alt+-")), "ctrl-alt--");
    assert_eq!(parse_keybinding("ctrl-alt--").unwrap(), kb("ctrl+alt+-"));
}

#[test]
fn action_values_round_trip() {
    assert_eq!(action_value("editor::Copy", None), json!("editor::Copy"));
    assert_eq!(action_value("editor::Copy", Some(&json!({}))), json!("editor::Copy"));
    let with_args = action_value("pane::DeploySearch", Some(&json!({"replace_enabled": true})));
    assert_eq!(with_args, json!(["pane::DeploySearch", {"replace_enabled": true}]));
    assert_eq!(
        action_of(&with_args),
        Some(("pane::DeploySearch", Some(&json!({"replace_enabled": true}))))
    );
    assert_eq!(action_of(&json!(null)), None);
    assert_eq!(action_of(&json!([])), None);
}

#[test]
fn resolve_matches_action_context_and_args() {
    let p = plugin();
    let id = |action, context, args: Option<serde_json::Value>| {
        p.resolve(action, context, args.as_ref()).map(|m| m.id.clone())
    };
    assert_eq!(id("editor::Copy", "Editor", None).as_deref(), Some("actions.edit.copy"));
    assert_eq!(id("editor::Copy", "Terminal", None), None);
    assert_eq!(
        id("pane::DeploySearch", "Workspace", Some(json!({"replace_enabled": true}))).as_deref(),
        Some("actions.find.replace")
    );
    assert_eq!(
        id("pane::DeploySearch", "Workspace", None).as_deref(),
        Some("actions.find.findInFiles")
    );
}

#[test]
fn import_sections() {
    let source = r#"[
  // Zed keymap
  {
    "context": "Editor",
    "bindings": {
      "cmd-c": "editor::Copy",
      "cmd-shift-x": "unknown::Thing",
      "cmd-wat": "editor::Copy"
    }
  },
  {
    "context": "Workspace",
    "bindings": {
      "cmd-shift-h": ["pane::DeploySearch", { "replace_enabled": true }],
      "cmd-shift-f": "pane::DeploySearch",
      "cmd-k": null,
    }
  },
  {
    "bindings": {
      "cmd-shift-p": "command_palette::Toggle",
      "ctrl-k ctrl-s": "command_palette::Toggle"
    }
  }
]"#;
    let result = plugin().import(source).unwrap();

    let names: Vec<&str> = result.keymap.actions.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "actions.edit.copy",
            "actions.find.findInFiles",
            "actions.find.replace",
            "actions.view.commandPalette",
        ]
    );
    assert_eq!(
        result.keymap.get("actions.view.commandPalette").unwrap().bindings,
        vec![kb("cmd+shift+p"), kb("ctrl+k ctrl+s")]
    );

    // the unparsable `cmd-wat` is forgiven because `editor::Copy` imported fine
    assert_eq!(result.report.skipped.len(), 1);
    assert_eq!(result.report.skipped[0].editor_action, "unknown::Thing");
    assert_eq!(
        result.report.skipped[0].reason,
        "no mapping found for zed action: unknown::Thing"
    );
}

#[test]
fn export_from_scratch_sorts_contexts() {
    let keymap = Keymap::new(vec![
        Action::new("actions.edit.copy", vec![kb("cmd+c")]),
        Action::new("actions.view.commandPalette", vec![kb("shift+cmd+p")]),
        Action::new("actions.find.replace", vec![kb("cmd+shift+h")]),
        Action::new("actions.view.zen", vec![kb("ctrl+z")]),
    ]);
    let result = plugin().export(&keymap, macos(None)).unwrap();
    let expected = r#"[
  {
    "bindings": {
      "cmd-shift-p": "command_palette::Toggle"
    }
  },
  {
    "context": "Editor",
    "bindings": {
      "cmd-c": "editor::Copy"
    }
  },
  {
    "context": "Workspace",
    "bindings": {
      "cmd-shift-h": [
        "pane::DeploySearch",
        {
          "replace_enabled": true
        }
      ]
    }
  }
]
"#;
    assert_eq!(result.content, expected);
    assert_eq!(result.report.skipped.len(), 1);
    assert_eq!(result.report.skipped[0].action, "actions.view.zen");
    assert_eq!(result.report.skipped[0].reason, ExportSkipReason::NotSupported);
}

#[test]
fn export_merges_into_existing_sections() {
    let existing = r#"[
  {
    "context": "Workspace",
    "bindings": {
      "cmd-shift-f": "pane::DeploySearch",
      "cmd-1": "workspace::ActivatePane"
    }
  },
  {
    "context": "Editor",
    "use_key_equivalents": true,
    "bindings": {
      "cmd-c": "user::Custom",
      "cmd-d": "editor::SelectNext"
    }
  }
]"#;
    let keymap = Keymap::new(vec![
        Action::new("actions.edit.copy", vec![kb("cmd+c")]),
        Action::new("actions.find.findInFiles", vec![kb("cmd+shift+g")]),
        Action::new("actions.view.commandPalette", vec![kb("cmd+shift+p")]),
    ]);
    let result = plugin().export(&keymap, macos(Some(existing))).unwrap();
    let value: serde_json::Value = serde_json::from_str(&result.content).unwrap();
    assert_eq!(
        value,
        json!([
            {
                "context": "Workspace",
                "bindings": {
                    "cmd-1": "workspace::ActivatePane",
                    "cmd-shift-g": "pane::DeploySearch"
                }
            },
            {
                "context": "Editor",
                "bindings": {
                    "cmd-c": "editor::Copy",
                    "cmd-d": "editor::SelectNext"
                },
                "use_key_equivalents": true
            },
            {
                "bindings": {
                    "cmd-shift-p": "command_palette::Toggle"
                }
            }
        ])
    );
}

#[test]
fn export_conflicts_ignore_key_case_and_modifier_order() {
    let existing = r#"[
  {
    "context": "Editor",
    "bindings": {
      "Cmd-Shift-C": "user::Custom",
      "shift-cmd-v": "user::Other",
      "cmd-shift-t": "user::Kept"
    }
  }
]"#;
    let keymap = Keymap::new(vec![
        Action::new("actions.edit.copy", vec![kb("cmd+shift+c"), kb("cmd+shift+v")]),
    ]);
    let result = plugin().export(&keymap, macos(Some(existing))).unwrap();
    let value: serde_json::Value = serde_json::from_str(&result.content).unwrap();
    assert_eq!(
        value,
        json!([
            {
                "context": "Editor",
                "bindings": {
                    "cmd-shift-c": "editor::Copy",
                    "cmd-shift-t": "user::Kept",
                    "cmd-shift-v": "editor::Copy"
                }
            }
        ])
    );
}

#[test]
fn export_accepts_empty_and_rejects_malformed_existing() {
    let keymap = Keymap::new(vec![Action::new("actions.edit.copy", vec![kb("cmd+c")])]);
    assert!(plugin().export(&keymap, macos(Some(""))).is_ok());
    assert!(plugin().export(&keymap, macos(Some("[{ \"bindings\": "))).is_err());
}

#[test]
fn config_detect_uses_dot_config_on_unix() {
    let paths = plugin().config_detect(Platform::MacOs);
    if let Some(path) = paths.first() {
        assert!(path.ends_with(".config/zed/keymap.json"));
    }
}
