//! Tests for the setting file reader and writer.

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn load_empty_input() {
    assert!(load_setting("").unwrap().is_empty());
    assert!(load_setting("  \n").unwrap().is_empty());
}

#[test]
fn load_single_and_list_bindings() {
    let json = r#"{
        "version": "1.0",
        "keymaps": [
            {"id": "actions.edit.copy", "keybinding": "cmd+c"},
            {"id": "actions.edit.paste", "keybinding": ["cmd+v", "shift+insert"]}
        ]
    }"#;
    let keymap = load_setting(json).unwrap();
    assert_eq!(keymap.len(), 2);
    assert_eq!(keymap.actions[0].bindings[0].signature(), "cmd+c");
    assert_eq!(keymap.actions[1].bindings.len(), 2);
}

#[test]
fn load_groups_by_id_in_first_seen_order() {
    let json = r#"{"keymaps": [
        {"id": "b", "keybinding": "ctrl+b", "comment": "first"},
        {"id": "a", "keybinding": "ctrl+a"},
        {"id": "b", "keybinding": "ctrl+shift+b", "comment": "second", "description": "Bee"}
    ]}"#;
    let keymap = load_setting(json).unwrap();
    let names: Vec<&str> = keymap.actions.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["b", "a"]);
    assert_eq!(keymap.actions[0].bindings.len(), 2);
    assert_eq!(keymap.actions[0].meta.comment.as_deref(), Some("first"));
    assert_eq!(keymap.actions[0].meta.description.as_deref(), Some("Bee"));
}

#[test]
fn load_missing_keymaps_field() {
    let err = load_setting(r#"{"bindings": []}"#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid config format: 'keymaps' field is missing"
    );
}

#[test]
fn load_rejects_bad_binding() {
    let err = load_setting(r#"{"keymaps": [{"id": "x", "keybinding": "ctrl+nope"}]}"#)
        .unwrap_err();
    assert!(err.to_string().contains("for id 'x'"));
}

#[test]
fn load_rejects_malformed_json() {
    assert!(load_setting("{not json").is_err());
}

#[test]
fn save_sorts_and_formats() {
    let keymap = Keymap::new(vec![
        Action::new(
            "actions.edit.paste",
            vec![Keybinding::parse("meta+v", "+").unwrap()],
        ),
        Action::new(
            "actions.edit.copy",
            vec![
                Keybinding::parse("meta+c", "+").unwrap(),
                Keybinding::parse("ctrl+insert", "+").unwrap(),
            ],
        ),
    ]);
    let out = save_setting(&keymap, Platform::MacOs).unwrap();
    let expected = r#"{
  "version": "1.0",
  "keymaps": [
    {
      "id": "actions.edit.copy",
      "keybinding": [
        "cmd+c",
        "ctrl+insert"
      ]
    },
    {
      "id": "actions.edit.paste",
      "keybinding": "cmd+v"
    }
  ]
}
"#;
    assert_eq!(out, expected);
}

#[test]
fn save_then_load_preserves_bindings() {
    let keymap = Keymap::new(vec![Action::new(
        "actions.view.zoom",
        vec![Keybinding::parse("ctrl+k ctrl+z", "+").unwrap()],
    )]);
    let out = save_setting(&keymap, Platform::Linux).unwrap();
    let back = load_setting(&out).unwrap();
    assert_eq!(back, keymap);
}
