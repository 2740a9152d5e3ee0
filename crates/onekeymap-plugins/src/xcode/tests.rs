//! Tests for the Xcode plugin.

use super::*;
use crate::report::{ExportSkipAction, ImportSkipAction, ImportedAction};
use indexmap::IndexMap;
use onekeymap_common::{CodecError, ExportSkipReason, ParseError};
use onekeymap_keymap::{Action, KeyChord, Keybinding};
use pretty_assertions::assert_eq;

const MAPPINGS: &str = r#"
mappings:
  - id: actions.edit.copy
    xcode: { action: "$Copy" }
  - id: actions.navigation.jumpToDefinition
    xcode:
      action: "editorContext_jumpToDefinition:"
      commandID: Xcode.IDEKit.CmdDefinition.JumpToDefinition
  - id: actions.cursor.pageDown
    xcode: { textAction: "pageDown:" }
  - id: actions.edit.duplicateLine
    xcode:
      textAction: ["selectLine:", "copy:", "paste:"]
      disableImport: true
  - id: actions.view.zen
    xcode: { notSupported: true, note: "no zen mode" }
"#;

fn plugin() -> XcodePlugin {
    XcodePlugin::new(Arc::new(MappingConfig::from_yaml_str(MAPPINGS).unwrap()))
}

fn kb(text: &str) -> Keybinding {
    Keybinding::parse(text, "+").unwrap()
}

fn options(existing: Option<&str>) -> ExportOptions<'_> {
    ExportOptions {
        existing,
        platform: Platform::MacOs,
    }
}

#[test]
fn keybind_decodes_sigils_and_named_keys() {
    assert_eq!(parse_keybinding("@$k").unwrap(), kb("cmd+shift+k"));
    assert_eq!(parse_keybinding("^~\u{F700}").unwrap(), kb("ctrl+alt+up"));
    assert_eq!(parse_keybinding("@\u{F704}").unwrap(), kb("cmd+f1"));
    assert_eq!(parse_keybinding("@\u{8}").unwrap(), kb("cmd+backspace"));
    assert_eq!(parse_keybinding("\t").unwrap(), kb("tab"));
    assert_eq!(parse_keybinding("@K").unwrap(), kb("cmd+k"));
}

#[test]
fn keybind_encodes_in_sigil_order() {
    let cases = [
        ("cmd+shift+k", "@$k"),
        ("alt+shift+ctrl+cmd+k", "@^$~k"),
        ("f20", "\u{F717}"),
        ("ctrl+pagedown", "^\u{F72D}"),
        ("shift+enter", "$\r"),
        ("cmd+/", "@/"),
    ];
    for (canonical, expected) in cases {
        assert_eq!(format_keybinding(&kb(canonical)).unwrap(), expected, "{canonical}");
    }
}

#[test]
fn keybind_errors() {
    assert_eq!(parse_keybinding(""), Err(CodecError::EmptyKeybind));
    assert_eq!(parse_keybinding("#k"), Err(CodecError::UnknownModifierSymbol('#')));
    assert_eq!(
        parse_keybinding("@\u{F7FF}"),
        Err(CodecError::Parse(ParseError::InvalidKeyCode("\u{F7FF}".into())))
    );
    assert!(matches!(
        format_keybinding(&kb("numpad1")),
        Err(CodecError::Unencodable(_))
    ));
    assert!(matches!(
        format_keybinding(&Keybinding::single(KeyChord::parse("cmd", "+").unwrap())),
        Err(CodecError::Unencodable(_))
    ));
}

#[test]
fn multi_chord_bindings_are_rejected() {
    let err = format_keybinding(&kb("cmd+k cmd+c")).unwrap_err();
    assert_eq!(err.to_string(), "xcode doesn't support multi-key-chords");
}

#[test]
fn plist_reads_every_value_type() {
    let source = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<!-- comment -->
	<key>name</key>
	<string>a &amp; b</string>
	<key>raw</key>
	<string><![CDATA[<x>]]></string>
	<key>blank</key>
	<string/>
	<key>count</key>
	<integer> 3 </integer>
	<key>ratio</key>
	<real>0.5</real>
	<key>on</key>
	<true/>
	<key>off</key>
	<false></false>
	<key>items</key>
	<array>
		<string>one</string>
		<dict/>
	</array>
</dict>
</plist>"#;
    let value = plist::from_str(source).unwrap();

    let mut expected = IndexMap::new();
    expected.insert("name".to_string(), PlistValue::String("a & b".into()));
    expected.insert("raw".to_string(), PlistValue::String("<x>".into()));
    expected.insert("blank".to_string(), PlistValue::String(String::new()));
    expected.insert("count".to_string(), PlistValue::Integer(3));
    expected.insert("ratio".to_string(), PlistValue::Real(0.5));
    expected.insert("on".to_string(), PlistValue::Bool(true));
    expected.insert("off".to_string(), PlistValue::Bool(false));
    expected.insert(
        "items".to_string(),
        PlistValue::Array(vec![
            PlistValue::String("one".into()),
            PlistValue::Dict(IndexMap::new()),
        ]),
    );
    assert_eq!(value, PlistValue::Dict(expected));
}

#[test]
fn plist_rejects_malformed_documents() {
    assert!(plist::from_str("").is_err());
    assert!(plist::from_str("<plist><dict><string>x</string></dict></plist>").is_err());
    assert!(plist::from_str("<plist><integer>x</integer></plist>").is_err());
    assert!(plist::from_str("<plist><dict><key>a</key></dict></plist>").is_err());
}

#[test]
fn plist_writes_tab_indented_xml() {
    let mut map = IndexMap::new();
    map.insert("a".to_string(), PlistValue::String("x & y".into()));
    map.insert("b".to_string(), PlistValue::Bool(true));
    map.insert("c".to_string(), PlistValue::Array(Vec::new()));
    map.insert("d".to_string(), PlistValue::Integer(3));
    let out = plist::to_string(&PlistValue::Dict(map)).unwrap();
    assert_eq!(
        out,
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
	<dict>
		<key>a</key>
		<string>x &amp; y</string>
		<key>b</key>
		<true/>
		<key>c</key>
		<array>
		</array>
		<key>d</key>
		<integer>3</integer>
	</dict>
</plist>
"#
    );
}

#[test]
fn text_values_accept_strings_arrays_and_wrapped_items() {
    let chain = PlistValue::Array(vec![
        PlistValue::String("selectLine:".into()),
        PlistValue::String("copy:".into()),
    ]);
    assert_eq!(text_items(&chain), vec!["selectLine:", "copy:"]);
    assert_eq!(text_items(&PlistValue::String("pageDown:".into())), vec!["pageDown:"]);

    let mut wrapper = IndexMap::new();
    wrapper.insert("Items".to_string(), chain.clone());
    assert_eq!(text_items(&PlistValue::Dict(wrapper)), vec!["selectLine:", "copy:"]);
    assert!(text_items(&PlistValue::Integer(1)).is_empty());

    assert_eq!(text_value(&["pageDown:".to_string()]), PlistValue::String("pageDown:".into()));
    assert_eq!(
        text_value(&["selectLine:".to_string(), "copy:".to_string()]),
        chain
    );
}

const EXISTING: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>Menu Key Bindings</key>
	<dict>
		<key>Key Bindings</key>
		<array>
			<dict>
				<key>Action</key>
				<string>customUserAction:</string>
				<key>Keyboard Shortcut</key>
				<string>@x</string>
			</dict>
			<dict>
				<key>Action</key>
				<string>$Copy</string>
				<key>Keyboard Shortcut</key>
				<string>@v</string>
			</dict>
			<dict>
				<key>Action</key>
				<string>editorContext_jumpToDefinition:</string>
				<key>CommandID</key>
				<string>Xcode.IDEKit.CmdDefinition.JumpToDefinition</string>
				<key>Keyboard Shortcut</key>
				<string>@j</string>
			</dict>
			<dict>
				<key>Action</key>
				<string>foo:</string>
				<key>Keyboard Shortcut</key>
				<string>@f</string>
			</dict>
			<dict>
				<key>Action</key>
				<string>bar:</string>
				<key>Keyboard Shortcut</key>
				<string/>
			</dict>
		</array>
		<key>Version</key>
		<integer>3</integer>
	</dict>
	<key>Text Key Bindings</key>
	<dict>
		<key>Key Bindings</key>
		<dict>
			<key>@d</key>
			<array>
				<string>selectLine:</string>
				<string>copy:</string>
			</array>
			<key>^v</key>
			<string>pageDown</string>
			<key>^x</key>
			<string>unknownSelector:</string>
		</dict>
		<key>Version</key>
		<integer>3</integer>
	</dict>
</dict>
</plist>"#;

#[test]
fn import_reads_menu_and_text_bindings() {
    let result = plugin().import(EXISTING).unwrap();

    assert_eq!(
        result.keymap.actions,
        vec![
            Action::new("actions.edit.copy", vec![kb("cmd+v")]),
            Action::new("actions.navigation.jumpToDefinition", vec![kb("cmd+j")]),
            Action::new("actions.cursor.pageDown", vec![kb("ctrl+v")]),
        ]
    );
    assert_eq!(
        result.report.skipped,
        vec![
            ImportSkipAction {
                editor_action: "customUserAction:".into(),
                keybindings: vec!["@x".into()],
                reason: "no mapping found for xcode action: customUserAction:".into(),
            },
            ImportSkipAction {
                editor_action: "foo:".into(),
                keybindings: vec!["@f".into()],
                reason: "no mapping found for xcode action: foo:".into(),
            },
            ImportSkipAction {
                editor_action: "unknownSelector:".into(),
                keybindings: vec!["^x".into()],
                reason: "no mapping found for xcode text action: unknownSelector:".into(),
            },
        ]
    );
    assert_eq!(
        result.report.imported[2],
        ImportedAction {
            action: "actions.cursor.pageDown".into(),
            editor_action: "pageDown".into(),
            keybindings: vec!["^v".into()],
        }
    );
}

#[test]
fn import_of_blank_file_is_empty() {
    let result = plugin().import("  \n").unwrap();
    assert!(result.keymap.actions.is_empty());
    assert!(plugin().import("<plist><array/></plist>").is_err());
}

const SCRATCH_EXPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
	<dict>
		<key>Menu Key Bindings</key>
		<dict>
			<key>Key Bindings</key>
			<array>
				<dict>
					<key>Action</key>
					<string>$Copy</string>
					<key>Alternate</key>
					<string/>
					<key>CommandGroupID</key>
					<string/>
					<key>CommandID</key>
					<string/>
					<key>Group</key>
					<string/>
					<key>GroupID</key>
					<string/>
					<key>GroupedAlternate</key>
					<string/>
					<key>Keyboard Shortcut</key>
					<string>@c</string>
					<key>Navigation</key>
					<string/>
					<key>Parent Title</key>
					<string/>
					<key>Title</key>
					<string/>
				</dict>
			</array>
			<key>Version</key>
			<integer>3</integer>
		</dict>
		<key>Text Key Bindings</key>
		<dict>
			<key>Key Bindings</key>
			<dict>
				<key>@$d</key>
				<array>
					<string>selectLine:</string>
					<string>copy:</string>
					<string>paste:</string>
				</array>
				<key>^v</key>
				<string>pageDown:</string>
			</dict>
			<key>Version</key>
			<integer>3</integer>
		</dict>
	</dict>
</plist>
"#;

#[test]
fn export_from_scratch() {
    let keymap = Keymap::new(vec![
        Action::new("actions.edit.copy", vec![kb("cmd+c"), kb("cmd+k cmd+c")]),
        Action::new("actions.cursor.pageDown", vec![kb("ctrl+v")]),
        Action::new("actions.edit.duplicateLine", vec![kb("cmd+shift+d")]),
        Action::new("actions.view.zen", vec![kb("cmd+k z")]),
    ]);
    let result = plugin().export(&keymap, options(None)).unwrap();
    assert_eq!(result.content, SCRATCH_EXPORT);
    assert_eq!(
        result.report.skipped,
        vec![
            ExportSkipAction {
                action: "actions.edit.copy".into(),
                keybinding: "cmd+k cmd+c".into(),
                reason: ExportSkipReason::Codec(CodecError::TooManyChords(
                    "xcode doesn't support multi-key-chords".into()
                )),
            },
            ExportSkipAction {
                action: "actions.view.zen".into(),
                keybinding: "cmd+k z".into(),
                reason: ExportSkipReason::Unsupported("no zen mode".into()),
            },
        ]
    );
}

#[test]
fn export_merges_with_existing_file() {
    let keymap = Keymap::new(vec![
        Action::new("actions.edit.copy", vec![kb("cmd+c")]),
        Action::new("actions.cursor.pageDown", vec![kb("ctrl+v")]),
    ]);
    let result = plugin().export(&keymap, options(Some(EXISTING))).unwrap();
    let document = keybindings_file::decode(&result.content).unwrap();

    let menu: Vec<(&str, &str)> = document
        .menu
        .iter()
        .map(|entry| (entry.action.as_str(), entry.keyboard_shortcut.as_str()))
        .collect();
    // Managed entries of the old file are dropped. Unmanaged ones keep their
    // place, including the one without a shortcut.
    assert_eq!(
        menu,
        vec![
            ("customUserAction:", "@x"),
            ("$Copy", "@c"),
            ("foo:", "@f"),
            ("bar:", ""),
        ]
    );

    assert_eq!(document.text["^v"], PlistValue::String("pageDown:".into()));
    assert_eq!(
        text_items(&document.text["@d"]),
        vec!["selectLine:", "copy:"]
    );
    assert_eq!(
        document.text["^x"],
        PlistValue::String("unknownSelector:".into())
    );
}

#[test]
fn managed_entry_wins_shortcut_conflicts() {
    let existing = r#"<plist version="1.0"><dict>
<key>Menu Key Bindings</key><dict><key>Key Bindings</key><array>
<dict><key>Action</key><string>customUserAction:</string><key>Keyboard Shortcut</key><string>@c</string></dict>
</array></dict></dict></plist>"#;
    let keymap = Keymap::new(vec![Action::new("actions.edit.copy", vec![kb("cmd+c")])]);
    let result = plugin().export(&keymap, options(Some(existing))).unwrap();
    let document = keybindings_file::decode(&result.content).unwrap();
    assert_eq!(document.menu.len(), 1);
    assert_eq!(document.menu[0].action, "$Copy");
}

#[test]
fn shortcut_conflicts_ignore_sigil_order() {
    let existing = r#"<plist version="1.0"><dict>
<key>Menu Key Bindings</key><dict><key>Key Bindings</key><array>
<dict><key>Action</key><string>customUserAction:</string><key>Keyboard Shortcut</key><string>$@c</string></dict>
<dict><key>Action</key><string>otherUserAction:</string><key>Keyboard Shortcut</key><string>$@x</string></dict>
</array></dict>
<key>Text Key Bindings</key><dict><key>Key Bindings</key><dict>
<key>$^v</key><string>customSelector:</string>
</dict></dict>
</dict></plist>"#;
    let keymap = Keymap::new(vec![
        Action::new("actions.edit.copy", vec![kb("cmd+shift+c")]),
        Action::new("actions.cursor.pageDown", vec![kb("ctrl+shift+v")]),
    ]);
    let result = plugin().export(&keymap, options(Some(existing))).unwrap();
    let document = keybindings_file::decode(&result.content).unwrap();

    let menu: Vec<(&str, &str)> = document
        .menu
        .iter()
        .map(|entry| (entry.action.as_str(), entry.keyboard_shortcut.as_str()))
        .collect();
    assert_eq!(menu, vec![("$Copy", "@$c"), ("otherUserAction:", "$@x")]);

    assert_eq!(document.text.len(), 1);
    assert_eq!(document.text["^$v"], PlistValue::String("pageDown:".into()));
}

#[test]
fn export_over_malformed_file_fails() {
    let keymap = Keymap::new(vec![Action::new("actions.edit.copy", vec![kb("cmd+c")])]);
    assert!(plugin()
        .export(&keymap, options(Some("<plist><dict><key>a</key></plist>")))
        .is_err());
}

#[test]
fn resolves_selectors_with_or_without_colon() {
    let plugin = plugin();
    assert_eq!(
        plugin.resolve_text("pageDown").map(|m| m.id.as_str()),
        Some("actions.cursor.pageDown")
    );
    assert_eq!(
        plugin.resolve_text("pageDown:").map(|m| m.id.as_str()),
        Some("actions.cursor.pageDown")
    );
    assert!(plugin.resolve_text("selectLine:").is_none());
    assert!(plugin.resolve_menu("").is_none());
}

#[test]
fn config_path_is_under_user_data() {
    if let Some(path) = plugin().config_detect(Platform::MacOs).first() {
        assert!(path.ends_with("Library/Developer/Xcode/UserData/KeyBindings/Default.idekeybindings"));
    }
}
