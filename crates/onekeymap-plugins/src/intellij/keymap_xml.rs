//! Reading and writing IntelliJ keymap XML.

use onekeymap_common::FormatError;
use quick_xml::events::attributes::Attributes;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardShortcut {
    pub first: String,
    pub second: Option<String>,
}

/// One `<action>` element.
///
/// Mouse shortcuts are carried so that unmanaged actions survive an export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionXml {
    pub id: String,
    pub keyboard_shortcuts: Vec<KeyboardShortcut>,
    pub mouse_shortcuts: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeymapXml {
    pub name: String,
    pub version: String,
    pub disable_mnemonics: bool,
    pub parent: String,
    pub actions: Vec<ActionXml>,
}

impl KeymapXml {
    /// The header written on every export.
    pub fn onekeymap(actions: Vec<ActionXml>) -> KeymapXml {
        KeymapXml {
            name: "Onekeymap".to_string(),
            version: "1".to_string(),
            disable_mnemonics: true,
            parent: "$default".to_string(),
            actions,
        }
    }
}

fn xml_error(e: impl std::fmt::Display) -> FormatError {
    FormatError::Xml(e.to_string())
}

fn read_attributes(attributes: Attributes<'_>) -> Result<Vec<(String, String)>, FormatError> {
    let mut out = Vec::new();
    for attr in attributes {
        let attr = attr.map_err(xml_error)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(xml_error)?.into_owned();
        out.push((key, value));
    }
    Ok(out)
}

fn attribute<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn root_from(start: &BytesStart<'_>) -> Result<KeymapXml, FormatError> {
    if start.name().as_ref() != b"keymap" {
        return Err(FormatError::Xml(format!(
            "expected element <keymap> but found <{}>",
            String::from_utf8_lossy(start.name().as_ref())
        )));
    }
    let attrs = read_attributes(start.attributes())?;
    Ok(KeymapXml {
        name: attribute(&attrs, "name").unwrap_or_default().to_string(),
        version: attribute(&attrs, "version").unwrap_or_default().to_string(),
        disable_mnemonics: attribute(&attrs, "disable-mnemonics") == Some("true"),
        parent: attribute(&attrs, "parent").unwrap_or_default().to_string(),
        actions: Vec::new(),
    })
}

fn action_from(start: &BytesStart<'_>) -> Result<ActionXml, FormatError> {
    let attrs = read_attributes(start.attributes())?;
    Ok(ActionXml {
        id: attribute(&attrs, "id").unwrap_or_default().to_string(),
        ..ActionXml::default()
    })
}

/// Adds a shortcut child to `action`. Unknown children are ignored.
fn push_shortcut(action: &mut ActionXml, element: &BytesStart<'_>) -> Result<(), FormatError> {
    match element.name().as_ref() {
        b"keyboard-shortcut" => {
            let attrs = read_attributes(element.attributes())?;
            action.keyboard_shortcuts.push(KeyboardShortcut {
                first: attribute(&attrs, "first-keystroke")
                    .unwrap_or_default()
                    .to_string(),
                second: attribute(&attrs, "second-keystroke")
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
            });
        }
        b"mouse-shortcut" => {
            let attrs = read_attributes(element.attributes())?;
            if let Some(keystroke) = attribute(&attrs, "keystroke") {
                action.mouse_shortcuts.push(keystroke.to_string());
            }
        }
        _ => {}
    }
    Ok(())
}

/// Parses a keymap document. The root element must be `<keymap>`.
pub fn decode(source: &str) -> Result<KeymapXml, FormatError> {
    let mut reader = Reader::from_str(source);
    reader.trim_text(true);

    let mut keymap: Option<KeymapXml> = None;
    let mut current: Option<ActionXml> = None;

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(ref e) => {
                if keymap.is_none() {
                    keymap = Some(root_from(e)?);
                    continue;
                }
                match current.as_mut() {
                    Some(action) => push_shortcut(action, e)?,
                    None if e.name().as_ref() == b"action" => current = Some(action_from(e)?),
                    None => {}
                }
            }
            Event::Empty(ref e) => {
                if keymap.is_none() {
                    keymap = Some(root_from(e)?);
                    break;
                }
                match (current.as_mut(), keymap.as_mut()) {
                    (Some(action), _) => push_shortcut(action, e)?,
                    (None, Some(doc)) if e.name().as_ref() == b"action" => {
                        doc.actions.push(action_from(e)?)
                    }
                    _ => {}
                }
            }
            Event::End(ref e) => match e.name().as_ref() {
                b"action" => {
                    if let (Some(action), Some(keymap)) = (current.take(), keymap.as_mut()) {
                        keymap.actions.push(action);
                    }
                }
                b"keymap" => break,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    keymap.ok_or_else(|| FormatError::Xml("missing <keymap> root element".to_string()))
}

fn shortcut_element(shortcut: &KeyboardShortcut) -> BytesStart<'_> {
    let mut element = BytesStart::new("keyboard-shortcut");
    element.push_attribute(("first-keystroke", shortcut.first.as_str()));
    if let Some(second) = shortcut.second.as_deref() {
        element.push_attribute(("second-keystroke", second));
    }
    element
}

fn write_action(writer: &mut Writer<Vec<u8>>, action: &ActionXml) -> Result<(), FormatError> {
    let mut start = BytesStart::new("action");
    start.push_attribute(("id", action.id.as_str()));

    if action.keyboard_shortcuts.is_empty() && action.mouse_shortcuts.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(xml_error);
    }

    writer.write_event(Event::Start(start)).map_err(xml_error)?;
    for shortcut in &action.keyboard_shortcuts {
        writer
            .write_event(Event::Empty(shortcut_element(shortcut)))
            .map_err(xml_error)?;
    }
    for keystroke in &action.mouse_shortcuts {
        let mut element = BytesStart::new("mouse-shortcut");
        element.push_attribute(("keystroke", keystroke.as_str()));
        writer.write_event(Event::Empty(element)).map_err(xml_error)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("action")))
        .map_err(xml_error)
}

/// Serializes a keymap with the XML declaration and two-space indentation.
pub fn encode(keymap: &KeymapXml) -> Result<String, FormatError> {
    let mut writer = Writer::new_with_indent(XML_HEADER.as_bytes().to_vec(), b' ', 2);

    let mut root = BytesStart::new("keymap");
    root.push_attribute(("name", keymap.name.as_str()));
    root.push_attribute(("version", keymap.version.as_str()));
    root.push_attribute((
        "disable-mnemonics",
        if keymap.disable_mnemonics { "true" } else { "false" },
    ));
    root.push_attribute(("parent", keymap.parent.as_str()));

    if keymap.actions.is_empty() {
        writer.write_event(Event::Empty(root)).map_err(xml_error)?;
    } else {
        writer.write_event(Event::Start(root)).map_err(xml_error)?;
        for action in &keymap.actions {
            write_action(&mut writer, action)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new("keymap")))
            .map_err(xml_error)?;
    }

    let mut out = String::from_utf8(writer.into_inner()).map_err(xml_error)?;
    out.push('\n');
    Ok(out)
}
