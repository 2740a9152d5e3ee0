//! Minimal XML property list reader and writer.
//!
//! Covers the value types `.idekeybindings` files use. `<data>` and `<date>`
//! are read as strings and written back as `<string>`.

use indexmap::IndexMap;
use onekeymap_common::FormatError;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

const DOCTYPE: &str =
    r#"plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd""#;

#[derive(Debug, Clone, PartialEq)]
pub enum PlistValue {
    String(String),
    Integer(i64),
    Real(f64),
    Bool(bool),
    Array(Vec<PlistValue>),
    Dict(IndexMap<String, PlistValue>),
}

impl PlistValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PlistValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[PlistValue]> {
        match self {
            PlistValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Dictionary lookup; `None` for other value types.
    pub fn get(&self, key: &str) -> Option<&PlistValue> {
        match self {
            PlistValue::Dict(map) => map.get(key),
            _ => None,
        }
    }
}

fn plist_error(e: impl std::fmt::Display) -> FormatError {
    FormatError::Plist(e.to_string())
}

enum Tag {
    Open { name: String, empty: bool },
    Close(String),
    Eof,
}

fn tag_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

/// The next element boundary, skipping the prolog, comments and whitespace.
fn next_tag(reader: &mut Reader<&[u8]>) -> Result<Tag, FormatError> {
    loop {
        match reader.read_event().map_err(plist_error)? {
            Event::Start(ref e) => {
                return Ok(Tag::Open {
                    name: tag_name(e),
                    empty: false,
                })
            }
            Event::Empty(ref e) => {
                return Ok(Tag::Open {
                    name: tag_name(e),
                    empty: true,
                })
            }
            Event::End(ref e) => {
                return Ok(Tag::Close(
                    String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                ))
            }
            Event::Text(ref t) => {
                let text = t.unescape().map_err(plist_error)?;
                if !text.trim().is_empty() {
                    return Err(FormatError::Plist(format!(
                        "unexpected text '{}'",
                        text.trim()
                    )));
                }
            }
            Event::Eof => return Ok(Tag::Eof),
            _ => {}
        }
    }
}

/// Text content up to the closing tag `end`.
fn read_text(reader: &mut Reader<&[u8]>, end: &str) -> Result<String, FormatError> {
    let mut text = String::new();
    loop {
        match reader.read_event().map_err(plist_error)? {
            Event::Text(ref t) => text.push_str(&t.unescape().map_err(plist_error)?),
            Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c.into_inner())),
            Event::End(ref e) if e.name().as_ref() == end.as_bytes() => return Ok(text),
            Event::Eof => return Err(FormatError::Plist(format!("unterminated <{end}>"))),
            Event::Comment(_) => {}
            _ => return Err(FormatError::Plist(format!("unexpected markup in <{end}>"))),
        }
    }
}

fn expect_close(reader: &mut Reader<&[u8]>, name: &str) -> Result<(), FormatError> {
    match next_tag(reader)? {
        Tag::Close(close) if close == name => Ok(()),
        _ => Err(FormatError::Plist(format!("expected </{name}>"))),
    }
}

fn parse_value(reader: &mut Reader<&[u8]>, name: &str, empty: bool) -> Result<PlistValue, FormatError> {
    let text = |reader: &mut Reader<&[u8]>| -> Result<String, FormatError> {
        if empty {
            Ok(String::new())
        } else {
            read_text(reader, name)
        }
    };

    match name {
        "string" | "data" | "date" => Ok(PlistValue::String(text(reader)?)),
        "integer" => {
            let raw = text(reader)?;
            raw.trim()
                .parse()
                .map(PlistValue::Integer)
                .map_err(|_| FormatError::Plist(format!("invalid integer '{raw}'")))
        }
        "real" => {
            let raw = text(reader)?;
            raw.trim()
                .parse()
                .map(PlistValue::Real)
                .map_err(|_| FormatError::Plist(format!("invalid real '{raw}'")))
        }
        "true" | "false" => {
            if !empty {
                expect_close(reader, name)?;
            }
            Ok(PlistValue::Bool(name == "true"))
        }
        "array" => {
            let mut items = Vec::new();
            if empty {
                return Ok(PlistValue::Array(items));
            }
            loop {
                match next_tag(reader)? {
                    Tag::Open { name, empty } => items.push(parse_value(reader, &name, empty)?),
                    Tag::Close(close) if close == "array" => return Ok(PlistValue::Array(items)),
                    _ => return Err(FormatError::Plist("unterminated <array>".to_string())),
                }
            }
        }
        "dict" => {
            let mut map = IndexMap::new();
            if empty {
                return Ok(PlistValue::Dict(map));
            }
            loop {
                let key = match next_tag(reader)? {
                    Tag::Open { name, empty } if name == "key" => {
                        if empty {
                            String::new()
                        } else {
                            read_text(reader, "key")?
                        }
                    }
                    Tag::Close(close) if close == "dict" => return Ok(PlistValue::Dict(map)),
                    _ => return Err(FormatError::Plist("expected <key> in <dict>".to_string())),
                };
                let value = match next_tag(reader)? {
                    Tag::Open { name, empty } => parse_value(reader, &name, empty)?,
                    _ => {
                        return Err(FormatError::Plist(format!(
                            "missing value for key '{key}'"
                        )))
                    }
                };
                map.insert(key, value);
            }
        }
        other => Err(FormatError::Plist(format!("unsupported element <{other}>"))),
    }
}

/// Parses a property list document. A bare value without a `<plist>`
/// wrapper is accepted.
pub fn from_str(source: &str) -> Result<PlistValue, FormatError> {
    let mut reader = Reader::from_str(source);
    reader.trim_text(false);

    let (name, empty) = match next_tag(&mut reader)? {
        Tag::Open { name, empty } => (name, empty),
        _ => return Err(FormatError::Plist("document has no root element".to_string())),
    };
    if name != "plist" {
        return parse_value(&mut reader, &name, empty);
    }
    if empty {
        return Ok(PlistValue::Dict(IndexMap::new()));
    }

    let value = match next_tag(&mut reader)? {
        Tag::Open { name, empty } => parse_value(&mut reader, &name, empty)?,
        Tag::Close(_) => return Ok(PlistValue::Dict(IndexMap::new())),
        Tag::Eof => return Err(FormatError::Plist("unterminated <plist>".to_string())),
    };
    expect_close(&mut reader, "plist")?;
    Ok(value)
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    text: &str,
) -> Result<(), FormatError> {
    if text.is_empty() {
        return writer
            .write_event(Event::Empty(BytesStart::new(name)))
            .map_err(plist_error);
    }
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(plist_error)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(plist_error)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(plist_error)
}

fn write_value(writer: &mut Writer<Vec<u8>>, value: &PlistValue) -> Result<(), FormatError> {
    match value {
        PlistValue::String(s) => write_text_element(writer, "string", s),
        PlistValue::Integer(i) => write_text_element(writer, "integer", &i.to_string()),
        PlistValue::Real(r) => write_text_element(writer, "real", &r.to_string()),
        PlistValue::Bool(b) => writer
            .write_event(Event::Empty(BytesStart::new(if *b { "true" } else { "false" })))
            .map_err(plist_error),
        PlistValue::Array(items) => {
            writer
                .write_event(Event::Start(BytesStart::new("array")))
                .map_err(plist_error)?;
            for item in items {
                write_value(writer, item)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new("array")))
                .map_err(plist_error)
        }
        PlistValue::Dict(map) => {
            writer
                .write_event(Event::Start(BytesStart::new("dict")))
                .map_err(plist_error)?;
            for (key, item) in map {
                write_text_element(writer, "key", key)?;
                write_value(writer, item)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new("dict")))
                .map_err(plist_error)
        }
    }
}

/// Serializes `value` as an XML property list indented with tabs. Empty
/// containers are written as an open and a close tag.
pub fn to_string(value: &PlistValue) -> Result<String, FormatError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(plist_error)?;
    writer
        .write_event(Event::DocType(BytesText::from_escaped(DOCTYPE)))
        .map_err(plist_error)?;

    let mut root = BytesStart::new("plist");
    root.push_attribute(("version", "1.0"));
    writer.write_event(Event::Start(root)).map_err(plist_error)?;
    write_value(&mut writer, value)?;
    writer
        .write_event(Event::End(BytesEnd::new("plist")))
        .map_err(plist_error)?;

    let mut out = String::from_utf8(writer.into_inner()).map_err(plist_error)?;
    out.push('\n');
    Ok(out)
}
