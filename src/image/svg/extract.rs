//! Standalone SVG file unwrapping.
//!
//! Local icons are complete SVG documents. The root `<svg>` is removed and its
//! inner markup kept as the icon body, together with the root's geometry
//! attributes for the bounding box.

use anyhow::{Context, Result, bail};
use quick_xml::{
    Reader, Writer,
    events::{BytesStart, Event},
};

/// Root presentation attributes carried onto a wrapping `<g>`.
const INHERITED_ATTRS: &[&[u8]] = &[
    b"fill",
    b"fill-rule",
    b"fill-opacity",
    b"clip-rule",
    b"stroke",
    b"stroke-width",
    b"stroke-linecap",
    b"stroke-linejoin",
    b"stroke-miterlimit",
    b"stroke-dasharray",
    b"stroke-opacity",
    b"opacity",
    b"color",
];

/// An unwrapped SVG document.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgDocument {
    /// Root `viewBox`, as written.
    pub view_box: Option<String>,
    /// Root `width` in user units (`px` suffix accepted).
    pub width: Option<f64>,
    /// Root `height` in user units.
    pub height: Option<f64>,
    /// Inner markup, without comments.
    pub body: String,
}

/// Unwrap the root `<svg>` element of a standalone document.
///
/// XML declaration, doctype, comments and processing instructions are
/// dropped. Presentation attributes on the root (e.g. `stroke="currentColor"`
/// on outline icons) are kept by wrapping the body in a `<g>`.
pub fn unwrap_svg(source: &str) -> Result<SvgDocument> {
    let mut reader = Reader::from_str(source);

    let root = loop {
        match reader.read_event() {
            Ok(Event::Start(elem)) if elem.name().as_ref() == b"svg" => break Some(elem),
            Ok(Event::Empty(elem)) if elem.name().as_ref() == b"svg" => {
                let (doc, _) = read_root(&elem, &reader)?;
                return Ok(doc);
            }
            Ok(Event::Start(_) | Event::Empty(_)) => break None,
            Ok(Event::Eof) => break None,
            Ok(_) => {}
            Err(e) => bail!(
                "SVG parse error at position {}: {e}",
                reader.error_position()
            ),
        }
    };
    let Some(root) = root else {
        bail!("document has no <svg> root element");
    };

    let (mut doc, wrapper) = read_root(&root, &reader)?;
    let mut writer = Writer::new(Vec::with_capacity(source.len()));
    let mut depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(elem)) => {
                depth += 1;
                writer.write_event(Event::Start(elem))?;
            }
            Ok(Event::End(elem)) => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
                writer.write_event(Event::End(elem))?;
            }
            Ok(Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_)) => {}
            Ok(Event::Eof) => bail!("unterminated <svg> root element"),
            Ok(event) => writer.write_event(event)?,
            Err(e) => bail!(
                "SVG parse error at position {}: {e}",
                reader.error_position()
            ),
        }
    }

    let inner = String::from_utf8(writer.into_inner()).context("SVG body is not valid UTF-8")?;
    let inner = inner.trim();
    doc.body = if wrapper.is_empty() || inner.is_empty() {
        inner.to_string()
    } else {
        format!("<g{wrapper}>{inner}</g>")
    };
    Ok(doc)
}

/// Read geometry attributes of the root. Also returns the inherited
/// presentation attributes, serialized (empty when there are none).
fn read_root(root: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<(SvgDocument, String)> {
    let mut doc = SvgDocument {
        view_box: None,
        width: None,
        height: None,
        body: String::new(),
    };
    let mut wrapper = String::new();

    for attr in root.attributes() {
        let attr = attr?;
        let key = attr.key.as_ref();
        let value = reader.decoder().decode(&attr.value)?;
        match key {
            b"viewBox" => doc.view_box = Some(value.trim().to_string()),
            b"width" => doc.width = parse_length(&value),
            b"height" => doc.height = parse_length(&value),
            _ if INHERITED_ATTRS.contains(&key) => {
                let key = reader.decoder().decode(key)?;
                wrapper.push_str(&format!(r#" {key}="{value}""#));
            }
            _ => {}
        }
    }

    Ok((doc, wrapper))
}

/// Parse a length in user units. Percentages and other units are rejected.
fn parse_length(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value);
    number.parse().ok().filter(|n: &f64| *n > 0.0)
}
