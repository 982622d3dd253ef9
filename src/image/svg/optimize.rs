//! Icon body optimization using quick-xml.
//!
//! One event pass over the body markup:
//!
//! 1. drop comments, processing instructions, doctype, `<metadata>` subtrees
//!    and editor-namespaced elements/attributes (`sodipodi:`, `inkscape:`)
//! 2. strip namespace declarations, `version`, `xml:space`, and
//!    `width`/`height` on nested `<svg>` elements
//! 3. recolor `fill`/`stroke` paints to the theme color
//! 4. compact `d` path data
//! 5. drop whitespace-only text and write childless elements self-closing
//!
//! usvg is not used here because it resolves `currentColor` and rewrites
//! element structure; the body must keep its markup for `<symbol>` reuse.

use anyhow::{Context, Result};
use quick_xml::{
    Reader, Writer,
    escape::unescape,
    events::{BytesStart, Event},
};

use super::path::minify_path_data;

/// Editor namespaces whose elements and attributes are dropped.
const EDITOR_PREFIXES: [&[u8]; 2] = [b"sodipodi:", b"inkscape:"];

/// Paint values left untouched by recoloring.
const KEPT_PAINTS: [&str; 5] = ["none", "currentcolor", "inherit", "transparent", ""];

/// Options for body optimization.
#[derive(Debug, Clone)]
pub struct OptimizeOptions {
    /// Decimal places kept in path data.
    pub precision: u8,
    /// Theme color for `fill`/`stroke`, `None` to keep source colors.
    pub recolor: Option<String>,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            precision: 3,
            recolor: Some("currentColor".to_string()),
        }
    }
}

/// Optimize an icon body (the markup inside the root `<svg>`).
///
/// Returns an error when the markup does not parse; callers keep the raw body.
pub fn optimize_body(body: &str, options: &OptimizeOptions) -> Result<String> {
    let mut reader = Reader::from_str(body);
    let mut writer = Writer::new(Vec::with_capacity(body.len()));

    // Start tag held back until we know whether the element has children.
    let mut pending: Option<BytesStart<'static>> = None;
    // Depth inside a dropped subtree.
    let mut skip_depth = 0usize;

    loop {
        let event = reader.read_event().map_err(|e| {
            anyhow::anyhow!(
                "SVG parse error at position {}: {e}",
                reader.error_position()
            )
        })?;

        match event {
            Event::Start(elem) => {
                if skip_depth > 0 || is_dropped_element(elem.name().as_ref()) {
                    skip_depth += 1;
                    continue;
                }
                flush_pending(&mut pending, &mut writer)?;
                pending = Some(clean_element(&elem, &reader, options)?);
            }
            Event::Empty(elem) => {
                if skip_depth > 0 || is_dropped_element(elem.name().as_ref()) {
                    continue;
                }
                flush_pending(&mut pending, &mut writer)?;
                let cleaned = clean_element(&elem, &reader, options)?;
                writer.write_event(Event::Empty(cleaned))?;
            }
            Event::End(elem) => {
                if skip_depth > 0 {
                    skip_depth -= 1;
                    continue;
                }
                match pending.take() {
                    Some(start) => writer.write_event(Event::Empty(start))?,
                    None => writer.write_event(Event::End(elem))?,
                }
            }
            Event::Text(text) => {
                if skip_depth > 0 || text.iter().all(u8::is_ascii_whitespace) {
                    continue;
                }
                flush_pending(&mut pending, &mut writer)?;
                writer.write_event(Event::Text(text))?;
            }
            Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_) => {}
            Event::Eof => break,
            other => {
                if skip_depth > 0 {
                    continue;
                }
                flush_pending(&mut pending, &mut writer)?;
                writer.write_event(other)?;
            }
        }
    }

    // A trailing start tag without an end is written as-is.
    flush_pending(&mut pending, &mut writer)?;

    String::from_utf8(writer.into_inner()).context("Optimized SVG is not valid UTF-8")
}

fn flush_pending(
    pending: &mut Option<BytesStart<'static>>,
    writer: &mut Writer<Vec<u8>>,
) -> Result<()> {
    if let Some(start) = pending.take() {
        writer.write_event(Event::Start(start))?;
    }
    Ok(())
}

#[inline]
fn is_editor_name(name: &[u8]) -> bool {
    EDITOR_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
}

#[inline]
fn is_dropped_element(name: &[u8]) -> bool {
    name == b"metadata" || is_editor_name(name)
}

/// Whether an attribute is removed regardless of its value.
fn is_stripped_attr(element: &[u8], key: &[u8]) -> bool {
    match key {
        b"xmlns" | b"version" | b"xml:space" => true,
        b"width" | b"height" => element == b"svg",
        _ => key.starts_with(b"xmlns:") || is_editor_name(key),
    }
}

/// Rebuild a start tag with cleaned, recolored and compacted attributes.
fn clean_element(
    elem: &BytesStart<'_>,
    reader: &Reader<&[u8]>,
    options: &OptimizeOptions,
) -> Result<BytesStart<'static>> {
    let name = reader.decoder().decode(elem.name().as_ref())?.into_owned();
    let mut cleaned = BytesStart::new(name);

    for attr in elem.attributes() {
        let attr = attr?;
        let key = attr.key.as_ref();

        if is_stripped_attr(elem.name().as_ref(), key) {
            continue;
        }

        let color = options.recolor.as_deref();
        match (key, color) {
            (b"d", _) => {
                let value = decode_value(reader, &attr.value)?;
                let compact = minify_path_data(&value, options.precision);
                cleaned.push_attribute(("d", compact.as_str()));
            }
            (b"fill" | b"stroke", Some(color)) => {
                let value = decode_value(reader, &attr.value)?;
                let key = if key == b"fill" { "fill" } else { "stroke" };
                cleaned.push_attribute((key, recolor_paint(&value, color)));
            }
            (b"style", _) => {
                let value = decode_value(reader, &attr.value)?;
                let style = rewrite_style(&value, color);
                if !style.is_empty() {
                    cleaned.push_attribute(("style", style.as_str()));
                }
            }
            // Raw bytes, already escaped in the source.
            _ => cleaned.push_attribute((key, attr.value.as_ref())),
        }
    }

    Ok(cleaned)
}

fn decode_value(reader: &Reader<&[u8]>, raw: &[u8]) -> Result<String> {
    let decoded = reader.decoder().decode(raw)?;
    Ok(unescape(&decoded)?.into_owned())
}

/// Replace a paint value with `color` unless it is a keyword or paint server.
fn recolor_paint<'a>(value: &'a str, color: &'a str) -> &'a str {
    let trimmed = value.trim();
    let lower = trimmed.to_ascii_lowercase();
    if KEPT_PAINTS.contains(&lower.as_str()) || lower.starts_with("url(") {
        trimmed
    } else {
        color
    }
}

/// Minify a `style` attribute, recoloring `fill`/`stroke` declarations.
fn rewrite_style(style: &str, color: Option<&str>) -> String {
    style
        .split(';')
        .filter_map(|decl| {
            let (prop, value) = decl.split_once(':')?;
            let prop = prop.trim();
            let value = value.trim();
            if prop.is_empty() {
                return None;
            }
            let value = match color {
                Some(color) if matches!(prop, "fill" | "stroke") => recolor_paint(value, color),
                _ => value,
            };
            Some(format!("{prop}:{value}"))
        })
        .collect::<Vec<_>>()
        .join(";")
}
