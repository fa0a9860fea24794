//! XML form of a [`Document`]
//!
//! ```text
//! <!DOCTYPE QtMindMap>
//! <qtmindmap>
//!  <nodes>
//!   <node x y htmlContent scale bg_red bg_green bg_blue text_red text_green text_blue/>
//!  </nodes>
//!  <edges>
//!   <edge source destination red green blue width secondary/>
//!  </edges>
//! </qtmindmap>
//! ```
//!
//! Attribute names are the file format contract. All numbers are decimal
//! text, `secondary` is `0` or `1`.

use super::document::{Document, EdgeRecord, NodeRecord};
use super::{PersistenceError, PersistenceResult};
use crate::graph::Color;
use roxmltree::ParsingOptions;
use std::fmt::Write;
use tracing::debug;

const DOCTYPE: &str = "QtMindMap";
const ROOT_ELEMENT: &str = "qtmindmap";

/// Render `doc` as XML text.
///
/// Fails with [`PersistenceError::Encode`] when node content holds a
/// character that XML 1.0 cannot carry, even as a character reference.
pub fn to_xml(doc: &Document) -> PersistenceResult<String> {
    for (position, node) in doc.nodes.iter().enumerate() {
        if let Some(c) = node.html_content.chars().find(|&c| !is_xml_char(c)) {
            return Err(PersistenceError::Encode(format!(
                "node {} content holds character U+{:04X}, which XML cannot store",
                position, c as u32
            )));
        }
    }

    let mut out = String::with_capacity(128 + 192 * (doc.nodes.len() + doc.edges.len()));

    // Writing into a String cannot fail.
    let _ = writeln!(out, "<!DOCTYPE {}>", DOCTYPE);
    let _ = writeln!(out, "<{}>", ROOT_ELEMENT);

    out.push_str(" <nodes>\n");
    for node in &doc.nodes {
        let _ = writeln!(
            out,
            "  <node x=\"{}\" y=\"{}\" htmlContent=\"{}\" scale=\"{}\" \
             bg_red=\"{}\" bg_green=\"{}\" bg_blue=\"{}\" \
             text_red=\"{}\" text_green=\"{}\" text_blue=\"{}\"/>",
            node.x,
            node.y,
            escape_attribute(&node.html_content),
            node.scale,
            node.color.red,
            node.color.green,
            node.color.blue,
            node.text_color.red,
            node.text_color.green,
            node.text_color.blue,
        );
    }
    out.push_str(" </nodes>\n");

    out.push_str(" <edges>\n");
    for edge in &doc.edges {
        let _ = writeln!(
            out,
            "  <edge source=\"{}\" destination=\"{}\" red=\"{}\" green=\"{}\" blue=\"{}\" \
             width=\"{}\" secondary=\"{}\"/>",
            edge.source,
            edge.destination,
            edge.color.red,
            edge.color.green,
            edge.color.blue,
            edge.width,
            u8::from(edge.secondary),
        );
    }
    out.push_str(" </edges>\n");

    let _ = writeln!(out, "</{}>", ROOT_ELEMENT);
    Ok(out)
}

/// Parse XML text into a [`Document`]
pub fn from_xml(text: &str) -> PersistenceResult<Document> {
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;

    let xml = roxmltree::Document::parse_with_options(text, options)
        .map_err(|e| PersistenceError::Parse(format!("Couldn't parse XML file: {}", e)))?;
    let root = xml.root_element();

    let section = |name: &str| root.children().find(|n| n.is_element() && n.has_tag_name(name));

    let nodes_section = section("nodes")
        .ok_or_else(|| PersistenceError::Parse("missing <nodes> section".to_string()))?;

    let nodes = nodes_section
        .children()
        .filter(|n| n.is_element())
        .map(|element| read_node(&element))
        .collect::<PersistenceResult<Vec<_>>>()?;

    // a map that never had an edge may omit the section entirely
    let edges = match section("edges") {
        Some(edges_section) => edges_section
            .children()
            .filter(|n| n.is_element())
            .map(|element| read_edge(&element))
            .collect::<PersistenceResult<Vec<_>>>()?,
        None => Vec::new(),
    };

    debug!("Parsed document with {} nodes and {} edges", nodes.len(), edges.len());
    Ok(Document { nodes, edges })
}

fn read_node(element: &roxmltree::Node<'_, '_>) -> PersistenceResult<NodeRecord> {
    Ok(NodeRecord {
        x: number(element, "x")?,
        y: number(element, "y")?,
        html_content: element.attribute("htmlContent").unwrap_or_default().to_string(),
        scale: number(element, "scale")?,
        color: color(element, ["bg_red", "bg_green", "bg_blue"])?,
        text_color: color(element, ["text_red", "text_green", "text_blue"])?,
    })
}

fn read_edge(element: &roxmltree::Node<'_, '_>) -> PersistenceResult<EdgeRecord> {
    Ok(EdgeRecord {
        source: index(element, "source")?,
        destination: index(element, "destination")?,
        color: color(element, ["red", "green", "blue"])?,
        width: number(element, "width")?,
        secondary: number(element, "secondary")? != 0.0,
    })
}

fn attribute<'a>(element: &roxmltree::Node<'a, '_>, name: &str) -> PersistenceResult<&'a str> {
    element.attribute(name).ok_or_else(|| {
        PersistenceError::Parse(format!(
            "<{}> has no '{}' attribute",
            element.tag_name().name(),
            name
        ))
    })
}

fn number(element: &roxmltree::Node<'_, '_>, name: &str) -> PersistenceResult<f64> {
    let raw = attribute(element, name)?;
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| PersistenceError::Parse(format!("attribute '{}' is not a number: {:?}", name, raw)))
}

fn index(element: &roxmltree::Node<'_, '_>, name: &str) -> PersistenceResult<usize> {
    let raw = attribute(element, name)?;
    raw.trim()
        .parse::<usize>()
        .map_err(|_| PersistenceError::Parse(format!("attribute '{}' is not a node index: {:?}", name, raw)))
}

fn color(element: &roxmltree::Node<'_, '_>, names: [&str; 3]) -> PersistenceResult<Color> {
    let channel = |name: &str| -> PersistenceResult<u8> {
        let value = number(element, name)?.round();
        if (0.0..=255.0).contains(&value) {
            Ok(value as u8)
        } else {
            Err(PersistenceError::Parse(format!(
                "attribute '{}' is outside 0..=255: {}",
                name, value
            )))
        }
    };
    Ok(Color::rgb(channel(names[0])?, channel(names[1])?, channel(names[2])?))
}

/// The `Char` production of XML 1.0
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
        || ('\u{20}'..='\u{D7FF}').contains(&c)
        || ('\u{E000}'..='\u{FFFD}').contains(&c)
        || c >= '\u{10000}'
}

/// Escape an attribute value so that it survives a parse unchanged,
/// including line breaks and tabs.
pub(crate) fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\t' => escaped.push_str("&#9;"),
            other => escaped.push(other),
        }
    }
    escaped
}
