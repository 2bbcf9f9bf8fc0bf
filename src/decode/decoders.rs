//! Decoder implementations
//!
//! Each decoder handles a specific response format.

use super::types::RecordDecoder;
use crate::error::{Error, Result};
use crate::types::{JsonValue, Record};
use quick_xml::encoding::Decoder;
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

// ============================================================================
// Atom Feed Decoder
// ============================================================================

const ATOM_NS: &[u8] = b"http://www.w3.org/2005/Atom";
const METADATA_NS: &[u8] = b"http://schemas.microsoft.com/ado/2007/08/dataservices/metadata";

/// Flattens an OData Atom feed into one record per entry.
///
/// Walks `feed/atom:entry/atom:content/m:properties` and turns every direct
/// child of `m:properties` into a field named after its local name. Empty
/// elements become `null`. Entries without `atom:content` produce no record.
#[derive(Debug, Clone, Copy, Default)]
pub struct AtomFeedDecoder;

impl AtomFeedDecoder {
    /// Create a new Atom feed decoder
    pub fn new() -> Self {
        Self
    }
}

impl RecordDecoder for AtomFeedDecoder {
    fn decode(&self, body: &[u8]) -> Result<Vec<Record>> {
        flatten_feed(body)
    }
}

/// Position of the parser inside the document
enum Frame {
    /// The document element
    Root,
    /// `atom:entry` directly under the root
    Entry { has_content: bool },
    /// First `atom:content` of an entry
    Content { has_properties: bool },
    /// First `m:properties` of a content element
    Properties,
    /// A property element; text is only collected before its first child
    Field {
        name: String,
        text: String,
        has_child: bool,
    },
    /// Anything else
    Other,
}

/// Text is decoded with the encoding named by the BOM or the XML declaration
fn flatten_feed(xml: &[u8]) -> Result<Vec<Record>> {
    let mut reader = NsReader::from_reader(xml);
    let mut buf = Vec::new();

    let mut stack: Vec<Frame> = Vec::new();
    let mut records = Vec::new();
    let mut current: Option<Record> = None;
    let mut seen_root = false;

    loop {
        buf.clear();
        let (in_atom, in_metadata, event) = {
            let (ns, event) = reader
                .read_resolved_event_into(&mut buf)
                .map_err(|e| Error::xml(e.to_string()))?;
            if let ResolveResult::Unknown(prefix) = &ns {
                return Err(Error::xml(format!(
                    "Unbound namespace prefix '{}'",
                    String::from_utf8_lossy(prefix)
                )));
            }
            (
                matches!(ns, ResolveResult::Bound(Namespace(n)) if n == ATOM_NS),
                matches!(ns, ResolveResult::Bound(Namespace(n)) if n == METADATA_NS),
                event,
            )
        };
        let decoder = reader.decoder();

        match event {
            Event::Start(e) => {
                let frame = open_element(
                    &mut stack,
                    &mut current,
                    &mut seen_root,
                    e.local_name().as_ref(),
                    decoder,
                    in_atom,
                    in_metadata,
                )?;
                stack.push(frame);
            }
            Event::Empty(e) => {
                let frame = open_element(
                    &mut stack,
                    &mut current,
                    &mut seen_root,
                    e.local_name().as_ref(),
                    decoder,
                    in_atom,
                    in_metadata,
                )?;
                close_element(frame, &mut current, &mut records);
            }
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| Error::xml("Closing tag without a matching opening tag"))?;
                close_element(frame, &mut current, &mut records);
            }
            Event::Text(t) => {
                let text = t.unescape().map_err(|e| Error::xml(e.to_string()))?;
                push_text(&mut stack, &text)?;
            }
            Event::CData(c) => {
                let text = decoder
                    .decode(&c)
                    .map_err(|e| Error::xml(e.to_string()))?;
                push_text(&mut stack, &text)?;
            }
            Event::Eof => {
                if !stack.is_empty() {
                    return Err(Error::xml(
                        "Unexpected end of document: unclosed elements remain",
                    ));
                }
                if !seen_root {
                    return Err(Error::xml("Document has no root element"));
                }
                break;
            }
            _ => {}
        }
    }

    Ok(records)
}

/// Decide what a newly opened element is, based on its parent
fn open_element(
    stack: &mut [Frame],
    current: &mut Option<Record>,
    seen_root: &mut bool,
    local_name: &[u8],
    decoder: Decoder,
    in_atom: bool,
    in_metadata: bool,
) -> Result<Frame> {
    let frame = match stack.last_mut() {
        None => {
            if *seen_root {
                return Err(Error::xml("Document has more than one root element"));
            }
            *seen_root = true;
            Frame::Root
        }
        Some(Frame::Root) if in_atom && local_name == b"entry" => {
            *current = None;
            Frame::Entry { has_content: false }
        }
        Some(Frame::Entry { has_content }) if in_atom && local_name == b"content" && !*has_content => {
            *has_content = true;
            *current = Some(Record::new());
            Frame::Content {
                has_properties: false,
            }
        }
        Some(Frame::Content { has_properties })
            if in_metadata && local_name == b"properties" && !*has_properties =>
        {
            *has_properties = true;
            Frame::Properties
        }
        Some(Frame::Properties) => {
            let name = decoder
                .decode(local_name)
                .map_err(|e| Error::xml(format!("Invalid element name: {e}")))?;
            Frame::Field {
                name: name.to_string(),
                text: String::new(),
                has_child: false,
            }
        }
        Some(Frame::Field { has_child, .. }) => {
            *has_child = true;
            Frame::Other
        }
        Some(_) => Frame::Other,
    };
    Ok(frame)
}

fn close_element(frame: Frame, current: &mut Option<Record>, records: &mut Vec<Record>) {
    match frame {
        Frame::Entry { .. } => {
            if let Some(record) = current.take() {
                records.push(record);
            }
        }
        Frame::Field { name, text, .. } => {
            if let Some(record) = current.as_mut() {
                let value = if text.is_empty() {
                    JsonValue::Null
                } else {
                    JsonValue::String(text)
                };
                record.insert(name, value);
            }
        }
        _ => {}
    }
}

fn push_text(stack: &mut [Frame], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(Frame::Field {
            text: field_text,
            has_child: false,
            ..
        }) => field_text.push_str(text),
        None if !text.trim().is_empty() => {
            return Err(Error::xml("Text content outside the root element"));
        }
        _ => {}
    }
    Ok(())
}

// ============================================================================
// JSON Decoder
// ============================================================================

/// JSON decoder with optional record path extraction
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder {
    /// Dotted path to the record array
    record_path: Option<String>,
}

impl JsonDecoder {
    /// Create a JSON decoder treating the whole document as the record array
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a JSON decoder with a record path, e.g. `value` or `d.results`
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            record_path: Some(path.into()),
        }
    }

    fn extract_records(&self, value: JsonValue) -> Result<Vec<Record>> {
        let path = self.record_path.as_deref().unwrap_or("$");
        let array = match &self.record_path {
            Some(p) => take_simple_path(value, p)
                .ok_or_else(|| Error::extraction(path, "path not found in response"))?,
            None => value,
        };

        let JsonValue::Array(items) = array else {
            return Err(Error::extraction(path, "expected an array of records"));
        };

        items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                JsonValue::Object(map) => Ok(map),
                other => Err(Error::extraction(
                    path,
                    format!("element {i} is not an object: {other}"),
                )),
            })
            .collect()
    }
}

impl RecordDecoder for JsonDecoder {
    fn decode(&self, body: &[u8]) -> Result<Vec<Record>> {
        let value: JsonValue = serde_json::from_slice(body)
            .map_err(|e| Error::json(format!("Failed to parse JSON: {e}")))?;
        self.extract_records(value)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Move a value out of a document using a simple dot-notation path
fn take_simple_path(value: JsonValue, path: &str) -> Option<JsonValue> {
    let path = path.strip_prefix("$.").unwrap_or(path);

    let mut current = value;
    for part in path.split('.').filter(|p| !p.is_empty()) {
        match current {
            JsonValue::Object(mut map) => current = map.remove(part)?,
            _ => return None,
        }
    }

    Some(current)
}
