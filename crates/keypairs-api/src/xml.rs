// ABOUTME: XML representation of keypair bodies: serde serializer out, event reader in.
// ABOUTME: Element names mirror the JSON field names so both formats carry the same shape.

use crate::envelope::{CreateKeypairBody, KeypairView};
use crate::error::ApiError;
use crate::fault::Fault;
use quick_xml::events::Event;
use quick_xml::name::QName;
use quick_xml::Reader;
use serde::Serialize;
use std::collections::HashMap;

const DECLARATION: &str = "<?xml version='1.0' encoding='UTF-8'?>\n";

/// `<keypairs>` holds a repeated `<keypair>` child.
#[derive(Debug, Default, Serialize)]
struct KeypairList {
    keypair: Vec<KeypairView>,
}

#[derive(Debug, Serialize)]
struct FaultBody<'a> {
    #[serde(rename = "@code")]
    code: u16,
    message: &'a str,
}

fn encode<T: Serialize>(root: &str, value: &T) -> Result<String, ApiError> {
    let body = quick_xml::se::to_string_with_root(root, value)
        .map_err(|e| ApiError::Encode(e.to_string()))?;
    Ok(format!("{DECLARATION}{body}"))
}

/// Child elements of one record, keyed by element name. Text is kept verbatim.
type Fields = HashMap<String, String>;

fn element_name(name: QName<'_>) -> String {
    String::from_utf8_lossy(name.as_ref()).into_owned()
}

/// Collect the records of a flat document.
///
/// With `record == root` the document is one record (`<keypair>…</keypair>`);
/// otherwise the root holds repeated `<record>` children. Field text is read
/// without trimming so names with surrounding spaces survive unchanged.
fn read_records(xml: &str, root: &str, record: &str) -> Result<Vec<Fields>, ApiError> {
    let nested = root != record;
    let record_depth = if nested { 2 } else { 1 };
    let field_depth = record_depth + 1;

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut depth = 0usize;
    let mut seen_root = false;
    let mut records = Vec::new();
    let mut current: Option<Fields> = None;
    let mut field: Option<(String, String)> = None;

    loop {
        let event = reader.read_event().map_err(|_| ApiError::InvalidBody)?;
        let (name, closes) = match &event {
            Event::Start(e) => (Some(element_name(e.name())), false),
            Event::Empty(e) => (Some(element_name(e.name())), true),
            _ => (None, false),
        };

        if let Some(name) = name {
            depth += 1;
            if depth == 1 {
                if seen_root || name != root {
                    return Err(ApiError::InvalidBody);
                }
                seen_root = true;
            }
            if depth == record_depth {
                if name != record {
                    return Err(ApiError::InvalidBody);
                }
                current = Some(Fields::new());
            } else if depth == field_depth {
                field = Some((name, String::new()));
            } else if depth > field_depth {
                return Err(ApiError::InvalidBody);
            }
            if !closes {
                continue;
            }
        }

        match event {
            Event::Start(_) => {}
            Event::Text(e) => {
                let text = e.unescape().map_err(|_| ApiError::InvalidBody)?;
                match field.as_mut() {
                    Some((_, value)) => value.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => return Err(ApiError::InvalidBody),
                }
            }
            Event::CData(e) => {
                let (_, value) = field.as_mut().ok_or(ApiError::InvalidBody)?;
                let text = std::str::from_utf8(&e).map_err(|_| ApiError::InvalidBody)?;
                value.push_str(text);
            }
            Event::End(_) | Event::Empty(_) => {
                if depth == field_depth {
                    if let (Some((key, value)), Some(fields)) = (field.take(), current.as_mut()) {
                        fields.insert(key, value);
                    }
                } else if depth == record_depth {
                    records.extend(current.take());
                }
                depth -= 1;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root || depth != 0 {
        return Err(ApiError::InvalidBody);
    }
    Ok(records)
}

fn single_record(xml: &str) -> Result<Fields, ApiError> {
    read_records(xml, "keypair", "keypair")?
        .pop()
        .ok_or(ApiError::InvalidBody)
}

fn required(fields: &mut Fields, key: &str) -> Result<String, ApiError> {
    fields.remove(key).ok_or(ApiError::InvalidBody)
}

fn view_from_fields(mut fields: Fields) -> Result<KeypairView, ApiError> {
    Ok(KeypairView {
        name: required(&mut fields, "name")?,
        public_key: required(&mut fields, "public_key")?,
        fingerprint: required(&mut fields, "fingerprint")?,
        private_key: fields.remove("private_key"),
    })
}

pub fn keypair_to_xml(view: &KeypairView) -> Result<String, ApiError> {
    encode("keypair", view)
}

pub fn keypairs_to_xml(views: &[KeypairView]) -> Result<String, ApiError> {
    encode(
        "keypairs",
        &KeypairList {
            keypair: views.to_vec(),
        },
    )
}

pub fn keypair_from_xml(xml: &str) -> Result<KeypairView, ApiError> {
    view_from_fields(single_record(xml)?)
}

pub fn keypairs_from_xml(xml: &str) -> Result<Vec<KeypairView>, ApiError> {
    read_records(xml, "keypairs", "keypair")?
        .into_iter()
        .map(view_from_fields)
        .collect()
}

/// `<keypair><name>…</name><public_key>…</public_key></keypair>`
pub fn parse_create_request(xml: &str) -> Result<CreateKeypairBody, ApiError> {
    let mut fields = single_record(xml)?;
    Ok(CreateKeypairBody {
        name: required(&mut fields, "name")?,
        public_key: fields.remove("public_key"),
    })
}

/// `<badRequest code="400"><message>…</message></badRequest>`
pub fn fault_to_xml(fault: &Fault) -> Result<String, ApiError> {
    encode(
        fault.kind.as_str(),
        &FaultBody {
            code: fault.status().as_u16(),
            message: &fault.message,
        },
    )
}
