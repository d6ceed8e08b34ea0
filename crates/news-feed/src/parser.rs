//! Feed document parsing. Handles RSS 2.0 `<item>` and Atom `<entry>`
//! elements; anything outside those is ignored.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::FeedError;
use crate::model::RawItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    Summary,
    Content,
    Published,
}

impl Field {
    fn from_tag(local_name: &[u8]) -> Option<Self> {
        match local_name {
            b"title" => Some(Field::Title),
            b"link" => Some(Field::Link),
            b"description" | b"summary" => Some(Field::Summary),
            b"content" | b"encoded" => Some(Field::Content),
            b"pubDate" | b"published" | b"updated" | b"date" => Some(Field::Published),
            _ => None,
        }
    }
}

/// Namespaced elements other than the common content modules (e.g.
/// `media:title`) never feed item fields.
fn field_for(e: &BytesStart<'_>) -> Option<Field> {
    let qname = e.name();
    if let Some(prefix) = qname.prefix() {
        if !matches!(prefix.as_ref(), b"content" | b"dc" | b"atom") {
            return None;
        }
    }
    Field::from_tag(e.local_name().as_ref())
}

fn slot(item: &mut RawItem, field: Field) -> &mut Option<String> {
    match field {
        Field::Title => &mut item.title,
        Field::Link => &mut item.link,
        Field::Summary => &mut item.summary,
        Field::Content => &mut item.content,
        Field::Published => &mut item.published,
    }
}

fn append(target: &mut Option<String>, text: &str) {
    match target {
        Some(existing) => existing.push_str(text),
        None => *target = Some(text.to_string()),
    }
}

fn is_item(local_name: &[u8]) -> bool {
    matches!(local_name, b"item" | b"entry")
}

/// Atom links carry the URL in `href`; only the alternate (or unlabelled)
/// link points at the story.
fn atom_href(e: &BytesStart<'_>) -> Option<String> {
    let rel = e
        .try_get_attribute("rel")
        .ok()
        .flatten()
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()));
    if rel.as_deref().is_some_and(|r| r != "alternate") {
        return None;
    }
    e.try_get_attribute("href")
        .ok()
        .flatten()
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

pub fn parse_feed(xml: &str) -> Result<Vec<RawItem>, FeedError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut current: Option<RawItem> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.local_name();
                if is_item(name.as_ref()) {
                    current = Some(RawItem::default());
                    field = None;
                } else if let Some(item) = current.as_mut() {
                    field = field_for(&e);
                    if field == Some(Field::Link) && item.link.is_none() {
                        item.link = atom_href(&e);
                    }
                }
            }
            Event::Empty(e) => {
                if let Some(item) = current.as_mut() {
                    if e.local_name().as_ref() == b"link" && item.link.is_none() {
                        item.link = atom_href(&e);
                    }
                }
            }
            Event::Text(t) => {
                if let (Some(item), Some(f)) = (current.as_mut(), field) {
                    let text = t
                        .unescape()
                        .map(|c| c.into_owned())
                        .unwrap_or_else(|_| String::from_utf8_lossy(&t).into_owned());
                    append(slot(item, f), &text);
                }
            }
            Event::CData(c) => {
                if let (Some(item), Some(f)) = (current.as_mut(), field) {
                    append(slot(item, f), &String::from_utf8_lossy(&c));
                }
            }
            Event::End(e) => {
                if is_item(e.local_name().as_ref()) {
                    if let Some(item) = current.take() {
                        items.push(item);
                    }
                }
                field = None;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(items)
}
