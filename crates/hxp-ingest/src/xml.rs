//! In-memory XML document model.
//!
//! The export files this pipeline consumes are attribute-heavy and small
//! enough to hold fully in memory, so parsing builds an owned element
//! tree rather than streaming. Writing re-serializes that tree, which is
//! how the post-parse duplicate proves the document was structurally
//! sound.

use std::fs;
use std::io::BufWriter;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use hxp_model::{HxpError, Result};

/// One element of the parsed document: tag name, attributes in document
/// order, optional text content, and child elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Looks up an attribute value by key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A parsed XML document with a single root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    pub root: XmlElement,
}

impl XmlDocument {
    /// Collects every element whose tag name equals `selector`, in
    /// document order. The root itself participates in the match.
    pub fn select<'a>(&'a self, selector: &str) -> Vec<&'a XmlElement> {
        let mut matches = Vec::new();
        collect_matching(&self.root, selector, &mut matches);
        matches
    }
}

fn collect_matching<'a>(element: &'a XmlElement, selector: &str, out: &mut Vec<&'a XmlElement>) {
    if element.name == selector {
        out.push(element);
    }
    for child in &element.children {
        collect_matching(child, selector, out);
    }
}

/// Parses the XML document at `path` into an owned element tree.
///
/// Returns [`HxpError::NotFound`] when the path does not exist and
/// [`HxpError::ParseFailure`] when the content is not well-formed
/// (unclosed tags, multiple roots, stray close tags).
pub fn parse_document(path: &Path) -> Result<XmlDocument> {
    if !path.exists() {
        return Err(HxpError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    parse_str(&content).map_err(|message| HxpError::ParseFailure {
        path: path.to_path_buf(),
        message,
    })
}

/// Parses XML text into an element tree. Errors carry a plain message;
/// callers attach the source path.
pub fn parse_str(content: &str) -> std::result::Result<XmlDocument, String> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if root.is_some() && stack.is_empty() {
                    return Err("multiple root elements".to_string());
                }
                stack.push(element_from_start(&e)?);
            }
            Ok(Event::Empty(e)) => {
                if root.is_some() && stack.is_empty() {
                    return Err("multiple root elements".to_string());
                }
                let element = element_from_start(&e)?;
                attach(&mut stack, &mut root, element);
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                let Some(element) = stack.pop() else {
                    return Err(format!("unexpected close tag </{name}>"));
                };
                if element.name != name {
                    return Err(format!(
                        "mismatched close tag </{name}> for <{}>",
                        element.name
                    ));
                }
                attach(&mut stack, &mut root, element);
            }
            Ok(Event::Text(e)) => {
                let text = e.xml_content().map_err(|err| err.to_string())?;
                if let Some(top) = stack.last_mut() {
                    match &mut top.text {
                        Some(existing) => existing.push_str(&text),
                        None => top.text = Some(text.into_owned()),
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_)) => {}
            Ok(Event::GeneralRef(e)) => {
                let name = String::from_utf8_lossy(&e).into_owned();
                return Err(format!("unresolved entity reference &{name};"));
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                if let Some(top) = stack.last_mut() {
                    match &mut top.text {
                        Some(existing) => existing.push_str(&text),
                        None => top.text = Some(text),
                    }
                }
            }
            Err(err) => return Err(err.to_string()),
        }
    }

    if let Some(open) = stack.last() {
        return Err(format!("unclosed element <{}>", open.name));
    }
    root.map(|root| XmlDocument { root })
        .ok_or_else(|| "document has no root element".to_string())
}

fn element_from_start(e: &BytesStart<'_>) -> std::result::Result<XmlElement, String> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut element = XmlElement::new(name);
    for attr in e.attributes() {
        let attr = attr.map_err(|err| err.to_string())?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| err.to_string())?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(stack: &mut Vec<XmlElement>, root: &mut Option<XmlElement>, element: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

/// Serializes `document` to `path` with an XML declaration and two-space
/// indentation. Parent directories must already exist.
pub fn write_document(document: &XmlDocument, path: &Path) -> Result<()> {
    let file = fs::File::create(path)?;
    let writer = BufWriter::new(file);
    let mut xml = Writer::new_with_indent(writer, b' ', 2);

    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(write_error)?;
    write_element(&mut xml, &document.root)?;
    Ok(())
}

fn write_element<W: std::io::Write>(xml: &mut Writer<W>, element: &XmlElement) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() && element.text.is_none() {
        xml.write_event(Event::Empty(start)).map_err(write_error)?;
        return Ok(());
    }

    xml.write_event(Event::Start(start)).map_err(write_error)?;
    if let Some(text) = &element.text {
        xml.write_event(Event::Text(BytesText::new(text)))
            .map_err(write_error)?;
    }
    for child in &element.children {
        write_element(xml, child)?;
    }
    xml.write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(write_error)?;
    Ok(())
}

fn write_error(err: std::io::Error) -> HxpError {
    HxpError::Io(err)
}

#[cfg(test)]
mod tests {
    use super::{XmlElement, parse_str};

    #[test]
    fn parses_attributes_in_document_order() {
        let doc = parse_str(
            r#"<HealthData><Record type="Steps" value="12"/><Record type="Pulse" value="60"/></HealthData>"#,
        )
        .expect("parse");
        assert_eq!(doc.root.name, "HealthData");
        assert_eq!(doc.root.children.len(), 2);
        let first = &doc.root.children[0];
        assert_eq!(first.attribute("type"), Some("Steps"));
        assert_eq!(first.attribute("value"), Some("12"));
    }

    #[test]
    fn parses_nested_text_content() {
        let doc = parse_str("<catalog><book><title>Rust</title></book></catalog>").expect("parse");
        let title = &doc.root.children[0].children[0];
        assert_eq!(title.name, "title");
        assert_eq!(title.text.as_deref(), Some("Rust"));
    }

    #[test]
    fn select_walks_all_depths_in_document_order() {
        let doc = parse_str(
            "<root><group><item id=\"1\"/></group><item id=\"2\"/><group><item id=\"3\"/></group></root>",
        )
        .expect("parse");
        let items = doc.select("item");
        let ids: Vec<_> = items.iter().filter_map(|e| e.attribute("id")).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn select_includes_matching_root() {
        let doc = parse_str("<Record a=\"1\"><Record a=\"2\"/></Record>").expect("parse");
        assert_eq!(doc.select("Record").len(), 2);
    }

    #[test]
    fn rejects_mismatched_close_tag() {
        let err = parse_str("<a><b></a></b>").expect_err("must fail");
        assert!(err.contains("mismatched") || err.contains("close tag"), "{err}");
    }

    #[test]
    fn rejects_unclosed_root() {
        let err = parse_str("<a><b/>").expect_err("must fail");
        assert!(!err.is_empty());
    }

    #[test]
    fn rejects_multiple_roots() {
        let err = parse_str("<a/><b/>").expect_err("must fail");
        assert!(err.contains("multiple root"), "{err}");
    }

    #[test]
    fn unescapes_entity_references() {
        let doc = parse_str(r#"<r note="a &amp; b">x &lt; y</r>"#).expect("parse");
        assert_eq!(doc.root.attribute("note"), Some("a & b"));
        assert_eq!(doc.root.text.as_deref(), Some("x < y"));
    }

    #[test]
    fn round_trips_through_writer() {
        let doc = parse_str(
            r#"<HealthData locale="en_US"><Record type="Steps" value="12"/></HealthData>"#,
        )
        .expect("parse");
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("copy.xml");
        super::write_document(&doc, &path).expect("write");
        let written = std::fs::read_to_string(&path).expect("read back");
        let reparsed = parse_str(&written).expect("reparse");
        assert_eq!(reparsed, doc);
    }

    #[test]
    fn element_attribute_lookup_misses_cleanly() {
        let element = XmlElement::new("Record");
        assert_eq!(element.attribute("type"), None);
    }
}
