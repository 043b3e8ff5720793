//! Namespace-aware XML element tree
//!
//! RDF/XML documents are small enough to be held in memory, so the document
//! is read once with quick-xml's `NsReader` into a tree of [`Element`]s whose
//! names are already resolved to namespace IRIs. Lookups compare
//! `(namespace, local name)` pairs, never prefixes.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;

use crate::domain::{DomainError, LocalizedText};

pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const SKOS_NS: &str = "http://www.w3.org/2004/02/skos/core#";
pub const DC_NS: &str = "http://purl.org/dc/elements/1.1/";
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// An expanded XML name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XmlName {
    pub namespace: &'static str,
    pub local_name: &'static str,
}

impl XmlName {
    pub const fn new(namespace: &'static str, local_name: &'static str) -> Self {
        Self {
            namespace,
            local_name,
        }
    }
}

pub const RDF_ABOUT: XmlName = XmlName::new(RDF_NS, "about");
pub const RDF_RESOURCE: XmlName = XmlName::new(RDF_NS, "resource");
pub const XML_LANG: XmlName = XmlName::new(XML_NS, "lang");

/// Name in the SKOS core vocabulary
pub const fn skos(local_name: &'static str) -> XmlName {
    XmlName::new(SKOS_NS, local_name)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub namespace: String,
    pub local_name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub namespace: String,
    pub local_name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Element>,
    /// Trimmed character data directly inside the element
    pub text: String,
}

impl Element {
    pub fn is(&self, name: XmlName) -> bool {
        self.namespace == name.namespace && self.local_name == name.local_name
    }

    /// First direct child with the given name
    pub fn find(&self, name: XmlName) -> Option<&Element> {
        self.children.iter().find(|child| child.is(name))
    }

    /// All direct children with the given name, in document order
    pub fn find_all(&self, name: XmlName) -> impl Iterator<Item = &Element> {
        self.children.iter().filter(move |child| child.is(name))
    }

    pub fn attribute(&self, name: XmlName) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace == name.namespace && a.local_name == name.local_name)
            .map(|a| a.value.as_str())
    }

    pub fn attribute_or_default(&self, name: XmlName) -> String {
        self.attribute(name).unwrap_or_default().to_string()
    }

    /// Text of the first child named `tag`, or "" when there is none
    pub fn sub_element_text(&self, tag: XmlName) -> String {
        self.find(tag)
            .map(|child| child.text.clone())
            .unwrap_or_default()
    }

    /// `attribute` of every child named `tag` ("" where a child lacks it)
    pub fn sub_element_attributes(&self, tag: XmlName, attribute: XmlName) -> Vec<String> {
        self.find_all(tag)
            .map(|child| child.attribute_or_default(attribute))
            .collect()
    }

    /// `xml:lang` -> text for every child named `tag`.
    ///
    /// Untagged children are stored under "". A later child with the same
    /// language replaces an earlier one.
    pub fn sub_elements_by_lang(&self, tag: XmlName) -> LocalizedText {
        self.find_all(tag)
            .map(|child| (child.attribute_or_default(XML_LANG), child.text.clone()))
            .collect()
    }
}

/// Read a whole document into an element tree and return its root.
pub fn parse_document(xml: &[u8]) -> Result<Element, DomainError> {
    let mut reader = NsReader::from_reader(xml);
    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(start) => {
                let element = open_element(&reader, &start)?;
                stack.push(element);
            }
            Event::Empty(start) => {
                let element = open_element(&reader, &start)?;
                close_element(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| DomainError::Xml("unexpected closing tag".to_string()))?;
                close_element(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(DomainError::Xml(format!(
            "unexpected end of document inside <{}>",
            open.local_name
        )));
    }

    root.ok_or_else(|| DomainError::Xml("document has no root element".to_string()))
}

fn open_element<R>(reader: &NsReader<R>, start: &BytesStart) -> Result<Element, DomainError> {
    let (resolved, local_name) = reader.resolve_element(start.name());
    let mut element = Element {
        namespace: namespace_of(resolved),
        local_name: String::from_utf8_lossy(local_name.as_ref()).into_owned(),
        ..Default::default()
    };

    for attribute in start.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::from)?;
        let key = attribute.key;
        if key.as_ref() == b"xmlns" || key.as_ref().starts_with(b"xmlns:") {
            continue;
        }

        let (resolved, local_name) = reader.resolve_attribute(key);
        element.attributes.push(Attribute {
            namespace: namespace_of(resolved),
            local_name: String::from_utf8_lossy(local_name.as_ref()).into_owned(),
            value: attribute.unescape_value()?.into_owned(),
        });
    }

    Ok(element)
}

fn close_element(
    stack: &mut [Element],
    root: &mut Option<Element>,
    mut element: Element,
) -> Result<(), DomainError> {
    element.text = element.text.trim().to_string();

    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(DomainError::Xml("multiple root elements".to_string())),
    }

    Ok(())
}

fn namespace_of(resolved: ResolveResult) -> String {
    match resolved {
        ResolveResult::Bound(namespace) => String::from_utf8_lossy(namespace.as_ref()).into_owned(),
        // `xml` is bound by definition even when the document never declares it
        ResolveResult::Unknown(prefix) if prefix.as_slice() == b"xml" => XML_NS.to_string(),
        _ => String::new(),
    }
}
