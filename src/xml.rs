//! Element tree over `quick-xml` events. Text, comments and processing
//! instructions are dropped.

use std::str::FromStr;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::error::{Result, SrdfError};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Raw (untrimmed) value of the attribute called `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn children<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.tag == tag)
    }

    pub fn first_child_element(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.tag == tag)
    }
}

// top level elements
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    pub fn parse(text: &str) -> Result<Self> {
        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(true);

        // open elements, innermost last
        let mut open: Vec<Element> = Vec::new();
        let mut elements = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(ref start) => open.push(element_from(start)?),
                Event::Empty(ref start) => {
                    let element = element_from(start)?;
                    attach(&mut open, &mut elements, element);
                }
                Event::End(_) => {
                    let element = open.pop().ok_or_else(|| {
                        SrdfError::MalformedXml("closing tag without matching opening tag".into())
                    })?;
                    attach(&mut open, &mut elements, element);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(unclosed) = open.last() {
            return Err(SrdfError::MalformedXml(format!(
                "element '{}' is not closed",
                unclosed.tag
            )));
        }

        Ok(Self { elements })
    }

    pub fn root(&self) -> Option<&Element> {
        self.elements.first()
    }

    pub fn first_child_element(&self, tag: &str) -> Option<&Element> {
        self.elements.iter().find(|element| element.tag == tag)
    }
}

impl FromStr for Document {
    type Err = SrdfError;

    fn from_str(text: &str) -> Result<Self> {
        Self::parse(text)
    }
}

fn attach(open: &mut [Element], top_level: &mut Vec<Element>, element: Element) {
    match open.last_mut() {
        Some(parent) => parent.children.push(element),
        None => top_level.push(element),
    }
}

fn element_from(start: &BytesStart<'_>) -> Result<Element> {
    let tag = std::str::from_utf8(start.name().as_ref())?.to_owned();
    let attributes = start
        .attributes()
        .map(|attribute| -> Result<(String, String)> {
            let attribute = attribute.map_err(quick_xml::Error::from)?;
            let key = std::str::from_utf8(attribute.key.as_ref())?.to_owned();
            let value = attribute.unescape_value()?.into_owned();
            Ok((key, value))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Element {
        tag,
        attributes,
        children: Vec::new(),
    })
}
