//! Minimal element tree built on quick-xml.
//!
//! Descriptors are tiny documents, so they are read eagerly into an
//! [`XmlNode`] tree and queried by child name afterwards.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{DescriptorError, DescriptorResult};

/// An XML element with its accumulated text and child elements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlNode {
    /// Element name (qualified name as written)
    pub name: String,
    /// Attributes in document order
    pub attributes: Vec<(String, String)>,
    /// Concatenated, whitespace-trimmed text content
    pub text: String,
    /// Child elements in document order
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    /// Parse a document and return its root element.
    pub fn parse(source: &str) -> DescriptorResult<Self> {
        let mut reader = Reader::from_str(source);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlNode> = Vec::new();
        let mut root: Option<XmlNode> = None;

        loop {
            let event = reader.read_event().map_err(|e| DescriptorError::Xml {
                position: reader.buffer_position() as u64,
                detail: e.to_string(),
            })?;

            match event {
                Event::Start(start) => {
                    stack.push(element(&reader, &start)?);
                }
                Event::Empty(start) => {
                    let node = element(&reader, &start)?;
                    attach(&mut stack, &mut root, node);
                }
                Event::End(end) => {
                    let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                    let node = stack.pop().ok_or(DescriptorError::Unbalanced(name))?;
                    attach(&mut stack, &mut root, node);
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(|e| DescriptorError::Xml {
                        position: reader.buffer_position() as u64,
                        detail: e.to_string(),
                    })?;
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&text);
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
        }

        if let Some(open) = stack.pop() {
            return Err(DescriptorError::Xml {
                position: reader.buffer_position() as u64,
                detail: format!("unclosed element <{}>", open.name),
            });
        }

        root.ok_or(DescriptorError::Empty)
    }

    /// Parse a document whose root element must be named `expected`.
    pub fn parse_named(source: &str, expected: &str) -> DescriptorResult<Self> {
        let node = Self::parse(source)?;
        if node.name != expected {
            return Err(DescriptorError::UnexpectedRoot {
                expected: expected.to_string(),
                found: node.name,
            });
        }
        Ok(node)
    }

    /// First direct child element named `name`.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Text of the first direct child named `name`.
    ///
    /// Returns `None` only when no such child exists; an empty child
    /// yields `Some("")`.
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.child(name).map(|child| child.text.clone())
    }

    /// Attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

fn element(reader: &Reader<&[u8]>, start: &BytesStart<'_>) -> DescriptorResult<XmlNode> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| DescriptorError::Xml {
            position: reader.buffer_position() as u64,
            detail: e.to_string(),
        })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| DescriptorError::Xml {
                position: reader.buffer_position() as u64,
                detail: e.to_string(),
            })?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(XmlNode {
        name,
        attributes,
        ..XmlNode::default()
    })
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => {
            if root.is_none() {
                *root = Some(node);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_text_lookup() {
        let node = XmlNode::parse(
            r#"<filter kind="action">
                 <name>region</name>
                 <data-output/>
                 <title>Region &amp; Country</title>
               </filter>"#,
        )
        .unwrap();

        assert_eq!(node.name, "filter");
        assert_eq!(node.attribute("kind"), Some("action"));
        assert_eq!(node.child_text("name").as_deref(), Some("region"));
        assert_eq!(node.child_text("data-output").as_deref(), Some(""));
        assert_eq!(node.child_text("title").as_deref(), Some("Region & Country"));
        assert_eq!(node.child_text("data-path"), None);
    }

    #[test]
    fn test_cdata_text() {
        let node = XmlNode::parse("<f><data-action><![CDATA[a<b>.xaction]]></data-action></f>")
            .unwrap();
        assert_eq!(node.child_text("data-action").as_deref(), Some("a<b>.xaction"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(XmlNode::parse(""), Err(DescriptorError::Empty)));
        assert!(XmlNode::parse("<filter><name>x</filter>").is_err());
        assert!(matches!(
            XmlNode::parse_named("<other/>", "filter"),
            Err(DescriptorError::UnexpectedRoot { .. })
        ));
    }
}
