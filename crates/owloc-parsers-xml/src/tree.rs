use quick_xml::events::Event;
use quick_xml::Reader;

use crate::ParseError;

/// Text content of an element. CDATA is kept distinct from plain text
/// because Text fields may legitimately carry structured/escaped content
/// that a consumer must not re-escape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlText {
    Plain(String),
    CData(String),
}

impl XmlText {
    pub fn as_str(&self) -> &str {
        match self {
            XmlText::Plain(s) | XmlText::CData(s) => s,
        }
    }
}

/// Generic element tree. Repeated siblings and singletons are both just
/// entries in `children`; shape-specific lookups go through
/// [`XmlNode::children_named`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    pub name: String,
    pub children: Vec<XmlNode>,
    pub text: Option<XmlText>,
}

impl XmlNode {
    fn new(name: String) -> Self {
        XmlNode {
            name,
            children: Vec::new(),
            text: None,
        }
    }

    /// All direct children with the given element name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn first_child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn text_str(&self) -> Option<&str> {
        self.text.as_ref().map(XmlText::as_str)
    }

    fn append_text(&mut self, value: &str, cdata: bool) {
        let (mut current, was_cdata) = match self.text.take() {
            Some(XmlText::Plain(s)) => (s, false),
            Some(XmlText::CData(s)) => (s, true),
            None => (String::new(), false),
        };
        current.push_str(value);
        self.text = Some(if cdata || was_cdata {
            XmlText::CData(current)
        } else {
            XmlText::Plain(current)
        });
    }
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) -> Result<(), ParseError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        return Ok(());
    }
    if root.is_some() {
        return Err(ParseError::Malformed("multiple root elements".to_string()));
    }
    *root = Some(node);
    Ok(())
}

/// Parse raw XML text into a generic element tree.
///
/// Fails with [`ParseError::Malformed`] on ill-formed input; the caller
/// aborts the whole run in that case, since skipping a file would
/// misrepresent the completeness of the generated dictionary.
pub fn parse_tree(xml: &str) -> Result<XmlNode, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                stack.push(XmlNode::new(name));
            }
            Ok(Event::Empty(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                attach(&mut stack, &mut root, XmlNode::new(name))?;
            }
            Ok(Event::End(_)) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| ParseError::Malformed("unexpected closing tag".to_string()))?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::Text(e)) => {
                if let Some(node) = stack.last_mut() {
                    let value = e
                        .unescape()
                        .map_err(|err| ParseError::Malformed(err.to_string()))?;
                    if !value.is_empty() {
                        node.append_text(&value, false);
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(node) = stack.last_mut() {
                    let value = String::from_utf8_lossy(&e.into_inner()).to_string();
                    node.append_text(&value, true);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(ParseError::Malformed(e.to_string())),
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(ParseError::Malformed("unclosed element".to_string()));
    }
    root.ok_or(ParseError::NoRoot)
}
