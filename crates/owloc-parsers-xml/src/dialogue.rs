use crate::tree::XmlNode;
use crate::{dedup_in_order, ParseError};

/// `DialogueTree → DialogueNode[]`.
#[derive(Debug, Clone)]
pub struct DialogueTreeDocument {
    pub nodes: Vec<DialogueNode>,
}

#[derive(Debug, Clone)]
pub struct DialogueNode {
    pub content: DialogueContent,
}

/// Which optional parts a node carries, resolved once at conversion time
/// instead of re-probed at every extraction site.
#[derive(Debug, Clone)]
pub enum DialogueContent {
    Both {
        pages: Vec<String>,
        lists: Vec<OptionsList>,
    },
    PagesOnly {
        pages: Vec<String>,
    },
    OptionsOnly {
        lists: Vec<OptionsList>,
    },
    Neither,
}

/// One `DialogueOptionsList`: the `Text` of each `DialogueOption`.
/// A list without any `DialogueOption` is valid and stays empty.
#[derive(Debug, Clone)]
pub struct OptionsList {
    pub options: Vec<String>,
}

fn collect_pages(node: &XmlNode) -> Vec<String> {
    node.children_named("Dialogue")
        .flat_map(|d| d.children_named("Page"))
        .filter_map(|p| p.text_str().map(str::to_owned))
        .collect()
}

fn collect_lists(node: &XmlNode) -> Result<Vec<OptionsList>, ParseError> {
    node.children_named("DialogueOptionsList")
        .map(|list| {
            let options = list
                .children_named("DialogueOption")
                .map(|opt| {
                    opt.first_child("Text")
                        .and_then(XmlNode::text_str)
                        .map(str::to_owned)
                        .ok_or(ParseError::MissingElement {
                            parent: "DialogueOption",
                            child: "Text",
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(OptionsList { options })
        })
        .collect()
}

impl DialogueTreeDocument {
    pub fn from_tree(root: &XmlNode) -> Result<Self, ParseError> {
        let nodes = root
            .children_named("DialogueNode")
            .map(|node| {
                let has_pages = node.children_named("Dialogue").next().is_some();
                let has_lists = node.children_named("DialogueOptionsList").next().is_some();
                let content = match (has_pages, has_lists) {
                    (true, true) => DialogueContent::Both {
                        pages: collect_pages(node),
                        lists: collect_lists(node)?,
                    },
                    (true, false) => DialogueContent::PagesOnly {
                        pages: collect_pages(node),
                    },
                    (false, true) => DialogueContent::OptionsOnly {
                        lists: collect_lists(node)?,
                    },
                    (false, false) => DialogueContent::Neither,
                };
                Ok(DialogueNode { content })
            })
            .collect::<Result<Vec<_>, ParseError>>()?;
        if nodes.is_empty() {
            return Err(ParseError::MissingElement {
                parent: "DialogueTree",
                child: "DialogueNode",
            });
        }
        Ok(DialogueTreeDocument { nodes })
    }

    /// Flatten every node's contribution, pages before options within a
    /// node, then dedup keeping first occurrence.
    pub fn extract(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for node in &self.nodes {
            match &node.content {
                DialogueContent::Both { pages, lists } => {
                    out.extend(pages.iter().cloned());
                    for list in lists {
                        out.extend(list.options.iter().cloned());
                    }
                }
                DialogueContent::PagesOnly { pages } => out.extend(pages.iter().cloned()),
                DialogueContent::OptionsOnly { lists } => {
                    for list in lists {
                        out.extend(list.options.iter().cloned());
                    }
                }
                DialogueContent::Neither => {}
            }
        }
        dedup_in_order(out)
    }
}
