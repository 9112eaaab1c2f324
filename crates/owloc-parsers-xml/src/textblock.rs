use crate::tree::XmlNode;
use crate::{dedup_in_order, ParseError};

/// `NomaiObject → TextBlock[] → Text[]`.
#[derive(Debug, Clone)]
pub struct TextBlockDocument {
    pub blocks: Vec<TextBlock>,
}

#[derive(Debug, Clone)]
pub struct TextBlock {
    pub texts: Vec<String>,
}

impl TextBlockDocument {
    /// Convert a classified `NomaiObject` tree. A document without a
    /// single `TextBlock` is structurally unexpected and fails the run;
    /// a `TextBlock` without `Text` children is allowed and simply
    /// contributes nothing.
    pub fn from_tree(root: &XmlNode) -> Result<Self, ParseError> {
        let blocks: Vec<TextBlock> = root
            .children_named("TextBlock")
            .map(|block| TextBlock {
                texts: block
                    .children_named("Text")
                    .filter_map(|t| t.text_str().map(str::to_owned))
                    .collect(),
            })
            .collect();
        if blocks.is_empty() {
            return Err(ParseError::MissingElement {
                parent: "NomaiObject",
                child: "TextBlock",
            });
        }
        Ok(TextBlockDocument { blocks })
    }

    /// Flatten all `Text` values across blocks, first occurrence wins.
    pub fn extract(&self) -> Vec<String> {
        dedup_in_order(
            self.blocks
                .iter()
                .flat_map(|b| b.texts.iter().cloned())
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::parse_tree;

    fn doc(xml: &str) -> TextBlockDocument {
        TextBlockDocument::from_tree(&parse_tree(xml).unwrap()).unwrap()
    }

    #[test]
    fn flattens_blocks_in_document_order() {
        let d = doc(
            "<NomaiObject>\
               <TextBlock><Text>first</Text><Text>second</Text></TextBlock>\
               <TextBlock><Text>third</Text></TextBlock>\
             </NomaiObject>",
        );
        assert_eq!(d.extract(), vec!["first", "second", "third"]);
    }

    #[test]
    fn duplicates_collapse_to_first_occurrence() {
        let d = doc(
            "<NomaiObject>\
               <TextBlock><Text>echo</Text><Text>other</Text></TextBlock>\
               <TextBlock><Text>echo</Text></TextBlock>\
             </NomaiObject>",
        );
        assert_eq!(d.extract(), vec!["echo", "other"]);
    }

    #[test]
    fn block_without_text_contributes_nothing() {
        let d = doc("<NomaiObject><TextBlock/><TextBlock><Text>only</Text></TextBlock></NomaiObject>");
        assert_eq!(d.extract(), vec!["only"]);
    }

    #[test]
    fn missing_text_block_is_an_error() {
        let root = parse_tree("<NomaiObject><Other/></NomaiObject>").unwrap();
        assert!(matches!(
            TextBlockDocument::from_tree(&root),
            Err(ParseError::MissingElement {
                parent: "NomaiObject",
                child: "TextBlock"
            })
        ));
    }
}
