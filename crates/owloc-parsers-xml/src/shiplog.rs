use crate::tree::XmlNode;
use crate::{dedup_in_order, ParseError};

/// `AstroObjectEntry → Entry[]`, where entries nest recursively.
#[derive(Debug, Clone)]
pub struct ShipLogDocument {
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone)]
pub struct Entry {
    pub name: Option<String>,
    pub rumor_facts: Vec<RumorFact>,
    pub explore_facts: Vec<ExploreFact>,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone)]
pub struct RumorFact {
    pub rumor_name: String,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct ExploreFact {
    pub text: String,
}

fn required_text(
    node: &XmlNode,
    parent: &'static str,
    child: &'static str,
) -> Result<String, ParseError> {
    node.first_child(child)
        .and_then(XmlNode::text_str)
        .map(str::to_owned)
        .ok_or(ParseError::MissingElement { parent, child })
}

impl Entry {
    fn from_node(node: &XmlNode) -> Result<Self, ParseError> {
        let name = node
            .first_child("Name")
            .and_then(XmlNode::text_str)
            .map(str::to_owned);
        let rumor_facts = node
            .children_named("RumorFact")
            .map(|fact| {
                Ok(RumorFact {
                    rumor_name: required_text(fact, "RumorFact", "RumorName")?,
                    text: required_text(fact, "RumorFact", "Text")?,
                })
            })
            .collect::<Result<Vec<_>, ParseError>>()?;
        let explore_facts = node
            .children_named("ExploreFact")
            .map(|fact| {
                Ok(ExploreFact {
                    text: required_text(fact, "ExploreFact", "Text")?,
                })
            })
            .collect::<Result<Vec<_>, ParseError>>()?;
        let entries = node
            .children_named("Entry")
            .map(Entry::from_node)
            .collect::<Result<Vec<_>, ParseError>>()?;
        Ok(Entry {
            name,
            rumor_facts,
            explore_facts,
            entries,
        })
    }

    /// Depth-first, pre-order: this entry's fields in document order,
    /// then each nested entry's full sequence.
    fn emit(&self, out: &mut Vec<String>) {
        if let Some(name) = &self.name {
            out.push(name.clone());
        }
        for fact in &self.rumor_facts {
            out.push(fact.rumor_name.clone());
            out.push(fact.text.clone());
        }
        for fact in &self.explore_facts {
            out.push(fact.text.clone());
        }
        for child in &self.entries {
            child.emit(out);
        }
    }
}

impl ShipLogDocument {
    pub fn from_tree(root: &XmlNode) -> Result<Self, ParseError> {
        let entries = root
            .children_named("Entry")
            .map(Entry::from_node)
            .collect::<Result<Vec<_>, ParseError>>()?;
        if entries.is_empty() {
            return Err(ParseError::MissingElement {
                parent: "AstroObjectEntry",
                child: "Entry",
            });
        }
        Ok(ShipLogDocument { entries })
    }

    pub fn extract(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for entry in &self.entries {
            entry.emit(&mut out);
        }
        dedup_in_order(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::parse_tree;

    fn doc(xml: &str) -> ShipLogDocument {
        ShipLogDocument::from_tree(&parse_tree(xml).unwrap()).unwrap()
    }

    #[test]
    fn parent_fields_come_before_nested_entries() {
        let d = doc(
            "<AstroObjectEntry><Entry>\
               <Name>A</Name>\
               <Entry><Name>B</Name></Entry>\
             </Entry></AstroObjectEntry>",
        );
        assert_eq!(d.extract(), vec!["A", "B"]);
    }

    #[test]
    fn rumor_name_precedes_rumor_text_per_fact() {
        let d = doc(
            "<AstroObjectEntry><Entry>\
               <Name>The Vessel</Name>\
               <RumorFact><RumorName>Strange Signal</RumorName><Text>Something is broadcasting.</Text></RumorFact>\
               <RumorFact><RumorName>Old Path</RumorName><Text>A trail leads below.</Text></RumorFact>\
               <ExploreFact><Text>The bramble hides it.</Text></ExploreFact>\
             </Entry></AstroObjectEntry>",
        );
        assert_eq!(
            d.extract(),
            vec![
                "The Vessel",
                "Strange Signal",
                "Something is broadcasting.",
                "Old Path",
                "A trail leads below.",
                "The bramble hides it.",
            ]
        );
    }

    #[test]
    fn recursion_is_depth_first_across_siblings() {
        let d = doc(
            "<AstroObjectEntry>\
               <Entry>\
                 <Name>root-1</Name>\
                 <Entry><Name>child-1a</Name><Entry><Name>grand-1a</Name></Entry></Entry>\
                 <Entry><Name>child-1b</Name></Entry>\
               </Entry>\
               <Entry><Name>root-2</Name></Entry>\
             </AstroObjectEntry>",
        );
        assert_eq!(
            d.extract(),
            vec!["root-1", "child-1a", "grand-1a", "child-1b", "root-2"]
        );
    }

    #[test]
    fn entry_without_name_still_emits_facts() {
        let d = doc(
            "<AstroObjectEntry><Entry>\
               <ExploreFact><Text>nameless fact</Text></ExploreFact>\
             </Entry></AstroObjectEntry>",
        );
        assert_eq!(d.extract(), vec!["nameless fact"]);
    }

    #[test]
    fn duplicate_fact_text_collapses() {
        let d = doc(
            "<AstroObjectEntry>\
               <Entry><Name>A</Name><ExploreFact><Text>shared</Text></ExploreFact></Entry>\
               <Entry><Name>B</Name><ExploreFact><Text>shared</Text></ExploreFact></Entry>\
             </AstroObjectEntry>",
        );
        assert_eq!(d.extract(), vec!["A", "shared", "B"]);
    }

    #[test]
    fn rumor_fact_without_text_is_an_error() {
        let root = parse_tree(
            "<AstroObjectEntry><Entry>\
               <RumorFact><RumorName>half</RumorName></RumorFact>\
             </Entry></AstroObjectEntry>",
        )
        .unwrap();
        assert!(matches!(
            ShipLogDocument::from_tree(&root),
            Err(ParseError::MissingElement {
                parent: "RumorFact",
                child: "Text"
            })
        ));
    }

    #[test]
    fn missing_entry_is_an_error() {
        let root = parse_tree("<AstroObjectEntry><ID>x</ID></AstroObjectEntry>").unwrap();
        assert!(matches!(
            ShipLogDocument::from_tree(&root),
            Err(ParseError::MissingElement {
                parent: "AstroObjectEntry",
                child: "Entry"
            })
        ));
    }
}
