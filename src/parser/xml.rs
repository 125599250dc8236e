use roxmltree::{Document, Node};

use crate::error::{RecommenderError, Result};
use crate::parser::{ItemNode, NameEntry, PollNode, PollRow, PollVote, ResponseParser};

/// Parser for `<items><item id=".."> ... </item></items>` documents
#[derive(Debug, Clone)]
pub struct XmlParser {
    provider: String,
}

impl XmlParser {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
        }
    }

    fn parse_item(node: Node<'_, '_>) -> ItemNode {
        let mut item = ItemNode {
            id: node.attribute("id").map(str::to_string),
            ..ItemNode::default()
        };

        for child in node.children().filter(Node::is_element) {
            match child.tag_name().name() {
                "name" => {
                    if let Some(value) = child.attribute("value") {
                        let primary = child.attribute("type") == Some("primary")
                            || child.attribute("primary") == Some("true");
                        item.names.push(NameEntry::new(value, primary));
                    }
                }
                "description" => item.description = Some(element_text(child)),
                "thumbnail" => item.thumbnail = Some(element_text(child).trim().to_string()),
                "minplayers" => item.min_players = value_attr(child),
                "maxplayers" => item.max_players = value_attr(child),
                "playingtime" => item.playing_time = value_attr(child),
                "poll" => item.polls.push(Self::parse_poll(child)),
                _ => {}
            }
        }

        item
    }

    fn parse_poll(node: Node<'_, '_>) -> PollNode {
        let results = node
            .children()
            .filter(|n| n.has_tag_name("results"))
            .map(|results| PollRow {
                num_players: results.attribute("numplayers").map(str::to_string),
                votes: results
                    .children()
                    .filter(|n| n.has_tag_name("result"))
                    .filter_map(|r| {
                        Some(PollVote {
                            value: r.attribute("value")?.to_string(),
                            num_votes: r.attribute("numvotes").map(str::to_string),
                        })
                    })
                    .collect(),
            })
            .collect();

        PollNode {
            name: node.attribute("name").unwrap_or_default().to_string(),
            results,
        }
    }
}

/// All text below `node`, entities already decoded
fn element_text(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect()
}

fn value_attr(node: Node<'_, '_>) -> Option<String> {
    node.attribute("value").map(str::to_string)
}

impl ResponseParser for XmlParser {
    fn provider(&self) -> &str {
        &self.provider
    }

    fn parse(&self, payload: &str) -> Result<Vec<ItemNode>> {
        let doc = Document::parse(payload)
            .map_err(|e| RecommenderError::malformed(&self.provider, e, payload))?;

        let items: Vec<ItemNode> = doc
            .root_element()
            .children()
            .filter(|n| n.has_tag_name("item"))
            .map(Self::parse_item)
            .collect();

        tracing::debug!("[{}] parsed {} item element(s)", self.provider, items.len());
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const THING: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<items termsofuse="https://boardgamegeek.com/xmlapi/termsofuse">
  <item type="boardgame" id="13">
    <thumbnail>
      https://cf.geekdo-images.com/catan_t.jpg
    </thumbnail>
    <name type="alternate" sortindex="1" value="Die Siedler von Catan" />
    <name type="primary" sortindex="1" value="CATAN" />
    <description>Trade &amp; build&#10;settlements.</description>
    <minplayers value="3" />
    <maxplayers value="4" />
    <poll name="suggested_numplayers" title="User Suggested Number of Players" totalvotes="10">
      <results numplayers="3">
        <result value="Best" numvotes="5" />
        <result value="Recommended" numvotes="2" />
        <result value="Not Recommended" numvotes="0" />
      </results>
      <results numplayers="4+">
        <result value="Best" numvotes="1" />
      </results>
    </poll>
    <playingtime value="120" />
  </item>
</items>"#;

    #[test]
    fn test_parse_thing_item() {
        let parser = XmlParser::new("bgg");
        let items = parser.parse(THING).unwrap();
        assert_eq!(items.len(), 1);

        let item = &items[0];
        assert_eq!(item.id.as_deref(), Some("13"));
        assert_eq!(item.names.len(), 2);
        assert!(item.names[1].primary);
        assert_eq!(item.names[1].value, "CATAN");
        assert_eq!(item.description.as_deref(), Some("Trade & build\nsettlements."));
        assert_eq!(item.thumbnail.as_deref(), Some("https://cf.geekdo-images.com/catan_t.jpg"));
        assert_eq!(item.min_players.as_deref(), Some("3"));
        assert_eq!(item.playing_time.as_deref(), Some("120"));

        let poll = item.poll("suggested_numplayers").unwrap();
        assert_eq!(poll.results.len(), 2);
        assert_eq!(poll.results[0].votes_for("Best"), Some("5"));
        assert_eq!(poll.results[1].num_players.as_deref(), Some("4+"));
    }

    #[test]
    fn test_search_ids_in_document_order() {
        let payload = r#"<items total="2">
            <item type="boardgame" id="31260"><name type="primary" value="Agricola"/></item>
            <item type="boardgame" id="822"><name type="primary" value="Carcassonne"/></item>
            <item type="boardgame"><name type="primary" value="No id"/></item>
        </items>"#;
        let ids = XmlParser::new("bgg").parse_ids(payload).unwrap();
        assert_eq!(ids, vec!["31260", "822"]);
    }

    #[test]
    fn test_no_items_is_empty_not_error() {
        let parser = XmlParser::new("bgg");
        assert!(parser.parse(r#"<items total="0" termsofuse="x"></items>"#).unwrap().is_empty());
        assert!(parser.parse("<errors><error><message>x</message></error></errors>").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_xml() {
        let err = XmlParser::new("bgg").parse("<items><item id=\"1\">").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
        assert!(err.to_string().contains("bgg"));
    }

    #[test]
    fn test_empty_payload_is_malformed() {
        let err = XmlParser::new("bgg").parse("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }
}
