use quick_xml::{Reader, Writer};
use quick_xml::events::Event;
use tracing::debug;

use crate::sdrt::conv::error::{Result, ToolError};
use crate::sdrt::conv::model::Playlist;

/// Name of the document's root element.
pub const ROOT_ELEMENT: &str = "playlist";

/// Parses raw playlist bytes into the document tree. Alias and id order is
/// preserved; unknown attributes and elements are ignored.
pub fn parse_playlist(bytes: &[u8]) -> Result<Playlist> {
    let source = std::str::from_utf8(bytes)
        .map_err(|error| ToolError::MalformedInput(format!("input is not UTF-8: {error}")))?;
    parse_playlist_str(source)
}

/// Same as [`parse_playlist`] for input that is already text.
pub fn parse_playlist_str(source: &str) -> Result<Playlist> {
    let markup = strip_character_data(source)?;
    if markup.root != ROOT_ELEMENT {
        return Err(ToolError::MalformedInput(format!(
            "expected element type <{ROOT_ELEMENT}> but have <{}>",
            markup.root
        )));
    }

    let playlist: Playlist = quick_xml::de::from_str(&markup.document)?;
    debug!(alias_count = playlist.aliases.len(), "playlist document parsed");
    Ok(playlist)
}

struct Markup {
    root: String,
    document: String,
}

/// Re-emits the document without text and CDATA nodes. No field is read from
/// element content, and mixed content inside `<alias>` would otherwise stop
/// the deserializer. Tag nesting is checked here as well.
fn strip_character_data(source: &str) -> Result<Markup> {
    let mut reader = Reader::from_str(source);
    let mut writer = Writer::new(Vec::with_capacity(source.len()));
    let mut root: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Text(_) | Event::CData(_) => {}
            event => {
                if root.is_none() {
                    if let Event::Start(element) | Event::Empty(element) = &event {
                        root = Some(
                            String::from_utf8_lossy(element.local_name().as_ref()).into_owned(),
                        );
                    }
                }
                writer.write_event(event)?;
            }
        }
    }

    let root =
        root.ok_or_else(|| ToolError::MalformedInput("document has no root element".to_string()))?;
    let document = String::from_utf8(writer.into_inner())
        .map_err(|error| ToolError::MalformedInput(error.to_string()))?;
    Ok(Markup { root, document })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdrt::conv::model::TgidKind;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<playlist version="4">
  <alias color="-16777216" group="PD" list="W" name="POLICE1" iconName="Police">
    <id type="talkgroup" value="2600" protocol="APCO25"/>
    <id type="priority" priority="2"/>
  </alias>
  <channel name="Site 1"/>
  <alias group="FD" list="W" name="FIRE">
    <id type="talkgroupRange" min="10" max="12"/>
    <id type="broadcastChannel" channel="Stream 1"/>
  </alias>
</playlist>"#;

    #[test]
    fn preserves_document_order_and_attributes() {
        let playlist = parse_playlist(SAMPLE.as_bytes()).expect("playlist parsed");

        assert_eq!(playlist.aliases.len(), 2);
        let police = &playlist.aliases[0];
        assert_eq!(police.name, "POLICE1");
        assert_eq!(police.group, "PD");
        assert_eq!(police.list, "W");
        assert_eq!(police.tgids.len(), 2);
        assert_eq!(police.tgids[0].kind(), TgidKind::Talkgroup);
        assert_eq!(police.tgids[0].value, 2600);
        assert_eq!(police.tgids[1].kind(), TgidKind::Priority);
        assert_eq!(police.tgids[1].priority, 2);

        let fire = &playlist.aliases[1];
        assert_eq!(fire.name, "FIRE");
        assert_eq!(fire.tgids[0].min, 10);
        assert_eq!(fire.tgids[0].max, 12);
        assert_eq!(fire.tgids[1].channel, "Stream 1");
    }

    #[test]
    fn missing_attributes_default_to_zero_and_empty() {
        let playlist = parse_playlist(br#"<playlist><alias><id/></alias></playlist>"#)
            .expect("playlist parsed");

        let alias = &playlist.aliases[0];
        assert_eq!(alias.name, "");
        assert_eq!(alias.group, "");
        assert_eq!(alias.list, "");
        let tgid = &alias.tgids[0];
        assert_eq!(tgid.kind(), TgidKind::Unrecognised);
        assert_eq!((tgid.priority, tgid.value, tgid.min, tgid.max), (0, 0, 0, 0));
    }

    #[test]
    fn blank_integer_attribute_counts_as_zero() {
        let playlist =
            parse_playlist(br#"<playlist><alias name="A"><id type="talkgroup" value=" "/></alias></playlist>"#)
                .expect("playlist parsed");

        assert_eq!(playlist.aliases[0].tgids[0].value, 0);
    }

    #[test]
    fn empty_playlist_has_no_aliases() {
        let playlist = parse_playlist(b"<playlist/>").expect("playlist parsed");
        assert!(playlist.aliases.is_empty());
    }

    #[test]
    fn non_numeric_integer_attribute_is_rejected() {
        let result = parse_playlist(
            br#"<playlist><alias name="A"><id type="talkgroup" value="abc"/></alias></playlist>"#,
        );
        assert!(matches!(result, Err(ToolError::MalformedInput(_))));
    }

    #[test]
    fn wrong_root_element_is_rejected() {
        let result = parse_playlist(br#"<aliases><alias name="A"/></aliases>"#);
        assert!(matches!(result, Err(ToolError::MalformedInput(message)) if message.contains("<aliases>")));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(parse_playlist(b""), Err(ToolError::MalformedInput(_))));
    }

    #[test]
    fn text_inside_alias_is_ignored() {
        let playlist = parse_playlist_str(
            r#"<playlist><alias name="A">text<id type="talkgroup" value="1"/>more<![CDATA[x]]></alias></playlist>"#,
        )
        .expect("playlist parsed");

        let alias = &playlist.aliases[0];
        assert_eq!(alias.name, "A");
        assert_eq!(alias.tgids.len(), 1);
        assert_eq!(alias.tgids[0].value, 1);
    }

    #[test]
    fn text_between_ids_keeps_their_order() {
        let playlist = parse_playlist_str(
            r#"<playlist>note<alias name="A">first<id type="talkgroup" value="1"/>second<id type="talkgroup" value="2"/></alias>tail</playlist>"#,
        )
        .expect("playlist parsed");

        let values: Vec<i64> = playlist.aliases[0].tgids.iter().map(|t| t.value).collect();
        assert_eq!(values, vec![1, 2]);
    }

    #[test]
    fn attribute_entities_survive_text_stripping() {
        let playlist = parse_playlist_str(
            r#"<playlist><alias name="A &amp; B" group="P&lt;D"/></playlist>"#,
        )
        .expect("playlist parsed");

        assert_eq!(playlist.aliases[0].name, "A & B");
        assert_eq!(playlist.aliases[0].group, "P<D");
    }

    #[test]
    fn broken_markup_is_rejected() {
        let result = parse_playlist(br#"<playlist><alias name="A"></playlist>"#);
        assert!(matches!(result, Err(ToolError::MalformedInput(_))));
    }
}
