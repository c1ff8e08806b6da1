use serde::{Deserialize, Deserializer};

/// Root of a parsed playlist document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename = "playlist")]
pub struct Playlist {
    /// Aliases in document order.
    #[serde(rename = "alias", default)]
    pub aliases: Vec<Alias>,
}

/// A named grouping of talkgroup ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Alias {
    #[serde(rename = "@group", default)]
    pub group: String,

    #[serde(rename = "@name", default)]
    pub name: String,

    /// Whitelist/blacklist membership label.
    #[serde(rename = "@list", default)]
    pub list: String,

    /// Id entries in document order.
    #[serde(rename = "id", default)]
    pub tgids: Vec<Tgid>,
}

/// One `<id>` entry inside an alias.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Tgid {
    #[serde(rename = "@type", default)]
    pub kind: String,

    /// Priority override; zero means unset.
    #[serde(rename = "@priority", default, deserialize_with = "int_attribute")]
    pub priority: i64,

    /// Carried through from the document but unused by any output.
    #[serde(rename = "@channel", default)]
    pub channel: String,

    #[serde(rename = "@value", default, deserialize_with = "int_attribute")]
    pub value: i64,

    #[serde(rename = "@min", default, deserialize_with = "int_attribute")]
    pub min: i64,

    #[serde(rename = "@max", default, deserialize_with = "int_attribute")]
    pub max: i64,
}

/// Recognised values of the `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TgidKind {
    Talkgroup,
    TalkgroupRange,
    BroadcastChannel,
    Priority,
    /// Any other text, including an absent attribute.
    Unrecognised,
}

impl TgidKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "talkgroup" => TgidKind::Talkgroup,
            "talkgroupRange" => TgidKind::TalkgroupRange,
            "broadcastChannel" => TgidKind::BroadcastChannel,
            "priority" => TgidKind::Priority,
            _ => TgidKind::Unrecognised,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TgidKind::Talkgroup => "talkgroup",
            TgidKind::TalkgroupRange => "talkgroupRange",
            TgidKind::BroadcastChannel => "broadcastChannel",
            TgidKind::Priority => "priority",
            TgidKind::Unrecognised => "unrecognised",
        }
    }
}

impl std::fmt::Display for TgidKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Talkgroup ids an entry resolves to, after validity checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    /// A single talkgroup id.
    Single(i64),
    /// An inclusive range of ids. `min > max` is kept as-is and expands to
    /// nothing.
    Range { min: i64, max: i64 },
    /// Valid entry that produces no rows.
    Nothing,
    /// Entry is missing the fields its kind needs.
    Invalid,
}

impl Tgid {
    pub fn kind(&self) -> TgidKind {
        TgidKind::parse(&self.kind)
    }

    /// Classifies the entry. Zero is treated as "missing", never as id 0.
    pub fn resolve(&self) -> Resolved {
        match self.kind() {
            TgidKind::Talkgroup if self.value != 0 => Resolved::Single(self.value),
            TgidKind::TalkgroupRange if self.min != 0 && self.max != 0 => Resolved::Range {
                min: self.min,
                max: self.max,
            },
            TgidKind::Talkgroup | TgidKind::TalkgroupRange => Resolved::Invalid,
            TgidKind::BroadcastChannel | TgidKind::Priority | TgidKind::Unrecognised => {
                Resolved::Nothing
            }
        }
    }
}

impl Resolved {
    /// Iterates every talkgroup id covered by the entry in ascending order.
    pub fn ids(&self) -> std::ops::RangeInclusive<i64> {
        match *self {
            Resolved::Single(id) => id..=id,
            Resolved::Range { min, max } => min..=max,
            #[allow(clippy::reversed_empty_ranges)]
            Resolved::Nothing | Resolved::Invalid => 1..=0,
        }
    }
}

/// Reads an integer attribute. Surrounding whitespace is ignored and an empty
/// value counts as 0; any other non-integer text is a document error.
fn int_attribute<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse::<i64>().map_err(|error| {
        serde::de::Error::custom(format!("invalid integer attribute '{trimmed}': {error}"))
    })
}
