use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracker_core::{MembershipMap, MembershipRecord};
use tracker_logging::tracker_debug;

use crate::parser::{ExportParser, ParseError};
use crate::Side;

/// Rendering of follow timestamps, e.g. `Jan 02, 2024 03:04 PM`.
pub const TIMESTAMP_PATTERN: &str = "%b %d, %Y %I:%M %p";

/// Clock used to render epoch timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampZone {
    #[default]
    Utc,
    Local,
}

/// Renders epoch seconds with [`TIMESTAMP_PATTERN`]. Zero, missing and
/// out-of-range values have no date.
pub fn format_timestamp(timestamp: Option<i64>, zone: TimestampZone) -> Option<String> {
    let secs = timestamp.filter(|secs| *secs != 0)?;
    let utc = DateTime::from_timestamp(secs, 0)?;
    let rendered = match zone {
        TimestampZone::Utc => utc.format(TIMESTAMP_PATTERN).to_string(),
        TimestampZone::Local => utc
            .with_timezone(&chrono::Local)
            .format(TIMESTAMP_PATTERN)
            .to_string(),
    };
    Some(rendered)
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FollowersDocument {
    List(Vec<Value>),
    Wrapped { relationships_followers: Vec<Value> },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FollowingDocument {
    Wrapped { relationships_following: Vec<Value> },
    List(Vec<Value>),
}

#[derive(Debug, Deserialize)]
struct ExportRecord {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    string_list_data: Vec<StringListEntry>,
}

#[derive(Debug, Deserialize)]
struct StringListEntry {
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    timestamp: Option<i64>,
}

/// Parser for the JSON flavour of the export.
///
/// Followers carry their username in `string_list_data[0].value`; following
/// records carry it in `title`. Records that do not fit are skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonExportParser {
    zone: TimestampZone,
}

impl JsonExportParser {
    pub fn new(zone: TimestampZone) -> Self {
        Self { zone }
    }

    fn member(&self, side: Side, record: ExportRecord) -> Option<MembershipRecord> {
        let first = record.string_list_data.into_iter().next()?;
        let username = match side {
            Side::Followers => first.value,
            Side::Following => record.title,
        }
        .filter(|name| !name.is_empty())?;
        Some(MembershipRecord::new(
            username,
            format_timestamp(first.timestamp, self.zone),
        ))
    }
}

impl ExportParser for JsonExportParser {
    fn parse(&self, side: Side, bytes: &[u8]) -> Result<MembershipMap, ParseError> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|source| ParseError::Json { side, source })?;
        let records = records_for(side, value)?;

        let total = records.len();
        let mut members = MembershipMap::new();
        for raw in records {
            let Ok(record) = serde_json::from_value::<ExportRecord>(raw) else {
                continue;
            };
            if let Some(member) = self.member(side, record) {
                member.insert_into(&mut members);
            }
        }

        tracker_debug!(
            "Parsed {} {} from {} JSON records",
            members.len(),
            side,
            total
        );
        Ok(members)
    }
}

fn records_for(side: Side, value: Value) -> Result<Vec<Value>, ParseError> {
    let records = match side {
        Side::Followers => match serde_json::from_value::<FollowersDocument>(value) {
            Ok(FollowersDocument::List(records)) => records,
            Ok(FollowersDocument::Wrapped {
                relationships_followers,
            }) => relationships_followers,
            Err(_) => return Err(ParseError::UnrecognizedShape { side }),
        },
        Side::Following => match serde_json::from_value::<FollowingDocument>(value) {
            Ok(FollowingDocument::Wrapped {
                relationships_following,
            }) => relationships_following,
            Ok(FollowingDocument::List(records)) => records,
            Err(_) => return Err(ParseError::UnrecognizedShape { side }),
        },
    };
    Ok(records)
}
