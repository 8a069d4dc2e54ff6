use tracker_core::MembershipMap;

use crate::decode::DecodeError;
use crate::markup::MarkupExportParser;
use crate::records::{JsonExportParser, TimestampZone};
use crate::{ExportFormat, Side};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("could not decode {side} markup: {source}")]
    Decode { side: Side, source: DecodeError },
    #[error("{side} file is not valid JSON: {source}")]
    Json {
        side: Side,
        source: serde_json::Error,
    },
    #[error("{side} file has an unrecognized layout")]
    UnrecognizedShape { side: Side },
}

/// Turns one export member file into username → follow date.
pub trait ExportParser: Send + Sync {
    fn parse(&self, side: Side, bytes: &[u8]) -> Result<MembershipMap, ParseError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParserOptions {
    pub timestamp_zone: TimestampZone,
}

pub fn parser_for(format: ExportFormat, options: ParserOptions) -> Box<dyn ExportParser> {
    match format {
        ExportFormat::Html => Box::new(MarkupExportParser),
        ExportFormat::Json => Box::new(JsonExportParser::new(options.timestamp_zone)),
    }
}
