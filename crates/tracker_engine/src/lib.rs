//! Tracker engine: export parsing and remote listing retrieval.
mod archive;
mod decode;
mod fetch;
mod listing;
mod markup;
mod parser;
mod pipeline;
mod records;
mod remote;
mod types;

pub use archive::{extract_members, ArchiveError, ExportMembers, MemberFile};
pub use decode::{decode_html, DecodeError, DecodedHtml};
pub use fetch::{FetchSettings, Fetcher, LogProgressSink, ProgressSink, ReqwestFetcher};
pub use listing::{parse_listing_page, ListingPage};
pub use markup::{parse_markup, MarkupExportParser};
pub use parser::{parser_for, ExportParser, ParseError, ParserOptions};
pub use pipeline::{reconcile_archive, ReconcileError};
pub use records::{format_timestamp, JsonExportParser, TimestampZone, TIMESTAMP_PATTERN};
pub use remote::{
    RemoteOutcome, RemoteReconciler, RemoteSettings, DEFAULT_API_BASE, DEFAULT_MAX_PAGES,
    DEFAULT_WEB_BASE,
};
pub use types::{
    ExportFormat, FailureKind, FetchError, FetchEvent, FetchMetadata, FetchOutput, Side,
};
