use tracker_core::{ExportReconciliation, MembershipMap};
use tracker_logging::tracker_info;

use crate::archive::{extract_members, ArchiveError, MemberFile};
use crate::parser::{parser_for, ExportParser, ParseError, ParserOptions};
use crate::{ExportFormat, Side};

/// Failure of the export path. Every variant means the upload does not
/// match the selected format; nothing partial is returned.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),
    #[error("{file}: {source}")]
    Parse { file: String, source: ParseError },
}

/// Unpack an export archive, parse both sides with the parser for `format`
/// and reconcile them.
pub fn reconcile_archive(
    bytes: &[u8],
    format: ExportFormat,
    options: ParserOptions,
) -> Result<ExportReconciliation, ReconcileError> {
    let members = extract_members(bytes, format)?;
    let parser = parser_for(format, options);

    let followers = parse_side(parser.as_ref(), Side::Followers, members.side(Side::Followers))?;
    let following = parse_side(parser.as_ref(), Side::Following, members.side(Side::Following))?;

    let reconciliation = ExportReconciliation::new(followers, following);
    tracker_info!(
        "Reconciled {} export: {} followers, {} following, {} not following back",
        format,
        reconciliation.summary.total_followers,
        reconciliation.summary.total_following,
        reconciliation.summary.unfollowers
    );
    Ok(reconciliation)
}

/// Parts are merged in order; a later part overrides the date of a name
/// seen in an earlier one.
fn parse_side(
    parser: &dyn ExportParser,
    side: Side,
    parts: &[MemberFile],
) -> Result<MembershipMap, ReconcileError> {
    let mut merged = MembershipMap::new();
    for part in parts {
        let members = parser
            .parse(side, &part.bytes)
            .map_err(|source| ReconcileError::Parse {
                file: part.name.clone(),
                source,
            })?;
        merged.extend(members);
    }
    Ok(merged)
}
