use std::io::{Cursor, Read};

use tracker_logging::{tracker_debug, tracker_trace};
use zip::ZipArchive;

use crate::{ExportFormat, Side};

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("malformed archive: {0}")]
    Malformed(#[from] zip::result::ZipError),
    #[error("malformed archive: failed to read entry {name}: {source}")]
    Entry {
        name: String,
        source: std::io::Error,
    },
    #[error("archive has no {side} file in {format} format; check the selected data format")]
    MissingMember { side: Side, format: ExportFormat },
}

/// One archive entry that belongs to a side of the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// The raw member files of an export, each side ordered by entry name.
///
/// Large exports are split over `followers_1.html`, `followers_2.html`,
/// and so on, so each side may hold several parts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportMembers {
    pub followers: Vec<MemberFile>,
    pub following: Vec<MemberFile>,
}

impl ExportMembers {
    pub fn side(&self, side: Side) -> &[MemberFile] {
        match side {
            Side::Followers => &self.followers,
            Side::Following => &self.following,
        }
    }
}

/// Open a zip archive held in memory and pull out the followers and
/// following files for `format`.
pub fn extract_members(bytes: &[u8], format: ExportFormat) -> Result<ExportMembers, ArchiveError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let extension = format.extension();
    let mut members = ExportMembers::default();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();
        let Some(side) = classify(&name, extension) else {
            tracker_trace!("Skipping archive entry {}", name);
            continue;
        };

        let mut content = Vec::with_capacity(capacity_hint(entry.size()));
        entry
            .read_to_end(&mut content)
            .map_err(|source| ArchiveError::Entry {
                name: name.clone(),
                source,
            })?;
        tracker_debug!("Found {} part {} ({} bytes)", side, name, content.len());

        let file = MemberFile {
            name,
            bytes: content,
        };
        match side {
            Side::Followers => members.followers.push(file),
            Side::Following => members.following.push(file),
        }
    }

    for side in [Side::Followers, Side::Following] {
        if members.side(side).is_empty() {
            return Err(ArchiveError::MissingMember { side, format });
        }
    }

    members.followers.sort_by(|a, b| a.name.cmp(&b.name));
    members.following.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(members)
}

/// Declared entry sizes come from the archive header and are not trusted
/// beyond this many bytes up front.
const MAX_PREALLOCATION: u64 = 1024 * 1024;

fn capacity_hint(declared_size: u64) -> usize {
    usize::try_from(declared_size.min(MAX_PREALLOCATION)).unwrap_or(0)
}

/// Accepts `followers.html` and numbered parts like `followers_2.html`.
/// Neighbours such as `following_hashtags.json` are not members.
fn classify(entry_name: &str, extension: &str) -> Option<Side> {
    let base = entry_name.rsplit('/').next().unwrap_or(entry_name);
    let stem = base.strip_suffix(extension)?;
    [Side::Followers, Side::Following].into_iter().find(|side| {
        match stem.strip_prefix(side.as_str()) {
            Some("") => true,
            Some(rest) => rest
                .strip_prefix('_')
                .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit())),
            None => false,
        }
    })
}
