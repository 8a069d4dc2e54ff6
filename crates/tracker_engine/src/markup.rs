use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use tracker_core::{MembershipMap, MembershipRecord};
use tracker_logging::{tracker_debug, tracker_trace};

use crate::decode::decode_html;
use crate::parser::{ExportParser, ParseError};
use crate::Side;

/// Block wrapping one account in the markup export.
const ENTRY_SELECTOR: &str = "div.pam._3-95._2ph-._a6-g.uiBoxWhite.noborder";
const FOLLOWER_NAME_SELECTOR: &str = r#"a[target="_blank"]"#;
const FOLLOWING_NAME_SELECTOR: &str = "h2._3-95._2pim._a6-h._a6-i";
/// The follow date lives in the fourth nested `div`.
const DATE_BLOCK_INDEX: usize = 3;

/// Parser for the HTML flavour of the export.
///
/// Entries without a name element, or with fewer than four nested blocks,
/// are skipped. A document without any entry yields an empty map.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkupExportParser;

impl ExportParser for MarkupExportParser {
    fn parse(&self, side: Side, bytes: &[u8]) -> Result<MembershipMap, ParseError> {
        let decoded = decode_html(bytes, None).map_err(|source| ParseError::Decode { side, source })?;
        tracker_trace!("Decoded {} markup as {}", side, decoded.encoding_label);
        Ok(parse_markup(side, &decoded.html))
    }
}

pub fn parse_markup(side: Side, html: &str) -> MembershipMap {
    let doc = Html::parse_document(html);
    let mut members = MembershipMap::new();

    let name_css = match side {
        Side::Followers => FOLLOWER_NAME_SELECTOR,
        Side::Following => FOLLOWING_NAME_SELECTOR,
    };
    let (Ok(entry_sel), Ok(name_sel)) = (Selector::parse(ENTRY_SELECTOR), Selector::parse(name_css))
    else {
        return members;
    };

    let mut skipped = 0usize;
    for entry in doc.select(&entry_sel) {
        match parse_entry(entry, &name_sel) {
            Some(record) => record.insert_into(&mut members),
            None => skipped += 1,
        }
    }

    tracker_debug!(
        "Parsed {} {} from markup ({} entries skipped)",
        members.len(),
        side,
        skipped
    );
    members
}

fn parse_entry(entry: ElementRef<'_>, name_sel: &Selector) -> Option<MembershipRecord> {
    let name = entry.select(name_sel).next()?;
    let blocks = nested_blocks(entry);
    let date_block = blocks.get(DATE_BLOCK_INDEX)?;

    let username = text_of(name);
    if username.is_empty() {
        return None;
    }
    let date = Some(text_of(*date_block)).filter(|d| !d.is_empty());
    Some(MembershipRecord::new(username, date))
}

/// Every `div` below `entry` in document order, excluding `entry` itself.
fn nested_blocks(entry: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let root: NodeRef<'_, Node> = *entry;
    root.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "div")
        .collect()
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
