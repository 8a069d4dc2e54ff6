use scraper::{ElementRef, Html, Selector};

const PROFILE_LINK_SELECTOR: &str = "a.d-inline-block";
const PAGINATION_LINK_SELECTOR: &str = "div.pagination a";
const NEXT_LABEL: &str = "Next";

/// Names found on one page of a follower/following listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListingPage {
    pub names: Vec<String>,
    pub has_next: bool,
}

/// Reads display names and the presence of a "Next" control from a
/// profile listing page.
///
/// Each profile anchor renders its name and login on separate lines; the
/// display name is the second-to-last line of the anchor text.
pub fn parse_listing_page(html: &str) -> ListingPage {
    let doc = Html::parse_document(html);
    let (Ok(link_sel), Ok(pagination_sel)) = (
        Selector::parse(PROFILE_LINK_SELECTOR),
        Selector::parse(PAGINATION_LINK_SELECTOR),
    ) else {
        return ListingPage::default();
    };

    let names = doc.select(&link_sel).filter_map(display_name).collect();
    let has_next = doc
        .select(&pagination_sel)
        .any(|link| link.text().collect::<String>().trim() == NEXT_LABEL);

    ListingPage { names, has_next }
}

fn display_name(anchor: ElementRef<'_>) -> Option<String> {
    let text: String = anchor.text().collect();
    if text.trim().is_empty() {
        return None;
    }
    let lines: Vec<&str> = text.split('\n').collect();
    let name = lines.len().checked_sub(2).map(|i| lines[i].trim())?;
    (!name.is_empty()).then(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::parse_listing_page;

    #[test]
    fn takes_second_to_last_line_of_each_anchor() {
        let html = r#"
            <a class="d-inline-block no-underline" href="/octo">
              <span class="f4">The Octocat</span>
              <span class="Link--secondary">octocat</span>
            </a>
            <a class="d-inline-block" href="/x"><img alt=""></a>
        "#;
        let page = parse_listing_page(html);
        assert_eq!(page.names, vec!["octocat".to_string()]);
        assert!(!page.has_next);
    }

    #[test]
    fn single_line_anchor_is_skipped() {
        let page = parse_listing_page(r#"<a class="d-inline-block" href="/a">alone</a>"#);
        assert!(page.names.is_empty());
    }

    #[test]
    fn next_must_sit_in_pagination_block() {
        let outside = parse_listing_page(r#"<a href="?page=2">Next</a>"#);
        assert!(!outside.has_next);

        let inside = parse_listing_page(
            r#"<div class="pagination"><span class="disabled">Previous</span><a href="?page=2">Next</a></div>"#,
        );
        assert!(inside.has_next);

        let disabled = parse_listing_page(
            r#"<div class="pagination"><a href="?page=1">Previous</a><span class="disabled">Next</span></div>"#,
        );
        assert!(!disabled.has_next);
    }
}
