use pretty_assertions::assert_eq;
use tracker_core::{query, ExportReconciliation, MembershipMap, TableQuery};

fn reconciliation(count: usize) -> ExportReconciliation {
    let following: MembershipMap = (1..=count)
        .map(|i| (format!("User{i:02}"), format!("day {i}")))
        .collect();
    ExportReconciliation::new(MembershipMap::new(), following)
}

#[test]
fn filter_is_case_insensitive_substring() {
    let result = reconciliation(12);
    let request = TableQuery {
        filter: "user1".to_string(),
        ..TableQuery::default()
    };

    let page = query(&result.unfollowers, &request);

    let names: Vec<_> = page.rows.iter().map(|r| r.username.as_str()).collect();
    assert_eq!(names, vec!["User10", "User11", "User12"]);
    assert_eq!(page.total_matches, 3);
}

#[test]
fn pages_are_sliced_in_order() {
    let result = reconciliation(12);
    let request = TableQuery {
        page: 3,
        per_page: 5,
        ..TableQuery::default()
    };

    let page = query(&result.unfollowers, &request);

    assert_eq!(page.total_pages, 3);
    assert_eq!(page.first_index, 11);
    let names: Vec<_> = page.rows.iter().map(|r| r.username.as_str()).collect();
    assert_eq!(names, vec!["User11", "User12"]);
}

#[test]
fn page_past_the_end_is_clamped() {
    let result = reconciliation(4);
    let request = TableQuery {
        page: 9,
        per_page: 3,
        ..TableQuery::default()
    };

    let page = query(&result.unfollowers, &request);

    assert_eq!(page.page, 2);
    assert_eq!(page.rows.len(), 1);
}

#[test]
fn page_zero_becomes_first_page() {
    let result = reconciliation(4);
    let request = TableQuery {
        page: 0,
        per_page: 3,
        ..TableQuery::default()
    };

    let page = query(&result.unfollowers, &request);

    assert_eq!(page.page, 1);
    assert_eq!(page.first_index, 1);
}

#[test]
fn filter_without_matches_yields_single_empty_page() {
    let result = reconciliation(4);
    let request = TableQuery {
        filter: "nobody".to_string(),
        ..TableQuery::default()
    };

    let page = query(&result.unfollowers, &request);

    assert!(page.rows.is_empty());
    assert_eq!(page.total_pages, 1);
}
