mod common;

use common::{follower_block, following_block, html_page, init_logging, zip_of};
use pretty_assertions::assert_eq;
use tracker_core::{Summary, UnfollowerRecord, NEVER};
use tracker_engine::{
    reconcile_archive, ArchiveError, ExportFormat, ParseError, ParserOptions, ReconcileError,
};

#[test]
fn html_export_end_to_end() {
    init_logging();
    let followers = html_page(&[follower_block("a", "Jan 1"), follower_block("b", "Jan 2")]);
    let following = html_page(&[following_block("b", "Jan 2"), following_block("c", "Jan 3")]);
    let bytes = zip_of(&[
        ("connections/followers_and_following/followers_1.html", followers.as_str()),
        ("connections/followers_and_following/following.html", following.as_str()),
    ]);

    let result = reconcile_archive(&bytes, ExportFormat::Html, ParserOptions::default()).unwrap();

    assert_eq!(
        result.unfollowers,
        vec![UnfollowerRecord {
            username: "c".to_string(),
            you_followed: "Jan 3".to_string(),
            they_followed: NEVER,
        }]
    );
    assert_eq!(
        result.summary,
        Summary {
            unfollowers: 1,
            total_followers: 2,
            total_following: 2,
        }
    );
}

#[test]
fn json_export_merges_follower_parts() {
    init_logging();
    let part1 = r#"[{"string_list_data": [{"value": "a", "timestamp": 1704207840}]}]"#;
    let part2 = r#"[{"string_list_data": [{"value": "b"}]}]"#;
    let following = r#"{"relationships_following": [
        {"title": "a", "string_list_data": [{"timestamp": 1704164640}]},
        {"title": "b", "string_list_data": [{"timestamp": 1704164640}]},
        {"title": "c", "string_list_data": [{"timestamp": 1704207840}]}
    ]}"#;
    let bytes = zip_of(&[
        ("followers_2.json", part2),
        ("followers_1.json", part1),
        ("following.json", following),
        ("following_hashtags.json", r#"{"relationships_following_hashtags": []}"#),
    ]);

    let result = reconcile_archive(&bytes, ExportFormat::Json, ParserOptions::default()).unwrap();

    assert_eq!(result.followers.len(), 2);
    assert_eq!(result.unfollowers.len(), 1);
    assert_eq!(result.unfollowers[0].username, "c");
    assert_eq!(result.unfollowers[0].you_followed, "Jan 02, 2024 03:04 PM");
}

#[test]
fn selecting_html_for_json_export_fails() {
    init_logging();
    let bytes = zip_of(&[("followers_1.json", "[]"), ("following.json", "[]")]);

    let err = reconcile_archive(&bytes, ExportFormat::Html, ParserOptions::default()).unwrap_err();

    assert!(matches!(
        err,
        ReconcileError::Archive(ArchiveError::MissingMember { .. })
    ));
}

#[test]
fn unparseable_member_names_the_file() {
    init_logging();
    let bytes = zip_of(&[("followers_1.json", "[]"), ("following.json", "not json")]);

    let err = reconcile_archive(&bytes, ExportFormat::Json, ParserOptions::default()).unwrap_err();

    match &err {
        ReconcileError::Parse { file, source } => {
            assert_eq!(file, "following.json");
            assert!(matches!(source, ParseError::Json { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().starts_with("following.json:"));
}

#[test]
fn empty_exports_reconcile_to_nothing() {
    init_logging();
    let bytes = zip_of(&[
        ("followers_1.html", "<html><body></body></html>"),
        ("following.html", "<html><body></body></html>"),
    ]);

    let result = reconcile_archive(&bytes, ExportFormat::Html, ParserOptions::default()).unwrap();

    assert!(result.unfollowers.is_empty());
    assert_eq!(result.summary, Summary::default());
}
