use std::collections::HashSet;

use serde::Serialize;

use crate::record::{MembershipMap, UnfollowerRecord};

/// Counts shown alongside a reconciliation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    pub unfollowers: usize,
    pub total_followers: usize,
    pub total_following: usize,
}

/// Every username in `following` that is absent from `followers`, in the
/// order of `following`, carrying the following-side date.
pub fn find_unfollowers(
    followers: &MembershipMap,
    following: &MembershipMap,
) -> Vec<UnfollowerRecord> {
    following
        .iter()
        .filter(|(username, _)| !followers.contains_key(username.as_str()))
        .map(|(username, since)| UnfollowerRecord::new(username, since))
        .collect()
}

/// List flavour of [`find_unfollowers`] for sources without dates.
///
/// The lists may repeat names; each unfollower is reported once, at its
/// first position in `following`.
pub fn find_remote_unfollowers(followers: &[String], following: &[String]) -> Vec<String> {
    let followers: HashSet<&str> = followers.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();
    following
        .iter()
        .filter(|name| !followers.contains(name.as_str()))
        .filter(|name| seen.insert(name.as_str()))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReconciliation {
    pub followers: MembershipMap,
    pub following: MembershipMap,
    pub unfollowers: Vec<UnfollowerRecord>,
    pub summary: Summary,
}

impl ExportReconciliation {
    pub fn new(followers: MembershipMap, following: MembershipMap) -> Self {
        let unfollowers = find_unfollowers(&followers, &following);
        let summary = Summary {
            unfollowers: unfollowers.len(),
            total_followers: followers.len(),
            total_following: following.len(),
        };
        Self {
            followers,
            following,
            unfollowers,
            summary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteReconciliation {
    pub handle: String,
    pub followers: Vec<String>,
    pub following: Vec<String>,
    pub unfollowers: Vec<String>,
    pub summary: Summary,
}

impl RemoteReconciliation {
    pub fn new(handle: impl Into<String>, followers: Vec<String>, following: Vec<String>) -> Self {
        let unfollowers = find_remote_unfollowers(&followers, &following);
        let summary = Summary {
            unfollowers: unfollowers.len(),
            total_followers: followers.len(),
            total_following: following.len(),
        };
        Self {
            handle: handle.into(),
            followers,
            following,
            unfollowers,
            summary,
        }
    }
}
