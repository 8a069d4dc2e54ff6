use crate::record::UnfollowerRecord;

pub const DEFAULT_PER_PAGE: usize = 25;

/// Rows that can be searched by username.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for UnfollowerRecord {
    fn name(&self) -> &str {
        &self.username
    }
}

impl Named for String {
    fn name(&self) -> &str {
        self
    }
}

/// Filter and page cursor for one view of a result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    pub filter: String,
    /// 1-based; clamped into range by [`query`].
    pub page: usize,
    pub per_page: usize,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self {
            filter: String::new(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPage<'a, T> {
    pub rows: Vec<&'a T>,
    /// 1-based position of `rows[0]` among the matches.
    pub first_index: usize,
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

/// Selects the rows whose name contains `filter` (ignoring case) and
/// returns the requested page of them.
pub fn query<'a, T: Named>(rows: &'a [T], request: &TableQuery) -> QueryPage<'a, T> {
    let needle = request.filter.trim().to_lowercase();
    let matches: Vec<&T> = rows
        .iter()
        .filter(|row| needle.is_empty() || row.name().to_lowercase().contains(&needle))
        .collect();

    let per_page = request.per_page.max(1);
    let total_matches = matches.len();
    let total_pages = total_matches.div_ceil(per_page).max(1);
    let page = request.page.clamp(1, total_pages);
    let start = (page - 1) * per_page;

    let rows = matches.into_iter().skip(start).take(per_page).collect();

    QueryPage {
        rows,
        first_index: start + 1,
        page,
        total_pages,
        total_matches,
    }
}
