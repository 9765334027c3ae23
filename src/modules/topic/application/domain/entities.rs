pub const DEFAULT_PAGE_SIZE: u64 = 15;
pub const MAX_PAGE_SIZE: u64 = 50;

/// Listing order by topic id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListDirection {
    Asc,
    #[default]
    Desc,
}

impl ListDirection {
    /// Anything other than `asc` lists newest first.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("asc") => ListDirection::Asc,
            _ => ListDirection::Desc,
        }
    }
}

/// Normalised listing parameters. `cursor` is the id of the last topic the
/// caller has already seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicListFilter {
    search: Option<String>,
    cursor: Option<i64>,
    direction: ListDirection,
    limit: u64,
}

impl TopicListFilter {
    pub fn new(
        search: Option<String>,
        cursor: Option<i64>,
        direction: ListDirection,
        limit: Option<u64>,
    ) -> Self {
        let search = search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self {
            search,
            cursor: cursor.filter(|id| *id > 0),
            direction,
            limit: limit
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn cursor(&self) -> Option<i64> {
        self.cursor
    }

    pub fn direction(&self) -> ListDirection {
        self.direction
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl Default for TopicListFilter {
    fn default() -> Self {
        Self::new(None, None, ListDirection::default(), None)
    }
}
