use serde::Deserialize;

/// One page of a paginated collection.
///
/// The backend names the list either `items` or `content`; a missing
/// `totalPages` means the collection fits in a single page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new", alias = "content")]
    pub items: Vec<T>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default, alias = "totalElements")]
    pub total: Option<u64>,
}

impl<T> Page<T> {
    pub fn total_pages_or_one(&self) -> u32 {
        self.total_pages.unwrap_or(1).max(1)
    }
}

/// A plain list endpoint: bare array, or wrapped like a page.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Bare(Vec<T>),
    Paged(Page<T>),
}

impl<T> ListPayload<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListPayload::Bare(v) => v,
            ListPayload::Paged(p) => p.items,
        }
    }
}
