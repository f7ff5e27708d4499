use crate::error::FetchError;
use crate::fetch::FundRow;
use crate::records::Snapshot;

/// What the page shows: the full fund table or an error banner, never both.
#[derive(Clone, Debug)]
pub enum PageView {
    Loaded(Snapshot),
    Failed(String),
}

impl PageView {
    pub fn from_result(result: Result<Snapshot, FetchError>) -> Self {
        match result {
            Ok(snapshot) => PageView::Loaded(snapshot),
            Err(err) => PageView::Failed(err.to_string()),
        }
    }

    pub fn rows(&self) -> &[FundRow] {
        match self {
            PageView::Loaded(snapshot) => &snapshot.rows,
            PageView::Failed(_) => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PageView::Loaded(_) => None,
            PageView::Failed(message) => Some(message),
        }
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            PageView::Loaded(snapshot) => Some(snapshot),
            PageView::Failed(_) => None,
        }
    }
}
