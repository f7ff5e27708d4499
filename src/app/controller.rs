use std::time::SystemTime;

use chrono::Local;

use crate::app::PageView;
use crate::fetch::FundFetcher;
use crate::records::{Snapshot, SnapshotSource, SnapshotStore};

/// How a page load treats an existing snapshot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadMode {
    /// Serve the latest snapshot while it is inside the revalidation interval.
    Revalidate,
    /// Always fetch from the network.
    Force,
}

/// Produces page views: serves fresh snapshots, fetches and persists otherwise.
pub struct PageLoader {
    fetcher: FundFetcher,
    store: Option<SnapshotStore>,
}

impl PageLoader {
    pub fn new(fetcher: FundFetcher, store: Option<SnapshotStore>) -> Self {
        Self { fetcher, store }
    }

    pub fn endpoint(&self) -> &str {
        self.fetcher.endpoint()
    }

    pub async fn load(&self, mode: LoadMode) -> PageView {
        if mode == LoadMode::Revalidate {
            if let Some(snapshot) = self.cached_snapshot() {
                return PageView::Loaded(snapshot);
            }
        }

        match self.fetcher.fetch_funds().await {
            Ok(rows) => {
                let fetched_at = Local::now();
                self.persist(&rows, fetched_at);
                PageView::Loaded(Snapshot {
                    rows,
                    fetched_at,
                    source: SnapshotSource::Network,
                })
            }
            Err(err) => {
                log::error!("Fund fetch failed: {}", err.detail());
                PageView::from_result(Err(err))
            }
        }
    }

    fn cached_snapshot(&self) -> Option<Snapshot> {
        let store = self.store.as_ref()?;
        match store.fresh_snapshot(SystemTime::now()) {
            Ok(Some(snapshot)) => {
                log::info!(
                    "Serving {} funds from snapshot {:?}",
                    snapshot.rows.len(),
                    snapshot.source
                );
                Some(snapshot)
            }
            Ok(None) => None,
            Err(err) => {
                log::warn!("Failed to read snapshots: {}", err);
                None
            }
        }
    }

    fn persist(&self, rows: &[crate::fetch::FundRow], fetched_at: chrono::DateTime<Local>) {
        let Some(store) = self.store.as_ref() else {
            return;
        };
        if let Err(err) = store.save(rows, fetched_at) {
            log::warn!("Failed to persist snapshot: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::request::build_headers;
    use crate::fetch::test_support::serve_once;
    use crate::fetch::FundRow;
    use reqwest::Client;
    use std::time::Duration;

    fn loader(endpoint: String, store: Option<SnapshotStore>) -> PageLoader {
        let client = Client::builder().no_proxy().build().unwrap();
        let headers = build_headers(&Default::default()).unwrap();
        PageLoader::new(FundFetcher::with_client(client, endpoint, headers), store)
    }

    #[tokio::test]
    async fn upstream_failure_becomes_error_view() {
        let (endpoint, server) = serve_once("500 Internal Server Error", "").await;
        let view = loader(endpoint, None).load(LoadMode::Force).await;
        server.await.unwrap();

        assert!(view.rows().is_empty());
        let message = view.error().expect("error banner");
        assert!(message.contains("500"), "unexpected message: {message}");
    }

    #[tokio::test]
    async fn empty_list_is_not_an_error() {
        let (endpoint, server) = serve_once("200 OK", r#"{"stocks": []}"#).await;
        let view = loader(endpoint, None).load(LoadMode::Force).await;
        server.await.unwrap();

        assert!(view.error().is_none());
        assert!(view.rows().is_empty());
    }

    #[tokio::test]
    async fn fresh_snapshot_skips_network_and_force_refetches() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path(), Duration::from_secs(300));
        let cached = vec![FundRow {
            stock: "CACHE11".to_string(),
            ..FundRow::default()
        }];
        store.save(&cached, Local::now()).unwrap();

        // Nothing listens here, so a network attempt would fail.
        let unused = loader("http://127.0.0.1:9/".to_string(), Some(SnapshotStore::new(
            dir.path(),
            Duration::from_secs(300),
        )));
        let view = unused.load(LoadMode::Revalidate).await;
        assert_eq!(view.rows(), cached.as_slice());
        assert!(matches!(
            view.snapshot().map(|s| &s.source),
            Some(SnapshotSource::Disk(_))
        ));

        let (endpoint, server) =
            serve_once("200 OK", r#"{"stocks": [{"stock": "LIVE11", "close": 1.5}]}"#).await;
        let view = loader(endpoint, Some(store)).load(LoadMode::Force).await;
        server.await.unwrap();
        assert_eq!(view.rows()[0].stock, "LIVE11");
        assert!(matches!(
            view.snapshot().map(|s| &s.source),
            Some(SnapshotSource::Network)
        ));
    }
}
