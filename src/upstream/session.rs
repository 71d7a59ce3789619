//! Per-call HTTP session.
//!
//! Every upstream call owns one freshly built client with idle pooling
//! disabled, so no connection outlives the call. Release is tied to `Drop`
//! and therefore happens exactly once on every exit path.

use reqwest::Client;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const USER_AGENT: &str = concat!("shopify-storefront-mcp/", env!("CARGO_PKG_VERSION"));

/// Counters for opened and released sessions.
#[derive(Debug, Default)]
pub struct SessionStats {
    opened: AtomicUsize,
    released: AtomicUsize,
}

/// Point-in-time copy of [`SessionStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub opened: usize,
    pub released: usize,
}

impl SessionSnapshot {
    /// Sessions opened but not yet released.
    pub fn in_flight(&self) -> usize {
        self.opened.saturating_sub(self.released)
    }
}

impl SessionStats {
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            opened: self.opened.load(Ordering::SeqCst),
            released: self.released.load(Ordering::SeqCst),
        }
    }
}

pub(crate) struct UpstreamSession<'a> {
    http: Client,
    stats: &'a SessionStats,
}

impl<'a> UpstreamSession<'a> {
    pub(crate) fn open(timeout: Duration, stats: &'a SessionStats) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .user_agent(USER_AGENT)
            .build()?;

        stats.opened.fetch_add(1, Ordering::SeqCst);
        tracing::trace!("upstream session opened");
        Ok(Self { http, stats })
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
}

impl Drop for UpstreamSession<'_> {
    fn drop(&mut self) {
        self.stats.released.fetch_add(1, Ordering::SeqCst);
        tracing::trace!("upstream session released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_drop_releases_once() {
        let stats = SessionStats::default();
        {
            let _session = UpstreamSession::open(Duration::from_secs(1), &stats).unwrap();
            assert_eq!(stats.snapshot().in_flight(), 1);
        }
        assert_eq!(
            stats.snapshot(),
            SessionSnapshot {
                opened: 1,
                released: 1
            }
        );
    }
}
