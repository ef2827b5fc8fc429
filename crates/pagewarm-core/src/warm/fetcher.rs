//! Warm-up fetch backends.
//!
//! A warm fetch exists only to pull a resource into cache ahead of need; the
//! body is discarded and failures are logged, never surfaced. Transfers run
//! off the caller's thread and are not cancellable once issued; `drain`
//! waits for the in-flight ones, which a short-lived process must do before
//! exiting or the transfers die with it.

use std::sync::Mutex;
use std::thread::JoinHandle;
use std::time::Duration;

use anyhow::{Context, Result};

/// Issues a warm-up fetch for a resource. Implementations must not block the
/// caller on the transfer; `drain` is the one blocking point.
pub trait Fetcher {
    fn fetch(&self, url: &str);

    /// Block until every issued transfer has finished.
    fn drain(&self) {}
}

/// No-network fetcher for trace replay and tests; the preloader's issued
/// list is the observable outcome.
#[derive(Debug, Default)]
pub struct NullFetcher;

impl Fetcher for NullFetcher {
    fn fetch(&self, url: &str) {
        tracing::trace!("warm fetch skipped (null fetcher): {url}");
    }
}

/// Real warm-up fetcher: a GET via libcurl on a thread per transfer,
/// response body discarded.
#[derive(Debug, Default)]
pub struct HttpFetcher {
    transfers: Mutex<Vec<JoinHandle<()>>>,
}

impl HttpFetcher {
    fn perform(url: &str) -> Result<()> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url).context("invalid URL")?;
        easy.follow_location(true)?;
        easy.connect_timeout(Duration::from_secs(15))?;
        easy.timeout(Duration::from_secs(60))?;

        {
            let mut transfer = easy.transfer();
            // Drain the body; warming the cache is the whole point.
            transfer.write_function(|data| Ok(data.len()))?;
            transfer.perform().context("warm GET failed")?;
        }

        let code = easy.response_code().context("no response code")?;
        if code < 200 || code >= 300 {
            anyhow::bail!("warm GET {} returned HTTP {}", url, code);
        }
        Ok(())
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) {
        let url = url.to_string();
        let handle = std::thread::spawn(move || match Self::perform(&url) {
            Ok(()) => tracing::debug!("warmed {url}"),
            // A failed warm-up is a missed optimization, not an error.
            Err(e) => tracing::warn!("warm fetch {url} failed: {e:#}"),
        });
        if let Ok(mut transfers) = self.transfers.lock() {
            transfers.push(handle);
        }
    }

    fn drain(&self) {
        let handles = match self.transfers.lock() {
            Ok(mut transfers) => std::mem::take(&mut *transfers),
            Err(_) => return,
        };
        for handle in handles {
            let _ = handle.join();
        }
    }
}
