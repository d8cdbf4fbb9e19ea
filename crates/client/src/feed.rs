//! Client-side notification feed.
//!
//! The feed is the in-memory ordered list of notifications loaded for the
//! signed-in user. Loads replace the list wholesale; there is no merge with
//! previously loaded pages. Read-state mutations are applied optimistically
//! and reverted through receipts if the server rejects them.

use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use domain::models::{
    Category, Notification, NotificationQuery, NotificationStats, SendNotificationRequest,
    SendTemplateRequest,
};

use crate::api::NotificationApi;
use crate::error::ClientError;
use crate::metrics;

/// Undo token for an optimistic read-flag mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadReceipt {
    id: i64,
    was_read: bool,
}

/// In-memory notification list with derived unread count.
#[derive(Debug, Default)]
pub struct Feed {
    entries: RwLock<Vec<Notification>>,
}

impl Feed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire list with a fresh server response.
    pub fn replace(&self, items: Vec<Notification>) {
        let mut entries = self.entries.write().unwrap();
        *entries = items;
    }

    /// Snapshot of the current entries, in server order.
    pub fn entries(&self) -> Vec<Notification> {
        self.entries.read().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }

    /// Unread count, computed on demand.
    pub fn unread_count(&self) -> usize {
        self.entries
            .read()
            .unwrap()
            .iter()
            .filter(|n| !n.is_read)
            .count()
    }

    pub fn get(&self, id: i64) -> Option<Notification> {
        self.entries
            .read()
            .unwrap()
            .iter()
            .find(|n| n.id == id)
            .cloned()
    }

    /// Optimistically flip the read flag for one record.
    ///
    /// Returns a receipt capturing the previous flag, or `None` when no
    /// record with this id is loaded.
    pub fn mark_read(&self, id: i64) -> Option<ReadReceipt> {
        let mut entries = self.entries.write().unwrap();
        entries.iter_mut().find(|n| n.id == id).map(|n| {
            let receipt = ReadReceipt {
                id,
                was_read: n.is_read,
            };
            n.is_read = true;
            receipt
        })
    }

    /// Optimistically mark every record (optionally restricted to a
    /// category) as read. Receipts are only produced for records that
    /// actually changed.
    pub fn mark_all_read(&self, category: Option<Category>) -> Vec<ReadReceipt> {
        let mut entries = self.entries.write().unwrap();
        let mut receipts = Vec::new();
        for n in entries.iter_mut() {
            let matches = category.map(|c| n.category == c).unwrap_or(true);
            if matches && !n.is_read {
                receipts.push(ReadReceipt {
                    id: n.id,
                    was_read: false,
                });
                n.is_read = true;
            }
        }
        receipts
    }

    /// Replace a single entry with the server-confirmed record.
    pub fn apply(&self, updated: Notification) {
        let mut entries = self.entries.write().unwrap();
        if let Some(slot) = entries.iter_mut().find(|n| n.id == updated.id) {
            *slot = updated;
        }
    }

    /// Compensating action: restore the read flags captured in receipts.
    pub fn revert(&self, receipts: &[ReadReceipt]) {
        let mut entries = self.entries.write().unwrap();
        for receipt in receipts {
            if let Some(n) = entries.iter_mut().find(|n| n.id == receipt.id) {
                n.is_read = receipt.was_read;
            }
        }
    }
}

/// Feed operations backed by the remote API.
pub struct FeedService {
    api: NotificationApi,
    feed: Arc<Feed>,
}

impl FeedService {
    pub fn new(api: NotificationApi, feed: Arc<Feed>) -> Self {
        Self { api, feed }
    }

    pub fn feed(&self) -> &Arc<Feed> {
        &self.feed
    }

    /// Load the feed for a filter, replacing the in-memory list.
    /// Returns the number of records loaded.
    pub async fn refresh(&self, query: &NotificationQuery) -> Result<usize, ClientError> {
        let items = self.api.list(query).await?;
        let count = items.len();
        self.feed.replace(items);
        debug!(loaded = count, unread = self.feed.unread_count(), "Feed replaced");
        Ok(count)
    }

    /// Mark one notification read: optimistic local flip, server call,
    /// revert on failure. On success the server's record replaces the
    /// local entry.
    pub async fn mark_read(&self, id: i64) -> Result<(), ClientError> {
        let receipt = self.feed.mark_read(id);

        match self.api.mark_read(id).await {
            Ok(updated) => {
                self.feed.apply(updated);
                Ok(())
            }
            Err(e) => {
                if let Some(receipt) = receipt {
                    self.feed.revert(&[receipt]);
                }
                warn!(id = id, error = %e, "mark_read rejected; optimistic flag reverted");
                Err(e)
            }
        }
    }

    /// Mark all (or one category's) notifications read, with the same
    /// optimistic-then-revert contract.
    pub async fn mark_all_read(&self, category: Option<Category>) -> Result<(), ClientError> {
        let receipts = self.feed.mark_all_read(category);

        match self.api.mark_all_read(category).await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.feed.revert(&receipts);
                warn!(
                    changed = receipts.len(),
                    error = %e,
                    "mark_all_read rejected; optimistic flags reverted"
                );
                Err(e)
            }
        }
    }

    /// Send a custom notification.
    pub async fn send(
        &self,
        request: &SendNotificationRequest,
    ) -> Result<Notification, ClientError> {
        self.api.send(request).await
    }

    /// Send a templated notification.
    pub async fn send_template(
        &self,
        request: &SendTemplateRequest,
    ) -> Result<Notification, ClientError> {
        self.api.send_template(request).await
    }

    /// Fetch aggregate stats and publish the unread gauge.
    pub async fn stats(&self) -> Result<NotificationStats, ClientError> {
        let stats = self.api.stats().await?;
        metrics::record_unread_count(stats.unread);
        Ok(stats)
    }
}
