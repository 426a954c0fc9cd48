//! Cache operations for get, set-if-absent and revalidation replacement

use std::sync::Arc;
use std::time::Instant;

use dashmap::mapref::entry::Entry;

use super::super::{cache_entry::CacheEntry, cache_key::CacheKey};
use super::core::ResponseCache;

impl ResponseCache {
    /// Live entry for `key`.
    ///
    /// Expired entries are removed and reported absent. Revalidate-flagged
    /// entries never expire and are returned for a conditional re-fetch.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<CacheEntry>> {
        let now = Instant::now();
        let found = self.entries.get(key).map(|e| Arc::clone(e.value()));

        match found {
            Some(entry) if !entry.is_expired_at(now) => {
                if !entry.revalidate {
                    self.stats.record_hit();
                }
                Some(entry)
            }
            Some(_) => {
                if self.entries.remove_if(key, |_, e| e.is_expired_at(now)).is_some() {
                    self.release_slot();
                }
                self.stats.record_miss();
                tracing::debug!(target: "restful::cache", %key, "expired entry dropped");
                None
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Insert `entry` unless a live entry already exists for `key`.
    ///
    /// Returns whether the entry was stored. An expired entry for `key` is
    /// overwritten in place; otherwise a full store evicts one existing entry
    /// first.
    pub fn set_nx(&self, key: CacheKey, entry: CacheEntry) -> bool {
        let now = Instant::now();
        let entry = match self.refresh_expired(&key, entry, now) {
            Ok(stored) => return stored,
            Err(entry) => entry,
        };

        if !self.reserve_slot() {
            return false;
        }

        match self.entries.entry(key) {
            Entry::Occupied(mut occupied) => {
                if !occupied.get().is_expired_at(now) {
                    drop(occupied);
                    self.release_slot();
                    return false;
                }
                tracing::debug!(target: "restful::cache", key = %occupied.key(), "replacing expired entry");
                occupied.insert(Arc::new(entry));
                drop(occupied);
                self.release_slot();
            }
            Entry::Vacant(vacant) => {
                tracing::debug!(target: "restful::cache", key = %vacant.key(), "stored entry");
                vacant.insert(Arc::new(entry));
            }
        }

        self.stats.record_store();
        true
    }

    /// Settle `set_nx` against an existing entry without touching capacity.
    ///
    /// `Ok` carries the outcome when `key` is occupied; `Err` hands `entry`
    /// back when it is vacant.
    fn refresh_expired(&self, key: &CacheKey, entry: CacheEntry, now: Instant) -> Result<bool, CacheEntry> {
        let Some(mut slot) = self.entries.get_mut(key) else {
            return Err(entry);
        };

        if !slot.is_expired_at(now) {
            return Ok(false);
        }

        *slot.value_mut() = Arc::new(entry);
        drop(slot);
        self.stats.record_store();
        tracing::debug!(target: "restful::cache", %key, "replacing expired entry");
        Ok(true)
    }

    /// Swap `current` for `entry` if `current` is still the stored entry.
    ///
    /// Hands `entry` back when another writer got there first or the entry is
    /// gone.
    pub fn replace(&self, key: &CacheKey, current: &Arc<CacheEntry>, entry: CacheEntry) -> Result<(), CacheEntry> {
        match self.entries.get_mut(key) {
            Some(mut slot) if Arc::ptr_eq(slot.value(), current) => {
                *slot.value_mut() = Arc::new(entry);
                drop(slot);
                self.stats.record_store();
                tracing::debug!(target: "restful::cache", %key, "revalidated entry replaced");
                Ok(())
            }
            _ => Err(entry),
        }
    }

    /// Remove `current` if it is still the stored entry for `key`.
    pub fn remove_if_current(&self, key: &CacheKey, current: &Arc<CacheEntry>) -> bool {
        if self.entries.remove_if(key, |_, e| Arc::ptr_eq(e, current)).is_some() {
            self.release_slot();
            true
        } else {
            false
        }
    }

    /// Remove the entry for `key`, live or not.
    pub fn remove(&self, key: &CacheKey) -> Option<Arc<CacheEntry>> {
        let (_, removed) = self.entries.remove(key)?;
        self.release_slot();
        Some(removed)
    }
}
