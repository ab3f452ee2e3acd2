//! Expiring cache of issuer lookups keyed by normalized CUSIP.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use log::debug;

use super::issuers_model::IssuerCacheSettings;

/// Outcome of a previous lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedIssuer {
    Found(String),
    NotFound,
    LookupFailed,
}

impl CachedIssuer {
    pub fn issuer(&self) -> Option<&str> {
        match self {
            CachedIssuer::Found(issuer) => Some(issuer),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: CachedIssuer,
    expires_at: DateTime<Utc>,
}

/// Concurrent issuer cache. Share it behind an `Arc` between extractors.
#[derive(Debug, Default)]
pub struct IssuerCache {
    entries: DashMap<String, CacheEntry>,
    settings: IssuerCacheSettings,
}

impl IssuerCache {
    pub fn new(settings: IssuerCacheSettings) -> Self {
        Self {
            entries: DashMap::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &IssuerCacheSettings {
        &self.settings
    }

    /// Entry for `cusip` as of `now`. Expired entries are evicted.
    pub fn get_at(&self, cusip: &str, now: DateTime<Utc>) -> Option<CachedIssuer> {
        {
            let entry = self.entries.get(cusip)?;
            if entry.expires_at > now {
                return Some(entry.value.clone());
            }
        }
        self.entries
            .remove_if(cusip, |_, entry| entry.expires_at <= now);
        debug!("Issuer cache entry for {} expired", cusip);
        None
    }

    pub fn get(&self, cusip: &str) -> Option<CachedIssuer> {
        self.get_at(cusip, Utc::now())
    }

    /// Store a lookup outcome with the expiry window for its kind.
    pub fn insert_at(&self, cusip: &str, value: CachedIssuer, now: DateTime<Utc>) {
        let ttl = match value {
            CachedIssuer::Found(_) => self.settings.positive_ttl,
            CachedIssuer::NotFound => self.settings.not_found_ttl,
            CachedIssuer::LookupFailed => self.settings.failure_ttl,
        };
        self.entries.insert(
            cusip.to_string(),
            CacheEntry {
                value,
                expires_at: now + ttl,
            },
        );
    }

    pub fn insert(&self, cusip: &str, value: CachedIssuer) {
        self.insert_at(cusip, value, Utc::now());
    }

    /// Drop every entry expired as of `now`. Returns how many were removed.
    pub fn purge_expired_at(&self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_positive_entry_expires_after_seven_days() {
        let cache = IssuerCache::default();
        cache.insert_at("037833AK6", CachedIssuer::Found("APPLE Inc".to_string()), t0());

        let hit = cache.get_at("037833AK6", t0() + Duration::days(6));
        assert_eq!(hit.as_ref().and_then(|c| c.issuer()), Some("APPLE Inc"));

        assert!(cache.get_at("037833AK6", t0() + Duration::days(7)).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_failure_expires_sooner_than_not_found() {
        let cache = IssuerCache::default();
        cache.insert_at("AAAAAAAA1", CachedIssuer::NotFound, t0());
        cache.insert_at("BBBBBBBB2", CachedIssuer::LookupFailed, t0());

        let later = t0() + Duration::hours(8);
        assert_eq!(cache.get_at("AAAAAAAA1", later), Some(CachedIssuer::NotFound));
        assert_eq!(cache.get_at("BBBBBBBB2", later), None);
    }

    #[test]
    fn test_purge_expired() {
        let cache = IssuerCache::new(IssuerCacheSettings {
            positive_ttl: Duration::minutes(10),
            ..IssuerCacheSettings::default()
        });
        cache.insert_at("AAAAAAAA1", CachedIssuer::Found("X".to_string()), t0());
        cache.insert_at("BBBBBBBB2", CachedIssuer::NotFound, t0());

        assert_eq!(cache.purge_expired_at(t0() + Duration::hours(1)), 1);
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
