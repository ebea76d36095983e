use crate::error::{Result, StoreError};
use lariat_core::record::{MAX_TTL_MINUTES, MIN_TTL_MINUTES};
use lariat_core::{
    ClickContext, ClickEvent, Clock, LinkRecord, LinkStats, LinkSummary, Persistence, SystemClock,
};
use lariat_registry::CodeRegistry;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, trace, warn};
use url::Url;

/// Parameters for creating a short link.
#[derive(Debug, Clone)]
pub struct CreateParams {
    /// The destination URL. Must parse as an absolute URL.
    pub original_url: String,
    /// Optional caller-chosen code. A conflict is a hard failure; the
    /// store never rewrites a custom code into something free.
    pub custom_code: Option<String>,
    /// Minutes until the link expires, within [1, 10080].
    pub ttl_minutes: i64,
}

/// Outcome of a click-recording attempt.
///
/// `NotFound` and `Expired` are branches for the caller, not failures.
#[derive(Debug, Clone)]
pub enum ClickOutcome {
    /// The click was recorded against an active link.
    Recorded {
        record: LinkRecord,
        event: ClickEvent,
    },
    NotFound,
    /// The link exists but its TTL has elapsed; nothing was recorded.
    Expired,
}

/// The record set plus its policy: uniqueness, TTL, click analytics.
///
/// Every mutating operation runs a read-modify-persist cycle under the
/// write half of a single lock, held across the persist call, so the
/// uniqueness check and the click append can never interleave with
/// another writer. Read operations share the read half and observe a
/// consistent snapshot. Expired records are not swept; expiry is a
/// read-time predicate and the records stay visible for statistics until
/// deleted explicitly.
pub struct LinkStore<P, C = SystemClock> {
    records: RwLock<Vec<LinkRecord>>,
    persistence: Arc<P>,
    registry: CodeRegistry,
    clock: Arc<C>,
}

impl<P: Persistence> LinkStore<P, SystemClock> {
    /// Opens a store against the system clock.
    pub async fn open(persistence: P, registry: CodeRegistry) -> Self {
        Self::open_with_clock(persistence, registry, SystemClock).await
    }
}

impl<P: Persistence, C: Clock> LinkStore<P, C> {
    /// Opens a store, loading the record set from the collaborator.
    ///
    /// A failed load is downgraded to an empty set: availability wins
    /// over refusing to start, and the condition is logged.
    pub async fn open_with_clock(persistence: P, registry: CodeRegistry, clock: C) -> Self {
        let records = match persistence.load_all().await {
            Ok(records) => {
                debug!(count = records.len(), "loaded link records");
                records
            }
            Err(e) => {
                warn!(error = %e, "failed to load link records, starting with an empty set");
                Vec::new()
            }
        };

        Self {
            records: RwLock::new(records),
            persistence: Arc::new(persistence),
            registry,
            clock: Arc::new(clock),
        }
    }

    /// Creates a new link record and persists the updated set.
    ///
    /// Validation failures leave both the in-memory set and the
    /// collaborator untouched; so does a failed persist.
    pub async fn create(&self, params: CreateParams) -> Result<LinkRecord> {
        validate_url(&params.original_url)?;
        validate_ttl(params.ttl_minutes)?;

        let mut records = self.records.write().await;

        // Uniqueness is judged against every known code, expired records
        // included: a code is never recycled while its record exists.
        let short_code = {
            let existing: HashSet<&str> =
                records.iter().map(|r| r.short_code.as_str()).collect();
            match &params.custom_code {
                Some(raw) => {
                    let code = self.registry.validate(raw)?;
                    if !self.registry.is_unique(&code, &existing) {
                        return Err(StoreError::CodeConflict(code.as_str().to_owned()));
                    }
                    code
                }
                None => self.registry.generate(&existing)?,
            }
        };

        let record = LinkRecord::new(
            short_code,
            params.original_url,
            params.ttl_minutes,
            self.clock.now(),
        );

        let mut next = records.clone();
        next.push(record.clone());
        self.persistence.save_all(&next).await?;
        *records = next;

        debug!(
            code = %record.short_code,
            url = %record.original_url,
            expires_at = %record.expires_at,
            "created link"
        );
        Ok(record)
    }

    /// Looks up a record by its short code.
    ///
    /// Expired records are still returned; the caller decides what
    /// expiry means for it (see [`LinkRecord::is_expired`]).
    pub async fn resolve(&self, code: &str) -> Option<LinkRecord> {
        let records = self.records.read().await;
        let found = records
            .iter()
            .find(|r| r.short_code.as_str() == code)
            .cloned();

        match &found {
            Some(record) => trace!(code, url = %record.original_url, "resolved short code"),
            None => trace!(code, "short code not found"),
        }
        found
    }

    /// Records a click against an active link.
    ///
    /// Expiry is re-checked under the write lock, so a stale caller-side
    /// check can never append to an expired record.
    pub async fn record_click(&self, code: &str, context: ClickContext) -> Result<ClickOutcome> {
        let now = self.clock.now();
        let mut records = self.records.write().await;

        let Some(position) = records.iter().position(|r| r.short_code.as_str() == code) else {
            trace!(code, "click on unknown code");
            return Ok(ClickOutcome::NotFound);
        };
        if records[position].is_expired(now) {
            debug!(code, expires_at = %records[position].expires_at, "click on expired link");
            return Ok(ClickOutcome::Expired);
        }

        let event = ClickEvent::from_context(context, now);
        let mut next = records.clone();
        next[position].push_click(event.clone());
        self.persistence.save_all(&next).await?;
        *records = next;

        let record = records[position].clone();
        debug!(code, total_clicks = record.total_clicks, "recorded click");
        Ok(ClickOutcome::Recorded { record, event })
    }

    /// Deletes the record for `code` together with its click history.
    ///
    /// Returns `false` when the code is unknown; that is not an error.
    pub async fn delete(&self, code: &str) -> Result<bool> {
        let mut records = self.records.write().await;

        let Some(position) = records.iter().position(|r| r.short_code.as_str() == code) else {
            trace!(code, "delete of unknown code");
            return Ok(false);
        };

        let mut next = records.clone();
        let removed = next.remove(position);
        self.persistence.save_all(&next).await?;
        *records = next;

        debug!(code, url = %removed.original_url, "deleted link");
        Ok(true)
    }

    /// Removes every record, persists the empty set, and returns how
    /// many records were dropped.
    pub async fn clear(&self) -> Result<usize> {
        let mut records = self.records.write().await;

        let count = records.len();
        self.persistence.save_all(&[]).await?;
        records.clear();

        debug!(count, "cleared all links");
        Ok(count)
    }

    /// Every record, annotated with its expiry state at call time.
    pub async fn list_all(&self) -> Vec<LinkSummary> {
        let now = self.clock.now();
        let records = self.records.read().await;

        records
            .iter()
            .map(|r| LinkSummary {
                is_expired: r.is_expired(now),
                record: r.clone(),
            })
            .collect()
    }

    /// The records still within their TTL at call time.
    pub async fn list_active(&self) -> Vec<LinkRecord> {
        let now = self.clock.now();
        let records = self.records.read().await;

        records
            .iter()
            .filter(|r| !r.is_expired(now))
            .cloned()
            .collect()
    }

    /// Aggregate statistics over the whole set, expired records included.
    pub async fn statistics(&self) -> LinkStats {
        let now = self.clock.now();
        let records = self.records.read().await;

        let total_links = records.len();
        let active_links = records.iter().filter(|r| !r.is_expired(now)).count();
        let total_clicks = records.iter().map(|r| r.total_clicks).sum::<usize>();
        let average_clicks_per_link = if total_links > 0 {
            total_clicks as f64 / total_links as f64
        } else {
            0.0
        };

        LinkStats {
            total_links,
            active_links,
            expired_links: total_links - active_links,
            total_clicks,
            average_clicks_per_link,
        }
    }
}

fn validate_url(url: &str) -> Result<()> {
    let url = url.trim();
    if url.is_empty() {
        return Err(StoreError::InvalidUrl("url cannot be empty".to_string()));
    }
    // `Url::parse` only succeeds for absolute URLs.
    Url::parse(url).map_err(|e| StoreError::InvalidUrl(e.to_string()))?;
    Ok(())
}

fn validate_ttl(ttl_minutes: i64) -> Result<()> {
    if !(MIN_TTL_MINUTES..=MAX_TTL_MINUTES).contains(&ttl_minutes) {
        return Err(StoreError::InvalidTtl(ttl_minutes));
    }
    Ok(())
}
