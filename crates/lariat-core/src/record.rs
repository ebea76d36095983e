use crate::shortcode::ShortCode;
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use uuid::Uuid;

/// Lower bound for a record's time-to-live, in minutes.
pub const MIN_TTL_MINUTES: i64 = 1;
/// Upper bound for a record's time-to-live: one week.
pub const MAX_TTL_MINUTES: i64 = 10_080;

/// Referrer recorded when the caller supplies no context.
pub const DIRECT_REFERRER: &str = "Direct";

/// One short-link mapping together with its accumulated click history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Unique identifier, assigned at creation.
    pub id: Uuid,
    /// The code this record is reachable under. Unique across the whole
    /// record set, expired records included.
    pub short_code: ShortCode,
    /// The destination URL.
    pub original_url: String,
    pub created_at: Timestamp,
    pub ttl_minutes: i64,
    /// Fixed at creation: `created_at + ttl_minutes`. Never recomputed.
    pub expires_at: Timestamp,
    /// Append-only, in insertion order.
    pub clicks: Vec<ClickEvent>,
    /// Always `clicks.len()`; kept denormalized for O(1) reads.
    pub total_clicks: usize,
}

impl LinkRecord {
    /// Builds a fresh record with an empty click history.
    ///
    /// The caller is responsible for having validated the URL and the
    /// TTL range beforehand.
    pub fn new(
        short_code: ShortCode,
        original_url: impl Into<String>,
        ttl_minutes: i64,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            short_code,
            original_url: original_url.into(),
            created_at,
            ttl_minutes,
            expires_at: created_at + SignedDuration::from_mins(ttl_minutes),
            clicks: Vec::new(),
            total_clicks: 0,
        }
    }

    /// Whether the record has expired at `now`.
    ///
    /// Strict comparison: at the instant of `expires_at` itself the
    /// record is still valid.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now > self.expires_at
    }

    /// Appends a click and recomputes the denormalized counter.
    pub fn push_click(&mut self, event: ClickEvent) {
        self.clicks.push(event);
        self.total_clicks = self.clicks.len();
    }
}

/// One recorded access of an active link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub id: Uuid,
    /// When the click was recorded.
    pub timestamp: Timestamp,
    /// Referrer context supplied by the caller, or [`DIRECT_REFERRER`].
    pub referrer: String,
    /// Opaque location context supplied by the caller. The engine never
    /// fabricates a value here.
    pub location: Option<String>,
}

impl ClickEvent {
    /// Builds an event from caller-supplied context at `timestamp`.
    pub fn from_context(context: ClickContext, timestamp: Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            referrer: context
                .referrer
                .unwrap_or_else(|| DIRECT_REFERRER.to_string()),
            location: context.location,
        }
    }
}

/// Caller-supplied context for a click.
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct ClickContext {
    #[builder(default, setter(strip_option, into))]
    pub referrer: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub location: Option<String>,
}

/// A record annotated with its expiry state at listing time.
///
/// The flag is derived from the clock when the listing is taken and is
/// never stored.
#[derive(Debug, Clone, Serialize)]
pub struct LinkSummary {
    #[serde(flatten)]
    pub record: LinkRecord,
    pub is_expired: bool,
}

/// Aggregate statistics over the whole record set, expired included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkStats {
    pub total_links: usize,
    pub active_links: usize,
    pub expired_links: usize,
    pub total_clicks: usize,
    pub average_clicks_per_link: f64,
}
