//! Expiration derivation.
//!
//! Given an item's per-environment shelf-life table and a reference
//! timestamp, picks the storage environment offering the longest shelf life
//! and computes the resulting absolute expiration date.
//!
//! The selection is a single-pass fold over the table in document order
//! with one special case: an entry that normalizes to zero days is adopted
//! unconditionally and can no longer be displaced by a non-zero entry.
//! Zero-day entries therefore mark an item as never meaningfully expiring,
//! and the derived expiration becomes a far-future sentinel.
//!
//! # Example
//!
//! ```rust,ignore
//! use chrono::Utc;
//! use forage::expiration::derive;
//!
//! let derivation = derive(&item.lifespan, Utc::now())?;
//! println!("store in {} until {}", derivation.store_in, derivation.expires_at);
//! ```

use crate::models::{Item, LifespanTable};
use crate::{Error, Result};
use chrono::{DateTime, Days, NaiveTime, Utc};
use tracing::debug;

/// Sentinel expiration for items that never meaningfully expire.
///
/// The source data models "indefinite" as a zero-day shelf life; the derived
/// expiration is then the maximum representable UTC timestamp so that
/// ascending-by-expiration queries sort such items last and expiry windows
/// never include them.
pub const NEVER_EXPIRES: DateTime<Utc> = DateTime::<Utc>::MAX_UTC;

/// Result of deriving an item's storage environment and expiration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    /// Chosen storage environment.
    ///
    /// Empty only in the degenerate case where every entry normalizes to
    /// exactly one day (see [`derive`]).
    pub store_in: String,
    /// Winning shelf life in days. Zero means "never expires".
    pub days: u32,
    /// Absolute expiration timestamp, or [`NEVER_EXPIRES`].
    pub expires_at: DateTime<Utc>,
}

impl Derivation {
    /// Returns whether this derivation carries the never-expires sentinel.
    #[must_use]
    pub fn never_expires(&self) -> bool {
        self.expires_at == NEVER_EXPIRES
    }
}

/// Derives the storage environment and expiration date for one lifespan
/// table.
///
/// The fold starts from a baseline of `(1 day, no environment)`. Entries
/// are visited in document order; a zero-day entry is adopted
/// unconditionally and ends the reign of any non-zero winner, while a
/// non-zero entry is adopted only if it strictly beats the current best.
///
/// Known quirk, preserved deliberately: an entry normalizing to exactly one
/// day never beats the one-day baseline, so a table containing only such
/// entries yields an empty `store_in` with `days == 1`. Callers that care
/// should treat an empty `store_in` as suspect data.
///
/// The expiration is the reference timestamp's calendar date advanced by
/// the winning day count (time of day discarded, normal month and year
/// rollover). A zero-day winner yields [`NEVER_EXPIRES`].
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the table is empty; every real item
/// must specify at least one storage environment.
pub fn derive(lifespan: &LifespanTable, reference: DateTime<Utc>) -> Result<Derivation> {
    if lifespan.is_empty() {
        return Err(Error::InvalidInput(
            "lifespan table has no storage environments".to_string(),
        ));
    }

    // Baseline sentinel, not a real candidate.
    let mut best_days: u32 = 1;
    let mut best_environment = "";

    for (environment, shelf_life) in lifespan.iter() {
        let days = shelf_life.in_days();

        if days == 0 {
            // Never actually spoils in this environment; wins outright.
            best_days = 0;
            best_environment = environment;
        } else if best_days >= 1 && best_days < days {
            best_days = days;
            best_environment = environment;
        }
    }

    let expires_at = if best_days == 0 {
        NEVER_EXPIRES
    } else {
        advance_calendar(reference, best_days)
    };

    debug!(
        environment = best_environment,
        days = best_days,
        "derived expiration"
    );

    Ok(Derivation {
        store_in: best_environment.to_string(),
        days: best_days,
        expires_at,
    })
}

/// Enriches a batch of items in place.
///
/// Stamps every item with the shared reference timestamp (items are seeded
/// in one shot, so `updated` doubles as the creation time) and attaches the
/// derived `store_in` and `expiration_date` fields. Items are independent;
/// only the per-item table scan is order-sensitive.
///
/// # Errors
///
/// Returns an error naming the offending item if any lifespan table is
/// empty. No item is modified after the first failure.
pub fn enrich(items: &mut [Item], reference: DateTime<Utc>) -> Result<()> {
    for item in items.iter_mut() {
        let derivation = derive(&item.lifespan, reference).map_err(|err| match err {
            Error::InvalidInput(msg) => {
                Error::InvalidInput(format!("item '{}': {msg}", item.name))
            }
            other => other,
        })?;
        item.updated = reference;
        item.store_in = Some(derivation.store_in);
        item.expiration_date = Some(derivation.expires_at);
    }
    Ok(())
}

/// Advances the reference timestamp's calendar date by `days`, discarding
/// the time of day.
fn advance_calendar(reference: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    reference
        .date_naive()
        .checked_add_days(Days::new(u64::from(days)))
        // Only reachable with day counts within a few years of chrono's
        // maximum date; indistinguishable from "never" in practice.
        .map_or(NEVER_EXPIRES, |date| {
            date.and_time(NaiveTime::MIN).and_utc()
        })
}
