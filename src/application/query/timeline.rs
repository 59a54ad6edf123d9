// SPDX-License-Identifier: MPL-2.0
//! Date buckets for the gallery timeline.
//!
//! Items are listed under a heading derived from their creation date:
//! "Today", "Yesterday", or a formatted calendar date. Consecutive items
//! sharing a heading form one [`DisplayGroup`].
//!
//! Buckets compare calendar days in the time zone of the supplied "now",
//! not a rolling 24 hour window, and are recomputed on every call so the
//! headings roll over at midnight without any cache to invalidate.

use crate::domain::gallery::Item;
use crate::i18n::I18n;
use chrono::{DateTime, Locale, NaiveDate, NaiveTime, TimeZone, Utc};

/// Default pattern for dates older than yesterday, e.g. "Fri, 21 Feb 2025".
pub const DEFAULT_DATE_FORMAT: &str = "%a, %-d %b %Y";

/// Calendar bucket of a creation instant relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBucket {
    Today,
    Yesterday,
    Date(NaiveDate),
}

impl DateBucket {
    /// Buckets `created` by calendar day in `now`'s time zone.
    pub fn of<Tz: TimeZone>(created: &DateTime<Utc>, now: &DateTime<Tz>) -> Self {
        let today = now.date_naive();
        let day = created.with_timezone(&now.timezone()).date_naive();
        if day == today {
            DateBucket::Today
        } else if today.pred_opt() == Some(day) {
            DateBucket::Yesterday
        } else {
            DateBucket::Date(day)
        }
    }
}

/// Turns creation instants into timeline headings.
#[derive(Debug, Clone)]
pub struct DateBucketer {
    today: String,
    yesterday: String,
    date_format: String,
    locale: Locale,
}

impl DateBucketer {
    /// Creates a bucketer with explicit labels.
    pub fn new(
        today: impl Into<String>,
        yesterday: impl Into<String>,
        date_format: impl Into<String>,
        locale: Locale,
    ) -> Self {
        Self {
            today: today.into(),
            yesterday: yesterday.into(),
            date_format: date_format.into(),
            locale,
        }
    }

    /// Creates a bucketer with labels and date locale from the current language.
    #[must_use]
    pub fn from_i18n(i18n: &I18n, date_format: &str) -> Self {
        Self::new(
            i18n.tr("timeline-today"),
            i18n.tr("timeline-yesterday"),
            date_format,
            i18n.date_locale(),
        )
    }

    /// Heading for an item created at `created`, as seen at `now`.
    pub fn label<Tz: TimeZone>(&self, created: &DateTime<Utc>, now: &DateTime<Tz>) -> String {
        self.label_for(DateBucket::of(created, now))
    }

    /// Heading for an already computed bucket.
    #[must_use]
    pub fn label_for(&self, bucket: DateBucket) -> String {
        match bucket {
            DateBucket::Today => self.today.clone(),
            DateBucket::Yesterday => self.yesterday.clone(),
            // Only date fields are formatted, the midnight time is never shown.
            DateBucket::Date(day) => day
                .and_time(NaiveTime::MIN)
                .and_utc()
                .format_localized(&self.date_format, self.locale)
                .to_string(),
        }
    }
}

impl Default for DateBucketer {
    fn default() -> Self {
        Self::new("Today", "Yesterday", DEFAULT_DATE_FORMAT, Locale::en_US)
    }
}

/// Consecutive items listed under the same heading.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayGroup<'a> {
    pub label: String,
    /// Index of the group's first item in the list it was cut from.
    pub first_index: usize,
    pub items: &'a [Item],
}

impl DisplayGroup<'_> {
    /// Indices covered by this group in the source list.
    #[must_use]
    pub fn indices(&self) -> std::ops::Range<usize> {
        self.first_index..self.first_index + self.items.len()
    }
}

/// Splits `items` into display groups, keeping their order.
pub fn group_by_date<'a, Tz: TimeZone>(
    items: &'a [Item],
    bucketer: &DateBucketer,
    now: &DateTime<Tz>,
) -> Vec<DisplayGroup<'a>> {
    let mut groups: Vec<DisplayGroup<'a>> = Vec::new();
    let mut start = 0;
    let mut current: Option<String> = None;

    for (index, item) in items.iter().enumerate() {
        let label = bucketer.label(&item.created_at(), now);
        match &current {
            Some(open) if *open == label => {}
            _ => {
                if let Some(open) = current.take() {
                    groups.push(DisplayGroup {
                        label: open,
                        first_index: start,
                        items: &items[start..index],
                    });
                }
                start = index;
                current = Some(label);
            }
        }
    }

    if let Some(open) = current {
        groups.push(DisplayGroup {
            label: open,
            first_index: start,
            items: &items[start..],
        });
    }

    groups
}
