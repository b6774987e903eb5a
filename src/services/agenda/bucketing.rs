//! Date bucketing: groups events by their calendar date.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::event::Event;

/// Events per date, each bucket in source order. Dates iterate ascending.
pub type DateBuckets<'a> = BTreeMap<NaiveDate, Vec<&'a Event>>;

/// Partition `events` by `date`. Every event lands in exactly one bucket.
pub fn bucket_by_date<'a, I>(events: I) -> DateBuckets<'a>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut buckets: DateBuckets<'a> = BTreeMap::new();
    for event in events {
        buckets.entry(event.date).or_default().push(event);
    }
    buckets
}

/// Events stored for `date`, or an empty slice.
pub fn bucket_for<'b, 'a>(buckets: &'b DateBuckets<'a>, date: NaiveDate) -> &'b [&'a Event] {
    buckets.get(&date).map(Vec::as_slice).unwrap_or(&[])
}
