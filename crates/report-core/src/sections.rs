//! Grouping & sorting stage
//!
//! Partitions a report request's records into the three fixed category
//! sections and orders each section for display. Records whose stored tag
//! does not resolve to a category are dropped silently; that is documented
//! behavior, not an error.

use std::cmp::Ordering;

use measure_types::{DoorCategory, ReportRequest};
use tracing::debug;

use crate::normalize::{nominal_inches, BREADTH_OFFSET, LENGTH_OFFSET};

/// One display-ready row. Values are already normalized when the request
/// asked for accurate mode; the layout engine never applies corrections.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionEntry {
    /// Populated only in multi-building mode.
    pub building: Option<String>,
    pub flat_no: String,
    pub length_inches: f64,
    pub breadth_inches: f64,
}

/// One report section: a category plus its ordered entries.
#[derive(Debug, Clone)]
pub struct Section {
    pub category: DoorCategory,
    pub entries: Vec<SectionEntry>,
}

/// Partition, normalize, and sort a request's records into the three
/// sections, in fixed report order.
pub fn build_sections(request: &ReportRequest) -> Vec<Section> {
    let multi = request.multi_building();
    let mut buckets: [Vec<SectionEntry>; 3] = [Vec::new(), Vec::new(), Vec::new()];

    for record in &request.records {
        let Some(category) = DoorCategory::from_tag(&record.door_type) else {
            debug!(
                flat = %record.flat_no,
                tag = %record.door_type,
                "Dropping record with unrecognized door type"
            );
            continue;
        };

        let (length, breadth) = if request.accurate {
            (
                nominal_inches(record.length_inches, LENGTH_OFFSET),
                nominal_inches(record.breadth_inches, BREADTH_OFFSET),
            )
        } else {
            (record.length_inches, record.breadth_inches)
        };

        buckets[category as usize].push(SectionEntry {
            building: if multi {
                record.building_name.clone()
            } else {
                None
            },
            flat_no: record.flat_no.clone(),
            length_inches: length,
            breadth_inches: breadth,
        });
    }

    DoorCategory::ORDERED
        .into_iter()
        .zip(buckets)
        .map(|(category, mut entries)| {
            entries.sort_by(|a, b| display_order(a, b, multi));
            Section { category, entries }
        })
        .collect()
}

fn display_order(a: &SectionEntry, b: &SectionEntry, multi: bool) -> Ordering {
    let by_building = if multi {
        display_cmp(
            a.building.as_deref().unwrap_or(""),
            b.building.as_deref().unwrap_or(""),
        )
    } else {
        Ordering::Equal
    };
    by_building.then_with(|| display_cmp(&a.flat_no, &b.flat_no))
}

/// Case-insensitive label ordering, raw order as tiebreaker.
fn display_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
