//! Door measurement report engine
//!
//! Takes a validated [`ReportRequest`] and produces a printable PDF report:
//! records are optionally corrected to nominal sizes, partitioned into the
//! three door categories, sorted for display, laid out across paginated
//! two-column tables, and rendered with lopdf.
//!
//! The pipeline is one-way and stateless: every call materializes its own
//! document and returns it as a [`ReportArtifact`]; nothing is cached or
//! shared between requests.

pub mod error;
pub mod geometry;
pub mod layout;
pub mod normalize;
pub mod pdf;
pub mod sections;

pub use error::ReportError;
pub use geometry::{FieldOffsets, PageGeometry};
pub use layout::{layout_report, DrawOp, FontFace, Page, ReportDocument};
pub use normalize::{nominal_inches, BREADTH_OFFSET, LENGTH_OFFSET};
pub use sections::{build_sections, Section, SectionEntry};

use chrono::NaiveDate;
use measure_types::ReportRequest;
use serde::Serialize;
use tracing::info;

/// Content type the output consumer should deliver the bytes under.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReportMetrics {
    pub bedroom_count: usize,
    pub bathroom_count: usize,
    pub main_entry_count: usize,
    pub total_doors: usize,
    pub page_count: usize,
    pub output_size_bytes: usize,
}

/// A finished report plus the delivery metadata the consumer needs.
#[derive(Debug, Clone)]
pub struct ReportArtifact {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
    pub metrics: ReportMetrics,
}

/// Generate a report stamped with today's date.
pub fn generate_report(request: &ReportRequest) -> Result<ReportArtifact, ReportError> {
    generate_report_dated(request, chrono::Local::now().date_naive())
}

/// Generate a report with an explicit generation date. Deterministic for a
/// given request and date.
pub fn generate_report_dated(
    request: &ReportRequest,
    generated_on: NaiveDate,
) -> Result<ReportArtifact, ReportError> {
    let sections = build_sections(request);
    let geometry = PageGeometry::a4();
    let document = layout_report(request, &sections, generated_on, &geometry);
    let bytes = pdf::render_pdf(&document)?;

    let metrics = ReportMetrics {
        bedroom_count: sections[0].entries.len(),
        bathroom_count: sections[1].entries.len(),
        main_entry_count: sections[2].entries.len(),
        total_doors: sections.iter().map(|s| s.entries.len()).sum(),
        page_count: document.pages.len(),
        output_size_bytes: bytes.len(),
    };
    info!(
        site = %request.site_name,
        doors = metrics.total_doors,
        pages = metrics.page_count,
        bytes = metrics.output_size_bytes,
        "Report generated"
    );

    Ok(ReportArtifact {
        file_name: suggested_file_name(request),
        content_type: PDF_CONTENT_TYPE,
        bytes,
        metrics,
    })
}

/// Download filename for a report: the building name for a single-building
/// report, `all-buildings` otherwise.
pub fn suggested_file_name(request: &ReportRequest) -> String {
    match request.building_names.as_slice() {
        [single] => format!(
            "door-measurements-{}-{}.pdf",
            request.site_name, single
        ),
        _ => format!("door-measurements-{}-all-buildings.pdf", request.site_name),
    }
}
