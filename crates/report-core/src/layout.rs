//! Paginated report layout engine
//!
//! Walks the three category sections in fixed order and emits a
//! [`ReportDocument`]: pages of positioned draw operations, opaque to
//! everything but the PDF backend. Each section starts a fresh page with the
//! report header; its entries fill two columns in strict left/right
//! alternation by entry index, with per-column lazily drawn table headers
//! and overflow-driven continuation pages.

use chrono::NaiveDate;
use measure_types::ReportRequest;
use serde::{Deserialize, Serialize};

use crate::geometry::{FieldOffsets, PageGeometry};
use crate::sections::{Section, SectionEntry};

const REPORT_TITLE: &str = "Door Measurement Report";
const EMPTY_SECTION_PLACEHOLDER: &str = "No measurements recorded";

const TITLE_SIZE: f64 = 18.0;
const SECTION_TITLE_SIZE: f64 = 14.0;
const META_SIZE: f64 = 9.0;
const TABLE_SIZE: f64 = 8.0;
const FOOTER_SIZE: f64 = 9.0;

const TITLE_GAP: f64 = 25.0;
const META_GAP: f64 = 15.0;
const META_BLOCK_GAP: f64 = 30.0;
const SECTION_TITLE_GAP: f64 = 25.0;
const HEADER_RULE_DROP: f64 = 3.0;
const HEADER_GAP: f64 = 15.0;
const HEADER_RULE_WIDTH: f64 = 0.5;
/// Width reserved for the right-aligned grand total on the footer line.
const TOTAL_LABEL_WIDTH: f64 = 100.0;

const GRAY_TITLE: f32 = 0.1;
const GRAY_META: f32 = 0.3;
const GRAY_SECTION: f32 = 0.15;
const GRAY_BODY: f32 = 0.0;
const GRAY_RULE: f32 = 0.7;
const GRAY_PLACEHOLDER: f32 = 0.5;
const GRAY_FOOTER: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontFace {
    Regular,
    Bold,
}

/// One positioned draw operation. Coordinates are page units, origin
/// bottom-left; `y` is the text baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawOp {
    Text {
        x: f64,
        y: f64,
        size: f64,
        face: FontFace,
        gray: f32,
        text: String,
    },
    Rule {
        x1: f64,
        x2: f64,
        y: f64,
        width: f64,
        gray: f32,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

/// The laid-out report, ready for the render backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDocument {
    pub page_width: f64,
    pub page_height: f64,
    pub pages: Vec<Page>,
}

/// Per-column fill state. Both columns reset together on a page break so
/// the header-redraw logic stays in one place.
#[derive(Debug, Clone, Copy)]
struct ColumnState {
    x: f64,
    cursor: f64,
    header_drawn: bool,
}

impl ColumnState {
    fn new(x: f64, top: f64) -> Self {
        Self {
            x,
            cursor: top,
            header_drawn: false,
        }
    }

    fn reset(&mut self, top: f64) {
        self.cursor = top;
        self.header_drawn = false;
    }
}

/// Lay out the sorted sections into a paginated document.
///
/// `sections` must already be in report order with display-ready values;
/// the engine places entries exactly as given.
pub fn layout_report(
    request: &ReportRequest,
    sections: &[Section],
    generated_on: NaiveDate,
    geometry: &PageGeometry,
) -> ReportDocument {
    let grand_total: usize = sections.iter().map(|s| s.entries.len()).sum();
    let mut builder = LayoutBuilder {
        g: geometry,
        offsets: geometry.field_offsets(request.multi_building()),
        pages: Vec::new(),
        page: Page::default(),
    };

    for (index, section) in sections.iter().enumerate() {
        let last = index + 1 == sections.len();
        builder.section(request, section, generated_on, last, grand_total);
    }

    ReportDocument {
        page_width: geometry.page_width,
        page_height: geometry.page_height,
        pages: builder.pages,
    }
}

struct LayoutBuilder<'a> {
    g: &'a PageGeometry,
    offsets: FieldOffsets,
    pages: Vec<Page>,
    page: Page,
}

impl LayoutBuilder<'_> {
    fn section(
        &mut self,
        request: &ReportRequest,
        section: &Section,
        generated_on: NaiveDate,
        last: bool,
        grand_total: usize,
    ) {
        let title = section.category.section_title();
        let table_top = self.start_section_page(request, generated_on, title);

        let mut left = ColumnState::new(self.g.left_column_x(), table_top);
        let mut right = ColumnState::new(self.g.right_column_x(), table_top);

        if section.entries.is_empty() {
            self.text(
                self.g.margin,
                table_top,
                META_SIZE,
                FontFace::Regular,
                GRAY_PLACEHOLDER,
                EMPTY_SECTION_PLACEHOLDER.to_string(),
            );
        } else {
            for (index, entry) in section.entries.iter().enumerate() {
                // Even entries fill the left column, odd the right, however
                // full either one is. The index keeps counting across pages.
                let use_left = index % 2 == 0;

                {
                    let column = if use_left { &mut left } else { &mut right };
                    if !column.header_drawn {
                        column.cursor = self.column_header(column.x, column.cursor);
                        column.header_drawn = true;
                    }
                }

                let cursor = if use_left { left.cursor } else { right.cursor };
                if cursor < self.g.overflow_floor() {
                    self.flush_page();
                    let top = self.start_continuation_page(title);
                    left.reset(top);
                    right.reset(top);
                    let column = if use_left { &mut left } else { &mut right };
                    column.cursor = self.column_header(column.x, column.cursor);
                    column.header_drawn = true;
                }

                let column = if use_left { &mut left } else { &mut right };
                self.row(column.x, column.cursor, entry);
                column.cursor -= self.g.row_height;
            }
        }

        self.text(
            self.g.margin,
            self.g.footer_y(),
            FOOTER_SIZE,
            FontFace::Bold,
            GRAY_FOOTER,
            format!("{title} Count: {}", section.entries.len()),
        );
        if last {
            self.text(
                self.g.page_width - self.g.margin - TOTAL_LABEL_WIDTH,
                self.g.footer_y(),
                FOOTER_SIZE,
                FontFace::Bold,
                GRAY_FOOTER,
                format!("Total Doors: {grand_total}"),
            );
        }

        self.flush_page();
    }

    /// Fresh page with the full report header. Returns the table top.
    fn start_section_page(
        &mut self,
        request: &ReportRequest,
        generated_on: NaiveDate,
        title: &str,
    ) -> f64 {
        let g = self.g;
        let mut y = g.page_height - g.margin;

        self.text(
            g.margin,
            y,
            TITLE_SIZE,
            FontFace::Bold,
            GRAY_TITLE,
            REPORT_TITLE.to_string(),
        );
        y -= TITLE_GAP;

        let mode = if request.accurate {
            "Mode: Accurate"
        } else {
            "Mode: Standard"
        };
        self.meta_line(y, mode.to_string());
        y -= META_GAP;

        self.meta_line(y, format!("Site: {}", request.site_name));
        y -= META_GAP;

        let scope = match request.building_names.as_slice() {
            [single] => format!("Building: {single}"),
            all => format!("Buildings: All ({})", all.len()),
        };
        self.meta_line(y, scope);
        y -= META_GAP;

        self.meta_line(y, format!("Generated: {}", generated_on.format("%m/%d/%Y")));
        y -= META_BLOCK_GAP;

        self.text(
            g.margin,
            y,
            SECTION_TITLE_SIZE,
            FontFace::Bold,
            GRAY_SECTION,
            title.to_string(),
        );
        y - SECTION_TITLE_GAP
    }

    /// Continuation page after an overflow. Returns the table top.
    fn start_continuation_page(&mut self, title: &str) -> f64 {
        let g = self.g;
        let y = g.page_height - g.margin;
        self.text(
            g.margin,
            y,
            SECTION_TITLE_SIZE,
            FontFace::Bold,
            GRAY_SECTION,
            format!("{title} (continued)"),
        );
        y - SECTION_TITLE_GAP
    }

    /// Field labels plus separator rule for one column. Returns the cursor
    /// for the column's first row.
    fn column_header(&mut self, x: f64, y: f64) -> f64 {
        let o = self.offsets;
        if let Some(building) = o.building {
            self.header_label(x + building, y, "Building");
            self.header_label(x + o.flat, y, "Flat");
        } else {
            self.header_label(x + o.flat, y, "Flat No");
        }
        self.header_label(x + o.length, y, "Length (in)");
        self.header_label(x + o.breadth, y, "Breadth (in)");

        let rule_y = y - HEADER_RULE_DROP;
        self.page.ops.push(DrawOp::Rule {
            x1: x,
            x2: x + self.g.column_width(),
            y: rule_y,
            width: HEADER_RULE_WIDTH,
            gray: GRAY_RULE,
        });
        rule_y - HEADER_GAP
    }

    fn row(&mut self, x: f64, y: f64, entry: &SectionEntry) {
        let o = self.offsets;
        if let Some(building) = o.building {
            self.cell(
                x + building,
                y,
                entry.building.clone().unwrap_or_default(),
            );
        }
        self.cell(x + o.flat, y, entry.flat_no.clone());
        self.cell(x + o.length, y, format!("{:.1}", entry.length_inches));
        self.cell(x + o.breadth, y, format!("{:.1}", entry.breadth_inches));
    }

    fn meta_line(&mut self, y: f64, text: String) {
        self.text(self.g.margin, y, META_SIZE, FontFace::Regular, GRAY_META, text);
    }

    fn header_label(&mut self, x: f64, y: f64, label: &str) {
        self.text(x, y, TABLE_SIZE, FontFace::Bold, GRAY_BODY, label.to_string());
    }

    fn cell(&mut self, x: f64, y: f64, text: String) {
        self.text(x, y, TABLE_SIZE, FontFace::Regular, GRAY_BODY, text);
    }

    fn text(&mut self, x: f64, y: f64, size: f64, face: FontFace, gray: f32, text: String) {
        self.page.ops.push(DrawOp::Text {
            x,
            y,
            size,
            face,
            gray,
            text,
        });
    }

    fn flush_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.page));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use measure_types::DoorCategory;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
    }

    fn entry(flat: &str) -> SectionEntry {
        SectionEntry {
            building: None,
            flat_no: flat.to_string(),
            length_inches: 72.4,
            breadth_inches: 30.2,
        }
    }

    fn sections_with(counts: [usize; 3]) -> Vec<Section> {
        DoorCategory::ORDERED
            .into_iter()
            .zip(counts)
            .map(|(category, count)| Section {
                category,
                entries: (0..count).map(|i| entry(&format!("F{i}"))).collect(),
            })
            .collect()
    }

    fn single_request() -> ReportRequest {
        ReportRequest {
            site_name: "Lakeview".into(),
            building_names: vec!["Tower A".into()],
            accurate: false,
            records: vec![],
        }
    }

    fn layout(counts: [usize; 3]) -> ReportDocument {
        layout_report(
            &single_request(),
            &sections_with(counts),
            test_date(),
            &PageGeometry::a4(),
        )
    }

    /// (page index, x, y) of every text op matching `needle` exactly.
    fn find_text(doc: &ReportDocument, needle: &str) -> Vec<(usize, f64, f64)> {
        let mut found = Vec::new();
        for (index, page) in doc.pages.iter().enumerate() {
            for op in &page.ops {
                if let DrawOp::Text { x, y, text, .. } = op {
                    if text == needle {
                        found.push((index, *x, *y));
                    }
                }
            }
        }
        found
    }

    /// Rows the first page of a section fits per column, derived from the
    /// geometry the same way the engine consumes it.
    fn first_page_rows_per_column(g: &PageGeometry) -> usize {
        let table_top = g.page_height
            - g.margin
            - TITLE_GAP
            - 3.0 * META_GAP
            - META_BLOCK_GAP
            - SECTION_TITLE_GAP;
        let first_row = table_top - HEADER_RULE_DROP - HEADER_GAP;
        ((first_row - g.overflow_floor()) / g.row_height).floor() as usize + 1
    }

    #[test]
    fn each_section_starts_its_own_page() {
        let doc = layout([1, 1, 1]);
        assert_eq!(doc.pages.len(), 3);
        assert_eq!(find_text(&doc, "Door Measurement Report").len(), 3);
        assert_eq!(find_text(&doc, "Bedroom Doors").len(), 1);
        assert_eq!(find_text(&doc, "Bathroom Doors").len(), 1);
        assert_eq!(find_text(&doc, "Main Entry Doors").len(), 1);
    }

    #[test]
    fn page_header_carries_mode_site_scope_and_date() {
        let doc = layout([1, 0, 0]);
        assert!(!find_text(&doc, "Mode: Standard").is_empty());
        assert!(!find_text(&doc, "Site: Lakeview").is_empty());
        assert!(!find_text(&doc, "Building: Tower A").is_empty());
        assert!(!find_text(&doc, "Generated: 08/06/2026").is_empty());
    }

    #[test]
    fn accurate_request_changes_the_mode_label() {
        let mut request = single_request();
        request.accurate = true;
        let doc = layout_report(
            &request,
            &sections_with([1, 0, 0]),
            test_date(),
            &PageGeometry::a4(),
        );
        assert!(!find_text(&doc, "Mode: Accurate").is_empty());
        assert!(find_text(&doc, "Mode: Standard").is_empty());
    }

    #[test]
    fn entries_alternate_left_right_by_index() {
        let g = PageGeometry::a4();
        let doc = layout([7, 0, 0]);
        let offsets = g.field_offsets(false);

        for i in 0..7 {
            let hits = find_text(&doc, &format!("F{i}"));
            assert_eq!(hits.len(), 1, "flat F{i} drawn once");
            let expected_x = if i % 2 == 0 {
                g.left_column_x() + offsets.flat
            } else {
                g.right_column_x() + offsets.flat
            };
            assert_eq!(hits[0].1, expected_x, "flat F{i} column");
        }
    }

    #[test]
    fn rows_share_a_baseline_across_columns() {
        let doc = layout([4, 0, 0]);
        // Entries 0/1 form the first visual row, 2/3 the second.
        let first_left = find_text(&doc, "F0")[0];
        let first_right = find_text(&doc, "F1")[0];
        let second_left = find_text(&doc, "F2")[0];
        assert_eq!(first_left.2, first_right.2);
        assert_eq!(second_left.2, first_left.2 - PageGeometry::a4().row_height);
    }

    #[test]
    fn overflow_starts_a_continuation_page() {
        let g = PageGeometry::a4();
        let per_column = first_page_rows_per_column(&g);
        let entries = 2 * per_column + 1;

        let doc = layout([entries, 0, 0]);
        // Two pages for the bedroom section, one each for the empty ones.
        assert_eq!(doc.pages.len(), 4);
        assert_eq!(find_text(&doc, "Bedroom Doors (continued)"), vec![(
            1,
            g.margin,
            g.page_height - g.margin
        )]);

        // The last entry that fits stays on page 0; the overflowing entry
        // lands on page 1, back in the left column.
        let last_fitting = find_text(&doc, &format!("F{}", entries - 2));
        assert_eq!(last_fitting[0].0, 0);
        let overflowed = find_text(&doc, &format!("F{}", entries - 1));
        let offsets = g.field_offsets(false);
        assert_eq!(overflowed, vec![(1, g.left_column_x() + offsets.flat, {
            let top = g.page_height - g.margin - SECTION_TITLE_GAP;
            top - HEADER_RULE_DROP - HEADER_GAP
        })]);
    }

    #[test]
    fn column_headers_redraw_after_a_page_break() {
        let g = PageGeometry::a4();
        let per_column = first_page_rows_per_column(&g);
        let doc = layout([2 * per_column + 1, 0, 0]);

        let headers = find_text(&doc, "Flat No");
        let on_first: Vec<_> = headers.iter().filter(|h| h.0 == 0).collect();
        let on_second: Vec<_> = headers.iter().filter(|h| h.0 == 1).collect();
        // Both columns fill on page 0; only the left column restarts on
        // page 1 for the single spilled entry.
        assert_eq!(on_first.len(), 2);
        assert_eq!(on_second.len(), 1);
    }

    #[test]
    fn empty_section_draws_placeholder_instead_of_table() {
        let doc = layout([0, 0, 0]);
        assert_eq!(doc.pages.len(), 3);
        assert_eq!(find_text(&doc, "No measurements recorded").len(), 3);
        assert!(find_text(&doc, "Flat No").is_empty());
    }

    #[test]
    fn footers_carry_section_counts() {
        let doc = layout([2, 0, 1]);
        let g = PageGeometry::a4();

        assert_eq!(
            find_text(&doc, "Bedroom Doors Count: 2"),
            vec![(0, g.margin, g.footer_y())]
        );
        assert_eq!(find_text(&doc, "Bathroom Doors Count: 0").len(), 1);
        assert_eq!(find_text(&doc, "Main Entry Doors Count: 1").len(), 1);
    }

    #[test]
    fn grand_total_appears_once_on_the_final_footer() {
        let doc = layout([2, 0, 1]);
        let g = PageGeometry::a4();

        let totals = find_text(&doc, "Total Doors: 3");
        assert_eq!(totals, vec![(
            doc.pages.len() - 1,
            g.page_width - g.margin - TOTAL_LABEL_WIDTH,
            g.footer_y()
        )]);
    }

    #[test]
    fn footer_lands_on_the_sections_last_page() {
        let g = PageGeometry::a4();
        let per_column = first_page_rows_per_column(&g);
        let doc = layout([2 * per_column + 1, 0, 0]);

        // The bedroom footer belongs to the continuation page, not page 0.
        assert_eq!(
            find_text(&doc, &format!("Bedroom Doors Count: {}", 2 * per_column + 1))[0].0,
            1
        );
    }

    #[test]
    fn values_render_with_one_decimal_place() {
        let sections = vec![
            Section {
                category: DoorCategory::Bedroom,
                entries: vec![SectionEntry {
                    building: None,
                    flat_no: "A-1".into(),
                    length_inches: 72.0,
                    breadth_inches: 30.25,
                }],
            },
            Section {
                category: DoorCategory::Bathroom,
                entries: vec![],
            },
            Section {
                category: DoorCategory::MainEntry,
                entries: vec![],
            },
        ];
        let doc = layout_report(
            &single_request(),
            &sections,
            test_date(),
            &PageGeometry::a4(),
        );
        assert_eq!(find_text(&doc, "72.0").len(), 1);
        assert_eq!(find_text(&doc, "30.2").len(), 1);
    }

    #[test]
    fn multi_building_mode_adds_the_building_column() {
        let request = ReportRequest {
            site_name: "Lakeview".into(),
            building_names: vec!["Tower A".into(), "Tower B".into()],
            accurate: false,
            records: vec![],
        };
        let sections = vec![
            Section {
                category: DoorCategory::Bedroom,
                entries: vec![SectionEntry {
                    building: Some("Tower B".into()),
                    flat_no: "B-1".into(),
                    length_inches: 72.4,
                    breadth_inches: 30.2,
                }],
            },
            Section {
                category: DoorCategory::Bathroom,
                entries: vec![],
            },
            Section {
                category: DoorCategory::MainEntry,
                entries: vec![],
            },
        ];
        let doc = layout_report(&request, &sections, test_date(), &PageGeometry::a4());

        assert!(!find_text(&doc, "Buildings: All (2)").is_empty());
        assert_eq!(find_text(&doc, "Building").len(), 1);
        assert_eq!(find_text(&doc, "Flat").len(), 1);
        assert!(find_text(&doc, "Flat No").is_empty());
        assert_eq!(find_text(&doc, "Tower B").len(), 1);
    }

    proptest! {
        #[test]
        fn alternation_holds_for_any_section_size(count in 1usize..200) {
            let g = PageGeometry::a4();
            let doc = layout([count, 0, 0]);
            let offsets = g.field_offsets(false);

            for i in 0..count {
                let hits = find_text(&doc, &format!("F{i}"));
                prop_assert_eq!(hits.len(), 1);
                let expected_x = if i % 2 == 0 {
                    g.left_column_x() + offsets.flat
                } else {
                    g.right_column_x() + offsets.flat
                };
                prop_assert_eq!(hits[0].1, expected_x);
            }
        }

        #[test]
        fn page_count_matches_the_geometry(count in 1usize..400) {
            let g = PageGeometry::a4();
            let doc = layout([count, 0, 0]);

            let first_capacity = 2 * first_page_rows_per_column(&g);
            let continuation_top = g.page_height - g.margin - SECTION_TITLE_GAP;
            let continuation_first_row = continuation_top - HEADER_RULE_DROP - HEADER_GAP;
            let continuation_capacity = 2 * ((((continuation_first_row - g.overflow_floor())
                / g.row_height)
                .floor() as usize)
                + 1);

            let overflow = count.saturating_sub(first_capacity);
            let expected_section_pages = 1 + overflow.div_ceil(continuation_capacity);

            // Plus one page each for the two empty sections.
            prop_assert_eq!(doc.pages.len(), expected_section_pages + 2);
        }
    }
}
