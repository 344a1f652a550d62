//! Page geometry contract
//!
//! Every measurement the layout engine makes comes from here. Coordinates
//! are PDF layout units (points), origin bottom-left.

/// Fixed page and table geometry for the report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width: f64,
    pub page_height: f64,
    pub margin: f64,
    /// Vertical space one table row consumes.
    pub row_height: f64,
    /// Gap between the two table columns.
    pub column_gap: f64,
    /// A column whose cursor drops below `margin + overflow_reserve` has no
    /// room for another row; the next row starts a fresh page.
    pub overflow_reserve: f64,
    /// Footer baseline sits this far above the bottom margin.
    pub footer_rise: f64,
}

/// Horizontal offsets of the table fields within one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldOffsets {
    /// Absent in single-building mode.
    pub building: Option<f64>,
    pub flat: f64,
    pub length: f64,
    pub breadth: f64,
}

impl PageGeometry {
    /// A4 portrait, the report's only page size.
    pub fn a4() -> Self {
        Self {
            page_width: 595.0,
            page_height: 842.0,
            margin: 40.0,
            row_height: 16.0,
            column_gap: 15.0,
            overflow_reserve: 60.0,
            footer_rise: 15.0,
        }
    }

    pub fn content_width(&self) -> f64 {
        self.page_width - 2.0 * self.margin
    }

    pub fn column_width(&self) -> f64 {
        (self.content_width() - self.column_gap) / 2.0
    }

    pub fn left_column_x(&self) -> f64 {
        self.margin
    }

    pub fn right_column_x(&self) -> f64 {
        self.margin + self.column_width() + self.column_gap
    }

    /// Cursor floor below which a column cannot take another row.
    pub fn overflow_floor(&self) -> f64 {
        self.margin + self.overflow_reserve
    }

    pub fn footer_y(&self) -> f64 {
        self.margin + self.footer_rise
    }

    /// Field offsets within a column. The building column squeezes the
    /// other fields leftward when shown.
    pub fn field_offsets(&self, show_building: bool) -> FieldOffsets {
        if show_building {
            FieldOffsets {
                building: Some(0.0),
                flat: 50.0,
                length: 115.0,
                breadth: 190.0,
            }
        } else {
            FieldOffsets {
                building: None,
                flat: 0.0,
                length: 135.0,
                breadth: 205.0,
            }
        }
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}
