use serde::{Deserialize, Serialize};

/// The three door classes a report is grouped by, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DoorCategory {
    Bedroom,
    Bathroom,
    MainEntry,
}

impl DoorCategory {
    /// Report section order is fixed: bedroom, bathroom, main entry.
    pub const ORDERED: [DoorCategory; 3] = [
        DoorCategory::Bedroom,
        DoorCategory::Bathroom,
        DoorCategory::MainEntry,
    ];

    /// Resolve a stored category tag. Unknown tags yield `None`; records
    /// carrying them are dropped from reports rather than rejected.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "BEDROOM" => Some(DoorCategory::Bedroom),
            "BATHROOM" => Some(DoorCategory::Bathroom),
            "MAIN_ENTRY" => Some(DoorCategory::MainEntry),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            DoorCategory::Bedroom => "BEDROOM",
            DoorCategory::Bathroom => "BATHROOM",
            DoorCategory::MainEntry => "MAIN_ENTRY",
        }
    }

    /// Heading used for this category's report section.
    pub fn section_title(&self) -> &'static str {
        match self {
            DoorCategory::Bedroom => "Bedroom Doors",
            DoorCategory::Bathroom => "Bathroom Doors",
            DoorCategory::MainEntry => "Main Entry Doors",
        }
    }
}

/// One validated door measurement, scoped and resolved upstream.
///
/// `door_type` is kept as the raw stored tag; resolution happens at
/// grouping time so that unrecognized tags drop silently. Lengths and
/// breadths are guaranteed non-negative by upstream validation, and
/// (flat, category) uniqueness is enforced there as well; the engine
/// re-checks neither.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub flat_no: String,
    /// Owning building's display name; `None` when only one building is in
    /// scope for the report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_name: Option<String>,
    pub length_inches: f64,
    pub breadth_inches: f64,
    pub door_type: String,
}

/// Everything the engine needs to produce one report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    pub site_name: String,
    /// Ordered building scope. One name means single-building mode (no
    /// building column in the report); more than one shows the column and
    /// an "All (N)" scope line.
    pub building_names: Vec<String>,
    /// Apply the nominal-size correction instead of passing raw values
    /// through.
    #[serde(default)]
    pub accurate: bool,
    pub records: Vec<MeasurementRecord>,
}

impl ReportRequest {
    pub fn multi_building(&self) -> bool {
        self.building_names.len() > 1
    }
}
