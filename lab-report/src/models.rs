//! Report model structs.
//!
//! All structs derive `Serialize` so a report can also be handed out as JSON.

use serde::Serialize;

/// One category line of a summary table.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SummaryRow {
    pub label: String,
    pub count: usize,
    /// Share of the table total, 0-100 with one decimal.
    pub percentage: f64,
}

/// Category / count / percentage table with a closing total row.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SummaryTable {
    pub title: String,
    /// Header of the category column, e.g. "Estado".
    pub category_header: String,
    pub rows: Vec<SummaryRow>,
    /// `TOTAL` row: sum of all counts at 100%, or 0% for an empty group.
    pub total: SummaryRow,
}

/// An RGB colour with 8-bit channels.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Rgb8(pub u8, pub u8, pub u8);

impl Rgb8 {
    /// Channels scaled to 0.0-1.0.
    pub fn unit(self) -> (f32, f32, f32) {
        (
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
        )
    }
}

/// One arc of a donut chart.
///
/// Angles are in degrees, measured clockwise from twelve o'clock.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DonutSlice {
    pub label: String,
    pub count: usize,
    pub percentage: f64,
    pub start_angle: f64,
    pub sweep: f64,
    pub color: Rgb8,
}
