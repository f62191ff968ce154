//! Donut chart geometry.
//!
//! Slices start at twelve o'clock and run clockwise. Points returned by
//! [`ring_points`] use a y-up coordinate system, as PDF pages do.

use crate::models::{DonutSlice, Rgb8, SummaryTable};

pub const PALETTE: [Rgb8; 8] = [
    Rgb8(33, 150, 243),
    Rgb8(76, 175, 80),
    Rgb8(255, 152, 0),
    Rgb8(156, 39, 176),
    Rgb8(244, 67, 54),
    Rgb8(0, 188, 212),
    Rgb8(121, 85, 72),
    Rgb8(96, 125, 139),
];

/// Maximum angle covered by one straight segment of an arc.
const ARC_STEP_DEGREES: f64 = 5.0;

/// One slice per category row, sized by its share of the table total.
///
/// Zero-count rows keep their slot (and colour) with a zero sweep so the
/// legend stays stable. An empty table yields slices that all sweep 0.
pub fn donut_slices(table: &SummaryTable) -> Vec<DonutSlice> {
    let total = table.total.count;
    let mut angle = 0.0;
    table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let sweep = if total == 0 {
                0.0
            } else {
                row.count as f64 / total as f64 * 360.0
            };
            let slice = DonutSlice {
                label: row.label.clone(),
                count: row.count,
                percentage: row.percentage,
                start_angle: angle,
                sweep,
                color: PALETTE[i % PALETTE.len()],
            };
            angle += sweep;
            slice
        })
        .collect()
}

fn point_at(center: (f64, f64), radius: f64, degrees: f64) -> (f64, f64) {
    let rad = degrees.to_radians();
    (center.0 + radius * rad.sin(), center.1 + radius * rad.cos())
}

/// Closed outline of a slice: outer arc forward, inner arc back.
///
/// Empty for a zero sweep.
pub fn ring_points(
    center: (f64, f64),
    outer_radius: f64,
    inner_radius: f64,
    slice: &DonutSlice,
) -> Vec<(f64, f64)> {
    if slice.sweep <= 0.0 {
        return Vec::new();
    }
    let steps = (slice.sweep / ARC_STEP_DEGREES).ceil().max(2.0) as usize;
    let angle_at = |i: usize| slice.start_angle + slice.sweep * i as f64 / steps as f64;

    let mut points: Vec<(f64, f64)> = (0..=steps)
        .map(|i| point_at(center, outer_radius, angle_at(i)))
        .collect();
    points.extend(
        (0..=steps)
            .rev()
            .map(|i| point_at(center, inner_radius, angle_at(i))),
    );
    points
}
