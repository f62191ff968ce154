use anyhow::Result;
use lab_stats::format_percentage;
use lab_utils::dates::format_timestamp;
use log::info;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::*;

use crate::donut::{donut_slices, ring_points};
use crate::models::{Rgb8, SummaryRow, SummaryTable};
use crate::ReportData;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 20.0;
const MARGIN_TOP: f32 = 280.0;
const MARGIN_BOTTOM: f32 = 20.0;
const LINE_HEIGHT: f32 = 6.0;

const OUTER_RADIUS: f64 = 26.0;
const INNER_RADIUS: f64 = 15.0;
/// Chart centres on the first page, two per row.
const CHART_CENTERS: [(f64, f64); 4] = [(60.0, 215.0), (150.0, 215.0), (60.0, 115.0), (150.0, 115.0)];

const COUNT_COLUMN: f32 = 120.0;
const PERCENT_COLUMN: f32 = 155.0;

const BLACK: Rgb8 = Rgb8(0, 0, 0);
const GREY: Rgb8 = Rgb8(120, 120, 120);

fn color(rgb: Rgb8) -> Color {
    let (r, g, b) = rgb.unit();
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn point(x: f64, y: f64) -> (Point, bool) {
    (Point::new(Mm(x as f32), Mm(y as f32)), false)
}

/// Pen over a growing document: current layer, fonts and vertical cursor.
struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
    pages: usize,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: MARGIN_TOP,
            pages: 1,
        })
    }

    fn new_page(&mut self) {
        self.pages += 1;
        let (page, layer) = self.doc.add_page(
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            format!("Layer {}", self.pages),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = MARGIN_TOP;
    }

    /// Start a new page unless `height` still fits above the bottom margin.
    fn ensure_space(&mut self, height: f32) {
        if self.y - height < MARGIN_BOTTOM {
            self.new_page();
        }
    }

    fn text(&self, text: &str, size: f32, x: f32, y: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(text, size, Mm(x), Mm(y), font);
    }

    fn fill_polygon(&self, points: Vec<(Point, bool)>, fill: Rgb8) {
        self.layer.set_fill_color(color(fill));
        self.layer.add_polygon(Polygon {
            rings: vec![points],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
        self.layer.set_fill_color(color(BLACK));
    }

    fn rule(&self, y: f32) {
        self.layer.set_outline_color(color(GREY));
        self.layer.set_outline_thickness(0.4);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(MARGIN_LEFT), Mm(y)), false),
                (Point::new(Mm(PAGE_WIDTH - MARGIN_LEFT), Mm(y)), false),
            ],
            is_closed: false,
        });
    }

    fn header(&mut self, report: &ReportData) {
        self.text(&report.title, 18.0, MARGIN_LEFT, self.y, true);
        self.y -= 8.0;
        self.text(
            &format!("Generado: {}", format_timestamp(&report.generated_at)),
            10.0,
            MARGIN_LEFT,
            self.y,
            false,
        );
        self.y -= 5.0;
        self.text(
            &format!(
                "Total de muestras: {}    Total de usuarios: {}",
                report.total_samples, report.total_users
            ),
            10.0,
            MARGIN_LEFT,
            self.y,
            false,
        );
        self.y -= 4.0;
        self.rule(self.y);
    }

    fn donut(&self, table: &SummaryTable, center: (f64, f64)) {
        let (cx, cy) = center;
        let title_y = (cy + OUTER_RADIUS + 8.0) as f32;
        let left = (cx - OUTER_RADIUS - 10.0) as f32;
        self.text(&table.title, 11.0, left, title_y, true);

        let slices = donut_slices(table);
        for slice in &slices {
            let outline = ring_points(center, OUTER_RADIUS, INNER_RADIUS, slice);
            if outline.is_empty() {
                continue;
            }
            let points = outline.into_iter().map(|(x, y)| point(x, y)).collect();
            self.fill_polygon(points, slice.color);
        }

        let centre_label = if table.total.count == 0 {
            "Sin datos".to_string()
        } else {
            table.total.count.to_string()
        };
        self.text(&centre_label, 10.0, (cx - 5.0) as f32, (cy - 1.5) as f32, true);

        let mut y = (cy - OUTER_RADIUS - 8.0) as f32;
        for slice in &slices {
            let (x0, y0) = (f64::from(left), f64::from(y));
            self.fill_polygon(
                vec![
                    point(x0, y0),
                    point(x0 + 3.0, y0),
                    point(x0 + 3.0, y0 + 3.0),
                    point(x0, y0 + 3.0),
                ],
                slice.color,
            );
            self.text(
                &format!(
                    "{}: {} ({})",
                    slice.label,
                    slice.count,
                    format_percentage(slice.percentage)
                ),
                8.0,
                left + 5.0,
                y,
                false,
            );
            y -= 4.5;
        }
    }

    fn row(&self, row: &SummaryRow, bold: bool) {
        self.text(&row.label, 10.0, MARGIN_LEFT, self.y, bold);
        self.text(&row.count.to_string(), 10.0, COUNT_COLUMN, self.y, bold);
        self.text(
            &format_percentage(row.percentage),
            10.0,
            PERCENT_COLUMN,
            self.y,
            bold,
        );
    }

    fn table(&mut self, table: &SummaryTable) {
        let height = LINE_HEIGHT * (table.rows.len() as f32 + 4.0);
        self.ensure_space(height);

        self.text(&table.title, 12.0, MARGIN_LEFT, self.y, true);
        self.y -= LINE_HEIGHT + 1.0;
        self.text(&table.category_header, 10.0, MARGIN_LEFT, self.y, true);
        self.text("Cantidad", 10.0, COUNT_COLUMN, self.y, true);
        self.text("Porcentaje", 10.0, PERCENT_COLUMN, self.y, true);
        self.rule(self.y - 2.0);
        self.y -= LINE_HEIGHT + 1.0;

        for row in &table.rows {
            self.row(row, false);
            self.y -= LINE_HEIGHT;
        }
        self.rule(self.y + LINE_HEIGHT - 2.0);
        self.row(&table.total, true);
        self.y -= LINE_HEIGHT * 2.0;
    }

    fn finish(self) -> Result<Vec<u8>> {
        let pages = self.pages;
        let bytes = self.doc.save_to_bytes()?;
        info!("[LAB] report rendered: {} pages, {} bytes", pages, bytes.len());
        Ok(bytes)
    }
}

/// Render the report: header and four donut charts on the first page, the
/// five summary tables after it.
pub fn write_pdf(report: &ReportData) -> Result<Vec<u8>> {
    let mut writer = PageWriter::new(&report.title)?;
    writer.header(report);

    for (table, center) in report.charts().into_iter().zip(CHART_CENTERS) {
        writer.donut(table, center);
    }

    writer.new_page();
    for table in report.tables() {
        writer.table(table);
    }

    writer.finish()
}
