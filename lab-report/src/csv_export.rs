use anyhow::Result;
use serde::Serialize;
use std::io::Write;

use crate::ReportData;

#[derive(Serialize)]
struct CsvLine<'a> {
    table: &'a str,
    category: &'a str,
    count: usize,
    percentage: String,
}

/// One CSV row per table line, total rows included.
pub fn write_csv<W: Write>(report: &ReportData, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for table in report.tables() {
        for row in table.lines() {
            writer.serialize(CsvLine {
                table: &table.title,
                category: &row.label,
                count: row.count,
                percentage: format!("{:.1}", row.percentage),
            })?;
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::sample_report;

    #[test]
    fn writes_every_table_line() {
        let mut out = Vec::new();
        write_csv(&sample_report(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "table,category,count,percentage");
        assert_eq!(lines[1], "Muestras por estado,Recibida,2,66.7");
        assert!(lines.contains(&"Muestras por estado,TOTAL,3,100.0"));
        // 5 + 2 + 4 + 3 + 4 category rows, one total each, one header.
        assert_eq!(lines.len(), 1 + 18 + 5);
    }
}
