//! Shared utility functions for lab crates.

/// Date utility functions
pub mod dates {
    use chrono::{DateTime, NaiveDate, Utc};

    /// Format a timestamp as "YYYY-MM-DD HH:MM UTC"
    pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
        ts.format("%Y-%m-%d %H:%M UTC").to_string()
    }

    /// Like [`format_timestamp`], with "-" for a missing value
    pub fn format_optional(ts: Option<DateTime<Utc>>) -> String {
        ts.as_ref().map_or_else(|| "-".to_string(), format_timestamp)
    }

    /// Compact stamp for file names, e.g. "20240305-1430"
    pub fn file_stamp(ts: &DateTime<Utc>) -> String {
        ts.format("%Y%m%d-%H%M").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?)
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::TimeZone;

        #[test]
        fn test_format_timestamp() {
            let ts = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 9).unwrap();
            assert_eq!(format_timestamp(&ts), "2024-03-05 14:30 UTC");
            assert_eq!(file_stamp(&ts), "20240305-1430");
            assert_eq!(format_optional(None), "-");
        }

        #[test]
        fn test_parse_date() {
            let date = parse_date(" 2023-06-15 ").unwrap();
            assert_eq!(date, NaiveDate::from_ymd_opt(2023, 6, 15).unwrap());
            assert!(parse_date("15/06/2023").is_err());
        }
    }
}

/// Plain-text rendering for terminal output
pub mod text {
    /// Cut `s` to at most `max` characters, marking the cut with "…"
    pub fn truncate(s: &str, max: usize) -> String {
        if s.chars().count() <= max {
            return s.to_string();
        }
        if max == 0 {
            return String::new();
        }
        let mut out: String = s.chars().take(max - 1).collect();
        out.push('…');
        out
    }

    fn pad_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
        cells
            .zip(widths)
            .map(|(cell, w)| {
                let pad = w.saturating_sub(cell.chars().count());
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    }

    /// Left-aligned columns separated by two spaces, with a rule under the header.
    ///
    /// Widths are measured in characters so accented labels line up.
    pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }

        let mut out = pad_row(headers.iter().copied(), &widths);
        out.push('\n');
        out.push_str(
            &widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("  "),
        );
        for row in rows {
            out.push('\n');
            out.push_str(&pad_row(row.iter().map(String::as_str), &widths));
        }
        out
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_truncate() {
            assert_eq!(truncate("Fisicoquímico", 20), "Fisicoquímico");
            assert_eq!(truncate("Fisicoquímico", 5), "Fisi…");
            assert_eq!(truncate("abc", 0), "");
        }

        #[test]
        fn test_render_table() {
            let table = render_table(
                &["Estado", "Count"],
                &[
                    vec!["En análisis".to_string(), "3".to_string()],
                    vec!["Recibida".to_string(), "12".to_string()],
                ],
            );
            let lines: Vec<&str> = table.lines().collect();
            assert_eq!(lines[0], "Estado       Count");
            assert_eq!(lines[1], "-----------  -----");
            assert_eq!(lines[2], "En análisis  3");
            assert_eq!(lines[3], "Recibida     12");
        }
    }
}
