//! Category / count / percentage table with a proportional bar per row.

use dioxus::prelude::*;
use lab_report::SummaryTable;
use lab_stats::format_percentage;

#[derive(Props, Clone, PartialEq)]
pub struct DistributionTableProps {
    pub table: SummaryTable,
    #[props(default = "#2196F3".to_string())]
    pub color: String,
}

#[component]
pub fn DistributionTable(props: DistributionTableProps) -> Element {
    let summary = &props.table;
    rsx! {
        div {
            style: "margin: 12px 0;",
            h3 {
                style: "margin: 0 0 4px 0; font-size: 16px;",
                "{summary.title}"
            }
            table {
                style: "width: 100%; border-collapse: collapse; font-size: 13px;",
                thead {
                    tr {
                        th { style: "text-align: left;", "{summary.category_header}" }
                        th { style: "text-align: right;", "Cantidad" }
                        th { style: "text-align: right;", "Porcentaje" }
                        th { style: "width: 40%;" }
                    }
                }
                tbody {
                    for row in summary.rows.iter() {
                        tr {
                            key: "{row.label}",
                            td { "{row.label}" }
                            td { style: "text-align: right;", "{row.count}" }
                            td { style: "text-align: right;", {format_percentage(row.percentage)} }
                            td {
                                div {
                                    style: "height: 8px; border-radius: 4px; background: {props.color}; width: {row.percentage}%;",
                                }
                            }
                        }
                    }
                    tr {
                        style: "font-weight: bold; border-top: 1px solid #ccc;",
                        td { "{summary.total.label}" }
                        td { style: "text-align: right;", "{summary.total.count}" }
                        td { style: "text-align: right;", {format_percentage(summary.total.percentage)} }
                        td {}
                    }
                }
            }
        }
    }
}
