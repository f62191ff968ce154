//! Page-number strip with first / previous / next / last controls.

use dioxus::prelude::*;
use lab_stats::{pagination_items, ItemKind, PaginationItem, PaginationOptions};

/// Text shown on an item's button.
pub fn item_label(item: &PaginationItem) -> String {
    match item.kind {
        ItemKind::Page => item.page.map(|p| p.to_string()).unwrap_or_default(),
        ItemKind::StartEllipsis | ItemKind::EndEllipsis => "…".to_string(),
        ItemKind::First => "«".to_string(),
        ItemKind::Previous => "‹".to_string(),
        ItemKind::Next => "›".to_string(),
        ItemKind::Last => "»".to_string(),
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct PaginationStripProps {
    pub options: PaginationOptions,
    /// Called with the target page of the clicked item
    pub on_select: EventHandler<u32>,
}

#[component]
pub fn PaginationStrip(props: PaginationStripProps) -> Element {
    let items = pagination_items(&props.options);
    rsx! {
        nav {
            style: "display: flex; gap: 4px; justify-content: center; margin: 8px 0;",
            for (i, item) in items.into_iter().enumerate() {
                if item.is_ellipsis() {
                    span {
                        key: "{i}",
                        style: "padding: 4px 8px; color: #888;",
                        {item_label(&item)}
                    }
                } else {
                    button {
                        key: "{i}",
                        disabled: item.disabled,
                        style: if item.selected {
                            "padding: 4px 10px; border: 1px solid #2196F3; background: #2196F3; color: #fff; border-radius: 4px;"
                        } else {
                            "padding: 4px 10px; border: 1px solid #ccc; background: #fff; border-radius: 4px;"
                        },
                        onclick: move |_| {
                            if let Some(page) = item.page {
                                props.on_select.call(page);
                            }
                        },
                        {item_label(&item)}
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_for_every_kind() {
        let labels: Vec<String> = pagination_items(&PaginationOptions {
            show_first_button: true,
            show_last_button: true,
            ..PaginationOptions::new(5, 10)
        })
        .iter()
        .map(item_label)
        .collect();
        assert_eq!(labels, vec!["«", "‹", "1", "…", "4", "5", "6", "…", "10", "›", "»"]);
    }
}
