//! Headline counters shown above the charts.

use dioxus::prelude::*;
use lab_stats::DashboardSnapshot;

#[derive(Debug, Clone, PartialEq)]
pub struct StatCardData {
    pub title: &'static str,
    pub value: usize,
    pub accent: &'static str,
}

/// The six dashboard cards, in display order.
pub fn stat_cards(snapshot: &DashboardSnapshot) -> Vec<StatCardData> {
    let card = |title, value, accent| StatCardData {
        title,
        value,
        accent,
    };
    vec![
        card("Total de muestras", snapshot.total_samples, "#2196F3"),
        card("En análisis", snapshot.in_analysis, "#FF9800"),
        card("Finalizadas", snapshot.finalized, "#4CAF50"),
        card("Rechazadas", snapshot.rejected, "#F44336"),
        card("Total de usuarios", snapshot.total_users, "#9C27B0"),
        card("Clientes", snapshot.clients, "#00BCD4"),
    ]
}

#[derive(Props, Clone, PartialEq)]
pub struct StatCardProps {
    pub title: String,
    pub value: usize,
    #[props(default = "#2196F3".to_string())]
    pub accent: String,
}

#[component]
pub fn StatCard(props: StatCardProps) -> Element {
    let style = format!(
        "flex: 1 1 140px; padding: 12px 16px; border-radius: 6px; background: #fff; border-left: 4px solid {}; box-shadow: 0 1px 3px rgba(0,0,0,0.12);",
        props.accent
    );
    rsx! {
        div {
            style: "{style}",
            div {
                style: "font-size: 12px; color: #666;",
                "{props.title}"
            }
            div {
                style: "font-size: 24px; font-weight: bold;",
                "{props.value}"
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct StatCardsProps {
    pub snapshot: DashboardSnapshot,
}

#[component]
pub fn StatCards(props: StatCardsProps) -> Element {
    rsx! {
        div {
            style: "display: flex; flex-wrap: wrap; gap: 12px; margin: 12px 0;",
            for card in stat_cards(&props.snapshot) {
                StatCard {
                    key: "{card.title}",
                    title: card.title.to_string(),
                    value: card.value,
                    accent: card.accent.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_follow_snapshot_totals() {
        let snapshot = DashboardSnapshot {
            total_samples: 9,
            rejected: 2,
            clients: 4,
            ..DashboardSnapshot::default()
        };
        let cards = stat_cards(&snapshot);
        assert_eq!(cards.len(), 6);
        assert_eq!(cards[0].value, 9);
        assert_eq!(cards[3].title, "Rechazadas");
        assert_eq!(cards[3].value, 2);
        assert_eq!(cards[5].value, 4);
    }
}
