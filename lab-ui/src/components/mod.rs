//! Reusable Dioxus RSX components for the lab dashboard.

mod analysis_list;
mod analysis_type_selector;
mod distribution_table;
mod error_display;
mod loading_spinner;
mod pagination_strip;
mod sample_table;
mod stat_card;

pub use analysis_list::AnalysisList;
pub use analysis_type_selector::AnalysisTypeSelector;
pub use distribution_table::DistributionTable;
pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use pagination_strip::{item_label, PaginationStrip};
pub use sample_table::SampleTable;
pub use stat_card::{stat_cards, StatCard, StatCardData, StatCards};
