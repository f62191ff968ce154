//! Page-number strip computation and client-side table paging.

use serde::Serialize;

/// Inputs of the page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationOptions {
    /// Current page, 1-based. Callers clamp it into `1..=count`.
    pub page: u32,
    /// Total number of pages.
    pub count: u32,
    /// Pages always shown at each end.
    pub boundary_count: u32,
    /// Pages shown on each side of the current one.
    pub sibling_count: u32,
    pub show_first_button: bool,
    pub show_last_button: bool,
    pub hide_prev_button: bool,
    pub hide_next_button: bool,
    pub disabled: bool,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            page: 1,
            count: 1,
            boundary_count: 1,
            sibling_count: 1,
            show_first_button: false,
            show_last_button: false,
            hide_prev_button: false,
            hide_next_button: false,
            disabled: false,
        }
    }
}

impl PaginationOptions {
    pub fn new(page: u32, count: u32) -> Self {
        Self {
            page,
            count,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemKind {
    Page,
    StartEllipsis,
    EndEllipsis,
    First,
    Previous,
    Next,
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationItem {
    pub kind: ItemKind,
    /// Page this item navigates to; `None` for ellipses.
    pub page: Option<u32>,
    pub selected: bool,
    pub disabled: bool,
}

impl PaginationItem {
    pub fn is_ellipsis(&self) -> bool {
        matches!(self.kind, ItemKind::StartEllipsis | ItemKind::EndEllipsis)
    }
}

enum Slot {
    Control(ItemKind),
    Number(i64),
    Ellipsis(ItemKind),
}

/// Ordered items of a page-number strip.
///
/// Boundary pages are always shown at both ends and `sibling_count` pages on
/// each side of the current one. A gap of exactly one page between those
/// groups shows that page; a wider gap becomes an ellipsis. The number of
/// items stays constant as the current page moves, so the strip keeps its
/// width.
pub fn pagination_items(options: &PaginationOptions) -> Vec<PaginationItem> {
    let page = i64::from(options.page);
    let count = i64::from(options.count);
    let boundary = i64::from(options.boundary_count);
    let siblings = i64::from(options.sibling_count);

    let start_pages = 1..=boundary.min(count);
    let end_pages = (count - boundary + 1).max(boundary + 1)..=count;

    let siblings_start = (page - siblings)
        .min(count - boundary - siblings * 2 - 1)
        .max(boundary + 2);
    let end_floor = if end_pages.is_empty() {
        count - 1
    } else {
        end_pages.start() - 2
    };
    let siblings_end = (page + siblings)
        .max(boundary + siblings * 2 + 2)
        .min(end_floor);

    let mut slots = Vec::new();
    if options.show_first_button {
        slots.push(Slot::Control(ItemKind::First));
    }
    if !options.hide_prev_button {
        slots.push(Slot::Control(ItemKind::Previous));
    }
    slots.extend(start_pages.map(Slot::Number));

    if siblings_start > boundary + 2 {
        slots.push(Slot::Ellipsis(ItemKind::StartEllipsis));
    } else if boundary + 1 < count - boundary {
        slots.push(Slot::Number(boundary + 1));
    }

    slots.extend((siblings_start..=siblings_end).map(Slot::Number));

    if siblings_end < count - boundary - 1 {
        slots.push(Slot::Ellipsis(ItemKind::EndEllipsis));
    } else if count - boundary > boundary {
        slots.push(Slot::Number(count - boundary));
    }

    slots.extend(end_pages.map(Slot::Number));
    if !options.hide_next_button {
        slots.push(Slot::Control(ItemKind::Next));
    }
    if options.show_last_button {
        slots.push(Slot::Control(ItemKind::Last));
    }

    let to_page = |n: i64| u32::try_from(n.clamp(1, count.max(1))).ok();

    slots
        .into_iter()
        .map(|slot| match slot {
            Slot::Number(n) => PaginationItem {
                kind: ItemKind::Page,
                page: u32::try_from(n).ok(),
                selected: n == page,
                disabled: options.disabled,
            },
            Slot::Ellipsis(kind) => PaginationItem {
                kind,
                page: None,
                selected: false,
                disabled: options.disabled,
            },
            Slot::Control(kind) => {
                let (target, at_edge) = match kind {
                    ItemKind::First => (1, page <= 1),
                    ItemKind::Previous => (page - 1, page <= 1),
                    ItemKind::Next => (page + 1, page >= count),
                    _ => (count, page >= count),
                };
                PaginationItem {
                    kind,
                    page: to_page(target),
                    selected: false,
                    disabled: options.disabled || at_edge,
                }
            }
        })
        .collect()
}

/// Paging over an in-memory collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    pub page: u32,
    pub per_page: u32,
    pub total: usize,
}

impl PaginationState {
    pub fn new(per_page: u32, total: usize) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
            total,
        }
    }

    /// `ceil(total / per_page)`, never less than 1.
    pub fn total_pages(&self) -> u32 {
        let per_page = self.per_page.max(1) as usize;
        let pages = self.total.div_ceil(per_page).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Move to `page`, clamped into `1..=total_pages()`.
    pub fn go_to(&mut self, page: u32) {
        self.page = page;
        self.clamp();
    }

    /// Record a new item count, keeping the current page in range.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.clamp();
    }

    pub fn clamp(&mut self) {
        self.page = self.page.clamp(1, self.total_pages());
    }

    /// Half-open index range of the current page within the collection.
    pub fn slice_bounds(&self) -> (usize, usize) {
        let per_page = self.per_page.max(1) as usize;
        let start = (self.page.max(1) as usize - 1)
            .saturating_mul(per_page)
            .min(self.total);
        let end = start.saturating_add(per_page).min(self.total);
        (start, end)
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let (start, end) = self.slice_bounds();
        let end = end.min(items.len());
        &items[start.min(end)..end]
    }

    /// Strip options for the current position.
    pub fn options(&self) -> PaginationOptions {
        PaginationOptions::new(self.page, self.total_pages())
    }
}
