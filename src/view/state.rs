use crate::store::Drink;

/// Fixed number of drinks per catalog page.
pub const PAGE_SIZE: usize = 10;

/// One renderable page of the catalog, derived from the full drink set.
#[derive(Debug)]
pub struct CatalogPage {
    pub items: Vec<Drink>,
    /// 1-based current page.
    pub page: usize,
    /// ceil(filtered / PAGE_SIZE); zero when the filter matches nothing.
    pub total_pages: usize,
}

/// Case-insensitive substring match on the name only. An empty query keeps
/// everything; a drink without a name matches only the empty query.
pub fn filter_by_name<'a>(drinks: &'a [Drink], query: &str) -> Vec<&'a Drink> {
    if query.is_empty() {
        return drinks.iter().collect();
    }
    let needle = query.to_lowercase();
    drinks
        .iter()
        .filter(|d| {
            d.name
                .as_deref()
                .unwrap_or_default()
                .to_lowercase()
                .contains(&needle)
        })
        .collect()
}

impl CatalogPage {
    /// Filter, then slice out the requested page. Out-of-range pages come
    /// back empty rather than clamped; navigation is simply disabled at the
    /// boundaries.
    pub fn build(drinks: &[Drink], query: &str, page: usize) -> Self {
        let filtered = filter_by_name(drinks, query);
        let total_pages = filtered.len().div_ceil(PAGE_SIZE);
        let page = page.max(1);
        let items = filtered
            .into_iter()
            .skip((page - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .cloned()
            .collect();
        Self {
            items,
            page,
            total_pages,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}
