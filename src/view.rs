//! Filter-paginate view model. Pure functions over the pipeline output.

use crate::state::Item;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewState {
    pub visible_items: Vec<Item>,
    pub current_page: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
    /// Position of the first visible item within the filtered list.
    pub first_index: usize,
}

impl ViewState {
    pub fn is_empty(&self) -> bool {
        self.filtered_count == 0
    }
}

/// Whitespace is part of the term; only the empty term matches everything.
pub fn matches(item: &Item, term: &str) -> bool {
    term.is_empty() || item.name.to_lowercase().contains(&term.to_lowercase())
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Clamps a 1-based page into `[1, max(total_pages, 1)]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

pub fn derive(items: &[Item], term: &str, page: usize, page_size: usize) -> ViewState {
    let page_size = page_size.max(1);
    let filtered: Vec<&Item> = items.iter().filter(|item| matches(item, term)).collect();
    let total_pages = total_pages(filtered.len(), page_size);
    let current_page = clamp_page(page, total_pages);
    let first_index = (current_page - 1) * page_size;
    let visible_items = filtered
        .iter()
        .skip(first_index)
        .take(page_size)
        .map(|item| (*item).clone())
        .collect();
    ViewState {
        visible_items,
        current_page,
        total_pages,
        filtered_count: filtered.len(),
        first_index,
    }
}

pub fn next_page(page: usize, total_pages: usize) -> usize {
    if page >= total_pages {
        clamp_page(page, total_pages)
    } else {
        page + 1
    }
}

pub fn prev_page(page: usize) -> usize {
    page.saturating_sub(1).max(1)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn items(names: &[&str]) -> Vec<Item> {
        names
            .iter()
            .map(|name| Item {
                name: name.to_string(),
                url: format!("https://pokeapi.test/pokemon/{name}"),
            })
            .collect()
    }

    #[test]
    fn filters_case_insensitively() {
        let all = items(&["charmander", "charmeleon", "Charizard", "vulpix"]);
        let view = derive(&all, "CHAR", 1, 10);
        let names: Vec<_> = view.visible_items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["charmander", "charmeleon", "Charizard"]);
        assert_eq!(view.total_pages, 1);
    }

    #[test]
    fn whitespace_is_matched_literally() {
        let all = items(&["pikachu", "mr-mime"]);
        assert_eq!(derive(&all, " ", 1, 10).filtered_count, 0);
        assert_eq!(derive(&all, "mr ", 1, 10).filtered_count, 0);
        assert_eq!(derive(&all, "", 1, 10).filtered_count, 2);
    }

    #[test]
    fn last_page_is_short() {
        let all = items(&["a", "b", "c", "d", "e"]);
        let view = derive(&all, "", 3, 2);
        assert_eq!(view.visible_items, items(&["e"]));
        assert_eq!(view.current_page, 3);
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.first_index, 4);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let all = items(&["pikachu"]);
        let view = derive(&all, "mew", 4, 10);
        assert!(view.visible_items.is_empty());
        assert_eq!(view.total_pages, 0);
        assert_eq!(view.current_page, 1);
        assert!(view.is_empty());
    }

    #[test]
    fn out_of_range_page_is_clamped() {
        let all = items(&["a", "b", "c"]);
        assert_eq!(derive(&all, "", 9, 2).current_page, 2);
        assert_eq!(derive(&all, "", 0, 2).current_page, 1);
    }

    #[test]
    fn derive_is_pure() {
        let all = items(&["a", "b", "c"]);
        assert_eq!(derive(&all, "a", 1, 1), derive(&all, "a", 1, 1));
    }

    #[test]
    fn navigation_stops_at_bounds() {
        assert_eq!(prev_page(1), 1);
        assert_eq!(prev_page(3), 2);
        assert_eq!(next_page(3, 3), 3);
        assert_eq!(next_page(2, 3), 3);
        assert_eq!(next_page(1, 0), 1);
    }

    #[test]
    fn zero_page_size_acts_as_one() {
        let all = items(&["a", "b"]);
        let view = derive(&all, "", 2, 0);
        assert_eq!(view.visible_items, items(&["b"]));
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.first_index, 1);
    }
}
