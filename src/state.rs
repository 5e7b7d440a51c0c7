use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::category::Category;
use crate::pipeline::{FetchSlot, FetchState};
use crate::view::{self, ViewState};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One list entry. `name` is the identity across types, `url` points at the
/// full pokemon resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub url: String,
}

/// Stats shown on the card of the selected entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardDetail {
    pub name: String,
    pub sprite_url: Option<String>,
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub primary_type: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PickerState {
    pub open: bool,
    pub index: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppState {
    pub terminal_size: (u16, u16),
    pub category: Category,
    pub list: FetchSlot,
    pub search: SearchState,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
    /// Index into the visible page.
    pub selected_index: usize,
    pub picker: PickerState,
    pub cards: HashMap<String, CardDetail>,
    pub card_loading: Option<String>,
    pub message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Category::default(), DEFAULT_PAGE_SIZE)
    }
}

impl AppState {
    pub fn new(category: Category, page_size: usize) -> Self {
        Self {
            terminal_size: (80, 24),
            category,
            list: FetchSlot::default(),
            search: SearchState::default(),
            page: 1,
            page_size: page_size.max(1),
            selected_index: 0,
            picker: PickerState::default(),
            cards: HashMap::new(),
            card_loading: None,
            message: None,
        }
    }

    pub fn view(&self) -> ViewState {
        view::derive(
            self.list.items(),
            &self.search.query,
            self.page,
            self.page_size,
        )
    }

    pub fn selected_item(&self) -> Option<Item> {
        self.view().visible_items.get(self.selected_index).cloned()
    }

    pub fn selected_card(&self) -> Option<&CardDetail> {
        let item = self.selected_item()?;
        self.cards.get(&item.name)
    }

    pub fn fetch_state(&self) -> &FetchState {
        self.list.state()
    }

    /// Back to the first page with the cursor on its first entry.
    pub fn reset_page(&mut self) {
        self.page = 1;
        self.selected_index = 0;
    }

    pub fn set_selected_index(&mut self, index: usize) -> bool {
        let visible = self.view().visible_items.len();
        if visible == 0 {
            self.selected_index = 0;
            return false;
        }
        let bounded = index.min(visible - 1);
        if bounded != self.selected_index {
            self.selected_index = bounded;
            return true;
        }
        false
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        let view = self.view();
        vec![
            DebugSection::new("List")
                .entry("category", ron_string(&self.category))
                .entry("generation", ron_string(&self.list.generation()))
                .entry("loaded", ron_string(&self.list.items().len()))
                .entry("filtered", ron_string(&view.filtered_count))
                .entry("page", ron_string(&view.current_page))
                .entry("pages", ron_string(&view.total_pages))
                .entry("selected", ron_string(&self.selected_index)),
            DebugSection::new("Filters")
                .entry("search", ron_string(&self.search.query))
                .entry("search_active", ron_string(&self.search.active))
                .entry("picker_open", ron_string(&self.picker.open)),
            DebugSection::new("Status")
                .entry("list_loading", ron_string(&self.list.state().is_loading()))
                .entry("card_loading", ron_string(&self.card_loading))
                .entry("message", ron_string(&self.message)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(names: &[&str], page_size: usize) -> AppState {
        let mut state = AppState::new(Category::All, page_size);
        let generation = state.list.begin();
        let items = names
            .iter()
            .map(|name| Item {
                name: name.to_string(),
                url: String::new(),
            })
            .collect();
        state.list.settle(generation, Ok(items));
        state
    }

    #[test]
    fn selected_item_follows_page() {
        let mut state = loaded(&["a", "b", "c"], 2);
        state.page = 2;
        assert_eq!(state.selected_item().map(|item| item.name), Some("c".into()));
    }

    #[test]
    fn selection_is_bounded_by_visible_page() {
        let mut state = loaded(&["a", "b", "c"], 2);
        assert!(state.set_selected_index(5));
        assert_eq!(state.selected_index, 1);
        assert!(!state.set_selected_index(1));
    }
}
