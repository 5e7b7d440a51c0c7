//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::category::Category;
use crate::effect::Effect;
use crate::state::AppState;
use crate::view;

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.message = None;
            state.reset_page();
            DispatchResult::changed_with(start_list_fetch(state))
        }

        Action::CategorySelect(category) => select_category(state, category),
        Action::CategoryNext => {
            let next = state.category.cycle(1);
            select_category(state, next)
        }
        Action::CategoryPrev => {
            let prev = state.category.cycle(-1);
            select_category(state, prev)
        }

        Action::ListRefresh => {
            state.message = None;
            DispatchResult::changed_with(start_list_fetch(state))
        }

        Action::ListDidLoad {
            generation,
            pokemon,
        } => {
            let count = pokemon.len();
            if !state.list.settle(generation, Ok(pokemon)) {
                return DispatchResult::unchanged();
            }
            tracing::info!(category = %state.category, count, "list loaded");
            state.message = None;
            let selected = state.selected_index;
            state.set_selected_index(selected);
            DispatchResult::changed_with_many(select_current(state))
        }

        Action::ListDidError { generation, error } => {
            let message = format!("List error: {error}");
            if !state.list.settle(generation, Err(error)) {
                return DispatchResult::unchanged();
            }
            tracing::warn!(category = %state.category, %message, "list failed");
            state.message = Some(message);
            DispatchResult::changed()
        }

        Action::PickerOpen => {
            state.picker.open = true;
            state.picker.index = state.category.position();
            DispatchResult::changed()
        }

        Action::PickerClose => {
            if !state.picker.open {
                return DispatchResult::unchanged();
            }
            state.picker.open = false;
            DispatchResult::changed()
        }

        Action::PickerMove(delta) => {
            let max_index = Category::options().len() - 1;
            let next = clamp_index(state.picker.index, max_index + 1, delta);
            if next == state.picker.index {
                return DispatchResult::unchanged();
            }
            state.picker.index = next;
            DispatchResult::changed()
        }

        Action::PickerSelect(index) => {
            if index >= Category::options().len() || index == state.picker.index {
                return DispatchResult::unchanged();
            }
            state.picker.index = index;
            DispatchResult::changed()
        }

        Action::PickerConfirm => {
            let options = Category::options();
            let Some(category) = options.get(state.picker.index).copied() else {
                return DispatchResult::unchanged();
            };
            state.picker.open = false;
            if category == state.category {
                return DispatchResult::changed();
            }
            select_category(state, category)
        }

        Action::SearchStart => {
            state.search.active = true;
            state.search.query.clear();
            state.reset_page();
            DispatchResult::changed_with_many(select_current(state))
        }

        Action::SearchCancel => {
            if !state.search.active && state.search.query.is_empty() {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            state.search.query.clear();
            state.reset_page();
            DispatchResult::changed_with_many(select_current(state))
        }

        Action::SearchSubmit => {
            state.search.active = false;
            DispatchResult::changed_with_many(select_current(state))
        }

        Action::SearchInput(ch) => {
            state.search.query.push(ch);
            state.reset_page();
            DispatchResult::changed_with_many(select_current(state))
        }

        Action::SearchBackspace => {
            if state.search.query.pop().is_none() {
                return DispatchResult::unchanged();
            }
            state.reset_page();
            DispatchResult::changed_with_many(select_current(state))
        }

        Action::PageNext => {
            let current = state.view();
            let next = view::next_page(current.current_page, current.total_pages);
            turn_page(state, current.current_page, next)
        }

        Action::PagePrev => {
            let current = state.view().current_page;
            turn_page(state, current, view::prev_page(current))
        }

        Action::SelectionMove(delta) => {
            let visible = state.view().visible_items.len();
            let index = clamp_index(state.selected_index, visible, delta);
            if !state.set_selected_index(index) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed_with_many(select_current(state))
        }

        Action::ItemSelect(index) => {
            if !state.set_selected_index(index) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed_with_many(select_current(state))
        }

        Action::CardDidLoad(detail) => {
            if state.card_loading.as_deref() != Some(detail.name.as_str()) {
                tracing::debug!(name = %detail.name, "dropping stale card");
                return DispatchResult::unchanged();
            }
            state.card_loading = None;
            state.cards.insert(detail.name.clone(), detail);
            DispatchResult::changed()
        }

        Action::CardDidError { name, error } => {
            if state.card_loading.as_deref() != Some(name.as_str()) {
                tracing::debug!(%name, %error, "dropping stale card error");
                return DispatchResult::unchanged();
            }
            state.card_loading = None;
            state.message = Some(format!("{name}: {error}"));
            DispatchResult::changed()
        }

        Action::UiTerminalResize(width, height) => {
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn select_category(state: &mut AppState, category: Category) -> DispatchResult<Effect> {
    if category == state.category {
        return DispatchResult::unchanged();
    }
    tracing::info!(from = %state.category, to = %category, "category changed");
    state.category = category;
    state.message = None;
    // Cards are kept for the current list only.
    state.cards.clear();
    state.card_loading = None;
    state.reset_page();
    DispatchResult::changed_with(start_list_fetch(state))
}

fn start_list_fetch(state: &mut AppState) -> Effect {
    let generation = state.list.begin();
    Effect::LoadList {
        category: state.category,
        generation,
    }
}

fn turn_page(state: &mut AppState, current: usize, next: usize) -> DispatchResult<Effect> {
    if next == current {
        return DispatchResult::unchanged();
    }
    state.page = next;
    state.selected_index = 0;
    DispatchResult::changed_with_many(select_current(state))
}

fn select_current(state: &mut AppState) -> Vec<Effect> {
    let Some(item) = state.selected_item() else {
        return Vec::new();
    };
    if state.cards.contains_key(&item.name) || state.card_loading.as_deref() == Some(&item.name) {
        return Vec::new();
    }
    state.card_loading = Some(item.name.clone());
    vec![Effect::LoadCard {
        name: item.name,
        url: item.url,
    }]
}

fn clamp_index(current: usize, len: usize, delta: i16) -> usize {
    if len == 0 {
        return 0;
    }
    let next = current as i64 + delta as i64;
    next.clamp(0, len as i64 - 1) as usize
}
