use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::FetchError;
use crate::state::{CardDetail, Item};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    Init,

    CategorySelect(Category),
    CategoryNext,
    CategoryPrev,
    ListRefresh,
    ListDidLoad { generation: u64, pokemon: Vec<Item> },
    ListDidError { generation: u64, error: FetchError },

    PickerOpen,
    PickerClose,
    PickerMove(i16),
    PickerSelect(usize),
    PickerConfirm,

    SearchStart,
    SearchCancel,
    SearchSubmit,
    SearchInput(char),
    SearchBackspace,

    PageNext,
    PagePrev,
    SelectionMove(i16),
    ItemSelect(usize),

    CardDidLoad(CardDetail),
    CardDidError { name: String, error: FetchError },

    UiTerminalResize(u16, u16),
    Quit,
}
