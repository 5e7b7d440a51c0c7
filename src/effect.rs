use crate::category::Category;

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// `generation` is echoed back in the result action.
    LoadList { category: Category, generation: u64 },
    LoadCard { name: String, url: String },
}
