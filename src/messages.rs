//! Messages passed from the workflows up to the root model
//!
//! The single and batch workflows never touch the root state directly. They
//! return a `Msg` from their completion/selection methods and the caller hands
//! it to `Model::update`.

use crate::model::{GeneratedSet, Origin, SharedItem};

#[derive(Debug, Clone)]
pub enum Msg {
    /// A workflow finished generating; carries the full new result set
    Generated(GeneratedSet),

    /// The user picked one item (single card or grid cell)
    Selected(SharedItem),
}

impl Msg {
    pub fn generated(origin: Origin, items: Vec<SharedItem>) -> Self {
        Msg::Generated(GeneratedSet { origin, items })
    }

    pub fn selected(item: SharedItem) -> Self {
        Msg::Selected(item)
    }
}
