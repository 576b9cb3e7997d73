//! Item domain: the synchronized record, the list state machine and the
//! filter criterion used by derived views.

mod filter;
mod list_state;
mod record;

pub use filter::{FilterCriterion, ParseFilterCriterionError};
pub use list_state::ListState;
pub use record::Item;
