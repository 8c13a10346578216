pub mod use_selection_coordinator;

pub use use_selection_coordinator::use_selection_coordinator;
