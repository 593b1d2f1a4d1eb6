//! TUI widgets for the garden

pub mod garden;
pub mod input;
pub mod journal;

pub use garden::GardenWidget;
pub use input::InputWidget;
pub use journal::JournalWidget;
