//! cellgrid-core - UI-agnostic selection/editing state and sheet document.

pub mod coordinator;
pub mod document;
pub mod error;

pub use coordinator::{Coordinator, EditState, Key, SelectionState};
pub use document::Sheet;
pub use error::{CellgridError, Result};

pub use cellgrid_engine::engine::Coord;
