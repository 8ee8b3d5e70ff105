pub mod product_lines;
pub mod record;
pub mod selection;

pub use product_lines::ProductLines;
pub use record::{Amount, InventoryRecord, ModelCode};
pub use selection::{CheapestSnapshot, RankedSelection};
