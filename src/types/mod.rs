// Shared domain types: produced by the engines, consumed by callers.
// Nothing here performs I/O.

pub mod common;
pub mod filters;
pub mod page;
pub mod work_item;

pub use common::*;
pub use filters::*;
pub use page::*;
pub use work_item::*;
