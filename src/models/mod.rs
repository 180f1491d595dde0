mod hover;
mod range_selector;

pub use hover::{HoverState, category_at, nearest_point};
pub use range_selector::{DefaultRange, DragHandle, RangeSelector, SelectionRange};
