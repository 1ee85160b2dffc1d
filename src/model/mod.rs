pub mod color;
pub mod payload;
pub mod rubric;
pub mod sort;

pub use color::{ColorClass, get_color_class};
pub use rubric::{Review, ReviewRow, RubricItem, Round};
pub use sort::SortOrder;
