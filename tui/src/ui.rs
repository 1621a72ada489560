pub mod layout;
pub mod widgets;

pub use layout::render;
