pub mod use_connectivity;
pub mod use_viewport_width;

pub use use_connectivity::*;
pub use use_viewport_width::*;
