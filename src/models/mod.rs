pub mod common;
pub mod destination;
pub mod source;
pub mod view;

pub use common::*;
pub use destination::*;
pub use source::*;
pub use view::*;
