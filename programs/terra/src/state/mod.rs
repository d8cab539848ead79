pub mod rect;
pub mod world;
pub mod grid_index;
pub mod parcel;
pub mod pass;

pub use rect::*;
pub use world::*;
pub use grid_index::*;
pub use parcel::*;
pub use pass::*;
