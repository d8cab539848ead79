#![allow(ambiguous_glob_reexports)]

pub mod create_grid_index;
pub mod initialize_world;
pub mod update_world;
pub mod purchase_parcel;
pub mod transfer_parcel;
pub mod list_parcel;
pub mod buy_listed;
pub mod rent_listed;
pub mod clear_expired_rental;
pub mod split_parcel;
pub mod merge_parcels;
pub mod purchase_pass;
pub mod close_expired_pass;

pub use create_grid_index::*;
pub use initialize_world::*;
pub use update_world::*;
pub use purchase_parcel::*;
pub use transfer_parcel::*;
pub use list_parcel::*;
pub use buy_listed::*;
pub use rent_listed::*;
pub use clear_expired_rental::*;
pub use split_parcel::*;
pub use merge_parcels::*;
pub use purchase_pass::*;
pub use close_expired_pass::*;
