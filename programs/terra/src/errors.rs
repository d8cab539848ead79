use anchor_lang::prelude::*;

#[error_code]
pub enum TerraError {
    #[msg("Rectangle has a zero dimension or lies outside the world")]
    InvalidRectangle,

    #[msg("Region overlaps an existing parcel")]
    Occupied,

    #[msg("Parcel not found")]
    NotFound,

    #[msg("Unauthorized")]
    Unauthorized,

    #[msg("Sub-rectangle does not split the parcel into two rectangles")]
    InvalidSplit,

    #[msg("Parcels are not edge-adjacent with a matching dimension")]
    NotAdjacent,

    #[msg("Parcel is not listed")]
    NotListed,

    #[msg("Insufficient funds")]
    InsufficientFunds,

    #[msg("Price must be greater than zero")]
    InvalidPrice,

    #[msg("World price exceeds the offered unit price")]
    PriceExceeded,

    #[msg("Invalid duration")]
    InvalidDuration,

    #[msg("Parcel has an active rental")]
    RentalActive,

    #[msg("Parcel has no rental")]
    NotRented,

    #[msg("Grid index is full")]
    IndexFull,

    #[msg("Parcel is already registered in the grid index")]
    DuplicateParcel,

    #[msg("Parcel record disagrees with the grid index")]
    IndexMismatch,

    #[msg("Account does not match the expected key")]
    AccountMismatch,

    #[msg("Invalid world dimensions")]
    InvalidWorld,

    #[msg("Arithmetic overflow")]
    Overflow,

    #[msg("Pass has not expired")]
    PassActive,
}
