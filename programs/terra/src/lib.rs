use anchor_lang::prelude::*;

pub mod errors;
pub mod events;
pub mod ledger;
pub mod registry;
pub mod state;
pub mod store;
pub mod utils;
pub mod instructions;

use instructions::*;
use state::{ListingKind, PassKind, Tier};

declare_id!("F6u6DxwL78Z5RpvCB7G25CDovQfewygGynXmSqQXMS7W");

#[program]
pub mod terra {
    use super::*;

    pub fn create_grid_index(ctx: Context<CreateGridIndex>) -> Result<()> {
        instructions::create_grid_index::handler(ctx)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn initialize_world(
        ctx: Context<InitializeWorld>,
        width: u32,
        height: u32,
        price_per_unit: u64,
        citizenship_price: u64,
        senior_citizenship_price: u64,
        visa_price_per_hour: u64,
        senior_visa_price_per_hour: u64,
    ) -> Result<()> {
        instructions::initialize_world::handler(
            ctx,
            width,
            height,
            price_per_unit,
            citizenship_price,
            senior_citizenship_price,
            visa_price_per_hour,
            senior_visa_price_per_hour,
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn update_world(
        ctx: Context<UpdateWorld>,
        price_per_unit: Option<u64>,
        treasury: Option<Pubkey>,
        citizenship_price: Option<u64>,
        senior_citizenship_price: Option<u64>,
        visa_price_per_hour: Option<u64>,
        senior_visa_price_per_hour: Option<u64>,
        new_authority: Option<Pubkey>,
    ) -> Result<()> {
        instructions::update_world::handler(
            ctx,
            price_per_unit,
            treasury,
            citizenship_price,
            senior_citizenship_price,
            visa_price_per_hour,
            senior_visa_price_per_hour,
            new_authority,
        )
    }

    pub fn purchase_parcel(
        ctx: Context<PurchaseParcel>,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        max_unit_price: u64,
    ) -> Result<()> {
        instructions::purchase_parcel::handler(ctx, x, y, width, height, max_unit_price)
    }

    pub fn transfer_parcel(
        ctx: Context<TransferParcel>,
        parcel_id: u64,
        new_owner: Pubkey,
    ) -> Result<()> {
        instructions::transfer_parcel::handler(ctx, parcel_id, new_owner)
    }

    pub fn list_for_sale(ctx: Context<ListParcel>, parcel_id: u64, unit_price: u64) -> Result<()> {
        instructions::list_parcel::sale_handler(ctx, parcel_id, unit_price)
    }

    pub fn list_for_rent(ctx: Context<ListParcel>, parcel_id: u64, unit_price: u64) -> Result<()> {
        instructions::list_parcel::rent_handler(ctx, parcel_id, unit_price)
    }

    pub fn delist(ctx: Context<ListParcel>, parcel_id: u64, kind: ListingKind) -> Result<()> {
        instructions::list_parcel::delist_handler(ctx, parcel_id, kind)
    }

    pub fn buy_listed(
        ctx: Context<BuyListed>,
        parcel_id: u64,
        max_unit_price: u64,
    ) -> Result<()> {
        instructions::buy_listed::handler(ctx, parcel_id, max_unit_price)
    }

    pub fn rent_listed(
        ctx: Context<RentListed>,
        parcel_id: u64,
        duration_secs: u64,
        max_unit_price: u64,
    ) -> Result<()> {
        instructions::rent_listed::handler(ctx, parcel_id, duration_secs, max_unit_price)
    }

    pub fn clear_expired_rental(ctx: Context<ClearExpiredRental>, parcel_id: u64) -> Result<()> {
        instructions::clear_expired_rental::handler(ctx, parcel_id)
    }

    pub fn split_parcel(
        ctx: Context<SplitParcel>,
        parcel_id: u64,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<()> {
        instructions::split_parcel::handler(ctx, parcel_id, x, y, width, height)
    }

    pub fn merge_parcels(
        ctx: Context<MergeParcels>,
        first_id: u64,
        second_id: u64,
    ) -> Result<()> {
        instructions::merge_parcels::handler(ctx, first_id, second_id)
    }

    pub fn purchase_pass(
        ctx: Context<PurchasePass>,
        kind: PassKind,
        tier: Tier,
        hours: u64,
    ) -> Result<()> {
        instructions::purchase_pass::handler(ctx, kind, tier, hours)
    }

    pub fn close_expired_pass(ctx: Context<CloseExpiredPass>, kind: PassKind) -> Result<()> {
        instructions::close_expired_pass::handler(ctx, kind)
    }
}
