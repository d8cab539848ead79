use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};
use crate::errors::TerraError;
use crate::events::ParcelRented;
use crate::ledger::TokenLedger;
use crate::registry::Registry;
use crate::state::{GridIndex, Parcel, World};
use crate::store::AccountStore;

#[derive(Accounts)]
#[instruction(parcel_id: u64)]
pub struct RentListed<'info> {
    #[account(mut)]
    pub renter: Signer<'info>,

    #[account(
        seeds = [World::SEED],
        bump = world.bump
    )]
    pub world: Account<'info, World>,

    #[account(
        mut,
        constraint = grid_index.key() == world.grid_index @ TerraError::AccountMismatch
    )]
    pub grid_index: AccountLoader<'info, GridIndex>,

    #[account(
        constraint = payment_mint.key() == world.payment_mint @ TerraError::AccountMismatch
    )]
    pub payment_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        associated_token::mint = payment_mint,
        associated_token::authority = renter,
        associated_token::token_program = token_program,
    )]
    pub renter_tokens: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [Parcel::SEED, &parcel_id.to_le_bytes()],
        bump = parcel.bump
    )]
    pub parcel: Account<'info, Parcel>,

    #[account(
        mut,
        token::mint = payment_mint,
        token::token_program = token_program,
        constraint = owner_tokens.owner == parcel.owner @ TerraError::AccountMismatch
    )]
    pub owner_tokens: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}

pub fn handler(
    ctx: Context<RentListed>,
    parcel_id: u64,
    duration_secs: u64,
    max_unit_price: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;
    let renter = accounts.renter.key();
    let owner = accounts.parcel.owner;

    let mut ledger = TokenLedger {
        payer: &accounts.renter,
        payer_tokens: &accounts.renter_tokens,
        payee_tokens: &accounts.owner_tokens,
        mint: &accounts.payment_mint,
        token_program: &accounts.token_program,
    };
    let mut store = AccountStore::new(vec![&mut *accounts.parcel]);
    let mut grid_index = accounts.grid_index.load_mut()?;
    let mut registry = Registry::new(&mut accounts.world, &mut grid_index, &mut store, now);

    let (expires_at, amount) =
        registry.rent_listed(&mut ledger, parcel_id, renter, duration_secs, max_unit_price)?;

    emit!(ParcelRented {
        parcel_id,
        owner,
        renter,
        expires_at,
        amount,
    });
    Ok(())
}
