use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};
use crate::errors::TerraError;
use crate::events::ParcelPurchased;
use crate::ledger::TokenLedger;
use crate::registry::Registry;
use crate::state::{GridIndex, Parcel, Rect, World};
use crate::store::AccountStore;

#[derive(Accounts)]
pub struct PurchaseParcel<'info> {
    #[account(mut)]
    pub buyer: Signer<'info>,

    #[account(
        mut,
        seeds = [World::SEED],
        bump = world.bump
    )]
    pub world: Account<'info, World>,

    /// GridIndex address must match the one stored in world
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
        associated_token::authority = buyer,
        associated_token::token_program = token_program,
    )]
    pub buyer_tokens: InterfaceAccount<'info, TokenAccount>,

    /// Treasury token account; ownership is checked at settlement
    #[account(
        mut,
        token::mint = payment_mint,
        token::token_program = token_program,
    )]
    pub treasury_tokens: InterfaceAccount<'info, TokenAccount>,

    /// Parcel PDA for the id about to be allocated
    #[account(
        init,
        payer = buyer,
        space = 8 + Parcel::INIT_SPACE,
        seeds = [Parcel::SEED, &world.next_parcel_id.to_le_bytes()],
        bump
    )]
    pub parcel: Account<'info, Parcel>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<PurchaseParcel>,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    max_unit_price: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let rect = Rect::new(x, y, width, height);
    let accounts = &mut *ctx.accounts;
    let buyer = accounts.buyer.key();

    let mut ledger = TokenLedger {
        payer: &accounts.buyer,
        payer_tokens: &accounts.buyer_tokens,
        payee_tokens: &accounts.treasury_tokens,
        mint: &accounts.payment_mint,
        token_program: &accounts.token_program,
    };
    let reserved_id = accounts.world.next_parcel_id;
    let mut store = AccountStore::new(Vec::new())
        .with_fresh(reserved_id, ctx.bumps.parcel, &mut accounts.parcel);
    let mut grid_index = accounts.grid_index.load_mut()?;
    let mut registry = Registry::new(&mut accounts.world, &mut grid_index, &mut store, now);

    let (parcel_id, amount) = registry.purchase(&mut ledger, buyer, rect, max_unit_price)?;

    emit!(ParcelPurchased {
        parcel_id,
        buyer,
        rect,
        amount,
    });
    Ok(())
}
