use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};
use crate::errors::TerraError;
use crate::events::PassIssued;
use crate::ledger::{Ledger, TokenLedger};
use crate::state::{Pass, PassKind, Tier, World};

/// One pass account per holder and kind. A holder whose pass has expired
/// closes it with close_expired_pass before buying the next one.
#[derive(Accounts)]
#[instruction(kind: PassKind)]
pub struct PurchasePass<'info> {
    #[account(mut)]
    pub holder: Signer<'info>,

    #[account(
        seeds = [World::SEED],
        bump = world.bump
    )]
    pub world: Account<'info, World>,

    #[account(
        constraint = payment_mint.key() == world.payment_mint @ TerraError::AccountMismatch
    )]
    pub payment_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        associated_token::mint = payment_mint,
        associated_token::authority = holder,
        associated_token::token_program = token_program,
    )]
    pub holder_tokens: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = payment_mint,
        token::token_program = token_program,
    )]
    pub treasury_tokens: InterfaceAccount<'info, TokenAccount>,

    #[account(
        init,
        payer = holder,
        space = 8 + Pass::INIT_SPACE,
        seeds = [Pass::SEED, kind.seed(), holder.key().as_ref()],
        bump
    )]
    pub pass: Account<'info, Pass>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<PurchasePass>, kind: PassKind, tier: Tier, hours: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;
    let holder = accounts.holder.key();

    let (issued, price) = Pass::issue(holder, kind, tier, hours, &accounts.world, now)?;

    let mut ledger = TokenLedger {
        payer: &accounts.holder,
        payer_tokens: &accounts.holder_tokens,
        payee_tokens: &accounts.treasury_tokens,
        mint: &accounts.payment_mint,
        token_program: &accounts.token_program,
    };
    ledger.settle(&holder, &accounts.world.treasury, price)?;

    let pass = &mut accounts.pass;
    pass.set_inner(Pass {
        bump: ctx.bumps.pass,
        ..issued
    });

    emit!(PassIssued {
        holder,
        kind,
        tier,
        expires_at: pass.expires_at,
        amount: price,
    });
    msg!(
        "{:?} {:?} pass issued to {} until {} for {}",
        tier,
        kind,
        holder,
        pass.expires_at,
        price
    );
    Ok(())
}
