use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};
use crate::errors::TerraError;

/// Moves value between identities. A call either settles the full amount or
/// fails without moving anything.
pub trait Ledger {
    fn settle(&mut self, payer: &Pubkey, payee: &Pubkey, amount: u64) -> Result<()>;
}

/// Settles in the world's payment mint through the token interface, so both
/// Token and Token-2022 mints work. The payer must sign the transaction.
pub struct TokenLedger<'a, 'info> {
    pub payer: &'a Signer<'info>,
    pub payer_tokens: &'a InterfaceAccount<'info, TokenAccount>,
    pub payee_tokens: &'a InterfaceAccount<'info, TokenAccount>,
    pub mint: &'a InterfaceAccount<'info, Mint>,
    pub token_program: &'a Interface<'info, TokenInterface>,
}

impl Ledger for TokenLedger<'_, '_> {
    fn settle(&mut self, payer: &Pubkey, payee: &Pubkey, amount: u64) -> Result<()> {
        require_keys_eq!(self.payer.key(), *payer, TerraError::AccountMismatch);
        require_keys_eq!(self.payer_tokens.owner, *payer, TerraError::AccountMismatch);
        require_keys_eq!(self.payee_tokens.owner, *payee, TerraError::AccountMismatch);
        require_keys_eq!(self.payer_tokens.mint, self.mint.key(), TerraError::AccountMismatch);
        require_keys_eq!(self.payee_tokens.mint, self.mint.key(), TerraError::AccountMismatch);

        if self.payer_tokens.amount < amount {
            msg!(
                "{} holds {} but owes {}",
                payer,
                self.payer_tokens.amount,
                amount
            );
            return err!(TerraError::InsufficientFunds);
        }

        if amount == 0 {
            return Ok(());
        }

        let cpi_accounts = TransferChecked {
            from: self.payer_tokens.to_account_info(),
            mint: self.mint.to_account_info(),
            to: self.payee_tokens.to_account_info(),
            authority: self.payer.to_account_info(),
        };
        transfer_checked(
            CpiContext::new(self.token_program.to_account_info(), cpi_accounts),
            amount,
            self.mint.decimals,
        )?;

        msg!("Settled {} from {} to {}", amount, payer, payee);
        Ok(())
    }
}

/// Balance book for exercising the registry off-chain.
#[cfg(test)]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemoryLedger {
    pub balances: std::collections::BTreeMap<Pubkey, u64>,
}

#[cfg(test)]
impl MemoryLedger {
    pub fn fund(&mut self, who: Pubkey, amount: u64) {
        *self.balances.entry(who).or_default() += amount;
    }

    pub fn balance(&self, who: &Pubkey) -> u64 {
        self.balances.get(who).copied().unwrap_or_default()
    }
}

#[cfg(test)]
impl Ledger for MemoryLedger {
    fn settle(&mut self, payer: &Pubkey, payee: &Pubkey, amount: u64) -> Result<()> {
        let available = self.balance(payer);
        require!(available >= amount, TerraError::InsufficientFunds);
        self.balances.insert(*payer, available - amount);
        self.fund(*payee, amount);
        Ok(())
    }
}
