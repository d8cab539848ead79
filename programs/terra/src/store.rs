use anchor_lang::prelude::*;
use std::collections::BTreeMap;
use crate::errors::TerraError;
use crate::state::{Parcel, ParcelFilter};

/// Owner of parcel records. The grid index only refers to parcels by id.
pub trait ParcelStore {
    /// Fails unless `create` would accept a parcel with this id.
    fn check_vacant(&self, id: u64) -> Result<()>;

    /// Stores a record built by `Parcel::new`.
    fn create(&mut self, parcel: Parcel) -> Result<()>;

    fn get(&self, id: u64) -> Result<&Parcel>;

    fn get_mut(&mut self, id: u64) -> Result<&mut Parcel>;

    /// Removes a parcel for good. Later lookups fail with `NotFound`.
    fn retire(&mut self, id: u64) -> Result<Parcel>;

    /// Live parcels, in no particular order.
    fn parcels<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Parcel> + 'a>;

    /// Owner-gated mutation. The mutator runs only after the owner check.
    fn update<F>(&mut self, id: u64, caller: &Pubkey, mutate: F) -> Result<()>
    where
        Self: Sized,
        F: FnOnce(&mut Parcel),
    {
        let parcel = self.get_mut(id)?;
        parcel.require_owner(caller)?;
        mutate(parcel);
        Ok(())
    }
}

/// Lazily yields the parcels matching `filter`. Calling it again restarts the
/// scan.
pub fn list_parcels<'a, S: ParcelStore>(
    store: &'a S,
    filter: ParcelFilter,
) -> impl Iterator<Item = &'a Parcel> + 'a {
    store.parcels().filter(move |parcel| filter.matches(parcel))
}

/// Store over the parcel accounts passed to a single instruction.
///
/// Parcels that the instruction creates go into the account reserved with
/// `with_fresh`, whose PDA was derived from the id about to be allocated.
/// Retired parcels are closed by the instruction's `close` constraints.
pub struct AccountStore<'a> {
    accounts: Vec<&'a mut Parcel>,
    fresh: Option<(u64, u8, &'a mut Parcel)>,
    retired: Vec<u64>,
}

impl<'a> AccountStore<'a> {
    pub fn new(accounts: Vec<&'a mut Parcel>) -> Self {
        Self { accounts, fresh: None, retired: Vec::new() }
    }

    pub fn with_fresh(mut self, reserved_id: u64, bump: u8, account: &'a mut Parcel) -> Self {
        self.fresh = Some((reserved_id, bump, account));
        self
    }

    pub fn retired(&self) -> &[u64] {
        &self.retired
    }
}

impl ParcelStore for AccountStore<'_> {
    fn check_vacant(&self, id: u64) -> Result<()> {
        let reserved = self.fresh.as_ref().map(|(reserved_id, _, _)| *reserved_id);
        if reserved != Some(id) {
            msg!("No account reserved for parcel {} (reserved: {:?})", id, reserved);
            return err!(TerraError::AccountMismatch);
        }
        Ok(())
    }

    fn create(&mut self, parcel: Parcel) -> Result<()> {
        self.check_vacant(parcel.id)?;

        if let Some((_, bump, account)) = self.fresh.take() {
            *account = Parcel { bump, ..parcel };
            self.accounts.push(account);
        }
        Ok(())
    }

    fn get(&self, id: u64) -> Result<&Parcel> {
        if self.retired.contains(&id) {
            return err!(TerraError::NotFound);
        }
        self.accounts
            .iter()
            .find(|parcel| parcel.id == id)
            .map(|parcel| &**parcel)
            .ok_or_else(|| error!(TerraError::NotFound))
    }

    fn get_mut(&mut self, id: u64) -> Result<&mut Parcel> {
        if self.retired.contains(&id) {
            return err!(TerraError::NotFound);
        }
        self.accounts
            .iter_mut()
            .find(|parcel| parcel.id == id)
            .map(|parcel| &mut **parcel)
            .ok_or_else(|| error!(TerraError::NotFound))
    }

    fn retire(&mut self, id: u64) -> Result<Parcel> {
        let parcel = self.get(id)?.clone();
        self.retired.push(id);
        Ok(parcel)
    }

    fn parcels<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Parcel> + 'a> {
        Box::new(
            self.accounts
                .iter()
                .filter(|parcel| !self.retired.contains(&parcel.id))
                .map(|parcel| &**parcel),
        )
    }
}

/// In-memory store, used by off-chain mirrors built from fetched accounts.
impl ParcelStore for BTreeMap<u64, Parcel> {
    fn check_vacant(&self, id: u64) -> Result<()> {
        require!(!self.contains_key(&id), TerraError::DuplicateParcel);
        Ok(())
    }

    fn create(&mut self, parcel: Parcel) -> Result<()> {
        self.check_vacant(parcel.id)?;
        self.insert(parcel.id, parcel);
        Ok(())
    }

    fn get(&self, id: u64) -> Result<&Parcel> {
        BTreeMap::get(self, &id).ok_or_else(|| error!(TerraError::NotFound))
    }

    fn get_mut(&mut self, id: u64) -> Result<&mut Parcel> {
        BTreeMap::get_mut(self, &id).ok_or_else(|| error!(TerraError::NotFound))
    }

    fn retire(&mut self, id: u64) -> Result<Parcel> {
        self.remove(&id).ok_or_else(|| error!(TerraError::NotFound))
    }

    fn parcels<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Parcel> + 'a> {
        Box::new(self.values())
    }
}
