use anchor_lang::prelude::*;
use crate::errors::TerraError;
use crate::ledger::Ledger;
use crate::state::{
    Edge, GridIndex, ListingKind, Parcel, ParcelFilter, Rect, Rental, World, WorldTally,
};
use crate::store::{self, ParcelStore};
use crate::utils::{expiry_after, settlement_amount};

/// Land registry state for one call: the world, its grid index, the parcel
/// store and the clock reading the call runs at.
///
/// Every mutating operation follows the same shape. It validates against the
/// index and the store without touching either, settles with the ledger if
/// money changes hands, then commits store, world counters and index. Only
/// validated steps run after settlement, so a failed call leaves everything
/// as it was.
pub struct Registry<'a, S: ParcelStore> {
    pub world: &'a mut World,
    pub index: &'a mut GridIndex,
    pub store: &'a mut S,
    pub now: i64,
}

impl<'a, S: ParcelStore> Registry<'a, S> {
    pub fn new(world: &'a mut World, index: &'a mut GridIndex, store: &'a mut S, now: i64) -> Self {
        Self { world, index, store, now }
    }

    /// A live parcel, checked against its index entry.
    pub fn get(&self, id: u64) -> Result<&Parcel> {
        let parcel = self.store.get(id)?;
        match self.index.rect_of(id) {
            Some(rect) if rect == parcel.rect => Ok(parcel),
            Some(rect) => {
                msg!("Parcel {} is {} but indexed as {}", id, parcel.rect, rect);
                err!(TerraError::IndexMismatch)
            }
            None => {
                msg!("Parcel {} is not in the grid index", id);
                err!(TerraError::NotFound)
            }
        }
    }

    pub fn list_parcels(&self, filter: ParcelFilter) -> impl Iterator<Item = &Parcel> + '_ {
        store::list_parcels(&*self.store, filter)
    }

    pub fn query_overlap(&self, rect: &Rect) -> Vec<u64> {
        self.index.query_overlap(rect)
    }

    pub fn locate(&self, x: u32, y: u32) -> Option<u64> {
        self.index.locate(x, y)
    }

    pub fn adjacent(&self, id: u64, edge: Edge) -> Result<Vec<u64>> {
        self.get(id)?;
        self.index.adjacent(id, edge)
    }

    /// Claims unclaimed space for `buyer` at the world price, paid to the
    /// treasury. `max_unit_price` guards against a price change between
    /// quoting and signing. Returns `(parcel_id, amount_paid)`.
    pub fn purchase<L: Ledger>(
        &mut self,
        ledger: &mut L,
        buyer: Pubkey,
        rect: Rect,
        max_unit_price: u64,
    ) -> Result<(u64, u64)> {
        let mut tally = WorldTally::of(self.world);
        let id = tally.allocate_id()?;
        let parcel = Parcel::new(id, buyer, rect, self.world, self.now)?;
        self.require_free(&rect)?;
        require!(self.index.has_capacity(1), TerraError::IndexFull);
        self.store.check_vacant(id)?;

        let unit_price = self.world.price_per_unit;
        require_within(unit_price, max_unit_price)?;
        let cost = settlement_amount(unit_price, rect.area(), 1)?;
        tally.add_parcel(rect.area())?;

        ledger.settle(&buyer, &self.world.treasury, cost)?;

        self.store.create(parcel)?;
        tally.apply(self.world);
        self.index.register(id, rect)?;

        msg!("Parcel {} purchased by {} at {} for {}", id, buyer, rect, cost);
        Ok((id, cost))
    }

    /// Hands a parcel to `to`. Listings are cleared; a running rental stays
    /// in force until it expires.
    pub fn transfer(&mut self, id: u64, from: Pubkey, to: Pubkey) -> Result<()> {
        self.get(id)?.require_owner(&from)?;

        self.store.update(id, &from, |parcel| {
            parcel.owner = to;
            parcel.clear_listings();
        })?;

        msg!("Parcel {} transferred from {} to {}", id, from, to);
        Ok(())
    }

    /// Lists for sale at `unit_price` per unit. A parcel may be listed for
    /// sale and for rent at the same time.
    pub fn list_for_sale(&mut self, id: u64, owner: Pubkey, unit_price: u64) -> Result<()> {
        require!(unit_price > 0, TerraError::InvalidPrice);
        self.get(id)?.require_owner(&owner)?;

        self.store.update(id, &owner, |parcel| {
            parcel.sale_price_per_unit = Some(unit_price);
        })
    }

    /// Lists for rent at `unit_price` per unit per second.
    pub fn list_for_rent(&mut self, id: u64, owner: Pubkey, unit_price: u64) -> Result<()> {
        require!(unit_price > 0, TerraError::InvalidPrice);
        self.get(id)?.require_owner(&owner)?;

        self.store.update(id, &owner, |parcel| {
            parcel.rent_price_per_unit = Some(unit_price);
        })
    }

    pub fn delist(&mut self, id: u64, owner: Pubkey, kind: ListingKind) -> Result<()> {
        let parcel = self.get(id)?;
        parcel.require_owner(&owner)?;
        let listed = match kind {
            ListingKind::Sale => parcel.is_for_sale(),
            ListingKind::Rent => parcel.is_for_rent(),
        };
        require!(listed, TerraError::NotListed);

        self.store.update(id, &owner, |parcel| match kind {
            ListingKind::Sale => parcel.sale_price_per_unit = None,
            ListingKind::Rent => parcel.rent_price_per_unit = None,
        })
    }

    /// Buys a parcel listed for sale, paying the owner. Fails with
    /// `PriceExceeded` if the listing was repriced above `max_unit_price`.
    /// Returns the amount paid.
    pub fn buy_listed<L: Ledger>(
        &mut self,
        ledger: &mut L,
        id: u64,
        buyer: Pubkey,
        max_unit_price: u64,
    ) -> Result<u64> {
        let parcel = self.get(id)?;
        let unit_price = parcel.sale_price_per_unit.ok_or(TerraError::NotListed)?;
        require_within(unit_price, max_unit_price)?;
        let cost = settlement_amount(unit_price, parcel.area(), 1)?;
        let seller = parcel.owner;

        ledger.settle(&buyer, &seller, cost)?;

        self.store.update(id, &seller, |parcel| {
            parcel.owner = buyer;
            parcel.clear_listings();
        })?;

        msg!("Parcel {} sold by {} to {} for {}", id, seller, buyer, cost);
        Ok(cost)
    }

    /// Rents a parcel listed for rent for `duration_secs`, paying the owner.
    /// Ownership does not change and the rent listing stays up for the next
    /// tenant. `max_unit_price` caps the per-second rate the renter agreed
    /// to. Returns `(expires_at, amount_paid)`.
    pub fn rent_listed<L: Ledger>(
        &mut self,
        ledger: &mut L,
        id: u64,
        renter: Pubkey,
        duration_secs: u64,
        max_unit_price: u64,
    ) -> Result<(i64, u64)> {
        require!(duration_secs > 0, TerraError::InvalidDuration);
        let now = self.now;
        let parcel = self.get(id)?;
        let unit_price = parcel.rent_price_per_unit.ok_or(TerraError::NotListed)?;
        require_within(unit_price, max_unit_price)?;
        if let Some(rental) = parcel.active_rental(now) {
            msg!("Parcel {} is rented by {} until {}", id, rental.renter, rental.expires_at);
            return err!(TerraError::RentalActive);
        }
        let expires_at = expiry_after(now, duration_secs)?;
        let cost = settlement_amount(unit_price, parcel.area(), duration_secs)?;
        let owner = parcel.owner;

        ledger.settle(&renter, &owner, cost)?;

        self.store.update(id, &owner, |parcel| {
            parcel.rental = Some(Rental { renter, expires_at });
        })?;

        msg!("Parcel {} rented to {} until {} for {}", id, renter, expires_at, cost);
        Ok((expires_at, cost))
    }

    /// Drops a rental that has run out. Anyone may call it.
    pub fn clear_expired_rental(&mut self, id: u64) -> Result<Rental> {
        let parcel = self.get(id)?;
        let rental = parcel.rental.ok_or(TerraError::NotRented)?;
        require!(rental.expires_at <= self.now, TerraError::RentalActive);
        let owner = parcel.owner;

        self.store.update(id, &owner, |parcel| parcel.rental = None)?;
        Ok(rental)
    }

    /// Carves `sub_rect` out of a parcel as a new parcel with the same owner.
    /// The parent keeps the remainder. Returns `(parent_id, child_id)`.
    pub fn split(&mut self, id: u64, owner: Pubkey, sub_rect: Rect) -> Result<(u64, u64)> {
        let parent = self.get(id)?.clone();
        parent.require_owner(&owner)?;
        self.require_not_rented(&parent)?;

        let remainder = match parent.rect.split_remainder(&sub_rect) {
            Some(remainder) => remainder,
            None => {
                msg!("Cannot split {} out of parcel {} at {}", sub_rect, id, parent.rect);
                return err!(TerraError::InvalidSplit);
            }
        };
        require!(self.index.has_capacity(1), TerraError::IndexFull);

        let mut tally = WorldTally::of(self.world);
        let child_id = tally.allocate_id()?;
        tally.remove_parcel(parent.area())?;
        tally.add_parcel(remainder.area())?;
        tally.add_parcel(sub_rect.area())?;
        let child = Parcel::new(child_id, owner, sub_rect, self.world, self.now)?;
        self.store.check_vacant(child_id)?;

        self.store.create(child)?;
        self.store.update(id, &owner, |parcel| {
            parcel.rect = remainder;
            parcel.clear_listings();
        })?;
        tally.apply(self.world);
        self.index.unregister(id)?;
        self.index.register(id, remainder)?;
        self.index.register(child_id, sub_rect)?;

        msg!("Parcel {} split into {} at {} and {} at {}", id, id, remainder, child_id, sub_rect);
        Ok((id, child_id))
    }

    /// Retires two adjacent parcels of the same owner and creates one parcel
    /// covering exactly their union.
    pub fn merge(&mut self, a: u64, b: u64, owner: Pubkey) -> Result<u64> {
        require!(a != b, TerraError::NotAdjacent);
        let first = self.get(a)?.clone();
        let second = self.get(b)?.clone();
        first.require_owner(&owner)?;
        second.require_owner(&owner)?;
        self.require_not_rented(&first)?;
        self.require_not_rented(&second)?;

        let union = match first.rect.union_with(&second.rect) {
            Some(union) => union,
            None => {
                msg!("Parcels {} at {} and {} at {} do not form a rectangle", a, first.rect, b, second.rect);
                return err!(TerraError::NotAdjacent);
            }
        };

        let mut tally = WorldTally::of(self.world);
        let merged_id = tally.allocate_id()?;
        tally.remove_parcel(first.area())?;
        tally.remove_parcel(second.area())?;
        tally.add_parcel(union.area())?;
        let merged = Parcel::new(merged_id, owner, union, self.world, self.now)?;
        self.store.check_vacant(merged_id)?;

        self.store.retire(a)?;
        self.store.retire(b)?;
        self.store.create(merged)?;
        tally.apply(self.world);
        self.index.unregister(a)?;
        self.index.unregister(b)?;
        self.index.register(merged_id, union)?;

        msg!("Parcels {} and {} merged into {} at {}", a, b, merged_id, union);
        Ok(merged_id)
    }

    fn require_free(&self, rect: &Rect) -> Result<()> {
        let overlapping = self.index.query_overlap(rect);
        if !overlapping.is_empty() {
            msg!("Rect {} overlaps parcels {:?}", rect, overlapping);
            return err!(TerraError::Occupied);
        }
        Ok(())
    }

    fn require_not_rented(&self, parcel: &Parcel) -> Result<()> {
        if let Some(rental) = parcel.active_rental(self.now) {
            msg!("Parcel {} is rented by {} until {}", parcel.id, rental.renter, rental.expires_at);
            return err!(TerraError::RentalActive);
        }
        Ok(())
    }
}

fn require_within(unit_price: u64, max_unit_price: u64) -> Result<()> {
    if unit_price > max_unit_price {
        msg!("Price {} per unit exceeds offered {}", unit_price, max_unit_price);
        return err!(TerraError::PriceExceeded);
    }
    Ok(())
}
