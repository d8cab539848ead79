use anchor_lang::prelude::*;
use std::ops::RangeInclusive;
use crate::errors::TerraError;
use super::Rect;

pub const MAX_PARCELS: usize = 1024;
pub const BUCKETS_PER_SIDE: usize = 16;
pub const BUCKET_COUNT: usize = BUCKETS_PER_SIDE * BUCKETS_PER_SIDE;
pub const MASK_WORDS: usize = MAX_PARCELS / 64;

/// One registered parcel. `parcel_id == 0` marks a free slot.
#[zero_copy(unsafe)]
#[repr(C)]
pub struct IndexSlot {
    pub parcel_id: u64,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl IndexSlot {
    const EMPTY: IndexSlot = IndexSlot { parcel_id: 0, x: 0, y: 0, width: 0, height: 0 };

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn is_free(&self) -> bool {
        self.parcel_id == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    /// The edge at `rect.y`
    North,
    /// The edge at `rect.y + rect.height`
    South,
    /// The edge at `rect.x + rect.width`
    East,
    /// The edge at `rect.x`
    West,
}

/// Spatial index from world coordinates to parcel ids.
///
/// The world is cut into a 16x16 grid of buckets. Each bucket keeps a bitmask
/// of the slots whose rectangle touches it, so an overlap query only tests
/// the parcels that share a bucket with the query rectangle. The index holds
/// ids and rectangle copies only; parcel accounts stay the source of truth.
#[account(zero_copy(unsafe))]
#[repr(C)]
pub struct GridIndex {
    pub world_width: u32,
    pub world_height: u32,
    pub live: u32,
    pub _padding: [u8; 4],
    pub slots: [IndexSlot; MAX_PARCELS],
    pub buckets: [[u64; MASK_WORDS]; BUCKET_COUNT],
}

impl GridIndex {
    pub const SIZE: usize = 8 + 16 + (24 * MAX_PARCELS) + (8 * MASK_WORDS * BUCKET_COUNT); // 57368 bytes

    pub fn init(&mut self, world_width: u32, world_height: u32) {
        self.world_width = world_width;
        self.world_height = world_height;
        self.live = 0;
    }

    pub fn len(&self) -> usize {
        self.live as usize
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn has_capacity(&self, additional: usize) -> bool {
        self.len() + additional <= MAX_PARCELS
    }

    /// Ids of all parcels whose rectangle strictly intersects `rect`.
    pub fn query_overlap(&self, rect: &Rect) -> Vec<u64> {
        self.candidate_slots(rect)
            .filter(|slot| slot.rect().overlaps(rect))
            .map(|slot| slot.parcel_id)
            .collect()
    }

    pub fn is_free(&self, rect: &Rect) -> bool {
        self.candidate_slots(rect).all(|slot| !slot.rect().overlaps(rect))
    }

    /// The parcel occupying the unit cell at (x, y), if any.
    pub fn locate(&self, x: u32, y: u32) -> Option<u64> {
        let cell = Rect::new(x, y, 1, 1);
        self.candidate_slots(&cell)
            .find(|slot| slot.rect().overlaps(&cell))
            .map(|slot| slot.parcel_id)
    }

    /// Parcels sharing a positive-length segment of `edge` with the given
    /// parcel. Corner contact does not count.
    pub fn adjacent(&self, parcel_id: u64, edge: Edge) -> Result<Vec<u64>> {
        let rect = self.rect_of(parcel_id).ok_or(TerraError::NotFound)?;

        let probe = match edge {
            Edge::North if rect.y > 0 => Rect::new(rect.x, rect.y - 1, rect.width, 1),
            Edge::South if rect.bottom() < self.world_height as u64 => {
                Rect::new(rect.x, rect.y + rect.height, rect.width, 1)
            }
            Edge::West if rect.x > 0 => Rect::new(rect.x - 1, rect.y, 1, rect.height),
            Edge::East if rect.right() < self.world_width as u64 => {
                Rect::new(rect.x + rect.width, rect.y, 1, rect.height)
            }
            // On the world border
            _ => return Ok(Vec::new()),
        };

        Ok(self.query_overlap(&probe))
    }

    pub fn rect_of(&self, parcel_id: u64) -> Option<Rect> {
        self.slot_of(parcel_id).map(|i| self.slots[i].rect())
    }

    pub fn contains(&self, parcel_id: u64) -> bool {
        self.slot_of(parcel_id).is_some()
    }

    /// Live `(parcel_id, rect)` entries in slot order.
    pub fn entries(&self) -> impl Iterator<Item = (u64, Rect)> + '_ {
        self.slots
            .iter()
            .filter(|slot| !slot.is_free())
            .map(|slot| (slot.parcel_id, slot.rect()))
    }

    /// Inserts a parcel. Re-checks overlap even though callers validate first.
    pub fn register(&mut self, parcel_id: u64, rect: Rect) -> Result<()> {
        require!(parcel_id != 0, TerraError::NotFound);
        require!(
            rect.fits_within(self.world_width, self.world_height),
            TerraError::InvalidRectangle
        );
        require!(!self.contains(parcel_id), TerraError::DuplicateParcel);

        let overlapping = self.query_overlap(&rect);
        if !overlapping.is_empty() {
            msg!("Rect {} overlaps parcels {:?}", rect, overlapping);
            return err!(TerraError::Occupied);
        }

        let index = self
            .slots
            .iter()
            .position(IndexSlot::is_free)
            .ok_or(TerraError::IndexFull)?;

        self.slots[index] = IndexSlot {
            parcel_id,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        };
        self.mark_buckets(index, &rect, true);
        self.live += 1;
        Ok(())
    }

    /// Removes a parcel and returns the rectangle it was registered with.
    pub fn unregister(&mut self, parcel_id: u64) -> Result<Rect> {
        let index = self.slot_of(parcel_id).ok_or(TerraError::NotFound)?;
        let rect = self.slots[index].rect();

        self.mark_buckets(index, &rect, false);
        self.slots[index] = IndexSlot::EMPTY;
        self.live -= 1;
        Ok(rect)
    }

    fn slot_of(&self, parcel_id: u64) -> Option<usize> {
        if parcel_id == 0 {
            return None;
        }
        self.slots.iter().position(|slot| slot.parcel_id == parcel_id)
    }

    fn bucket_span(&self, rect: &Rect) -> (RangeInclusive<usize>, RangeInclusive<usize>) {
        let x0 = bucket_of(rect.x as u64, self.world_width);
        let x1 = bucket_of(rect.right().saturating_sub(1), self.world_width);
        let y0 = bucket_of(rect.y as u64, self.world_height);
        let y1 = bucket_of(rect.bottom().saturating_sub(1), self.world_height);
        (x0..=x1.max(x0), y0..=y1.max(y0))
    }

    fn mark_buckets(&mut self, slot: usize, rect: &Rect, occupied: bool) {
        let (xs, ys) = self.bucket_span(rect);
        let word = slot / 64;
        let bit = 1u64 << (slot % 64);

        for by in ys {
            for bx in xs.clone() {
                let mask = &mut self.buckets[by * BUCKETS_PER_SIDE + bx][word];
                if occupied {
                    *mask |= bit;
                } else {
                    *mask &= !bit;
                }
            }
        }
    }

    fn candidate_slots<'a>(&'a self, rect: &Rect) -> impl Iterator<Item = &'a IndexSlot> + 'a {
        let (xs, ys) = self.bucket_span(rect);
        let mut mask = [0u64; MASK_WORDS];
        for by in ys {
            for bx in xs.clone() {
                let bucket = &self.buckets[by * BUCKETS_PER_SIDE + bx];
                for (acc, bits) in mask.iter_mut().zip(bucket.iter()) {
                    *acc |= *bits;
                }
            }
        }

        mask.into_iter()
            .enumerate()
            .flat_map(|(word, bits)| SetBits(bits).map(move |bit| word * 64 + bit))
            .map(move |index| &self.slots[index])
    }
}

fn bucket_of(coord: u64, extent: u32) -> usize {
    if extent == 0 {
        return 0;
    }
    let bucket = coord * (BUCKETS_PER_SIDE as u64) / (extent as u64);
    bucket.min(BUCKETS_PER_SIDE as u64 - 1) as usize
}

/// Positions of the set bits in a word, lowest first.
struct SetBits(u64);

impl Iterator for SetBits {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let bit = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(bit)
    }
}

#[cfg(test)]
pub(crate) fn new_index(world_width: u32, world_height: u32) -> Box<GridIndex> {
    let mut index: Box<GridIndex> = Box::new(bytemuck::Zeroable::zeroed());
    index.init(world_width, world_height);
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(err: TerraError) -> anchor_lang::error::Error {
        err.into()
    }

    #[test]
    fn test_register_and_query() {
        let mut index = new_index(1000, 1000);
        index.register(1, Rect::new(0, 0, 10, 10)).unwrap();
        index.register(2, Rect::new(10, 0, 10, 10)).unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.query_overlap(&Rect::new(5, 5, 10, 10)), vec![1, 2]);
        assert_eq!(index.query_overlap(&Rect::new(0, 10, 20, 5)), Vec::<u64>::new());
        assert!(index.is_free(&Rect::new(20, 0, 5, 5)));
        assert!(!index.is_free(&Rect::new(19, 9, 5, 5)));
    }

    #[test]
    fn test_register_rejects_overlap_and_duplicates() {
        let mut index = new_index(1000, 1000);
        index.register(1, Rect::new(0, 0, 10, 10)).unwrap();

        assert_eq!(
            index.register(2, Rect::new(9, 9, 2, 2)).unwrap_err(),
            code(TerraError::Occupied)
        );
        assert_eq!(
            index.register(1, Rect::new(50, 50, 2, 2)).unwrap_err(),
            code(TerraError::DuplicateParcel)
        );
        assert_eq!(
            index.register(3, Rect::new(999, 0, 2, 2)).unwrap_err(),
            code(TerraError::InvalidRectangle)
        );
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_unregister_frees_space() {
        let mut index = new_index(1000, 1000);
        index.register(1, Rect::new(100, 100, 300, 300)).unwrap();
        assert_eq!(index.unregister(1).unwrap(), Rect::new(100, 100, 300, 300));

        assert!(index.is_empty());
        assert!(index.is_free(&Rect::new(0, 0, 1000, 1000)));
        assert_eq!(index.unregister(1).unwrap_err(), code(TerraError::NotFound));

        index.register(2, Rect::new(150, 150, 10, 10)).unwrap();
        assert_eq!(index.rect_of(2), Some(Rect::new(150, 150, 10, 10)));
        assert_eq!(index.rect_of(1), None);
    }

    #[test]
    fn test_large_parcel_found_from_any_bucket() {
        let mut index = new_index(1_000_000, 1_000_000);
        index.register(7, Rect::new(0, 0, 1_000_000, 1_000_000)).unwrap();

        assert_eq!(index.locate(999_999, 999_999), Some(7));
        assert_eq!(index.locate(0, 0), Some(7));
        assert_eq!(index.query_overlap(&Rect::new(512_345, 3, 1, 1)), vec![7]);

        index.unregister(7).unwrap();
        assert!(index.buckets.iter().flatten().all(|word| *word == 0));
    }

    #[test]
    fn test_locate() {
        let mut index = new_index(100, 100);
        index.register(4, Rect::new(10, 10, 5, 5)).unwrap();

        assert_eq!(index.locate(10, 10), Some(4));
        assert_eq!(index.locate(14, 14), Some(4));
        assert_eq!(index.locate(15, 14), None);
        assert_eq!(index.locate(9, 10), None);
    }

    #[test]
    fn test_adjacent_edges() {
        let mut index = new_index(100, 100);
        index.register(1, Rect::new(10, 10, 10, 10)).unwrap();
        index.register(2, Rect::new(20, 12, 5, 3)).unwrap(); // east
        index.register(3, Rect::new(10, 0, 4, 10)).unwrap(); // north
        index.register(4, Rect::new(15, 20, 10, 10)).unwrap(); // south, partial
        index.register(5, Rect::new(0, 20, 10, 10)).unwrap(); // corner only

        assert_eq!(index.adjacent(1, Edge::East).unwrap(), vec![2]);
        assert_eq!(index.adjacent(1, Edge::North).unwrap(), vec![3]);
        assert_eq!(index.adjacent(1, Edge::South).unwrap(), vec![4]);
        assert_eq!(index.adjacent(1, Edge::West).unwrap(), Vec::<u64>::new());
        // Border parcel has no neighbours beyond the world
        assert_eq!(index.adjacent(3, Edge::North).unwrap(), Vec::<u64>::new());
        assert_eq!(index.adjacent(9, Edge::North).unwrap_err(), code(TerraError::NotFound));
    }

    #[test]
    fn test_index_full() {
        let mut index = new_index(64, 64);
        for i in 0..MAX_PARCELS as u32 {
            index.register(i as u64 + 1, Rect::new(i % 32, i / 32, 1, 1)).unwrap();
        }

        assert!(!index.has_capacity(1));
        assert_eq!(
            index.register(5000, Rect::new(40, 40, 1, 1)).unwrap_err(),
            code(TerraError::IndexFull)
        );

        index.unregister(1).unwrap();
        assert!(index.has_capacity(1));
        index.register(5000, Rect::new(40, 40, 1, 1)).unwrap();
        assert_eq!(index.locate(40, 40), Some(5000));
    }

    #[test]
    fn test_entries_lists_live_slots() {
        let mut index = new_index(100, 100);
        index.register(1, Rect::new(0, 0, 1, 1)).unwrap();
        index.register(2, Rect::new(1, 0, 1, 1)).unwrap();
        index.register(3, Rect::new(2, 0, 1, 1)).unwrap();
        index.unregister(2).unwrap();

        let entries: Vec<_> = index.entries().collect();
        assert_eq!(entries, vec![(1, Rect::new(0, 0, 1, 1)), (3, Rect::new(2, 0, 1, 1))]);
    }
}
