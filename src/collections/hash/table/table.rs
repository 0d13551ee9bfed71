use std::borrow::Borrow;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{BuildHasher, Hash, RandomState};
use std::iter;
use std::mem;

use log::trace;

use super::{IntoKeys, IntoValues, Iter, IterMut, Keys, Values, ValuesMut};
use crate::collections::CapacityOverflow;
use crate::collections::contiguous::Buffer;
use crate::util::fmt::DebugRaw;
use crate::util::result::ResultExtension;

/// The capacity used by [`Table::new`].
pub const DEFAULT_CAP: usize = 8;

const GROWTH_FACTOR: usize = 2;

const LOAD_FACTOR_NUMERATOR: usize = 3;
const LOAD_FACTOR_DENOMINATOR: usize = 4;

/// A map of keys to values, stored in a single array of slots and probed linearly.
///
/// The hash and equality of keys come from `K`'s [`Hash`] and [`Eq`] implementations, while the
/// hashing algorithm is supplied by `B`. Each occupied slot caches the hash of its key, so resizing
/// never rehashes a key.
///
/// Removed entries leave a tombstone rather than an empty slot. Lookups probe past tombstones and
/// only stop at a matching key or at a slot that has never been used, so removing one entry can't
/// hide another that collided with it. Insertions reuse the first tombstone on their probe path.
///
/// The number of entries never exceeds 3/4 of the capacity. Before each insertion the table
/// doubles (to the next power of two) once it has reached that ceiling, or rehashes in place if
/// tombstones alone have filled it.
///
/// It is a logic error for keys in a Table to be manipulated in a way that changes their hash.
/// Because of this, Table's API prevents mutable access to its keys.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of entries in the Table.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `set` | `O(1)`**, `O(n)` |
/// | `get` | `O(1)`* |
/// | `remove` | `O(1)`* |
/// | `contains` | `O(1)`* |
/// | `reserve` | `O(n)`***, `O(1)` |
///
/// \* In the event of a hash collision, these functions will take additional time, while the
/// probe walks to a matching or never-used slot.
///
/// \** If the Table has reached its load ceiling, `set` will take `O(n)`. \* applies as well.
///
/// \*** If the Table has enough capacity for the additional entries already, `reserve` is `O(1)`.
pub struct Table<K, V, B = RandomState> {
    pub(crate) slots: Buffer<Slot<K, V>>,
    pub(crate) len: usize,
    pub(crate) tombstones: usize,
    pub(crate) hasher: B,
}

pub(crate) enum Slot<K, V> {
    /// Never occupied since the last rehash. Terminates probing.
    Vacant,
    /// Occupied once, then removed. Probing continues past it.
    Tombstone,
    Occupied { hash: u64, key: K, value: V },
}

impl<K: Hash + Eq, V> Table<K, V> {
    /// Creates a new Table with capacity [`DEFAULT_CAP`] and a randomly seeded hasher.
    ///
    /// # Examples
    /// ```
    /// # use bricks::collections::hash::Table;
    /// let table: Table<&str, u32> = Table::new();
    /// assert_eq!(table.len(), 0);
    /// assert_eq!(table.cap(), 8);
    /// ```
    pub fn new() -> Table<K, V> {
        Table::with_cap_and_hasher(DEFAULT_CAP, RandomState::new())
    }

    /// Creates a new Table with `cap` slots, rounded up to a power of two, and a randomly seeded
    /// hasher.
    ///
    /// # Panics
    /// Panics if the rounded capacity overflows.
    pub fn with_cap(cap: usize) -> Table<K, V> {
        Table::with_cap_and_hasher(cap, RandomState::new())
    }
}

impl<K: Hash + Eq, V, B: BuildHasher> Table<K, V, B> {
    /// Creates a new Table with capacity [`DEFAULT_CAP`] and the provided `hasher`.
    pub fn with_hasher(hasher: B) -> Table<K, V, B> {
        Table::with_cap_and_hasher(DEFAULT_CAP, hasher)
    }

    /// Creates a new Table with `cap` slots, rounded up to a power of two, and the provided
    /// `hasher`.
    ///
    /// # Panics
    /// Panics if the rounded capacity overflows.
    pub fn with_cap_and_hasher(cap: usize, hasher: B) -> Table<K, V, B> {
        let cap = cap.max(1).checked_next_power_of_two().ok_or(CapacityOverflow).throw();

        Table {
            slots: vacant_slots(cap),
            len: 0,
            tombstones: 0,
            hasher,
        }
    }

    /// Returns the number of entries in the Table.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the Table contains no entries.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots in the Table.
    pub const fn cap(&self) -> usize {
        self.slots.len()
    }

    /// Returns a reference to the Table's [`BuildHasher`].
    pub const fn hasher(&self) -> &B {
        &self.hasher
    }

    /// Associates `value` with `key`, returning the previous value if the key was already
    /// present. As with the standard library, an existing key isn't replaced.
    ///
    /// # Panics
    /// Panics if growing the Table would overflow its capacity.
    ///
    /// # Examples
    /// ```
    /// # use bricks::collections::hash::Table;
    /// let mut table = Table::new();
    /// assert_eq!(table.set("key", 8), None);
    /// assert_eq!(table.set("key", 9), Some(8));
    /// assert_eq!(table.get("key"), Some(&9));
    /// ```
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        self.make_room();

        let hash = self.hasher.hash_one(&key);
        match self.probe(hash, &key) {
            Ok(index) => {
                let Slot::Occupied { value: existing, .. } = &mut self.slots[index] else {
                    unreachable!("probe matched a slot without an entry");
                };
                Some(mem::replace(existing, value))
            },
            Err(Some(index)) => {
                if let Slot::Tombstone = self.slots[index] {
                    self.tombstones -= 1;
                }
                self.slots[index] = Slot::Occupied { hash, key, value };
                self.len += 1;
                None
            },
            Err(None) => unreachable!("no free slot in a Table below its load ceiling"),
        }
    }

    /// Returns a reference to the value associated with `key`, or None if the Table contains no
    /// entry for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_entry(key).map(|(_, v)| v)
    }

    /// Returns the entry for `key` as a key-value pair, or None if there is no entry.
    pub fn get_entry<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match &self.slots[self.locate(key)?] {
            Slot::Occupied { key, value, .. } => Some((key, value)),
            _ => None,
        }
    }

    /// Returns a mutable reference to the value associated with `key`, or None if the Table
    /// contains no entry for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.locate(key)?;
        match &mut self.slots[index] {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Returns true if there is a value associated with `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.locate(key).is_some()
    }

    /// Removes the entry associated with `key`, returning it if it exists. The slot becomes a
    /// tombstone.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.locate(key)?;
        let Slot::Occupied { key, value, .. } = mem::replace(&mut self.slots[index], Slot::Tombstone)
        else {
            unreachable!("located a slot without an entry");
        };

        self.len -= 1;
        self.tombstones += 1;
        Some((key, value))
    }

    /// Removes the entry associated with `key`, returning the value if it exists.
    ///
    /// # Examples
    /// ```
    /// # use bricks::collections::hash::Table;
    /// let mut table = Table::new();
    /// table.set(1, "one");
    /// assert_eq!(table.remove(&1), Some("one"));
    /// assert_eq!(table.remove(&1), None);
    /// assert!(table.is_empty());
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Increases the capacity of the Table so that `len + extra` entries fit without growing.
    ///
    /// # Panics
    /// Panics if the required capacity overflows.
    pub fn reserve(&mut self, extra: usize) {
        let required = self.len.checked_add(extra).ok_or(CapacityOverflow).throw();

        let mut new_cap = self.cap();
        while load_limit(new_cap) < required {
            new_cap = new_cap.checked_mul(GROWTH_FACTOR).ok_or(CapacityOverflow).throw();
        }

        if new_cap != self.cap() {
            self.rehash(new_cap);
        }
    }

    /// Returns an iterator over all key-value pairs in the Table, as references.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.into_iter()
    }

    /// Returns an iterator over all key-value pairs in the Table, with mutable references to the
    /// values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        self.into_iter()
    }

    /// Returns an iterator over all keys in the Table, as references.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    /// Consumes self and returns an iterator over all contained keys.
    pub fn into_keys(self) -> IntoKeys<K, V> {
        IntoKeys(self.into_iter())
    }

    /// Returns an iterator over all values in the Table, as references.
    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }

    /// Returns an iterator over all values in the Table, as mutable references.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut(self.iter_mut())
    }

    /// Consumes self and returns an iterator over all contained values.
    pub fn into_values(self) -> IntoValues<K, V> {
        IntoValues(self.into_iter())
    }
}

impl<K: Hash + Eq, V, B: BuildHasher> Table<K, V, B> {
    /// Ensures that the next insertion stays within the load ceiling and has a free slot to use.
    pub(crate) fn make_room(&mut self) {
        let limit = load_limit(self.cap());

        if self.len >= limit {
            let new_cap = self.cap().checked_mul(GROWTH_FACTOR).ok_or(CapacityOverflow).throw();
            self.rehash(new_cap);
        } else if self.len + self.tombstones >= limit {
            self.rehash(self.cap());
        }
    }

    /// Moves every entry into a fresh array of `new_cap` vacant slots, placing each by its cached
    /// hash. All tombstones are discarded.
    pub(crate) fn rehash(&mut self, new_cap: usize) {
        trace!(
            "Table rehashing from {} to {} slots ({} entries, {} tombstones)",
            self.cap(),
            new_cap,
            self.len,
            self.tombstones
        );

        let old_slots = mem::replace(&mut self.slots, vacant_slots(new_cap));
        self.tombstones = 0;

        for slot in old_slots {
            if let Slot::Occupied { hash, key, value } = slot {
                let index = self.first_vacant(hash);
                self.slots[index] = Slot::Occupied { hash, key, value };
            }
        }
    }

    /// The slot where probing for `hash` starts.
    pub(crate) const fn home(&self, hash: u64) -> usize {
        (hash % self.cap() as u64) as usize
    }

    /// Walks the probe sequence for `key`. Returns `Ok` with the index of the matching entry, or
    /// `Err` with the first tombstone or vacant slot seen on the way, which is where `key` belongs.
    ///
    /// At most `cap` slots are visited.
    pub(crate) fn probe<Q>(&self, hash: u64, key: &Q) -> Result<usize, Option<usize>>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let mut index = self.home(hash);
        let mut free = None;

        for _ in 0..self.cap() {
            match &self.slots[index] {
                Slot::Vacant => return Err(free.or(Some(index))),
                Slot::Tombstone => {
                    free.get_or_insert(index);
                },
                Slot::Occupied { hash: existing_hash, key: existing, .. } => {
                    // The cached hash rules out most mismatches before comparing keys.
                    if *existing_hash == hash && existing.borrow() == key {
                        return Ok(index);
                    }
                },
            }
            index = (index + 1) % self.cap();
        }

        Err(free)
    }

    /// Finds the index of the entry for `key`, if there is one.
    pub(crate) fn locate<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.probe(self.hasher.hash_one(key), key).ok()
    }

    /// Finds the first vacant slot on the probe sequence for `hash`. Only valid while rehashing,
    /// when there are no tombstones and no duplicate keys to look for.
    fn first_vacant(&self, hash: u64) -> usize {
        let mut index = self.home(hash);
        while !matches!(self.slots[index], Slot::Vacant) {
            index = (index + 1) % self.cap();
        }
        index
    }
}

/// The maximum number of entries a Table with `cap` slots may hold.
pub(crate) const fn load_limit(cap: usize) -> usize {
    cap * LOAD_FACTOR_NUMERATOR / LOAD_FACTOR_DENOMINATOR
}

fn vacant_slots<K, V>(cap: usize) -> Buffer<Slot<K, V>> {
    let mut slots = Buffer::with_start_cap(cap);
    slots.push_array(iter::repeat_with(|| Slot::Vacant).take(cap));
    slots
}

impl<K: Hash + Eq, V> Default for Table<K, V> {
    fn default() -> Self {
        Table::new()
    }
}

impl<K: Hash + Eq, V, B: BuildHasher> Extend<(K, V)> for Table<K, V, B> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for Table<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Table::new();
        table.extend(iter);
        table
    }
}

impl<K: Debug, V: Debug, B: Debug> Debug for Table<K, V, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let slots: Buffer<DebugRaw> = self
            .slots
            .iter()
            .map(|slot| match slot {
                Slot::Occupied { key, value, .. } => DebugRaw(format!("({key:?}: {value:?})")),
                Slot::Tombstone => DebugRaw("~".into()),
                Slot::Vacant => DebugRaw("-".into()),
            })
            .collect();

        f.debug_struct("Table")
            .field("slots", &&*slots)
            .field("len", &self.len)
            .field("tombstones", &self.tombstones)
            .field("cap", &self.slots.len())
            .field("hasher", &self.hasher)
            .finish()
    }
}

impl<K: Debug, V: Debug, B> Display for Table<K, V, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.slots.iter().filter_map(|slot| match slot {
                Slot::Occupied { key, value, .. } => Some((key, value)),
                _ => None,
            }))
            .finish()
    }
}
