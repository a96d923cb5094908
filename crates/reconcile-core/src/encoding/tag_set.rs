use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A member of a closed tag universe that can be encoded as a single bit.
pub trait Tag: Copy + Ord + Hash + fmt::Debug + Send + Sync + 'static {
    /// Every tag of the universe, in bit order.
    const ALL: &'static [Self];

    /// Bit position of this tag. Must be unique and below 32.
    fn index(self) -> u32;

    /// Canonical name used in configuration and serialized output.
    fn name(self) -> &'static str;

    /// Encode the tag as its single bit.
    fn bit(self) -> u32 {
        1 << self.index()
    }
}

/// A set of tags stored as a `u32` bitset.
pub struct TagSet<T: Tag> {
    bits: u32,
    _tag: PhantomData<T>,
}

impl<T: Tag> TagSet<T> {
    /// The empty set.
    pub const fn empty() -> Self {
        Self {
            bits: 0,
            _tag: PhantomData,
        }
    }

    /// A set holding exactly one tag.
    pub fn of(tag: T) -> Self {
        Self::from_bits(tag.bit())
    }

    /// Build a set from raw bits. Bits outside the universe are dropped.
    pub fn from_bits(bits: u32) -> Self {
        Self {
            bits: bits & Self::universe_mask(),
            _tag: PhantomData,
        }
    }

    fn universe_mask() -> u32 {
        T::ALL.iter().fold(0, |mask, tag| mask | tag.bit())
    }

    /// Raw bit representation.
    pub fn bits(self) -> u32 {
        self.bits
    }

    /// Set union.
    pub fn union(self, other: Self) -> Self {
        Self::from_bits(self.bits | other.bits)
    }

    /// Whether the two sets share at least one tag.
    pub fn overlaps(self, other: Self) -> bool {
        self.bits & other.bits != 0
    }

    /// Number of tags in the set.
    pub fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub fn contains(self, tag: T) -> bool {
        self.bits & tag.bit() != 0
    }

    pub fn insert(&mut self, tag: T) {
        self.bits |= tag.bit();
    }

    /// Iterate the tags in the set in bit order.
    pub fn iter(self) -> impl Iterator<Item = T> {
        T::ALL.iter().copied().filter(move |tag| self.contains(*tag))
    }

    /// Decode into an ordered set of tags.
    pub fn decode(self) -> BTreeSet<T> {
        self.iter().collect()
    }

    /// The smallest tag in the set, if any.
    pub fn first(self) -> Option<T> {
        self.iter().next()
    }
}

impl<T: Tag> Clone for TagSet<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Tag> Copy for TagSet<T> {}

impl<T: Tag> Default for TagSet<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Tag> PartialEq for TagSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<T: Tag> Eq for TagSet<T> {}

impl<T: Tag> Hash for TagSet<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.bits.hash(state);
    }
}

impl<T: Tag> PartialOrd for TagSet<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Tag> Ord for TagSet<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.bits.cmp(&other.bits)
    }
}

impl<T: Tag> fmt::Debug for TagSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.iter().map(|tag| tag.name()))
            .finish()
    }
}

impl<T: Tag> FromIterator<T> for TagSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::empty();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

impl<T: Tag + Serialize> Serialize for TagSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T: Tag + DeserializeOwned> Deserialize<'de> for TagSet<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tags = Vec::<T>::deserialize(deserializer)?;
        Ok(tags.into_iter().collect())
    }
}
