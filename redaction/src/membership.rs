use std::collections::HashSet;

/// An unordered view over preimage values supporting exact byte-wise lookups.
/// Values are borrowed from the preimage space the set was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreimageSet<'a> {
    values: HashSet<&'a [u8]>,
}

impl<'a> PreimageSet<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value`, returning false if an identical value was already present
    pub fn insert(&mut self, value: &'a [u8]) -> bool {
        self.values.insert(value)
    }

    pub fn contains(&self, value: &[u8]) -> bool {
        self.values.contains(value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'a> FromIterator<&'a [u8]> for PreimageSet<'a> {
    fn from_iter<I: IntoIterator<Item = &'a [u8]>>(iter: I) -> Self {
        Self { values: iter.into_iter().collect() }
    }
}

/// Returns true iff `value` is byte-for-byte equal to some element of `set`.
/// No prefix, suffix, or normalized matching is performed.
pub fn member_of(value: &[u8], set: &PreimageSet<'_>) -> bool {
    set.contains(value)
}
