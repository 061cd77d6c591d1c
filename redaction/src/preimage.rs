use crate::membership::PreimageSet;
use erasure_protowire::common::Block;

/// The ordered, duplicate-tolerant sequence of cleartext values carried by a block
/// alongside its data. Order and multiplicity are preserved as attached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreimageSpace(Vec<Vec<u8>>);

impl PreimageSpace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[u8]> {
        self.0.iter().map(Vec::as_slice)
    }

    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.0.get(index).map(Vec::as_slice)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Vec<u8>> {
        self.0.get_mut(index)
    }

    pub fn push(&mut self, value: impl Into<Vec<u8>>) {
        self.0.push(value.into())
    }

    pub fn as_slice(&self) -> &[Vec<u8>] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<Vec<u8>> {
        self.0
    }

    /// Builds the membership view used for validation
    pub fn to_set(&self) -> PreimageSet<'_> {
        self.iter().collect()
    }
}

impl From<Vec<Vec<u8>>> for PreimageSpace {
    fn from(values: Vec<Vec<u8>>) -> Self {
        Self(values)
    }
}

impl From<PreimageSpace> for Vec<Vec<u8>> {
    fn from(space: PreimageSpace) -> Self {
        space.0
    }
}

impl FromIterator<Vec<u8>> for PreimageSpace {
    fn from_iter<I: IntoIterator<Item = Vec<u8>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Returns the preimage space attached to `block`, or an empty space when the block
/// carries no data or nothing was attached.
pub fn extract_preimages(block: &Block) -> PreimageSpace {
    PreimageSpace(block.preimage_space().to_vec())
}
