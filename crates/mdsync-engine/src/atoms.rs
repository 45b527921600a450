//! Per-atom storage for the in-memory engine.

use indexmap::IndexMap;
use smallvec::SmallVec;

use mdsync_core::{AtomStore, BondTopology, ImageCounts, ImageWord, TagWord, Vec3};

/// Partner lists with inline room for four bonds per atom.
#[derive(Clone, Debug, Default)]
pub struct BondLists<T> {
    lists: Vec<SmallVec<[T; 4]>>,
}

impl<T: TagWord> BondLists<T> {
    fn push_atom(&mut self) {
        self.lists.push(SmallVec::new());
    }

    fn add(&mut self, atom: usize, partner: T) {
        if let Some(list) = self.lists.get_mut(atom) {
            list.push(partner);
        }
    }
}

impl<T: TagWord> BondTopology for BondLists<T> {
    type Tag = T;

    fn partners(&self, atom: usize) -> &[T] {
        self.lists.get(atom).map(|l| l.as_slice()).unwrap_or(&[])
    }
}

/// Atom table of a [`MemoryEngine`](crate::MemoryEngine).
///
/// Atoms are stored in creation order; that order is the local index.
#[derive(Clone, Debug)]
pub struct MemoryAtoms<T, I> {
    x: Vec<Vec3>,
    tag: Vec<T>,
    kind: Vec<i32>,
    image: Option<Vec<I>>,
    bonds: Option<BondLists<T>>,
    bond_count: u64,
    index: IndexMap<T, usize>,
}

impl<T: TagWord, I: ImageWord> Default for MemoryAtoms<T, I> {
    fn default() -> Self {
        Self {
            x: Vec::new(),
            tag: Vec::new(),
            kind: Vec::new(),
            image: Some(Vec::new()),
            bonds: Some(BondLists::default()),
            bond_count: 0,
            index: IndexMap::new(),
        }
    }
}

impl<T: TagWord, I: ImageWord> MemoryAtoms<T, I> {
    /// Append an atom. The caller guarantees `tag` is not yet present.
    pub(crate) fn push(&mut self, tag: T, kind: i32, position: Vec3, image: ImageCounts) -> usize {
        let local = self.x.len();
        self.x.push(position);
        self.tag.push(tag);
        self.kind.push(kind);
        if let Some(images) = &mut self.image {
            images.push(I::encode(image));
        }
        if let Some(bonds) = &mut self.bonds {
            bonds.push_atom();
        }
        self.index.insert(tag, local);
        local
    }

    pub(crate) fn contains(&self, tag: T) -> bool {
        self.index.contains_key(&tag)
    }

    /// Record `partner` in `owner`'s list without counting a bond.
    pub(crate) fn add_partner(&mut self, owner: usize, partner: T) {
        if let Some(bonds) = &mut self.bonds {
            bonds.add(owner, partner);
        }
    }

    pub(crate) fn count_bond(&mut self) {
        self.bond_count += 1;
    }

    pub(crate) fn image_counts(&self, local: usize) -> ImageCounts {
        self.image
            .as_ref()
            .and_then(|img| img.get(local))
            .map_or([0; 3], |w| w.decode())
    }

    pub(crate) fn place(&mut self, local: usize, position: Vec3, image: ImageCounts) {
        if let Some(x) = self.x.get_mut(local) {
            *x = position;
        }
        if let Some(w) = self.image.as_mut().and_then(|img| img.get_mut(local)) {
            *w = I::encode(image);
        }
    }

    pub(crate) fn drop_images(&mut self) {
        self.image = None;
    }

    pub(crate) fn drop_bonds(&mut self) {
        self.bonds = None;
    }
}

impl<T: TagWord, I: ImageWord> AtomStore for MemoryAtoms<T, I> {
    type Tag = T;
    type Image = I;
    type Bonds = BondLists<T>;

    fn atom_count(&self) -> usize {
        self.x.len()
    }

    fn positions(&self) -> &[Vec3] {
        &self.x
    }

    fn tags(&self) -> Option<&[T]> {
        Some(&self.tag)
    }

    fn types(&self) -> Option<&[i32]> {
        Some(&self.kind)
    }

    fn images(&self) -> Option<&[I]> {
        self.image.as_deref()
    }

    fn total_bonds(&self) -> u64 {
        self.bond_count
    }

    fn bonds(&self) -> Option<&BondLists<T>> {
        self.bonds.as_ref()
    }

    fn local_index(&self, tag: T) -> Option<usize> {
        self.index.get(&tag).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_assigns_local_order() {
        let mut atoms = MemoryAtoms::<i32, i32>::default();
        assert_eq!(atoms.push(10, 1, [0.0; 3], [0; 3]), 0);
        assert_eq!(atoms.push(4, 2, [1.0; 3], [1, 0, 0]), 1);
        assert_eq!(atoms.local_index(4), Some(1));
        assert_eq!(atoms.local_index(99), None);
        assert_eq!(atoms.tags(), Some(&[10, 4][..]));
        assert_eq!(atoms.image_counts(1), [1, 0, 0]);
    }

    #[test]
    fn partners_of_unknown_atom_are_empty() {
        let mut atoms = MemoryAtoms::<i64, i64>::default();
        atoms.push(1, 1, [0.0; 3], [0; 3]);
        atoms.add_partner(0, 2);
        atoms.add_partner(5, 2);
        let bonds = atoms.bonds().unwrap();
        assert_eq!(bonds.partners(0), &[2]);
        assert!(bonds.partners(5).is_empty());
    }

    #[test]
    fn dropped_fields_report_absent() {
        let mut atoms = MemoryAtoms::<i32, i32>::default();
        atoms.push(1, 1, [0.0; 3], [2, 0, 0]);
        atoms.drop_images();
        atoms.drop_bonds();
        assert!(atoms.images().is_none());
        assert!(atoms.bonds().is_none());
        assert_eq!(atoms.image_counts(0), [0; 3]);
    }
}
