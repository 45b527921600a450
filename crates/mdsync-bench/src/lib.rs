//! Benchmark profiles for mdsync.
//!
//! Provides pre-built [`MemoryEngine`] systems for benchmarking:
//!
//! - [`reference_profile`]: 20x20x20 melt (8K atoms, 8K bonds)
//! - [`stress_profile`]: 46x46x46 melt (~97K atoms)
//! - [`melt_profile`]: the builder behind both

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use mdsync_cell::PeriodicCell;
use mdsync_core::Vec3;
use mdsync_engine::MemoryEngine;

/// Reference profile: 20x20x20 melt.
pub fn reference_profile(seed: u64) -> MemoryEngine {
    melt_profile(20, seed)
}

/// Stress profile: 46x46x46 melt, about 12x the reference atom count.
pub fn stress_profile(seed: u64) -> MemoryEngine {
    melt_profile(46, seed)
}

/// `side`³ atoms on a jittered unit lattice in a periodic cube of edge
/// `side`, bonded into closed rings along x (open chains when `side < 3`).
///
/// Each atom is placed up to one cell length away from its lattice site
/// before folding, so about two thirds of the atoms carry nonzero image
/// flags and every row crosses the x boundary.
pub fn melt_profile(side: u32, seed: u64) -> MemoryEngine {
    let length = f64::from(side);
    let mut engine = MemoryEngine::new();
    engine.create_box(PeriodicCell::cubic(length).unwrap());

    let tag_of = |i: u32, j: u32, k: u32| (1 + i + side * (j + side * k)) as i32;
    for k in 0..side {
        for j in 0..side {
            for i in 0..side {
                let tag = tag_of(i, j, k);
                let site = [f64::from(i), f64::from(j), f64::from(k)];
                let x = displaced(site, length, seed, tag as u64);
                engine.create_atom(tag, 1 + tag % 4, x).unwrap();
            }
        }
    }
    // Rows shorter than 3 get an open chain; closing it would repeat a pair.
    let ring = side >= 3;
    for k in 0..side {
        for j in 0..side {
            for i in 0..side {
                if i + 1 < side || ring {
                    let next = (i + 1) % side;
                    engine.create_bond(tag_of(i, j, k), tag_of(next, j, k)).unwrap();
                }
            }
        }
    }
    engine
}

/// Lattice site plus deterministic jitter in `[-0.25, 0.25)` and a whole
/// number of cell lengths in `-1..=1` per axis.
fn displaced(site: Vec3, length: f64, seed: u64, tag: u64) -> Vec3 {
    let mut out = site;
    for (axis, x) in out.iter_mut().enumerate() {
        let h = mix(seed, tag * 3 + axis as u64);
        let jitter = (h % 1000) as f64 / 2000.0 - 0.25;
        let shift = ((h >> 32) % 3) as f64 - 1.0;
        *x += jitter + shift * length;
    }
    out
}

fn mix(seed: u64, i: u64) -> u64 {
    let h = seed
        .wrapping_mul(6364136223846793005)
        .wrapping_add(i.wrapping_mul(1442695040888963407));
    h ^ (h >> 29)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdsync_core::{AtomStore, Engine};

    #[test]
    fn melt_profile_counts() {
        let engine = melt_profile(4, 7);
        let atoms = engine.atoms().unwrap();
        assert_eq!(atoms.atom_count(), 64);
        assert_eq!(atoms.total_bonds(), 64);
    }

    #[test]
    fn short_rows_do_not_repeat_bonds() {
        let pair = melt_profile(2, 7);
        assert_eq!(pair.atoms().unwrap().atom_count(), 8);
        assert_eq!(pair.atoms().unwrap().total_bonds(), 4);
        assert_eq!(melt_profile(1, 7).atoms().unwrap().total_bonds(), 0);
    }

    #[test]
    fn melt_profile_is_folded() {
        let engine = melt_profile(5, 42);
        let atoms = engine.atoms().unwrap();
        for x in atoms.positions() {
            assert!(x.iter().all(|&v| (0.0..5.0).contains(&v)), "{x:?}");
        }
        let crossed = atoms
            .images()
            .unwrap()
            .iter()
            .filter(|&&w| w != <i32 as mdsync_core::ImageWord>::home())
            .count();
        assert!(crossed > 0);
    }

    #[test]
    fn melt_profile_deterministic() {
        let a = melt_profile(3, 42);
        let b = melt_profile(3, 42);
        assert_eq!(
            a.atoms().unwrap().positions(),
            b.atoms().unwrap().positions()
        );
    }

    #[test]
    fn reference_profile_size() {
        assert_eq!(reference_profile(1).atoms().unwrap().atom_count(), 8000);
    }
}
