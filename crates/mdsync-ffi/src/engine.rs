//! Population of the in-memory engine behind a bridge.
//!
//! These calls stand in for the input script of a native engine: the
//! host defines the cell, places atoms and lists bonds directly. All of
//! them require a started bridge and return `MD_STATUS_NOT_STARTED`
//! otherwise.

use mdsync_cell::PeriodicCell;
use mdsync_core::Vec3;
use mdsync_engine::MemoryEngine;

use crate::bridge::get_bridge;
use crate::status::{code, MdStatus};

/// Read three doubles from a non-null pointer.
#[allow(unsafe_code)]
fn read_vec3(ptr: *const f64) -> Option<Vec3> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: ptr is non-null and, per caller contract, points to 3 f64s.
    let s = unsafe { std::slice::from_raw_parts(ptr, 3) };
    Some([s[0], s[1], s[2]])
}

/// Borrow `n` elements from a pointer that may be null only when `n == 0`.
#[allow(unsafe_code)]
fn read_slice<'a, T>(ptr: *const T, n: usize) -> Option<&'a [T]> {
    if n == 0 {
        return Some(&[]);
    }
    if ptr.is_null() {
        return None;
    }
    // SAFETY: ptr is non-null and, per caller contract, points to n
    // elements that outlive this call.
    Some(unsafe { std::slice::from_raw_parts(ptr, n) })
}

/// Run `f` on the started engine behind `bridge_handle`.
fn with_engine(bridge_handle: u64, f: impl FnOnce(&mut MemoryEngine) -> i32) -> i32 {
    let Some(bridge_arc) = get_bridge(bridge_handle) else {
        return MdStatus::InvalidHandle as i32;
    };
    let mut bridge = ffi_lock!(bridge_arc);
    match bridge.engine_mut() {
        Some(engine) => f(engine),
        None => MdStatus::NotStarted as i32,
    }
}

/// Define the simulation cell, discarding existing atoms.
///
/// `lo` and `hi` point to 3 doubles each. `tilt` points to the xy, xz
/// and yz tilt factors, or is null for an orthogonal cell. Bits 0, 1 and
/// 2 of `periodic_mask` make x, y and z periodic.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn md_engine_create_box(
    bridge_handle: u64,
    lo: *const f64,
    hi: *const f64,
    tilt: *const f64,
    periodic_mask: u32,
) -> i32 {
    ffi_guard!({
        let (Some(lo), Some(hi)) = (read_vec3(lo), read_vec3(hi)) else {
            return MdStatus::InvalidArgument as i32;
        };
        let periodic = [0, 1, 2].map(|axis| periodic_mask & (1 << axis) != 0);
        let cell = match read_vec3(tilt) {
            Some(tilt) => PeriodicCell::triclinic(lo, hi, tilt, periodic),
            None => PeriodicCell::orthogonal(lo, hi, periodic),
        };
        let cell = match cell {
            Ok(c) => c,
            Err(e) => return MdStatus::from(&e) as i32,
        };
        with_engine(bridge_handle, |engine| {
            engine.create_box(cell);
            MdStatus::Ok as i32
        })
    })
}

/// Add `n` atoms. `tags` and `types` hold `n` values each, `positions`
/// holds `3 * n` doubles.
///
/// Positions outside the cell are folded in and their image counts
/// recorded. Stops at the first failing atom; atoms before it remain.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn md_engine_create_atoms(
    bridge_handle: u64,
    n: usize,
    tags: *const i32,
    types: *const i32,
    positions: *const f64,
) -> i32 {
    ffi_guard!({
        let Some(scalars) = n.checked_mul(3) else {
            return MdStatus::InvalidArgument as i32;
        };
        let (Some(tags), Some(types), Some(positions)) = (
            read_slice(tags, n),
            read_slice(types, n),
            read_slice(positions, scalars),
        ) else {
            return MdStatus::InvalidArgument as i32;
        };
        with_engine(bridge_handle, |engine| {
            for ((&tag, &kind), x) in tags.iter().zip(types).zip(positions.chunks_exact(3)) {
                if let Err(e) = engine.create_atom(tag, kind, [x[0], x[1], x[2]]) {
                    return MdStatus::from(&e) as i32;
                }
            }
            MdStatus::Ok as i32
        })
    })
}

/// Add `n` bonds given as `2 * n` atom identifiers, pairwise.
///
/// Stops at the first bond naming an unknown atom.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn md_engine_create_bonds(bridge_handle: u64, n: usize, pairs: *const i32) -> i32 {
    ffi_guard!({
        let Some(pairs) = n.checked_mul(2).and_then(|len| read_slice(pairs, len)) else {
            return MdStatus::InvalidArgument as i32;
        };
        with_engine(bridge_handle, |engine| {
            for pair in pairs.chunks_exact(2) {
                if let Err(e) = engine.create_bond(pair[0], pair[1]) {
                    return MdStatus::from(&e) as i32;
                }
            }
            MdStatus::Ok as i32
        })
    })
}

/// Set whether bonds created from now on are listed once (nonzero) or
/// under both atoms (zero).
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn md_engine_set_symmetric_bonds(bridge_handle: u64, enabled: u8) -> i32 {
    ffi_guard!({
        with_engine(bridge_handle, |engine| {
            engine.set_symmetric_bond_sharing(enabled != 0);
            MdStatus::Ok as i32
        })
    })
}

/// Move atom `tag` by the 3 doubles at `displacement`, refolding it into
/// the cell.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn md_engine_displace_atom(
    bridge_handle: u64,
    tag: i32,
    displacement: *const f64,
) -> i32 {
    ffi_guard!({
        let Some(displacement) = read_vec3(displacement) else {
            return MdStatus::InvalidArgument as i32;
        };
        with_engine(bridge_handle, |engine| {
            code(engine.displace(tag, displacement))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::{md_bridge_create, md_bridge_destroy, md_bridge_start};
    use mdsync_core::{AtomStore, Engine};

    fn started() -> u64 {
        let mut h = 0u64;
        assert_eq!(md_bridge_create(0, 0, std::ptr::null(), &mut h), 0);
        assert_eq!(md_bridge_start(h), 0);
        h
    }

    fn cube(h: u64) {
        let (lo, hi) = ([0.0; 3], [10.0; 3]);
        assert_eq!(
            md_engine_create_box(h, lo.as_ptr(), hi.as_ptr(), std::ptr::null(), 0b111),
            0
        );
    }

    fn atom_count(h: u64) -> usize {
        let bridge = get_bridge(h).unwrap();
        let bridge = bridge.lock().unwrap();
        bridge
            .engine()
            .and_then(|e| e.atoms())
            .map_or(0, |a| a.atom_count())
    }

    #[test]
    fn requires_started_bridge() {
        let mut h = 0u64;
        assert_eq!(md_bridge_create(0, 0, std::ptr::null(), &mut h), 0);
        assert_eq!(
            md_engine_set_symmetric_bonds(h, 1),
            MdStatus::NotStarted as i32
        );
        md_bridge_destroy(h);
        assert_eq!(
            md_engine_set_symmetric_bonds(h, 1),
            MdStatus::InvalidHandle as i32
        );
    }

    #[test]
    fn degenerate_box_is_rejected() {
        let h = started();
        let (lo, hi) = ([0.0; 3], [10.0, 0.0, 10.0]);
        assert_eq!(
            md_engine_create_box(h, lo.as_ptr(), hi.as_ptr(), std::ptr::null(), 0b111),
            MdStatus::InvalidCell as i32
        );
        assert_eq!(
            md_engine_create_box(h, std::ptr::null(), hi.as_ptr(), std::ptr::null(), 0),
            MdStatus::InvalidArgument as i32
        );
        md_bridge_destroy(h);
    }

    #[test]
    fn atoms_before_box_fail() {
        let h = started();
        let (tags, types, x) = ([1], [1], [1.0, 1.0, 1.0]);
        assert_eq!(
            md_engine_create_atoms(h, 1, tags.as_ptr(), types.as_ptr(), x.as_ptr()),
            MdStatus::NoSimulationBox as i32
        );
        md_bridge_destroy(h);
    }

    #[test]
    fn atoms_and_bonds_are_created() {
        let h = started();
        cube(h);
        let (tags, types) = ([1, 2, 3], [1, 1, 2]);
        let x = [1.0, 1.0, 1.0, 2.0, 1.0, 1.0, 11.0, 1.0, 1.0];
        assert_eq!(
            md_engine_create_atoms(h, 3, tags.as_ptr(), types.as_ptr(), x.as_ptr()),
            0
        );
        assert_eq!(atom_count(h), 3);

        let pairs = [1, 2, 2, 3];
        assert_eq!(md_engine_create_bonds(h, 2, pairs.as_ptr()), 0);
        let unknown = [1, 42];
        assert_eq!(
            md_engine_create_bonds(h, 1, unknown.as_ptr()),
            MdStatus::UnknownTag as i32
        );

        let bridge = get_bridge(h).unwrap();
        let bridge = bridge.lock().unwrap();
        let atoms = bridge.engine().unwrap().atoms().unwrap();
        assert_eq!(atoms.total_bonds(), 2);
        // Third atom was folded back into the cell.
        assert!((atoms.positions()[2][0] - 1.0).abs() < 1e-12);
        drop(bridge);
        md_bridge_destroy(h);
    }

    #[test]
    fn duplicate_tag_stops_creation() {
        let h = started();
        cube(h);
        let (tags, types) = ([1, 1, 2], [1, 1, 1]);
        let x = [1.0; 9];
        assert_eq!(
            md_engine_create_atoms(h, 3, tags.as_ptr(), types.as_ptr(), x.as_ptr()),
            MdStatus::DuplicateTag as i32
        );
        assert_eq!(atom_count(h), 1);
        md_bridge_destroy(h);
    }

    #[test]
    fn zero_atoms_accept_null_arrays() {
        let h = started();
        cube(h);
        assert_eq!(
            md_engine_create_atoms(h, 0, std::ptr::null(), std::ptr::null(), std::ptr::null()),
            0
        );
        assert_eq!(
            md_engine_create_atoms(h, 1, std::ptr::null(), std::ptr::null(), std::ptr::null()),
            MdStatus::InvalidArgument as i32
        );
        md_bridge_destroy(h);
    }

    #[test]
    fn displace_unknown_atom() {
        let h = started();
        cube(h);
        let d = [1.0, 0.0, 0.0];
        assert_eq!(
            md_engine_displace_atom(h, 5, d.as_ptr()),
            MdStatus::UnknownTag as i32
        );
        md_bridge_destroy(h);
    }
}
