//! Bridge lifecycle FFI: create, start, advance, commands, status, sync, destroy.
//!
//! Each bridge sits behind its own `Arc<Mutex<_>>`, so the global
//! `BRIDGES` table lock is only held for handle lookup and different
//! bridges can be driven from different threads.
//!
//! Snapshot views written by the `md_bridge_sync_*` functions point into
//! buffers owned by the bridge. They remain valid until the next call on
//! the same bridge handle.

use std::ffi::CStr;
use std::os::raw::c_char;
use std::path::Path;
use std::sync::{Arc, Mutex};

use mdsync_bridge::Bridge;
use mdsync_engine::MemoryLauncher;
use mdsync_snapshot::SessionConfig;

use crate::handle::HandleTable;
use crate::status::{code, MdStatus};
use crate::types::{MdBondSnapshot, MdBoxSnapshot, MdParticleSnapshot, MdStatusInfo};

pub(crate) type HostBridge = Bridge<MemoryLauncher>;
type BridgeArc = Arc<Mutex<HostBridge>>;

static BRIDGES: Mutex<HandleTable<BridgeArc>> = Mutex::new(HandleTable::new());

/// Clone the Arc for a bridge handle, briefly locking the global table.
///
/// Returns `None` if the handle is invalid or the mutex is poisoned.
pub(crate) fn get_bridge(handle: u64) -> Option<BridgeArc> {
    BRIDGES.lock().ok()?.get(handle).cloned()
}

/// Read a non-null C string as UTF-8.
#[allow(unsafe_code)]
pub(crate) fn c_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: ptr is non-null and, per caller contract, a valid
    // null-terminated string that outlives this call.
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

// ── Lifecycle ───────────────────────────────────────────────────

/// Create a bridge with no running engine.
///
/// `particle_capacity` and `bond_capacity` pre-size the capture buffers.
/// `image_label` may be null for the default label.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn md_bridge_create(
    particle_capacity: u64,
    bond_capacity: u64,
    image_label: *const c_char,
    bridge_out: *mut u64,
) -> i32 {
    ffi_guard!({
        if bridge_out.is_null() {
            return MdStatus::InvalidArgument as i32;
        }
        let (Ok(particle_capacity), Ok(bond_capacity)) = (
            usize::try_from(particle_capacity),
            usize::try_from(bond_capacity),
        ) else {
            return MdStatus::InvalidArgument as i32;
        };
        let mut config = SessionConfig {
            particle_capacity,
            bond_capacity,
            ..SessionConfig::default()
        };
        if !image_label.is_null() {
            match c_str(image_label) {
                Some(label) => config.image_label = label.to_owned(),
                None => return MdStatus::InvalidArgument as i32,
            }
        }

        let bridge = match Bridge::new(MemoryLauncher::new(), config) {
            Ok(b) => b,
            Err(e) => return MdStatus::from(&e) as i32,
        };
        let handle = ffi_lock!(BRIDGES).insert(Arc::new(Mutex::new(bridge)));
        // SAFETY: bridge_out is valid per caller contract.
        unsafe { *bridge_out = handle };
        MdStatus::Ok as i32
    })
}

/// Destroy a bridge, stopping its engine and releasing its buffers.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn md_bridge_destroy(bridge_handle: u64) -> i32 {
    ffi_guard!({
        match ffi_lock!(BRIDGES).remove(bridge_handle) {
            Some(_) => MdStatus::Ok as i32,
            None => MdStatus::InvalidHandle as i32,
        }
    })
}

/// Open a fresh engine instance, replacing any running one.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn md_bridge_start(bridge_handle: u64) -> i32 {
    ffi_guard!({
        let Some(bridge_arc) = get_bridge(bridge_handle) else {
            return MdStatus::InvalidHandle as i32;
        };
        let mut bridge = ffi_lock!(bridge_arc);
        code(bridge.start())
    })
}

/// Close the engine instance and reset the capture buffers.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn md_bridge_stop(bridge_handle: u64) -> i32 {
    ffi_guard!({
        let Some(bridge_arc) = get_bridge(bridge_handle) else {
            return MdStatus::InvalidHandle as i32;
        };
        ffi_lock!(bridge_arc).stop();
        MdStatus::Ok as i32
    })
}

/// Run the engine for `steps` timesteps. Nonzero `run_pre` / `run_post`
/// request the engine's full setup and summary around the run.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn md_bridge_advance(
    bridge_handle: u64,
    steps: u64,
    run_pre: u8,
    run_post: u8,
) -> i32 {
    ffi_guard!({
        let Some(bridge_arc) = get_bridge(bridge_handle) else {
            return MdStatus::InvalidHandle as i32;
        };
        let mut bridge = ffi_lock!(bridge_arc);
        code(bridge.advance(steps, run_pre != 0, run_post != 0))
    })
}

// ── Commands ────────────────────────────────────────────────────

/// Execute one command line.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn md_bridge_run_command(bridge_handle: u64, command: *const c_char) -> i32 {
    ffi_guard!({
        let Some(command) = c_str(command) else {
            return MdStatus::InvalidArgument as i32;
        };
        let Some(bridge_arc) = get_bridge(bridge_handle) else {
            return MdStatus::InvalidHandle as i32;
        };
        let mut bridge = ffi_lock!(bridge_arc);
        code(bridge.run_command(command))
    })
}

/// Execute a script file.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn md_bridge_run_file(bridge_handle: u64, path: *const c_char) -> i32 {
    ffi_guard!({
        let Some(path) = c_str(path) else {
            return MdStatus::InvalidArgument as i32;
        };
        let Some(bridge_arc) = get_bridge(bridge_handle) else {
            return MdStatus::InvalidHandle as i32;
        };
        let mut bridge = ffi_lock!(bridge_arc);
        code(bridge.run_file(Path::new(path)))
    })
}

// ── Status ──────────────────────────────────────────────────────

/// Write the bridge's readiness and engine clock to `status_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn md_bridge_status(bridge_handle: u64, status_out: *mut MdStatusInfo) -> i32 {
    ffi_guard!({
        if status_out.is_null() {
            return MdStatus::InvalidArgument as i32;
        }
        let Some(bridge_arc) = get_bridge(bridge_handle) else {
            return MdStatus::InvalidHandle as i32;
        };
        let bridge = ffi_lock!(bridge_arc);
        let info = MdStatusInfo {
            ready: u8::from(bridge.is_ready()),
            running: u8::from(bridge.is_running()),
            current_step: bridge.current_step().0,
            timestep: bridge.timestep(),
        };
        // SAFETY: status_out is valid per caller contract.
        unsafe { *status_out = info };
        MdStatus::Ok as i32
    })
}

// ── Capture ─────────────────────────────────────────────────────

/// Capture per-atom state. Nonzero `wrapped` publishes folded positions.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn md_bridge_sync_particles(
    bridge_handle: u64,
    wrapped: u8,
    snapshot_out: *mut MdParticleSnapshot,
) -> i32 {
    ffi_guard!({
        if snapshot_out.is_null() {
            return MdStatus::InvalidArgument as i32;
        }
        let Some(bridge_arc) = get_bridge(bridge_handle) else {
            return MdStatus::InvalidHandle as i32;
        };
        let mut bridge = ffi_lock!(bridge_arc);
        let snapshot = MdParticleSnapshot::from(&bridge.sync_particles(wrapped != 0));
        // SAFETY: snapshot_out is valid per caller contract.
        unsafe { *snapshot_out = snapshot };
        MdStatus::Ok as i32
    })
}

/// Capture bond segments. Nonzero `wrapped` joins folded positions.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn md_bridge_sync_bonds(
    bridge_handle: u64,
    wrapped: u8,
    snapshot_out: *mut MdBondSnapshot,
) -> i32 {
    ffi_guard!({
        if snapshot_out.is_null() {
            return MdStatus::InvalidArgument as i32;
        }
        let Some(bridge_arc) = get_bridge(bridge_handle) else {
            return MdStatus::InvalidHandle as i32;
        };
        let mut bridge = ffi_lock!(bridge_arc);
        let snapshot = MdBondSnapshot::from(&bridge.sync_bonds(wrapped != 0));
        // SAFETY: snapshot_out is valid per caller contract.
        unsafe { *snapshot_out = snapshot };
        MdStatus::Ok as i32
    })
}

/// Capture the simulation cell.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn md_bridge_sync_simulation_box(
    bridge_handle: u64,
    snapshot_out: *mut MdBoxSnapshot,
) -> i32 {
    ffi_guard!({
        if snapshot_out.is_null() {
            return MdStatus::InvalidArgument as i32;
        }
        let Some(bridge_arc) = get_bridge(bridge_handle) else {
            return MdStatus::InvalidHandle as i32;
        };
        let mut bridge = ffi_lock!(bridge_arc);
        let snapshot = MdBoxSnapshot::from(&bridge.sync_simulation_box());
        // SAFETY: snapshot_out is valid per caller contract.
        unsafe { *snapshot_out = snapshot };
        MdStatus::Ok as i32
    })
}
