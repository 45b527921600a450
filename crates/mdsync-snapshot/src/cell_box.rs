//! Simulation cell capture.

use mdsync_core::{BoxSnapshot, BufferView, Domain, Engine};

/// Captures the cell as three edge vectors, an origin and periodic lengths.
///
/// The edge vectors are taken from the engine's corners, recomputed on
/// every capture: `a = c1 - c0`, `b = c2 - c0`, `c = c4 - c0`.
#[derive(Clone, Debug, Default)]
pub struct BoxSnapshotBuilder {
    matrix: [f32; 9],
    origin: [f32; 3],
    lengths: [f32; 3],
}

impl BoxSnapshotBuilder {
    /// Builder with zeroed buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current cell.
    ///
    /// Without an engine or domain the buffers are zeroed and the empty
    /// snapshot returned.
    pub fn capture<E: Engine>(&mut self, engine: Option<&mut E>) -> BoxSnapshot<'_> {
        let Some(domain) = engine.and_then(|e| e.domain_mut()) else {
            tracing::debug!("no domain; publishing empty box snapshot");
            self.reset();
            return BoxSnapshot::empty();
        };

        domain.update_corners();
        let corners = domain.corners();
        let o = corners[0];
        for (row, corner) in [corners[1], corners[2], corners[4]].iter().enumerate() {
            for axis in 0..3 {
                self.matrix[3 * row + axis] = (corner[axis] - o[axis]) as f32;
            }
        }
        self.origin = o.map(|v| v as f32);
        self.lengths = domain.periodic_lengths().map(|v| v as f32);

        BoxSnapshot {
            matrix: BufferView::from_slice(&self.matrix, 3),
            origin: BufferView::from_slice(&self.origin, 3),
            lengths: BufferView::from_slice(&self.lengths, 3),
        }
    }

    /// Zero all buffers.
    pub fn reset(&mut self) {
        self.matrix = [0.0; 9];
        self.origin = [0.0; 3];
        self.lengths = [0.0; 3];
    }
}
