//! Orthogonal and triclinic periodic cells.
//!
//! A cell is the parallelepiped spanned from `lo` by the edge vectors
//! `a = (xprd, 0, 0)`, `b = (xy, yprd, 0)` and `c = (xz, yz, zprd)`, where
//! `prd = hi - lo` and `xy`, `xz`, `yz` are the tilt factors (all zero
//! for an orthogonal cell). Fractional ("lamda") coordinates map the cell
//! onto the unit cube.

use mdsync_core::{Domain, ImageCounts, Vec3};

use crate::error::CellError;

/// Displacements beyond this many periods are reported by the indexed
/// minimum-image form before being folded.
const FAR_IMAGE_SPAN: f64 = 16.0;

/// Fold positions back into the primary cell, tracking boundary crossings.
pub trait Remap {
    /// Wrap `position` into the cell along periodic axes and return the
    /// wrapped position with `image` updated by the crossings made.
    fn remap(&self, position: Vec3, image: ImageCounts) -> (Vec3, ImageCounts);
}

/// A simulation cell with per-axis periodicity.
#[derive(Clone, Debug, PartialEq)]
pub struct PeriodicCell {
    lo: Vec3,
    hi: Vec3,
    /// Tilt factors xy, xz, yz.
    tilt: [f64; 3],
    periodic: [bool; 3],
    triclinic: bool,
    prd: Vec3,
    /// Shape matrix in Voigt order: xprd, yprd, zprd, yz, xz, xy.
    h: [f64; 6],
    h_inv: [f64; 6],
    corners: [Vec3; 8],
}

impl PeriodicCell {
    /// Orthogonal cell spanning `lo..hi`.
    pub fn orthogonal(lo: Vec3, hi: Vec3, periodic: [bool; 3]) -> Result<Self, CellError> {
        Self::build(lo, hi, [0.0; 3], periodic, false)
    }

    /// Triclinic cell spanning `lo..hi` with tilt factors `[xy, xz, yz]`.
    pub fn triclinic(
        lo: Vec3,
        hi: Vec3,
        tilt: [f64; 3],
        periodic: [bool; 3],
    ) -> Result<Self, CellError> {
        Self::build(lo, hi, tilt, periodic, true)
    }

    /// Fully periodic cube from the origin with edge `length`.
    pub fn cubic(length: f64) -> Result<Self, CellError> {
        Self::orthogonal([0.0; 3], [length; 3], [true; 3])
    }

    fn build(
        lo: Vec3,
        hi: Vec3,
        tilt: [f64; 3],
        periodic: [bool; 3],
        triclinic: bool,
    ) -> Result<Self, CellError> {
        let mut cell = Self {
            lo,
            hi,
            tilt,
            periodic,
            triclinic,
            prd: [0.0; 3],
            h: [0.0; 6],
            h_inv: [0.0; 6],
            corners: [[0.0; 3]; 8],
        };
        cell.deform(lo, hi, tilt)?;
        cell.update_corners();
        Ok(cell)
    }

    /// Change the cell shape in place.
    ///
    /// Corners are not recomputed until the next
    /// [`update_corners`](Domain::update_corners). Tilt is ignored for
    /// orthogonal cells.
    pub fn deform(&mut self, lo: Vec3, hi: Vec3, tilt: [f64; 3]) -> Result<(), CellError> {
        if lo.iter().chain(&hi).any(|v| !v.is_finite()) {
            return Err(CellError::NonFinite { what: "bounds" });
        }
        if tilt.iter().any(|v| !v.is_finite()) {
            return Err(CellError::NonFinite { what: "tilt" });
        }
        for axis in 0..3 {
            if hi[axis] <= lo[axis] {
                return Err(CellError::Degenerate {
                    axis,
                    lo: lo[axis],
                    hi: hi[axis],
                });
            }
        }
        let tilt = if self.triclinic { tilt } else { [0.0; 3] };
        let prd = [hi[0] - lo[0], hi[1] - lo[1], hi[2] - lo[2]];
        let [xy, xz, yz] = tilt;
        let h = [prd[0], prd[1], prd[2], yz, xz, xy];
        let h_inv = [
            1.0 / h[0],
            1.0 / h[1],
            1.0 / h[2],
            -h[3] / (h[1] * h[2]),
            (h[3] * h[5] - h[1] * h[4]) / (h[0] * h[1] * h[2]),
            -h[5] / (h[0] * h[1]),
        ];
        self.lo = lo;
        self.hi = hi;
        self.tilt = tilt;
        self.prd = prd;
        self.h = h;
        self.h_inv = h_inv;
        Ok(())
    }

    /// Lower bounds.
    pub fn lo(&self) -> Vec3 {
        self.lo
    }

    /// Upper bounds.
    pub fn hi(&self) -> Vec3 {
        self.hi
    }

    /// Tilt factors `[xy, xz, yz]`.
    pub fn tilt(&self) -> [f64; 3] {
        self.tilt
    }

    /// Per-axis periodicity.
    pub fn periodic(&self) -> [bool; 3] {
        self.periodic
    }

    /// Whether the cell carries tilt factors.
    pub fn is_triclinic(&self) -> bool {
        self.triclinic
    }

    /// Cartesian to fractional coordinates.
    pub fn to_fractional(&self, x: Vec3) -> Vec3 {
        let d = [x[0] - self.lo[0], x[1] - self.lo[1], x[2] - self.lo[2]];
        let hi = &self.h_inv;
        [
            hi[0] * d[0] + hi[5] * d[1] + hi[4] * d[2],
            hi[1] * d[1] + hi[3] * d[2],
            hi[2] * d[2],
        ]
    }

    /// Fractional to Cartesian coordinates.
    pub fn to_cartesian(&self, lamda: Vec3) -> Vec3 {
        let h = &self.h;
        [
            h[0] * lamda[0] + h[5] * lamda[1] + h[4] * lamda[2] + self.lo[0],
            h[1] * lamda[1] + h[3] * lamda[2] + self.lo[1],
            h[2] * lamda[2] + self.lo[2],
        ]
    }

    /// Fold one coordinate into `[lo, lo + period)`, returning the number
    /// of periods removed.
    fn fold(coord: &mut f64, lo: f64, period: f64) -> i32 {
        let n = ((*coord - lo) / period).floor();
        *coord -= n * period;
        let mut shift = n as i32;
        if *coord >= lo + period {
            *coord -= period;
            shift += 1;
        }
        if *coord < lo {
            *coord = lo;
        }
        shift
    }

    /// Remove whole periods from `d` so it lands in `[-prd/2, prd/2)`,
    /// returning the number removed.
    fn image_shift(d: &mut f64, prd: f64) -> f64 {
        let half = 0.5 * prd;
        if (-half..half).contains(&*d) {
            return 0.0;
        }
        let mut n = (*d / prd).round();
        *d -= n * prd;
        if *d >= half {
            *d -= prd;
            n += 1.0;
        } else if *d < -half {
            *d += prd;
            n -= 1.0;
        }
        n
    }

    fn fold_displacement(&self, mut d: Vec3) -> Vec3 {
        let [xprd, yprd, zprd] = self.prd;
        let [xy, xz, yz] = self.tilt;
        if self.periodic[2] {
            let n = Self::image_shift(&mut d[2], zprd);
            d[1] -= n * yz;
            d[0] -= n * xz;
        }
        if self.periodic[1] {
            let n = Self::image_shift(&mut d[1], yprd);
            d[0] -= n * xy;
        }
        if self.periodic[0] {
            Self::image_shift(&mut d[0], xprd);
        }
        d
    }
}

impl Remap for PeriodicCell {
    fn remap(&self, position: Vec3, mut image: ImageCounts) -> (Vec3, ImageCounts) {
        if !self.triclinic {
            let mut x = position;
            for axis in 0..3 {
                if self.periodic[axis] {
                    image[axis] += Self::fold(&mut x[axis], self.lo[axis], self.prd[axis]);
                }
            }
            return (x, image);
        }
        let mut lamda = self.to_fractional(position);
        for axis in 0..3 {
            if self.periodic[axis] {
                image[axis] += Self::fold(&mut lamda[axis], 0.0, 1.0);
            }
        }
        (self.to_cartesian(lamda), image)
    }
}

impl Domain for PeriodicCell {
    const INDEXED_MINIMUM_IMAGE: bool = true;

    fn update_corners(&mut self) {
        for (k, corner) in self.corners.iter_mut().enumerate() {
            let lamda = [(k & 1) as f64, ((k >> 1) & 1) as f64, ((k >> 2) & 1) as f64];
            let h = &self.h;
            *corner = [
                h[0] * lamda[0] + h[5] * lamda[1] + h[4] * lamda[2] + self.lo[0],
                h[1] * lamda[1] + h[3] * lamda[2] + self.lo[1],
                h[2] * lamda[2] + self.lo[2],
            ];
        }
    }

    fn corners(&self) -> &[Vec3; 8] {
        &self.corners
    }

    fn periodic_lengths(&self) -> Vec3 {
        self.prd
    }

    fn unmap(&self, x: Vec3, image: ImageCounts) -> Vec3 {
        let [ix, iy, iz] = image.map(f64::from);
        let h = &self.h;
        [
            x[0] + h[0] * ix + h[5] * iy + h[4] * iz,
            x[1] + h[1] * iy + h[3] * iz,
            x[2] + h[2] * iz,
        ]
    }

    fn minimum_image(&self, delta: Vec3) -> Vec3 {
        self.fold_displacement(delta)
    }

    fn minimum_image_indexed(&self, label: &str, index: u32, delta: Vec3) -> Vec3 {
        for axis in 0..3 {
            if self.periodic[axis] && delta[axis].abs() > FAR_IMAGE_SPAN * self.prd[axis] {
                tracing::warn!(
                    label,
                    index,
                    axis,
                    displacement = delta[axis],
                    period = self.prd[axis],
                    "atoms have moved too far apart for minimum image"
                );
            }
        }
        self.fold_displacement(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        a.iter().zip(&b).all(|(x, y)| (x - y).abs() < 1e-9)
    }

    #[test]
    fn rejects_degenerate_bounds() {
        let err = PeriodicCell::orthogonal([0.0; 3], [1.0, 0.0, 1.0], [true; 3]).unwrap_err();
        assert_eq!(
            err,
            CellError::Degenerate {
                axis: 1,
                lo: 0.0,
                hi: 0.0
            }
        );
        assert!(PeriodicCell::cubic(f64::NAN).is_err());
        assert!(PeriodicCell::triclinic([0.0; 3], [1.0; 3], [f64::INFINITY, 0.0, 0.0], [true; 3])
            .is_err());
    }

    #[test]
    fn orthogonal_corners_and_lengths() {
        let cell = PeriodicCell::orthogonal([-1.0, 0.0, 2.0], [3.0, 5.0, 4.0], [true; 3]).unwrap();
        assert_eq!(cell.periodic_lengths(), [4.0, 5.0, 2.0]);
        let c = cell.corners();
        assert_eq!(c[0], [-1.0, 0.0, 2.0]);
        assert_eq!(c[1], [3.0, 0.0, 2.0]);
        assert_eq!(c[2], [-1.0, 5.0, 2.0]);
        assert_eq!(c[4], [-1.0, 0.0, 4.0]);
        assert_eq!(c[7], [3.0, 5.0, 4.0]);
    }

    #[test]
    fn triclinic_corners_carry_tilt() {
        let cell =
            PeriodicCell::triclinic([0.0; 3], [10.0, 8.0, 6.0], [1.0, 2.0, 3.0], [true; 3]).unwrap();
        let c = cell.corners();
        assert!(close(c[1], [10.0, 0.0, 0.0]));
        assert!(close(c[2], [1.0, 8.0, 0.0]));
        assert!(close(c[4], [2.0, 3.0, 6.0]));
    }

    #[test]
    fn deform_leaves_corners_stale_until_updated() {
        let mut cell = PeriodicCell::cubic(10.0).unwrap();
        cell.deform([0.0; 3], [20.0; 3], [0.0; 3]).unwrap();
        assert_eq!(cell.corners()[7], [10.0; 3]);
        cell.update_corners();
        assert_eq!(cell.corners()[7], [20.0; 3]);
    }

    #[test]
    fn unmap_orthogonal_adds_whole_periods() {
        let cell = PeriodicCell::cubic(10.0).unwrap();
        assert_eq!(cell.unmap([1.0, 2.0, 3.0], [1, -2, 0]), [11.0, -18.0, 3.0]);
    }

    #[test]
    fn unmap_triclinic_shifts_along_edges() {
        let cell =
            PeriodicCell::triclinic([0.0; 3], [10.0, 8.0, 6.0], [1.0, 2.0, 3.0], [true; 3]).unwrap();
        // One b-image and one c-image: + (xy, yprd, 0) + (xz, yz, zprd).
        let x = cell.unmap([0.0; 3], [0, 1, 1]);
        assert!(close(x, [3.0, 11.0, 6.0]));
    }

    #[test]
    fn remap_counts_crossings() {
        let cell = PeriodicCell::cubic(10.0).unwrap();
        let (x, img) = cell.remap([-0.5, 25.0, 3.0], [0, 0, 0]);
        assert!(close(x, [9.5, 5.0, 3.0]));
        assert_eq!(img, [-1, 2, 0]);
    }

    #[test]
    fn remap_ignores_non_periodic_axes() {
        let cell = PeriodicCell::orthogonal([0.0; 3], [10.0; 3], [true, true, false]).unwrap();
        let (x, img) = cell.remap([1.0, 1.0, 12.0], [0, 0, 0]);
        assert_eq!(x, [1.0, 1.0, 12.0]);
        assert_eq!(img, [0, 0, 0]);
    }

    #[test]
    fn minimum_image_boundary_pair() {
        let cell = PeriodicCell::cubic(10.0).unwrap();
        assert!(close(cell.minimum_image([-9.0, 0.0, 0.0]), [1.0, 0.0, 0.0]));
        assert!(close(cell.minimum_image([9.0, 0.0, 0.0]), [-1.0, 0.0, 0.0]));
    }

    #[test]
    fn minimum_image_half_period_is_negative() {
        let cell = PeriodicCell::cubic(10.0).unwrap();
        assert_eq!(cell.minimum_image([5.0, 15.0, -15.0]), [-5.0, -5.0, -5.0]);
        assert_eq!(cell.minimum_image([-5.0, 25.0, 4.5]), [-5.0, -5.0, 4.5]);
    }

    #[test]
    fn minimum_image_triclinic_carries_tilt() {
        let cell =
            PeriodicCell::triclinic([0.0; 3], [10.0, 10.0, 10.0], [2.0, 0.0, 0.0], [true; 3])
                .unwrap();
        // Crossing y pulls x back by the xy tilt.
        let d = cell.minimum_image([0.0, 9.0, 0.0]);
        assert!(close(d, [-2.0, -1.0, 0.0]));
    }

    #[test]
    fn indexed_form_matches_displacement_form() {
        let cell = PeriodicCell::cubic(10.0).unwrap();
        let d = [123.0, -4.0, 7.5];
        assert_eq!(
            cell.minimum_image_indexed("test", 0, d),
            cell.minimum_image(d)
        );
    }

    proptest! {
        #[test]
        fn minimum_image_within_half_period(
            dx in -100.0f64..100.0,
            dy in -100.0f64..100.0,
            dz in -100.0f64..100.0,
        ) {
            let cell = PeriodicCell::orthogonal([0.0; 3], [10.0, 7.0, 3.0], [true; 3]).unwrap();
            let d = cell.minimum_image([dx, dy, dz]);
            let prd = cell.periodic_lengths();
            for axis in 0..3 {
                let half = 0.5 * prd[axis];
                prop_assert!(d[axis] >= -half && d[axis] < half, "axis {} gave {}", axis, d[axis]);
            }
        }

        #[test]
        fn minimum_image_preserves_lattice_class(dx in -50.0f64..50.0, dy in -50.0f64..50.0) {
            let cell = PeriodicCell::cubic(10.0).unwrap();
            let d = cell.minimum_image([dx, dy, 0.0]);
            for (orig, folded) in [(dx, d[0]), (dy, d[1])] {
                let periods = (orig - folded) / 10.0;
                prop_assert!((periods - periods.round()).abs() < 1e-9);
            }
        }

        #[test]
        fn unmap_inverts_remap(
            x in -40.0f64..40.0,
            y in -40.0f64..40.0,
            z in -40.0f64..40.0,
        ) {
            let cell = PeriodicCell::triclinic(
                [0.0; 3], [10.0, 8.0, 6.0], [1.0, -2.0, 0.5], [true; 3],
            ).unwrap();
            let (wrapped, image) = cell.remap([x, y, z], [0, 0, 0]);
            let lamda = cell.to_fractional(wrapped);
            for l in lamda {
                prop_assert!((-1e-9..1.0 + 1e-9).contains(&l));
            }
            let back = cell.unmap(wrapped, image);
            prop_assert!((back[0] - x).abs() < 1e-6);
            prop_assert!((back[1] - y).abs() < 1e-6);
            prop_assert!((back[2] - z).abs() < 1e-6);
        }
    }
}
