//! Periodic unwrapping and minimum-image bond reconstruction.

use mdsync_core::{Domain, ImageCounts, Vec3};

/// Which minimum-image entry point a domain type provides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MinimumImageForm {
    /// `minimum_image(delta)`.
    Displacement,
    /// `minimum_image_indexed(label, index, delta)`.
    Indexed,
}

impl MinimumImageForm {
    /// The preferred form for domain type `D`: indexed when available.
    pub const fn of<D: Domain>() -> Self {
        if D::INDEXED_MINIMUM_IMAGE {
            Self::Indexed
        } else {
            Self::Displacement
        }
    }
}

/// Resolves wrapped engine coordinates against one domain.
///
/// Borrowing the domain ties a resolver to a single capture; it is cheap
/// to construct and holds no state beyond the selected form.
#[derive(Clone, Copy, Debug)]
pub struct CoordinateResolver<'d, D> {
    domain: &'d D,
    form: MinimumImageForm,
    label: &'d str,
}

impl<'d, D: Domain> CoordinateResolver<'d, D> {
    /// Resolver over `domain`. `label` identifies this caller to the
    /// indexed minimum-image form.
    pub fn new(domain: &'d D, label: &'d str) -> Self {
        Self {
            domain,
            form: MinimumImageForm::of::<D>(),
            label,
        }
    }

    /// The minimum-image form in use.
    pub fn form(&self) -> MinimumImageForm {
        self.form
    }

    /// Undo periodic folding. Without image flags the position is returned unchanged.
    pub fn unwrap(&self, position: Vec3, image: Option<ImageCounts>) -> Vec3 {
        match image {
            Some(image) => self.domain.unmap(position, image),
            None => position,
        }
    }

    /// Shortest periodic equivalent of `delta`.
    pub fn minimum_image(&self, delta: Vec3) -> Vec3 {
        match self.form {
            MinimumImageForm::Displacement => self.domain.minimum_image(delta),
            MinimumImageForm::Indexed => self.domain.minimum_image_indexed(self.label, 0, delta),
        }
    }

    /// Partner endpoint placed at the nearest periodic image of `partner`
    /// as seen from `owner`.
    pub fn bond_endpoint(&self, owner: Vec3, partner: Vec3) -> Vec3 {
        let d = self.minimum_image([
            partner[0] - owner[0],
            partner[1] - owner[1],
            partner[2] - owner[2],
        ]);
        [owner[0] + d[0], owner[1] + d[1], owner[2] + d[2]]
    }
}
