//! Linear blending between a rest pose and a crushed pose.

use glam::Vec3;

use crate::error::{Result, ViewerError};

/// Interpolates `rest` toward `crushed` by `alpha`.
///
/// Evaluated as `rest * (1 - alpha) + crushed * alpha` so both endpoints are
/// reproduced bit for bit.
pub fn blend(rest: &[Vec3], crushed: &[Vec3], alpha: f32) -> Result<Vec<Vec3>> {
    check_alpha(alpha)?;
    if rest.len() != crushed.len() {
        return Err(ViewerError::MorphLengthMismatch {
            rest: rest.len(),
            crushed: crushed.len(),
        });
    }

    let keep = 1.0 - alpha;
    Ok(rest
        .iter()
        .zip(crushed)
        .map(|(&r, &c)| r * keep + c * alpha)
        .collect())
}

fn check_alpha(alpha: f32) -> Result<()> {
    if (0.0..=1.0).contains(&alpha) {
        Ok(())
    } else {
        Err(ViewerError::BlendFactorOutOfRange(alpha))
    }
}

/// Rest and crushed vertex sets sharing one topology.
///
/// Slot `i` of both arrays is the same surface point, so the arrays are only
/// ever replaced together.
#[derive(Debug, Clone)]
pub struct MorphPair {
    rest: Vec<Vec3>,
    crushed: Vec<Vec3>,
    alpha: f32,
}

impl MorphPair {
    pub fn new(rest: Vec<Vec3>, crushed: Vec<Vec3>) -> Result<Self> {
        if rest.len() != crushed.len() {
            return Err(ViewerError::MorphLengthMismatch {
                rest: rest.len(),
                crushed: crushed.len(),
            });
        }
        Ok(Self {
            rest,
            crushed,
            alpha: 0.0,
        })
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn len(&self) -> usize {
        self.rest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    pub fn rest(&self) -> &[Vec3] {
        &self.rest
    }

    pub fn crushed(&self) -> &[Vec3] {
        &self.crushed
    }

    /// Stores a new blend factor and returns the positions for it.
    ///
    /// The stored factor is left unchanged when `alpha` is rejected.
    pub fn set_alpha(&mut self, alpha: f32) -> Result<Vec<Vec3>> {
        let positions = blend(&self.rest, &self.crushed, alpha)?;
        self.alpha = alpha;
        Ok(positions)
    }

    /// Positions for the current blend factor.
    pub fn blended(&self) -> Vec<Vec3> {
        self.rest
            .iter()
            .zip(&self.crushed)
            .map(|(&r, &c)| r * (1.0 - self.alpha) + c * self.alpha)
            .collect()
    }
}
