//! Procedural geometry for the can.
//!
//! The side wall is a band of `height_segments + 1` rings. Every angular step
//! of a ring emits two vertices (the current and the next angle), so each wedge
//! owns its own pair of samples and can carry a flat normal without sharing
//! vertices with its neighbours. The last step therefore ends on a duplicate of
//! the first angle, which keeps the U coordinate seam exact.
//!
//! Alongside the rest pose, the same generation pass produces the crushed pose:
//! every ring is scaled radially by the crush profile.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::error::{Result, ViewerError};
use crate::mesh::{Mesh, MeshTopology};

/// Smallest radial scale the crush profile reaches.
pub const MIN_CRUSH_SCALE: f32 = 0.25;

const MIN_SEGMENTS: u32 = 3;
const MIN_HEIGHT_SEGMENTS: u32 = 1;

/// Normal layout of the side wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Shading {
    /// Radial normal at every sample.
    #[default]
    Smooth,
    /// One normal per wedge, taken at the wedge's mid-angle.
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandParams {
    pub segments: u32,
    pub height_segments: u32,
    pub height: f32,
    pub radius: f32,
    pub shading: Shading,
}

impl Default for BandParams {
    fn default() -> Self {
        Self {
            segments: 32,
            height_segments: 16,
            height: 2.0,
            radius: 1.0,
            shading: Shading::Smooth,
        }
    }
}

impl BandParams {
    pub fn validate(&self) -> Result<()> {
        if self.segments < MIN_SEGMENTS {
            return Err(ViewerError::TooFewSegments(self.segments));
        }
        if self.height_segments < MIN_HEIGHT_SEGMENTS {
            return Err(ViewerError::TooFewHeightSegments(self.height_segments));
        }
        if self.band_vertex_count() > u64::from(u32::MAX) {
            return Err(ViewerError::TooManyVertices {
                segments: self.segments,
                height_segments: self.height_segments,
            });
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(ViewerError::InvalidHeight(self.height));
        }
        validate_radius(self.radius)
    }

    /// Vertices in the band, widened so oversized counts cannot wrap.
    fn band_vertex_count(&self) -> u64 {
        2 * u64::from(self.segments) * (u64::from(self.height_segments) + 1)
    }

    /// Y coordinate of `ring`, bottom ring first.
    pub fn ring_height(&self, ring: u32) -> f32 {
        -self.height / 2.0 + ring as f32 * (self.height / self.height_segments as f32)
    }

    /// Vertices per ring in the paired layout.
    pub fn ring_len(&self) -> usize {
        self.segments as usize * 2
    }

    /// Slot of the `sample`-th vertex (0 = current angle, 1 = next angle) of
    /// angular `step` in `ring`.
    pub fn vertex_index(&self, ring: u32, step: u32, sample: u32) -> u32 {
        (ring * self.segments + step) * 2 + sample
    }
}

fn validate_radius(radius: f32) -> Result<()> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(ViewerError::InvalidRadius(radius))
    }
}

fn angle(sample: u32, segments: u32) -> f32 {
    sample as f32 * (TAU / segments as f32)
}

/// Radial scale applied to `ring` in the crushed pose.
///
/// Full size at the top and bottom rings, pinched to [`MIN_CRUSH_SCALE`]
/// around mid height.
pub fn crush_scale(ring: u32, height_segments: u32) -> f32 {
    let t = ring as f32 / height_segments as f32;
    (t * PI).cos().abs().clamp(MIN_CRUSH_SCALE, 1.0)
}

pub fn crush_profile(height_segments: u32) -> Vec<f32> {
    (0..=height_segments)
        .map(|ring| crush_scale(ring, height_segments))
        .collect()
}

struct BandPoses {
    rest: Mesh,
    crushed: Vec<Vec3>,
}

fn generate_band(params: &BandParams) -> Result<BandPoses> {
    params.validate()?;

    let segments = params.segments;
    let height_segments = params.height_segments;
    let vertex_count = params.ring_len() * (height_segments as usize + 1);

    let mut positions = Vec::with_capacity(vertex_count);
    let mut crushed = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);
    let mut uvs = Vec::with_capacity(vertex_count);

    for ring in 0..=height_segments {
        let y = params.ring_height(ring);
        let v = (ring + 1) as f32 / (height_segments + 1) as f32;
        let scale = crush_scale(ring, height_segments);

        for step in 0..segments {
            let mid = (step as f32 + 0.5) * (TAU / segments as f32);
            let wedge_normal = Vec3::new(mid.cos(), 0.0, mid.sin());

            for sample in [step, step + 1] {
                let theta = angle(sample, segments);
                let (sin, cos) = theta.sin_cos();
                let x = params.radius * cos;
                let z = params.radius * sin;

                positions.push(Vec3::new(x, y, z));
                crushed.push(Vec3::new(x * scale, y, z * scale));
                normals.push(match params.shading {
                    Shading::Smooth => Vec3::new(cos, 0.0, sin),
                    Shading::Flat => wedge_normal,
                });
                // U runs clockwise seen from outside
                uvs.push([1.0 - sample as f32 / segments as f32, v]);
            }
        }
    }

    let mut indices = Vec::with_capacity(segments as usize * height_segments as usize * 6);
    for ring in 0..height_segments {
        for step in 0..segments {
            let b0 = params.vertex_index(ring, step, 0);
            let b1 = b0 + 1;
            let t0 = params.vertex_index(ring + 1, step, 0);
            let t1 = t0 + 1;
            indices.extend_from_slice(&[t0, t1, b0, b0, t1, b1]);
        }
    }

    Ok(BandPoses {
        rest: Mesh {
            positions,
            topology: MeshTopology {
                indices,
                normals,
                uvs: Some(uvs),
            },
        },
        crushed,
    })
}

/// Side wall in its rest pose.
pub fn build_band(params: &BandParams) -> Result<Mesh> {
    Ok(generate_band(params)?.rest)
}

/// Side wall positions in the fully crushed pose, slot-for-slot with
/// [`build_band`].
pub fn build_crushed_positions(params: &BandParams) -> Result<Vec<Vec3>> {
    Ok(generate_band(params)?.crushed)
}

/// Disc facing +Y at height `y`: a center vertex followed by `segments + 1`
/// rim vertices, the last one repeating the first angle.
pub fn build_cap(segments: u32, radius: f32, y: f32) -> Result<Mesh> {
    if segments < MIN_SEGMENTS {
        return Err(ViewerError::TooFewSegments(segments));
    }
    validate_radius(radius)?;

    let vertex_count = segments as usize + 2;
    let mut positions = Vec::with_capacity(vertex_count);
    let mut uvs = Vec::with_capacity(vertex_count);

    positions.push(Vec3::new(0.0, y, 0.0));
    uvs.push([0.5, 0.5]);

    for k in 0..=segments {
        let (sin, cos) = angle(k, segments).sin_cos();
        positions.push(Vec3::new(radius * cos, y, radius * sin));
        uvs.push([(cos + 1.0) * 0.5, (sin + 1.0) * 0.5]);
    }

    let indices = (1..=segments).flat_map(|k| [0, k + 1, k]).collect();

    Ok(Mesh {
        positions,
        topology: MeshTopology {
            indices,
            normals: vec![Vec3::Y; vertex_count],
            uvs: Some(uvs),
        },
    })
}

/// Every surface of the can plus the crushed side wall.
#[derive(Debug, Clone)]
pub struct CanGeometry {
    pub params: BandParams,
    pub band: Mesh,
    pub crushed_band: Vec<Vec3>,
    pub top_cap: Mesh,
    pub bottom_cap: Mesh,
}

impl CanGeometry {
    pub fn build(params: &BandParams) -> Result<Self> {
        let BandPoses { rest, crushed } = generate_band(params)?;
        let top_cap = build_cap(params.segments, params.radius, params.height / 2.0)?;
        let bottom_cap = top_cap.mirrored_y();

        log::info!(
            "Built can geometry: band {} vertices / {} triangles, caps {} vertices each",
            rest.vertex_count(),
            rest.triangle_count(),
            top_cap.vertex_count(),
        );

        Ok(Self {
            params: *params,
            band: rest,
            crushed_band: crushed,
            top_cap,
            bottom_cap,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn square_prism() -> BandParams {
        BandParams {
            segments: 4,
            height_segments: 1,
            height: 2.0,
            radius: 1.0,
            shading: Shading::Smooth,
        }
    }

    #[test]
    fn test_square_prism_counts() {
        let mesh = build_band(&square_prism()).unwrap();
        assert_eq!(mesh.vertex_count(), 16);
        assert_eq!(mesh.triangle_count(), 8);
        assert_eq!(mesh.topology.indices.len(), 24);
    }

    #[test]
    fn test_square_prism_matches_reference() {
        let mesh = build_band(&square_prism()).unwrap();

        #[rustfmt::skip]
        let expected_indices = vec![
            8, 9, 0, 0, 9, 1,
            10, 11, 2, 2, 11, 3,
            12, 13, 4, 4, 13, 5,
            14, 15, 6, 6, 15, 7,
        ];
        assert_eq!(mesh.topology.indices, expected_indices);

        let corners = [
            [1.0, 0.0],
            [0.0, 1.0],
            [-1.0, 0.0],
            [0.0, -1.0],
            [1.0, 0.0],
        ];
        for (ring, y) in [(0, -1.0), (1, 1.0)] {
            for step in 0..4 {
                for sample in 0..2 {
                    let slot = (ring * 4 + step) * 2 + sample;
                    let [x, z] = corners[step + sample];
                    let p = mesh.positions[slot];
                    assert_abs_diff_eq!(p.x, x, epsilon = 1e-6);
                    assert_abs_diff_eq!(p.y, y, epsilon = 1e-6);
                    assert_abs_diff_eq!(p.z, z, epsilon = 1e-6);
                }
            }
        }
    }

    #[test]
    fn test_flat_normals_shared_per_wedge() {
        let params = BandParams {
            shading: Shading::Flat,
            ..square_prism()
        };
        let mesh = build_band(&params).unwrap();
        let normals = &mesh.topology.normals;
        for pair in normals.chunks_exact(2) {
            assert_eq!(pair[0], pair[1]);
        }
        // first wedge spans 0..90 degrees
        let expected = std::f32::consts::FRAC_1_SQRT_2;
        assert_abs_diff_eq!(normals[0].x, expected, epsilon = 1e-6);
        assert_abs_diff_eq!(normals[0].z, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_crush_profile_shape() {
        let profile = crush_profile(8);
        assert_eq!(profile.len(), 9);
        assert_eq!(profile[0], 1.0);
        assert_eq!(profile[8], 1.0);
        assert_eq!(profile[4], MIN_CRUSH_SCALE);
        assert!(profile[3] > MIN_CRUSH_SCALE && profile[3] < 1.0);
    }

    #[test]
    fn test_crushed_positions_keep_height() {
        let params = BandParams {
            height_segments: 4,
            ..square_prism()
        };
        let rest = build_band(&params).unwrap();
        let crushed = build_crushed_positions(&params).unwrap();
        assert_eq!(rest.positions.len(), crushed.len());
        for (r, c) in rest.positions.iter().zip(&crushed) {
            assert_eq!(r.y, c.y);
        }
    }

    #[test]
    fn test_degenerate_params_rejected() {
        let too_few = BandParams {
            segments: 2,
            ..square_prism()
        };
        assert_eq!(build_band(&too_few), Err(ViewerError::TooFewSegments(2)));

        let flat = BandParams {
            height_segments: 0,
            ..square_prism()
        };
        assert_eq!(build_band(&flat), Err(ViewerError::TooFewHeightSegments(0)));

        let oversized = BandParams {
            segments: 1 << 20,
            height_segments: 1 << 11,
            ..square_prism()
        };
        assert_eq!(
            oversized.validate(),
            Err(ViewerError::TooManyVertices {
                segments: 1 << 20,
                height_segments: 1 << 11,
            })
        );
        let largest = BandParams {
            segments: 1 << 20,
            height_segments: (1 << 11) - 2,
            ..square_prism()
        };
        assert!(largest.validate().is_ok());

        let no_height = BandParams {
            height: 0.0,
            ..square_prism()
        };
        assert!(build_band(&no_height).is_err());

        assert!(build_cap(2, 1.0, 0.0).is_err());
        assert!(build_cap(8, -1.0, 0.0).is_err());
    }

    #[test]
    fn test_cap_layout() {
        let cap = build_cap(8, 1.0, 1.0).unwrap();
        assert_eq!(cap.vertex_count(), 10);
        assert_eq!(cap.triangle_count(), 8);
        assert_eq!(&cap.topology.indices[..3], &[0, 2, 1]);
        cap.validate().unwrap();
    }
}
