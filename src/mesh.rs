//! Indexed triangle meshes.
//!
//! Positions are kept apart from the rest of the vertex data because they are
//! the only part that changes after construction: a morph update replaces the
//! whole position buffer while indices, normals and UVs stay fixed.
//!
//! Triangles are wound counter-clockwise when seen from the outward side.

use std::collections::BTreeSet;

use glam::Vec3;

use crate::error::{Result, ViewerError};

/// Static part of a mesh, uploaded once.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshTopology {
    /// Triangle list, three indices per triangle.
    pub indices: Vec<u32>,
    /// One normal per vertex.
    pub normals: Vec<Vec3>,
    /// One UV pair per vertex, when the surface is textured.
    pub uvs: Option<Vec<[f32; 2]>>,
}

impl MeshTopology {
    /// Unique undirected edges as a line list, for wireframe drawing.
    pub fn wireframe_indices(&self) -> Vec<u32> {
        let mut edges = BTreeSet::new();
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                edges.insert((a.min(b), a.max(b)));
            }
        }
        edges.into_iter().flat_map(|(a, b)| [a, b]).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub topology: MeshTopology,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.topology.indices.len() / 3
    }

    /// Index triples, one per triangle.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.topology
            .indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }

    /// Unnormalized normal implied by the winding of `triangle`.
    pub fn face_normal(&self, triangle: [u32; 3]) -> Vec3 {
        let [a, b, c] = triangle.map(|i| self.positions[i as usize]);
        (b - a).cross(c - a)
    }

    /// Checks the buffer-length and index-range invariants.
    pub fn validate(&self) -> Result<()> {
        let vertex_count = self.positions.len();
        let topology = &self.topology;

        if topology.indices.len() % 3 != 0 {
            return Err(ViewerError::InvalidMesh(format!(
                "index count {} is not a multiple of 3",
                topology.indices.len()
            )));
        }
        if let Some(&index) = topology
            .indices
            .iter()
            .find(|&&index| index as usize >= vertex_count)
        {
            return Err(ViewerError::InvalidMesh(format!(
                "index {index} out of range for {vertex_count} vertices"
            )));
        }
        if topology.normals.len() != vertex_count {
            return Err(ViewerError::InvalidMesh(format!(
                "{} normals for {vertex_count} vertices",
                topology.normals.len()
            )));
        }
        if let Some(uvs) = &topology.uvs {
            if uvs.len() != vertex_count {
                return Err(ViewerError::InvalidMesh(format!(
                    "{} uvs for {vertex_count} vertices",
                    uvs.len()
                )));
            }
        }
        Ok(())
    }

    /// Reflects the mesh through the XZ plane.
    ///
    /// A reflection reverses every triangle's winding, so two index slots are
    /// swapped per triangle to keep the outward side counter-clockwise. Normals
    /// are reflected with the positions.
    pub fn mirrored_y(&self) -> Mesh {
        let flip = |v: &Vec3| Vec3::new(v.x, -v.y, v.z);

        let indices = self
            .topology
            .indices
            .chunks_exact(3)
            .flat_map(|tri| [tri[0], tri[2], tri[1]])
            .collect();

        Mesh {
            positions: self.positions.iter().map(flip).collect(),
            topology: MeshTopology {
                indices,
                normals: self.topology.normals.iter().map(flip).collect(),
                uvs: self.topology.uvs.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_triangle() -> Mesh {
        Mesh {
            positions: vec![
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, -1.0),
            ],
            topology: MeshTopology {
                indices: vec![0, 1, 2],
                normals: vec![Vec3::Y; 3],
                uvs: None,
            },
        }
    }

    #[test]
    fn test_face_normal_follows_winding() {
        let mesh = single_triangle();
        let normal = mesh.face_normal([0, 1, 2]);
        assert!(normal.dot(Vec3::Y) > 0.0);
    }

    #[test]
    fn test_mirrored_keeps_outward_winding() {
        let mesh = single_triangle();
        let mirrored = mesh.mirrored_y();

        assert_eq!(mirrored.topology.indices, vec![0, 2, 1]);
        assert_eq!(mirrored.topology.normals[0], Vec3::NEG_Y);
        let tri = mirrored.triangles().next().unwrap();
        assert!(mirrored.face_normal(tri).dot(Vec3::NEG_Y) > 0.0);
    }

    #[test]
    fn test_validate_rejects_out_of_range_index() {
        let mut mesh = single_triangle();
        mesh.topology.indices[1] = 3;
        assert!(matches!(mesh.validate(), Err(ViewerError::InvalidMesh(_))));
    }

    #[test]
    fn test_validate_rejects_partial_triangle() {
        let mut mesh = single_triangle();
        mesh.topology.indices.push(0);
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_uv_length_mismatch() {
        let mut mesh = single_triangle();
        mesh.topology.uvs = Some(vec![[0.0, 0.0]; 2]);
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn test_wireframe_edges_are_unique() {
        let topology = MeshTopology {
            indices: vec![0, 1, 2, 2, 1, 3],
            normals: vec![Vec3::Y; 4],
            uvs: None,
        };
        let lines = topology.wireframe_indices();
        // 5 distinct edges, the shared 1-2 edge appears once
        assert_eq!(lines.len(), 10);
        assert_eq!(lines, vec![0, 1, 0, 2, 1, 2, 1, 3, 2, 3]);
    }
}
