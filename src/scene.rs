//! Boundary between the viewer core and whatever draws the scene.
//!
//! The core never owns a rendering lifecycle. It pushes topology once, then
//! position replacements, material swaps, camera and light updates as its
//! state changes. Failures on the far side come back as opaque errors.

use glam::Vec3;

use crate::camera::CameraTransform;
use crate::light::{LightIndicator, LightTransform};
use crate::mesh::MeshTopology;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Diffuse surface lit by the scene light.
    Lambert { color: [f32; 3] },
    /// Unlit triangle edges.
    Wireframe { color: [f32; 3] },
}

pub const CAN_MATERIAL: Material = Material::Lambert {
    color: [0.0, 0.5, 0.0],
};

pub const DEBUG_MATERIAL: Material = Material::Wireframe {
    color: [1.0, 1.0, 1.0],
};

pub trait SceneSink {
    /// Registers a mesh with its static topology and initial positions.
    fn upload_mesh(
        &mut self,
        id: MeshId,
        topology: &MeshTopology,
        positions: &[Vec3],
        material: Material,
    ) -> anyhow::Result<()>;

    /// Replaces the full position buffer of a registered mesh.
    fn replace_positions(&mut self, id: MeshId, positions: &[Vec3]) -> anyhow::Result<()>;

    fn set_material(&mut self, id: MeshId, material: Material) -> anyhow::Result<()>;

    fn set_camera(&mut self, camera: &CameraTransform);

    fn set_light(&mut self, light: &LightTransform);

    fn set_light_indicator(&mut self, indicator: &LightIndicator);
}

/// A mesh as the viewer tracks it, including the material hidden while the
/// debug material is shown.
#[derive(Debug, Clone)]
pub struct MeshSlot {
    pub id: MeshId,
    material: Material,
    saved_material: Option<Material>,
}

impl MeshSlot {
    pub fn new(id: MeshId, material: Material) -> Self {
        Self {
            id,
            material,
            saved_material: None,
        }
    }

    pub fn material(&self) -> Material {
        self.material
    }

    pub fn saved_material(&self) -> Option<Material> {
        self.saved_material
    }

    /// Shows `debug`, remembering the current material. Returns the material
    /// to apply, or `None` when debug mode is already active.
    pub fn enter_debug(&mut self, debug: Material) -> Option<Material> {
        if self.saved_material.is_some() {
            return None;
        }
        self.saved_material = Some(self.material);
        self.material = debug;
        Some(debug)
    }

    /// Restores the remembered material, if any.
    pub fn exit_debug(&mut self) -> Option<Material> {
        let original = self.saved_material.take()?;
        self.material = original;
        Some(original)
    }
}

/// Everything a [`RecordingSink`] has received, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCall {
    UploadMesh {
        id: MeshId,
        vertex_count: usize,
        index_count: usize,
        material: Material,
    },
    ReplacePositions {
        id: MeshId,
        positions: Vec<Vec3>,
    },
    SetMaterial {
        id: MeshId,
        material: Material,
    },
    SetCamera(CameraTransform),
    SetLight(LightTransform),
    SetLightIndicator(LightIndicator),
}

/// Sink that draws nothing and records every call, for headless runs.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub calls: Vec<SceneCall>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<SceneCall> {
        std::mem::take(&mut self.calls)
    }
}

impl SceneSink for RecordingSink {
    fn upload_mesh(
        &mut self,
        id: MeshId,
        topology: &MeshTopology,
        positions: &[Vec3],
        material: Material,
    ) -> anyhow::Result<()> {
        self.calls.push(SceneCall::UploadMesh {
            id,
            vertex_count: positions.len(),
            index_count: topology.indices.len(),
            material,
        });
        Ok(())
    }

    fn replace_positions(&mut self, id: MeshId, positions: &[Vec3]) -> anyhow::Result<()> {
        self.calls.push(SceneCall::ReplacePositions {
            id,
            positions: positions.to_vec(),
        });
        Ok(())
    }

    fn set_material(&mut self, id: MeshId, material: Material) -> anyhow::Result<()> {
        self.calls.push(SceneCall::SetMaterial { id, material });
        Ok(())
    }

    fn set_camera(&mut self, camera: &CameraTransform) {
        self.calls.push(SceneCall::SetCamera(*camera));
    }

    fn set_light(&mut self, light: &LightTransform) {
        self.calls.push(SceneCall::SetLight(*light));
    }

    fn set_light_indicator(&mut self, indicator: &LightIndicator) {
        self.calls.push(SceneCall::SetLightIndicator(*indicator));
    }
}
