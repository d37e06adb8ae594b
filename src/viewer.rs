//! The viewer core: single owner of the orbit, light and morph state.
//!
//! Events come in through [`CanViewer::handle`]; only the outputs an event
//! actually affects are pushed to the [`SceneSink`].

use anyhow::Result;

use crate::camera::OrbitController;
use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::geometry::CanGeometry;
use crate::input::{InputEvent, InputSource, ParameterChange};
use crate::light::LightController;
use crate::morph::MorphPair;
use crate::scene::{MeshId, MeshSlot, SceneSink, CAN_MATERIAL, DEBUG_MATERIAL};

pub const BAND_MESH: MeshId = MeshId(0);
pub const TOP_CAP_MESH: MeshId = MeshId(1);
pub const BOTTOM_CAP_MESH: MeshId = MeshId(2);

pub struct CanViewer {
    geometry: CanGeometry,
    morph: MorphPair,
    orbit: OrbitController,
    light: LightController,
    slots: Vec<MeshSlot>,
    debug_mode: bool,
    drag_sensitivity: f32,
}

impl CanViewer {
    pub fn new(config: &ViewerConfig) -> std::result::Result<Self, ViewerError> {
        config.validate()?;

        let geometry = CanGeometry::build(&config.band_params())?;
        let mut morph = MorphPair::new(
            geometry.band.positions.clone(),
            geometry.crushed_band.clone(),
        )?;
        morph.set_alpha(config.crush)?;

        let light = LightController::new(
            config.light_orbit_x,
            config.light_orbit_y,
            config.light_intensity,
            config.ambient,
        )
        .with_distance(config.light_distance);

        let slots = [BAND_MESH, TOP_CAP_MESH, BOTTOM_CAP_MESH]
            .into_iter()
            .map(|id| MeshSlot::new(id, CAN_MATERIAL))
            .collect();

        Ok(Self {
            geometry,
            morph,
            orbit: OrbitController::new(config.camera_distance),
            light,
            slots,
            debug_mode: false,
            drag_sensitivity: config.drag_sensitivity,
        })
    }

    pub fn geometry(&self) -> &CanGeometry {
        &self.geometry
    }

    pub fn morph(&self) -> &MorphPair {
        &self.morph
    }

    pub fn orbit(&self) -> &OrbitController {
        &self.orbit
    }

    pub fn light(&self) -> &LightController {
        &self.light
    }

    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    pub fn slot(&self, id: MeshId) -> Option<&MeshSlot> {
        self.slots.iter().find(|slot| slot.id == id)
    }

    /// Pushes the full scene: topology, positions, materials, camera, light.
    pub fn attach(&self, sink: &mut dyn SceneSink) -> Result<()> {
        for slot in &self.slots {
            let (topology, positions) = match slot.id {
                BAND_MESH => (&self.geometry.band.topology, self.morph.blended()),
                TOP_CAP_MESH => (
                    &self.geometry.top_cap.topology,
                    self.geometry.top_cap.positions.clone(),
                ),
                BOTTOM_CAP_MESH => (
                    &self.geometry.bottom_cap.topology,
                    self.geometry.bottom_cap.positions.clone(),
                ),
                MeshId(other) => return Err(ViewerError::UnknownMesh(other).into()),
            };
            sink.upload_mesh(slot.id, topology, &positions, slot.material())?;
        }

        sink.set_camera(&self.orbit.camera_transform());
        self.emit_light(sink);
        Ok(())
    }

    pub fn handle(&mut self, event: InputEvent, sink: &mut dyn SceneSink) -> Result<()> {
        match event {
            InputEvent::DragBegin => self.orbit.begin_drag(),
            InputEvent::DragEnd => self.orbit.end_drag(),
            InputEvent::DragMove { dx, dy } => {
                let moved = self
                    .orbit
                    .accumulate(dx * self.drag_sensitivity, dy * self.drag_sensitivity);
                if moved {
                    sink.set_camera(&self.orbit.camera_transform());
                } else {
                    log::debug!("Drag move ({dx}, {dy}) ignored");
                }
            }
            InputEvent::Parameter(change) => self.apply_parameter(change, sink)?,
        }
        Ok(())
    }

    /// Drains `source`, stopping at the first rejected event. Returns the
    /// number of events handled.
    pub fn pump(
        &mut self,
        source: &mut dyn InputSource,
        sink: &mut dyn SceneSink,
    ) -> Result<usize> {
        let mut handled = 0;
        while let Some(event) = source.next_event() {
            self.handle(event, sink)?;
            handled += 1;
        }
        Ok(handled)
    }

    fn apply_parameter(&mut self, change: ParameterChange, sink: &mut dyn SceneSink) -> Result<()> {
        change.validate()?;
        log::debug!("Parameter {} changed: {:?}", change.name(), change);

        match change {
            ParameterChange::LightOrbitX(degrees) => {
                self.light.set_orbit_x(degrees);
                self.emit_light(sink);
            }
            ParameterChange::LightOrbitY(degrees) => {
                self.light.set_orbit_y(degrees);
                self.emit_light(sink);
            }
            ParameterChange::LightIntensity(intensity) => {
                self.light.set_intensity(intensity);
                self.emit_light(sink);
            }
            ParameterChange::CrushAlpha(alpha) => {
                let previous = self.morph.alpha();
                let positions = self.morph.set_alpha(alpha)?;
                if let Err(e) = sink.replace_positions(BAND_MESH, &positions) {
                    self.morph.set_alpha(previous)?;
                    return Err(e.context("Failed to upload crushed band positions"));
                }
            }
            ParameterChange::DebugMode(enabled) => self.set_debug_mode(enabled, sink)?,
        }
        Ok(())
    }

    /// Swaps every mesh to the debug material, or back to what it had.
    ///
    /// A mesh whose swap the sink rejects keeps its previous material and
    /// `debug_mode` stays unchanged. Meshes swapped before the failure stay
    /// swapped, so repeating the call finishes the toggle.
    pub fn set_debug_mode(&mut self, enabled: bool, sink: &mut dyn SceneSink) -> Result<()> {
        for slot in &mut self.slots {
            let swap = if enabled {
                slot.enter_debug(DEBUG_MATERIAL)
            } else {
                slot.exit_debug()
            };
            let Some(material) = swap else {
                continue;
            };
            if let Err(e) = sink.set_material(slot.id, material) {
                if enabled {
                    slot.exit_debug();
                } else {
                    slot.enter_debug(DEBUG_MATERIAL);
                }
                return Err(e.context(format!("Failed to set material of mesh {}", slot.id.0)));
            }
        }
        if self.debug_mode != enabled {
            log::info!("Debug mode {}", if enabled { "on" } else { "off" });
        }
        self.debug_mode = enabled;
        Ok(())
    }

    fn emit_light(&self, sink: &mut dyn SceneSink) {
        sink.set_light(&self.light.light_transform());
        sink.set_light_indicator(&self.light.indicator());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{RecordingSink, SceneCall};

    fn small_config() -> ViewerConfig {
        ViewerConfig {
            segments: 8,
            height_segments: 4,
            ..ViewerConfig::default()
        }
    }

    #[test]
    fn test_attach_uploads_three_meshes() {
        let viewer = CanViewer::new(&small_config()).unwrap();
        let mut sink = RecordingSink::new();
        viewer.attach(&mut sink).unwrap();

        let uploads = sink
            .calls
            .iter()
            .filter(|call| matches!(call, SceneCall::UploadMesh { .. }))
            .count();
        assert_eq!(uploads, 3);
        assert!(matches!(sink.calls[3], SceneCall::SetCamera(_)));
        assert!(matches!(sink.calls[4], SceneCall::SetLight(_)));
        assert!(matches!(sink.calls[5], SceneCall::SetLightIndicator(_)));
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = ViewerConfig {
            height_segments: 0,
            ..small_config()
        };
        assert_eq!(
            CanViewer::new(&config).err(),
            Some(ViewerError::TooFewHeightSegments(0))
        );
    }

    #[test]
    fn test_rejected_parameter_leaves_state() {
        let mut viewer = CanViewer::new(&small_config()).unwrap();
        let mut sink = RecordingSink::new();
        let result = viewer.handle(
            InputEvent::Parameter(ParameterChange::CrushAlpha(1.2)),
            &mut sink,
        );
        assert!(result.is_err());
        assert_eq!(viewer.morph().alpha(), 0.0);
        assert!(sink.calls.is_empty());
    }
}
