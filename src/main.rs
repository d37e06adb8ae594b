//! Interactive can viewer.
//!
//! - Left drag: orbit the camera
//! - Left/Right: light orbit X, Up/Down: light orbit Y
//! - `+`/`-`: light intensity, `[`/`]`: crush
//! - D: debug wireframe, R: reset panel, Q/Escape: exit

use std::{path::Path, sync::Arc};

use anyhow::Result;
use can_viewer::{
    capture,
    config::ViewerConfig,
    gpu::GpuContext,
    input::{
        InputEvent, InputQueue, ParameterChange, CRUSH_ALPHA_RANGE, LIGHT_INTENSITY_RANGE,
        LIGHT_ORBIT_X_RANGE, LIGHT_ORBIT_Y_RANGE,
    },
    CanViewer, Renderer,
};
use clap::Parser;
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, Event, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowBuilder},
};

const ORBIT_STEP: f32 = 5.0;
const INTENSITY_STEP: f32 = 0.1;
const CRUSH_STEP: f32 = 0.05;

fn main() -> Result<()> {
    env_logger::init();
    let config = ViewerConfig::parse();
    let viewer = CanViewer::new(&config)?;

    match &config.screenshot {
        Some(path) => run_headless(&config, viewer, path),
        None => run_interactive(&config, viewer),
    }
}

fn run_headless(config: &ViewerConfig, viewer: CanViewer, output_path: &Path) -> Result<()> {
    log::info!("Rendering a single frame to {}", output_path.display());

    let gpu = pollster::block_on(GpuContext::headless())?;
    let mut renderer = Renderer::new(gpu, None, config.window_width, config.window_height, true)?;
    viewer.attach(&mut renderer)?;
    renderer.render_to_texture();

    let frame = renderer.capture_frame()?;
    let (width, height) = renderer.size();
    capture::save_png(output_path, &frame, width, height)
}

fn run_interactive(config: &ViewerConfig, mut viewer: CanViewer) -> Result<()> {
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Can Viewer")
            .with_inner_size(PhysicalSize::new(config.window_width, config.window_height))
            .build(&event_loop)?,
    );

    let (gpu, surface) = pollster::block_on(GpuContext::with_window(window.clone()))?;
    let size = window.inner_size();
    let mut renderer = Renderer::new(gpu, Some(surface), size.width, size.height, false)?;
    viewer.attach(&mut renderer)?;

    let mut state = ApplicationState {
        panel: ParameterPanel::new(config),
        queue: InputQueue::new(),
        mouse_pressed: false,
        last_mouse_pos: None,
    };

    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Wait);

        let Event::WindowEvent { event, .. } = event else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(physical_size) => {
                renderer.resize(physical_size.width, physical_size.height);
                window.request_redraw();
            }
            WindowEvent::MouseInput { state: element_state, button, .. } => {
                handle_mouse_input(&mut state, element_state, button);
            }
            WindowEvent::CursorMoved { position, .. } => {
                handle_cursor_moved(&mut state, position);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => match state.panel.on_key(code) {
                PanelAction::Quit => elwt.exit(),
                PanelAction::Emit(changes) => {
                    for change in changes {
                        state.queue.push(InputEvent::Parameter(change));
                    }
                }
                PanelAction::Ignore => {}
            },
            WindowEvent::RedrawRequested => handle_redraw(&mut renderer, &window, elwt),
            _ => {}
        }

        if !state.queue.is_empty() {
            match viewer.pump(&mut state.queue, &mut renderer) {
                Ok(handled) => log::trace!("Handled {handled} input events"),
                Err(e) => log::warn!("Input rejected: {e:#}"),
            }
            window.request_redraw();
        }
    })?;

    Ok(())
}

struct ApplicationState {
    panel: ParameterPanel,
    queue: InputQueue,
    mouse_pressed: bool,
    last_mouse_pos: Option<PhysicalPosition<f64>>,
}

fn handle_mouse_input(
    state: &mut ApplicationState,
    element_state: ElementState,
    button: MouseButton,
) {
    if button != MouseButton::Left {
        return;
    }
    let pressed = element_state == ElementState::Pressed;
    if pressed != state.mouse_pressed {
        state.mouse_pressed = pressed;
        state.queue.push(if pressed {
            InputEvent::DragBegin
        } else {
            InputEvent::DragEnd
        });
    }
}

fn handle_cursor_moved(state: &mut ApplicationState, position: PhysicalPosition<f64>) {
    if let (true, Some(last)) = (state.mouse_pressed, state.last_mouse_pos) {
        state.queue.push(InputEvent::DragMove {
            dx: (position.x - last.x) as f32,
            dy: (position.y - last.y) as f32,
        });
    }
    state.last_mouse_pos = Some(position);
}

fn handle_redraw(renderer: &mut Renderer, window: &Window, elwt: &EventLoopWindowTarget<()>) {
    match renderer.render() {
        Ok(()) => {}
        Err(wgpu::SurfaceError::Lost) => {
            log::warn!("Surface lost, reconfiguring");
            let size = window.inner_size();
            renderer.resize(size.width, size.height);
        }
        Err(wgpu::SurfaceError::OutOfMemory) => {
            log::error!("Out of GPU memory");
            elwt.exit();
        }
        Err(e) => log::warn!("Render error: {e:?}"),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum PanelAction {
    Emit(Vec<ParameterChange>),
    Quit,
    Ignore,
}

/// Keyboard stand-in for a slider panel. Values are clamped to the declared
/// ranges before they are emitted, the way a slider pins at its ends.
#[derive(Debug, Clone)]
struct ParameterPanel {
    initial: PanelValues,
    current: PanelValues,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PanelValues {
    orbit_x: f32,
    orbit_y: f32,
    intensity: f32,
    crush: f32,
    debug: bool,
}

impl PanelValues {
    fn changes(&self) -> Vec<ParameterChange> {
        vec![
            ParameterChange::LightOrbitX(self.orbit_x),
            ParameterChange::LightOrbitY(self.orbit_y),
            ParameterChange::LightIntensity(self.intensity),
            ParameterChange::CrushAlpha(self.crush),
            ParameterChange::DebugMode(self.debug),
        ]
    }
}

impl ParameterPanel {
    fn new(config: &ViewerConfig) -> Self {
        let values = PanelValues {
            orbit_x: config.light_orbit_x,
            orbit_y: config.light_orbit_y,
            intensity: config.light_intensity,
            crush: config.crush,
            debug: false,
        };
        Self {
            initial: values,
            current: values,
        }
    }

    fn on_key(&mut self, code: KeyCode) -> PanelAction {
        match code {
            KeyCode::KeyQ | KeyCode::Escape => return PanelAction::Quit,
            KeyCode::KeyR => {
                self.current = self.initial;
                return PanelAction::Emit(self.current.changes());
            }
            _ => {}
        }

        let values = &mut self.current;
        let change = match code {
            KeyCode::ArrowLeft | KeyCode::ArrowRight => {
                let step = if code == KeyCode::ArrowLeft { -ORBIT_STEP } else { ORBIT_STEP };
                values.orbit_x = LIGHT_ORBIT_X_RANGE.clamp(values.orbit_x + step);
                ParameterChange::LightOrbitX(values.orbit_x)
            }
            KeyCode::ArrowDown | KeyCode::ArrowUp => {
                let step = if code == KeyCode::ArrowDown { -ORBIT_STEP } else { ORBIT_STEP };
                values.orbit_y = LIGHT_ORBIT_Y_RANGE.clamp(values.orbit_y + step);
                ParameterChange::LightOrbitY(values.orbit_y)
            }
            KeyCode::Minus | KeyCode::NumpadSubtract | KeyCode::Equal | KeyCode::NumpadAdd => {
                let step = if matches!(code, KeyCode::Minus | KeyCode::NumpadSubtract) {
                    -INTENSITY_STEP
                } else {
                    INTENSITY_STEP
                };
                values.intensity = LIGHT_INTENSITY_RANGE.clamp(values.intensity + step);
                ParameterChange::LightIntensity(values.intensity)
            }
            KeyCode::BracketLeft | KeyCode::BracketRight => {
                let step = if code == KeyCode::BracketLeft { -CRUSH_STEP } else { CRUSH_STEP };
                values.crush = CRUSH_ALPHA_RANGE.clamp(values.crush + step);
                ParameterChange::CrushAlpha(values.crush)
            }
            KeyCode::KeyD => {
                values.debug = !values.debug;
                ParameterChange::DebugMode(values.debug)
            }
            _ => return PanelAction::Ignore,
        };
        PanelAction::Emit(vec![change])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_clamps_to_range() {
        let config = ViewerConfig {
            crush: 0.98,
            ..ViewerConfig::default()
        };
        let mut panel = ParameterPanel::new(&config);
        assert_eq!(
            panel.on_key(KeyCode::BracketRight),
            PanelAction::Emit(vec![ParameterChange::CrushAlpha(1.0)])
        );
        assert_eq!(
            panel.on_key(KeyCode::BracketRight),
            PanelAction::Emit(vec![ParameterChange::CrushAlpha(1.0)])
        );
    }

    #[test]
    fn test_panel_reset_restores_config() {
        let config = ViewerConfig::default();
        let mut panel = ParameterPanel::new(&config);
        panel.on_key(KeyCode::KeyD);
        panel.on_key(KeyCode::ArrowUp);

        let PanelAction::Emit(changes) = panel.on_key(KeyCode::KeyR) else {
            panic!("reset should emit changes");
        };
        assert!(changes.contains(&ParameterChange::DebugMode(false)));
        assert!(changes.contains(&ParameterChange::LightOrbitY(config.light_orbit_y)));
        assert_eq!(changes.len(), 5);
    }

    #[test]
    fn test_quit_and_unmapped_keys() {
        let mut panel = ParameterPanel::new(&ViewerConfig::default());
        assert_eq!(panel.on_key(KeyCode::Escape), PanelAction::Quit);
        assert_eq!(panel.on_key(KeyCode::KeyZ), PanelAction::Ignore);
    }
}
