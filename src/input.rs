//! Input boundary: drag gestures and named parameter changes.
//!
//! Parameter values arrive from range-limited controls. The declared ranges
//! live here so that both the control surface (which clamps) and the core
//! (which rejects) agree on them.

use std::collections::VecDeque;

use crate::error::{Result, ViewerError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRange {
    pub min: f32,
    pub max: f32,
}

impl ParameterRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Slider behaviour: pins `value` to the nearest end of the range.
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

pub const LIGHT_ORBIT_X_RANGE: ParameterRange = ParameterRange::new(-180.0, 180.0);
pub const LIGHT_ORBIT_Y_RANGE: ParameterRange = ParameterRange::new(-90.0, 90.0);
pub const LIGHT_INTENSITY_RANGE: ParameterRange = ParameterRange::new(0.0, 2.0);
pub const CRUSH_ALPHA_RANGE: ParameterRange = ParameterRange::new(0.0, 1.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterChange {
    LightOrbitX(f32),
    LightOrbitY(f32),
    LightIntensity(f32),
    CrushAlpha(f32),
    DebugMode(bool),
}

impl ParameterChange {
    /// Builds a change from its wire name. Boolean parameters treat any
    /// non-zero value as `true`.
    pub fn from_name(name: &str, value: f32) -> Result<Self> {
        let change = match name {
            "orbitAngleX" => Self::LightOrbitX(value),
            "orbitAngleY" => Self::LightOrbitY(value),
            "intensity" => Self::LightIntensity(value),
            "crushAlpha" => Self::CrushAlpha(value),
            "debugToggle" => Self::DebugMode(value != 0.0),
            _ => return Err(ViewerError::UnknownParameter(name.to_string())),
        };
        change.validate()?;
        Ok(change)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::LightOrbitX(_) => "orbitAngleX",
            Self::LightOrbitY(_) => "orbitAngleY",
            Self::LightIntensity(_) => "intensity",
            Self::CrushAlpha(_) => "crushAlpha",
            Self::DebugMode(_) => "debugToggle",
        }
    }

    fn numeric(&self) -> Option<(f32, ParameterRange)> {
        match *self {
            Self::LightOrbitX(value) => Some((value, LIGHT_ORBIT_X_RANGE)),
            Self::LightOrbitY(value) => Some((value, LIGHT_ORBIT_Y_RANGE)),
            Self::LightIntensity(value) => Some((value, LIGHT_INTENSITY_RANGE)),
            Self::CrushAlpha(value) => Some((value, CRUSH_ALPHA_RANGE)),
            Self::DebugMode(_) => None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self.numeric() {
            Some((value, range)) if !range.contains(value) => {
                Err(ViewerError::ParameterOutOfRange {
                    name: self.name(),
                    value,
                    min: range.min,
                    max: range.max,
                })
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    DragBegin,
    /// Pointer movement in pixels since the previous move.
    DragMove { dx: f32, dy: f32 },
    DragEnd,
    Parameter(ParameterChange),
}

pub trait InputSource {
    fn next_event(&mut self) -> Option<InputEvent>;
}

/// FIFO of pending events. Window callbacks push, the viewer drains.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl From<Vec<InputEvent>> for InputQueue {
    fn from(events: Vec<InputEvent>) -> Self {
        Self {
            events: events.into(),
        }
    }
}

impl InputSource for InputQueue {
    fn next_event(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(
            ParameterChange::from_name("orbitAngleX", -90.0),
            Ok(ParameterChange::LightOrbitX(-90.0))
        );
        assert_eq!(
            ParameterChange::from_name("debugToggle", 1.0),
            Ok(ParameterChange::DebugMode(true))
        );
        assert_eq!(
            ParameterChange::from_name("shininess", 1.0),
            Err(ViewerError::UnknownParameter("shininess".to_string()))
        );
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = ParameterChange::from_name("orbitAngleY", 91.0).unwrap_err();
        assert_eq!(
            err,
            ViewerError::ParameterOutOfRange {
                name: "orbitAngleY",
                value: 91.0,
                min: -90.0,
                max: 90.0,
            }
        );
        assert!(ParameterChange::CrushAlpha(f32::NAN).validate().is_err());
        assert!(ParameterChange::LightIntensity(2.0).validate().is_ok());
    }

    #[test]
    fn test_queue_is_fifo() {
        let mut queue = InputQueue::from(vec![InputEvent::DragBegin, InputEvent::DragEnd]);
        queue.push(InputEvent::DragMove { dx: 1.0, dy: 2.0 });
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.next_event(), Some(InputEvent::DragBegin));
        assert_eq!(queue.next_event(), Some(InputEvent::DragEnd));
        assert_eq!(queue.next_event(), Some(InputEvent::DragMove { dx: 1.0, dy: 2.0 }));
        assert_eq!(queue.next_event(), None);
    }
}
