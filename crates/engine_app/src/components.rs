//! Bunnymark components.

use std::cell::Cell;
use std::rc::Rc;

use engine_component::Component;
use engine_ecs::{World, WorldError};
use engine_math::{Transform2D, Vec2};
use engine_system::Rgba;

/// Pixels per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity(pub Vec2);

impl Component for Velocity {
    fn type_name() -> &'static str {
        "Velocity"
    }
}

/// Switch shared by every bunny of one run; flipping it starts or stops hue
/// cycling for all of them at once.
pub type ColorToggle = Rc<Cell<bool>>;

/// Hue in degrees. Cycles while `colorful` is on.
#[derive(Debug, Clone)]
pub struct Hue {
    pub colorful: ColorToggle,
    pub value: f64,
}

impl Hue {
    #[must_use]
    pub fn is_colorful(&self) -> bool {
        self.colorful.get()
    }
}

impl Component for Hue {
    fn type_name() -> &'static str {
        "Hue"
    }
}

/// A solid square drawn at the entity's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub size: u32,
    pub color: Rgba,
}

impl Component for Sprite {
    fn type_name() -> &'static str {
        "Sprite"
    }
}

/// Register every component the demo uses.
pub fn register_all(world: &mut World) -> Result<(), WorldError> {
    world.register_component::<Transform2D>()?;
    world.register_component::<Velocity>()?;
    world.register_component::<Hue>()?;
    world.register_component::<Sprite>()?;
    Ok(())
}

/// Fully saturated color for `hue` degrees.
#[must_use]
pub fn hue_to_rgba(hue: f64) -> Rgba {
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    let (r, g, b) = match h as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    let channel = |c: f64| (c * 255.0).round() as u8;
    [channel(r), channel(g), channel(b), 255]
}
