//! Bunnymark scripts.

use anyhow::Result;
use engine_component::Entity;
use engine_math::Transform2D;
use engine_system::{EntityDraw, EntityUpdate, Rgba, Scheduler, Script, Surface};

use crate::components::{Hue, Sprite, hue_to_rgba};

/// Rotates the hue of colorful bunnies and recolors their sprite.
#[derive(Debug)]
pub struct HueCycle {
    /// Degrees per second.
    speed: f64,
}

impl HueCycle {
    #[must_use]
    pub fn new(speed: f64) -> Self {
        Self { speed }
    }
}

impl EntityUpdate for HueCycle {
    fn update(&mut self, ctx: &mut Scheduler, entity: Entity) -> Result<()> {
        let step = self.speed * ctx.clock().delta().as_secs_f64();
        let world = ctx.world_mut();
        let Some(hue) = world.get_mut::<Hue>(entity) else {
            return Ok(());
        };
        if !hue.is_colorful() {
            return Ok(());
        }
        hue.value = (hue.value + step).rem_euclid(360.0);
        let color = hue_to_rgba(hue.value);
        if let Some(sprite) = world.get_mut::<Sprite>(entity) {
            sprite.color = color;
        }
        Ok(())
    }
}

impl Script for HueCycle {
    fn as_update(&mut self) -> Option<&mut dyn EntityUpdate> {
        Some(self)
    }

    fn name(&self) -> &str {
        "hue_cycle"
    }
}

/// Draws a one-pixel border around each sprite.
#[derive(Debug)]
pub struct Outline {
    color: Rgba,
}

impl Outline {
    #[must_use]
    pub fn new(color: Rgba) -> Self {
        Self { color }
    }
}

impl EntityDraw for Outline {
    fn draw(
        &mut self,
        ctx: &mut Scheduler,
        entity: Entity,
        surface: &mut Surface,
    ) -> Result<()> {
        let world = ctx.world();
        let Some(transform) = world.get::<Transform2D>(entity) else {
            return Ok(());
        };
        let Some(sprite) = world.get::<Sprite>(entity) else {
            return Ok(());
        };
        let p = transform.position.round();
        let (x, y) = (p.x as i32 - 1, p.y as i32 - 1);
        let side = sprite.size + 2;
        let far = side as i32 - 1;
        surface.fill_rect(x, y, side, 1, self.color);
        surface.fill_rect(x, y + far, side, 1, self.color);
        surface.fill_rect(x, y, 1, side, self.color);
        surface.fill_rect(x + far, y, 1, side, self.color);
        Ok(())
    }
}

impl Script for Outline {
    fn as_draw(&mut self) -> Option<&mut dyn EntityDraw> {
        Some(self)
    }

    fn name(&self) -> &str {
        "outline"
    }
}
