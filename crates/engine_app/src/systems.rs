//! Bunnymark systems.

use anyhow::Result;
use engine_component::{Entity, Query};
use engine_math::{Transform2D, Vec2};
use engine_system::{Draw, Rgba, Scheduler, Surface, SurfaceRef, System, TRANSPARENT, Update};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::components::{ColorToggle, Hue, Sprite, Velocity, hue_to_rgba};

const BACKGROUND: Rgba = [16, 16, 24, 255];
const SPRITE_SIZE: u32 = 4;
const MAX_SPEED: f32 = 240.0;

/// Spawns `batch` bunnies per tick until `remaining` reaches zero.
#[derive(Debug)]
pub struct Spawner {
    remaining: usize,
    batch: usize,
    bounds: Vec2,
    colorful: ColorToggle,
    rng: StdRng,
}

impl Spawner {
    /// Every spawned bunny shares `colorful`. The same `seed` scatters the
    /// same bunnies.
    #[must_use]
    pub fn new(
        total: usize,
        batch: usize,
        bounds: Vec2,
        seed: u64,
        colorful: ColorToggle,
    ) -> Self {
        Self {
            remaining: total,
            batch: batch.max(1),
            bounds,
            colorful,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    fn spawn_one(&mut self, ctx: &mut Scheduler) -> Result<Entity> {
        let position = Vec2::new(
            self.rng.gen_range(0.0..=self.bounds.x),
            self.rng.gen_range(0.0..=self.bounds.y),
        );
        let velocity = Vec2::new(
            self.rng.gen_range(-MAX_SPEED..=MAX_SPEED),
            self.rng.gen_range(-MAX_SPEED..=MAX_SPEED),
        );
        let hue = Hue {
            colorful: self.colorful.clone(),
            value: self.rng.gen_range(0.0..360.0),
        };
        let sprite = Sprite {
            size: SPRITE_SIZE,
            color: hue_to_rgba(hue.value),
        };
        let entity = ctx.world_mut().spawn_with((
            Transform2D::from_position(position),
            Velocity(velocity),
            hue,
            sprite,
        ))?;
        Ok(entity)
    }
}

impl Update for Spawner {
    fn update(&mut self, ctx: &mut Scheduler) -> Result<()> {
        let count = self.batch.min(self.remaining);
        for _ in 0..count {
            self.spawn_one(ctx)?;
        }
        self.remaining -= count;
        if count > 0 {
            debug!(
                spawned = count,
                remaining = self.remaining,
                "spawned bunnies"
            );
        }
        Ok(())
    }
}

impl System for Spawner {
    fn as_update(&mut self) -> Option<&mut dyn Update> {
        Some(self)
    }

    fn name(&self) -> &str {
        "spawner"
    }
}

/// Integrates velocity and reflects bunnies off the surface edges.
#[derive(Debug)]
pub struct Bounce {
    bounds: Vec2,
    query: Query,
}

impl Bounce {
    #[must_use]
    pub fn new(bounds: Vec2) -> Self {
        Self {
            bounds,
            query: Query::new().with::<Transform2D>().with::<Velocity>(),
        }
    }
}

impl Update for Bounce {
    fn update(&mut self, ctx: &mut Scheduler) -> Result<()> {
        let dt = ctx.clock().delta_secs();
        let world = ctx.world_mut();
        for entity in world.query(&self.query) {
            let Some(&Velocity(mut velocity)) = world.get::<Velocity>(entity) else {
                continue;
            };
            let Some(transform) = world.get_mut::<Transform2D>(entity) else {
                continue;
            };
            let mut position = transform.position + velocity * dt;
            if position.x < 0.0 || position.x > self.bounds.x {
                velocity.x = -velocity.x;
                position.x = position.x.clamp(0.0, self.bounds.x);
            }
            if position.y < 0.0 || position.y > self.bounds.y {
                velocity.y = -velocity.y;
                position.y = position.y.clamp(0.0, self.bounds.y);
            }
            transform.position = position;
            world.insert(entity, Velocity(velocity))?;
        }
        Ok(())
    }
}

impl System for Bounce {
    fn as_update(&mut self) -> Option<&mut dyn Update> {
        Some(self)
    }

    fn name(&self) -> &str {
        "bounce"
    }
}

/// Clears the screen and draws every sprite.
#[derive(Debug)]
pub struct SpriteRenderer {
    query: Query,
}

impl SpriteRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            query: Query::new().with::<Transform2D>().with::<Sprite>(),
        }
    }
}

impl Default for SpriteRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Draw for SpriteRenderer {
    fn draw(&mut self, ctx: &mut Scheduler, surface: &mut Surface) -> Result<()> {
        surface.clear(BACKGROUND);
        let world = ctx.world();
        for entity in world.query(&self.query) {
            if let Some(transform) = world.get::<Transform2D>(entity)
                && let Some(sprite) = world.get::<Sprite>(entity)
            {
                let p = transform.position.round();
                let (x, y) = (p.x as i32, p.y as i32);
                surface.fill_rect(x, y, sprite.size, sprite.size, sprite.color);
            }
        }
        Ok(())
    }
}

impl System for SpriteRenderer {
    fn as_draw(&mut self) -> Option<&mut dyn Draw> {
        Some(self)
    }

    fn name(&self) -> &str {
        "sprite_renderer"
    }
}

/// Tracks the entity count and draws it as a bar into its own target.
#[derive(Debug, Default)]
pub struct Hud {
    entities: usize,
}

impl Hud {
    pub const BAR: Rgba = [255, 255, 255, 255];
    /// Entities represented by one bar pixel.
    pub const PER_PIXEL: usize = 10;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Update for Hud {
    fn update(&mut self, ctx: &mut Scheduler) -> Result<()> {
        self.entities = ctx.world().entity_count();
        Ok(())
    }
}

impl Draw for Hud {
    fn draw(&mut self, _ctx: &mut Scheduler, surface: &mut Surface) -> Result<()> {
        surface.clear(TRANSPARENT);
        let limit = surface.width() as usize;
        let width = (self.entities / Self::PER_PIXEL).min(limit) as u32;
        surface.fill_rect(0, 0, width, surface.height(), Self::BAR);
        Ok(())
    }
}

impl System for Hud {
    fn as_update(&mut self) -> Option<&mut dyn Update> {
        Some(self)
    }

    fn as_draw(&mut self) -> Option<&mut dyn Draw> {
        Some(self)
    }

    fn name(&self) -> &str {
        "hud"
    }
}

/// Blits an offscreen surface onto the screen.
#[derive(Debug)]
pub struct Compositor {
    source: SurfaceRef,
    x: i32,
    y: i32,
}

impl Compositor {
    #[must_use]
    pub fn new(source: SurfaceRef, x: i32, y: i32) -> Self {
        Self { source, x, y }
    }
}

impl Draw for Compositor {
    fn draw(&mut self, _ctx: &mut Scheduler, surface: &mut Surface) -> Result<()> {
        surface.blit(&self.source.borrow(), self.x, self.y);
        Ok(())
    }
}

impl System for Compositor {
    fn as_draw(&mut self) -> Option<&mut dyn Draw> {
        Some(self)
    }

    fn name(&self) -> &str {
        "compositor"
    }
}
