//! Headless demo: the level, one character and a fixed-rate tick loop.

use crate::character::spawn_character;
use crate::config::GameConfig;
use crate::level::spawn_level;
use crate::script::InputScript;
use crate::systems;
use anyhow::{Context, Result};
use controller::{CharacterMotion, CharacterMotionState};
use engine_core::{Time, Transform, Vec3};
use hecs::{Entity, World};
use input::InputState;
use physics::{CharacterBody, PhysicsWorld, SteeringMovement};

/// Snapshot of the character for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterStatus {
    pub state: CharacterMotionState,
    pub position: Vec3,
    pub feet: Vec3,
    pub velocity: Vec3,
    /// Facing around +Y in degrees.
    pub heading: f32,
}

pub struct Demo {
    pub world: World,
    pub physics: PhysicsWorld,
    pub input: InputState,
    pub time: Time,
    pub character: Entity,
    script: InputScript,
    steering: SteeringMovement,
    log_every: u64,
    tick: u64,
}

impl Demo {
    pub fn new(config: &GameConfig) -> Result<Self> {
        if !(config.tick_rate.is_finite() && config.tick_rate > 0.0) {
            anyhow::bail!("tick_rate must be positive, got {}", config.tick_rate);
        }

        let mut world = World::new();
        let mut physics = PhysicsWorld::new(config.character.gravity);
        spawn_level(&mut world, &mut physics);
        let character = spawn_character(&mut world, &mut physics, config)
            .context("failed to spawn character")?;

        let mut time = Time::new();
        time.set_fixed_rate(config.tick_rate);
        time.set_paused(config.paused);
        if time.is_paused() {
            log::info!("Clock starts paused; the character will not move");
        }

        Ok(Self {
            world,
            physics,
            input: InputState::new(),
            time,
            character,
            script: InputScript::new(config.script.clone()),
            steering: config.movement,
            log_every: config.log_every,
            tick: 0,
        })
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Run one frame of one fixed step: input, camera, then whatever fixed
    /// updates the clock has accumulated, then presentation.
    pub fn tick(&mut self) -> Result<()> {
        self.input.begin_frame();
        self.script.feed(self.tick, &mut self.input);
        self.input.latch_mouse_delta();

        self.time.advance(self.time.fixed_timestep());

        systems::input_system(&mut self.world, &self.input);
        systems::camera_orbit_system(&mut self.world, &self.input);
        while self.time.should_fixed_update() {
            self.fixed_update(self.time.fixed_timestep_seconds())?;
        }
        systems::character_sync_system(&mut self.world, &self.physics);

        if self.log_every > 0 && self.tick % self.log_every == 0 {
            if let Some(status) = self.status() {
                log::info!(
                    "tick {:>4} {:<10} pos ({:.2}, {:.2}, {:.2}) vel ({:.2}, {:.2}, {:.2}) facing {:.0}°",
                    self.tick,
                    status.state,
                    status.position.x,
                    status.position.y,
                    status.position.z,
                    status.velocity.x,
                    status.velocity.y,
                    status.velocity.z,
                    status.heading,
                );
            }
        }

        self.tick += 1;
        Ok(())
    }

    /// Platforms, rigid bodies, then characters.
    fn fixed_update(&mut self, dt: f32) -> Result<()> {
        systems::platform_system(&mut self.world, &mut self.physics, dt);
        self.physics.step(dt);
        systems::physics_character_system(&mut self.world, &mut self.physics, &self.steering, dt)
            .with_context(|| format!("character update failed on tick {}", self.tick))
    }

    /// Tick `ticks` times, then log a summary.
    pub fn run(&mut self, ticks: u64) -> Result<()> {
        for _ in 0..ticks {
            self.tick()?;
        }

        let status = self
            .status()
            .context("character entity disappeared from the world")?;
        log::info!(
            "Finished {} ticks ({:.2}s simulated, script {}): {} with feet at ({:.2}, {:.2}, {:.2})",
            self.time.frame_count(),
            self.time.elapsed_seconds(),
            if self.script.is_finished() { "done" } else { "unfinished" },
            status.state,
            status.feet.x,
            status.feet.y,
            status.feet.z,
        );
        Ok(())
    }

    pub fn status(&self) -> Option<CharacterStatus> {
        let mut query = self
            .world
            .query_one::<(&CharacterMotion, &CharacterBody, &Transform)>(self.character)
            .ok()?;
        let (motion, body, transform) = query.get()?;
        Some(CharacterStatus {
            state: motion.state,
            position: body.position(&self.physics)?,
            feet: body.foot_position(&self.physics)?,
            velocity: motion.velocity,
            heading: transform.yaw().to_degrees(),
        })
    }
}
