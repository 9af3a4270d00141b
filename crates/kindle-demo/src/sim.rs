use std::f32::consts::TAU;

use kindle_engine::game_loop::{LoopControl, TickTime};

/// Radians per simulated second.
const SPIN_SPEED: f32 = 1.2;

/// Seconds for the background to cycle through its palette once.
const PULSE_PERIOD: f32 = 6.0;

/// Simulation advanced by the update thread and read by the renderer.
#[derive(Debug, Default, Clone)]
pub struct Spin {
    pub angle: f32,
    pub elapsed: f32,
    pub ticks: u64,
}

impl Spin {
    pub fn step(&mut self, time: TickTime) -> LoopControl {
        let dt = time.dt.as_secs_f32();
        self.elapsed += dt;
        self.angle = (self.angle + SPIN_SPEED * dt).rem_euclid(TAU);
        self.ticks = time.tick_index;

        if time.tick_index % 600 == 0 {
            log::debug!("tick {} at {:.1}s simulated", time.tick_index, self.elapsed);
        }
        LoopControl::Continue
    }

    /// Background color, slowly pulsing with simulated time.
    pub fn clear_color(&self) -> wgpu::Color {
        let phase = (self.elapsed / PULSE_PERIOD).fract() * TAU;
        let pulse = 0.5 + 0.5 * phase.sin();
        wgpu::Color {
            r: 0.02 + 0.06 * f64::from(pulse),
            g: 0.03,
            b: 0.08 + 0.10 * f64::from(1.0 - pulse),
            a: 1.0,
        }
    }
}
