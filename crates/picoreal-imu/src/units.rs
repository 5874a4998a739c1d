//! Fixed unit-conversion and timing constants for the motion report stream.
//!
//! The scale factors are properties of the headset firmware, not tunables;
//! they live here as named constants so the conversion contract can be
//! audited and tested in isolation.

use crate::types::{PhysicalSample, RawSample};
use glam::Vec3;
use std::f32::consts::PI;

/// Accelerometer: device word × 1e-4 = g.
pub const ACCEL_SCALE: f32 = 0.0001;
/// Gyroscope: device word × 1e-4 = deg/s, converted on to rad/s.
pub const GYRO_SCALE: f32 = 0.0001 * PI / 180.0;
/// Magnetometer: device word × 0.01 = calibration field units.
pub const MAG_SCALE: f32 = 0.01;

/// Duration of one device tick in seconds.
///
/// This value implies a 500 kHz tick clock, a factor of 1000 faster than
/// the headset's nominal 500 Hz report rate. Hardware captures integrate
/// correctly with it, so it is kept as-is rather than "corrected"; the true
/// tick clock rate is unverified against vendor documentation.
pub const TICK_LEN: f32 = 1.0 / 500_000.0;

/// Tick delta assumed for the very first sample, before a reference exists.
pub const FIRST_SAMPLE_TICKS: u32 = 500;

/// Nominal ticks between consecutive reports. Motion reports carry no tick
/// field, so the pipeline advances its counter by this much per arrival.
pub const TICKS_PER_REPORT: u32 = 500;

/// Convert a decoded sample to physical units and derive the elapsed time
/// from the tick counter. Returns the sample together with the new
/// previous-tick reference (always `cur_tick`).
///
/// Tick wraparound is not clamped: `cur_tick < prev_tick` wraps the 32-bit
/// subtraction and yields a very large `dt`.
pub fn normalize(
    raw: &RawSample,
    prev_tick: Option<u32>,
    cur_tick: u32,
) -> (PhysicalSample, u32) {
    let ticks = match prev_tick {
        Some(prev) => cur_tick.wrapping_sub(prev),
        None => FIRST_SAMPLE_TICKS,
    };

    let scaled = |axes: [i32; 3], scale: f32| {
        Vec3::new(axes[0] as f32, axes[1] as f32, axes[2] as f32) * scale
    };

    let sample = PhysicalSample {
        accel: scaled(raw.acceleration, ACCEL_SCALE),
        gyro: scaled(raw.gyroscope, GYRO_SCALE),
        mag: scaled(raw.magnetometer, MAG_SCALE),
        dt: ticks as f32 * TICK_LEN,
    };

    (sample, cur_tick)
}
