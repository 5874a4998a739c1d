use crate::fusion::OrientationFilter;
use crate::protocol::{self, MOTION_REPORT, REPORT_LEN};
use crate::types::Buttons;
use crate::units::{self, TICKS_PER_REPORT};
use crate::DriverError;
use glam::{Quat, Vec3};

/// Per-device sample pipeline.
///
/// Decodes each incoming report, normalizes it against the stored tick
/// reference, feeds the orientation filter and keeps the latest queryable
/// state. Single-threaded and poll-driven: the owner calls
/// [`handle_report`](Tracker::handle_report) once per transport read, in
/// arrival order. A cycle with no report simply leaves the tick reference
/// in place for the next good one.
pub struct Tracker<F> {
    filter: F,
    /// Arrival counter standing in for the device tick clock; the motion
    /// report carries no tick field of its own.
    tick: u32,
    /// Tick value of the previously processed sample, `None` until the
    /// first motion report arrives.
    prev_tick: Option<u32>,
    orientation: Quat,
    buttons: Buttons,
    battery: u8,
}

impl<F: OrientationFilter> Tracker<F> {
    pub fn new(filter: F) -> Self {
        Self {
            filter,
            tick: 0,
            prev_tick: None,
            orientation: Quat::IDENTITY,
            buttons: Buttons::default(),
            battery: 0,
        }
    }

    /// Process one raw HID report.
    ///
    /// A motion report updates orientation, buttons and battery. Any other
    /// discriminator is surfaced as [`DriverError::UnknownReport`] with all
    /// state left untouched; the condition is non-fatal and the next motion
    /// report resumes from the stored tick reference.
    pub fn handle_report(&mut self, report: &[u8; REPORT_LEN]) -> Result<(), DriverError> {
        if report[0] != MOTION_REPORT {
            return Err(DriverError::UnknownReport(report[0]));
        }

        let raw = protocol::decode(report);

        self.tick = self.tick.wrapping_add(TICKS_PER_REPORT);
        let (sample, prev_tick) = units::normalize(&raw, self.prev_tick, self.tick);
        self.prev_tick = Some(prev_tick);

        self.filter.update(sample.dt, sample.gyro, sample.accel, sample.mag);
        self.orientation = self.filter.orientation();
        self.buttons = raw.buttons;
        self.battery = raw.battery;

        Ok(())
    }

    /// Latest fused orientation; identity until the first motion report.
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// The headset tracks rotation only; position is always the origin.
    pub fn position(&self) -> Vec3 {
        Vec3::ZERO
    }

    /// Placeholder "no distortion" coefficients. The panel's real
    /// coefficients are unknown, so callers must not expect visually
    /// correct distortion compensation.
    pub fn distortion_k(&self) -> [f32; 6] {
        [0.0; 6]
    }

    /// Latest button state; all released until the first motion report.
    pub fn buttons(&self) -> Buttons {
        self.buttons
    }

    /// Latest battery level; 0 until the first motion report.
    pub fn battery(&self) -> u8 {
        self.battery
    }

    /// Digital control states in reporting order:
    /// home, back, select, volume up, volume down.
    pub fn controls_state(&self) -> [bool; 5] {
        let b = self.buttons;
        [b.home(), b.back(), b.select(), b.vol_up(), b.vol_down()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{FIRST_SAMPLE_TICKS, TICK_LEN};

    /// Filter stub that records every forwarded sample and reports a fixed
    /// non-identity orientation once it has been fed.
    #[derive(Default)]
    struct Recording {
        calls: Vec<(f32, Vec3, Vec3, Vec3)>,
    }

    impl OrientationFilter for Recording {
        fn update(&mut self, dt: f32, gyro: Vec3, accel: Vec3, mag: Vec3) {
            self.calls.push((dt, gyro, accel, mag));
        }

        fn orientation(&self) -> Quat {
            if self.calls.is_empty() {
                Quat::IDENTITY
            } else {
                Quat::from_rotation_y(0.5)
            }
        }
    }

    fn motion_report(buttons: u8, battery: u8) -> [u8; REPORT_LEN] {
        let mut report = [0u8; REPORT_LEN];
        report[0] = MOTION_REPORT;
        report[56] = buttons;
        report[57] = battery;
        report
    }

    #[test]
    fn defaults_before_any_report() {
        let t = Tracker::new(Recording::default());
        assert_eq!(t.orientation(), Quat::IDENTITY);
        assert_eq!(t.position(), Vec3::ZERO);
        assert_eq!(t.distortion_k(), [0.0; 6]);
        assert_eq!(t.buttons(), Buttons::default());
        assert_eq!(t.battery(), 0);
        assert_eq!(t.controls_state(), [false; 5]);
    }

    #[test]
    fn motion_report_updates_state_and_feeds_the_filter() {
        let mut t = Tracker::new(Recording::default());
        t.handle_report(&motion_report(0b0000_0101, 80)).unwrap();

        assert_eq!(t.battery(), 80);
        assert_eq!(t.controls_state(), [true, false, true, false, false]);
        assert_eq!(t.orientation(), Quat::from_rotation_y(0.5));

        let calls = &t.filter.calls;
        assert_eq!(calls.len(), 1);
        let (dt, gyro, accel, mag) = calls[0];
        assert_eq!(dt, FIRST_SAMPLE_TICKS as f32 * TICK_LEN);
        assert_eq!(gyro, Vec3::ZERO);
        assert_eq!(accel, Vec3::ZERO);
        assert_eq!(mag, Vec3::ZERO);
    }

    #[test]
    fn subsequent_reports_use_the_arrival_tick_delta() {
        let mut t = Tracker::new(Recording::default());
        t.handle_report(&motion_report(0, 50)).unwrap();
        t.handle_report(&motion_report(0, 50)).unwrap();

        let calls = &t.filter.calls;
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].0, TICKS_PER_REPORT as f32 * TICK_LEN);
    }

    #[test]
    fn unknown_discriminator_is_rejected_and_changes_nothing() {
        let mut t = Tracker::new(Recording::default());
        t.handle_report(&motion_report(0b0000_0001, 90)).unwrap();

        let mut bogus = motion_report(0b0011_1111, 10);
        bogus[0] = 0x02;
        match t.handle_report(&bogus) {
            Err(DriverError::UnknownReport(0x02)) => {}
            other => panic!("expected UnknownReport, got {other:?}"),
        }

        // State still reflects the last good report.
        assert_eq!(t.battery(), 90);
        assert!(t.buttons().home());
        assert_eq!(t.filter.calls.len(), 1);

        // The next good report keeps the normal cadence.
        t.handle_report(&motion_report(0, 91)).unwrap();
        assert_eq!(t.filter.calls.len(), 2);
        assert_eq!(t.filter.calls[1].0, TICKS_PER_REPORT as f32 * TICK_LEN);
    }

    #[test]
    fn physical_units_reach_the_filter() {
        let mut report = motion_report(0, 0);
        // accel x = 10000 -> 1 g, mag z = 250 -> 2.5 field units.
        report[1..4].copy_from_slice(&10_000i32.to_le_bytes()[..3]);
        report[53..56].copy_from_slice(&250i32.to_le_bytes()[..3]);

        let mut t = Tracker::new(Recording::default());
        t.handle_report(&report).unwrap();

        let (_, _, accel, mag) = t.filter.calls[0];
        assert!((accel.x - 1.0).abs() < 1e-6);
        assert!((mag.z - 2.5).abs() < 1e-6);
    }
}
