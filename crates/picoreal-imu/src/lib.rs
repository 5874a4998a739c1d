//! Driver for the Pico Real Plus headset's IMU and button panel.
//!
//! Reads 64-byte HID reports, decodes the fixed-point sensor fields,
//! normalizes them into physical units with a per-sample time delta, and
//! feeds an orientation filter. The decode and normalize stages are pure
//! functions; all device state lives in [`pipeline::Tracker`].

pub mod fusion;
pub mod hid;
pub mod pipeline;
pub mod protocol;
pub mod types;
pub mod units;

use fusion::Madgwick;
use glam::{Quat, Vec3};
use hid::HidTransport;
use hidapi::HidApi;
use pipeline::Tracker;
use thiserror::Error;
use tracing::warn;
use types::Buttons;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("unknown message header: {0:#04x}")]
    UnknownReport(u8),
    #[error("no headset found (2d40:0012)")]
    NotFound,
    #[error("short report: {0} of 64 bytes")]
    ShortReport(usize),
    #[error(transparent)]
    Hid(#[from] hidapi::HidError),
}

/// A connected headset: HID transport paired with the sample pipeline and
/// the bundled Madgwick filter.
pub struct HmdDevice {
    transport: HidTransport,
    tracker: Tracker<Madgwick>,
}

impl HmdDevice {
    /// Open the first connected headset. `beta` tunes the Madgwick filter.
    pub fn open_first(api: &HidApi, beta: f32) -> Result<Self, DriverError> {
        Ok(Self {
            transport: HidTransport::open_first(api)?,
            tracker: Tracker::new(Madgwick::new(beta)),
        })
    }

    /// Read and process the next report, blocking until one arrives.
    ///
    /// Unrecognized report types are logged and skipped; tracking state
    /// carries over unchanged to the next motion report.
    pub fn poll(&mut self) -> Result<(), DriverError> {
        let report = self.transport.read_report()?;
        match self.tracker.handle_report(&report) {
            Ok(()) => Ok(()),
            Err(DriverError::UnknownReport(header)) => {
                warn!(header, "ignoring unrecognized report");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    pub fn orientation(&self) -> Quat {
        self.tracker.orientation()
    }

    pub fn position(&self) -> Vec3 {
        self.tracker.position()
    }

    pub fn distortion_k(&self) -> [f32; 6] {
        self.tracker.distortion_k()
    }

    pub fn buttons(&self) -> Buttons {
        self.tracker.buttons()
    }

    pub fn battery(&self) -> u8 {
        self.tracker.battery()
    }

    pub fn controls_state(&self) -> [bool; 5] {
        self.tracker.controls_state()
    }
}
