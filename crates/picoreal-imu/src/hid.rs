use crate::protocol::REPORT_LEN;
use crate::DriverError;
use hidapi::{HidApi, HidDevice};
use std::ffi::{CStr, CString};
use tracing::debug;

/// Pico Interactive USB vendor ID.
pub const VENDOR_ID: u16 = 0x2d40;
/// Pico Real Plus product ID.
pub const PRODUCT_ID: u16 = 0x0012;

/// Blocking HID transport for the headset's sensor interface.
pub struct HidTransport {
    handle: HidDevice,
}

impl HidTransport {
    /// Open the first connected headset.
    pub fn open_first(api: &HidApi) -> Result<Self, DriverError> {
        let info = api
            .device_list()
            .find(|d| d.vendor_id() == VENDOR_ID && d.product_id() == PRODUCT_ID)
            .ok_or(DriverError::NotFound)?;

        debug!(path = ?info.path(), "opening headset HID interface");
        Ok(Self {
            handle: info.open_device(api)?,
        })
    }

    /// Open a headset by platform device path, as returned by
    /// [`enumerate`](Self::enumerate).
    pub fn open_path(api: &HidApi, path: &CStr) -> Result<Self, DriverError> {
        debug!(?path, "opening headset HID interface");
        Ok(Self {
            handle: api.open_path(path)?,
        })
    }

    /// Device paths of all connected headsets, usable with
    /// [`open_path`](Self::open_path).
    pub fn enumerate(api: &HidApi) -> Vec<CString> {
        api.device_list()
            .filter(|d| d.vendor_id() == VENDOR_ID && d.product_id() == PRODUCT_ID)
            .map(|d| d.path().to_owned())
            .collect()
    }

    /// Blocking read of one fixed-size report.
    pub fn read_report(&self) -> Result<[u8; REPORT_LEN], DriverError> {
        let mut report = [0u8; REPORT_LEN];
        let n = self.handle.read(&mut report)?;
        if n != REPORT_LEN {
            return Err(DriverError::ShortReport(n));
        }
        Ok(report)
    }
}
