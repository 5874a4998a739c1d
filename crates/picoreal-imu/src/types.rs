use glam::Vec3;

/// Decoded motion report, still in device-native fixed-point units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSample {
    /// Accelerometer axes, sign-extended from 24-bit words.
    pub acceleration: [i32; 3],
    /// Gyroscope axes, sign-extended from 24-bit words.
    pub gyroscope: [i32; 3],
    /// Magnetometer axes, sign-extended from 24-bit words.
    pub magnetometer: [i32; 3],
    /// Die temperature. Unused downstream but part of the report layout.
    pub temperature: i16,
    /// Control panel flag byte.
    pub buttons: Buttons,
    /// Battery level, 0-255.
    pub battery: u8,
}

/// Sample converted to physical units, ready for sensor fusion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalSample {
    /// Linear acceleration in g.
    pub accel: Vec3,
    /// Angular velocity in rad/s.
    pub gyro: Vec3,
    /// Magnetic field in device calibration units.
    pub mag: Vec3,
    /// Seconds elapsed since the previous sample.
    pub dt: f32,
}

/// Button flag byte from the headset's control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Buttons(pub u8);

impl Buttons {
    pub const HOME: u8 = 1 << 0;
    pub const BACK: u8 = 1 << 1;
    pub const SELECT: u8 = 1 << 2;
    pub const VOL_UP: u8 = 1 << 3;
    pub const VOL_DOWN: u8 = 1 << 4;
    /// Proximity sensor, set while the headset is worn.
    pub const PROX: u8 = 1 << 5;

    pub fn home(self) -> bool {
        self.0 & Self::HOME != 0
    }

    pub fn back(self) -> bool {
        self.0 & Self::BACK != 0
    }

    pub fn select(self) -> bool {
        self.0 & Self::SELECT != 0
    }

    pub fn vol_up(self) -> bool {
        self.0 & Self::VOL_UP != 0
    }

    pub fn vol_down(self) -> bool {
        self.0 & Self::VOL_DOWN != 0
    }

    pub fn proximity(self) -> bool {
        self.0 & Self::PROX != 0
    }
}
