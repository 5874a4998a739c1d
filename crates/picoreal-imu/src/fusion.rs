use glam::{Quat, Vec3};

/// Boundary to the orientation estimator that consumes normalized samples.
///
/// The pipeline forwards every accepted motion report through this trait;
/// any estimator that integrates `(dt, gyro, accel, mag)` into a quaternion
/// can sit behind it.
pub trait OrientationFilter {
    /// Advance the estimate by one sample. `gyro` is in rad/s, `accel` in g,
    /// `mag` in device field units, `dt` in seconds.
    fn update(&mut self, dt: f32, gyro: Vec3, accel: Vec3, mag: Vec3);

    /// Current orientation estimate.
    fn orientation(&self) -> Quat;
}

/// MARG Madgwick filter with per-sample integration steps.
///
/// Gyro rates are integrated every sample; the gradient-descent corrective
/// step steers the estimate toward the measured gravity and Earth-field
/// directions. A zero-norm magnetometer reading falls back to the 6-axis
/// gravity-only objective, and a zero-norm accelerometer reading skips the
/// corrective step entirely.
pub struct Madgwick {
    // Quaternion as scalar components, w first.
    q0: f32,
    q1: f32,
    q2: f32,
    q3: f32,
    beta: f32,
}

impl Madgwick {
    /// `beta` is the filter gain; 0.05-0.2 is the usable range, higher is
    /// more responsive and noisier.
    pub fn new(beta: f32) -> Self {
        Self {
            q0: 1.0,
            q1: 0.0,
            q2: 0.0,
            q3: 0.0,
            beta,
        }
    }

    fn step(&mut self, dt: f32, gyro: Vec3, accel: Vec3, mag: Vec3) {
        let q = [self.q0, self.q1, self.q2, self.q3];
        let [q0, q1, q2, q3] = q;

        // Quaternion rate of change from angular velocity.
        let mut q_dot = [
            0.5 * (-q1 * gyro.x - q2 * gyro.y - q3 * gyro.z),
            0.5 * (q0 * gyro.x + q2 * gyro.z - q3 * gyro.y),
            0.5 * (q0 * gyro.y - q1 * gyro.z + q3 * gyro.x),
            0.5 * (q0 * gyro.z + q1 * gyro.y - q2 * gyro.x),
        ];

        // Corrective step toward the measured field directions. A zero
        // accelerometer reading carries no direction, so the update is pure
        // gyro integration; a zero magnetometer reading drops the field
        // objective and leaves the 6-axis gravity term.
        if accel.length_squared() > 0.0 {
            let a = accel.normalize();
            let s = if mag.length_squared() > 0.0 {
                Self::marg_gradient(q, a, mag.normalize())
            } else {
                Self::gravity_gradient(q, a)
            };

            let s_norm_sq: f32 = s.iter().map(|v| v * v).sum();
            if s_norm_sq > 0.0 {
                let inv_s = 1.0 / s_norm_sq.sqrt();
                for (d, s) in q_dot.iter_mut().zip(s) {
                    *d -= self.beta * s * inv_s;
                }
            }
        }

        // Integrate over the sample interval and renormalize.
        let q0 = q0 + q_dot[0] * dt;
        let q1 = q1 + q_dot[1] * dt;
        let q2 = q2 + q_dot[2] * dt;
        let q3 = q3 + q_dot[3] * dt;

        let inv_norm = 1.0 / (q0 * q0 + q1 * q1 + q2 * q2 + q3 * q3).sqrt();
        self.q0 = q0 * inv_norm;
        self.q1 = q1 * inv_norm;
        self.q2 = q2 * inv_norm;
        self.q3 = q3 * inv_norm;
    }

    /// Objective gradient toward measured gravity alone (6-axis update).
    /// `a` must be normalized.
    fn gravity_gradient(q: [f32; 4], a: Vec3) -> [f32; 4] {
        let [q0, q1, q2, q3] = q;

        let f1 = 2.0 * (q1 * q3 - q0 * q2) - a.x;
        let f2 = 2.0 * (q0 * q1 + q2 * q3) - a.y;
        let f3 = 2.0 * (0.5 - q1 * q1 - q2 * q2) - a.z;

        [
            -2.0 * q2 * f1 + 2.0 * q1 * f2,
            2.0 * q3 * f1 + 2.0 * q0 * f2 - 4.0 * q1 * f3,
            -2.0 * q0 * f1 + 2.0 * q3 * f2 - 4.0 * q2 * f3,
            2.0 * q1 * f1 + 2.0 * q2 * f2,
        ]
    }

    /// Objective gradient toward measured gravity and the Earth magnetic
    /// field (full MARG update). `a` and `m` must be normalized.
    fn marg_gradient(q: [f32; 4], a: Vec3, m: Vec3) -> [f32; 4] {
        let [q0, q1, q2, q3] = q;
        let (q0q0, q0q1, q0q2, q0q3) = (q0 * q0, q0 * q1, q0 * q2, q0 * q3);
        let (q1q1, q1q2, q1q3) = (q1 * q1, q1 * q2, q1 * q3);
        let (q2q2, q2q3, q3q3) = (q2 * q2, q2 * q3, q3 * q3);

        // Reference direction of the Earth field in the horizontal/vertical
        // frame implied by the current estimate. bx2/bz2 carry a factor 2.
        let hx = m.x * q0q0 - 2.0 * q0 * m.y * q3 + 2.0 * q0 * m.z * q2 + m.x * q1q1
            + 2.0 * q1 * m.y * q2
            + 2.0 * q1 * m.z * q3
            - m.x * q2q2
            - m.x * q3q3;
        let hy = 2.0 * q0 * m.x * q3 + m.y * q0q0 - 2.0 * q0 * m.z * q1 + 2.0 * q1 * m.x * q2
            - m.y * q1q1
            + m.y * q2q2
            + 2.0 * q2 * m.z * q3
            - m.y * q3q3;
        let bx2 = (hx * hx + hy * hy).sqrt();
        let bz2 = -2.0 * q0 * m.x * q2 + 2.0 * q0 * m.y * q1 + m.z * q0q0 + 2.0 * q1 * m.x * q3
            - m.z * q1q1
            + 2.0 * q2 * m.y * q3
            - m.z * q2q2
            + m.z * q3q3;

        // Gravity and field residuals.
        let f_gx = 2.0 * (q1q3 - q0q2) - a.x;
        let f_gy = 2.0 * (q0q1 + q2q3) - a.y;
        let f_gz = 2.0 * (0.5 - q1q1 - q2q2) - a.z;
        let f_mx = bx2 * (0.5 - q2q2 - q3q3) + bz2 * (q1q3 - q0q2) - m.x;
        let f_my = bx2 * (q1q2 - q0q3) + bz2 * (q0q1 + q2q3) - m.y;
        let f_mz = bx2 * (q0q2 + q1q3) + bz2 * (0.5 - q1q1 - q2q2) - m.z;

        [
            -2.0 * q2 * f_gx + 2.0 * q1 * f_gy - bz2 * q2 * f_mx
                + (-bx2 * q3 + bz2 * q1) * f_my
                + bx2 * q2 * f_mz,
            2.0 * q3 * f_gx + 2.0 * q0 * f_gy - 4.0 * q1 * f_gz + bz2 * q3 * f_mx
                + (bx2 * q2 + bz2 * q0) * f_my
                + (bx2 * q3 - 2.0 * bz2 * q1) * f_mz,
            -2.0 * q0 * f_gx + 2.0 * q3 * f_gy - 4.0 * q2 * f_gz
                + (-2.0 * bx2 * q2 - bz2 * q0) * f_mx
                + (bx2 * q1 + bz2 * q3) * f_my
                + (bx2 * q0 - 2.0 * bz2 * q2) * f_mz,
            2.0 * q1 * f_gx + 2.0 * q2 * f_gy + (-2.0 * bx2 * q3 + bz2 * q1) * f_mx
                + (-bx2 * q0 + bz2 * q2) * f_my
                + bx2 * q1 * f_mz,
        ]
    }
}

impl OrientationFilter for Madgwick {
    fn update(&mut self, dt: f32, gyro: Vec3, accel: Vec3, mag: Vec3) {
        self.step(dt, gyro, accel, mag);
    }

    fn orientation(&self) -> Quat {
        Quat::from_xyzw(self.q1, self.q2, self.q3, self.q0)
    }
}
