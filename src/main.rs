use anyhow::Result;
use hidapi::HidApi;
use picoreal_config::AppConfig;
use picoreal_imu::hid::HidTransport;
use picoreal_imu::HmdDevice;
use tracing::{info, warn};

/// Consecutive transport failures tolerated before giving up.
const MAX_READ_FAILURES: u32 = 10;

fn main() -> Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "picoreal=info,picoreal_imu=info".into()),
        )
        .init();

    info!("Pico Real Plus tracking monitor starting");

    let config = picoreal_config::load_config().unwrap_or_else(|e| {
        warn!(?e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    let api = HidApi::new()?;
    let paths = HidTransport::enumerate(&api);
    info!(count = paths.len(), ?paths, "Headsets detected");

    let mut device = HmdDevice::open_first(&api, config.fusion.beta)?;
    info!(beta = config.fusion.beta, "Headset opened, streaming");

    let mut samples: u64 = 0;
    let mut read_failures: u32 = 0;
    loop {
        match device.poll() {
            Ok(()) => read_failures = 0,
            Err(e) => {
                // A failed read skips this cycle; tracking resumes from the
                // stored tick reference on the next good report.
                read_failures += 1;
                warn!(?e, read_failures, "Report read failed");
                if read_failures >= MAX_READ_FAILURES {
                    anyhow::bail!("giving up after {MAX_READ_FAILURES} consecutive read failures");
                }
                continue;
            }
        }

        samples += 1;
        if samples % 500 == 0 {
            let q = device.orientation();
            let controls = device.controls_state();
            info!(
                samples,
                battery = device.battery(),
                qx = q.x,
                qy = q.y,
                qz = q.z,
                qw = q.w,
                ?controls,
                "Tracking"
            );
        }
    }
}
