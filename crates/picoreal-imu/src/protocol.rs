use crate::types::{Buttons, RawSample};

/// Size of every HID report from the headset.
pub const REPORT_LEN: usize = 64;
/// Discriminator value identifying a motion/IMU report.
pub const MOTION_REPORT: u8 = 0x01;

// Field offsets within the 63-byte payload that follows the discriminator.
// Bytes 20..46 are reserved and skipped.
const ACCEL_OFFSET: usize = 0;
const GYRO_OFFSET: usize = 9;
const TEMP_OFFSET: usize = 18;
const MAG_OFFSET: usize = 46;
const BUTTONS_OFFSET: usize = 55;
const BATTERY_OFFSET: usize = 56;

/// Decode one motion report into device-native integers.
///
/// Byte 0 is the report discriminator and is not interpreted here; the
/// caller has already matched it against [`MOTION_REPORT`]. Pure over its
/// input: the same bytes always decode to the same sample.
pub fn decode(report: &[u8; REPORT_LEN]) -> RawSample {
    let payload = &report[1..];

    RawSample {
        acceleration: read_vec_i24(payload, ACCEL_OFFSET),
        gyroscope: read_vec_i24(payload, GYRO_OFFSET),
        magnetometer: read_vec_i24(payload, MAG_OFFSET),
        temperature: i16::from_le_bytes([payload[TEMP_OFFSET], payload[TEMP_OFFSET + 1]]),
        buttons: Buttons(payload[BUTTONS_OFFSET]),
        battery: payload[BATTERY_OFFSET],
    }
}

/// Three consecutive 24-bit little-endian signed words.
fn read_vec_i24(payload: &[u8], offset: usize) -> [i32; 3] {
    [
        read_i24(payload, offset),
        read_i24(payload, offset + 3),
        read_i24(payload, offset + 6),
    ]
}

/// Assemble a 24-bit little-endian word, sign-extending from bit 23.
fn read_i24(payload: &[u8], offset: usize) -> i32 {
    let word = payload[offset] as u32
        | (payload[offset + 1] as u32) << 8
        | (payload[offset + 2] as u32) << 16;
    if word & 0x0080_0000 != 0 {
        (word | 0xff00_0000) as i32
    } else {
        word as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Place a 24-bit little-endian word at a payload offset.
    fn put_i24(report: &mut [u8; REPORT_LEN], offset: usize, value: i32) {
        let bytes = value.to_le_bytes();
        report[1 + offset..1 + offset + 3].copy_from_slice(&bytes[..3]);
    }

    #[test]
    fn sign_extends_from_bit_23() {
        let mut report = [0u8; REPORT_LEN];
        report[0] = MOTION_REPORT;
        // Most negative 24-bit value on axis 0, most positive on axis 1.
        report[1..4].copy_from_slice(&[0x00, 0x00, 0x80]);
        report[4..7].copy_from_slice(&[0xff, 0xff, 0x7f]);

        let raw = decode(&report);
        assert_eq!(raw.acceleration[0], -8_388_608);
        assert_eq!(raw.acceleration[1], 8_388_607);
    }

    #[test]
    fn minus_one_round_trips() {
        let mut report = [0u8; REPORT_LEN];
        put_i24(&mut report, 9, -1);
        assert_eq!(decode(&report).gyroscope[0], -1);
    }

    #[test]
    fn zero_report_decodes_to_zero_sample() {
        let report = [0u8; REPORT_LEN];
        let raw = decode(&report);
        assert_eq!(raw.acceleration, [0; 3]);
        assert_eq!(raw.gyroscope, [0; 3]);
        assert_eq!(raw.magnetometer, [0; 3]);
        assert_eq!(raw.temperature, 0);
        assert_eq!(raw.buttons, Buttons(0));
        assert_eq!(raw.battery, 0);
    }

    #[test]
    fn fields_come_from_their_documented_offsets() {
        let mut report = [0u8; REPORT_LEN];
        report[0] = MOTION_REPORT;

        put_i24(&mut report, 0, 1);
        put_i24(&mut report, 3, 2);
        put_i24(&mut report, 6, 3);
        put_i24(&mut report, 9, -4);
        put_i24(&mut report, 12, 5);
        put_i24(&mut report, 15, -6);
        report[19..21].copy_from_slice(&(-123i16).to_le_bytes());
        put_i24(&mut report, 46, 7);
        put_i24(&mut report, 49, -8);
        put_i24(&mut report, 52, 9);
        report[56] = 0b0000_0101;
        report[57] = 87;

        let raw = decode(&report);
        assert_eq!(raw.acceleration, [1, 2, 3]);
        assert_eq!(raw.gyroscope, [-4, 5, -6]);
        assert_eq!(raw.temperature, -123);
        assert_eq!(raw.magnetometer, [7, -8, 9]);
        assert_eq!(raw.buttons, Buttons(0b0000_0101));
        assert_eq!(raw.battery, 87);
    }

    #[test]
    fn reserved_bytes_do_not_leak_into_fields() {
        let mut report = [0u8; REPORT_LEN];
        // Fill the reserved region (payload 20..46) with noise.
        for b in &mut report[21..47] {
            *b = 0xff;
        }
        let raw = decode(&report);
        assert_eq!(raw.acceleration, [0; 3]);
        assert_eq!(raw.magnetometer, [0; 3]);
        assert_eq!(raw.battery, 0);
    }

    #[test]
    fn decode_is_deterministic() {
        let mut report = [0u8; REPORT_LEN];
        report[0] = MOTION_REPORT;
        put_i24(&mut report, 0, 4242);
        put_i24(&mut report, 46, -17);
        report[57] = 200;

        assert_eq!(decode(&report), decode(&report));
    }
}
