//! CRC-8 checksum used by the frame codec
//!
//! Polynomial 0x07, initial value 0x00, MSB first, no reflection and no
//! final XOR (the "CRC-8/SMBUS" parameter set).

/// Generator polynomial (x^8 + x^2 + x + 1)
pub const CRC8_POLY: u8 = 0x07;

/// Initial register value
pub const CRC8_INIT: u8 = 0x00;

/// Fold a single byte into a running CRC value
#[inline]
pub const fn crc8_update(mut crc: u8, byte: u8) -> u8 {
    crc ^= byte;
    let mut bit = 0;
    while bit < 8 {
        crc = if crc & 0x80 != 0 {
            (crc << 1) ^ CRC8_POLY
        } else {
            crc << 1
        };
        bit += 1;
    }
    crc
}

/// Compute the CRC-8 of a byte span
pub fn crc8(bytes: &[u8]) -> u8 {
    bytes.iter().fold(CRC8_INIT, |crc, &b| crc8_update(crc, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(crc8(&[]), 0x00);
    }

    #[test]
    fn test_check_value() {
        // Standard check value for CRC-8/SMBUS
        assert_eq!(crc8(b"123456789"), 0xF4);
    }

    #[test]
    fn test_sensor_and_plate_vectors() {
        // [length, command, payload] of "car detected" and "plate registered"
        assert_eq!(crc8(&[0x02, 0x03, 0x01]), 0xEE);
        assert_eq!(crc8(&[0x02, 0x04, 0x01]), 0x85);
        assert_eq!(crc8(&[0x02, 0x03, 0x00]), 0xE9);
    }

    #[test]
    fn test_update_matches_slice() {
        let data = [0xAA, 0x01, 0x7F, 0x80, 0xFF];
        let mut crc = CRC8_INIT;
        for &b in &data {
            crc = crc8_update(crc, b);
        }
        assert_eq!(crc, crc8(&data));
    }

    proptest! {
        #[test]
        fn prop_deterministic(data in proptest::collection::vec(any::<u8>(), 0..64)) {
            prop_assert_eq!(crc8(&data), crc8(&data));
        }

        #[test]
        fn prop_single_bit_flip_detected(
            data in proptest::collection::vec(any::<u8>(), 1..32),
            index in any::<prop::sample::Index>(),
            bit in 0u8..8,
        ) {
            let mut corrupted = data.clone();
            let i = index.index(corrupted.len());
            corrupted[i] ^= 1 << bit;
            prop_assert_ne!(crc8(&data), crc8(&corrupted));
        }
    }
}
