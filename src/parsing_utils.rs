use encoding_rs::mem::decode_latin1;

/// Byte order of a multi-byte field. Replays are little endian throughout; big endian
/// exists for completeness of the cursor primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endian {
    #[default]
    Little,
    Big,
}

#[inline]
pub fn le_u16(d: &[u8]) -> u16 {
    u16::from_le_bytes(d[..2].try_into().unwrap())
}

#[inline]
pub fn le_u32(d: &[u8]) -> u32 {
    u32::from_le_bytes(d[..4].try_into().unwrap())
}

#[inline]
pub fn le_f32(d: &[u8]) -> f32 {
    f32::from_le_bytes(d[..4].try_into().unwrap())
}

#[inline]
pub fn be_u16(d: &[u8]) -> u16 {
    u16::from_be_bytes(d[..2].try_into().unwrap())
}

#[inline]
pub fn be_u32(d: &[u8]) -> u32 {
    u32::from_be_bytes(d[..4].try_into().unwrap())
}

#[inline]
pub fn be_f32(d: &[u8]) -> f32 {
    f32::from_be_bytes(d[..4].try_into().unwrap())
}

/// Strings in a replay are single byte encoded where each byte is its own code point, so a
/// byte of 0xe9 is always `é` and never the start of a multi-byte sequence.
pub fn decode_str(input: &[u8]) -> String {
    decode_latin1(input).into_owned()
}

/// Formats the version float to three significant digits, keeping trailing zeros, so that
/// 1.0 becomes "1.00" and 1.125 becomes "1.13". Ties round away from zero. Magnitudes outside
/// of the fixed notation range switch to exponent notation ("1.23e+3").
pub fn format_version(version: f32) -> String {
    let value = f64::from(version);
    if value.is_nan() {
        return String::from("NaN");
    } else if value.is_infinite() {
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{}Infinity", sign);
    } else if value == 0.0 {
        // Negative zero included
        return String::from("0.00");
    }

    let mut exponent = value.abs().log10().floor() as i32;
    let mut digits = significant_digits(value.abs(), exponent);

    // Rounding to three digits may carry into the next power of ten (9.999 -> 10.0)
    if digits >= 1000 {
        exponent += 1;
        digits = significant_digits(value.abs(), exponent);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let digits = digits.to_string();
    if (-6..3).contains(&exponent) {
        let body = if exponent < 0 {
            let zeros = "0".repeat((-exponent - 1) as usize);
            format!("0.{}{}", zeros, digits)
        } else {
            let (int, frac) = digits.split_at(exponent as usize + 1);
            if frac.is_empty() {
                int.to_string()
            } else {
                format!("{}.{}", int, frac)
            }
        };
        format!("{}{}", sign, body)
    } else {
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}{}.{}e{}{}",
            sign,
            &digits[..1],
            &digits[1..],
            exp_sign,
            exponent.abs()
        )
    }
}

/// The three leading digits of `magnitude`, whose leading digit sits at the `exponent` power
/// of ten, rounded half away from zero
fn significant_digits(magnitude: f64, exponent: i32) -> u64 {
    let shift = 2 - exponent;
    let scaled = if shift >= 0 {
        magnitude * 10f64.powi(shift)
    } else {
        magnitude / 10f64.powi(-shift)
    };
    scaled.round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_three_significant_digits() {
        assert_eq!(format_version(1.0), "1.00");
        assert_eq!(format_version(1.2), "1.20");
        assert_eq!(format_version(1.126), "1.13");
        assert_eq!(format_version(12.5), "12.5");
        assert_eq!(format_version(0.0625), "0.0625");
        assert_eq!(format_version(9.999), "10.0");
        assert_eq!(format_version(0.0), "0.00");
        assert_eq!(format_version(123.4), "123");
    }

    #[test]
    fn version_ties_round_away_from_zero() {
        assert_eq!(format_version(1.125), "1.13");
        assert_eq!(format_version(1.375), "1.38");
        assert_eq!(format_version(10.25), "10.3");
        assert_eq!(format_version(0.3125), "0.313");
        assert_eq!(format_version(-1.125), "-1.13");
    }

    #[test]
    fn version_non_finite_and_negative_zero() {
        assert_eq!(format_version(-0.0), "0.00");
        assert_eq!(format_version(f32::INFINITY), "Infinity");
        assert_eq!(format_version(f32::NEG_INFINITY), "-Infinity");
        assert_eq!(format_version(f32::NAN), "NaN");
    }

    #[test]
    fn version_exponent_notation() {
        assert_eq!(format_version(1234.0), "1.23e+3");
        assert_eq!(format_version(-1234.0), "-1.23e+3");
        assert_eq!(format_version(1000.0), "1.00e+3");
        assert_eq!(format_version(0.000_000_1), "1.00e-7");
    }

    #[test]
    fn latin1_maps_each_byte() {
        assert_eq!(decode_str(b"Ligier"), "Ligier");
        assert_eq!(decode_str(&[0x4e, 0xfc, 0x72]), "N\u{fc}r");
        assert_eq!(decode_str(&[0x80]), "\u{80}");
    }
}
