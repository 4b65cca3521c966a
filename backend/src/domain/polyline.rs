//! Encoded polyline codec.
//!
//! The directions provider compresses route geometry into the classic
//! polyline format: each coordinate is scaled by 1e5, delta-encoded against
//! the previous point, zig-zag folded, and packed into 5-bit groups offset
//! by 63 so every group is a printable ASCII character. Bit `0x20` of a
//! group marks that more groups follow for the same value.

use thiserror::Error;

use super::{GeoPoint, GeoPointValidationError};

const PRECISION: f64 = 1e5;
const CHAR_OFFSET: u8 = 63;
const CONTINUATION_BIT: u64 = 0x20;
const GROUP_MASK: u64 = 0x1f;
// Seven groups carry 35 bits, enough for any zig-zagged 32-bit delta.
const MAX_SHIFT: u32 = 35;

/// Failures raised while decoding an encoded polyline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolylineError {
    /// The input ended while a value, or a latitude without its longitude,
    /// was still open.
    #[error("polyline ends mid-sequence at byte {offset}")]
    Unterminated {
        /// Byte offset where more input was expected.
        offset: usize,
    },
    /// A byte fell outside the `?`..=`~` alphabet.
    #[error("polyline byte {byte:#04x} at offset {offset} is not a valid group")]
    InvalidCharacter {
        /// Byte offset of the bad character.
        offset: usize,
        /// The offending byte.
        byte: u8,
    },
    /// A value used more groups than a 32-bit delta can need.
    #[error("polyline value starting at byte {offset} overflows")]
    Overflow {
        /// Byte offset where the value started.
        offset: usize,
    },
    /// A decoded point left the WGS84 domain.
    #[error("decoded point {index} is invalid: {source}")]
    OutOfRange {
        /// Zero-based index of the point.
        index: usize,
        /// The coordinate check that failed.
        source: GeoPointValidationError,
    },
}

/// Decode an encoded polyline into points.
///
/// # Examples
/// ```
/// use wayfinder::domain::polyline;
///
/// let points = polyline::decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@").expect("valid polyline");
/// assert_eq!(points.len(), 3);
/// assert!((points[0].latitude() - 38.5).abs() < 1e-5);
/// assert!((points[2].longitude() + 126.453).abs() < 1e-5);
/// ```
pub fn decode(encoded: &str) -> Result<Vec<GeoPoint>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut cursor = 0;
    let mut latitude: i64 = 0;
    let mut longitude: i64 = 0;
    let mut points = Vec::new();

    while cursor < bytes.len() {
        latitude += read_value(bytes, &mut cursor)?;
        longitude += read_value(bytes, &mut cursor)?;
        let point = GeoPoint::new(latitude as f64 / PRECISION, longitude as f64 / PRECISION)
            .map_err(|source| PolylineError::OutOfRange {
                index: points.len(),
                source,
            })?;
        points.push(point);
    }

    Ok(points)
}

fn read_value(bytes: &[u8], cursor: &mut usize) -> Result<i64, PolylineError> {
    let start = *cursor;
    let mut result: u64 = 0;
    let mut shift: u32 = 0;

    loop {
        let Some(&byte) = bytes.get(*cursor) else {
            return Err(PolylineError::Unterminated { offset: *cursor });
        };
        if !(CHAR_OFFSET..=CHAR_OFFSET + 63).contains(&byte) {
            return Err(PolylineError::InvalidCharacter {
                offset: *cursor,
                byte,
            });
        }
        if shift >= MAX_SHIFT {
            return Err(PolylineError::Overflow { offset: start });
        }
        *cursor += 1;

        let group = u64::from(byte - CHAR_OFFSET);
        result |= (group & GROUP_MASK) << shift;
        shift += 5;
        if group & CONTINUATION_BIT == 0 {
            break;
        }
    }

    let magnitude = (result >> 1) as i64;
    Ok(if result & 1 == 1 { !magnitude } else { magnitude })
}

/// Encode points into a polyline at 5-decimal precision.
///
/// Inverse of [`decode`] for points already rounded to five decimals.
///
/// # Examples
/// ```
/// use wayfinder::domain::{GeoPoint, polyline};
///
/// let points = [
///     GeoPoint::new(38.5, -120.2).expect("valid"),
///     GeoPoint::new(40.7, -120.95).expect("valid"),
///     GeoPoint::new(43.252, -126.453).expect("valid"),
/// ];
/// assert_eq!(polyline::encode(&points), "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
/// ```
pub fn encode(points: &[GeoPoint]) -> String {
    let mut encoded = String::new();
    let mut previous_latitude: i64 = 0;
    let mut previous_longitude: i64 = 0;

    for point in points {
        let latitude = scale(point.latitude());
        let longitude = scale(point.longitude());
        write_value(&mut encoded, latitude - previous_latitude);
        write_value(&mut encoded, longitude - previous_longitude);
        previous_latitude = latitude;
        previous_longitude = longitude;
    }

    encoded
}

fn scale(coordinate: f64) -> i64 {
    (coordinate * PRECISION).round() as i64
}

fn write_value(out: &mut String, delta: i64) {
    let mut folded = ((delta << 1) ^ (delta >> 63)) as u64;
    while folded >= CONTINUATION_BIT {
        out.push(group_char((folded & GROUP_MASK) | CONTINUATION_BIT));
        folded >>= 5;
    }
    out.push(group_char(folded));
}

fn group_char(group: u64) -> char {
    // Groups are at most 0x3f, so the sum stays within printable ASCII.
    char::from(CHAR_OFFSET + group as u8)
}
