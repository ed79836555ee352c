//! Packing of raw vertex data into the byte layout the driver expects.
//!
//! Uploads in this crate are static: geometry is written once at startup and
//! never touched from the CPU side again, so encoding is a plain copy into
//! native byte order with no aliasing of the input slice.

/// Encodes a float sequence for a `STATIC_DRAW` buffer upload.
pub fn encode_f32(data: &[f32]) -> Vec<u8> {
    bytemuck::cast_slice(data).to_vec()
}

/// Encodes an unsigned index sequence for a `STATIC_DRAW` buffer upload.
pub fn encode_u32(data: &[u32]) -> Vec<u8> {
    bytemuck::cast_slice(data).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f32_round_trip() {
        let values = [0.0_f32, 1.5, -3.25, f32::MAX, f32::MIN_POSITIVE];
        let encoded = encode_f32(&values);
        assert_eq!(encoded.len(), values.len() * 4);
        let decoded: &[f32] = bytemuck::cast_slice(&encoded);
        assert_eq!(decoded, &values);
    }

    #[test]
    fn u32_round_trip() {
        let values = [0_u32, 1, 2, 3, u32::MAX];
        let encoded = encode_u32(&values);
        let decoded: &[u32] = bytemuck::cast_slice(&encoded);
        assert_eq!(decoded, &values);
    }

    #[test]
    fn empty_input_is_valid() {
        assert!(encode_f32(&[]).is_empty());
        assert!(encode_u32(&[]).is_empty());
    }
}
