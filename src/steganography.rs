use crate::bits::{bits_to_bytes, bytes_to_bits};
use crate::capacity;
use crate::config::CodecConfig;
use crate::constants::LSB_CLEAR_MASK;
use crate::error::{Result, StegoError};
use crate::filler::Filler;
use crate::frame::{encode_header_with_width, frame, unframe};
use log::debug;

pub fn embed(mut pixels: Vec<u8>, framed_bits: &[bool]) -> Result<Vec<u8>> {
    if pixels.len() != framed_bits.len() {
        return Err(StegoError::FrameLengthMismatch {
            pixels: pixels.len(),
            bits: framed_bits.len(),
        });
    }

    for (byte, &bit) in pixels.iter_mut().zip(framed_bits) {
        *byte = (*byte & LSB_CLEAR_MASK) | bit as u8;
    }

    Ok(pixels)
}

pub fn extract(pixels: &[u8]) -> Vec<bool> {
    pixels.iter().map(|&byte| byte & 1 == 1).collect()
}

/// 将 `payload` 隐藏到 `pixels` 中，返回修改后的像素。
///
/// 容量检查先于任何修改，失败时原像素不会被触及。
pub fn conceal<F>(
    pixels: Vec<u8>,
    payload: &[u8],
    config: &CodecConfig,
    filler: &mut F,
) -> Result<Vec<u8>>
where
    F: Filler + ?Sized,
{
    config.validate()?;

    let payload_bits = bytes_to_bits(payload);
    let bit_length = payload_bits.len() as u64;
    capacity::check(bit_length, pixels.len() as u64, config.header_bits)?;
    debug!(
        "payload: {} bits, capacity: {} bits",
        bit_length,
        capacity::available_bits(pixels.len() as u64, config.header_bits)
    );

    let header = encode_header_with_width(bit_length, config.header_bits)?;
    let framed = frame(&payload_bits, pixels.len(), &header, filler)?;
    debug!("framed {} bits", framed.len());

    embed(pixels, &framed)
}

/// 从 `pixels` 中恢复被隐藏的载荷字节。
pub fn reveal(pixels: &[u8], config: &CodecConfig) -> Result<Vec<u8>> {
    config.validate()?;

    let bits = extract(pixels);
    let (bit_length, payload_bits) = unframe(&bits, config.header_bits)?;
    debug!("header declares {} payload bits", bit_length);

    bits_to_bytes(&payload_bits)
}
