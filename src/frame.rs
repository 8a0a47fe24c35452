//! # 组帧模块
//!
//! 帧的布局为 `头部 ++ 载荷 ++ 填充`，总长度与载体像素数相同。
//!
//! 头部保存载荷的比特长度：整数先按小端序拆成字节，再对每个字节按最高位优先展开，
//! 与 `bits::bytes_to_bits` 的顺序一致。任何读取隐写图像的实现都必须遵循这一约定。

use crate::bits::{bits_to_bytes, bytes_to_bits};
use crate::constants::{BITS_PER_BYTE, HEADER_BITS, MAX_HEADER_BITS};
use crate::error::{Result, StegoError};
use crate::filler::Filler;

/// 检查头部宽度：必须大于 0、是 8 的整数倍且不超过 64。
///
/// # Errors
///
/// 不满足时返回 `StegoError::InvalidHeaderWidth`。
pub fn check_width(header_bits: usize) -> Result<()> {
    if header_bits == 0 || header_bits % BITS_PER_BYTE != 0 || header_bits > MAX_HEADER_BITS {
        return Err(StegoError::InvalidHeaderWidth(header_bits));
    }
    Ok(())
}

/// 生成默认 32 位宽度的头部。
pub fn encode_header(bit_length: u32) -> Vec<bool> {
    bytes_to_bits(&bit_length.to_le_bytes())
}

/// 解析默认 32 位宽度的头部。
///
/// # Errors
///
/// 比特数少于 32 时返回 `StegoError::HeaderCorrupt`。
pub fn decode_header(bits: &[bool]) -> Result<u32> {
    let value = decode_header_with_width(bits, HEADER_BITS)?;
    // 32 位宽度的头部不会超出 u32 的范围
    Ok(value as u32)
}

/// 生成 `header_bits` 宽度的头部。
///
/// 超出宽度的高位会被截断，调用方需要先通过 `capacity::check` 保证取值可表示。
///
/// # Errors
///
/// 宽度无效时返回 `StegoError::InvalidHeaderWidth`。
pub fn encode_header_with_width(value: u64, header_bits: usize) -> Result<Vec<bool>> {
    check_width(header_bits)?;
    let bytes = value.to_le_bytes();
    Ok(bytes_to_bits(&bytes[..header_bits / BITS_PER_BYTE]))
}

/// 读取 `bits` 开头 `header_bits` 个比特并还原头部整数。
///
/// # Errors
///
/// * 宽度无效时返回 `StegoError::InvalidHeaderWidth`。
/// * 比特数不足时返回 `StegoError::HeaderCorrupt`。
pub fn decode_header_with_width(bits: &[bool], header_bits: usize) -> Result<u64> {
    check_width(header_bits)?;
    if bits.len() < header_bits {
        return Err(StegoError::HeaderCorrupt {
            expected: header_bits,
            actual: bits.len(),
        });
    }

    let bytes = bits_to_bytes(&bits[..header_bits])?;
    let mut le_bytes = [0u8; 8];
    le_bytes[..bytes.len()].copy_from_slice(&bytes);
    Ok(u64::from_le_bytes(le_bytes))
}

/// 拼接头部与载荷，并用 `filler` 补足到 `capacity_bits` 个比特。
///
/// # Errors
///
/// 头部与载荷合计超过 `capacity_bits` 时返回 `StegoError::CapacityExceeded`。
pub fn frame<F>(
    payload_bits: &[bool],
    capacity_bits: usize,
    header_bits: &[bool],
    filler: &mut F,
) -> Result<Vec<bool>>
where
    F: Filler + ?Sized,
{
    let used = header_bits.len() + payload_bits.len();
    if used > capacity_bits {
        return Err(StegoError::CapacityExceeded {
            required: payload_bits.len() as u64,
            available: capacity_bits.saturating_sub(header_bits.len()) as u64,
        });
    }

    let mut framed = Vec::with_capacity(capacity_bits);
    framed.extend_from_slice(header_bits);
    framed.extend_from_slice(payload_bits);
    framed.resize(capacity_bits, false);
    filler.fill(&mut framed[used..]);

    Ok(framed)
}

/// 读取头部并切出其后声明长度的载荷比特。
///
/// # Errors
///
/// * 宽度无效时返回 `StegoError::InvalidHeaderWidth`。
/// * 比特数不足以容纳头部时返回 `StegoError::HeaderCorrupt`。
/// * 声明的长度超出剩余比特数时返回 `StegoError::TruncatedPayload`。
pub fn unframe(framed_bits: &[bool], header_bits: usize) -> Result<(u64, Vec<bool>)> {
    let bit_length = decode_header_with_width(framed_bits, header_bits)?;
    let available = (framed_bits.len() - header_bits) as u64;
    if bit_length > available {
        return Err(StegoError::TruncatedPayload {
            declared: bit_length,
            available,
        });
    }

    let end = header_bits + bit_length as usize;
    Ok((bit_length, framed_bits[header_bits..end].to_vec()))
}
