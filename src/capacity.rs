//! # 容量检查模块
//!
//! 在修改任何像素之前判断载荷能否放入载体。

use crate::error::{Result, StegoError};

/// 扣除头部之后可用于载荷的比特数。像素数不足头部宽度时为 0。
pub fn available_bits(pixel_count: u64, header_bits: usize) -> u64 {
    pixel_count.saturating_sub(header_bits as u64)
}

/// 宽度为 `header_bits` 的头部能够表示的最大载荷比特长度。
pub fn max_header_value(header_bits: usize) -> u64 {
    match header_bits {
        0 => 0,
        64.. => u64::MAX,
        width => (1u64 << width) - 1,
    }
}

/// 检查 `payload_bits` 个比特能否放入 `pixel_count` 个像素字节中。
///
/// 必须满足 `payload_bits < pixel_count - header_bits`，同时载荷长度必须能被头部表示。
///
/// # Errors
///
/// 不满足上述条件时返回 `StegoError::CapacityExceeded`。
pub fn check(payload_bits: u64, pixel_count: u64, header_bits: usize) -> Result<()> {
    let available = available_bits(pixel_count, header_bits);
    if payload_bits >= available || payload_bits > max_header_value(header_bits) {
        return Err(StegoError::CapacityExceeded {
            required: payload_bits,
            available,
        });
    }
    Ok(())
}
