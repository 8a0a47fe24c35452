//! # 比特转换模块
//!
//! 字节序列与单个比特序列之间的相互转换。每个字节展开为 8 个比特，最高位在前。

use crate::constants::BITS_PER_BYTE;
use crate::error::{Result, StegoError};

/// 将字节序列展开为比特序列，每个字节按最高位优先输出 8 个比特。
///
/// 输出长度恒为输入长度的 8 倍，空输入得到空输出。
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<bool> {
    bytes
        .iter()
        .flat_map(|&byte| (0..BITS_PER_BYTE).rev().map(move |shift| (byte >> shift) & 1 == 1))
        .collect()
}

/// `bytes_to_bits` 的逆操作。
///
/// # Errors
///
/// 比特数不是 8 的整数倍时返回 `StegoError::MalformedLength`。
pub fn bits_to_bytes(bits: &[bool]) -> Result<Vec<u8>> {
    if bits.len() % BITS_PER_BYTE != 0 {
        return Err(StegoError::MalformedLength(bits.len()));
    }

    Ok(bits
        .chunks_exact(BITS_PER_BYTE)
        .map(|chunk| chunk.iter().fold(0u8, |byte, &bit| (byte << 1) | bit as u8))
        .collect())
}
