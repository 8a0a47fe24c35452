//! # 编解码配置模块
//!
//! 头部宽度与填充策略都作为配置注入编解码流程，而不是写死在算法中。

use crate::constants::HEADER_BITS;
use crate::error::Result;
use crate::filler::{Filler, RandomFiller, ZeroFiller};
use crate::frame::check_width;
use clap::ValueEnum;

/// 载荷之后剩余像素的填充方式。
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FillerPolicy {
    /// 全部填充 0，结果可复现。
    Zero,
    /// 填充随机比特，尾部像素的最低位不再呈现固定模式。
    #[default]
    Random,
}

/// 一次编码或解码所使用的参数。
///
/// 编码端与解码端必须使用相同的 `header_bits`，否则头部无法被正确解析。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// 头部宽度 (比特)，必须是 8 的整数倍且不超过 64。
    pub header_bits: usize,
    pub filler: FillerPolicy,
    /// 仅对随机填充生效。
    pub seed: Option<u64>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            header_bits: HEADER_BITS,
            filler: FillerPolicy::default(),
            seed: None,
        }
    }
}

impl CodecConfig {
    /// 检查头部宽度是否可用。
    ///
    /// # Errors
    ///
    /// 宽度为 0、不是 8 的整数倍或超过 64 比特时返回 `StegoError::InvalidHeaderWidth`。
    pub fn validate(&self) -> Result<()> {
        check_width(self.header_bits)
    }

    /// 按照配置的策略构造填充器。
    pub fn filler(&self) -> Box<dyn Filler> {
        match (self.filler, self.seed) {
            (FillerPolicy::Zero, _) => Box::new(ZeroFiller),
            (FillerPolicy::Random, Some(seed)) => Box::new(RandomFiller::seeded(seed)),
            (FillerPolicy::Random, None) => Box::new(RandomFiller::from_os_rng()),
        }
    }
}
