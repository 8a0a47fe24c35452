//! # 错误类型模块
//!
//! 隐写核心所有可能失败的情形都以 `StegoError` 的形式显式返回，
//! 由上层的命令处理逻辑转换为 `anyhow` 错误并附加上下文。

use std::path::PathBuf;
use thiserror::Error;

/// 隐写核心操作的结果类型。
pub type Result<T> = std::result::Result<T, StegoError>;

#[derive(Error, Debug)]
pub enum StegoError {
    /// 载荷无法放入载体图像。
    #[error("Payload does not fit: {required} bits required, {available} bits available")]
    CapacityExceeded { required: u64, available: u64 },

    /// 比特序列长度不是 8 的整数倍，无法还原为字节。
    #[error("Bit sequence of length {0} is not a multiple of 8")]
    MalformedLength(usize),

    /// 头部声明的载荷长度超出了可用的比特数。
    #[error("Declared payload of {declared} bits exceeds the {available} bits available")]
    TruncatedPayload { declared: u64, available: u64 },

    /// 用于解析头部的比特数不足。
    #[error("Header needs {expected} bits, got {actual}")]
    HeaderCorrupt { expected: usize, actual: usize },

    /// 必需的输入文件不存在。
    #[error("Input does not exist: {}", .0.display())]
    MissingInput(PathBuf),

    /// 头部宽度配置无效。
    #[error("Invalid header width: {0} bits")]
    InvalidHeaderWidth(usize),

    /// 组帧后的比特数与像素数不一致，每个像素必须恰好承载一个比特。
    #[error("Framed bit sequence of length {bits} does not match {pixels} pixel values")]
    FrameLengthMismatch { pixels: usize, bits: usize },

    /// 像素数据长度与图像形状不一致。
    #[error("Pixel data of length {actual} does not match shape of {expected} values")]
    ShapeMismatch { expected: usize, actual: usize },

    /// 无法映射到 8 位颜色类型的通道数。
    #[error("Unsupported channel count: {0}")]
    UnsupportedShape(u8),

    /// 图像解码或编码失败。
    #[error(transparent)]
    Image(#[from] image::ImageError),
}
