//! # lsb_conceal 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：比特转换、组帧、容量检查以及最低有效位的嵌入与提取。

// 声明库包含的所有模块。

pub mod bits;
pub mod capacity;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod filler;
pub mod frame;
pub mod handler;
pub mod pixels;
pub mod steganography;
