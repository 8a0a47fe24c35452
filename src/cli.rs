//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构。编码与解码是两个互斥的开关，
//! 两者都不指定时由处理逻辑给出提示。

use crate::config::{CodecConfig, FillerPolicy};
use crate::constants::DEFAULT_OUTPUT;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// 将小文件隐藏在无损图像 (如 PNG) 像素的最低有效位中，并可将其完整提取出来。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "将小文件隐藏在无损图像 (如 PNG) 像素的最低有效位中，并可将其完整提取出来。"
)]
#[command(group(ArgGroup::new("mode").args(["encode", "decode"])))]
pub struct Cli {
    /// 将文件隐藏到图像中，生成新的图像。
    #[arg(short, long)]
    pub encode: bool,

    /// 从图像中提取隐藏的数据，写入文件。
    #[arg(short, long)]
    pub decode: bool,

    /// 用于隐藏或提取的图像路径。
    #[arg(short, long)]
    pub image: Option<PathBuf>,

    /// 要隐藏的文件路径，或提取结果的保存路径。
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// 编码结果图像的保存路径，扩展名会被自动修正为 png。
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// 载荷之后剩余像素的填充方式。
    #[arg(long, value_enum, default_value_t = FillerPolicy::Random)]
    pub filler: FillerPolicy,

    /// 随机填充的种子，指定后结果可复现。
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    /// 由命令行参数组装编解码配置。
    pub fn codec_config(&self) -> CodecConfig {
        CodecConfig {
            filler: self.filler,
            seed: self.seed,
            ..CodecConfig::default()
        }
    }
}

/// 编码所需的参数。
#[derive(Debug, Clone)]
pub struct EncodeArgs {
    pub image: PathBuf,
    pub file: PathBuf,
    pub output: PathBuf,
    pub config: CodecConfig,
}

/// 解码所需的参数。
#[derive(Debug, Clone)]
pub struct DecodeArgs {
    pub image: PathBuf,
    pub file: PathBuf,
    pub config: CodecConfig,
}
