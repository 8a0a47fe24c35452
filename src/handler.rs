//! # 命令处理逻辑模块
//!
//! 包含编码与解码的高级业务逻辑。
//! 本模块负责协调图像与文件的读写、调用核心隐写算法以及向用户报告结果。
//! 一旦检测到错误就立即返回，不会写出任何不完整的输出文件。

use crate::cli::{Cli, DecodeArgs, EncodeArgs};
use crate::constants::IMAGE_EXTENSION;
use crate::error::StegoError;
use crate::pixels::PixelBuffer;
use crate::steganography::{conceal, reveal};
use anyhow::{Context, Result, bail};
use colored::Colorize;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// 根据命令行开关分派到编码或解码。
///
/// # Errors
///
/// * 未指定图像或文件路径。
/// * 未指定 `--encode` 或 `--decode`。
/// * 编码或解码本身失败。
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = cli.codec_config();
    let (Some(image), Some(file)) = (cli.image, cli.file) else {
        bail!("Image or file not specified");
    };

    if cli.encode {
        handle_encode(EncodeArgs {
            image,
            file,
            output: cli.output,
            config,
        })
    } else if cli.decode {
        handle_decode(DecodeArgs {
            image,
            file,
            config,
        })
    } else {
        bail!(
            "No action specified, use {} or {}",
            "--encode".yellow().bold(),
            "--decode".yellow().bold()
        )
    }
}

/// 处理编码的执行逻辑。
///
/// 读取载体图像和待隐藏的文件，在写出任何内容之前检查容量，
/// 然后把隐写后的图像以 PNG 格式保存到 `args.output` (扩展名经过修正)。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 图像或文件不存在 (`StegoError::MissingInput`)。
/// * 无法读取输入的图像或文件。
/// * 图像没有足够的空间容纳文件 (`StegoError::CapacityExceeded`)。
/// * 无法写入目标图像文件。
pub fn handle_encode(args: EncodeArgs) -> Result<()> {
    ensure_input(&args.image)?;
    ensure_input(&args.file)?;
    let output = normalize_output_path(&args.output);

    let picture = PixelBuffer::load(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let payload = fs::read(&args.file).with_context(|| {
        format!(
            "Unable to read file: {}",
            args.file.to_string_lossy().red().bold()
        )
    })?;

    let (pixels, shape) = picture.into_parts();
    let mut filler = args.config.filler();
    let encoded = conceal(pixels, &payload, &args.config, filler.as_mut()).with_context(|| {
        format!(
            "Unable to hide {} bytes from {} in the image",
            payload.len().to_string().red().bold(),
            args.file.to_string_lossy().red().bold()
        )
    })?;

    PixelBuffer::new(encoded, shape)?
        .save(&output)
        .with_context(|| {
            format!(
                "Unable to write to target image file: {}",
                output.to_string_lossy().red().bold()
            )
        })?;

    info!("concealed {} bytes in {}", payload.len(), output.display());
    println!(
        "Image encoded and saved: {}",
        output.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理解码的执行逻辑。
///
/// 读取经过隐写的图像，按头部声明的长度提取载荷，并写入 `args.file`。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 图像不存在或无法读取。
/// * 头部声明的长度超出图像容量 (`StegoError::TruncatedPayload`)，
///   或不是整字节 (`StegoError::MalformedLength`)。
/// * 无法写入目标文件。
pub fn handle_decode(args: DecodeArgs) -> Result<()> {
    ensure_input(&args.image)?;

    let picture = PixelBuffer::load(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let payload = reveal(picture.as_slice(), &args.config).with_context(|| {
        format!(
            "Failed to recover hidden data from '{}'. \nThe image may not contain a hidden file or is corrupted.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    fs::write(&args.file, &payload).with_context(|| {
        format!(
            "Unable to write to target file: {}",
            args.file.to_string_lossy().red().bold()
        )
    })?;

    info!("recovered {} bytes to {}", payload.len(), args.file.display());
    println!(
        "Image decoded, data saved: {}",
        args.file.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 修正输出图像的扩展名：没有扩展名时追加 `.png`，扩展名不是 png 时替换为 png。
pub fn normalize_output_path(path: &Path) -> PathBuf {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case(IMAGE_EXTENSION) => path.to_path_buf(),
        _ => path.with_extension(IMAGE_EXTENSION),
    }
}

fn ensure_input(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(StegoError::MissingInput(path.to_path_buf()).into());
    }
    Ok(())
}
