//! # 像素缓冲模块
//!
//! 把图像展平为一维的通道字节序列，同时记录原始形状以便写回。
//! 写出的图像固定为无损的 PNG 格式，保证每个字节原样往返。

use crate::error::{Result, StegoError};
use image::{ColorType, DynamicImage, ImageFormat};
use log::debug;
use std::path::Path;

/// 图像的原始形状：高 × 宽 × 通道数。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub height: u32,
    pub width: u32,
    pub channels: u8,
}

impl Shape {
    /// 展平后的字节数。
    pub fn len(&self) -> usize {
        self.height as usize * self.width as usize * self.channels as usize
    }

    /// 形状中是否没有任何字节。
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 由通道数推导出对应的 8 位颜色类型。
    pub fn color_type(&self) -> Result<ColorType> {
        match self.channels {
            1 => Ok(ColorType::L8),
            2 => Ok(ColorType::La8),
            3 => Ok(ColorType::Rgb8),
            4 => Ok(ColorType::Rgba8),
            other => Err(StegoError::UnsupportedShape(other)),
        }
    }
}

/// 展平后的像素数据与其原始形状。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    shape: Shape,
}

impl PixelBuffer {
    /// 用展平的数据和形状重建缓冲区。
    ///
    /// # Errors
    ///
    /// 数据长度与形状不符时返回 `StegoError::ShapeMismatch`。
    pub fn new(data: Vec<u8>, shape: Shape) -> Result<Self> {
        if data.len() != shape.len() {
            return Err(StegoError::ShapeMismatch {
                expected: shape.len(),
                actual: data.len(),
            });
        }
        Ok(Self { data, shape })
    }

    /// 读取并展平图像。
    ///
    /// 8 位的灰度、灰度透明、RGB 与 RGBA 图像保持原样，其余颜色类型先转换为 RGBA8。
    pub fn load(path: &Path) -> Result<Self> {
        let img = image::open(path)?;
        let img = match img.color() {
            ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8 => img,
            _ => DynamicImage::ImageRgba8(img.to_rgba8()),
        };

        let shape = Shape {
            height: img.height(),
            width: img.width(),
            channels: img.color().channel_count(),
        };
        debug!(
            "loaded {}: {}x{}x{}",
            path.display(),
            shape.height,
            shape.width,
            shape.channels
        );
        Self::new(img.into_bytes(), shape)
    }

    /// 按原始形状以 PNG 格式写出。
    pub fn save(&self, path: &Path) -> Result<()> {
        image::save_buffer_with_format(
            path,
            &self.data,
            self.shape.width,
            self.shape.height,
            self.shape.color_type()?,
            ImageFormat::Png,
        )?;
        Ok(())
    }

    /// 图像的原始形状。
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// 展平后的像素字节。
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// 像素字节数。
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// 缓冲区是否为空。
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 拆分为像素字节与形状。
    pub fn into_parts(self) -> (Vec<u8>, Shape) {
        (self.data, self.shape)
    }
}
