/// 长度头部占用的比特数。
/// 头部保存的是载荷的比特长度 (而不是字节长度)，以 `u32` 小端序存储，
/// 每个字节再按最高位优先展开，因此需要 4 * 8 = 32 个像素字节。
pub const HEADER_BITS: usize = 32;

/// 头部允许的最大宽度 (比特)。头部整数在内部以 `u64` 表示。
pub const MAX_HEADER_BITS: usize = 64;

/// 每个字节展开后的比特数。
pub const BITS_PER_BYTE: usize = 8;

/// 单个颜色通道的最大取值。
pub const MAX_CHANNEL_VALUE: u8 = u8::MAX;

/// 清除最低有效位的掩码 (`0xFE`)，由通道最大值推导而来。
pub const LSB_CLEAR_MASK: u8 = MAX_CHANNEL_VALUE - 1;

/// 编码结果图像的默认输出路径。
pub const DEFAULT_OUTPUT: &str = "encoded.png";

/// 输出图像固定使用的扩展名。
pub const IMAGE_EXTENSION: &str = "png";
