use clap::Parser;
use image::{GrayImage, ImageBuffer, Luma, Rgb, Rgba};
use lsb_conceal::{
    cli::{Cli, DecodeArgs, EncodeArgs},
    config::{CodecConfig, FillerPolicy},
    error::StegoError,
    handler::{dispatch, handle_decode, handle_encode, normalize_output_path},
    pixels::{PixelBuffer, Shape},
};
use rand::RngCore;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// 一个辅助函数，用于创建一个带有随机像素的测试图像
fn create_test_image(path: &Path, width: u32, height: u32) {
    let mut img_buf = ImageBuffer::new(width, height);
    let mut raw_pixels = vec![0u8; (width * height * 4) as usize];
    rand::rng().fill_bytes(&mut raw_pixels);

    img_buf
        .pixels_mut()
        .zip(raw_pixels.chunks_exact(4))
        .for_each(|(pixel, chunk)| {
            *pixel = Rgba([chunk[0], chunk[1], chunk[2], chunk[3]]);
        });

    img_buf.save(path).expect("Failed to create test image.");
}

fn random_payload(len: usize) -> Vec<u8> {
    let mut payload = vec![0u8; len];
    rand::rng().fill_bytes(&mut payload);
    payload
}

fn cli(encode: bool, decode: bool, image: Option<PathBuf>, file: Option<PathBuf>) -> Cli {
    Cli {
        encode,
        decode,
        image,
        file,
        output: PathBuf::from("encoded.png"),
        filler: FillerPolicy::Random,
        seed: None,
    }
}

fn stego_error(e: &anyhow::Error) -> Option<&StegoError> {
    e.downcast_ref::<StegoError>()
}

/// 验证从编码到解码的完整流程
#[test]
fn test_handle_encode_and_decode_integration() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let original_image_path = dir.path().join("original.png");
    let encoded_image_path = dir.path().join("encoded.png");
    let source_file_path = dir.path().join("source.bin");
    let recovered_file_path = dir.path().join("recovered.bin");

    create_test_image(&original_image_path, 100, 100);
    let original_data = random_payload(2000);
    fs::write(&source_file_path, &original_data)?;

    // 2. 测试 handle_encode
    handle_encode(EncodeArgs {
        image: original_image_path.clone(),
        file: source_file_path.clone(),
        output: encoded_image_path.clone(),
        config: CodecConfig::default(),
    })?;
    assert!(
        encoded_image_path.exists(),
        "Encoded image should be created."
    );

    // 3. 测试 handle_decode
    handle_decode(DecodeArgs {
        image: encoded_image_path.clone(),
        file: recovered_file_path.clone(),
        config: CodecConfig::default(),
    })?;

    // 4. 验证结果
    let recovered_data = fs::read(&recovered_file_path)?;
    assert_eq!(
        original_data, recovered_data,
        "Recovered data must match the original."
    );

    // 5. 只有最低位被改动
    let original = PixelBuffer::load(&original_image_path)?;
    let encoded = PixelBuffer::load(&encoded_image_path)?;
    assert_eq!(original.shape(), encoded.shape());
    assert!(
        original
            .as_slice()
            .iter()
            .zip(encoded.as_slice())
            .all(|(a, b)| a >> 1 == b >> 1)
    );

    Ok(())
}

/// 验证输出路径的扩展名修正
#[test]
fn test_output_extension_is_normalized() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let file_path = dir.path().join("secret.txt");
    create_test_image(&image_path, 30, 30);
    fs::write(&file_path, "short secret")?;

    for (requested, expected) in [("out.jpg", "out.png"), ("plain", "plain.png")] {
        handle_encode(EncodeArgs {
            image: image_path.clone(),
            file: file_path.clone(),
            output: dir.path().join(requested),
            config: CodecConfig::default(),
        })?;
        assert!(dir.path().join(expected).exists());
        assert!(!dir.path().join(requested).exists());
    }

    Ok(())
}

#[test]
fn test_normalize_output_path() {
    assert_eq!(
        normalize_output_path(Path::new("encoded.png")),
        PathBuf::from("encoded.png")
    );
    assert_eq!(
        normalize_output_path(Path::new("dir/Result.PNG")),
        PathBuf::from("dir/Result.PNG")
    );
    assert_eq!(
        normalize_output_path(Path::new("dir/result.bmp")),
        PathBuf::from("dir/result.png")
    );
    assert_eq!(
        normalize_output_path(Path::new("result")),
        PathBuf::from("result.png")
    );
}

/// 验证空间不足时的错误处理，且不写出任何文件
#[test]
fn test_handle_encode_not_enough_space() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let image_path = dir.path().join("small.png");
    let file_path = dir.path().join("large.txt");
    let dest_path = dir.path().join("dest.png");

    // 10x10 RGBA 只有 400 个像素字节
    create_test_image(&image_path, 10, 10);
    fs::write(&file_path, "a".repeat(5000))?;

    // 2. 执行并断言错误
    let result = handle_encode(EncodeArgs {
        image: image_path,
        file: file_path,
        output: dest_path.clone(),
        config: CodecConfig::default(),
    });

    let err = result.expect_err("Encoding should fail when the payload does not fit.");
    assert!(matches!(
        stego_error(&err),
        Some(StegoError::CapacityExceeded {
            required: 40000,
            available: 368
        })
    ));
    assert!(!dest_path.exists(), "No output must be written.");

    Ok(())
}

#[test]
fn test_handle_encode_missing_inputs() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let file_path = dir.path().join("secret.txt");
    let dest_path = dir.path().join("dest.png");
    create_test_image(&image_path, 20, 20);

    let result = handle_encode(EncodeArgs {
        image: image_path.clone(),
        file: file_path.clone(),
        output: dest_path.clone(),
        config: CodecConfig::default(),
    });
    let err = result.expect_err("Missing payload file must be reported.");
    assert!(matches!(stego_error(&err), Some(StegoError::MissingInput(p)) if *p == file_path));

    let result = handle_decode(DecodeArgs {
        image: dir.path().join("absent.png"),
        file: file_path.clone(),
        config: CodecConfig::default(),
    });
    let err = result.expect_err("Missing image must be reported.");
    assert!(matches!(stego_error(&err), Some(StegoError::MissingInput(_))));

    assert!(!dest_path.exists());
    assert!(!file_path.exists());
    Ok(())
}

/// 所有最低位都为 1 时，头部声明的长度远超容量
#[test]
fn test_handle_decode_rejects_truncated_payload() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("white.png");
    let file_path = dir.path().join("out.bin");
    GrayImage::from_pixel(20, 20, Luma([255])).save(&image_path)?;

    let result = handle_decode(DecodeArgs {
        image: image_path,
        file: file_path.clone(),
        config: CodecConfig::default(),
    });

    let err = result.expect_err("Decoding should fail.");
    assert!(matches!(
        stego_error(&err),
        Some(StegoError::TruncatedPayload {
            declared: 0xFFFF_FFFF,
            available: 368
        })
    ));
    assert!(!file_path.exists());
    Ok(())
}

/// 灰度图像保持单通道，往返后数据一致
#[test]
fn test_grayscale_carrier_keeps_shape() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("gray.png");
    let file_path = dir.path().join("secret.txt");
    let encoded_path = dir.path().join("gray_encoded.png");
    let recovered_path = dir.path().join("recovered.txt");

    GrayImage::from_fn(40, 40, |x, y| Luma([(x * 7 + y * 3) as u8])).save(&image_path)?;
    fs::write(&file_path, "gray")?;

    let config = CodecConfig {
        filler: FillerPolicy::Zero,
        ..CodecConfig::default()
    };
    handle_encode(EncodeArgs {
        image: image_path,
        file: file_path,
        output: encoded_path.clone(),
        config: config.clone(),
    })?;

    let encoded = PixelBuffer::load(&encoded_path)?;
    assert_eq!(
        encoded.shape(),
        Shape {
            height: 40,
            width: 40,
            channels: 1
        }
    );

    handle_decode(DecodeArgs {
        image: encoded_path,
        file: recovered_path.clone(),
        config,
    })?;
    assert_eq!(fs::read_to_string(recovered_path)?, "gray");
    Ok(())
}

#[test]
fn test_sixteen_bit_carrier_is_converted() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("deep.png");
    ImageBuffer::from_pixel(8, 6, Rgb([1000u16, 2000, 3000])).save(&image_path)?;

    let buffer = PixelBuffer::load(&image_path)?;
    assert_eq!(
        buffer.shape(),
        Shape {
            height: 6,
            width: 8,
            channels: 4
        }
    );
    assert_eq!(buffer.len(), 8 * 6 * 4);
    Ok(())
}

#[test]
fn test_pixel_buffer_rejects_shape_mismatch() {
    let shape = Shape {
        height: 2,
        width: 2,
        channels: 3,
    };
    assert!(PixelBuffer::new(vec![0; 12], shape).is_ok());
    assert!(matches!(
        PixelBuffer::new(vec![0; 11], shape),
        Err(StegoError::ShapeMismatch {
            expected: 12,
            actual: 11
        })
    ));
}

#[test]
fn test_dispatch_requires_mode_and_paths() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let file_path = dir.path().join("secret.txt");
    create_test_image(&image_path, 10, 10);
    fs::write(&file_path, "x")?;

    let err = dispatch(cli(true, false, Some(image_path.clone()), None))
        .expect_err("Missing file must be reported.");
    assert!(err.to_string().contains("Image or file not specified"));

    let err = dispatch(cli(false, false, Some(image_path), Some(file_path)))
        .expect_err("Missing mode must be reported.");
    assert!(err.to_string().contains("No action specified"));
    Ok(())
}

#[test]
fn test_cli_parsing() {
    let cli = Cli::try_parse_from(["lsb_conceal", "-e", "-i", "in.png", "-f", "secret.txt"])
        .expect("Valid arguments should parse.");
    assert!(cli.encode && !cli.decode);
    assert_eq!(cli.output, PathBuf::from("encoded.png"));
    assert_eq!(cli.filler, FillerPolicy::Random);
    assert_eq!(cli.codec_config(), CodecConfig::default());

    let cli = Cli::try_parse_from(["lsb_conceal", "-d", "--filler", "zero", "--seed", "9"])
        .expect("Paths are optional at parse time.");
    assert!(cli.decode);
    assert_eq!(cli.codec_config().filler, FillerPolicy::Zero);
    assert_eq!(cli.codec_config().seed, Some(9));

    assert!(Cli::try_parse_from(["lsb_conceal", "-e", "-d"]).is_err());
}
