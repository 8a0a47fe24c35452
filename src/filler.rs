//! # 填充策略模块
//!
//! 头部与载荷之后剩余的像素同样需要写入一个比特。全零填充可复现，
//! 但会让图像尾部的最低位全部为偶数，在直方图上十分显眼；随机填充则相反。
//! 两种策略都通过 `Filler` 注入到组帧过程中。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 为填充区域生成比特的能力。
pub trait Filler {
    /// 覆盖写入 `bits` 中的每一个比特。
    fn fill(&mut self, bits: &mut [bool]);
}

/// 全零填充。
#[derive(Debug, Default, Clone, Copy)]
pub struct ZeroFiller;

impl Filler for ZeroFiller {
    fn fill(&mut self, bits: &mut [bool]) {
        bits.fill(false);
    }
}

/// 均匀随机填充。
#[derive(Debug)]
pub struct RandomFiller<R = StdRng> {
    rng: R,
}

impl RandomFiller<StdRng> {
    /// 使用操作系统熵源初始化。
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// 使用固定种子初始化，相同种子产生相同的填充比特。
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomFiller<R> {
    /// 使用给定的随机数生成器。
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Filler for RandomFiller<R> {
    fn fill(&mut self, bits: &mut [bool]) {
        bits.iter_mut().for_each(|bit| *bit = self.rng.random());
    }
}
