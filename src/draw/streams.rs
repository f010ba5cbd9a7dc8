//! 带种子的随机流
//!
//! 每个生成器按标签使用各自的 PCG 流，一个生成器的消耗不会影响另一个生成器的抽样。

use rand_pcg::Pcg64;

use super::draws::Draws;

/// 64 位 FNV-1a，把流标签映射为 PCG stream id。
pub const fn fnv1a64(s: &str) -> u64 {
    let bytes = s.as_bytes();
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        i += 1;
    }
    hash
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Streams {
    seed: u64,
}

impl Streams {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn stream(&self, label: &str) -> Draws<Pcg64> {
        let state = (u128::from(self.seed) << 64) | u128::from(self.seed ^ 0x9e37_79b9_7f4a_7c15);
        Draws::new(Pcg64::new(state, u128::from(fnv1a64(label))))
    }
}
