//! 参数化抽样
//!
//! 港口模型中的所有随机量都在这里抽取，分布参数与截断策略集中在一处。

use rand::Rng;
use rand::seq::index;
use rand_distr::{Bernoulli, Distribution, Exp, Normal, Poisson, Uniform, Weibull};

use crate::error::DrawError;
use crate::sim::ClampedNormal;

/// 随机源及各生成器使用的抽样操作
#[derive(Debug, Clone)]
pub struct Draws<R> {
    rng: R,
}

impl<R: Rng> Draws<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }

    /// 均值为 `rate` 的 Poisson 计数；`rate` 为 0 时恒为 0。
    pub fn poisson(&mut self, rate: f64) -> Result<u64, DrawError> {
        check_finite("poisson", "rate", rate)?;
        if rate < 0.0 {
            return Err(bad("poisson", "rate", rate));
        }
        if rate == 0.0 {
            return Ok(0);
        }
        let dist = Poisson::new(rate).map_err(|_| bad("poisson", "rate", rate))?;
        let k: f64 = dist.sample(&mut self.rng);
        Ok(k as u64)
    }

    /// 单位时间 `rate` 个事件的 Poisson 过程的事件间隔
    pub fn exponential(&mut self, rate: f64) -> Result<f64, DrawError> {
        check_finite("exponential", "rate", rate)?;
        if rate <= 0.0 {
            return Err(bad("exponential", "rate", rate));
        }
        let dist = Exp::new(rate).map_err(|_| bad("exponential", "rate", rate))?;
        Ok(dist.sample(&mut self.rng))
    }

    /// Normal(mean, stdev)；低于 `floor` 时返回 `floor`，不重抽。
    pub fn normal_clamped(&mut self, mean: f64, stdev: f64, floor: f64) -> Result<f64, DrawError> {
        check_finite("normal", "mean", mean)?;
        check_finite("normal", "floor", floor)?;
        check_finite("normal", "stdev", stdev)?;
        let dist = Normal::new(mean, stdev).map_err(|_| bad("normal", "stdev", stdev))?;
        let x = dist.sample(&mut self.rng);
        Ok(if x < floor { floor } else { x })
    }

    pub fn clamped(&mut self, params: &ClampedNormal) -> Result<f64, DrawError> {
        self.normal_clamped(params.mean, params.stdev, params.floor)
    }

    /// 单次 Bernoulli 试验，`true` 即结果 1
    pub fn binomial(&mut self, p: f64) -> Result<bool, DrawError> {
        let dist = Bernoulli::new(p).map_err(|_| bad("binomial", "p", p))?;
        Ok(dist.sample(&mut self.rng))
    }

    /// `[low, high]` 内的实数
    pub fn uniform(&mut self, low: f64, high: f64) -> Result<f64, DrawError> {
        check_finite("uniform", "low", low)?;
        check_finite("uniform", "high", high)?;
        if low > high {
            return Err(bad("uniform", "high", high));
        }
        if low == high {
            return Ok(low);
        }
        Ok(Uniform::new_inclusive(low, high).sample(&mut self.rng))
    }

    /// `[low, high]` 内的整数
    pub fn uniform_int(&mut self, low: u64, high: u64) -> Result<u64, DrawError> {
        if low > high {
            return Err(DrawError::EmptyRange { low, high });
        }
        Ok(self.rng.gen_range(low..=high))
    }

    /// Weibull(shape)，按比例缩放使期望等于 `target_mean`
    pub fn weibull_renewal(&mut self, shape: f64, target_mean: f64) -> Result<f64, DrawError> {
        check_finite("weibull", "shape", shape)?;
        check_finite("weibull", "target_mean", target_mean)?;
        if shape <= 0.0 {
            return Err(bad("weibull", "shape", shape));
        }
        if target_mean <= 0.0 {
            return Err(bad("weibull", "target_mean", target_mean));
        }
        let scale = weibull_scale_for_mean(shape, target_mean);
        let dist = Weibull::new(scale, shape).map_err(|_| bad("weibull", "scale", scale))?;
        Ok(dist.sample(&mut self.rng))
    }

    /// 从 `0..length` 中不放回抽取 `amount` 个不同下标，按抽取顺序返回。
    pub fn sample_distinct(&mut self, length: usize, amount: usize) -> Result<Vec<usize>, DrawError> {
        if amount > length {
            return Err(DrawError::SampleTooLarge { length, amount });
        }
        Ok(index::sample(&mut self.rng, length, amount).into_vec())
    }
}

/// λ = μ / Γ(1 + 1/k)
pub fn weibull_scale_for_mean(shape: f64, mean: f64) -> f64 {
    mean / gamma(1.0 + 1.0 / shape)
}

const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEF: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// Gamma 函数（Lanczos 近似，x < 1/2 时用反射公式）
pub fn gamma(x: f64) -> f64 {
    if x < 0.5 {
        let pi = std::f64::consts::PI;
        return pi / ((pi * x).sin() * gamma(1.0 - x));
    }
    let x = x - 1.0;
    let mut acc = LANCZOS_COEF[0];
    for (i, c) in LANCZOS_COEF.iter().enumerate().skip(1) {
        acc += c / (x + i as f64);
    }
    let t = x + LANCZOS_G + 0.5;
    (2.0 * std::f64::consts::PI).sqrt() * t.powf(x + 0.5) * (-t).exp() * acc
}

fn bad(distribution: &'static str, param: &'static str, value: f64) -> DrawError {
    DrawError::InvalidParameter {
        distribution,
        param,
        value,
    }
}

fn check_finite(distribution: &'static str, param: &'static str, value: f64) -> Result<(), DrawError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(bad(distribution, param, value))
    }
}
