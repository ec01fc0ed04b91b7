use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 合成频谱数据生成器
///
/// 每个样本由噪声底 + 若干高斯峰组成，峰的位置和高度在相邻样本之间
/// 随机漂移，漂移幅度由 `variation` 控制。所有值限制在 [0, 1]。
#[derive(Debug, Clone)]
pub struct SpectrumDataGenerator {
    sample_size: usize,
    number_of_samples: usize,
    variation: f64,
    seed: Option<u64>,
}

#[derive(Debug, Clone)]
struct Peak {
    center: f64,
    height: f64,
    width: f64,
}

const PEAK_COUNT: usize = 4;
const NOISE_FLOOR: f64 = 0.08;
const NOISE_AMPLITUDE: f64 = 0.06;

impl Default for SpectrumDataGenerator {
    fn default() -> Self {
        Self {
            sample_size: 60,
            number_of_samples: 50,
            variation: 3.0,
            seed: None,
        }
    }
}

impl SpectrumDataGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    pub fn set_number_of_samples(mut self, number_of_samples: usize) -> Self {
        self.number_of_samples = number_of_samples;
        self
    }

    pub fn set_variation(mut self, variation: f64) -> Self {
        self.variation = variation.max(0.0);
        self
    }

    pub fn set_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// 生成 `number_of_samples` 个长度为 `sample_size` 的样本
    pub fn generate(&self) -> Vec<Vec<f64>> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let size = self.sample_size as f64;
        let mut peaks: Vec<Peak> = (0..PEAK_COUNT)
            .map(|_| Peak {
                center: rng.random_range(0.0..size.max(1.0)),
                height: rng.random_range(0.3..0.9),
                width: rng.random_range(1.0..(size / 8.0).max(1.5)),
            })
            .collect();

        let mut samples = Vec::with_capacity(self.number_of_samples);
        for _ in 0..self.number_of_samples {
            samples.push(self.render_sample(&peaks, &mut rng));
            self.drift_peaks(&mut peaks, &mut rng);
        }
        samples
    }

    fn render_sample(&self, peaks: &[Peak], rng: &mut StdRng) -> Vec<f64> {
        (0..self.sample_size)
            .map(|i| {
                let x = i as f64;
                // 低频端噪声底更高
                let floor = NOISE_FLOOR * (1.0 - x / self.sample_size as f64 * 0.5);
                let noise = rng.random_range(0.0..NOISE_AMPLITUDE);
                let peak_sum: f64 = peaks
                    .iter()
                    .map(|p| {
                        let d = (x - p.center) / p.width;
                        p.height * (-0.5 * d * d).exp()
                    })
                    .sum();
                (floor + noise + peak_sum).clamp(0.0, 1.0)
            })
            .collect()
    }

    fn drift_peaks(&self, peaks: &mut [Peak], rng: &mut StdRng) {
        if self.variation == 0.0 {
            return;
        }
        let max_center = (self.sample_size.saturating_sub(1)) as f64;
        for peak in peaks.iter_mut() {
            let shift = rng.random_range(-self.variation..=self.variation);
            peak.center = (peak.center + shift).clamp(0.0, max_center);
            let height_shift = rng.random_range(-0.05..=0.05) * self.variation;
            peak.height = (peak.height + height_shift).clamp(0.1, 0.95);
        }
    }
}
