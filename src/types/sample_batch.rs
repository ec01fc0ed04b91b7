/// 一次数据流推送携带的频谱样本
#[derive(Clone, Debug, PartialEq)]
pub struct SampleBatch {
    pub values: Vec<f64>,
    /// 生成器内部的序号，仅用于日志
    pub sequence: u64,
}

impl SampleBatch {
    pub fn new(values: Vec<f64>, sequence: u64) -> Self {
        Self { values, sequence }
    }

    /// 每个值乘以同一个系数
    pub fn scaled(mut self, factor: f64) -> Self {
        for value in self.values.iter_mut() {
            *value *= factor;
        }
        self
    }
}
