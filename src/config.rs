/// Коэффициент сглаживания скользящего среднего ошибки
pub const RECENT_AVERAGE_SMOOTHING_FACTOR: f64 = 100.0;

/// Параметры обучения, передаются в каждый вызов `backward`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrainConfig {
    /// скорость обучения [0.0 .. 1.0]
    pub eta: f64,
    /// момент: доля предыдущего изменения веса [0.0 .. n]
    pub alpha: f64,
}

impl TrainConfig {
    pub fn new(eta: f64, alpha: f64) -> Self {
        Self { eta, alpha }
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self::new(0.15, 0.5)
    }
}
