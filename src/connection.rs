/// Связь от нейрона к одному нейрону следующего слоя
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    weight: f64,
    /// последнее применённое изменение веса (для момента)
    delta_weight: f64,
}

impl Connection {
    pub fn new(weight: f64) -> Self {
        Self {
            weight,
            delta_weight: 0.0,
        }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn delta_weight(&self) -> f64 {
        self.delta_weight
    }

    pub(crate) fn apply(&mut self, delta_weight: f64) {
        self.delta_weight = delta_weight;
        self.weight += delta_weight;
    }
}
