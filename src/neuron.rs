use crate::*;

/// Нейрон: выход, градиент, номер в слое и выходные связи
/// (по одной на каждый рабочий нейрон следующего слоя).
#[derive(Clone, Debug)]
pub struct Neuron {
    output: f64,
    gradient: f64,
    index: usize,
    connections: Vec<Connection>,
}

impl Neuron {
    /// Конструктор
    pub fn new(index: usize, connections: Vec<Connection>) -> Self {
        Self {
            output: 0.0,
            gradient: 0.0,
            index,
            connections,
        }
    }
    /// Нейрон со случайными весами выходных связей в [0, 1)
    pub fn random(rng: &mut dyn RngCore, index: usize, outputs: usize) -> Self {
        let connections = (0..outputs)
            .map(|_| Connection::new(rng.gen_range(0.0..1.0)))
            .collect();
        Self::new(index, connections)
    }

    pub fn output(&self) -> f64 {
        self.output
    }

    pub fn gradient(&self) -> f64 {
        self.gradient
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub(crate) fn set_output(&mut self, output: f64) {
        self.output = output;
    }

    /// Расчет выхода по выходам предыдущего слоя (смещение участвует как обычный вход)
    pub(crate) fn feed_forward(&mut self, prev_layer: &Layer) {
        let sum: f64 = prev_layer
            .neurons()
            .iter()
            .map(|neuron| neuron.output * neuron.connections[self.index].weight())
            .sum();

        self.output = transfer(sum);
    }

    /// Градиент нейрона выходного слоя
    pub(crate) fn calc_output_gradient(&mut self, target: f64) {
        let delta = target - self.output;
        self.gradient = delta * transfer_derivative(self.output);
    }

    /// Градиент нейрона скрытого слоя: сумма вкладов в ошибки нейронов,
    /// которые он питает. Смещение следующего слоя входов не имеет.
    pub(crate) fn calc_hidden_gradient(&mut self, next_layer: &Layer) {
        let dow: f64 = self
            .connections
            .iter()
            .zip(next_layer.active())
            .map(|(connection, neuron)| connection.weight() * neuron.gradient)
            .sum();

        self.gradient = dow * transfer_derivative(self.output);
    }

    /// Обновление весов входных связей. Сами связи лежат в нейронах
    /// предыдущего слоя, включая его смещение.
    pub(crate) fn update_input_weights(&self, prev_layer: &mut Layer, config: &TrainConfig) {
        for neuron in prev_layer.neurons_mut() {
            let output = neuron.output;
            let connection = &mut neuron.connections[self.index];
            let delta_weight =
                config.eta * output * self.gradient + config.alpha * connection.delta_weight();
            connection.apply(delta_weight);
        }
    }
}

/// tanh, выход в диапазоне [-1.0 .. 1.0]
fn transfer(x: f64) -> f64 {
    x.tanh()
}

/// Производная tanh, выраженная через уже посчитанный выход y = tanh(x)
fn transfer_derivative(y: f64) -> f64 {
    1.0 - y * y
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn layer(outputs: &[f64], weights: &[&[f64]]) -> Layer {
        let neurons = outputs
            .iter()
            .zip(weights)
            .enumerate()
            .map(|(i, (&output, wts))| {
                let mut neuron =
                    Neuron::new(i, wts.iter().map(|&w| Connection::new(w)).collect());
                neuron.set_output(output);
                neuron
            })
            .collect();
        Layer::new(neurons)
    }

    #[test]
    fn random() {
        let mut rng = ChaCha8Rng::from_seed(Default::default());
        let neuron = Neuron::random(&mut rng, 2, 4);

        assert_eq!(neuron.index(), 2);
        assert_eq!(neuron.connections().len(), 4);
        assert!(neuron
            .connections()
            .iter()
            .all(|c| (0.0..1.0).contains(&c.weight()) && c.delta_weight() == 0.0));
    }

    #[test]
    fn feed_forward() {
        // два входа + смещение (выход 1.0)
        let prev = layer(&[0.5, -0.25, 1.0], &[&[0.2, 0.9], &[0.4, 0.1], &[-0.3, 0.0]]);
        let mut neuron = Neuron::new(0, vec![]);
        neuron.feed_forward(&prev);
        assert_relative_eq!(neuron.output(), (0.5 * 0.2 - 0.25 * 0.4 - 0.3f64).tanh(), epsilon = 1e-12);

        let mut neuron = Neuron::new(1, vec![]);
        neuron.feed_forward(&prev);
        assert_relative_eq!(neuron.output(), (0.5 * 0.9 - 0.25 * 0.1 + 0.0f64).tanh(), epsilon = 1e-12);
    }

    #[test]
    fn output_gradient() {
        let mut neuron = Neuron::new(0, vec![]);
        neuron.set_output(0.6);
        neuron.calc_output_gradient(1.0);
        assert_relative_eq!(neuron.gradient(), 0.4 * (1.0 - 0.36), epsilon = 1e-12);

        neuron.calc_output_gradient(0.6);
        assert_eq!(neuron.gradient(), 0.0);
    }

    #[test]
    fn hidden_gradient_skips_bias() {
        let mut next = layer(&[0.1, 0.2, 1.0], &[&[], &[], &[]]);
        next.neurons_mut()[0].gradient = 0.5;
        next.neurons_mut()[1].gradient = -0.25;
        next.neurons_mut()[2].gradient = 100.0;

        let mut neuron = Neuron::new(0, vec![Connection::new(0.8), Connection::new(0.4)]);
        neuron.set_output(0.5);
        neuron.calc_hidden_gradient(&next);

        assert_relative_eq!(neuron.gradient(), (0.8 * 0.5 - 0.4 * 0.25) * (1.0 - 0.25), epsilon = 1e-12);
    }

    #[test]
    fn update_input_weights_with_momentum() {
        let mut prev = layer(&[0.5, 1.0], &[&[0.3], &[0.1]]);
        let mut neuron = Neuron::new(0, vec![]);
        neuron.gradient = 0.2;
        let config = TrainConfig::new(0.1, 0.5);

        neuron.update_input_weights(&mut prev, &config);
        let first = prev.neurons()[0].connections()[0];
        assert_relative_eq!(first.delta_weight(), 0.1 * 0.5 * 0.2, epsilon = 1e-12);
        assert_relative_eq!(first.weight(), 0.3 + 0.01, epsilon = 1e-12);
        let bias = prev.neurons()[1].connections()[0];
        assert_relative_eq!(bias.delta_weight(), 0.1 * 1.0 * 0.2, epsilon = 1e-12);
        assert_relative_eq!(bias.weight(), 0.1 + 0.02, epsilon = 1e-12);

        // второй шаг добавляет половину предыдущего изменения
        neuron.update_input_weights(&mut prev, &config);
        let first = prev.neurons()[0].connections()[0];
        assert_relative_eq!(first.delta_weight(), 0.01 + 0.5 * 0.01, epsilon = 1e-12);
        assert_relative_eq!(first.weight(), 0.3 + 0.01 + 0.015, epsilon = 1e-12);

        // выходы предыдущего слоя не меняются
        assert_eq!(prev.neurons()[0].output(), 0.5);
        assert_eq!(prev.bias().output(), 1.0);
    }
}
