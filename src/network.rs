use crate::*;

/// Сеть прямого распространения: слои от входного к выходному
/// и статистика ошибки обучения.
///
/// `backward` работает с теми выходами, которые оставил последний `forward`.
/// Порядок вызовов не проверяется: вызывающий сам подаёт те же входы,
/// к которым относятся цели.
#[derive(Clone, Debug)]
pub struct Network {
    layers: Vec<Layer>,
    /// RMS ошибка последнего `backward`
    current_error: f64,
    /// скользящее среднее `current_error`
    recent_average_error: f64,
    /// количество выполненных `backward`
    steps: usize,
}

impl Network {
    /// Конструктор
    fn new(layers: Vec<Layer>) -> Self {
        Self {
            layers,
            current_error: 0.0,
            recent_average_error: 0.0,
            steps: 0,
        }
    }
    /// Создание сети со случайными весами в [0, 1) и указанной топологией
    pub fn random(rng: &mut dyn RngCore, layers: &[LayerTopology]) -> Result<Self, NetworkError> {
        LayerTopology::validate(layers)?;

        let built = layers
            .iter()
            .enumerate()
            .map(|(num, layer)| {
                let outputs = layers.get(num + 1).map_or(0, |next| next.neurons);
                Layer::random(rng, layer.neurons, outputs)
            })
            .collect();

        debug!(
            topology = %LayerTopology::describe(layers),
            "created network with random weights"
        );
        Ok(Self::new(built))
    }
    /// Создание сети из весов.
    /// Порядок: слой, нейрон-источник (смещение последним), нейрон-приёмник.
    pub fn from_weights(
        layers: &[LayerTopology],
        weights: impl IntoIterator<Item = f64>,
    ) -> Result<Self, NetworkError> {
        LayerTopology::validate(layers)?;

        let weights: Vec<f64> = weights.into_iter().collect();
        let expected = Self::weights_len(layers)?;
        NetworkError::check_len(expected, weights.len())?;

        let mut weights = weights.into_iter();
        let built = layers
            .iter()
            .enumerate()
            .map(|(num, layer)| {
                let outputs = layers.get(num + 1).map_or(0, |next| next.neurons);
                let neurons = (0..=layer.neurons)
                    .map(|index| {
                        let connections = weights
                            .by_ref()
                            .take(outputs)
                            .map(Connection::new)
                            .collect();
                        Neuron::new(index, connections)
                    })
                    .collect();
                Layer::new(neurons)
            })
            .collect();

        debug!(
            topology = %LayerTopology::describe(layers),
            "created network from weights"
        );
        Ok(Self::new(built))
    }
    /// Количество весов сети с такой топологией (с учётом смещений).
    /// Переполнение `usize` - ошибка топологии.
    pub fn weights_len(layers: &[LayerTopology]) -> Result<usize, NetworkError> {
        layers
            .iter()
            .tuple_windows()
            .try_fold(0usize, |total, (layer, next)| {
                layer
                    .neurons
                    .checked_add(1)
                    .and_then(|sources| sources.checked_mul(next.neurons))
                    .and_then(|len| total.checked_add(len))
            })
            .ok_or_else(|| {
                NetworkError::InvalidTopology(format!(
                    "weight count of {} overflows usize",
                    LayerTopology::describe(layers)
                ))
            })
    }

    /// Веса сети в том же порядке, что принимает `from_weights`
    pub fn weights(&self) -> impl Iterator<Item = f64> + '_ {
        self.layers
            .iter()
            .flat_map(|layer| layer.neurons())
            .flat_map(|neuron| neuron.connections())
            .map(Connection::weight)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Топология сети
    pub fn topology(&self) -> Vec<LayerTopology> {
        self.layers
            .iter()
            .map(|layer| LayerTopology { neurons: layer.len() })
            .collect()
    }

    /// Количество входов
    pub fn inputs_len(&self) -> usize {
        self.input_layer().len()
    }

    /// Количество выходов
    pub fn outputs_len(&self) -> usize {
        self.output_layer().len()
    }

    pub fn current_error(&self) -> f64 {
        self.current_error
    }

    pub fn recent_average_error(&self) -> f64 {
        self.recent_average_error
    }

    /// Выходы рабочих нейронов выходного слоя
    pub fn results(&self) -> Vec<f64> {
        self.output_layer().outputs()
    }

    /// Расчет в прямом направлении
    pub fn forward(&mut self, inputs: &[f64]) -> Result<(), NetworkError> {
        NetworkError::check_len(self.inputs_len(), inputs.len())?;

        // фиксируем входы во входном слое, смещение не трогаем
        for (neuron, &input) in self.layers[0].active_mut().iter_mut().zip(inputs) {
            neuron.set_output(input);
        }

        for num in 1..self.layers.len() {
            let (done, rest) = self.layers.split_at_mut(num);
            let prev_layer = &done[num - 1];
            for neuron in rest[0].active_mut() {
                neuron.feed_forward(prev_layer);
            }
        }
        Ok(())
    }

    /// Обратное распространение ошибки и обновление весов
    pub fn backward(&mut self, targets: &[f64], config: &TrainConfig) -> Result<(), NetworkError> {
        NetworkError::check_len(self.outputs_len(), targets.len())?;

        self.update_error(targets);

        // градиенты выходного слоя
        let last = self.layers.len() - 1;
        for (neuron, &target) in self.layers[last].active_mut().iter_mut().zip(targets) {
            neuron.calc_output_gradient(target);
        }

        // градиенты скрытых слоёв, от последнего к первому
        for num in (1..last).rev() {
            let (head, tail) = self.layers.split_at_mut(num + 1);
            let next_layer = &tail[0];
            for neuron in head[num].active_mut() {
                neuron.calc_hidden_gradient(next_layer);
            }
        }

        // веса входных связей, от выходного слоя к первому скрытому
        for num in (1..=last).rev() {
            let (head, tail) = self.layers.split_at_mut(num);
            let prev_layer = &mut head[num - 1];
            for neuron in tail[0].active() {
                neuron.update_input_weights(prev_layer, config);
            }
        }

        trace!(
            step = self.steps,
            error = self.current_error,
            recent_average_error = self.recent_average_error,
            "back-propagated"
        );
        Ok(())
    }

    /// Прямой расчет для одного числа и знак первого выхода
    pub fn classify(&mut self, input: f64) -> Result<Polarity, NetworkError> {
        self.forward(&[input])?;
        Ok(Polarity::of(self.output_layer().active()[0].output()))
    }

    fn input_layer(&self) -> &Layer {
        &self.layers[0]
    }

    fn output_layer(&self) -> &Layer {
        &self.layers[self.layers.len() - 1]
    }

    /// RMS ошибка по выходному слою и её скользящее среднее.
    /// Первое значение среднего берётся равным самой ошибке.
    fn update_error(&mut self, targets: &[f64]) {
        let output_layer = self.output_layer();
        let sum: f64 = output_layer
            .active()
            .iter()
            .zip(targets)
            .map(|(neuron, target)| {
                let delta = target - neuron.output();
                delta * delta
            })
            .sum();
        let mean = sum / output_layer.len() as f64;
        self.current_error = mean.sqrt();

        self.recent_average_error = if self.steps == 0 {
            self.current_error
        } else {
            (self.recent_average_error * RECENT_AVERAGE_SMOOTHING_FACTOR + self.current_error)
                / (RECENT_AVERAGE_SMOOTHING_FACTOR + 1.0)
        };
        self.steps += 1;
    }
}
