use crate::*;

/// Слой: рабочие нейроны и последний нейрон смещения с выходом 1.0
#[derive(Clone, Debug)]
pub struct Layer {
    neurons: Vec<Neuron>,
}

impl Layer {
    /// Конструктор. Последний нейрон считается смещением, его выход фиксируется в 1.0
    pub(crate) fn new(mut neurons: Vec<Neuron>) -> Self {
        if let Some(bias) = neurons.last_mut() {
            bias.set_output(1.0);
        }
        Self { neurons }
    }
    /// Слой из `neurons` рабочих нейронов и смещения, у каждого `outputs` случайных связей
    pub(crate) fn random(rng: &mut dyn RngCore, neurons: usize, outputs: usize) -> Self {
        let neurons = (0..=neurons)
            .map(|index| Neuron::random(rng, index, outputs))
            .collect();
        Self::new(neurons)
    }

    /// Все нейроны, включая смещение
    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    /// Рабочие нейроны (без смещения)
    pub fn active(&self) -> &[Neuron] {
        &self.neurons[..self.len()]
    }

    pub fn bias(&self) -> &Neuron {
        &self.neurons[self.len()]
    }

    /// Количество рабочих нейронов
    pub fn len(&self) -> usize {
        self.neurons.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Выходы рабочих нейронов
    pub fn outputs(&self) -> Vec<f64> {
        self.active().iter().map(Neuron::output).collect()
    }

    pub(crate) fn active_mut(&mut self) -> &mut [Neuron] {
        let len = self.len();
        &mut self.neurons[..len]
    }

    /// Только для правки связей: выход смещения через этот срез не трогаем
    pub(crate) fn neurons_mut(&mut self) -> &mut [Neuron] {
        &mut self.neurons
    }
}
