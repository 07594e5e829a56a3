use crate::*;

/// Топология слоя: количество нейронов без нейрона смещения
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerTopology {
    pub neurons: usize,
}

impl LayerTopology {
    /// Топология сети из списка размеров слоёв
    pub fn from_sizes(sizes: &[usize]) -> Vec<LayerTopology> {
        sizes.iter().map(|&neurons| LayerTopology { neurons }).collect()
    }

    /// Проверка топологии сети: не меньше двух слоёв, в каждом слое есть нейроны,
    /// количество нейронов и весов помещается в `usize`
    pub fn validate(layers: &[LayerTopology]) -> Result<(), NetworkError> {
        if layers.len() < 2 {
            return Err(NetworkError::InvalidTopology(format!(
                "expected at least 2 layers, got {}",
                layers.len()
            )));
        }
        if let Some(num) = layers.iter().position(|layer| layer.neurons == 0) {
            return Err(NetworkError::InvalidTopology(format!(
                "layer {} has no neurons",
                num
            )));
        }
        if let Some(num) = layers.iter().position(|layer| layer.neurons == usize::MAX) {
            return Err(NetworkError::InvalidTopology(format!(
                "layer {} has no room for a bias neuron",
                num
            )));
        }
        Network::weights_len(layers)?;
        Ok(())
    }

    /// Запись вида `2-4-1` для логов
    pub fn describe(layers: &[LayerTopology]) -> String {
        layers.iter().map(|layer| layer.neurons).join("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate() {
        assert!(LayerTopology::validate(&LayerTopology::from_sizes(&[2, 2, 1])).is_ok());
        assert!(LayerTopology::validate(&LayerTopology::from_sizes(&[1, 1])).is_ok());

        assert!(matches!(
            LayerTopology::validate(&LayerTopology::from_sizes(&[3])),
            Err(NetworkError::InvalidTopology(_))
        ));
        assert!(matches!(
            LayerTopology::validate(&[]),
            Err(NetworkError::InvalidTopology(_))
        ));
        assert!(matches!(
            LayerTopology::validate(&LayerTopology::from_sizes(&[2, 0, 1])),
            Err(NetworkError::InvalidTopology(_))
        ));
    }

    #[test]
    fn validate_oversized() {
        for sizes in [
            &[usize::MAX, 2][..],
            &[2, usize::MAX][..],
            &[usize::MAX / 2, 4][..],
            &[usize::MAX / 4, 3, usize::MAX / 4][..],
        ] {
            assert!(matches!(
                LayerTopology::validate(&LayerTopology::from_sizes(sizes)),
                Err(NetworkError::InvalidTopology(_))
            ));
        }
    }

    #[test]
    fn describe() {
        assert_eq!(LayerTopology::describe(&LayerTopology::from_sizes(&[2, 4, 1])), "2-4-1");
    }
}
