use thiserror::Error;

/// Ошибки ядра сети. Проверяются до любых изменений состояния.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum NetworkError {
    /// Длина входов, целей или списка весов не совпадает с топологией
    #[error("dimension mismatch: expected {expected} values, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Меньше двух слоёв или слой без нейронов
    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

impl NetworkError {
    pub(crate) fn check_len(expected: usize, actual: usize) -> Result<(), NetworkError> {
        if expected == actual {
            Ok(())
        } else {
            Err(NetworkError::DimensionMismatch { expected, actual })
        }
    }
}
