use crate::*;
use std::{
    fs,
    io::Read,
    path::Path,
    str::{FromStr, SplitWhitespace},
};
use thiserror::Error;

/// Ошибки чтения файла обучающих примеров
#[derive(Debug, Error)]
pub enum TrainingDataError {
    #[error("failed to read training data: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected end of training data: expected {what}")]
    UnexpectedEnd { what: &'static str },

    #[error("failed to parse {what} from {token:?}")]
    Parse { what: &'static str, token: String },

    #[error(transparent)]
    Network(#[from] NetworkError),
}

/// Обучающий пример: входы и ожидаемые выходы
#[derive(Clone, Debug, PartialEq)]
pub struct TrainingSample {
    pub inputs: Vec<f64>,
    pub targets: Vec<f64>,
}

/// Содержимое файла обучения: топология сети и примеры.
///
/// Формат (разделители - пробелы и переводы строк):
/// количество слоёв, размеры слоёв, количество примеров,
/// затем для каждого примера входы и сразу за ними цели.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainingData {
    pub topology: Vec<LayerTopology>,
    pub samples: Vec<TrainingSample>,
}

impl TrainingData {
    /// Разбор текста. Всё, что идёт после объявленных примеров, игнорируется.
    pub fn parse(text: &str) -> Result<Self, TrainingDataError> {
        let mut tokens = Tokens(text.split_whitespace());

        let layers: usize = tokens.value("layer count")?;
        let mut topology = Vec::new();
        for _ in 0..layers {
            topology.push(LayerTopology {
                neurons: tokens.value("layer size")?,
            });
        }
        LayerTopology::validate(&topology)?;

        let inputs_len = topology[0].neurons;
        let targets_len = topology[topology.len() - 1].neurons;
        let count: usize = tokens.value("sample count")?;

        let mut samples = Vec::new();
        for _ in 0..count {
            let inputs = tokens.values(inputs_len, "input value")?;
            let targets = tokens.values(targets_len, "target value")?;
            samples.push(TrainingSample { inputs, targets });
        }

        if tokens.0.next().is_some() {
            debug!(samples = count, "ignoring trailing tokens in training data");
        }
        Ok(Self { topology, samples })
    }

    pub fn from_reader(mut reader: impl Read) -> Result<Self, TrainingDataError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(&text)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TrainingDataError> {
        let path = path.as_ref();
        let data = Self::parse(&fs::read_to_string(path)?)?;
        debug!(
            path = %path.display(),
            topology = %LayerTopology::describe(&data.topology),
            samples = data.samples.len(),
            "loaded training data"
        );
        Ok(data)
    }
}

struct Tokens<'a>(SplitWhitespace<'a>);

impl Tokens<'_> {
    fn value<T: FromStr>(&mut self, what: &'static str) -> Result<T, TrainingDataError> {
        let token = self
            .0
            .next()
            .ok_or(TrainingDataError::UnexpectedEnd { what })?;
        token.parse().map_err(|_| TrainingDataError::Parse {
            what,
            token: token.to_string(),
        })
    }

    fn values(&mut self, len: usize, what: &'static str) -> Result<Vec<f64>, TrainingDataError> {
        (0..len).map(|_| self.value(what)).collect()
    }
}
