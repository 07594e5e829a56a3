//! Полносвязная сеть прямого распространения с обучением
//! обратным распространением ошибки и моментом.

pub use self::{
    config::*, connection::*, error::*, layer::*, layer_topology::*, network::*, neuron::*,
    polarity::*, training_data::*,
};
use itertools::Itertools;
use rand::{Rng, RngCore};
use tracing::{debug, trace};

mod config;
mod connection;
mod error;
mod layer;
mod layer_topology;
mod network;
mod neuron;
mod polarity;
mod training_data;
