pub mod neural_network;

pub use neural_network::NeuralNetworkGenome;
