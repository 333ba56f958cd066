pub mod backprop;
pub mod error;
pub mod gradients;
pub mod network;

pub use backprop::{backpropagate, ForwardTrace};
pub use error::NetworkError;
pub use gradients::GradientSet;
pub use network::Network;
