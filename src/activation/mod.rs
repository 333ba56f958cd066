pub mod sigmoid;

pub use sigmoid::{sigmoid, sigmoid_prime, sigmoid_prime_from_activation};
