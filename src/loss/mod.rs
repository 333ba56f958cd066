pub mod cost;
pub mod cross_entropy;
pub mod quadratic;

pub use cost::CostFunction;
pub use cross_entropy::CrossEntropyCost;
pub use quadratic::QuadraticCost;
