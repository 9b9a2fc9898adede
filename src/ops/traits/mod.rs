//! Operation traits implemented by runtime clients

mod binary;
mod matmul;
mod random;
mod reduce;
mod unary;

pub use binary::BinaryOps;
pub use matmul::MatmulOps;
pub use random::RandomOps;
pub use reduce::ReduceOps;
pub use unary::UnaryOps;
