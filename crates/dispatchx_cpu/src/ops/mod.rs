pub mod binary;
pub mod cast;
pub mod fill;
pub mod reduction;
pub mod unary;
