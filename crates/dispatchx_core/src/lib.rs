pub mod backend;
pub mod buffer;
pub mod error;
pub mod layout;
pub mod scalar;
pub mod scalar_type;
