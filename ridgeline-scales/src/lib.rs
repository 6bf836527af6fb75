pub mod array;
pub mod color;
pub mod error;
pub mod numeric;
pub mod temporal;
