pub mod canvas;
pub mod types;
pub mod value;
