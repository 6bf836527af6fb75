pub mod area;
pub mod group;
pub mod mark;
pub mod rule;
pub mod text;
