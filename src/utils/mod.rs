pub mod file;
pub mod language;
pub mod normalize;
