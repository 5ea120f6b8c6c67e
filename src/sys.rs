pub mod backend;
pub mod geometry;
pub mod keysym;
pub mod process;
