pub mod branch;
pub mod merge;
pub mod objects;
