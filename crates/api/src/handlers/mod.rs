pub mod games;
pub mod lookups;
