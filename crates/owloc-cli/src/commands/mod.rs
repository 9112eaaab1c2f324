pub mod export;
pub mod scan;
