/// Local filesystem source.
pub mod fs;
