pub mod describe;
pub mod offset;
pub mod spans;
