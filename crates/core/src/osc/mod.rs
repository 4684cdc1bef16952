pub mod address;
pub mod encoder;
pub mod message;
