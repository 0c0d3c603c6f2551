pub mod decode;
pub mod entity;
pub mod error;
pub mod tagged;
pub mod timestamp;
