mod core;
pub mod demo;
pub mod hanzi;
mod person;

pub use crate::core::errors::{ConfigError, Result, SampleError};
pub use crate::demo::{DemoConfig, DemoReport};
pub use crate::hanzi::{checked_length, generate, CodePointPair, EncodingRsCodec, HanziGenerator, LegacyCodec};
pub use crate::person::Person;
