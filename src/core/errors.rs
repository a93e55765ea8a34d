use thiserror::Error;

pub type Result<T> = std::result::Result<T, SampleError>;

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("encoding unavailable: {0}")]
    EncodingUnavailable(String),

    /// A byte pair the legacy table has no character for. Pairs drawn by
    /// `CodePointPair::draw` never produce this.
    #[error("unmapped code point {high:#04x} {low:#04x} in {encoding}")]
    Unmapped {
        encoding: &'static str,
        high: u8,
        low: u8,
    },

    #[error("text is not representable in {encoding}")]
    Unrepresentable { encoding: &'static str },

    #[error("utf-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("bson serialization error: {0}")]
    BsonSer(#[from] bson::ser::Error),

    #[error("bson deserialization error: {0}")]
    BsonDe(#[from] bson::de::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} requires a value")]
    MissingValue(String),

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("unexpected extra argument '{0}'")]
    UnexpectedArgument(String),

    #[error("invalid value '{value}' for {option}")]
    InvalidValue { option: String, value: String },
}
