use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed schedule ({context}): {message}")]
    MalformedSchedule { context: String, message: String },

    #[error("schedule has no color or visibility keyframes; its time range is undefined")]
    EmptyDocument,

    #[error("invalid value: {message}")]
    InvalidValue { message: String },

    #[cfg(feature = "json")]
    #[error("failed to parse schedule JSON: {message}")]
    JsonParse { message: String },
}
