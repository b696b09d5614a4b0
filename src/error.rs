use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Configuration Error: {0}")]
    ConfigInvalid(String),

    #[error("Invalid Parameter: {name} = {value}")]
    InvalidParameter { name: String, value: String },

    // فشل بناء الـ Fixture قاتل (Fatal) ولا تتم إعادة المحاولة
    #[error("Fixture Build Failed: variant={variant} size={size} | {reason}")]
    FixtureBuild { variant: String, size: usize, reason: String },

    #[error("Unknown Benchmark: {0}")]
    UnknownBenchmark(String),
    #[error("Fork Failed: {0}")]
    ForkFailed(String),

    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Wire Format Error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HarnessError {
    pub fn invalid_parameter(name: &str, value: impl ToString) -> Self {
        HarnessError::InvalidParameter {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

pub type HarnessResult<T> = Result<T, HarnessError>;
