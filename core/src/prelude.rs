/// Error raised while converting a detection-format record to or from JSON.
#[derive(thiserror::Error, Debug)]
pub enum FormatError {
    #[error("malformed json: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("format error: {0}")]
    Format(String),
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

pub type FormatResult<T> = Result<T, FormatError>;

/// Field-level validation shared by the detection-format records.
///
/// Validation problems are reported as data: `errors` never fails and an
/// empty list means the record is valid.
pub trait Validate {
    fn errors(&self) -> Vec<String>;

    fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }
}
