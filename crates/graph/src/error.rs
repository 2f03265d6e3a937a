use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Note '{0}' not found")]
    NameNotFound(String),

    #[error("No path between '{from}' and '{to}'")]
    NoPathExists { from: String, to: String },

    #[error("Invalid parameter {name}={value}: expected a value in [{min}, {max}]")]
    InvalidParameter {
        name: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },
}

impl GraphError {
    /// Reject `value` unless it lies in `min..=max`.
    pub(crate) fn check_range(
        name: &'static str,
        value: usize,
        min: usize,
        max: usize,
    ) -> Result<()> {
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(Self::InvalidParameter {
                name,
                value,
                min,
                max,
            })
        }
    }
}
