use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and CLI exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input/Validation
    /// A command-line or API argument is malformed
    InvalidInput,
    /// The loaded file is not a well-formed rectangular record collection
    InvalidSnapshot,
    /// The file extension or encoding is not one the loader understands
    UnsupportedFormat,

    // Configuration
    UnknownCurrency,
    InvalidConfig,

    // Integration/IO
    Io,
    Serialization,
    ExternalService,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidSnapshot => "ERR_INVALID_SNAPSHOT",
            ExErrorKind::UnsupportedFormat => "ERR_UNSUPPORTED_FORMAT",
            ExErrorKind::UnknownCurrency => "ERR_UNKNOWN_CURRENCY",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus optional
/// context (operation, snapshot label, column, row) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    snapshot: Option<String>,
    column: Option<String>,
    row: Option<usize>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            snapshot: None,
            column: None,
            row: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add snapshot label context
    pub fn with_snapshot(mut self, label: impl Into<String>) -> Self {
        self.snapshot = Some(label.into());
        self
    }

    /// Add column context
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Add 1-based data row context
    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the snapshot label context, if any
    pub fn snapshot(&self) -> Option<&str> {
        self.snapshot.as_deref()
    }

    /// Get the column context, if any
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// Get the row context, if any
    pub fn row(&self) -> Option<usize> {
        self.row
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(snapshot) = &self.snapshot {
            write!(f, " (snapshot: {})", snapshot)?;
        }
        if let Some(column) = &self.column {
            write!(f, " (column: {})", column)?;
        }
        if let Some(row) = self.row {
            write!(f, " (row: {})", row)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for loan tape operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoanTapeError {
    /// Currency code is not present in the rate table
    #[error("Unknown currency: {code}")]
    UnknownCurrency { code: String },

    /// The file type is not supported by the loader
    #[error("Unsupported snapshot format: {path}")]
    UnsupportedFormat { path: String },

    /// The header row names the same column twice
    #[error("Duplicate column '{column}' in snapshot {label}")]
    DuplicateColumn { label: String, column: String },

    /// A data row has more cells than the header
    #[error("Row {row} of snapshot {label} has {found} cells, header has {expected}")]
    RaggedRow {
        label: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Product configuration could not be read or written
    #[error("Invalid product config: {reason}")]
    Config { reason: String },
}

impl From<LoanTapeError> for ExError {
    fn from(err: LoanTapeError) -> Self {
        let message = err.to_string();
        match err {
            LoanTapeError::UnknownCurrency { .. } => {
                ExError::new(ExErrorKind::UnknownCurrency).with_message(message)
            }
            LoanTapeError::UnsupportedFormat { .. } => {
                ExError::new(ExErrorKind::UnsupportedFormat).with_message(message)
            }
            LoanTapeError::DuplicateColumn { label, column } => {
                ExError::new(ExErrorKind::InvalidSnapshot)
                    .with_snapshot(label)
                    .with_column(column)
                    .with_message(message)
            }
            LoanTapeError::RaggedRow { label, row, .. } => {
                ExError::new(ExErrorKind::InvalidSnapshot)
                    .with_snapshot(label)
                    .with_row(row)
                    .with_message(message)
            }
            LoanTapeError::Config { .. } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        ExError::new(ExErrorKind::Serialization).with_message(err.to_string())
    }
}
