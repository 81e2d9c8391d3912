use colored::Colorize;
use std::num::ParseIntError;
use thiserror::Error;

/// Errors that can occur while populating a struct from the environment
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PopulateError {
    /// An annotated variable is absent or blank while presence is required
    #[error("environment variable '{var}' is missing or blank")]
    Missing { var: String },

    /// An annotated variable is set but its value is not valid unicode
    #[error("environment variable '{var}' is not valid unicode")]
    InvalidUtf8 { var: String },

    /// An annotated variable could not be converted to the field's type
    #[error("error parsing environment variable '{var}' to type '{expected_type}': {source}")]
    Parse {
        var: String,
        value: String,
        expected_type: &'static str,
        #[source]
        source: ParseFailure,
    },

    /// One level of struct nesting the error passed through, e.g. `Config.database`
    #[error("in {context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<PopulateError>,
    },
}

/// The underlying conversion failure behind [`PopulateError::Parse`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error(transparent)]
    Int(#[from] ParseIntError),
    #[error(transparent)]
    Bool(#[from] InvalidBool),
}

/// Returned when a value is not one of the accepted boolean literals
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid boolean literal '{literal}'")]
pub struct InvalidBool {
    pub literal: String,
}

impl PopulateError {
    /// Wrap this error with the struct and field it was raised under
    pub fn within(self, record: &str, field: &str) -> Self {
        Self::Context {
            context: format!("{record}.{field}"),
            source: Box::new(self),
        }
    }

    /// The innermost error, with all context layers stripped
    pub fn root_cause(&self) -> &PopulateError {
        let mut current = self;
        while let Self::Context { source, .. } = current {
            current = &**source;
        }
        current
    }

    /// Name of the environment variable that caused the failure
    pub fn var(&self) -> &str {
        match self {
            Self::Missing { var } | Self::InvalidUtf8 { var } | Self::Parse { var, .. } => var,
            Self::Context { source, .. } => source.var(),
        }
    }

    /// Context layers from the outermost call down to the failing field
    pub fn context_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        let mut current = self;
        while let Self::Context { context, source } = current {
            path.push(context.as_str());
            current = &**source;
        }
        path
    }

    pub fn is_missing(&self) -> bool {
        matches!(self.root_cause(), Self::Missing { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self.root_cause(), Self::Parse { .. })
    }

    /// Multi-line, colored report suitable for printing to a terminal
    pub fn render(&self) -> String {
        let mut out = format!("{}\n", "Failed to populate configuration".bold());
        for context in self.context_path() {
            out.push_str(&format!("\tin {}\n", context.cyan()));
        }

        match self.root_cause() {
            Self::Missing { var } => {
                out.push_str(&format!(
                    "{}: Is missing from environment or blank and is required",
                    var.magenta().bold()
                ));
            }
            Self::InvalidUtf8 { var } => {
                out.push_str(&format!(
                    "{}: Value is not valid unicode",
                    var.magenta().bold()
                ));
            }
            Self::Parse {
                var,
                value,
                expected_type,
                source,
            } => {
                out.push_str(&format!(
                    "{}: Invalid value {} for type {}: {}",
                    var.magenta().bold(),
                    format!("'{}'", value).red(),
                    expected_type.yellow(),
                    source
                ));
            }
            Self::Context { .. } => unreachable!("root cause is never a context layer"),
        }
        out
    }
}
