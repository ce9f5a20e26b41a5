use std::error::Error;
use std::fmt::{Display, Formatter};

pub type FormulaResult<T> = Result<T, FormulaError>;
pub type MolmassResult<T> = Result<T, MolmassError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Success,
    InputValidationError,
    IoSystemError,
    InternalError,
}

impl ErrorCategory {
    pub const fn exit_mapping(self) -> ExitMapping {
        match self {
            Self::Success => ExitMapping {
                exit_code: 0,
                label: "Success",
            },
            Self::InputValidationError => ExitMapping {
                exit_code: 2,
                label: "InputValidationError",
            },
            Self::IoSystemError => ExitMapping {
                exit_code: 3,
                label: "IoSystemError",
            },
            Self::InternalError => ExitMapping {
                exit_code: 5,
                label: "InternalError",
            },
        }
    }

    pub const fn exit_code(self) -> i32 {
        self.exit_mapping().exit_code
    }

    pub const fn label(self) -> &'static str {
        self.exit_mapping().label
    }

    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Success)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitMapping {
    pub exit_code: i32,
    pub label: &'static str,
}

/// Failure of a single formula interpretation.
///
/// Positions are 0-based character offsets into the trimmed input, so they
/// stay meaningful after whitespace removal and group expansion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormulaError {
    #[error("formula is empty")]
    EmptyFormula,
    #[error("{message} at position {position}")]
    Syntax { position: usize, message: String },
    #[error("unknown element '{symbol}' at position {position}")]
    UnknownElement { symbol: String, position: usize },
    #[error("composition invariant violated: {message}")]
    Invariant { message: String },
}

impl FormulaError {
    pub fn syntax(position: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            position,
            message: message.into(),
        }
    }

    pub fn unknown_element(symbol: impl Into<String>, position: usize) -> Self {
        Self::UnknownElement {
            symbol: symbol.into(),
            position,
        }
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        Self::Invariant {
            message: message.into(),
        }
    }

    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyFormula | Self::Syntax { .. } | Self::UnknownElement { .. } => {
                ErrorCategory::InputValidationError
            }
            Self::Invariant { .. } => ErrorCategory::InternalError,
        }
    }

    pub const fn placeholder(&self) -> &'static str {
        match self {
            Self::EmptyFormula => "INPUT.EMPTY_FORMULA",
            Self::Syntax { .. } => "INPUT.FORMULA_SYNTAX",
            Self::UnknownElement { .. } => "INPUT.UNKNOWN_ELEMENT",
            Self::Invariant { .. } => "SYS.COMPOSITION_INVARIANT",
        }
    }

    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::Syntax { position, .. } | Self::UnknownElement { position, .. } => {
                Some(*position)
            }
            Self::EmptyFormula | Self::Invariant { .. } => None,
        }
    }

    pub const fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }
}

/// Shared diagnostic shape for every failure the workspace reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MolmassError {
    category: ErrorCategory,
    placeholder: &'static str,
    message: String,
}

impl MolmassError {
    pub fn new(
        category: ErrorCategory,
        placeholder: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder,
            message: message.into(),
        }
    }

    pub fn input_validation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::InputValidationError, placeholder, message)
    }

    pub fn io_system(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::IoSystemError, placeholder, message)
    }

    pub fn internal(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::InternalError, placeholder, message)
    }

    pub const fn category(&self) -> ErrorCategory {
        self.category
    }

    pub const fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        let severity = if self.category.is_fatal() {
            "ERROR"
        } else {
            "INFO"
        };
        format!("{}: [{}] {}", severity, self.placeholder, self.message)
    }

    pub fn fatal_exit_line(&self) -> Option<String> {
        self.category
            .is_fatal()
            .then(|| format!("FATAL EXIT CODE: {}", self.exit_code()))
    }
}

impl Display for MolmassError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category.label(),
            self.placeholder,
            self.message
        )
    }
}

impl Error for MolmassError {}

impl From<&FormulaError> for MolmassError {
    fn from(error: &FormulaError) -> Self {
        Self::new(error.category(), error.placeholder(), error.to_string())
    }
}

impl From<FormulaError> for MolmassError {
    fn from(error: FormulaError) -> Self {
        Self::from(&error)
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorCategory, FormulaError, MolmassError};

    #[test]
    fn exit_mapping_is_stable() {
        let cases = [
            (ErrorCategory::Success, 0, "Success"),
            (
                ErrorCategory::InputValidationError,
                2,
                "InputValidationError",
            ),
            (ErrorCategory::IoSystemError, 3, "IoSystemError"),
            (ErrorCategory::InternalError, 5, "InternalError"),
        ];

        for (category, exit_code, label) in cases {
            let mapping = category.exit_mapping();
            assert_eq!(mapping.exit_code, exit_code);
            assert_eq!(mapping.label, label);
        }
    }

    #[test]
    fn formula_errors_map_to_input_validation_except_invariants() {
        let empty = FormulaError::EmptyFormula;
        let syntax = FormulaError::syntax(3, "unbalanced parentheses: unmatched '('");
        let unknown = FormulaError::unknown_element("Xx", 0);
        let invariant = FormulaError::invariant("molecular weight must be positive");

        assert_eq!(empty.category(), ErrorCategory::InputValidationError);
        assert_eq!(syntax.category(), ErrorCategory::InputValidationError);
        assert_eq!(unknown.category(), ErrorCategory::InputValidationError);
        assert_eq!(invariant.category(), ErrorCategory::InternalError);
        assert_eq!(unknown.exit_code(), 2);
        assert_eq!(invariant.exit_code(), 5);

        assert_eq!(syntax.position(), Some(3));
        assert_eq!(unknown.position(), Some(0));
        assert_eq!(empty.position(), None);
    }

    #[test]
    fn formula_error_renders_compatibility_lines() {
        let error = MolmassError::from(FormulaError::unknown_element("Xx", 0));

        assert_eq!(error.placeholder(), "INPUT.UNKNOWN_ELEMENT");
        assert_eq!(
            error.diagnostic_line(),
            "ERROR: [INPUT.UNKNOWN_ELEMENT] unknown element 'Xx' at position 0"
        );
        assert_eq!(
            error.fatal_exit_line().as_deref(),
            Some("FATAL EXIT CODE: 2")
        );
        assert_eq!(
            error.to_string(),
            "InputValidationError [INPUT.UNKNOWN_ELEMENT] unknown element 'Xx' at position 0"
        );
    }

    #[test]
    fn success_category_is_not_fatal() {
        let info = MolmassError::new(ErrorCategory::Success, "RUN.NOTE", "nothing to do");
        assert_eq!(info.diagnostic_line(), "INFO: [RUN.NOTE] nothing to do");
        assert!(info.fatal_exit_line().is_none());
    }
}
