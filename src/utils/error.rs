use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid record in {file} at line {line}: {reason}")]
    InvalidRecord {
        file: String,
        line: u64,
        reason: String,
    },

    #[error("Unknown team: {team}")]
    UnknownTeam { team: String },

    #[error("Unknown player '{player}' for team {team}")]
    UnknownPlayer { team: String, player: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Selection,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl StatsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            StatsError::IoError(_) | StatsError::ZipError(_) => ErrorCategory::Io,
            StatsError::CsvError(_)
            | StatsError::SerializationError(_)
            | StatsError::InvalidRecord { .. } => ErrorCategory::Data,
            StatsError::ConfigError { .. }
            | StatsError::ConfigValidationError { .. }
            | StatsError::InvalidConfigValueError { .. }
            | StatsError::MissingConfigError { .. } => ErrorCategory::Configuration,
            StatsError::UnknownTeam { .. } | StatsError::UnknownPlayer { .. } => {
                ErrorCategory::Selection
            }
            StatsError::ProcessingError { .. } | StatsError::ValidationError { .. } => {
                ErrorCategory::Processing
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Selection => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data | ErrorCategory::Processing => {
                ErrorSeverity::High
            }
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            StatsError::IoError(_) => {
                "Check that the input files exist and the output directory is writable".to_string()
            }
            StatsError::ZipError(_) => "Retry without --zip or free up disk space".to_string(),
            StatsError::CsvError(_) | StatsError::InvalidRecord { .. } => {
                "Fix the offending row or re-export the spreadsheet as plain CSV".to_string()
            }
            StatsError::SerializationError(_) => "Drop the json output format and retry".to_string(),
            StatsError::ConfigError { .. }
            | StatsError::ConfigValidationError { .. }
            | StatsError::InvalidConfigValueError { .. }
            | StatsError::MissingConfigError { .. } => {
                "Review the command-line flags or the TOML configuration file".to_string()
            }
            StatsError::UnknownTeam { .. } => {
                "Run with --list-teams to see the teams present in the games file".to_string()
            }
            StatsError::UnknownPlayer { .. } => {
                "Run with --list-players to see the players recorded for the team".to_string()
            }
            StatsError::ProcessingError { .. } | StatsError::ValidationError { .. } => {
                "Re-run with --verbose for details".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            StatsError::IoError(e) => format!("Could not read or write a file: {}", e),
            StatsError::InvalidRecord { file, line, reason } => {
                format!("{} line {} is not a valid row: {}", file, line, reason)
            }
            StatsError::UnknownTeam { team } => {
                format!("No games found for a team called '{}'", team)
            }
            StatsError::UnknownPlayer { team, player } => {
                format!("{} has no player called '{}'", team, player)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
