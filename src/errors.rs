use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Enumeration of all possible errors that can occur while re-timing a track
#[derive(Debug)]
pub enum SubsyncError {
    Parse(ParseError),
    Alignment(AlignmentError),
    Io(IoError),
}

impl SubsyncError {
    /// Short name of the pipeline stage that failed
    pub fn stage(&self) -> &'static str {
        match self {
            SubsyncError::Parse(_) => "parse",
            SubsyncError::Alignment(_) => "align",
            SubsyncError::Io(_) => "io",
        }
    }
}

/// Malformed subtitle input
#[derive(Debug)]
pub struct ParseError {
    pub path: Option<PathBuf>,
    /// 1-based line number of the offending line
    pub line: usize,
    pub message: String,
}

impl ParseError {
    /// Create a new error for the given line.
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            path: None,
            line,
            message: message.into(),
        }
    }

    /// Attach the path of the file being parsed.
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }
}

/// No reliable correspondence between the two fingerprint sets
#[derive(Debug)]
pub struct AlignmentError {
    pub message: String,
}

impl AlignmentError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Unreadable source or unwritable destination
#[derive(Debug)]
pub struct IoError {
    pub path: PathBuf,
    pub source: io::Error,
}

impl IoError {
    pub fn new(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl fmt::Display for SubsyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubsyncError::Parse(err) => write!(f, "Parse error: {}", err),
            SubsyncError::Alignment(err) => write!(f, "Alignment error: {}", err),
            SubsyncError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}:{}: {}", path.display(), self.line, self.message),
            None => write!(f, "line {}: {}", self.line, self.message),
        }
    }
}

impl fmt::Display for AlignmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.source)
    }
}

impl Error for SubsyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SubsyncError::Io(err) => Some(&err.source),
            _ => None,
        }
    }
}
impl Error for ParseError {}
impl Error for AlignmentError {}
impl Error for IoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

// Conversion implementations
impl From<ParseError> for SubsyncError {
    fn from(err: ParseError) -> Self {
        SubsyncError::Parse(err)
    }
}

impl From<AlignmentError> for SubsyncError {
    fn from(err: AlignmentError) -> Self {
        SubsyncError::Alignment(err)
    }
}

impl From<IoError> for SubsyncError {
    fn from(err: IoError) -> Self {
        SubsyncError::Io(err)
    }
}

// Conversion to io::Error for callers working in io::Result
impl From<SubsyncError> for io::Error {
    fn from(err: SubsyncError) -> Self {
        match err {
            SubsyncError::Parse(err) => io::Error::new(io::ErrorKind::InvalidData, err),
            SubsyncError::Alignment(err) => io::Error::other(err),
            SubsyncError::Io(err) => io::Error::new(err.source.kind(), err),
        }
    }
}

impl From<ParseError> for io::Error {
    fn from(err: ParseError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

impl From<AlignmentError> for io::Error {
    fn from(err: AlignmentError) -> Self {
        io::Error::other(err)
    }
}

// Type alias for Result with SubsyncError
pub type SubsyncResult<T> = Result<T, SubsyncError>;
