use super::decode::DecodeError;
use std::error::Error as StdError;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Internal,
    Usage,
    Transport,
    UnexpectedStatus,
    Decode,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    hint: Option<String>,
    operation: Option<String>,
    status: Option<u16>,
    body: Option<Vec<u8>>,
    decode: Option<DecodeError>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            hint: None,
            operation: None,
            status: None,
            body: None,
            decode: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Identifier of the endpoint operation that produced the error, if any.
    pub fn operation(&self) -> Option<&str> {
        self.operation.as_deref()
    }

    /// HTTP status of the response, for unexpected-status and decode errors.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Raw response body carried by unexpected-status errors.
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    pub fn decode_error(&self) -> Option<&DecodeError> {
        self.decode.as_ref()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        let mut out = Error::new(ErrorKind::Decode).with_message(err.to_string());
        out.decode = Some(err);
        out
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(operation) = &self.operation {
            write!(f, " (operation: {operation})")?;
        }
        if let Some(status) = self.status {
            write!(f, " (status: {status})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        if let Some(source) = &self.source {
            return Some(source.as_ref() as &(dyn StdError + 'static));
        }
        self.decode
            .as_ref()
            .map(|decode| decode as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::Transport => 3,
        ErrorKind::UnexpectedStatus => 4,
        ErrorKind::Decode => 5,
    }
}
