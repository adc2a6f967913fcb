use std::cell::RefCell;
use std::sync::Arc;

/// Helper macro for creating ad-hoc [`Error`](crate::Error) values.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::msg(format!($($arg)*))
    };
}

/// An error that can occur while mapping a record.
#[derive(Clone)]
pub struct Error {
    kind: ErrorKind,
}

#[derive(Debug, Clone)]
enum ErrorKind {
    /// No record instance is bound to the handle.
    ModelNotSet,

    /// A value could not be converted to the requested representation.
    TypeConversion {
        from: &'static str,
        to: &'static str,
    },

    /// Ad-hoc error message.
    Message(String),

    /// Bridge for errors originating outside the crate.
    Other(Arc<anyhow::Error>),
}

impl Error {
    pub fn model_not_set() -> Self {
        Self {
            kind: ErrorKind::ModelNotSet,
        }
    }

    pub fn type_conversion(value: &crate::Value, to: &'static str) -> Self {
        Self {
            kind: ErrorKind::TypeConversion {
                from: value.kind_name(),
                to,
            },
        }
    }

    pub fn msg(msg: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Message(msg.into()),
        }
    }

    pub fn is_model_not_set(&self) -> bool {
        matches!(self.kind, ErrorKind::ModelNotSet)
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.kind {
            ErrorKind::ModelNotSet => f.write_str("model is not set"),
            ErrorKind::TypeConversion { from, to } => {
                write!(f, "cannot convert {from} to {to}")
            }
            ErrorKind::Message(msg) => f.write_str(msg),
            ErrorKind::Other(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if f.alternate() {
            core::fmt::Debug::fmt(&self.kind, f)
        } else {
            core::fmt::Display::fmt(self, f)
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Other(err) => Some(err.root_cause()),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self {
            kind: ErrorKind::Other(Arc::new(err)),
        }
    }
}

/// Accumulating error sink shared across one logical operation.
///
/// Classification never fails fast on caller input: recoverable problems are
/// reported here so the calling chain can inspect them after the operation
/// completes. The sink is single-flow by contract (see the concurrency notes
/// on [`Model`](crate::Model)) and is therefore not `Sync`.
#[derive(Default)]
pub struct Errors {
    list: RefCell<Vec<Error>>,
}

impl Errors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error without interrupting the surrounding operation.
    pub fn report(&self, err: Error) {
        self.list.borrow_mut().push(err);
    }

    pub fn is_empty(&self) -> bool {
        self.list.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.list.borrow().len()
    }

    pub fn first(&self) -> Option<Error> {
        self.list.borrow().first().cloned()
    }

    /// Drains all accumulated errors, leaving the sink empty.
    pub fn take(&self) -> Vec<Error> {
        self.list.take()
    }
}

impl core::fmt::Debug for Errors {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_list().entries(self.list.borrow().iter()).finish()
    }
}
