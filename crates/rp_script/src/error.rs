use alloc::string::String;

use rp_reflect::ops::{InvokeError, ReflectCloneError};
use thiserror::Error;

// -----------------------------------------------------------------------------
// InvalidScriptReason

/// Why a script, or the arguments passed along with it, were rejected
/// before any member was touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidScriptReason {
    #[error("empty segment at offset {offset}")]
    EmptySegment { offset: usize },

    #[error("field name `{name}` contains `.`")]
    DottedFieldName { name: String },

    #[error("`{token}` is not a placeholder, expected `%<positive integer>`")]
    MalformedPlaceholder { token: String },

    #[error("placeholder `%{placeholder}` refers past the {available} supplied argument(s)")]
    PlaceholderOutOfRange { placeholder: usize, available: usize },

    #[error("argument bound to `%{placeholder}` cannot be cloned")]
    ArgumentNotCloneable { placeholder: usize },

    #[error("{values} argument value(s) but {types} argument type(s)")]
    ArgumentTypes { values: usize, types: usize },
}

// -----------------------------------------------------------------------------
// ScriptError

/// An error raised while evaluating a script.
///
/// Every variant names the class being resolved and the script text,
/// so a failing segment can be located from the message alone.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScriptError {
    #[error("invalid script `{script}` for class `{class}`: {reason}")]
    InvalidScript {
        class: &'static str,
        script: String,
        reason: InvalidScriptReason,
    },

    #[error("cannot find `{member}` in class `{class}` or its base classes, check `{script}`")]
    MemberNotFound {
        class: &'static str,
        member: String,
        script: String,
    },

    #[error("calling `{member}` on class `{class}` failed, check `{script}`")]
    InvocationFault {
        class: &'static str,
        member: String,
        script: String,
        #[source]
        source: InvokeError,
    },

    #[error("cannot find class `{class}`, check `{script}`")]
    ClassNotFound { class: String, script: String },

    #[error("null value of class `{class}` cannot be dereferenced, check `{script}`")]
    NullTarget { class: &'static str, script: String },

    #[error(
        "`{member}` of class `{class}` expects `{expected}`, found `{found}`, check `{script}`"
    )]
    TypeMismatch {
        class: &'static str,
        member: String,
        expected: &'static str,
        found: &'static str,
        script: String,
    },

    #[error("`{member}` of class `{class}` cannot be cloned out, check `{script}`")]
    NotCloneable {
        class: &'static str,
        member: String,
        script: String,
        #[source]
        source: ReflectCloneError,
    },

    #[error(
        "cannot assign through `{member}()` on class `{class}`, its result is a detached value, check `{script}`"
    )]
    DetachedAssignment {
        class: &'static str,
        member: String,
        script: String,
    },
}

impl ScriptError {
    /// The script that was being evaluated.
    pub fn script(&self) -> &str {
        match self {
            Self::InvalidScript { script, .. }
            | Self::MemberNotFound { script, .. }
            | Self::InvocationFault { script, .. }
            | Self::ClassNotFound { script, .. }
            | Self::NullTarget { script, .. }
            | Self::TypeMismatch { script, .. }
            | Self::NotCloneable { script, .. }
            | Self::DetachedAssignment { script, .. } => script,
        }
    }

    /// The class that was being resolved when the error happened.
    pub fn class_name(&self) -> &str {
        match self {
            Self::ClassNotFound { class, .. } => class,
            Self::InvalidScript { class, .. }
            | Self::MemberNotFound { class, .. }
            | Self::InvocationFault { class, .. }
            | Self::NullTarget { class, .. }
            | Self::TypeMismatch { class, .. }
            | Self::NotCloneable { class, .. }
            | Self::DetachedAssignment { class, .. } => class,
        }
    }

    /// The error raised by an invoked method, if any.
    pub fn invoke_error(&self) -> Option<&InvokeError> {
        match self {
            Self::InvocationFault { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};

    use rp_reflect::ops::InvokeError;

    use super::{InvalidScriptReason, ScriptError};

    #[test]
    fn messages_name_class_and_script() {
        let err = ScriptError::MemberNotFound {
            class: "shop::Order",
            member: String::from("total"),
            script: String::from("items.total"),
        };
        let message = err.to_string();
        assert!(message.contains("shop::Order"));
        assert!(message.contains("items.total"));
        assert_eq!(err.class_name(), "shop::Order");
        assert_eq!(err.script(), "items.total");
    }

    #[test]
    fn invocation_fault_keeps_source() {
        use core::error::Error;

        let err = ScriptError::InvocationFault {
            class: "shop::Order",
            member: String::from("close"),
            script: String::from("close()"),
            source: InvokeError::raised("already closed"),
        };
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "method raised an error: already closed");
        assert!(matches!(err.invoke_error(), Some(InvokeError::Raised(_))));
    }

    #[test]
    fn reason_display() {
        let reason = InvalidScriptReason::PlaceholderOutOfRange {
            placeholder: 3,
            available: 1,
        };
        assert_eq!(
            reason.to_string(),
            "placeholder `%3` refers past the 1 supplied argument(s)"
        );
    }
}
