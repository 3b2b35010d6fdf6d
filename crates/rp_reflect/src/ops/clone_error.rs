use core::fmt;

/// Why [`Reflect::reflect_clone`](crate::Reflect::reflect_clone) failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReflectCloneError {
    /// The class has no way to produce a copy of itself.
    Unsupported { class: &'static str },
    /// A declared field of `class` could not be copied.
    Field {
        class: &'static str,
        field: &'static str,
    },
}

impl ReflectCloneError {
    /// The class whose value could not be cloned.
    #[inline]
    pub fn class(&self) -> &'static str {
        match self {
            Self::Unsupported { class } | Self::Field { class, .. } => class,
        }
    }
}

impl fmt::Display for ReflectCloneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported { class } => write!(f, "`{class}` values cannot be cloned"),
            Self::Field { class, field } => {
                write!(f, "field `{field}` of `{class}` cannot be cloned")
            }
        }
    }
}

impl core::error::Error for ReflectCloneError {}
