use alloc::boxed::Box;
use alloc::vec::{self, Vec};
use core::error::Error;
use core::fmt;

use crate::info::TypePath;
use crate::{FromReflect, Reflect};

// -----------------------------------------------------------------------------
// InvokeError

/// A enumeration of all error outcomes that might happen when
/// running a type-erased method invoker.
#[derive(Debug)]
pub enum InvokeError {
    /// An instance member was reached without an instance.
    MissingReceiver { member: &'static str },
    /// The receiver is not an instance of the declaring class.
    ReceiverMismatch {
        member: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    /// The number of arguments does not match the declared parameters.
    ArgumentCount {
        member: &'static str,
        expected: usize,
        found: usize,
    },
    /// An argument cannot be converted to the declared parameter type.
    ArgumentType {
        member: &'static str,
        index: usize,
        expected: &'static str,
        found: &'static str,
    },
    /// The method body itself returned an error.
    Raised(Box<dyn Error + Send + Sync>),
}

impl InvokeError {
    /// Wraps an error returned by a method body.
    #[inline]
    pub fn raised(error: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::Raised(error.into())
    }
}

impl fmt::Display for InvokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingReceiver { member } => {
                write!(f, "`{member}` is an instance member but no instance was given")
            }
            Self::ReceiverMismatch {
                member,
                expected,
                found,
            } => {
                write!(f, "`{member}` expects a `{expected}` receiver, found `{found}`")
            }
            Self::ArgumentCount {
                member,
                expected,
                found,
            } => {
                write!(f, "`{member}` takes {expected} argument(s) but {found} were supplied")
            }
            Self::ArgumentType {
                member,
                index,
                expected,
                found,
            } => {
                write!(
                    f,
                    "argument {index} of `{member}` expects `{expected}`, found `{found}`"
                )
            }
            Self::Raised(error) => write!(f, "method raised an error: {error}"),
        }
    }
}

impl Error for InvokeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Raised(error) => Some(&**error),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Args

/// Positional arguments of a type-erased call.
///
/// Used by generated invokers to check the argument count once and then
/// convert each argument to its declared parameter type.
///
/// # Examples
///
/// ```
/// use rp_reflect::{Reflect, ops::Args};
///
/// let values: Vec<Box<dyn Reflect>> = vec![Box::new(1_i32), Box::new(String::from("a"))];
/// let mut args = Args::new("demo", values, 2).unwrap();
/// assert_eq!(args.take::<i32>().unwrap(), 1);
/// assert_eq!(args.take::<String>().unwrap(), "a");
/// ```
pub struct Args {
    member: &'static str,
    values: vec::IntoIter<Box<dyn Reflect>>,
    index: usize,
}

impl Args {
    /// Checks that exactly `expected` arguments were supplied.
    pub fn new(
        member: &'static str,
        values: Vec<Box<dyn Reflect>>,
        expected: usize,
    ) -> Result<Self, InvokeError> {
        if values.len() != expected {
            return Err(InvokeError::ArgumentCount {
                member,
                expected,
                found: values.len(),
            });
        }
        Ok(Self {
            member,
            values: values.into_iter(),
            index: 0,
        })
    }

    /// Converts the next argument to `T`.
    pub fn take<T: FromReflect + TypePath>(&mut self) -> Result<T, InvokeError> {
        let index = self.index;
        let Some(value) = self.values.next() else {
            return Err(InvokeError::ArgumentCount {
                member: self.member,
                expected: index + 1,
                found: index,
            });
        };
        self.index += 1;

        let found = value.reflect_type_path();
        T::take_from_reflect(value).map_err(|_| InvokeError::ArgumentType {
            member: self.member,
            index,
            expected: T::type_path(),
            found,
        })
    }
}

// -----------------------------------------------------------------------------
// Receiver helpers

/// Downcasts the receiver of an `&self` method.
pub fn receiver_ref<'a, T: Reflect + TypePath>(
    receiver: Option<&'a mut dyn Reflect>,
    member: &'static str,
) -> Result<&'a T, InvokeError> {
    let receiver = receiver.ok_or(InvokeError::MissingReceiver { member })?;
    let found = receiver.reflect_type_path();
    receiver
        .downcast_ref::<T>()
        .ok_or(InvokeError::ReceiverMismatch {
            member,
            expected: T::type_path(),
            found,
        })
}

/// Downcasts the receiver of an `&mut self` method.
pub fn receiver_mut<'a, T: Reflect + TypePath>(
    receiver: Option<&'a mut dyn Reflect>,
    member: &'static str,
) -> Result<&'a mut T, InvokeError> {
    let receiver = receiver.ok_or(InvokeError::MissingReceiver { member })?;
    let found = receiver.reflect_type_path();
    receiver
        .downcast_mut::<T>()
        .ok_or(InvokeError::ReceiverMismatch {
            member,
            expected: T::type_path(),
            found,
        })
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec;

    use super::{Args, InvokeError, receiver_mut, receiver_ref};
    use crate::Reflect;

    #[test]
    fn argument_count_is_checked_up_front() {
        let err = Args::new("f", vec![Box::new(1_i32) as Box<dyn Reflect>], 2).err().unwrap();
        assert!(matches!(
            err,
            InvokeError::ArgumentCount { expected: 2, found: 1, .. }
        ));
    }

    #[test]
    fn argument_type_reports_both_types() {
        let mut args = Args::new("f", vec![Box::new(1_u8) as Box<dyn Reflect>], 1).unwrap();
        let err = args.take::<String>().unwrap_err();
        match err {
            InvokeError::ArgumentType {
                index,
                expected,
                found,
                ..
            } => {
                assert_eq!(index, 0);
                assert_eq!(expected, "alloc::string::String");
                assert_eq!(found, "u8");
            }
            other => panic!("unexpected {other}"),
        }
    }

    #[test]
    fn receivers() {
        let mut value = 5_i32;
        assert_eq!(receiver_ref::<i32>(Some(&mut value), "r").unwrap(), &5);
        *receiver_mut::<i32>(Some(&mut value), "r").unwrap() = 6;
        assert_eq!(value, 6);

        assert!(matches!(
            receiver_ref::<i32>(None, "r"),
            Err(InvokeError::MissingReceiver { member: "r" })
        ));
        assert!(matches!(
            receiver_ref::<u8>(Some(&mut value), "r"),
            Err(InvokeError::ReceiverMismatch { found: "i32", .. })
        ));
    }

    #[test]
    fn raised_errors_keep_their_source() {
        let err = InvokeError::raised("boom");
        assert_eq!(alloc::format!("{err}"), "method raised an error: boom");
        assert!(core::error::Error::source(&err).is_some());
    }
}
