//! Binding call placeholders to caller-supplied arguments.

use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::fmt;
use core::num::NonZeroUsize;
use core::str::FromStr;

use rp_reflect::Reflect;
use rp_reflect::info::Type;

use crate::args::Arguments;
use crate::error::InvalidScriptReason;

// -----------------------------------------------------------------------------
// Placeholder

/// A `%N` token inside a call segment, referring to the `N`-th argument.
///
/// `N` is 1-based in script text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Placeholder(NonZeroUsize);

impl Placeholder {
    /// Creates the placeholder `%number`, `None` if `number` is zero.
    #[inline]
    pub const fn new(number: usize) -> Option<Self> {
        match NonZeroUsize::new(number) {
            Some(number) => Some(Self(number)),
            None => None,
        }
    }

    /// Parses a `%N` token, ignoring surrounding whitespace.
    pub fn parse(token: &str) -> Result<Self, InvalidScriptReason> {
        let malformed = || InvalidScriptReason::MalformedPlaceholder {
            token: token.to_string(),
        };

        let digits = token.trim().strip_prefix('%').ok_or_else(malformed)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let number = digits.parse::<usize>().map_err(|_| malformed())?;
        Self::new(number).ok_or_else(malformed)
    }

    /// The 1-based number written in the script.
    #[inline]
    pub const fn number(self) -> usize {
        self.0.get()
    }

    /// The 0-based index into the argument vector.
    #[inline]
    pub const fn index(self) -> usize {
        self.0.get() - 1
    }
}

impl FromStr for Placeholder {
    type Err = InvalidScriptReason;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}

// -----------------------------------------------------------------------------
// Binding

/// The parameter types and argument values of one call, in call order.
pub struct BoundCall {
    pub types: Vec<Type>,
    pub values: Vec<Box<dyn Reflect>>,
}

impl fmt::Debug for BoundCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundCall")
            .field("types", &self.types)
            .field("values", &self.values)
            .finish()
    }
}

/// Binds each placeholder of a call to its argument.
///
/// The same argument may be referenced by several placeholders and by several
/// calls of one script, so every bound value is a clone.
///
/// # Examples
///
/// ```
/// use rp_reflect::Reflect;
/// use rp_script::{args::Arguments, bind::{Placeholder, bind_call}};
///
/// let args = Arguments::new().with(1_i32).with(String::from("x"));
/// let params = [Placeholder::new(2).unwrap(), Placeholder::new(1).unwrap()];
///
/// let bound = bind_call(&params, &args).unwrap();
/// assert!(bound.types[0].is::<String>());
/// assert_eq!(bound.values[1].downcast_ref::<i32>(), Some(&1));
/// ```
pub fn bind_call(params: &[Placeholder], args: &Arguments) -> Result<BoundCall, InvalidScriptReason> {
    let mut types = Vec::with_capacity(params.len());
    let mut values = Vec::with_capacity(params.len());

    for &placeholder in params {
        let out_of_range = || InvalidScriptReason::PlaceholderOutOfRange {
            placeholder: placeholder.number(),
            available: args.len(),
        };
        let value = args.value(placeholder.index()).ok_or_else(out_of_range)?;
        let ty = args.ty(placeholder.index()).ok_or_else(out_of_range)?;

        let value = value
            .reflect_clone()
            .map_err(|_| InvalidScriptReason::ArgumentNotCloneable {
                placeholder: placeholder.number(),
            })?;

        types.push(*ty);
        values.push(value);
    }

    Ok(BoundCall { types, values })
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use rp_reflect::info::Type;

    use super::{Placeholder, bind_call};
    use crate::args::Arguments;
    use crate::error::InvalidScriptReason;

    #[test]
    fn parse_placeholders() {
        assert_eq!(Placeholder::parse(" %12 ").map(Placeholder::number), Ok(12));
        assert_eq!(Placeholder::parse("%1").map(Placeholder::index), Ok(0));
        assert!(Placeholder::parse("%0").is_err());
        assert!(Placeholder::parse("1").is_err());
        assert!(Placeholder::parse("%99999999999999999999999").is_err());
        assert_eq!("%3".parse::<Placeholder>(), Ok(Placeholder::new(3).unwrap()));
    }

    #[test]
    fn binds_in_placeholder_order() {
        let args = Arguments::new().with(10_i32).with(String::from("y"));
        let params = [Placeholder::new(2).unwrap(), Placeholder::new(1).unwrap()];

        let bound = bind_call(&params, &args).unwrap();
        assert_eq!(bound.types, [Type::of::<String>(), Type::of::<i32>()]);
        assert_eq!(bound.values[0].downcast_ref::<String>().unwrap(), "y");
        assert_eq!(bound.values[1].downcast_ref::<i32>(), Some(&10));
    }

    #[test]
    fn repeated_placeholder_binds_twice() {
        let args = Arguments::new().with(7_u8);
        let one = Placeholder::new(1).unwrap();

        let bound = bind_call(&[one, one], &args).unwrap();
        assert_eq!(bound.values.len(), 2);
        assert_eq!(bound.values[1].downcast_ref::<u8>(), Some(&7));
    }

    #[test]
    fn out_of_range() {
        let args = Arguments::new().with(1_i32);
        let err = bind_call(&[Placeholder::new(2).unwrap()], &args).unwrap_err();
        assert_eq!(
            err,
            InvalidScriptReason::PlaceholderOutOfRange {
                placeholder: 2,
                available: 1
            }
        );
    }

    #[test]
    fn no_placeholders_no_arguments() {
        let bound = bind_call(&[], &Arguments::new()).unwrap();
        assert!(bound.types.is_empty());
        assert!(bound.values.is_empty());
    }
}
