use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use rp_reflect::Reflect;
use rp_reflect::info::Type;

use crate::error::InvalidScriptReason;

/// The positional arguments of one evaluation.
///
/// Each value is paired with the type it is declared as. Unless given
/// explicitly, the declared type is the runtime class of the value.
/// Placeholders in any segment of a script may refer to any argument.
///
/// # Examples
///
/// ```
/// use rp_reflect::{Reflect, info::Type};
/// use rp_script::args::Arguments;
///
/// let args = Arguments::new().with(5_i32);
/// assert_eq!(args.ty(0), Some(&Type::of::<i32>()));
///
/// // Declared as `Option<i32>`, passed as `i32`.
/// let args = Arguments::typed(
///     vec![5_i32.into_boxed_reflect()],
///     vec![Type::of::<Option<i32>>()],
/// ).unwrap();
/// assert_eq!(args.ty(0), Some(&Type::of::<Option<i32>>()));
/// ```
#[derive(Default)]
pub struct Arguments {
    values: Vec<Box<dyn Reflect>>,
    types: Vec<Type>,
}

impl Arguments {
    /// Creates an empty argument vector.
    #[inline]
    pub const fn new() -> Self {
        Self {
            values: Vec::new(),
            types: Vec::new(),
        }
    }

    /// Creates arguments whose types are the runtime classes of the values.
    pub fn from_values(values: Vec<Box<dyn Reflect>>) -> Self {
        let types = values
            .iter()
            .map(|value| *value.reflect_class_info().ty())
            .collect();
        Self { values, types }
    }

    /// Creates arguments with explicitly declared types.
    ///
    /// Both vectors must have the same length.
    pub fn typed(values: Vec<Box<dyn Reflect>>, types: Vec<Type>) -> Result<Self, InvalidScriptReason> {
        if values.len() != types.len() {
            return Err(InvalidScriptReason::ArgumentTypes {
                values: values.len(),
                types: types.len(),
            });
        }
        Ok(Self { values, types })
    }

    /// Appends a value declared as its own type.
    pub fn with<T: Reflect>(mut self, value: T) -> Self {
        self.types.push(*value.reflect_class_info().ty());
        self.values.push(Box::new(value));
        self
    }

    /// Appends a value declared as `ty`.
    pub fn with_typed(mut self, value: Box<dyn Reflect>, ty: Type) -> Self {
        self.types.push(ty);
        self.values.push(value);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the value at the 0-based `index`.
    #[inline]
    pub fn value(&self, index: usize) -> Option<&dyn Reflect> {
        self.values.get(index).map(|value| &**value)
    }

    /// Returns the declared type at the 0-based `index`.
    #[inline]
    pub fn ty(&self, index: usize) -> Option<&Type> {
        self.types.get(index)
    }

    #[inline]
    pub fn types(&self) -> &[Type] {
        &self.types
    }
}

impl From<Vec<Box<dyn Reflect>>> for Arguments {
    #[inline]
    fn from(values: Vec<Box<dyn Reflect>>) -> Self {
        Self::from_values(values)
    }
}

impl fmt::Debug for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.values.iter().zip(&self.types))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;

    use rp_reflect::Reflect;
    use rp_reflect::info::Type;
    use rp_reflect::ops::Null;

    use super::Arguments;
    use crate::error::InvalidScriptReason;

    #[test]
    fn inferred_types() {
        let args = Arguments::from_values(vec![
            1_u64.into_boxed_reflect(),
            String::from("a").into_boxed_reflect(),
            Null.into_boxed_reflect(),
        ]);
        assert_eq!(
            args.types(),
            [Type::of::<u64>(), Type::of::<String>(), Type::of::<Null>()]
        );
        assert_eq!(args.value(1).and_then(|v| v.downcast_ref::<String>()).unwrap(), "a");
        assert!(args.value(3).is_none());
    }

    #[test]
    fn typed_length_mismatch() {
        let err = Arguments::typed(vec![1_i32.into_boxed_reflect()], vec![]).unwrap_err();
        assert_eq!(err, InvalidScriptReason::ArgumentTypes { values: 1, types: 0 });
    }
}
