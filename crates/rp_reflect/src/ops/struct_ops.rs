use crate::Reflect;

// -----------------------------------------------------------------------------
// Struct

/// A trait used to power struct-like operations via reflection.
///
/// Only *declared* fields are visible here. The field embedding the base
/// class (marked `#[reflect(extends)]`) is reached through
/// [`superclass`](Struct::superclass) instead.
///
/// # Examples
///
/// ```
/// use rp_reflect::{Reflect, derive::Reflect, ops::Struct};
///
/// #[derive(Reflect)]
/// struct Foo {
///     bar: u32,
/// }
///
/// let mut foo = Foo { bar: 1 };
/// assert_eq!(foo.field_len(), 1);
/// assert_eq!(foo.name_at(0), Some("bar"));
///
/// *foo.field_mut("bar").unwrap().downcast_mut::<u32>().unwrap() = 5;
/// assert_eq!(foo.bar, 5);
/// ```
pub trait Struct: Reflect {
    /// Returns a reference to the declared field named `name`.
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    /// Returns a mutable reference to the declared field named `name`.
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;

    /// Returns a reference to the declared field at `index`.
    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns a mutable reference to the declared field at `index`.
    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Returns the name of the declared field at `index`.
    fn name_at(&self, index: usize) -> Option<&str>;

    /// Returns the number of declared fields.
    fn field_len(&self) -> usize;

    /// Returns an iterator over the declared field values.
    fn iter_fields(&self) -> StructFieldIter<'_>;

    /// Returns the embedded base class value, if the class extends one.
    #[inline]
    fn superclass(&self) -> Option<&dyn Reflect> {
        None
    }

    /// Returns the embedded base class value mutably, if the class extends one.
    #[inline]
    fn superclass_mut(&mut self) -> Option<&mut dyn Reflect> {
        None
    }
}

impl dyn Struct {
    #[inline]
    pub fn field_as<T: Reflect>(&self, name: &str) -> Option<&T> {
        self.field(name).and_then(<dyn Reflect>::downcast_ref)
    }

    #[inline]
    pub fn field_mut_as<T: Reflect>(&mut self, name: &str) -> Option<&mut T> {
        self.field_mut(name).and_then(<dyn Reflect>::downcast_mut)
    }
}

// -----------------------------------------------------------------------------
// Struct Field Iterator

/// An iterator over the declared field values of a [`Struct`].
pub struct StructFieldIter<'a> {
    struct_val: &'a dyn Struct,
    index: usize,
}

impl<'a> StructFieldIter<'a> {
    #[inline(always)]
    pub const fn new(value: &'a dyn Struct) -> Self {
        StructFieldIter {
            struct_val: value,
            index: 0,
        }
    }
}

impl<'a> Iterator for StructFieldIter<'a> {
    type Item = &'a dyn Reflect;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.struct_val.field_at(self.index);
        self.index += value.is_some() as usize;
        value
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let hint = self.struct_val.field_len() - self.index;
        (hint, Some(hint))
    }
}

impl ExactSizeIterator for StructFieldIter<'_> {}
