use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::hash::HashMap;
use crate::info::{FieldInfo, MethodInfo, SuperClass, Type, TypePath, Typed, impl_type_fn};

// -----------------------------------------------------------------------------
// ReflectKind

/// The shape of a reflected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    /// A struct with named fields, see [`Struct`](crate::ops::Struct).
    Struct,
    /// A value that may be null, see [`Nullable`](crate::ops::Nullable).
    Nullable,
    /// A value without reflected fields; only its methods are visible.
    Opaque,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReflectKind::Struct => f.pad("Struct"),
            ReflectKind::Nullable => f.pad("Nullable"),
            ReflectKind::Opaque => f.pad("Opaque"),
        }
    }
}

// -----------------------------------------------------------------------------
// ClassInfo

/// Compile-time information of a reflected class.
///
/// A class declares fields and methods of its own and optionally extends a
/// [`SuperClass`]. Lookups on `ClassInfo` only see *declared* members; walking
/// the hierarchy is done through [`ancestors`](ClassInfo::ancestors).
///
/// # Examples
///
/// ```
/// use rp_reflect::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect)]
/// struct Base {
///     id: u32,
/// }
///
/// #[derive(Reflect)]
/// struct Child {
///     #[reflect(extends)]
///     base: Base,
///     name: String,
/// }
///
/// let info = Child::class_info();
/// assert!(info.field("name").is_some());
/// assert!(info.field("id").is_none());
///
/// let names: Vec<_> = info.ancestors().map(|class| class.type_name()).collect();
/// assert_eq!(names, ["Child", "Base"]);
/// ```
pub struct ClassInfo {
    ty: Type,
    kind: ReflectKind,
    superclass: Option<SuperClass>,
    fields: Box<[FieldInfo]>,
    field_names: Box<[&'static str]>,
    field_indices: HashMap<&'static str, usize>,
    methods: Box<[MethodInfo]>,
    nullable_inner: Option<fn() -> &'static ClassInfo>,
}

impl ClassInfo {
    impl_type_fn!(ty);

    fn new<T: TypePath + ?Sized>(kind: ReflectKind) -> Self {
        Self {
            ty: Type::of::<T>(),
            kind,
            superclass: None,
            fields: Box::new([]),
            field_names: Box::new([]),
            field_indices: HashMap::default(),
            methods: Box::new([]),
            nullable_inner: None,
        }
    }

    /// Creates the class of an opaque type.
    pub fn opaque<T: TypePath + ?Sized>() -> Self {
        Self::new::<T>(ReflectKind::Opaque)
    }

    /// Creates the class of a struct with the given declared fields.
    pub fn structure<T: TypePath + ?Sized>(fields: Vec<FieldInfo>) -> Self {
        let field_indices = fields
            .iter()
            .enumerate()
            .map(|(index, field)| (field.name(), index))
            .collect();
        let field_names = fields.iter().map(FieldInfo::name).collect();

        Self {
            fields: fields.into_boxed_slice(),
            field_names,
            field_indices,
            ..Self::new::<T>(ReflectKind::Struct)
        }
    }

    /// Creates the class of a nullable type whose present value is an `I`.
    pub fn nullable<T: TypePath + ?Sized, I: Typed>() -> Self {
        Self {
            nullable_inner: Some(I::class_info),
            ..Self::new::<T>(ReflectKind::Nullable)
        }
    }

    /// Sets the base class.
    pub fn with_superclass(self, superclass: SuperClass) -> Self {
        Self {
            superclass: Some(superclass),
            ..self
        }
    }

    /// Sets the declared methods.
    pub fn with_methods(self, methods: Vec<MethodInfo>) -> Self {
        Self {
            methods: methods.into_boxed_slice(),
            ..self
        }
    }

    /// Returns the [`ReflectKind`] of the class.
    #[inline]
    pub const fn kind(&self) -> ReflectKind {
        self.kind
    }

    // --- fields ---

    /// Returns the declared field named `name`.
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.field_indices.get(name).map(|&index| &self.fields[index])
    }

    /// Returns the declared field at `index`.
    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&FieldInfo> {
        self.fields.get(index)
    }

    /// Returns the index of the declared field named `name`.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.field_indices.get(name).copied()
    }

    /// Returns the declared fields in declaration order.
    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// Returns the declared field names in declaration order.
    #[inline]
    pub fn field_names(&self) -> &[&'static str] {
        &self.field_names
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    // --- methods ---

    /// Returns the declared methods in declaration order.
    #[inline]
    pub fn methods(&self) -> &[MethodInfo] {
        &self.methods
    }

    /// Returns every declared method named `name`.
    pub fn methods_named<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a MethodInfo> + use<'a, 'n> {
        self.methods.iter().filter(move |method| method.name() == name)
    }

    /// Returns the first declared method named `name` that accepts
    /// arguments of the given types.
    pub fn method(&self, name: &str, params: &[Type]) -> Option<&MethodInfo> {
        self.methods_named(name).find(|method| method.matches(params))
    }

    // --- hierarchy ---

    /// Returns the base class, if any.
    #[inline]
    pub fn superclass(&self) -> Option<&SuperClass> {
        self.superclass.as_ref()
    }

    /// Iterates this class followed by its base classes, nearest first.
    #[inline]
    pub fn ancestors(&'static self) -> Ancestors {
        Ancestors { next: Some(self) }
    }

    /// Returns the class of the present value if this class is nullable.
    #[inline]
    pub fn nullable_inner(&self) -> Option<&'static ClassInfo> {
        self.nullable_inner.map(|f| f())
    }
}

impl fmt::Debug for ClassInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassInfo")
            .field("ty", &self.ty)
            .field("kind", &self.kind)
            .field("superclass", &self.superclass.as_ref().map(|s| s.ty()))
            .field("fields", &self.field_names)
            .field("methods", &self.methods)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Ancestors

/// Iterator returned by [`ClassInfo::ancestors`].
#[derive(Clone)]
pub struct Ancestors {
    next: Option<&'static ClassInfo>,
}

impl Iterator for Ancestors {
    type Item = &'static ClassInfo;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.superclass().map(SuperClass::class_info);
        Some(current)
    }
}

impl core::iter::FusedIterator for Ancestors {}
