use alloc::string::String;
use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;

use crate::hash::{HashMap, HashSet};
use crate::info::{ClassInfo, Typed};
use crate::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

// -----------------------------------------------------------------------------
// ClassRegistry

/// A registry of reflected classes.
///
/// Resolves a class by [`TypeId`], by full type path, or by short type name.
/// Short names shared by two or more classes are ambiguous and never resolve.
///
/// Registering a class also registers the classes it depends on: its base
/// class chain, its field types and its method parameter types.
///
/// # Examples
///
/// ```
/// use rp_reflect::{derive::Reflect, registry::ClassRegistry};
///
/// #[derive(Reflect)]
/// #[reflect(type_path = "demo::Point")]
/// struct Point {
///     x: f32,
///     y: f32,
/// }
///
/// let mut registry = ClassRegistry::new();
/// registry.register::<Point>();
///
/// assert!(registry.get_with_type_path("demo::Point").is_some());
/// assert!(registry.get_with_type_name("Point").is_some());
/// assert!(registry.resolve("f32").is_some());
/// ```
pub struct ClassRegistry {
    classes: HashMap<TypeId, &'static ClassInfo>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
}

impl Default for ClassRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ClassRegistry {
    /// Creates a registry without any class.
    pub fn empty() -> Self {
        Self {
            classes: HashMap::default(),
            type_path_to_id: HashMap::default(),
            type_name_to_id: HashMap::default(),
            ambiguous_names: HashSet::default(),
        }
    }

    /// Creates a registry with the built-in classes.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<()>();
        registry.register::<bool>();
        registry.register::<char>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<u128>();
        registry.register::<usize>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<i128>();
        registry.register::<isize>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<String>();
        registry.register::<crate::ops::Null>();
        registry
    }

    // # Validity
    // The class must **not** already exist.
    fn add_new_class_indices(&mut self, info: &'static ClassInfo) {
        let ty = info.ty();
        let type_name = ty.name();

        if !self.ambiguous_names.contains(type_name) {
            if self.type_name_to_id.contains_key(type_name) {
                self.type_name_to_id.remove(type_name);
                self.ambiguous_names.insert(type_name);
            } else {
                self.type_name_to_id.insert(type_name, ty.id());
            }
        }

        // For a new class, assuming that the full path cannot be duplicated.
        self.type_path_to_id.insert(ty.path(), ty.id());
    }

    /// Registers `T` and the classes it depends on.
    #[inline]
    pub fn register<T: Typed>(&mut self) {
        self.register_info(T::class_info());
    }

    /// Registers a class and the classes it depends on.
    ///
    /// Returns `false` if the class was already registered.
    pub fn register_info(&mut self, info: &'static ClassInfo) -> bool {
        if self.classes.contains_key(&info.ty_id()) {
            return false;
        }
        self.classes.insert(info.ty_id(), info);
        self.add_new_class_indices(info);

        if let Some(superclass) = info.superclass() {
            self.register_info(superclass.class_info());
        }
        for field in info.fields() {
            self.register_info(field.class_info());
        }
        for method in info.methods() {
            for param in method.params() {
                self.register_info(param.class_info());
            }
        }
        if let Some(inner) = info.nullable_inner() {
            self.register_info(inner);
        }
        true
    }

    /// Registers every class marked `#[reflect(auto_register)]`.
    ///
    /// Returns the number of newly registered classes, dependencies included.
    /// Always `0` without the `auto_register` feature.
    pub fn auto_register(&mut self) -> usize {
        #[cfg(feature = "auto_register")]
        {
            use crate::__macro_exports::auto_register::AutoRegisterClass;

            let before = self.classes.len();
            for class in inventory::iter::<AutoRegisterClass> {
                self.register_info((class.0)());
            }
            self.classes.len() - before
        }
        #[cfg(not(feature = "auto_register"))]
        {
            0
        }
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.classes.contains_key(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&'static ClassInfo> {
        self.classes.get(&type_id).copied()
    }

    /// Returns the class with the full type path `type_path`.
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&'static ClassInfo> {
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns the class with the short type name `type_name`, unless ambiguous.
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&'static ClassInfo> {
        match self.type_name_to_id.get(type_name) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns the class named `name`, trying the full type path first.
    pub fn resolve(&self, name: &str) -> Option<&'static ClassInfo> {
        self.get_with_type_path(name)
            .or_else(|| self.get_with_type_name(name))
    }

    #[inline]
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'static ClassInfo> + '_ {
        self.classes.values().copied()
    }
}

impl fmt::Debug for ClassRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.type_path_to_id.keys()).finish()
    }
}

// -----------------------------------------------------------------------------
// ClassRegistryArc

/// A shareable [`ClassRegistry`].
#[derive(Clone, Default)]
pub struct ClassRegistryArc {
    pub internal: Arc<RwLock<ClassRegistry>>,
}

impl ClassRegistryArc {
    pub fn read(&self) -> RwLockReadGuard<'_, ClassRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, ClassRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for ClassRegistryArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.read().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::any::TypeId;

    use super::{ClassRegistry, ClassRegistryArc};
    use crate::derive::Reflect;

    mod a {
        #[derive(crate::derive::Reflect)]
        pub struct Item {
            pub id: u32,
        }
    }

    mod b {
        #[derive(crate::derive::Reflect)]
        pub struct Item {
            pub label: alloc::string::String,
        }
    }

    #[derive(Reflect)]
    struct Base {
        tags: Vec<String>,
    }

    #[derive(Reflect)]
    struct Holder {
        #[reflect(extends)]
        base: Base,
        first: Option<a::Item>,
    }

    #[test]
    fn builtins_are_registered() {
        let registry = ClassRegistry::new();
        assert!(registry.contains(TypeId::of::<i64>()));
        assert!(registry.resolve("alloc::string::String").is_some());
        assert!(registry.resolve("String").is_some());
        assert!(ClassRegistry::empty().is_empty());
    }

    #[test]
    fn dependencies_follow_the_class() {
        let mut registry = ClassRegistry::empty();
        registry.register::<Holder>();

        assert!(registry.contains(TypeId::of::<Base>()));
        assert!(registry.contains(TypeId::of::<Vec<String>>()));
        assert!(registry.contains(TypeId::of::<Option<a::Item>>()));
        assert!(registry.contains(TypeId::of::<a::Item>()));
        // `Vec::get` takes a `usize`.
        assert!(registry.contains(TypeId::of::<usize>()));
    }

    #[test]
    fn ambiguous_short_names() {
        let mut registry = ClassRegistry::new();
        registry.register::<a::Item>();
        registry.register::<b::Item>();

        assert!(registry.is_ambiguous("Item"));
        assert!(registry.get_with_type_name("Item").is_none());
        assert!(registry.resolve("Item").is_none());

        let path = <a::Item as crate::info::TypePath>::type_path();
        assert_eq!(registry.resolve(path).map(|c| c.ty_id()), Some(TypeId::of::<a::Item>()));
    }

    #[test]
    fn shared_registry() {
        let shared = ClassRegistryArc::default();
        shared.write().register::<Holder>();
        assert!(shared.read().contains(TypeId::of::<Holder>()));
    }
}
