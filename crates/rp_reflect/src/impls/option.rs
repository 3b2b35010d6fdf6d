use alloc::boxed::Box;

use crate::impls::{GenericClassInfoCell, GenericTypePathCell, clone_value, concat};
use crate::info::{ClassInfo, TypePath, Typed};
use crate::ops::{Null, Nullable, ReflectCloneError};
use crate::reflection::impl_reflect_cast_fn;
use crate::{FromReflect, Reflect};

impl<T: TypePath> TypePath for Option<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self, _>(|| concat(&["core::option::Option<", T::type_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self, _>(|| concat(&["Option<", T::type_name(), ">"]))
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Option"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("core::option")
    }
}

impl<T: Reflect + Typed + FromReflect> Typed for Option<T> {
    fn class_info() -> &'static ClassInfo {
        static CELL: GenericClassInfoCell = GenericClassInfoCell::new();
        CELL.get_or_insert::<Self, _>(ClassInfo::nullable::<Self, T>)
    }
}

impl<T: Reflect + Typed + FromReflect> Reflect for Option<T> {
    impl_reflect_cast_fn!(Nullable);

    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        let value = match self {
            Some(value) => Some(clone_value(value)?),
            None => None,
        };
        Ok(Box::new(value))
    }

    fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
        let other = other.downcast_ref::<Self>()?;
        match (self, other) {
            (Some(x), Some(y)) => x.reflect_partial_eq(y),
            (None, None) => Some(true),
            _ => Some(false),
        }
    }
}

impl<T: Reflect + Typed + FromReflect> Nullable for Option<T> {
    #[inline]
    fn value(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|value| value as &dyn Reflect)
    }

    #[inline]
    fn value_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(|value| value as &mut dyn Reflect)
    }

    #[inline]
    fn inner_class_info(&self) -> &'static ClassInfo {
        T::class_info()
    }
}

impl<T: Reflect + Typed + FromReflect> FromReflect for Option<T> {
    fn from_reflect(reflect: &dyn Reflect) -> Option<Self> {
        if reflect.is::<Null>() {
            return Some(None);
        }
        if let Some(value) = reflect.downcast_ref::<Self>() {
            return match value {
                Some(value) => clone_value(value).ok().map(Some),
                None => Some(None),
            };
        }
        T::from_reflect(reflect).map(Some)
    }

    fn take_from_reflect(reflect: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>> {
        if reflect.is::<Null>() {
            return Ok(None);
        }
        match reflect.take::<Self>() {
            Ok(value) => Ok(value),
            Err(reflect) => T::take_from_reflect(reflect).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;

    use crate::Reflect;
    use crate::info::{ReflectKind, TypePath};
    use crate::ops::{Null, ReflectMut};

    #[test]
    fn type_paths_nest() {
        assert_eq!(
            Option::<String>::type_path(),
            "core::option::Option<alloc::string::String>"
        );
        assert_eq!(Option::<Option<u8>>::type_name(), "Option<Option<u8>>");
    }

    #[test]
    fn set_accepts_inner_and_null() {
        let mut value: Option<i32> = None;
        assert_eq!(value.reflect_kind(), ReflectKind::Nullable);

        Reflect::set(&mut value, Box::new(3_i32)).unwrap();
        assert_eq!(value, Some(3));

        let previous = Reflect::replace(&mut value, Box::new(Null)).unwrap();
        assert_eq!(previous.take::<Option<i32>>().unwrap(), Some(3));
        assert_eq!(value, None);

        assert!(Reflect::set(&mut value, Box::new(3_u32)).is_err());
    }

    #[test]
    fn nullable_view() {
        let mut value = Some(String::from("x"));
        let ReflectMut::Nullable(nullable) = value.reflect_mut() else {
            panic!("expected a nullable view");
        };
        assert!(!nullable.is_null());
        nullable
            .value_mut()
            .unwrap()
            .downcast_mut::<String>()
            .unwrap()
            .push('y');
        assert_eq!(value.as_deref(), Some("xy"));
    }
}
