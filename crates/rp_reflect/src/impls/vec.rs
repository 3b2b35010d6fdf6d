use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::impls::{GenericClassInfoCell, GenericTypePathCell, clone_value, concat};
use crate::info::{ClassInfo, MethodInfo, ParamInfo, Receiver, TypePath, Typed};
use crate::ops::{Args, InvokeError, ReflectCloneError, receiver_mut, receiver_ref};
use crate::reflection::impl_reflect_cast_fn;
use crate::{FromReflect, Reflect};

impl<T: TypePath> TypePath for Vec<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self, _>(|| concat(&["alloc::vec::Vec<", T::type_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self, _>(|| concat(&["Vec<", T::type_name(), ">"]))
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Vec"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("alloc::vec")
    }
}

fn vec_methods<T: Reflect + Typed + FromReflect>() -> Vec<MethodInfo> {
    vec![
        MethodInfo::new("len", Receiver::Ref, Vec::new(), |receiver, args| {
            let _ = Args::new("len", args, 0)?;
            let this = receiver_ref::<Vec<T>>(receiver, "len")?;
            let value: Box<dyn Reflect> = Box::new(this.len());
            Ok(value)
        }),
        MethodInfo::new("is_empty", Receiver::Ref, Vec::new(), |receiver, args| {
            let _ = Args::new("is_empty", args, 0)?;
            let this = receiver_ref::<Vec<T>>(receiver, "is_empty")?;
            let value: Box<dyn Reflect> = Box::new(this.is_empty());
            Ok(value)
        }),
        MethodInfo::new(
            "get",
            Receiver::Ref,
            vec![ParamInfo::new::<usize>()],
            |receiver, args| {
                let mut args = Args::new("get", args, 1)?;
                let index = args.take::<usize>()?;
                let this = receiver_ref::<Vec<T>>(receiver, "get")?;
                let item = match this.get(index) {
                    Some(item) => Some(clone_value(item).map_err(InvokeError::raised)?),
                    None => None,
                };
                let value: Box<dyn Reflect> = Box::new(item);
                Ok(value)
            },
        ),
        MethodInfo::new(
            "push",
            Receiver::Mut,
            vec![ParamInfo::new::<T>()],
            |receiver, args| {
                let mut args = Args::new("push", args, 1)?;
                let item = args.take::<T>()?;
                receiver_mut::<Vec<T>>(receiver, "push")?.push(item);
                let value: Box<dyn Reflect> = Box::new(());
                Ok(value)
            },
        ),
    ]
}

impl<T: Reflect + Typed + FromReflect> Typed for Vec<T> {
    fn class_info() -> &'static ClassInfo {
        static CELL: GenericClassInfoCell = GenericClassInfoCell::new();
        CELL.get_or_insert::<Self, _>(|| ClassInfo::opaque::<Self>().with_methods(vec_methods::<T>()))
    }
}

impl<T: Reflect + Typed + FromReflect> Reflect for Vec<T> {
    impl_reflect_cast_fn!(Opaque);

    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        let items = self.iter().map(clone_value).collect::<Result<Vec<T>, _>>()?;
        Ok(Box::new(items))
    }

    fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
        let other = other.downcast_ref::<Self>()?;
        if self.len() != other.len() {
            return Some(false);
        }
        for (x, y) in self.iter().zip(other) {
            let result = x.reflect_partial_eq(y);
            if result != Some(true) {
                return result;
            }
        }
        Some(true)
    }

    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|item| item as &dyn Reflect))
            .finish()
    }
}

impl<T: Reflect + Typed + FromReflect> FromReflect for Vec<T> {}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec;

    use crate::Reflect;
    use crate::info::{Type, Typed};

    #[test]
    fn get_returns_a_copy() {
        let mut items = vec![String::from("a"), String::from("b")];
        let get = Vec::<String>::class_info()
            .method("get", &[Type::of::<usize>()])
            .unwrap();

        let found = get.invoke(Some(&mut items), vec![Box::new(1_usize)]).unwrap();
        assert_eq!(found.take::<Option<String>>().unwrap().as_deref(), Some("b"));

        let missing = get.invoke(Some(&mut items), vec![Box::new(9_usize)]).unwrap();
        assert_eq!(missing.take::<Option<String>>().unwrap(), None);
    }

    #[test]
    fn push_mutates_in_place() {
        let mut items = vec![1_i32];
        let push = Vec::<i32>::class_info()
            .method("push", &[Type::of::<i32>()])
            .unwrap();
        push.invoke(Some(&mut items), vec![Box::new(2_i32)]).unwrap();
        assert_eq!(items, [1, 2]);
        assert_eq!(format!("{:?}", &items as &dyn Reflect), "[1, 2]");
    }
}
