use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use crate::Reflect;
use crate::impls::{impl_reflect_opaque, to_string_method};
use crate::info::{MethodInfo, ParamInfo, Receiver};
use crate::ops::{Args, receiver_ref};

macro_rules! string_getter {
    ($name:literal, |$this:ident| $body:expr) => {
        MethodInfo::new($name, Receiver::Ref, Vec::new(), |receiver, args| {
            let _ = Args::new($name, args, 0)?;
            let $this = receiver_ref::<String>(receiver, $name)?;
            let value: Box<dyn Reflect> = Box::new($body);
            Ok(value)
        })
    };
}

macro_rules! string_predicate {
    ($name:literal, |$this:ident, $pattern:ident| $body:expr) => {
        MethodInfo::new(
            $name,
            Receiver::Ref,
            vec![ParamInfo::new::<String>()],
            |receiver, args| {
                let mut args = Args::new($name, args, 1)?;
                let $pattern = args.take::<String>()?;
                let $this = receiver_ref::<String>(receiver, $name)?;
                let value: Box<dyn Reflect> = Box::new($body);
                Ok(value)
            },
        )
    };
}

fn string_methods() -> Vec<MethodInfo> {
    vec![
        string_getter!("len", |this| this.len()),
        string_getter!("is_empty", |this| this.is_empty()),
        to_string_method::<String>(),
        string_getter!("to_uppercase", |this| this.to_uppercase()),
        string_getter!("to_lowercase", |this| this.to_lowercase()),
        string_getter!("trim", |this| this.trim().to_string()),
        string_predicate!("contains", |this, pattern| this.contains(pattern.as_str())),
        string_predicate!("starts_with", |this, pattern| this
            .starts_with(pattern.as_str())),
    ]
}

impl_reflect_opaque!(String, "alloc::string::String", "String", string_methods());

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::Reflect;
    use crate::info::{Type, Typed};
    use crate::ops::InvokeError;

    fn call(value: &mut String, name: &str, args: Vec<Box<dyn Reflect>>) -> Box<dyn Reflect> {
        let types: Vec<Type> = args.iter().map(|arg| *arg.reflect_class_info().ty()).collect();
        String::class_info()
            .method(name, &types)
            .unwrap()
            .invoke(Some(value), args)
            .unwrap()
    }

    #[test]
    fn getters() {
        let mut value = String::from("  Hello ");
        assert_eq!(call(&mut value, "len", vec![]).take::<usize>().unwrap(), 8);
        assert_eq!(
            call(&mut value, "trim", vec![]).take::<String>().unwrap(),
            "Hello"
        );
        assert_eq!(
            call(&mut value, "to_uppercase", vec![]).take::<String>().unwrap(),
            "  HELLO "
        );
    }

    #[test]
    fn predicates_take_a_string() {
        let mut value = String::from("reflect");
        let found = call(&mut value, "contains", vec![Box::new(String::from("flec"))]);
        assert!(found.take::<bool>().unwrap());

        let method = String::class_info()
            .method("starts_with", &[Type::of::<String>()])
            .unwrap();
        let err = method
            .invoke(Some(&mut value), vec![Box::new(1_i32) as Box<dyn Reflect>])
            .unwrap_err();
        assert!(matches!(err, InvokeError::ArgumentType { index: 0, .. }));
    }
}
