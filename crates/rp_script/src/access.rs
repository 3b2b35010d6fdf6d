//! Field-only accessors.
//!
//! [`get`] and [`set`] follow a dotted path of field names. Unlike full
//! script evaluation, they never call methods and only see the fields
//! declared by the class of each value, not the ones of its base classes.
//! A path segment such as `len()` is looked up as a literal field name.

use alloc::boxed::Box;
use alloc::string::ToString;

use rp_reflect::Reflect;
use rp_reflect::info::{ClassInfo, TypePath};

use crate::error::{InvalidScriptReason, ScriptError};
use crate::eval::{present, present_mut};
use crate::resolve::declared_field;

// -----------------------------------------------------------------------------
// Errors

#[cold]
fn member_not_found(class: &'static ClassInfo, member: &str, script: &str) -> ScriptError {
    ScriptError::MemberNotFound {
        class: class.type_path(),
        member: member.to_string(),
        script: script.to_string(),
    }
}

#[cold]
fn null_target(class: &'static ClassInfo, script: &str) -> ScriptError {
    ScriptError::NullTarget {
        class: class.type_path(),
        script: script.to_string(),
    }
}

fn reject_dotted(target: &dyn Reflect, name: &str) -> Result<(), ScriptError> {
    if name.contains('.') {
        return Err(ScriptError::InvalidScript {
            class: target.reflect_type_path(),
            script: name.to_string(),
            reason: InvalidScriptReason::DottedFieldName {
                name: name.to_string(),
            },
        });
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// Single field

fn read_declared<'a>(
    value: &'a dyn Reflect,
    name: &str,
    script: &str,
) -> Result<&'a dyn Reflect, ScriptError> {
    let value = present(value).map_err(|class| null_target(class, script))?;
    let class = value.reflect_class_info();

    declared_field(class, name)
        .and_then(|_| value.reflect_ref().as_struct())
        .and_then(|value| value.field(name))
        .ok_or_else(|| member_not_found(class, name, script))
}

fn read_declared_mut<'a>(
    value: &'a mut dyn Reflect,
    name: &str,
    script: &str,
) -> Result<&'a mut dyn Reflect, ScriptError> {
    let value = present_mut(value).map_err(|class| null_target(class, script))?;
    let class = value.reflect_class_info();

    if declared_field(class, name).is_none() {
        return Err(member_not_found(class, name, script));
    }
    value
        .reflect_mut()
        .as_struct()
        .and_then(|value| value.field_mut(name))
        .ok_or_else(|| member_not_found(class, name, script))
}

fn write_declared(
    target: &mut dyn Reflect,
    name: &str,
    value: Box<dyn Reflect>,
    script: &str,
) -> Result<(), ScriptError> {
    let target = present_mut(target).map_err(|class| null_target(class, script))?;
    let class = target.reflect_class_info();
    let field = read_declared_mut(target, name, script)?;
    let expected = field.reflect_type_path();

    field.set(value).map_err(|value| ScriptError::TypeMismatch {
        class: class.type_path(),
        member: name.to_string(),
        expected,
        found: value.reflect_type_path(),
        script: script.to_string(),
    })
}

/// Reads the field `name` declared by the class of `target`.
///
/// `name` must be a single field name; dotted names are rejected with
/// [`ScriptError::InvalidScript`] rather than followed.
pub fn get_field<'a>(target: &'a dyn Reflect, name: &str) -> Result<&'a dyn Reflect, ScriptError> {
    reject_dotted(target, name)?;
    read_declared(target, name, name)
}

/// Overwrites the field `name` declared by the class of `target`.
///
/// See [`get_field`] for the accepted names.
pub fn set_field(target: &mut dyn Reflect, name: &str, value: Box<dyn Reflect>) -> Result<(), ScriptError> {
    reject_dotted(target, name)?;
    write_declared(target, name, value, name)
}

// -----------------------------------------------------------------------------
// Paths

/// Reads the value at a dotted field path.
///
/// # Examples
///
/// ```
/// use rp_reflect::derive::Reflect;
/// use rp_script::access;
///
/// #[derive(Reflect)]
/// struct Engine {
///     power: u32,
/// }
///
/// #[derive(Reflect)]
/// struct Car {
///     engine: Engine,
/// }
///
/// let car = Car { engine: Engine { power: 90 } };
/// let power = access::get(&car, "engine.power").unwrap();
/// assert_eq!(power.downcast_ref::<u32>(), Some(&90));
/// ```
pub fn get<'a>(target: &'a dyn Reflect, path: &str) -> Result<&'a dyn Reflect, ScriptError> {
    let mut current = target;
    for name in path.split('.') {
        current = read_declared(current, name, path)?;
    }
    Ok(current)
}

/// Reads the value at a dotted field path as a `T`.
pub fn get_as<'a, T: Reflect + TypePath>(target: &'a dyn Reflect, path: &str) -> Result<&'a T, ScriptError> {
    let value = get(target, path)?;
    value
        .downcast_ref::<T>()
        .ok_or_else(|| ScriptError::TypeMismatch {
            class: target.reflect_type_path(),
            member: path.to_string(),
            expected: T::type_path(),
            found: value.reflect_type_path(),
            script: path.to_string(),
        })
}

/// Overwrites the field at a dotted field path.
///
/// # Examples
///
/// ```
/// use rp_reflect::{Reflect, derive::Reflect};
/// use rp_script::access;
///
/// #[derive(Reflect)]
/// struct Engine {
///     power: u32,
/// }
///
/// #[derive(Reflect)]
/// struct Car {
///     engine: Engine,
/// }
///
/// let mut car = Car { engine: Engine { power: 90 } };
/// access::set(&mut car, "engine.power", 120_u32.into_boxed_reflect()).unwrap();
/// assert_eq!(car.engine.power, 120);
///
/// // Wrong type, nothing is written.
/// assert!(access::set(&mut car, "engine.power", 1_i64.into_boxed_reflect()).is_err());
/// assert_eq!(car.engine.power, 120);
/// ```
pub fn set(target: &mut dyn Reflect, path: &str, value: Box<dyn Reflect>) -> Result<(), ScriptError> {
    let (parents, last) = match path.rsplit_once('.') {
        Some((parents, last)) => (Some(parents), last),
        None => (None, path),
    };

    let mut current = target;
    if let Some(parents) = parents {
        for name in parents.split('.') {
            current = read_declared_mut(current, name, path)?;
        }
    }
    write_declared(current, last, value, path)
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use rp_reflect::Reflect;
    use rp_reflect::derive::Reflect;
    use rp_reflect::ops::Null;

    use super::{get, get_as, get_field, set, set_field};
    use crate::error::{InvalidScriptReason, ScriptError};

    #[derive(Reflect)]
    struct Account {
        id: u64,
    }

    #[derive(Reflect)]
    struct User {
        #[reflect(extends)]
        account: Account,
        name: String,
        manager: Option<Manager>,
    }

    #[derive(Reflect)]
    struct Manager {
        level: u8,
    }

    fn user() -> User {
        User {
            account: Account { id: 7 },
            name: String::from("ada"),
            manager: Some(Manager { level: 3 }),
        }
    }

    #[test]
    fn private_fields_are_reachable() {
        let user = user();
        assert_eq!(get_as::<String>(&user, "name").unwrap(), "ada");
        assert_eq!(*get_as::<u8>(&user, "manager.level").unwrap(), 3);
    }

    #[test]
    fn set_then_get() {
        let mut user = user();
        set(&mut user, "manager.level", 9_u8.into_boxed_reflect()).unwrap();
        assert_eq!(*get_as::<u8>(&user, "manager.level").unwrap(), 9);

        set_field(&mut user, "name", String::from("grace").into_boxed_reflect()).unwrap();
        assert_eq!(user.name, "grace");
    }

    #[test]
    fn base_fields_are_not_declared() {
        let user = user();
        let err = get(&user, "id").unwrap_err();
        assert!(matches!(err, ScriptError::MemberNotFound { ref member, .. } if member == "id"));

        // The embedding field is not a declared field either.
        assert!(get(&user, "account").is_err());
    }

    #[test]
    fn calls_are_literal_names() {
        let user = user();
        assert!(matches!(
            get(&user, "name.len()"),
            Err(ScriptError::MemberNotFound { .. })
        ));
    }

    #[test]
    fn dotted_single_field() {
        let user = user();
        let err = get_field(&user, "manager.level").unwrap_err();
        assert!(matches!(
            err,
            ScriptError::InvalidScript {
                reason: InvalidScriptReason::DottedFieldName { .. },
                ..
            }
        ));
    }

    #[test]
    fn null_hop() {
        let mut user = user();
        set(&mut user, "manager", Null.into_boxed_reflect()).unwrap();
        assert!(user.manager.is_none());

        assert!(matches!(
            get(&user, "manager.level"),
            Err(ScriptError::NullTarget { .. })
        ));
        assert!(get(&user, "manager").is_ok());
    }

    #[test]
    fn type_mismatch_keeps_value() {
        let mut user = user();
        let err = set(&mut user, "name", 1_i32.into_boxed_reflect()).unwrap_err();
        assert!(matches!(err, ScriptError::TypeMismatch { found: "i32", .. }));
        assert_eq!(user.name, "ada");

        assert!(matches!(
            get_as::<u32>(&user, "name"),
            Err(ScriptError::TypeMismatch { .. })
        ));
    }
}
