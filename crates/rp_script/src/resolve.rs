//! Finding members along the class hierarchy.
//!
//! Lookups start at the runtime class of the current value and move up
//! through its base classes. The depth of the declaring class is returned
//! with the member, telling the evaluator how far to ascend through the
//! embedded base values before accessing it.

use rp_reflect::info::{ClassInfo, FieldInfo, MethodInfo, Type};

use crate::config::AncestorLookup;

/// A member together with the class declaring it.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<M> {
    /// The declaring class.
    pub owner: &'static ClassInfo,
    /// Number of base-class steps from the starting class to `owner`.
    pub depth: usize,
    pub member: M,
}

/// Finds the field `name` on `class` or its nearest base class declaring it.
///
/// # Examples
///
/// ```
/// use rp_reflect::{derive::Reflect, info::Typed};
/// use rp_script::resolve::resolve_field;
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
/// let found = resolve_field(Child::class_info(), "id").unwrap();
/// assert_eq!(found.depth, 1);
/// assert_eq!(found.owner.type_name(), "Base");
///
/// assert!(resolve_field(Child::class_info(), "base").is_none());
/// ```
pub fn resolve_field(class: &'static ClassInfo, name: &str) -> Option<Resolved<&'static FieldInfo>> {
    class
        .ancestors()
        .enumerate()
        .find_map(|(depth, owner)| {
            owner.field(name).map(|member| Resolved {
                owner,
                depth,
                member,
            })
        })
}

/// Finds the field `name` declared by `class` itself.
#[inline]
pub fn declared_field(class: &'static ClassInfo, name: &str) -> Option<&'static FieldInfo> {
    class.field(name)
}

/// Finds the method `name` callable with arguments of the given types.
///
/// See [`AncestorLookup`] for how base classes are searched.
pub fn resolve_method(
    class: &'static ClassInfo,
    name: &str,
    types: &[Type],
    lookup: AncestorLookup,
) -> Option<Resolved<&'static MethodInfo>> {
    match lookup {
        AncestorLookup::TypeAware => class.ancestors().enumerate().find_map(|(depth, owner)| {
            owner.method(name, types).map(|member| Resolved {
                owner,
                depth,
                member,
            })
        }),
        AncestorLookup::NameOnly => {
            if let Some(member) = class.method(name, types) {
                return Some(Resolved {
                    owner: class,
                    depth: 0,
                    member,
                });
            }

            let resolved = class
                .ancestors()
                .enumerate()
                .skip(1)
                .find_map(|(depth, owner)| {
                    owner.methods_named(name).next().map(|member| Resolved {
                        owner,
                        depth,
                        member,
                    })
                })?;

            if !resolved.member.matches(types) {
                log::warn!(
                    "`{}::{name}` was selected by name only and does not accept {types:?}",
                    resolved.owner.type_path(),
                );
            }
            Some(resolved)
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use rp_reflect::derive::{Reflect, reflect_methods};
    use rp_reflect::info::{Type, Typed};

    use super::{declared_field, resolve_field, resolve_method};
    use crate::config::AncestorLookup;

    #[derive(Reflect)]
    #[reflect(methods)]
    struct Shape {
        label: String,
    }

    #[reflect_methods]
    impl Shape {
        fn describe(&self, prefix: String) -> String {
            prefix + &self.label
        }
    }

    #[derive(Reflect)]
    #[reflect(methods)]
    struct Square {
        #[reflect(extends)]
        shape: Shape,
        side: u32,
    }

    #[reflect_methods]
    impl Square {
        fn describe(&self) -> String {
            String::from("square")
        }
    }

    #[derive(Reflect)]
    struct Tile {
        #[reflect(extends)]
        square: Square,
    }

    #[test]
    fn fields_walk_the_chain() {
        let found = resolve_field(Tile::class_info(), "label").unwrap();
        assert_eq!(found.depth, 2);
        assert!(found.owner.type_is::<Shape>());
        assert!(found.member.type_is::<String>());

        let found = resolve_field(Tile::class_info(), "side").unwrap();
        assert_eq!(found.depth, 1);

        assert!(resolve_field(Tile::class_info(), "missing").is_none());
    }

    #[test]
    fn declared_fields_do_not_walk() {
        assert!(declared_field(Square::class_info(), "side").is_some());
        assert!(declared_field(Square::class_info(), "label").is_none());
    }

    #[test]
    fn type_aware_overloads_on_ancestors() {
        let with_prefix = [Type::of::<String>()];

        let found =
            resolve_method(Tile::class_info(), "describe", &[], AncestorLookup::TypeAware).unwrap();
        assert_eq!(found.depth, 1);
        assert_eq!(found.member.param_len(), 0);

        let found = resolve_method(
            Tile::class_info(),
            "describe",
            &with_prefix,
            AncestorLookup::TypeAware,
        )
        .unwrap();
        assert_eq!(found.depth, 2);
        assert_eq!(found.member.param_len(), 1);
    }

    #[test]
    fn name_only_takes_nearest_ancestor() {
        let with_prefix = [Type::of::<String>()];

        // Nearest base declaring `describe` wins even though it takes no arguments.
        let found = resolve_method(
            Tile::class_info(),
            "describe",
            &with_prefix,
            AncestorLookup::NameOnly,
        )
        .unwrap();
        assert_eq!(found.depth, 1);
        assert_eq!(found.member.param_len(), 0);

        // The starting class itself still matches by types.
        let found = resolve_method(
            Square::class_info(),
            "describe",
            &[],
            AncestorLookup::NameOnly,
        )
        .unwrap();
        assert_eq!(found.depth, 0);
    }

    #[test]
    fn names_from_parsed_scripts() {
        let resolved = {
            let script = String::from("describe(%1)");
            let name = &script[..script.len() - 4];
            resolve_method(Tile::class_info(), name, &[], AncestorLookup::NameOnly)
        };
        let found = resolved.unwrap();
        assert_eq!(found.member.name(), "describe");
        assert!(found.owner.type_is::<Square>());
    }

    #[test]
    fn unknown_method() {
        assert!(
            resolve_method(Square::class_info(), "area", &[], AncestorLookup::TypeAware).is_none()
        );
    }
}
