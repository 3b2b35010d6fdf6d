use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;

use rp_reflect::Reflect;
use rp_reflect::info::{Type, TypePath};
use rp_reflect::registry::ClassRegistry;

use crate::access;
use crate::args::Arguments;
use crate::config::ScriptOptions;
use crate::error::ScriptError;
use crate::eval::Evaluator;
use crate::script::CompiledScript;

/// Entry point of script evaluation.
///
/// Holds the [`ScriptOptions`] and, for static entry, the [`ClassRegistry`]
/// class names are resolved against. Every entry family is a distinct method:
///
/// | Method | Arguments | Assignment |
/// |---|---|---|
/// | [`reflect`](Self::reflect) | none | no |
/// | [`reflect_with_args`](Self::reflect_with_args) | types inferred | no |
/// | [`reflect_assign`](Self::reflect_assign) | types inferred | yes |
/// | [`reflect_typed`](Self::reflect_typed) | types explicit | no |
/// | [`reflect_typed_assign`](Self::reflect_typed_assign) | types explicit | yes |
/// | [`resolve_static`](Self::resolve_static) | types inferred | no |
///
/// # Examples
///
/// ```
/// use rp_reflect::{Reflect, derive::{Reflect, reflect_methods}};
/// use rp_script::Reflector;
///
/// #[derive(Reflect)]
/// #[reflect(methods)]
/// struct Pet {
///     name: String,
/// }
///
/// #[reflect_methods]
/// impl Pet {
///     fn rename(&mut self, name: String) -> String {
///         core::mem::replace(&mut self.name, name)
///     }
/// }
///
/// let reflector = Reflector::new();
/// let mut pet = Pet { name: String::from("rex") };
///
/// let old = reflector
///     .reflect_with_args(&mut pet, "rename(%1)", vec![String::from("max").into_boxed_reflect()])
///     .unwrap();
/// assert_eq!(old.downcast_ref::<String>().unwrap(), "rex");
///
/// let len = reflector.reflect(&mut pet, "name.len()").unwrap();
/// assert_eq!(len.downcast_ref::<usize>(), Some(&3));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Reflector<'r> {
    registry: Option<&'r ClassRegistry>,
    options: ScriptOptions,
}

impl Reflector<'static> {
    /// Creates a reflector with default options and no registry.
    ///
    /// Without a registry, [`resolve_static`](Self::resolve_static) finds no class.
    #[inline]
    pub const fn new() -> Self {
        Self {
            registry: None,
            options: ScriptOptions::new(),
        }
    }
}

impl Default for Reflector<'static> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> Reflector<'r> {
    /// Creates a reflector resolving class names against `registry`.
    #[inline]
    pub const fn with_registry(registry: &'r ClassRegistry) -> Self {
        Self {
            registry: Some(registry),
            options: ScriptOptions::new(),
        }
    }

    #[inline]
    pub const fn with_options(mut self, options: ScriptOptions) -> Self {
        self.options = options;
        self
    }

    #[inline]
    pub const fn options(&self) -> &ScriptOptions {
        &self.options
    }

    fn compile<'s>(&self, class: &'static str, script: &'s str) -> Result<CompiledScript<'s>, ScriptError> {
        CompiledScript::parse(self.options.prepare(script)).map_err(|reason| {
            ScriptError::InvalidScript {
                class,
                script: script.to_string(),
                reason,
            }
        })
    }

    /// Evaluates a compiled script.
    ///
    /// The general form every `reflect*` method goes through. `terminal` is
    /// assigned to a terminal field when present.
    pub fn evaluate(
        &self,
        target: &mut dyn Reflect,
        script: &CompiledScript<'_>,
        args: &Arguments,
        terminal: Option<Box<dyn Reflect>>,
    ) -> Result<Box<dyn Reflect>, ScriptError> {
        Evaluator::new(script, args)
            .with_options(self.options)
            .evaluate(target, terminal)
    }

    fn run(
        &self,
        target: &mut dyn Reflect,
        script: &str,
        args: Arguments,
        terminal: Option<Box<dyn Reflect>>,
    ) -> Result<Box<dyn Reflect>, ScriptError> {
        let compiled = self.compile(target.reflect_type_path(), script)?;
        self.evaluate(target, &compiled, &args, terminal)
    }

    fn typed_args(
        target: &dyn Reflect,
        script: &str,
        values: Vec<Box<dyn Reflect>>,
        types: Vec<Type>,
    ) -> Result<Arguments, ScriptError> {
        Arguments::typed(values, types).map_err(|reason| ScriptError::InvalidScript {
            class: target.reflect_type_path(),
            script: script.to_string(),
            reason,
        })
    }

    /// Evaluates `script` on `target` without arguments.
    pub fn reflect(&self, target: &mut dyn Reflect, script: &str) -> Result<Box<dyn Reflect>, ScriptError> {
        self.run(target, script, Arguments::new(), None)
    }

    /// Evaluates `script` on `target`, binding placeholders to `values`.
    ///
    /// Each argument is declared as the runtime class of its value.
    pub fn reflect_with_args(
        &self,
        target: &mut dyn Reflect,
        script: &str,
        values: Vec<Box<dyn Reflect>>,
    ) -> Result<Box<dyn Reflect>, ScriptError> {
        self.run(target, script, Arguments::from_values(values), None)
    }

    /// Like [`reflect_with_args`](Self::reflect_with_args), and assigns
    /// `new_value` if the last segment is a field.
    ///
    /// Returns the value the terminal field held before the assignment.
    pub fn reflect_assign(
        &self,
        target: &mut dyn Reflect,
        script: &str,
        values: Vec<Box<dyn Reflect>>,
        new_value: Box<dyn Reflect>,
    ) -> Result<Box<dyn Reflect>, ScriptError> {
        self.run(target, script, Arguments::from_values(values), Some(new_value))
    }

    /// Evaluates `script` on `target` with explicitly typed arguments.
    ///
    /// `values` and `types` must have the same length.
    pub fn reflect_typed(
        &self,
        target: &mut dyn Reflect,
        script: &str,
        values: Vec<Box<dyn Reflect>>,
        types: Vec<Type>,
    ) -> Result<Box<dyn Reflect>, ScriptError> {
        let args = Self::typed_args(target, script, values, types)?;
        self.run(target, script, args, None)
    }

    /// The full form: explicitly typed arguments and a terminal assignment.
    pub fn reflect_typed_assign(
        &self,
        target: &mut dyn Reflect,
        script: &str,
        values: Vec<Box<dyn Reflect>>,
        types: Vec<Type>,
        new_value: Box<dyn Reflect>,
    ) -> Result<Box<dyn Reflect>, ScriptError> {
        let args = Self::typed_args(target, script, values, types)?;
        self.run(target, script, args, Some(new_value))
    }

    /// Evaluates `script` with no instance, starting from the class `class_name`.
    ///
    /// The class is looked up by full type path, then by unambiguous short
    /// name. No segment of `script` is skipped: its first segment must call a
    /// static method of that class.
    ///
    /// # Examples
    ///
    /// ```
    /// use rp_reflect::{Reflect, derive::{Reflect, reflect_methods}, registry::ClassRegistry};
    /// use rp_script::Reflector;
    ///
    /// #[derive(Reflect)]
    /// #[reflect(methods)]
    /// struct Config {
    ///     name: String,
    /// }
    ///
    /// #[reflect_methods]
    /// impl Config {
    ///     fn named(name: String) -> Config {
    ///         Config { name }
    ///     }
    /// }
    ///
    /// let mut registry = ClassRegistry::new();
    /// registry.register::<Config>();
    ///
    /// let reflector = Reflector::with_registry(&registry);
    /// let name = reflector
    ///     .resolve_static("Config", "named(%1).name", vec![String::from("dev").into_boxed_reflect()])
    ///     .unwrap();
    /// assert_eq!(name.downcast_ref::<String>().unwrap(), "dev");
    ///
    /// assert!(reflector.resolve_static("Missing", "named(%1)", vec![]).is_err());
    /// ```
    pub fn resolve_static(
        &self,
        class_name: &str,
        script: &str,
        values: Vec<Box<dyn Reflect>>,
    ) -> Result<Box<dyn Reflect>, ScriptError> {
        let class = self
            .registry
            .and_then(|registry| registry.resolve(class_name))
            .ok_or_else(|| ScriptError::ClassNotFound {
                class: class_name.to_string(),
                script: script.to_string(),
            })?;

        let compiled = self.compile(class.type_path(), script)?;
        let args = Arguments::from_values(values);
        Evaluator::new(&compiled, &args)
            .with_options(self.options)
            .evaluate_static(class)
    }

    /// See [`access::get`].
    #[inline]
    pub fn get<'a>(&self, target: &'a dyn Reflect, path: &str) -> Result<&'a dyn Reflect, ScriptError> {
        access::get(target, self.options.prepare(path))
    }

    /// See [`access::get_as`].
    #[inline]
    pub fn get_as<'a, T: Reflect + TypePath>(
        &self,
        target: &'a dyn Reflect,
        path: &str,
    ) -> Result<&'a T, ScriptError> {
        access::get_as(target, self.options.prepare(path))
    }

    /// See [`access::set`].
    #[inline]
    pub fn set(&self, target: &mut dyn Reflect, path: &str, value: Box<dyn Reflect>) -> Result<(), ScriptError> {
        access::set(target, self.options.prepare(path), value)
    }
}
