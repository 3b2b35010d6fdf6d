//! The chain evaluator.
//!
//! A script is evaluated segment by segment against a current value:
//!
//! - a field segment reads the field and continues on it,
//! - a call segment invokes the method and continues on its result.
//!
//! Evaluation of the last segment yields the result. A terminal field is
//! cloned out, or replaced when a terminal value is supplied, in which case
//! the previous value is returned. A terminal call returns what the method
//! returned and never assigns. A call result is an owned value detached
//! from the graph, so assigning to a field reached through a call fails
//! with [`ScriptError::DetachedAssignment`] before anything is evaluated.
//!
//! Evaluation is not transactional. If a segment mutates the object graph
//! and a later segment fails, the mutation stands.

use alloc::boxed::Box;
use alloc::string::{String, ToString};

use rp_reflect::Reflect;
use rp_reflect::info::{ClassInfo, ReflectKind};
use rp_reflect::ops::{InvokeError, ReflectCloneError, ReflectMut};

use crate::args::Arguments;
use crate::bind::{Placeholder, bind_call};
use crate::config::ScriptOptions;
use crate::error::{InvalidScriptReason, ScriptError};
use crate::resolve::{resolve_field, resolve_method};
use crate::script::{CompiledScript, OffsetSegment, Segment};

// -----------------------------------------------------------------------------
// Value helpers

/// Sees through nullable values, returning the class of the null one on failure.
pub(crate) fn present(mut value: &dyn Reflect) -> Result<&dyn Reflect, &'static ClassInfo> {
    while let Some(nullable) = value.reflect_ref().as_nullable() {
        value = nullable.value().ok_or_else(|| value.reflect_class_info())?;
    }
    Ok(value)
}

/// Mutable version of [`present`].
pub(crate) fn present_mut(mut value: &mut dyn Reflect) -> Result<&mut dyn Reflect, &'static ClassInfo> {
    while value.reflect_kind() == ReflectKind::Nullable {
        let class = value.reflect_class_info();
        value = match value.reflect_mut() {
            ReflectMut::Nullable(nullable) => nullable.value_mut().ok_or(class)?,
            _ => return Err(class),
        };
    }
    Ok(value)
}

/// Moves `depth` steps up through the embedded base-class values.
fn ascend_mut(mut value: &mut dyn Reflect, depth: usize) -> Option<&mut dyn Reflect> {
    for _ in 0..depth {
        value = value.reflect_mut().as_struct()?.superclass_mut()?;
    }
    Some(value)
}

// -----------------------------------------------------------------------------
// Evaluator

/// Evaluates one compiled script with one set of arguments.
///
/// # Examples
///
/// ```
/// use rp_reflect::{Reflect, derive::Reflect};
/// use rp_script::{args::Arguments, eval::Evaluator, script::CompiledScript};
///
/// #[derive(Reflect)]
/// struct Counter {
///     count: i32,
/// }
///
/// let mut counter = Counter { count: 5 };
/// let script = CompiledScript::parse("count").unwrap();
/// let args = Arguments::new();
/// let evaluator = Evaluator::new(&script, &args);
///
/// let old = evaluator.evaluate(&mut counter, Some(9_i32.into_boxed_reflect())).unwrap();
/// assert_eq!(old.downcast_ref::<i32>(), Some(&5));
/// assert_eq!(counter.count, 9);
///
/// let now = evaluator.evaluate(&mut counter, None).unwrap();
/// assert_eq!(now.downcast_ref::<i32>(), Some(&9));
/// ```
pub struct Evaluator<'e> {
    script: &'e CompiledScript<'e>,
    args: &'e Arguments,
    options: ScriptOptions,
}

impl<'e> Evaluator<'e> {
    #[inline]
    pub fn new(script: &'e CompiledScript<'e>, args: &'e Arguments) -> Self {
        Self {
            script,
            args,
            options: ScriptOptions::new(),
        }
    }

    #[inline]
    pub fn with_options(mut self, options: ScriptOptions) -> Self {
        self.options = options;
        self
    }

    /// Evaluates the script on `target`.
    ///
    /// With `Some(value)`, a terminal field is overwritten by `value` and its
    /// previous value is returned. Assigning [`Null`](rp_reflect::ops::Null)
    /// to an `Option` field stores `None`.
    pub fn evaluate(
        &self,
        target: &mut dyn Reflect,
        terminal: Option<Box<dyn Reflect>>,
    ) -> Result<Box<dyn Reflect>, ScriptError> {
        log::debug!(
            "evaluate `{}` on `{}` with {} argument(s){}",
            self.script.source(),
            target.reflect_type_path(),
            self.args.len(),
            if terminal.is_some() { ", assigning" } else { "" },
        );
        if terminal.is_some() {
            self.check_attached(target.reflect_class_info())?;
        }
        self.step(target, self.script.segments(), terminal)
    }

    /// Evaluates the script with no instance, starting from `class`.
    ///
    /// The first segment resolves on `class` and must be a static method;
    /// fields and instance methods fail with [`InvokeError::MissingReceiver`].
    /// The remaining segments evaluate on the returned value.
    pub fn evaluate_static(&self, class: &'static ClassInfo) -> Result<Box<dyn Reflect>, ScriptError> {
        log::debug!(
            "evaluate `{}` statically on `{}` with {} argument(s)",
            self.script.source(),
            class.type_path(),
            self.args.len(),
        );

        let Some((first, rest)) = self.script.segments().split_first() else {
            return Err(self.invalid(class, InvalidScriptReason::EmptySegment { offset: 0 }));
        };
        self.trace(first, class);

        let mut value = match &first.segment {
            Segment::Field { name } => {
                let resolved = resolve_field(class, name)
                    .ok_or_else(|| self.member_not_found(class, name))?;
                return Err(self.fault(
                    class,
                    name,
                    InvokeError::MissingReceiver {
                        member: resolved.member.name(),
                    },
                ));
            }
            Segment::Call { name, params } => self.call(class, None, name, params)?,
        };

        if rest.is_empty() {
            return Ok(value);
        }
        self.step(&mut *value, rest, None)
    }

    fn step(
        &self,
        current: &mut dyn Reflect,
        segments: &[OffsetSegment<'_>],
        terminal: Option<Box<dyn Reflect>>,
    ) -> Result<Box<dyn Reflect>, ScriptError> {
        let current = present_mut(current).map_err(|class| self.null_target(class))?;
        let class = current.reflect_class_info();

        let Some((first, rest)) = segments.split_first() else {
            return current
                .reflect_clone()
                .map_err(|source| self.not_cloneable(class, "", source));
        };
        self.trace(first, class);

        match &first.segment {
            Segment::Field { name } => {
                let resolved = resolve_field(class, name)
                    .ok_or_else(|| self.member_not_found(class, name))?;
                let field = ascend_mut(current, resolved.depth)
                    .and_then(|owner| owner.reflect_mut().as_struct())
                    .and_then(|owner| owner.field_mut(name))
                    .ok_or_else(|| self.member_not_found(class, name))?;

                if rest.is_empty() {
                    self.finish_field(class, name, field, terminal)
                } else {
                    self.step(field, rest, terminal)
                }
            }
            Segment::Call { name, params } => {
                let mut value = self.call(class, Some(current), name, params)?;
                if rest.is_empty() {
                    Ok(value)
                } else {
                    self.step(&mut *value, rest, None)
                }
            }
        }
    }

    /// A terminal field behind a call lives in the call's owned result,
    /// so assigning to it would be lost.
    fn check_attached(&self, class: &'static ClassInfo) -> Result<(), ScriptError> {
        let Some((last, hops)) = self.script.segments().split_last() else {
            return Ok(());
        };
        if last.segment.is_call() {
            return Ok(());
        }
        match hops.iter().find(|hop| hop.segment.is_call()) {
            Some(call) => Err(ScriptError::DetachedAssignment {
                class: class.type_path(),
                member: call.segment.name().to_string(),
                script: self.source(),
            }),
            None => Ok(()),
        }
    }

    fn call(
        &self,
        class: &'static ClassInfo,
        receiver: Option<&mut dyn Reflect>,
        name: &str,
        params: &[Placeholder],
    ) -> Result<Box<dyn Reflect>, ScriptError> {
        let bound = bind_call(params, self.args).map_err(|reason| self.invalid(class, reason))?;
        let resolved = resolve_method(class, name, &bound.types, self.options.ancestor_lookup)
            .ok_or_else(|| self.member_not_found(class, name))?;

        let receiver = match receiver {
            Some(receiver) => Some(
                ascend_mut(receiver, resolved.depth)
                    .ok_or_else(|| self.member_not_found(class, name))?,
            ),
            None => None,
        };

        resolved
            .member
            .invoke(receiver, bound.values)
            .map_err(|source| self.fault(class, name, source))
    }

    fn finish_field(
        &self,
        class: &'static ClassInfo,
        name: &str,
        field: &mut dyn Reflect,
        terminal: Option<Box<dyn Reflect>>,
    ) -> Result<Box<dyn Reflect>, ScriptError> {
        match terminal {
            Some(value) => {
                let expected = field.reflect_type_path();
                field.replace(value).map_err(|value| ScriptError::TypeMismatch {
                    class: class.type_path(),
                    member: name.to_string(),
                    expected,
                    found: value.reflect_type_path(),
                    script: self.source(),
                })
            }
            None => field
                .reflect_clone()
                .map_err(|source| self.not_cloneable(class, name, source)),
        }
    }

    // --- diagnostics ---

    #[inline(always)]
    fn trace(&self, _segment: &OffsetSegment<'_>, _class: &'static ClassInfo) {
        #[cfg(all(debug_assertions, feature = "debug"))]
        log::trace!(
            "`{}` offset {}: `{}` on `{}`",
            self.script.source(),
            _segment.offset,
            _segment.segment,
            _class.type_path(),
        );
    }

    fn source(&self) -> String {
        self.script.source().to_string()
    }

    #[cold]
    fn invalid(&self, class: &'static ClassInfo, reason: InvalidScriptReason) -> ScriptError {
        ScriptError::InvalidScript {
            class: class.type_path(),
            script: self.source(),
            reason,
        }
    }

    #[cold]
    fn member_not_found(&self, class: &'static ClassInfo, member: &str) -> ScriptError {
        ScriptError::MemberNotFound {
            class: class.type_path(),
            member: member.to_string(),
            script: self.source(),
        }
    }

    #[cold]
    fn fault(&self, class: &'static ClassInfo, member: &str, source: InvokeError) -> ScriptError {
        ScriptError::InvocationFault {
            class: class.type_path(),
            member: member.to_string(),
            script: self.source(),
            source,
        }
    }

    #[cold]
    fn null_target(&self, class: &'static ClassInfo) -> ScriptError {
        ScriptError::NullTarget {
            class: class.type_path(),
            script: self.source(),
        }
    }

    #[cold]
    fn not_cloneable(
        &self,
        class: &'static ClassInfo,
        member: &str,
        source: ReflectCloneError,
    ) -> ScriptError {
        ScriptError::NotCloneable {
            class: class.type_path(),
            member: member.to_string(),
            script: self.source(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;

    use rp_reflect::Reflect;
    use rp_reflect::derive::{Reflect, reflect_methods};
    use rp_reflect::info::Typed;
    use rp_reflect::ops::InvokeError;

    use super::{Evaluator, present, present_mut};
    use crate::args::Arguments;
    use crate::error::ScriptError;
    use crate::script::CompiledScript;

    #[derive(Reflect)]
    struct Leaf {
        label: String,
        note: Option<String>,
    }

    #[derive(Reflect)]
    #[reflect(methods)]
    struct Node {
        label: String,
        next: Option<Leaf>,
    }

    #[reflect_methods]
    impl Node {
        fn single(label: String) -> Node {
            Node { label, next: None }
        }

        fn relabel(&mut self, label: String) -> String {
            core::mem::replace(&mut self.label, label)
        }
    }

    fn chain() -> Node {
        Node {
            label: String::from("head"),
            next: Some(Leaf {
                label: String::from("tail"),
                note: None,
            }),
        }
    }

    fn run(node: &mut Node, script: &str, args: Arguments) -> Result<Box<dyn Reflect>, ScriptError> {
        let script = CompiledScript::parse(script).unwrap();
        Evaluator::new(&script, &args).evaluate(node, None)
    }

    #[test]
    fn nullable_values_are_seen_through() {
        let some: Option<u8> = Some(4);
        assert_eq!(present(&some).unwrap().downcast_ref::<u8>(), Some(&4));

        let mut none: Option<u8> = None;
        let class = present_mut(&mut none).unwrap_err();
        assert!(class.ty().is::<Option<u8>>());
    }

    #[test]
    fn call_then_field() {
        let mut node = chain();
        let args = Arguments::new().with(String::from("first"));
        let old = run(&mut node, "relabel(%1)", args).unwrap();
        assert_eq!(old.downcast_ref::<String>().unwrap(), "head");
        assert_eq!(node.label, "first");

        let label = run(&mut node, "next.label", Arguments::new()).unwrap();
        assert_eq!(label.downcast_ref::<String>().unwrap(), "tail");
    }

    #[test]
    fn null_hop() {
        let mut node = chain();
        let err = run(&mut node, "next.note.len()", Arguments::new()).unwrap_err();
        assert!(matches!(err, ScriptError::NullTarget { .. }));

        // A terminal null is a value, not an error.
        let note = run(&mut node, "next.note", Arguments::new()).unwrap();
        assert!(note.downcast_ref::<Option<String>>().unwrap().is_none());
    }

    #[test]
    fn static_entry() {
        let script = CompiledScript::parse("single(%1).label").unwrap();
        let args = Arguments::new().with(String::from("solo"));
        let label = Evaluator::new(&script, &args)
            .evaluate_static(Node::class_info())
            .unwrap();
        assert_eq!(label.downcast_ref::<String>().unwrap(), "solo");

        let script = CompiledScript::parse("relabel(%1)").unwrap();
        let err = Evaluator::new(&script, &args)
            .evaluate_static(Node::class_info())
            .unwrap_err();
        assert!(matches!(
            err.invoke_error(),
            Some(InvokeError::MissingReceiver { member: "relabel" })
        ));
    }
}
