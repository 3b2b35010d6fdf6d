use rp_reflect::derive::{Reflect, reflect_methods};
use rp_reflect::info::Type;
use rp_reflect::ops::{InvokeError, Null};
use rp_reflect::registry::ClassRegistry;
use rp_reflect::Reflect;
use rp_script::args::Arguments;
use rp_script::config::{AncestorLookup, ScriptOptions};
use rp_script::eval::Evaluator;
use rp_script::script::CompiledScript;
use rp_script::{InvalidScriptReason, Reflector, ScriptError};

// -----------------------------------------------------------------------------
// Classes

#[derive(Reflect)]
#[reflect(methods)]
struct Animal {
    name: String,
    age: u32,
}

#[reflect_methods]
impl Animal {
    fn rename(&mut self, name: String) -> String {
        core::mem::replace(&mut self.name, name)
    }

    fn birthday(&mut self) -> u32 {
        self.age += 1;
        self.age
    }

    fn greet(&self, other: String) -> String {
        format!("{} greets {other}", self.name)
    }
}

#[derive(Reflect)]
#[reflect(methods)]
struct Person {
    name: String,
    nickname: Option<String>,
}

#[reflect_methods]
impl Person {
    fn child(&self) -> Option<Person> {
        None
    }

    #[reflect(name = "nickname")]
    fn set_nickname(&mut self, nickname: Option<String>) -> Option<String> {
        core::mem::replace(&mut self.nickname, nickname)
    }
}

#[derive(Reflect)]
#[reflect(methods)]
struct Dog {
    #[reflect(extends)]
    base: Animal,
    count: i32,
    tricks: Vec<String>,
    owner: Option<Person>,
}

#[reflect_methods]
impl Dog {
    fn puppy(name: String) -> Dog {
        Dog {
            base: Animal { name, age: 0 },
            count: 0,
            tricks: Vec::new(),
            owner: None,
        }
    }

    fn greet(&self) -> String {
        format!("{} wags", self.base.name)
    }

    fn companion(&self) -> Person {
        Person {
            name: self.base.name.clone(),
            nickname: None,
        }
    }

    fn learn(&mut self, trick: String) -> usize {
        self.tricks.push(trick);
        self.tricks.len()
    }

    fn join(&self, first: String, second: String) -> String {
        format!("{first}-{second}")
    }

    fn fetch(&self, distance: u32) -> Result<u32, String> {
        if distance > 100 {
            Err(format!("{distance} is too far"))
        } else {
            Ok(distance * 2)
        }
    }

    #[reflect(skip)]
    fn secret(&self) -> i32 {
        self.count
    }
}

#[derive(Reflect)]
struct Puppy {
    #[reflect(extends)]
    dog: Dog,
}

fn dog() -> Dog {
    Dog {
        base: Animal {
            name: String::from("rex"),
            age: 3,
        },
        count: 5,
        tricks: vec![String::from("sit")],
        owner: Some(Person {
            name: String::from("ada"),
            nickname: None,
        }),
    }
}

fn boxed<T: Reflect>(value: T) -> Box<dyn Reflect> {
    Box::new(value)
}

// -----------------------------------------------------------------------------
// Field chains

#[test]
fn private_field_read() {
    let dog = dog();
    assert_eq!(*rp_script::get_as::<i32>(&dog, "count").unwrap(), 5);
    assert_eq!(dog.secret(), 5);
}

#[test]
fn set_then_get() {
    let mut dog = dog();
    rp_script::set(&mut dog, "owner.name", boxed(String::from("bob"))).unwrap();
    assert_eq!(rp_script::get_as::<String>(&dog, "owner.name").unwrap(), "bob");
}

#[test]
fn chain_equals_chained_reads() {
    let mut dog = dog();
    let chained = rp_script::reflect(&mut dog, "owner.name").unwrap();

    let owner = rp_script::get(&dog, "owner").unwrap();
    let name = rp_script::get(owner, "name").unwrap();
    assert_eq!(chained.reflect_partial_eq(name), Some(true));
}

#[test]
fn chain_walks_base_classes_but_get_does_not() {
    let mut dog = dog();
    let name = rp_script::reflect(&mut dog, "name").unwrap();
    assert_eq!(name.downcast_ref::<String>().unwrap(), "rex");

    let err = rp_script::get(&dog, "name").unwrap_err();
    assert!(matches!(err, ScriptError::MemberNotFound { .. }));
}

#[test]
fn terminal_assignment_returns_previous_value() {
    let mut dog = dog();
    let old = rp_script::reflect_assign(&mut dog, "count", vec![], boxed(9_i32)).unwrap();
    assert_eq!(old.downcast_ref::<i32>(), Some(&5));
    assert_eq!(dog.count, 9);
}

#[test]
fn assignment_reaches_nested_and_base_fields() {
    let mut dog = dog();
    let old = rp_script::reflect_assign(&mut dog, "owner.name", vec![], boxed(String::from("bob")))
        .unwrap();
    assert_eq!(old.downcast_ref::<String>().unwrap(), "ada");
    assert_eq!(dog.owner.as_ref().unwrap().name, "bob");

    rp_script::reflect_assign(&mut dog, "age", vec![], boxed(4_u32)).unwrap();
    assert_eq!(dog.base.age, 4);
}

#[test]
fn assigning_null_clears_an_option() {
    let mut dog = dog();
    let old = rp_script::reflect_assign(&mut dog, "owner", vec![], boxed(Null)).unwrap();
    assert!(old.downcast_ref::<Option<Person>>().unwrap().is_some());
    assert!(dog.owner.is_none());
}

#[test]
fn assignment_type_mismatch_keeps_field() {
    let mut dog = dog();
    let err = rp_script::reflect_assign(&mut dog, "count", vec![], boxed(9_i64)).unwrap_err();
    assert!(matches!(
        err,
        ScriptError::TypeMismatch {
            expected: "i32",
            found: "i64",
            ..
        }
    ));
    assert_eq!(dog.count, 5);
}

// -----------------------------------------------------------------------------
// Calls

#[test]
fn zero_argument_call_matches_direct_call() {
    let mut dog = dog();
    let expected = dog.greet();
    let result = rp_script::reflect(&mut dog, "greet()").unwrap();
    assert_eq!(result.downcast_ref::<String>(), Some(&expected));
}

#[test]
fn placeholders_bind_in_script_order() {
    let mut dog = dog();
    let args = || vec![boxed(String::from("x")), boxed(String::from("y"))];

    let forward = rp_script::reflect_with_args(&mut dog, "join(%1,%2)", args()).unwrap();
    assert_eq!(forward.downcast_ref::<String>().unwrap(), "x-y");

    let swapped = rp_script::reflect_with_args(&mut dog, "join(%2, %1)", args()).unwrap();
    assert_eq!(swapped.downcast_ref::<String>().unwrap(), "y-x");

    let twice = rp_script::reflect_with_args(&mut dog, "join(%1,%1)", args()).unwrap();
    assert_eq!(twice.downcast_ref::<String>().unwrap(), "x-x");
}

#[test]
fn base_class_methods_mutate_the_embedded_value() {
    let mut dog = dog();
    let old =
        rp_script::reflect_with_args(&mut dog, "rename(%1)", vec![boxed(String::from("max"))])
            .unwrap();
    assert_eq!(old.downcast_ref::<String>().unwrap(), "rex");
    assert_eq!(dog.base.name, "max");

    let age = rp_script::reflect(&mut dog, "birthday()").unwrap();
    assert_eq!(age.downcast_ref::<u32>(), Some(&4));
}

#[test]
fn calls_continue_on_results() {
    let mut dog = dog();
    let len = rp_script::reflect_with_args(
        &mut dog,
        "tricks.get(%1).len()",
        vec![boxed(0_usize)],
    )
    .unwrap();
    assert_eq!(len.downcast_ref::<usize>(), Some(&3));

    let upper = rp_script::reflect(&mut dog, "owner.name.to_uppercase()").unwrap();
    assert_eq!(upper.downcast_ref::<String>().unwrap(), "ADA");
}

#[test]
fn terminal_call_never_assigns() {
    let mut dog = dog();
    let result =
        rp_script::reflect_assign(&mut dog, "greet()", vec![], boxed(String::from("ignored")))
            .unwrap();
    assert_eq!(result.downcast_ref::<String>().unwrap(), "rex wags");
    assert_eq!(dog.base.name, "rex");
}

#[test]
fn assignment_behind_a_call_is_rejected() {
    let mut dog = dog();
    let name = rp_script::reflect(&mut dog, "companion().name").unwrap();
    assert_eq!(name.downcast_ref::<String>().unwrap(), "rex");

    let err = rp_script::reflect_assign(&mut dog, "companion().name", vec![], boxed(String::from("bob")))
        .unwrap_err();
    assert!(matches!(
        &err,
        ScriptError::DetachedAssignment { member, .. } if member == "companion"
    ));
    assert_eq!(dog.base.name, "rex");

    // Rejected before the call runs.
    let err = rp_script::reflect_assign(
        &mut dog,
        "learn(%1).name",
        vec![boxed(String::from("roll"))],
        boxed(String::from("bob")),
    )
    .unwrap_err();
    assert!(matches!(err, ScriptError::DetachedAssignment { .. }));
    assert_eq!(dog.tricks, ["sit"]);
}

#[test]
fn null_result_fails_at_next_segment() {
    let mut dog = dog();
    let err = rp_script::reflect(&mut dog, "owner.child().name").unwrap_err();
    assert!(matches!(err, ScriptError::NullTarget { .. }));
    assert_eq!(err.script(), "owner.child().name");

    let child = rp_script::reflect(&mut dog, "owner.child()").unwrap();
    assert!(child.downcast_ref::<Option<Person>>().unwrap().is_none());
}

#[test]
fn raised_errors_are_invocation_faults() {
    let mut dog = dog();
    let ok = rp_script::reflect_with_args(&mut dog, "fetch(%1)", vec![boxed(10_u32)]).unwrap();
    assert_eq!(ok.downcast_ref::<u32>(), Some(&20));

    let err =
        rp_script::reflect_with_args(&mut dog, "fetch(%1)", vec![boxed(500_u32)]).unwrap_err();
    assert!(matches!(
        &err,
        ScriptError::InvocationFault { member, source: InvokeError::Raised(_), .. } if member == "fetch"
    ));
    assert!(err.class_name().ends_with("Dog"));
}

#[test]
fn skipped_and_unknown_methods_are_not_found() {
    let mut dog = dog();
    for script in ["secret()", "bark()", "greet(%1)"] {
        let err = rp_script::reflect_with_args(&mut dog, script, vec![boxed(1_u8)]).unwrap_err();
        assert!(matches!(err, ScriptError::MemberNotFound { .. }), "{script}");
    }
}

#[test]
fn partial_mutation_is_not_rolled_back() {
    let mut dog = dog();
    let err =
        rp_script::reflect_with_args(&mut dog, "learn(%1).missing", vec![boxed(String::from("roll"))])
            .unwrap_err();
    assert!(matches!(err, ScriptError::MemberNotFound { .. }));
    assert_eq!(dog.tricks, ["sit", "roll"]);
}

// -----------------------------------------------------------------------------
// Arguments

#[test]
fn explicit_argument_types() {
    let mut person = Person {
        name: String::from("ada"),
        nickname: None,
    };

    rp_script::reflect_typed(
        &mut person,
        "nickname(%1)",
        vec![boxed(String::from("countess"))],
        vec![Type::of::<Option<String>>()],
    )
    .unwrap();
    assert_eq!(person.nickname.as_deref(), Some("countess"));

    // `nickname` is both a field and a method; a call segment picks the method.
    let old = rp_script::reflect_with_args(&mut person, "nickname(%1)", vec![boxed(Null)]).unwrap();
    assert_eq!(
        old.downcast_ref::<Option<String>>().unwrap().as_deref(),
        Some("countess")
    );
    assert!(person.nickname.is_none());

    let err = rp_script::reflect_typed(&mut person, "nickname(%1)", vec![], vec![Type::of::<u8>()])
        .unwrap_err();
    assert!(matches!(
        err,
        ScriptError::InvalidScript {
            reason: InvalidScriptReason::ArgumentTypes { values: 0, types: 1 },
            ..
        }
    ));
}

#[test]
fn typed_assignment() {
    let mut person = Person {
        name: String::from("ada"),
        nickname: None,
    };
    let old = rp_script::reflect_typed_assign(
        &mut person,
        "nickname",
        vec![],
        vec![],
        boxed(String::from("countess")),
    )
    .unwrap();
    assert!(old.downcast_ref::<Option<String>>().unwrap().is_none());
    assert_eq!(person.nickname.as_deref(), Some("countess"));
}

#[test]
fn bad_placeholders() {
    let mut dog = dog();
    let err = rp_script::reflect(&mut dog, "join(%1,%2)").unwrap_err();
    assert!(matches!(
        err,
        ScriptError::InvalidScript {
            reason: InvalidScriptReason::PlaceholderOutOfRange {
                placeholder: 1,
                available: 0
            },
            ..
        }
    ));

    let err = rp_script::reflect(&mut dog, "join(one)").unwrap_err();
    assert!(matches!(
        err,
        ScriptError::InvalidScript {
            reason: InvalidScriptReason::MalformedPlaceholder { .. },
            ..
        }
    ));
}

#[test]
fn dotted_name_in_single_field_accessor() {
    let dog = dog();
    let err = rp_script::access::get_field(&dog, "owner.name").unwrap_err();
    assert!(matches!(
        err,
        ScriptError::InvalidScript {
            reason: InvalidScriptReason::DottedFieldName { .. },
            ..
        }
    ));
}

// -----------------------------------------------------------------------------
// Options

#[test]
fn scripts_are_trimmed_by_default() {
    let mut dog = dog();
    assert!(rp_script::reflect(&mut dog, "  .count ").is_ok());

    let strict = Reflector::new().with_options(ScriptOptions::new().with_trim_script(false));
    assert!(matches!(
        strict.reflect(&mut dog, " count"),
        Err(ScriptError::MemberNotFound { .. })
    ));
}

#[test]
fn ancestor_lookup_modes() {
    let mut puppy = Puppy { dog: dog() };
    let args = || vec![boxed(String::from("tom"))];

    let aware = Reflector::new();
    let greeting = aware.reflect_with_args(&mut puppy, "greet(%1)", args()).unwrap();
    assert_eq!(greeting.downcast_ref::<String>().unwrap(), "rex greets tom");

    let name_only = Reflector::new()
        .with_options(ScriptOptions::new().with_ancestor_lookup(AncestorLookup::NameOnly));
    let err = name_only.reflect_with_args(&mut puppy, "greet(%1)", args()).unwrap_err();
    assert!(matches!(
        err.invoke_error(),
        Some(InvokeError::ArgumentCount {
            expected: 0,
            found: 1,
            ..
        })
    ));
}

#[test]
fn compiled_scripts_are_reusable() {
    let script = CompiledScript::parse("learn(%1)").unwrap();
    let args = Arguments::new().with(String::from("spin"));
    let evaluator = Evaluator::new(&script, &args);

    let mut first = dog();
    let mut second = dog();
    evaluator.evaluate(&mut first, None).unwrap();
    let len = evaluator.evaluate(&mut second, None).unwrap();

    assert_eq!(len.downcast_ref::<usize>(), Some(&2));
    assert_eq!(first.tricks, second.tricks);
}

// -----------------------------------------------------------------------------
// Static entry

#[test]
fn static_entry() {
    let mut registry = ClassRegistry::new();
    registry.register::<Dog>();
    let reflector = Reflector::with_registry(&registry);

    let name = reflector
        .resolve_static("Dog", "puppy(%1).name", vec![boxed(String::from("bo"))])
        .unwrap();
    assert_eq!(name.downcast_ref::<String>().unwrap(), "bo");

    // Registering a class registers its base and field classes too.
    assert!(registry.resolve("Animal").is_some());
    assert!(registry.resolve("Person").is_some());
}

#[test]
fn static_entry_needs_static_members() {
    let mut registry = ClassRegistry::new();
    registry.register::<Dog>();
    let reflector = Reflector::with_registry(&registry);

    for script in ["count", "greet()"] {
        let err = reflector.resolve_static("Dog", script, vec![]).unwrap_err();
        assert!(
            matches!(
                err.invoke_error(),
                Some(InvokeError::MissingReceiver { .. })
            ),
            "{script}"
        );
    }

    let err = reflector.resolve_static("Cat", "puppy(%1)", vec![]).unwrap_err();
    assert!(matches!(err, ScriptError::ClassNotFound { ref class, .. } if class == "Cat"));

    let err = Reflector::new().resolve_static("Dog", "puppy(%1)", vec![]).unwrap_err();
    assert!(matches!(err, ScriptError::ClassNotFound { .. }));
}
