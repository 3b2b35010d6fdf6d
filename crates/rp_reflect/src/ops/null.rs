/// The null value.
///
/// Assigning `Null` to a nullable field clears it, and passing `Null` as an
/// argument matches any nullable parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Null;
