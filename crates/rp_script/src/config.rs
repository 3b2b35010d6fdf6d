/// How method lookup treats base classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AncestorLookup {
    /// Every class of the chain is searched for a method whose parameters
    /// accept the argument types.
    #[default]
    TypeAware,
    /// Only the runtime class is searched by argument types. Base classes
    /// match the first method with the requested name, whatever its
    /// parameters, so a mismatch surfaces when the method is invoked.
    NameOnly,
}

/// Runtime options of an evaluation.
///
/// # Examples
///
/// ```
/// use rp_script::config::{AncestorLookup, ScriptOptions};
///
/// let options = ScriptOptions::new()
///     .with_ancestor_lookup(AncestorLookup::NameOnly)
///     .with_trim_script(false);
///
/// assert_eq!(options.ancestor_lookup, AncestorLookup::NameOnly);
/// assert!(ScriptOptions::default().trim_script);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScriptOptions {
    pub ancestor_lookup: AncestorLookup,
    /// Strip whitespace around the script text before parsing.
    pub trim_script: bool,
}

impl ScriptOptions {
    #[inline]
    pub const fn new() -> Self {
        Self {
            ancestor_lookup: AncestorLookup::TypeAware,
            trim_script: true,
        }
    }

    #[inline]
    pub const fn with_ancestor_lookup(mut self, ancestor_lookup: AncestorLookup) -> Self {
        self.ancestor_lookup = ancestor_lookup;
        self
    }

    #[inline]
    pub const fn with_trim_script(mut self, trim_script: bool) -> Self {
        self.trim_script = trim_script;
        self
    }

    /// Applies [`trim_script`](Self::trim_script) to `script`.
    #[inline]
    pub fn prepare<'a>(&self, script: &'a str) -> &'a str {
        if self.trim_script { script.trim() } else { script }
    }
}

impl Default for ScriptOptions {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
