//! SQL function registry.
//!
//! Every function call in the AST is rendered through the dialect's
//! registry. A function is described by one or more argument patterns; each
//! pattern is a template where `?1`..`?9` stand for single arguments and `?*`
//! for the whole argument list.

use std::collections::BTreeMap;

use crate::error::{DialectError, Result};
use crate::translate::Fragment;

/// How many arguments a pattern accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments.
    Exact(usize),
    /// At least this many arguments.
    AtLeast(usize),
}

impl Arity {
    /// Returns whether `count` arguments satisfy this arity.
    #[must_use]
    pub const fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exact(n) => count == n,
            Self::AtLeast(n) => count >= n,
        }
    }
}

/// A rendering template for one arity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionPattern {
    /// Accepted argument count.
    pub arity: Arity,
    /// Template text.
    pub template: String,
}

/// A registered function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDescriptor {
    name: String,
    patterns: Vec<FunctionPattern>,
    aggregate: bool,
}

impl FunctionDescriptor {
    /// A function rendered as `name(args...)` for any argument count.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self::new(name).pattern(Arity::AtLeast(0), &format!("{name}(?*)"))
    }

    /// An aggregate rendered as `name(args...)` for any argument count.
    #[must_use]
    pub fn named_aggregate(name: &str) -> Self {
        Self::named(name).aggregate()
    }

    /// A function without patterns yet.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            patterns: Vec::new(),
            aggregate: false,
        }
    }

    /// A function with a single fixed-arity template.
    #[must_use]
    pub fn template(name: &str, arity: usize, template: &str) -> Self {
        Self::new(name).pattern(Arity::Exact(arity), template)
    }

    /// A function rendered without parentheses or arguments.
    #[must_use]
    pub fn no_args(name: &str, text: &str) -> Self {
        Self::template(name, 0, text)
    }

    /// Adds a pattern. Patterns are tried in insertion order.
    #[must_use]
    pub fn pattern(mut self, arity: Arity, template: &str) -> Self {
        self.patterns.push(FunctionPattern {
            arity,
            template: template.to_string(),
        });
        self
    }

    /// Marks the function as an aggregate.
    #[must_use]
    pub const fn aggregate(mut self) -> Self {
        self.aggregate = true;
        self
    }

    /// Returns the function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the function is an aggregate.
    #[must_use]
    pub const fn is_aggregate(&self) -> bool {
        self.aggregate
    }

    /// Renders the function for already-rendered arguments.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::IllegalArgument`] when no pattern accepts the
    /// number of arguments.
    pub fn render(&self, args: &[String]) -> Result<String> {
        let args: Vec<Fragment> = args.iter().map(|a| Fragment::text(a)).collect();
        self.render_fragments(&args).map(|rendered| rendered.sql)
    }

    /// Renders the function for rendered arguments carrying placeholders.
    ///
    /// An argument used twice by the template counts its placeholders twice;
    /// an unused one counts none.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::IllegalArgument`] when no pattern accepts the
    /// number of arguments.
    pub fn render_fragments(&self, args: &[Fragment]) -> Result<Fragment> {
        let pattern = self
            .patterns
            .iter()
            .find(|p| p.arity.accepts(args.len()))
            .ok_or_else(|| {
                DialectError::IllegalArgument(format!(
                    "function '{}' does not accept {} argument(s)",
                    self.name,
                    args.len()
                ))
            })?;
        Ok(expand(&pattern.template, args))
    }
}

fn expand(template: &str, args: &[Fragment]) -> Fragment {
    let mut out = Fragment::default();
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '?' {
            out.sql.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('*') => {
                chars.next();
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push(arg);
                }
            }
            Some(d) if d.is_ascii_digit() => {
                chars.next();
                let index = d as usize - '0' as usize;
                if let Some(arg) = index.checked_sub(1).and_then(|i| args.get(i)) {
                    out.push(arg);
                }
            }
            _ => out.sql.push(c),
        }
    }
    out
}

/// Functions known to a dialect, keyed by lowercase name.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: BTreeMap<String, FunctionDescriptor>,
}

impl FunctionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) a function.
    pub fn register(&mut self, descriptor: FunctionDescriptor) {
        self.functions
            .insert(descriptor.name.to_ascii_lowercase(), descriptor);
    }

    /// Registers `alias` with the same patterns as `target`.
    ///
    /// Does nothing when `target` is not registered.
    pub fn register_alias(&mut self, alias: &str, target: &str) {
        if let Some(existing) = self.find(target).cloned() {
            self.register(FunctionDescriptor {
                name: alias.to_string(),
                ..existing
            });
        }
    }

    /// Removes a function. Returns whether it was registered.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.functions.remove(&name.to_ascii_lowercase()).is_some()
    }

    /// Looks up a function.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&FunctionDescriptor> {
        self.functions.get(&name.to_ascii_lowercase())
    }

    /// Returns whether a function is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Number of registered functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns whether no function is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Renders a call to `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::UnknownFunction`] for unregistered names and
    /// [`DialectError::IllegalArgument`] for arity mismatches.
    pub fn render(&self, name: &str, args: &[String]) -> Result<String> {
        self.lookup(name)?.render(args)
    }

    /// Renders a call to `name` for arguments carrying placeholders.
    ///
    /// # Errors
    ///
    /// Same as [`FunctionRegistry::render`].
    pub fn render_fragments(&self, name: &str, args: &[Fragment]) -> Result<Fragment> {
        self.lookup(name)?.render_fragments(args)
    }

    fn lookup(&self, name: &str) -> Result<&FunctionDescriptor> {
        self.find(name)
            .ok_or_else(|| DialectError::UnknownFunction(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_named_function() {
        let f = FunctionDescriptor::named("coalesce");
        assert_eq!(f.render(&args(&["a", "b"])).unwrap(), "coalesce(a, b)");
    }

    #[test]
    fn test_positional_template() {
        let f = FunctionDescriptor::template("position", 2, "strpos(?2, ?1)");
        assert_eq!(f.render(&args(&["'x'", "name"])).unwrap(), "strpos(name, 'x')");
    }

    #[test]
    fn test_placeholders_follow_the_template() {
        let f = FunctionDescriptor::template("nullif_self", 1, "nullif(?1, ?1)");
        let arg = Fragment {
            sql: "?".to_string(),
            parameters: 1,
        };
        let rendered = f.render_fragments(&[arg]).unwrap();
        assert_eq!(rendered.sql, "nullif(?, ?)");
        assert_eq!(rendered.parameters, 2);

        let f = FunctionDescriptor::no_args("localtime", "current_timestamp");
        assert_eq!(f.render_fragments(&[]).unwrap(), Fragment::text("current_timestamp"));
    }

    #[test]
    fn test_arity_mismatch() {
        let f = FunctionDescriptor::template("abs", 1, "abs(?1)");
        assert!(matches!(
            f.render(&args(&["a", "b"])),
            Err(DialectError::IllegalArgument(_))
        ));
    }

    #[test]
    fn test_multiple_patterns() {
        let f = FunctionDescriptor::new("round")
            .pattern(Arity::Exact(1), "round(?1)")
            .pattern(Arity::Exact(2), "round(?1::numeric, ?2)");
        assert_eq!(f.render(&args(&["x"])).unwrap(), "round(x)");
        assert_eq!(f.render(&args(&["x", "2"])).unwrap(), "round(x::numeric, 2)");
    }

    #[test]
    fn test_registry_unregister_and_unknown() {
        let mut registry = FunctionRegistry::new();
        registry.register(FunctionDescriptor::named("LOWER"));
        assert!(registry.contains("lower"));
        assert!(registry.unregister("Lower"));
        assert!(!registry.unregister("lower"));
        assert!(matches!(
            registry.render("lower", &args(&["a"])),
            Err(DialectError::UnknownFunction(name)) if name == "lower"
        ));
    }

    #[test]
    fn test_alias() {
        let mut registry = FunctionRegistry::new();
        registry.register(FunctionDescriptor::template("length", 1, "length(?1)"));
        registry.register_alias("character_length", "length");
        assert_eq!(
            registry.render("character_length", &args(&["s"])).unwrap(),
            "length(s)"
        );
    }
}
