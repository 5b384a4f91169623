//! Binding environment for the evaluator.
//!
//! Bindings live on one ordered stack, scanned newest-first. Resolution
//! follows the most recent binding anywhere on the call stack, not the
//! definition site: scoping is dynamic, not lexical. A called function
//! sees bindings pushed by its callers, and no closure ever escapes with
//! a snapshot of the environment.

use crate::interner::Atom;
use crate::language::SExpr;

/// Ordered stack of bindings.
///
/// A sequence, not a map: duplicate names are allowed, and the most
/// recently pushed binding of a name shadows older ones until it is
/// popped.
#[derive(Debug)]
pub struct Environment {
    bindings: Vec<(Atom, SExpr)>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            bindings: Vec::new(),
        }
    }

    /// Push one binding onto the stack.
    pub fn push(&mut self, name: Atom, value: SExpr) {
        self.bindings.push((name, value));
    }

    /// Current stack depth, to be restored later with
    /// [`truncate`](Self::truncate).
    pub fn depth(&self) -> usize {
        self.bindings.len()
    }

    /// Drop every binding pushed since `depth` was taken.
    pub fn truncate(&mut self, depth: usize) {
        self.bindings.truncate(depth);
    }

    /// Look up a name, scanning from the most recent binding backward.
    pub fn lookup(&self, name: Atom) -> Option<&SExpr> {
        self.bindings
            .iter()
            .rev()
            .find(|(bound, _)| *bound == name)
            .map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(name: &str) -> SExpr {
        SExpr::atom(name)
    }

    #[test]
    fn test_lookup_finds_pushed_binding() {
        let mut env = Environment::new();
        env.push(Atom::new("x"), atom("hello"));
        assert_eq!(env.lookup(Atom::new("x")), Some(&atom("hello")));
    }

    #[test]
    fn test_lookup_missing_name() {
        let env = Environment::new();
        assert_eq!(env.lookup(Atom::new("x")), None);
    }

    #[test]
    fn test_most_recent_binding_wins() {
        let mut env = Environment::new();
        env.push(Atom::new("x"), atom("old"));
        env.push(Atom::new("x"), atom("new"));
        assert_eq!(env.lookup(Atom::new("x")), Some(&atom("new")));
    }

    #[test]
    fn test_truncate_unshadows() {
        let mut env = Environment::new();
        env.push(Atom::new("x"), atom("old"));
        let depth = env.depth();
        env.push(Atom::new("x"), atom("new"));
        env.push(Atom::new("y"), atom("other"));
        env.truncate(depth);
        assert_eq!(env.lookup(Atom::new("x")), Some(&atom("old")));
        assert_eq!(env.lookup(Atom::new("y")), None);
    }
}
