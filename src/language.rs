use std::fmt;
use std::sync::Arc;

use crate::error::Error;
use crate::interner::Atom;

// ============================================================================
// Core Type System
// ============================================================================

/// An expression: the unit of both syntax and runtime value.
///
/// Either an atom leaf or an ordered list of sub-expressions. Expressions
/// are immutable once constructed; list operations always build new lists,
/// and `Arc` makes the sharing cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SExpr {
    Atom(Atom),
    List(Arc<Vec<SExpr>>),
}

impl SExpr {
    /// Intern `name` and wrap it as an atom expression.
    pub fn atom(name: &str) -> Self {
        SExpr::Atom(Atom::new(name))
    }

    pub fn list(elements: Vec<SExpr>) -> Self {
        SExpr::List(Arc::new(elements))
    }

    /// The empty list, a valid expression that evaluates to itself.
    pub fn empty() -> Self {
        SExpr::list(Vec::new())
    }

    pub fn from_bool(b: bool) -> Self {
        SExpr::Atom(Atom::from_bool(b))
    }

    pub fn as_atom(&self) -> Option<Atom> {
        match self {
            SExpr::Atom(atom) => Some(*atom),
            SExpr::List(_) => None,
        }
    }

    /// Whether this expression is exactly the `t` atom. `cond` tests match
    /// on this, not on general truthiness.
    pub fn is_truth(&self) -> bool {
        matches!(self, SExpr::Atom(atom) if *atom == Atom::truth())
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl fmt::Display for SExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SExpr::Atom(atom) => write!(f, "{atom}"),
            SExpr::List(elements) => {
                write!(f, "(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, ")")
            }
        }
    }
}

// ============================================================================
// Primitive Operations
// ============================================================================

pub fn is_atom(value: &SExpr) -> bool {
    matches!(value, SExpr::Atom(_))
}

/// Compare two atoms by value. Lists are not comparable with `eq`.
pub fn eq(a: &SExpr, b: &SExpr) -> Result<bool, Error> {
    match (a, b) {
        (SExpr::Atom(x), SExpr::Atom(y)) => Ok(x == y),
        _ => Err(Error::structure("eq can only be applied to atoms")),
    }
}

pub fn first(value: &SExpr) -> Result<SExpr, Error> {
    match value {
        SExpr::List(elements) => elements
            .first()
            .cloned()
            .ok_or_else(|| Error::structure("first cannot be applied to the empty list")),
        SExpr::Atom(_) => Err(Error::structure("first cannot be applied to atoms")),
    }
}

/// Everything after the head, as a new list. The rest of the empty list is
/// the empty list.
pub fn rest(value: &SExpr) -> Result<SExpr, Error> {
    match value {
        SExpr::List(elements) => Ok(SExpr::list(elements.iter().skip(1).cloned().collect())),
        SExpr::Atom(_) => Err(Error::structure("rest cannot be applied to atoms")),
    }
}

/// Prepend `head` to the list `tail`, building a new list.
pub fn cons(head: SExpr, tail: &SExpr) -> Result<SExpr, Error> {
    match tail {
        SExpr::List(elements) => {
            let mut list = Vec::with_capacity(elements.len() + 1);
            list.push(head);
            list.extend(elements.iter().cloned());
            Ok(SExpr::list(list))
        }
        SExpr::Atom(_) => Err(Error::structure("second argument to cons cannot be an atom")),
    }
}
