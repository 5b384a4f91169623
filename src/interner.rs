use once_cell::sync::Lazy;
use std::fmt;
use std::sync::RwLock;
use string_interner::{DefaultBackend, DefaultSymbol, StringInterner};

static INTERNER: Lazy<RwLock<StringInterner<DefaultBackend>>> =
    Lazy::new(|| RwLock::new(StringInterner::default()));

static TRUTH: Lazy<Atom> = Lazy::new(|| Atom::new("t"));
static FALSITY: Lazy<Atom> = Lazy::new(|| Atom::new("f"));

/// A symbolic token, interned in the global string interner.
///
/// Two atoms are equal iff their strings are equal; interning reduces that
/// to an id comparison. An atom renders back to exactly the string it was
/// created from, with no escaping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Atom(DefaultSymbol);

impl Atom {
    /// Intern a string and return an Atom
    pub fn new(s: &str) -> Self {
        let mut interner = INTERNER.write().unwrap();
        Atom(interner.get_or_intern(s))
    }

    /// Resolve the interned atom back to its string representation
    pub fn resolve(&self) -> String {
        let interner = INTERNER.read().unwrap();
        interner
            .resolve(self.0)
            .expect("Atom should always be valid")
            .to_string()
    }

    /// Resolve the atom and run a function with the string slice
    /// This is more efficient than resolve() which allocates a String
    pub fn with_str<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&str) -> R,
    {
        let interner = INTERNER.read().unwrap();
        let s = interner
            .resolve(self.0)
            .expect("Atom should always be valid");
        f(s)
    }

    /// The `t` atom, the language's truth value by convention.
    ///
    /// An ordinary atom in every other respect: user programs may rebind
    /// it or compare against the literal string "t".
    pub fn truth() -> Atom {
        *TRUTH
    }

    /// The `f` atom, the language's falsity value by convention.
    pub fn falsity() -> Atom {
        *FALSITY
    }

    pub fn from_bool(b: bool) -> Atom {
        if b { Atom::truth() } else { Atom::falsity() }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_str(|s| write!(f, "{s}"))
    }
}
