use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use crate::environment::Environment;
use crate::error::Error;
use crate::interner::Atom;
use crate::language::{self, SExpr};

// ============================================================================
// Primitive Table
// ============================================================================

type PrimitiveFn = fn(&[SExpr]) -> Result<SExpr, Error>;

/// A built-in function with a fixed name and exact arity.
struct Primitive {
    name: &'static str,
    arity: usize,
    run: PrimitiveFn,
}

static PRIMITIVE_TABLE: [Primitive; 5] = [
    Primitive {
        name: "atom",
        arity: 1,
        run: prim_atom,
    },
    Primitive {
        name: "eq",
        arity: 2,
        run: prim_eq,
    },
    Primitive {
        name: "first",
        arity: 1,
        run: prim_first,
    },
    Primitive {
        name: "rest",
        arity: 1,
        run: prim_rest,
    },
    Primitive {
        name: "cons",
        arity: 2,
        run: prim_cons,
    },
];

// Consulted for head-position atoms before user-symbol lookup, so
// primitives cannot be shadowed in call position.
static PRIMITIVES: Lazy<FxHashMap<Atom, &'static Primitive>> = Lazy::new(|| {
    PRIMITIVE_TABLE
        .iter()
        .map(|primitive| (Atom::new(primitive.name), primitive))
        .collect()
});

static QUOTE: Lazy<Atom> = Lazy::new(|| Atom::new("quote"));
static COND: Lazy<Atom> = Lazy::new(|| Atom::new("cond"));
static FN: Lazy<Atom> = Lazy::new(|| Atom::new("fn"));
static DEF: Lazy<Atom> = Lazy::new(|| Atom::new("def"));

fn prim_atom(args: &[SExpr]) -> Result<SExpr, Error> {
    Ok(SExpr::from_bool(language::is_atom(&args[0])))
}

fn prim_eq(args: &[SExpr]) -> Result<SExpr, Error> {
    language::eq(&args[0], &args[1]).map(SExpr::from_bool)
}

fn prim_first(args: &[SExpr]) -> Result<SExpr, Error> {
    language::first(&args[0])
}

fn prim_rest(args: &[SExpr]) -> Result<SExpr, Error> {
    language::rest(&args[0])
}

fn prim_cons(args: &[SExpr]) -> Result<SExpr, Error> {
    language::cons(args[0].clone(), &args[1])
}

// ============================================================================
// Evaluator
// ============================================================================

/// The evaluator: one dynamically scoped environment plus the fixed
/// primitive table.
pub struct Vm {
    env: Environment,
}

impl Default for Vm {
    fn default() -> Self {
        Self::new()
    }
}

impl Vm {
    pub fn new() -> Self {
        let mut env = Environment::new();
        // Primitive names resolve as ordinary symbols; their callable
        // behavior lives in the table.
        for primitive in &PRIMITIVE_TABLE {
            let name = Atom::new(primitive.name);
            env.push(name, SExpr::Atom(name));
        }
        env.push(Atom::truth(), SExpr::Atom(Atom::truth()));
        env.push(Atom::falsity(), SExpr::Atom(Atom::falsity()));
        Vm { env }
    }

    /// Evaluate one expression to its resulting expression.
    ///
    /// Bindings pushed during evaluation are popped before this returns,
    /// on the error path too: no partial environment state survives a
    /// failed evaluation.
    pub fn eval(&mut self, expr: &SExpr) -> Result<SExpr, Error> {
        match expr {
            SExpr::Atom(name) => self
                .env
                .lookup(*name)
                .cloned()
                .ok_or_else(|| Error::unresolved(name.resolve())),
            // the empty list is self-quoting
            SExpr::List(elements) if elements.is_empty() => Ok(expr.clone()),
            SExpr::List(elements) => match &elements[0] {
                SExpr::Atom(head) => self.eval_call(*head, &elements[1..]),
                SExpr::List(form) => self.eval_application(form.as_slice(), &elements[1..]),
            },
        }
    }

    /// A non-empty list whose head is an atom: special form, primitive, or
    /// user-defined function name, in that priority order.
    fn eval_call(&mut self, head: Atom, args: &[SExpr]) -> Result<SExpr, Error> {
        if head == *QUOTE {
            return args
                .first()
                .cloned()
                .ok_or_else(|| Error::structure("quote requires an argument"));
        }
        if let Some(primitive) = PRIMITIVES.get(&head) {
            if args.len() != primitive.arity {
                return Err(Error::arity(primitive.name, primitive.arity, args.len()));
            }
            // eager, applicative order: every argument evaluated
            // left-to-right before the primitive runs
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(self.eval(arg)?);
            }
            return (primitive.run)(&values);
        }
        if head == *COND {
            return self.eval_cond(args);
        }
        // user-defined function: rewrite (name args...) as
        // (definition args...) and re-dispatch
        let definition = self
            .env
            .lookup(head)
            .cloned()
            .ok_or_else(|| Error::unresolved(head.resolve()))?;
        let mut rewritten = Vec::with_capacity(args.len() + 1);
        rewritten.push(definition);
        rewritten.extend_from_slice(args);
        self.eval(&SExpr::list(rewritten))
    }

    /// (test, result) pairs in order; the first test evaluating to the `t`
    /// atom selects its result.
    fn eval_cond(&mut self, clauses: &[SExpr]) -> Result<SExpr, Error> {
        if clauses.len() % 2 != 0 {
            return Err(Error::structure("cond requires an even number of args"));
        }
        for pair in clauses.chunks(2) {
            if self.eval(&pair[0])?.is_truth() {
                return self.eval(&pair[1]);
            }
        }
        Err(Error::structure("no matching cond clause"))
    }

    /// A non-empty list whose head is itself a list: only `fn` and `def`
    /// forms can stand in that position.
    fn eval_application(&mut self, form: &[SExpr], args: &[SExpr]) -> Result<SExpr, Error> {
        match form.first().and_then(SExpr::as_atom) {
            Some(head) if head == *FN => self.apply_fn(form, args),
            Some(head) if head == *DEF => self.apply_def(form, args),
            _ => Err(Error::structure(format!(
                "cannot apply '{}': expected an fn or def form",
                SExpr::list(form.to_vec())
            ))),
        }
    }

    /// `((fn (p1 ...) body) a1 ...)`: bind each parameter to the evaluated
    /// value of its argument, evaluate the body, pop the bindings.
    fn apply_fn(&mut self, form: &[SExpr], args: &[SExpr]) -> Result<SExpr, Error> {
        let params = match form.get(1) {
            Some(SExpr::List(params)) => params.clone(),
            _ => return Err(Error::structure("fn requires a parameter list")),
        };
        let body = form
            .get(2)
            .ok_or_else(|| Error::structure("fn requires a body"))?;
        if params.len() != args.len() {
            let name = SExpr::list(form.to_vec()).to_string();
            return Err(Error::arity(name, params.len(), args.len()));
        }
        tracing::trace!("applying fn with {} params", params.len());
        let depth = self.env.depth();
        let result = self.bind_and_eval(&params, args, body);
        // unconditional: bindings pushed below must not survive an error
        self.env.truncate(depth);
        result
    }

    fn bind_and_eval(
        &mut self,
        params: &[SExpr],
        args: &[SExpr],
        body: &SExpr,
    ) -> Result<SExpr, Error> {
        for (param, arg) in params.iter().zip(args) {
            let name = param
                .as_atom()
                .ok_or_else(|| Error::structure("fn parameters must be atoms"))?;
            let value = self.eval(arg)?;
            self.env.push(name, value);
        }
        self.eval(body)
    }

    /// `((def label value) rest...)`: bind `label` to the unevaluated
    /// `value` (so value can refer to itself by name), then evaluate
    /// `(value rest...)` in the extended environment.
    fn apply_def(&mut self, form: &[SExpr], args: &[SExpr]) -> Result<SExpr, Error> {
        let label = form
            .get(1)
            .and_then(SExpr::as_atom)
            .ok_or_else(|| Error::structure("def label must be an atom"))?;
        let value = form
            .get(2)
            .ok_or_else(|| Error::structure("def requires a value"))?;
        tracing::debug!("def binding '{label}'");
        let mut rewritten = Vec::with_capacity(args.len() + 1);
        rewritten.push(value.clone());
        rewritten.extend_from_slice(args);
        let depth = self.env.depth();
        self.env.push(label, value.clone());
        let result = self.eval(&SExpr::list(rewritten));
        self.env.truncate(depth);
        result
    }

    /// Current binding-stack depth, exposed for the environment-unwind
    /// invariant: a failed eval leaves the depth unchanged.
    pub fn env_depth(&self) -> usize {
        self.env.depth()
    }
}
