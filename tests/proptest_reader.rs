use proptest::prelude::*;
use symex::{SExpr, read};

// ============================================================================
// Strategies for Generating Expressions
// ============================================================================

/// Atom tokens: any run of non-whitespace, non-parenthesis characters.
/// Digits and operator punctuation are deliberately included, since the
/// language does not distinguish them from names.
fn atom_name() -> impl Strategy<Value = String> {
    "[a-z0-9+*!?-]{1,8}"
}

fn sexpr() -> impl Strategy<Value = SExpr> {
    let leaf = atom_name().prop_map(|name| SExpr::atom(&name));
    leaf.prop_recursive(4, 32, 6, |inner| {
        prop::collection::vec(inner, 0..6).prop_map(SExpr::list)
    })
}

/// Whitespace runs used to perturb the rendered form.
fn padding() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(" ".to_string()),
        Just("  ".to_string()),
        Just("\t".to_string()),
        Just(" \n ".to_string()),
    ]
}

/// Render with `pad` between every token instead of single spaces.
fn render_padded(expr: &SExpr, pad: &str, out: &mut String) {
    match expr {
        SExpr::Atom(atom) => out.push_str(&atom.to_string()),
        SExpr::List(elements) => {
            out.push('(');
            out.push_str(pad);
            for element in elements.iter() {
                render_padded(element, pad, out);
                out.push_str(pad);
            }
            out.push(')');
        }
    }
}

// ============================================================================
// Round-Trip Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn read_of_rendering_round_trips(expr in sexpr()) {
        let source = expr.to_string();
        let parsed = read(&source).unwrap();
        prop_assert_eq!(parsed.len(), 1);
        prop_assert_eq!(&parsed[0], &expr);
        // rendering is canonical: a second trip changes nothing
        prop_assert_eq!(parsed[0].to_string(), source);
    }

    #[test]
    fn whitespace_perturbation_does_not_change_the_parse(
        expr in sexpr(),
        pad in padding(),
    ) {
        let mut loose = String::new();
        render_padded(&expr, &pad, &mut loose);
        let parsed = read(&loose).unwrap();
        prop_assert_eq!(parsed.len(), 1);
        prop_assert_eq!(&parsed[0], &expr);
    }

    #[test]
    fn top_level_sequences_keep_their_order(exprs in prop::collection::vec(sexpr(), 1..5)) {
        let source = exprs
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let parsed = read(&source).unwrap();
        prop_assert_eq!(&parsed, &exprs);
    }

    #[test]
    fn atom_tokens_always_read_back(name in atom_name()) {
        let parsed = read(&name).unwrap();
        prop_assert_eq!(parsed.len(), 1);
        prop_assert_eq!(parsed[0].to_string(), name);
    }
}
