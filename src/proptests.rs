//! Property-based tests for the parser and the minimizer.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    use crate::*;

    const NAMES: [char; 3] = ['A', 'B', 'C'];

    /// Fully parenthesized expression with a reference evaluation
    #[derive(Clone, Debug)]
    enum Ast {
        Const(bool),
        Var(usize),
        Complement(usize),
        Not(Box<Ast>),
        And(Box<Ast>, Box<Ast>),
        Juxt(Box<Ast>, Box<Ast>),
        Or(Box<Ast>, Box<Ast>),
        Xor(Box<Ast>, Box<Ast>),
    }

    impl Ast {
        fn text(&self) -> String {
            match self {
                Ast::Const(b) => format!("{}", *b as u8),
                Ast::Var(v) => NAMES[*v].to_string(),
                Ast::Complement(v) => format!("{}'", NAMES[*v]),
                Ast::Not(a) => format!("!({})", a.text()),
                Ast::And(a, b) => format!("({}) * ({})", a.text(), b.text()),
                Ast::Juxt(a, b) => format!("({})({})", a.text(), b.text()),
                Ast::Or(a, b) => format!("({}) + ({})", a.text(), b.text()),
                Ast::Xor(a, b) => format!("({}) ^ ({})", a.text(), b.text()),
            }
        }

        fn eval(&self, values: &[bool]) -> bool {
            match self {
                Ast::Const(b) => *b,
                Ast::Var(v) => values[*v],
                Ast::Complement(v) => !values[*v],
                Ast::Not(a) => !a.eval(values),
                Ast::And(a, b) | Ast::Juxt(a, b) => a.eval(values) && b.eval(values),
                Ast::Or(a, b) => a.eval(values) || b.eval(values),
                Ast::Xor(a, b) => a.eval(values) ^ b.eval(values),
            }
        }
    }

    fn ast() -> impl Strategy<Value = Ast> {
        let leaf = prop_oneof![
            any::<bool>().prop_map(Ast::Const),
            (0..NAMES.len()).prop_map(Ast::Var),
            (0..NAMES.len()).prop_map(Ast::Complement),
        ];
        leaf.prop_recursive(4, 24, 2, |inner| {
            prop_oneof![
                inner.clone().prop_map(|a| Ast::Not(Box::new(a))),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| Ast::And(Box::new(a), Box::new(b))),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| Ast::Juxt(Box::new(a), Box::new(b))),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| Ast::Or(Box::new(a), Box::new(b))),
                (inner.clone(), inner).prop_map(|(a, b)| Ast::Xor(Box::new(a), Box::new(b))),
            ]
        })
    }

    // Cell values of a function of 1 to 4 variables: 0, 1 or 2 for don't-care
    fn cells() -> impl Strategy<Value = Vec<u8>> {
        (1usize..=4).prop_flat_map(|n| proptest::collection::vec(0u8..3, 1 << n))
    }

    fn select(cells: &[u8], value: u8) -> BTreeSet<usize> {
        cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == value)
            .map(|(idx, _)| idx)
            .collect()
    }

    fn width(cells: &[u8]) -> usize {
        cells.len().trailing_zeros() as usize
    }

    /// Evaluate a minimized form on all assignments of the variables
    fn outputs(text: &str, vars: &VarList) -> Vec<bool> {
        let expr = parse_expression(text).unwrap();
        build_truth_table(vars, Some(&expr))
            .unwrap()
            .iter()
            .map(|row| row.output)
            .collect()
    }

    /// Check that a function agrees with the cells, ignoring don't-care cells
    fn agrees(cells: &[u8], outputs: &[bool]) -> bool {
        cells
            .iter()
            .zip(outputs)
            .all(|(c, o)| *c == 2 || (*c == 1) == *o)
    }

    proptest! {
        #[test]
        fn parser_agrees_with_reference(expr in ast()) {
            let parsed = parse_expression(&expr.text()).unwrap();
            for idx in 0..8 {
                let values: Vec<bool> = (0..3).map(|pos| tools::bit_at(idx, 3, pos)).collect();
                let env = NAMES.iter().copied().zip(values.iter().copied()).collect();
                prop_assert_eq!(parsed.evaluate(&env), Ok(expr.eval(&values)));
            }
        }

        #[test]
        fn sum_of_products_matches_cells(cells in cells()) {
            let vars = VarList::alphabetic(width(&cells)).unwrap();
            let result = minimize(&select(&cells, 1), &select(&cells, 2), &vars, Form::Sop);
            let out = outputs(&result.text(), &vars);
            prop_assert!(agrees(&cells, &out), "{} does not match {:?}", result, cells);
        }

        #[test]
        fn product_of_sums_matches_cells(cells in cells()) {
            let minterms = select(&cells, 1);
            prop_assume!(!minterms.is_empty());

            let vars = VarList::alphabetic(width(&cells)).unwrap();
            let result = minimize(&select(&cells, 0), &select(&cells, 2), &vars, Form::Pos);
            let out = outputs(&result.text(), &vars);
            prop_assert!(agrees(&cells, &out), "{} does not match {:?}", result, cells);
        }

        #[test]
        fn cover_is_made_of_primes(cells in cells()) {
            let vars = VarList::alphabetic(width(&cells)).unwrap();
            let minterms = select(&cells, 1);
            let dontcares = select(&cells, 2);
            let result = minimize(&minterms, &dontcares, &vars, Form::Sop);

            for idx in result.essentials() {
                prop_assert!(result.chosen().contains(idx));
            }
            for imp in result.implicants() {
                prop_assert!(result.primes().contains(imp));
                for m in imp.covered_terms() {
                    prop_assert!(minterms.contains(&m) || dontcares.contains(&m));
                }
            }
        }

        #[test]
        fn minimization_is_idempotent(cells in cells()) {
            let vars = VarList::alphabetic(width(&cells)).unwrap();
            let first = minimize(&select(&cells, 1), &select(&cells, 2), &vars, Form::Sop);

            let table = build_truth_table(&vars, Some(&parse_expression(&first.text()).unwrap())).unwrap();
            let second = minimize(&table.minterms(), &BTreeSet::new(), &vars, Form::Sop);
            let third = minimize(&table.minterms(), &BTreeSet::new(), &vars, Form::Sop);
            prop_assert_eq!(outputs(&second.text(), &vars), outputs(&first.text(), &vars));
            prop_assert_eq!(second.text(), third.text());
        }
    }

    #[test]
    fn exhaustive_round_trip() {
        for n in 1..=3 {
            let vars = VarList::alphabetic(n).unwrap();
            let size = 1 << n;
            for function in 0..(1usize << size) {
                let cells: Vec<u8> = (0..size).map(|idx| (function >> idx & 1) as u8).collect();

                let sop = minimize(&select(&cells, 1), &BTreeSet::new(), &vars, Form::Sop);
                assert!(agrees(&cells, &outputs(&sop.text(), &vars)), "SOP {} for {:?}", sop, cells);

                if function != 0 {
                    let pos = minimize(&select(&cells, 0), &BTreeSet::new(), &vars, Form::Pos);
                    assert!(agrees(&cells, &outputs(&pos.text(), &vars)), "POS {} for {:?}", pos, cells);
                }
            }
        }
    }
}
