//! Two-level minimization with the Quine-McCluskey method.
//!
//! The minimizer works on sets of minterm indices: it extracts all prime implicants of the function,
//! selects the essential ones and completes the cover with a greedy selection.
//! The selected implicants can be rendered as a Sum-of-Products or as a Product-of-Sums.
//!
//! For a Product-of-Sums, callers are expected to provide the *complement* of the function:
//! the indices where it is false. Each selected implicant then becomes a sum term.
//! The minimizer itself is not aware of this convention.

use crate::efmt::{FormatterConfig, Rendered, DEFAULT_FMT_CFG};
use crate::*;

use log::{debug, trace, warn};
use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

/// Shape of a minimized expression
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum Form {
    /// Sum of Products: an OR of AND terms
    #[default]
    Sop,
    /// Product of Sums: an AND of OR terms
    Pos,
}

impl FromStr for Form {
    type Err = QmkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sop" => Ok(Form::Sop),
            "pos" => Ok(Form::Pos),
            _ => Err(QmkitError::InvalidName(s.to_string())),
        }
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Form::Sop => write!(f, "SOP"),
            Form::Pos => write!(f, "POS"),
        }
    }
}

/// Association between required minterms and the prime implicants covering them.
///
/// Implicants are identified by their index in the list of prime implicants.
/// Don't-care terms are not part of the chart.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct PrimeChart {
    rows: BTreeMap<usize, Vec<usize>>,
}

impl PrimeChart {
    pub fn build(primes: &Implicants, minterms: impl IntoIterator<Item = usize>) -> Self {
        let rows = minterms
            .into_iter()
            .map(|m| (m, primes.covering(m)))
            .collect();
        Self { rows }
    }

    /// Indices of the implicants covering a minterm
    pub fn covering(&self, minterm: usize) -> &[usize] {
        self.rows.get(&minterm).map(|v| &v[..]).unwrap_or(&[])
    }

    /// The minterms of the chart, in increasing order
    pub fn minterms(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.keys().copied()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, usize, Vec<usize>> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Implicants which are the only cover of at least one minterm.
    ///
    /// They are listed in the order of the first minterm that makes them essential.
    pub fn essentials(&self) -> Vec<usize> {
        let mut result = Vec::new();
        for covering in self.rows.values() {
            if let [single] = covering[..] {
                if !result.contains(&single) {
                    result.push(single);
                }
            }
        }
        result
    }
}

/// Result of a minimization.
///
/// Carries the intermediate steps (prime implicants, chart, essential implicants)
/// along with the selected cover. The [Display] implementation renders the minimized form.
#[derive(Clone, Default, Debug)]
pub struct Minimized {
    form: Form,
    variables: VarList,
    primes: Implicants,
    chart: PrimeChart,
    essentials: Vec<usize>,
    chosen: Vec<usize>,
    cover: Vec<Implicant>,
    constant: Option<bool>,
}

impl Minimized {
    fn empty(form: Form, vars: &VarList) -> Self {
        Self {
            form,
            variables: vars.clone(),
            ..Self::default()
        }
    }

    /// A result without implicant displayed as a fixed value
    pub(crate) fn constant(form: Form, vars: &VarList, value: bool) -> Self {
        Self {
            constant: Some(value),
            ..Self::empty(form, vars)
        }
    }

    pub fn form(&self) -> Form {
        self.form
    }

    pub fn variables(&self) -> &VarList {
        &self.variables
    }

    /// All prime implicants, in the order they were found
    pub fn primes(&self) -> &Implicants {
        &self.primes
    }

    pub fn chart(&self) -> &PrimeChart {
        &self.chart
    }

    /// Indices of the essential prime implicants
    pub fn essentials(&self) -> &[usize] {
        &self.essentials
    }

    /// Indices of the selected prime implicants: essential ones first, then the greedy picks
    pub fn chosen(&self) -> &[usize] {
        &self.chosen
    }

    /// The selected implicants
    pub fn implicants(&self) -> &[Implicant] {
        &self.cover
    }

    /// Fixed value of the function if it was detected without minimization
    pub fn get_constant(&self) -> Option<bool> {
        self.constant
    }

    /// Render the minimized form with the default notation
    pub fn text(&self) -> String {
        self.to_string()
    }

    /// Wrap this result to display it with a custom notation
    pub fn render<'a>(&'a self, cfg: &'a FormatterConfig) -> Rendered<'a> {
        cfg.render(self.form, &self.variables, &self.cover)
    }
}

impl fmt::Display for Minimized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.constant {
            Some(b) => write!(f, "{}", b as u8),
            None => write!(f, "{}", self.render(&DEFAULT_FMT_CFG)),
        }
    }
}

/// Minimize a function given by its minterms and don't-care terms.
///
/// The width of the implicants is the number of variables.
/// Terms outside of the range of the variables are ignored.
/// No bound is enforced on the number of variables: the cost of the search for prime implicants
/// grows exponentially and callers should limit the size of the input.
///
/// When several implicants cover the same number of remaining minterms, the greedy selection
/// picks the first one in the list of primes. The result is a valid cover,
/// but not necessarily the smallest one.
///
/// ```
/// use qmkit::{minimize, Form, VarList};
/// use std::collections::BTreeSet;
/// # use qmkit::QmkitError;
/// # fn main() -> Result<(), QmkitError> {
///
/// let vars: VarList = "A B C D".parse()?;
/// let minterms = BTreeSet::from([1, 3, 7, 11, 15]);
/// let dontcares = BTreeSet::from([0, 2, 5]);
///
/// let result = minimize(&minterms, &dontcares, &vars, Form::Sop);
/// assert_eq!(result.text(), "CD + A'B'");
/// # Ok(())
/// # }
/// ```
pub fn minimize(
    minterms: &BTreeSet<usize>,
    dontcares: &BTreeSet<usize>,
    vars: &VarList,
    form: Form,
) -> Minimized {
    if minterms.is_empty() && dontcares.is_empty() {
        debug!("nothing to minimize");
        return Minimized::empty(form, vars);
    }

    let width = vars.len();
    let in_range = |m: &usize| {
        let valid = tools::in_range(*m, width);
        if !valid {
            warn!("ignoring term {} outside of {} variables", m, width);
        }
        valid
    };
    let terms: BTreeSet<usize> = minterms.union(dontcares).copied().filter(in_range).collect();
    let required: Vec<usize> = minterms
        .difference(dontcares)
        .copied()
        .filter(|m| tools::in_range(*m, width))
        .collect();

    let primes = prime_implicants(&terms, width);
    let chart = PrimeChart::build(&primes, required);
    let essentials = chart.essentials();
    debug!(
        "{} prime implicants, {} essential, {} minterms to cover",
        primes.len(),
        essentials.len(),
        chart.len()
    );

    let chosen = select_cover(&primes, &chart, &essentials);
    let cover = chosen.iter().map(|idx| primes[*idx].clone()).collect();
    Minimized {
        form,
        variables: vars.clone(),
        primes,
        chart,
        essentials,
        chosen,
        cover,
        constant: None,
    }
}

/// Merge implicants until no pair can be combined.
///
/// Implicants are grouped by number of positive positions, only adjacent groups are compared.
/// Implicants which are never merged in a round are prime.
fn prime_implicants(terms: &BTreeSet<usize>, width: usize) -> Implicants {
    let mut groups: Vec<Vec<Implicant>> = vec![Vec::new(); width + 1];
    for t in terms {
        let imp = Implicant::from_minterm(*t, width);
        groups[imp.ones()].push(imp);
    }

    let mut primes = Implicants::default();
    loop {
        let mut used: Vec<Vec<bool>> = groups.iter().map(|g| vec![false; g.len()]).collect();
        let mut next = vec![Implicants::default(); groups.len().saturating_sub(1)];
        let mut merged = false;

        for (k, pair) in groups.windows(2).enumerate() {
            for (i, a) in pair[0].iter().enumerate() {
                for (j, b) in pair[1].iter().enumerate() {
                    if let Some(c) = a.combine(b) {
                        trace!("combine {} and {} into {}", a, b, c);
                        used[k][i] = true;
                        used[k + 1][j] = true;
                        next[k].push_new(c);
                        merged = true;
                    }
                }
            }
        }

        for (group, flags) in groups.iter().zip(&used) {
            for (imp, is_used) in group.iter().zip(flags) {
                if !is_used {
                    primes.push_new(imp.clone());
                }
            }
        }

        if !merged {
            return primes;
        }
        groups = next.into_iter().map(|g| g.into_iter().collect()).collect();
    }
}

/// Complete the essential implicants with a greedy selection until all minterms of the chart are covered.
fn select_cover(primes: &Implicants, chart: &PrimeChart, essentials: &[usize]) -> Vec<usize> {
    let mut chosen = essentials.to_vec();
    let mut uncovered: Vec<usize> = chart
        .minterms()
        .filter(|m| !chosen.iter().any(|idx| primes[*idx].covers(*m)))
        .collect();

    while !uncovered.is_empty() {
        let mut best: Option<(usize, usize)> = None;
        for (idx, p) in primes.iter().enumerate() {
            if chosen.contains(&idx) {
                continue;
            }
            let count = uncovered.iter().filter(|m| p.covers(**m)).count();
            if count > best.map_or(0, |(_, c)| c) {
                best = Some((idx, count));
            }
        }

        match best {
            None => {
                warn!("{} minterms can not be covered", uncovered.len());
                break;
            }
            Some((idx, count)) => {
                debug!("greedy pick {} covering {} minterms", primes[idx], count);
                chosen.push(idx);
                uncovered.retain(|m| !primes[idx].covers(*m));
            }
        }
    }
    chosen
}

#[cfg(test)]
mod tests {
    use crate::*;
    use std::collections::BTreeSet;
    use test_log::test;

    fn set(terms: &[usize]) -> BTreeSet<usize> {
        terms.iter().copied().collect()
    }

    fn patterns(m: &Minimized) -> Vec<String> {
        m.implicants().iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn tautology() -> Result<(), QmkitError> {
        let vars: VarList = "A B".parse()?;
        let m = minimize(&set(&[0, 1, 2, 3]), &set(&[]), &vars, Form::Sop);
        assert_eq!(patterns(&m), ["--"]);
        assert_eq!(m.text(), "1");
        Ok(())
    }

    #[test]
    fn product_of_sums() -> Result<(), QmkitError> {
        let vars: VarList = "A B".parse()?;
        let m = minimize(&set(&[0, 3]), &set(&[]), &vars, Form::Pos);
        assert_eq!(patterns(&m), ["00", "11"]);
        assert_eq!(m.text(), "(A + B)(A' + B')");
        assert_eq!(m.essentials(), [0, 1]);
        Ok(())
    }

    #[test]
    fn empty_input() {
        let vars = VarList::default();
        let sop = minimize(&set(&[]), &set(&[]), &vars, Form::Sop);
        assert_eq!(sop.text(), "0");
        assert!(sop.implicants().is_empty());
        let pos = minimize(&set(&[]), &set(&[]), &vars, Form::Pos);
        assert_eq!(pos.text(), "1");
    }

    #[test]
    fn only_dontcares() -> Result<(), QmkitError> {
        let vars: VarList = "A B".parse()?;
        let m = minimize(&set(&[]), &set(&[1, 3]), &vars, Form::Sop);
        assert_eq!(m.primes().len(), 1);
        assert!(m.implicants().is_empty());
        assert_eq!(m.text(), "0");
        Ok(())
    }

    #[test]
    fn dontcares_extend_groups() -> Result<(), QmkitError> {
        let vars: VarList = "A B C D".parse()?;
        let m = minimize(&set(&[1, 3, 7, 11, 15]), &set(&[0, 2, 5]), &vars, Form::Sop);
        let primes: Vec<String> = m.primes().iter().map(|p| p.to_string()).collect();
        assert_eq!(primes, ["00--", "0--1", "--11"]);
        assert_eq!(m.essentials(), [2]);
        assert_eq!(m.chosen(), [2, 0]);
        assert_eq!(m.text(), "CD + A'B'");
        assert!(m.chart().covering(0).is_empty());
        assert_eq!(m.chart().covering(3), [0, 1, 2]);
        Ok(())
    }

    #[test]
    fn cyclic_chart_uses_first_best() -> Result<(), QmkitError> {
        let vars: VarList = "A B C".parse()?;
        let m = minimize(&set(&[0, 1, 2, 5, 6, 7]), &set(&[]), &vars, Form::Sop);
        let primes: Vec<String> = m.primes().iter().map(|p| p.to_string()).collect();
        assert_eq!(primes, ["00-", "0-0", "-01", "-10", "1-1", "11-"]);
        assert!(m.essentials().is_empty());
        assert_eq!(m.chosen(), [0, 3, 4]);
        assert_eq!(m.text(), "A'B' + BC' + AC");
        Ok(())
    }

    #[test]
    fn single_variable() -> Result<(), QmkitError> {
        let vars: VarList = "A B C".parse()?;
        let m = minimize(&set(&[4, 5, 6, 7]), &set(&[]), &vars, Form::Sop);
        assert_eq!(m.text(), "A");
        let m = minimize(&set(&[0, 2, 4, 6]), &set(&[]), &vars, Form::Pos);
        assert_eq!(m.text(), "(C)");
        Ok(())
    }

    #[test]
    fn out_of_range_terms() -> Result<(), QmkitError> {
        let vars: VarList = "A B".parse()?;
        let m = minimize(&set(&[3, 9]), &set(&[]), &vars, Form::Sop);
        assert_eq!(m.text(), "AB");
        Ok(())
    }

    #[test]
    fn custom_notation() -> Result<(), QmkitError> {
        let vars: VarList = "A B C".parse()?;
        let m = minimize(&set(&[1, 3, 4, 5, 7]), &set(&[]), &vars, Form::Sop);
        assert_eq!(m.text(), "C + AB'");
        assert_eq!(m.render(&efmt::OPERATOR_FMT_CFG).to_string(), "C | A & !B");
        Ok(())
    }

    #[test]
    fn form_names() -> Result<(), QmkitError> {
        assert_eq!("sop".parse::<Form>()?, Form::Sop);
        assert_eq!(" POS ".parse::<Form>()?, Form::Pos);
        assert!("dnf".parse::<Form>().is_err());
        assert_eq!(Form::Pos.to_string(), "POS");
        Ok(())
    }
}
