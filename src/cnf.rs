//! Conjunctive-normal-form clause storage and DIMACS interop.
//!
//! A [`Clause`] is an ordered sequence of non-zero signed literals
//! (positive = variable asserted, negative = negated). The empty clause
//! is permitted only as an explicit UNSAT signal raised during encoding.

/// A single disjunction of literals.
pub type Clause = Vec<i32>;

/// The clause list produced by the encoder, read-only once solving starts.
#[derive(Debug, Default, Clone)]
pub struct Cnf {
    pub clauses: Vec<Clause>,
    num_vars: u32,
}

impl Cnf {
    pub fn new(num_vars: u32) -> Self {
        Self {
            clauses: Vec::new(),
            num_vars,
        }
    }

    pub fn add(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }

    /// Updates the declared variable count, e.g. after allocating more
    /// variables in the pool than were known when the `Cnf` was created.
    pub fn set_num_vars(&mut self, n: u32) {
        self.num_vars = n;
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn avg_clause_length(&self) -> f64 {
        if self.clauses.is_empty() {
            return 0.0;
        }
        let total: usize = self.clauses.iter().map(|c| c.len()).sum();
        total as f64 / self.clauses.len() as f64
    }

    /// Renders the instance in DIMACS `p cnf <vars> <clauses>` form.
    ///
    /// Debugging/interop surface only — never called on the solve path.
    pub fn to_dimacs(&self) -> String {
        let mut out = format!("p cnf {} {}\n", self.num_vars, self.clauses.len());
        for clause in &self.clauses {
            for lit in clause {
                out.push_str(&lit.to_string());
                out.push(' ');
            }
            out.push_str("0\n");
        }
        out
    }

    /// Parses a DIMACS `p cnf <vars> <clauses>` document. Comment lines
    /// (`c ...`) are skipped; the `p cnf` header's counts are trusted for
    /// `num_vars` but not for the clause count (we just read until EOF).
    pub fn from_dimacs(text: &str) -> Self {
        let mut num_vars = 0u32;
        let mut clauses = Vec::new();
        let mut pending: Clause = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('c') {
                continue;
            }
            if let Some(rest) = line.strip_prefix("p cnf") {
                let mut parts = rest.split_whitespace();
                num_vars = parts.next().and_then(|s| s.parse().ok()).unwrap_or(0);
                continue;
            }
            for tok in line.split_whitespace() {
                let lit: i32 = match tok.parse() {
                    Ok(v) => v,
                    Err(_) => continue,
                };
                if lit == 0 {
                    clauses.push(std::mem::take(&mut pending));
                } else {
                    pending.push(lit);
                }
            }
        }
        if !pending.is_empty() {
            clauses.push(pending);
        }
        Self { clauses, num_vars }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimacs_roundtrip() {
        let mut cnf = Cnf::new(3);
        cnf.add(vec![1, -2]);
        cnf.add(vec![2, 3, -1]);
        let text = cnf.to_dimacs();
        let back = Cnf::from_dimacs(&text);
        assert_eq!(back.clauses, cnf.clauses);
        assert_eq!(back.num_vars(), cnf.num_vars());
    }

    #[test]
    fn avg_clause_length() {
        let mut cnf = Cnf::new(2);
        cnf.add(vec![1]);
        cnf.add(vec![1, 2]);
        assert_eq!(cnf.avg_clause_length(), 1.5);
    }
}
