use crate::data::DesignTables;
use crate::engines::evaluation::MechanicalAnalyzer;
use crate::engines::metrics::FitnessOracle;
use crate::error::Result;
use crate::population::Member;
use rayon::prelude::*;

/// Mechanical analysis followed by fitness evaluation, over many members at once.
pub struct PopulationEvaluator<'a> {
    tables: &'a DesignTables,
    analyzer: MechanicalAnalyzer<'a>,
    oracle: FitnessOracle,
    parallel: bool,
}

impl<'a> PopulationEvaluator<'a> {
    pub fn new(tables: &'a DesignTables, oracle: FitnessOracle, parallel: bool) -> Self {
        Self {
            tables,
            analyzer: MechanicalAnalyzer::new(tables),
            oracle,
            parallel,
        }
    }

    pub fn oracle(&self) -> &FitnessOracle {
        &self.oracle
    }

    /// Define and evaluate one member. Already defined/evaluated members are left as they are.
    pub fn evaluate_member(&self, member: &mut Member) -> Result<f64> {
        self.analyzer.define(member)?;
        self.oracle.evaluate_member(member, self.tables)
    }

    /// Evaluate every member, on the rayon pool when enabled. Members share nothing but the
    /// read-only tables.
    pub fn evaluate(&self, members: &mut [Member]) -> Result<()> {
        if self.parallel {
            members
                .par_iter_mut()
                .try_for_each(|member| self.evaluate_member(member).map(|_| ()))
        } else {
            members
                .iter_mut()
                .try_for_each(|member| self.evaluate_member(member).map(|_| ()))
        }
    }
}
