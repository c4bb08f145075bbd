//! Analysis passes.

use tracing::debug;

use nativ_ir::Circuit;

use crate::cost::CircuitCost;
use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Records the [`CircuitCost`] of the circuit in the property set.
#[derive(Debug, Clone, Copy, Default)]
pub struct CostAnalysis;

impl Pass for CostAnalysis {
    fn name(&self) -> &'static str {
        "CostAnalysis"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        let cost = CircuitCost::of(circuit);
        debug!("Circuit cost: {}", cost);
        properties.insert(cost);
        Ok(())
    }
}
