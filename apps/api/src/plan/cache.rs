use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::assessment::score_model::Assessment;
use crate::plan::deriver::{derive_improvement_plan, PlanPolicy};
use crate::plan::model::ImprovementPlan;

enum PlanSlot {
    Generating,
    Generated(Arc<ImprovementPlan>),
}

/// Observable state of a fingerprint's slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanState {
    Absent,
    Generating,
    Generated,
}

/// Plans keyed by assessment fingerprint, shared by every profile.
///
/// A slot only ever holds a finished plan or a `Generating` marker; a
/// derivation that never finishes leaves the marker, which later callers
/// treat as a miss.
pub struct PlanCache {
    policy: PlanPolicy,
    slots: Mutex<HashMap<String, PlanSlot>>,
}

impl PlanCache {
    pub fn new(policy: PlanPolicy) -> Self {
        Self {
            policy,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn state(&self, fingerprint: &str) -> PlanState {
        match self.slots.lock().get(fingerprint) {
            None => PlanState::Absent,
            Some(PlanSlot::Generating) => PlanState::Generating,
            Some(PlanSlot::Generated(_)) => PlanState::Generated,
        }
    }

    pub fn is_generated(&self, fingerprint: &str) -> bool {
        self.state(fingerprint) == PlanState::Generated
    }

    /// Returns the cached plan for `assessment`, deriving it on a miss.
    pub fn derive_plan(&self, assessment: &Assessment) -> Arc<ImprovementPlan> {
        let fingerprint = assessment.fingerprint();
        {
            let mut slots = self.slots.lock();
            if let Some(PlanSlot::Generated(plan)) = slots.get(&fingerprint) {
                debug!("Plan cache hit: {fingerprint}");
                return Arc::clone(plan);
            }
            slots.insert(fingerprint.clone(), PlanSlot::Generating);
        }
        self.generate(fingerprint, assessment)
    }

    /// Derives a fresh plan even if one is cached.
    pub fn regenerate(&self, assessment: &Assessment) -> Arc<ImprovementPlan> {
        let fingerprint = assessment.fingerprint();
        self.slots
            .lock()
            .insert(fingerprint.clone(), PlanSlot::Generating);
        info!("Regenerating plan: {fingerprint}");
        self.generate(fingerprint, assessment)
    }

    /// Drops the slot for `fingerprint`. Returns whether one existed.
    pub fn invalidate(&self, fingerprint: &str) -> bool {
        let removed = self.slots.lock().remove(fingerprint).is_some();
        if removed {
            debug!("Plan cache invalidated: {fingerprint}");
        }
        removed
    }

    fn generate(&self, fingerprint: String, assessment: &Assessment) -> Arc<ImprovementPlan> {
        let plan = Arc::new(derive_improvement_plan(assessment, &self.policy));
        self.slots
            .lock()
            .insert(fingerprint, PlanSlot::Generated(Arc::clone(&plan)));
        plan
    }
}
