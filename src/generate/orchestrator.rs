//! Top-down menu generation: root -> main -> middle -> leaf actions.
//!
//! Every pass re-scans the full record list, filtered to the path chosen so
//! far. Documents are planned first (children before their parent) and only
//! then handed to the store, so a malformed address never leaves partial
//! output behind.

use crate::config::{GeneratorConfig, LinkPolicy, UnknownDatapointPolicy};
use crate::error::Result;
use crate::generate::check::{DanglingLink, check_links};
use crate::input::{AddressRecord, DatapointType, GroupAddress};
use crate::model::aggregate::is_under;
use crate::model::datapoint::describe;
use crate::model::{
    DocRef, GeneratedDocument, Level, PathStep, actions_for, action_url, aggregate,
    aggregate_under, build_actions, build_menu,
};
use crate::store::DocumentStore;
use indexmap::IndexMap;
use tracing::{debug, info, warn};

/// Outcome of resolving one leaf's actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionScan {
    /// label -> action URL, overwrite on duplicate label.
    Complete(IndexMap<String, String>),
    /// A record on this leaf has a datapoint type without actions.
    Aborted { datapoint: DatapointType },
}

/// Documents in store order plus what happened while building them.
#[derive(Debug, Clone, Default)]
pub struct Plan {
    pub documents: Vec<(DocRef, GeneratedDocument)>,
    pub stats: GenerationStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationStats {
    pub leaves: usize,
    /// Leaves listed in a menu without an action document of their own.
    pub leaves_without_actions: usize,
    /// Middle-level scans whose leaf documents were all dropped.
    pub cancelled_scans: usize,
    /// Leaves dropped individually for an unknown datapoint type.
    pub skipped_leaves: usize,
}

#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub documents_stored: usize,
    pub stats: GenerationStats,
    pub dangling: Vec<DanglingLink>,
}

pub struct Generator<'a> {
    config: &'a GeneratorConfig,
    records: &'a [AddressRecord],
}

impl<'a> Generator<'a> {
    /// Validates every address up front.
    pub fn new(config: &'a GeneratorConfig, records: &'a [AddressRecord]) -> Result<Self> {
        for record in records {
            record.segments()?;
        }
        Ok(Self { config, records })
    }

    /// Plan all documents, check links, then store them in order.
    pub fn run(&self, store: &mut dyn DocumentStore) -> Result<GenerationReport> {
        info!("generating menus for {} address records", self.records.len());
        let plan = self.plan()?;

        let dangling = check_links(&plan.documents);
        for link in &dangling {
            warn!(
                "menu {} links {:?} to {}, which is not generated",
                link.from, link.label, link.to
            );
        }

        for (reference, document) in &plan.documents {
            store.store(reference, document)?;
            debug!("stored {} ({} entries)", reference, document.entries.len());
        }

        info!(
            "stored {} documents ({} leaves, {} without actions, {} cancelled scans, {} skipped leaves)",
            plan.documents.len(),
            plan.stats.leaves,
            plan.stats.leaves_without_actions,
            plan.stats.cancelled_scans,
            plan.stats.skipped_leaves
        );

        Ok(GenerationReport {
            documents_stored: plan.documents.len(),
            stats: plan.stats,
            dangling,
        })
    }

    /// Build every document without storing anything.
    pub fn plan(&self) -> Result<Plan> {
        let mut plan = Plan::default();

        let mains = aggregate(self.records, Level::Main)?;
        let mut entries = Vec::with_capacity(mains.len());
        for (main, main_name) in &mains {
            let step = PathStep::new(main, main_name);
            self.plan_main(&step, &mut plan)?;
            entries.push((main_name.clone(), DocRef::Main(main.clone())));
        }

        let root = DocRef::Root(self.config.master_name.clone());
        plan.documents
            .push((root, build_menu(&self.config.root_title, entries)));
        Ok(plan)
    }

    fn plan_main(&self, main: &PathStep, plan: &mut Plan) -> Result<()> {
        let path = [main.clone()];
        let middles = aggregate_under(self.records, Level::Middle, &path)?;

        let mut entries = Vec::with_capacity(middles.len());
        for (middle, middle_name) in &middles {
            let step = PathStep::new(middle, middle_name);
            self.plan_middle(main, &step, plan)?;
            entries.push((
                middle_name.clone(),
                DocRef::Middle(main.segment.clone(), middle.clone()),
            ));
        }

        plan.documents.push((
            DocRef::Main(main.segment.clone()),
            build_menu(&main.name, entries),
        ));
        Ok(())
    }

    fn plan_middle(&self, main: &PathStep, middle: &PathStep, plan: &mut Plan) -> Result<()> {
        let path = [main.clone(), middle.clone()];
        let subs = aggregate_under(self.records, Level::Sub, &path)?;
        plan.stats.leaves += subs.len();

        // Resolve leaves in order. Under CancelScan the first unknown
        // datapoint type discards everything collected for this scan.
        let mut leaf_docs: IndexMap<String, GeneratedDocument> = IndexMap::new();
        for (sub, sub_name) in &subs {
            let leaf_path = [main.clone(), middle.clone(), PathStep::new(sub, sub_name)];
            match self.resolve_actions(&leaf_path)? {
                ActionScan::Complete(actions) => {
                    if let Some(doc) = build_actions(sub_name, actions) {
                        leaf_docs.insert(sub.clone(), doc);
                    }
                }
                ActionScan::Aborted { datapoint } => match self.config.unknown_datapoint {
                    UnknownDatapointPolicy::CancelScan => {
                        warn!(
                            "{}/{}/{} ({}) has datapoint type {} without actions; \
                             dropping all leaf documents of {}/{}",
                            main.segment,
                            middle.segment,
                            sub,
                            sub_name,
                            describe(datapoint.main, datapoint.sub),
                            main.segment,
                            middle.segment
                        );
                        plan.stats.cancelled_scans += 1;
                        leaf_docs.clear();
                        break;
                    }
                    UnknownDatapointPolicy::SkipLeaf => {
                        warn!(
                            "{}/{}/{} ({}) has datapoint type {} without actions; skipping leaf",
                            main.segment,
                            middle.segment,
                            sub,
                            sub_name,
                            describe(datapoint.main, datapoint.sub)
                        );
                        plan.stats.skipped_leaves += 1;
                    }
                },
            }
        }
        plan.stats.leaves_without_actions += subs.len() - leaf_docs.len();

        let mut entries = Vec::with_capacity(subs.len());
        for (sub, sub_name) in &subs {
            let built = leaf_docs.contains_key(sub);
            if built || self.config.links == LinkPolicy::Always {
                entries.push((
                    sub_name.clone(),
                    DocRef::Leaf(main.segment.clone(), middle.segment.clone(), sub.clone()),
                ));
            }
        }

        for (sub, doc) in leaf_docs {
            plan.documents.push((
                DocRef::Leaf(main.segment.clone(), middle.segment.clone(), sub),
                doc,
            ));
        }
        plan.documents.push((
            DocRef::Middle(main.segment.clone(), middle.segment.clone()),
            build_menu(&middle.name, entries),
        ));
        Ok(())
    }

    /// Collect the actions of every record on this exact leaf path.
    pub fn resolve_actions(&self, leaf_path: &[PathStep; 3]) -> Result<ActionScan> {
        let address = GroupAddress {
            main: leaf_path[0].segment.clone(),
            middle: leaf_path[1].segment.clone(),
            sub: leaf_path[2].segment.clone(),
        };

        let mut actions = IndexMap::new();
        for record in self.records {
            if !is_under(record, leaf_path)? {
                continue;
            }
            let Some(datapoint) = record.datapoint_type else {
                continue;
            };
            let Some(found) = datapoint.main.and_then(actions_for) else {
                return Ok(ActionScan::Aborted { datapoint });
            };
            for action in found {
                actions.insert(
                    action.label.to_string(),
                    action_url(&self.config.action_http_root, &address, action.suffix),
                );
            }
        }
        Ok(ActionScan::Complete(actions))
    }
}
