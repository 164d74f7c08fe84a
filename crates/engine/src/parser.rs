//! Streaming front of the pipeline
//!
//! Records arrive one at a time through [`LogParser::push`]. Nothing is
//! resolved until [`LogParser::finish`], which runs the whole pipeline:
//!
//! 1. stable sort of the records by time
//! 2. agent prepass over the agent table and every record
//! 3. post-processors, the only phase allowed to rewrite identities
//! 4. freeze of the identity model and build of the content table
//! 5. event reconstruction
//! 6. indexing into the event store

use crate::model::LogModel;
use evtc_agents::{AgentData, AgentOverrides, RawAgent};
use evtc_content::{ContentTable, RawSkill, SkillTable};
use evtc_core::{CombatItem, EngineConfig, Error, LogHeader, Result};
use evtc_reconstruct::{LogBounds, Reconstructor, ResolutionContext};
use evtc_storage::EventStore;
use rayon::prelude::*;
use tracing::{debug, info};

/// A pass over the identity model run before it is frozen
///
/// Post-processors see every record (time-sorted) and may override agent
/// descriptions, add merges, sub-identities and masters. Any error aborts
/// the pipeline.
pub trait PostProcessor: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str {
        "post-processor"
    }

    fn process(
        &self,
        agents: &mut AgentOverrides,
        records: &[CombatItem],
        header: &LogHeader,
    ) -> Result<()>;
}

impl<F> PostProcessor for F
where
    F: Fn(&mut AgentOverrides, &[CombatItem], &LogHeader) -> Result<()> + Send + Sync,
{
    fn process(
        &self,
        agents: &mut AgentOverrides,
        records: &[CombatItem],
        header: &LogHeader,
    ) -> Result<()> {
        self(agents, records, header)
    }
}

/// Accumulates one log's records and turns them into a [`LogModel`]
pub struct LogParser {
    header: LogHeader,
    raw_agents: Vec<RawAgent>,
    raw_skills: Vec<RawSkill>,
    config: EngineConfig,
    records: Vec<CombatItem>,
    post_processors: Vec<Box<dyn PostProcessor>>,
    finished: bool,
}

impl LogParser {
    /// Start a log
    ///
    /// # Errors
    ///
    /// `Config` when `config` fails validation.
    pub fn new(
        header: LogHeader,
        raw_agents: Vec<RawAgent>,
        raw_skills: Vec<RawSkill>,
        config: EngineConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            header,
            raw_agents,
            raw_skills,
            config,
            records: Vec::new(),
            post_processors: Vec::new(),
            finished: false,
        })
    }

    /// Register a post-processor; they run in registration order
    pub fn with_post_processor(mut self, processor: impl PostProcessor + 'static) -> Self {
        self.post_processors.push(Box::new(processor));
        self
    }

    pub fn add_post_processor(&mut self, processor: impl PostProcessor + 'static) {
        self.post_processors.push(Box::new(processor));
    }

    pub fn header(&self) -> &LogHeader {
        &self.header
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Records received so far
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Append one decoded record
    ///
    /// # Errors
    ///
    /// `InvalidOperation` once the parser has finished.
    pub fn push(&mut self, record: CombatItem) -> Result<()> {
        if self.finished {
            return Err(Error::invalid_operation(
                "cannot push records into a finished parser",
            ));
        }
        self.records.push(record);
        Ok(())
    }

    /// Append every record of `records`
    pub fn extend(&mut self, records: impl IntoIterator<Item = CombatItem>) -> Result<()> {
        for record in records {
            self.push(record)?;
        }
        Ok(())
    }

    /// Run the pipeline and return the frozen model
    ///
    /// # Errors
    ///
    /// `InvalidOperation` when called twice; any error returned by a
    /// post-processor.
    pub fn finish(&mut self) -> Result<LogModel> {
        if self.finished {
            return Err(Error::invalid_operation("parser already finished"));
        }
        self.finished = true;

        let mut records = std::mem::take(&mut self.records);
        if self.config.parallel {
            records.par_sort_by_key(|r| r.time);
        } else {
            records.sort_by_key(|r| r.time);
        }
        info!(
            target: "evtc::ingest",
            build = self.header.evtc_build,
            records = records.len(),
            agents = self.raw_agents.len(),
            "Finishing log"
        );

        let agents = AgentData::build(&self.raw_agents, &records);
        let mut overrides = agents.into_overrides();
        for processor in &self.post_processors {
            processor.process(&mut overrides, &records, &self.header)?;
            debug!(target: "evtc::ingest", name = processor.name(), "Post-processor applied");
        }
        let agents = overrides.freeze();

        let content = ContentTable::from_records(&records, &self.header);
        let skills = SkillTable::new(&self.raw_skills);
        let bounds = LogBounds::from_records(&records);

        let mut events = {
            let ctx =
                ResolutionContext::new(&agents, &content, &self.header, &self.config, bounds)?;
            Reconstructor::new(ctx).run(&records)
        };
        let info = std::mem::take(&mut events.info);
        let metadata = std::mem::take(&mut events.metadata);
        let store = EventStore::build(events, &agents, self.config.parallel);

        Ok(LogModel {
            header: self.header.clone(),
            config: self.config.clone(),
            bounds,
            agents,
            content,
            skills,
            store,
            info,
            metadata,
        })
    }
}
