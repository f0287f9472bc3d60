//! Plan generation pipeline.
//!
//! student record -> resource matcher -> renderer -> optional snippet section.

use std::sync::Arc;
use tracing::{debug, info};

use navigator_abstraction::SnippetSource;
use navigator_models::GoogleSearchClient;

use crate::config::NavigatorConfig;
use crate::enrichment::{append_snippets, enrich, snippet_query};
use crate::error::{CoreError, Result};
use crate::matcher::ResourceMatcher;
use crate::renderer::{LearningPlan, render_plan};
use crate::standard::StandardChoice;
use crate::student::{StudentEntry, StudentRecord};
use crate::table_source::DirectoryTableSource;

/// Width of the rule printed under a `Plan {n}` header.
pub const PLAN_RULE_WIDTH: usize = 20;

/// Produces learning plans from student data.
#[derive(Clone)]
pub struct PlanPipeline {
    matcher: ResourceMatcher,
    snippets: Option<Arc<dyn SnippetSource>>,
    max_snippets: usize,
}

impl PlanPipeline {
    /// Creates a pipeline without enrichment.
    pub fn new(matcher: ResourceMatcher) -> Self {
        Self { matcher, snippets: None, max_snippets: 0 }
    }

    /// Enables enrichment through `source`, keeping at most `max_snippets`.
    #[must_use]
    pub fn with_snippets(mut self, source: Arc<dyn SnippetSource>, max_snippets: usize) -> Self {
        self.snippets = Some(source);
        self.max_snippets = max_snippets;
        self
    }

    /// Builds a pipeline from configuration.
    ///
    /// Tables are read from the configured reference directory. With
    /// `enrich` set, snippets come from Google Custom Search.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] if the search client cannot be built.
    pub fn from_config(config: &NavigatorConfig, enrich: bool) -> Result<Self> {
        let source = DirectoryTableSource::new(config.reference_dir());
        debug!(reference_dir = %source.root().display(), "Using reference directory");

        let pipeline = Self::new(ResourceMatcher::new(Arc::new(source)));
        if !enrich {
            return Ok(pipeline);
        }

        let client = GoogleSearchClient::new(config.search.clone())
            .map_err(|e| CoreError::Config(e.to_string()))?;
        Ok(pipeline.with_snippets(Arc::new(client), config.search.max_snippets()))
    }

    /// Returns `true` if enrichment is enabled.
    pub fn enriches(&self) -> bool {
        self.snippets.is_some()
    }

    /// Renders the plan for one student, without enrichment.
    pub fn generate(&self, student: &StudentRecord, standard: StandardChoice) -> LearningPlan {
        let resources = self.matcher.select(&student.grade, student.score);
        render_plan(student, standard, &resources)
    }

    /// Renders the plan for one student, with enrichment when enabled.
    pub async fn build_plan(&self, student: &StudentRecord, standard: StandardChoice) -> LearningPlan {
        let plan = self.generate(student, standard);

        let Some(ref source) = self.snippets else {
            return plan;
        };

        let query = snippet_query(student);
        let snippets = enrich(source.as_ref(), &query, self.max_snippets).await;
        append_snippets(plan, &snippets)
    }

    /// Renders the plan described by a data file entry.
    pub async fn build_entry(&self, entry: &StudentEntry) -> LearningPlan {
        self.build_plan(&entry.to_record(), entry.standard).await
    }

    /// Renders every entry of a document.
    ///
    /// A single entry yields its plan unchanged; several are each preceded
    /// by a `Plan {n}` header and a rule.
    pub async fn build_document(&self, entries: &[StudentEntry]) -> String {
        info!(records = entries.len(), "Generating plans");

        if let [entry] = entries {
            return self.build_entry(entry).await.into_string();
        }

        let mut sections = Vec::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            let plan = self.build_entry(entry).await;
            sections.push(numbered_section(idx + 1, plan.as_str()));
        }
        sections.join("\n")
    }
}

impl std::fmt::Debug for PlanPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanPipeline")
            .field("matcher", &self.matcher)
            .field("snippets", &self.snippets.as_ref().map(|_| "<snippet source>"))
            .field("max_snippets", &self.max_snippets)
            .finish()
    }
}

/// Formats `body` under a `Plan {n}` header and a dashed rule.
pub fn numbered_section(number: usize, body: &str) -> String {
    format!("Plan {}\n{}\n{}\n", number, "-".repeat(PLAN_RULE_WIDTH), body)
}
