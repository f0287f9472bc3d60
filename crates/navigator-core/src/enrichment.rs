//! Optional snippet enrichment.
//!
//! Enrichment never fails a plan: any error from the snippet source is logged
//! and treated as "no snippets".

use tracing::{debug, warn};

use navigator_abstraction::SnippetSource;

use crate::renderer::LearningPlan;
use crate::student::StudentRecord;

/// Heading placed before appended snippets.
pub const SNIPPETS_HEADING: &str = "🔍 Search Snippets";

/// Builds the search query for a student: `"{grade} grade {goal_areas}"`, trimmed.
pub fn snippet_query(student: &StudentRecord) -> String {
    format!("{} grade {}", student.grade, student.goal_areas)
        .trim()
        .to_string()
}

/// Fetches up to `max_snippets` snippets for `query`, joined by newlines.
///
/// Returns an empty string when the source fails or yields nothing.
pub async fn enrich(source: &dyn SnippetSource, query: &str, max_snippets: usize) -> String {
    match source.fetch(query).await {
        Ok(snippets) => {
            let kept: Vec<String> = snippets.into_iter().take(max_snippets).collect();
            debug!(query = %query, count = kept.len(), "Enrichment snippets collected");
            kept.join("\n")
        }
        Err(e) => {
            warn!(query = %query, error = %e, "Snippet enrichment unavailable");
            String::new()
        }
    }
}

/// Appends a snippets section to `plan`; empty `snippets` leave it unchanged.
pub fn append_snippets(plan: LearningPlan, snippets: &str) -> LearningPlan {
    if snippets.is_empty() {
        return plan;
    }
    LearningPlan::new(format!("{}\n\n{}\n{}", plan.as_str(), SNIPPETS_HEADING, snippets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use navigator_abstraction::ServiceError;

    struct FixedSnippets(Vec<&'static str>);

    #[async_trait]
    impl SnippetSource for FixedSnippets {
        async fn fetch(&self, _query: &str) -> Result<Vec<String>, ServiceError> {
            Ok(self.0.iter().map(ToString::to_string).collect())
        }
    }

    struct FailingSnippets;

    #[async_trait]
    impl SnippetSource for FailingSnippets {
        async fn fetch(&self, _query: &str) -> Result<Vec<String>, ServiceError> {
            Err(ServiceError::RequestError("connection refused".to_string()))
        }
    }

    #[test]
    fn test_snippet_query() {
        let student = StudentRecord::new("Ana", "3", 25).with_goal_areas("fractions");
        assert_eq!(snippet_query(&student), "3 grade fractions");

        let student = StudentRecord::new("Ana", "", 25);
        assert_eq!(snippet_query(&student), "grade");
    }

    #[tokio::test]
    async fn test_enrich_caps_and_joins() {
        let source = FixedSnippets(vec!["one", "two", "three", "four"]);
        assert_eq!(enrich(&source, "3 grade", 3).await, "one\ntwo\nthree");
    }

    #[tokio::test]
    async fn test_enrich_failure_is_empty() {
        assert_eq!(enrich(&FailingSnippets, "3 grade", 3).await, "");
    }

    #[test]
    fn test_append_snippets() {
        let plan = LearningPlan::new("Plan body\n");

        let enriched = append_snippets(plan.clone(), "one\ntwo");
        assert_eq!(enriched.as_str(), "Plan body\n\n\n🔍 Search Snippets\none\ntwo");

        assert_eq!(append_snippets(plan.clone(), ""), plan);
    }
}
