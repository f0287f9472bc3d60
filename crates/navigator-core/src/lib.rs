//! Navigator Core - learning plan generation for NWEA MAP Growth results.
//!
//! This crate turns a student's MAP data into a learning plan:
//! - Reference tables map RIT ranges to Khan Academy resources
//! - The matcher picks the table for the student's grade band and selects up to two resources
//! - The renderer fills a fixed plan template
//! - Snippet enrichment optionally appends web search results
//!
//! # Example
//!
//! ```rust,no_run
//! use navigator_core::{NavigatorConfig, PlanPipeline, StandardChoice, StudentRecord};
//!
//! # fn main() -> navigator_core::Result<()> {
//! let config = NavigatorConfig::resolve(None)?;
//! let pipeline = PlanPipeline::from_config(&config, false)?;
//! let plan = pipeline.generate(&StudentRecord::new("Ana", "3", 195), StandardChoice::CommonCoreUs);
//! println!("{plan}");
//! # Ok(())
//! # }
//! ```

pub mod agents;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod input;
pub mod matcher;
pub mod pipeline;
pub mod range_table;
pub mod renderer;
pub mod standard;
pub mod student;
pub mod table_source;

pub use agents::{autonomous_planner, manager_agent, planner_agent};
pub use config::NavigatorConfig;
pub use enrichment::{append_snippets, enrich, snippet_query};
pub use error::{CoreError, Result};
pub use input::{DEFAULT_DATA_FILE, load_entries, parse_entries};
pub use matcher::{ResourceMatcher, ResourceSelection, table_for_grade};
pub use pipeline::{PlanPipeline, numbered_section};
pub use range_table::{RangeRecord, RangeTable};
pub use renderer::{LearningPlan, RESOURCE_PLACEHOLDER, render_plan};
pub use standard::{StandardChoice, UnknownStandard};
pub use student::{StudentEntry, StudentRecord};
pub use table_source::{DirectoryTableSource, InMemoryTableSource, UnavailableTableSource};
