//! Learning plan rendering.

use std::fmt;

use crate::matcher::ResourceSelection;
use crate::standard::StandardChoice;
use crate::student::StudentRecord;

/// Shown for a goal with no matching resource.
pub const RESOURCE_PLACEHOLDER: &str = "Resource TBD";

/// Rendered plan text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearningPlan(String);

impl LearningPlan {
    /// Wraps already rendered text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The plan text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the plan, returning its text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for LearningPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<LearningPlan> for String {
    fn from(plan: LearningPlan) -> Self {
        plan.0
    }
}

/// Renders the plan for a student.
///
/// Pure: identical inputs always produce identical text.
pub fn render_plan(
    student: &StudentRecord,
    standard: StandardChoice,
    resources: &ResourceSelection,
) -> LearningPlan {
    let resource_1 = resources.first().unwrap_or(RESOURCE_PLACEHOLDER);
    let resource_2 = resources.second().unwrap_or(RESOURCE_PLACEHOLDER);

    let text = format!(
        "AI-Powered Plan for {name}\n\
---\n\
📈 Student Snapshot\n\
* **Grade:** {grade}\n\
* **Overall RIT Score:** {score}\n\
* **Standard Alignment:** {standard}\n\
---\n\
🚀 Foresight: Potential Growth Pathways\n\
To track progress effectively, it's crucial to use the student's specific growth projection provided by NWEA's normative data. This target is found in your official NWEA Growth Report. The pathways below outline potential strategies to meet and exceed that goal.\n\
\n\
**Official Growth Target:** `[Teacher to input the RIT growth goal from the NWEA Report]`\n\
---\n\
**Pathway 1: Steady & Foundational Growth**\n\
* **Focus:** Deep mastery of core concepts within the student's current learning zone.\n\
* **Key Accomplishments:** Consistent practice on recommended Khan Academy skills, closing skill gaps, >80% on unit quizzes.\n\
\n\
**Pathway 2: Accelerated Progress**\n\
* **Focus:** Master current-level concepts quickly and begin stretch topics from the next RIT band.\n\
* **Key Accomplishments:** Rapid completion of foundational exercises, tackling challenge problems, exploring next RIT range topics.\n\
---\n\
🎯 Learning Goals & Resources\n\
\n\
**Goal 1:** Strengthen priority skills\n\
* **Standard:** [Standard Code]\n\
* **Khan Academy Resources:**\n    \
* {resource_1}\n\
\n\
**Goal 2:** Prepare for upcoming concepts\n\
* **Standard:** [Standard Code]\n\
* **Khan Academy Resources:**\n    \
* {resource_2}\n\
---\n\
💡 Learning Strategies\n\
1. Schedule regular practice sessions using Khan Academy.\n\
2. Monitor progress with NWEA tools and adjust focus skills.\n\
3. Encourage reflective learning and goal setting.\n\
---\n\
📚 Content & Activity Ideas\n\
1. Create small-group instruction around the identified skills.\n\
2. Use manipulatives or visual aids to deepen understanding.\n",
        name = student.name,
        grade = student.grade,
        score = student.score,
        standard = standard.display_name(),
    );

    LearningPlan(text)
}
