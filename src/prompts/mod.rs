//! Structured prompt templates for an agent driving the snippet tools.
//!
//! Every template is a pure function of its arguments, which are embedded
//! verbatim.

use crate::snippets::StoreStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    Bug,
    Enhancement,
}

impl IssueKind {
    /// Unrecognised kinds get the bug template
    pub fn parse_or_bug(kind: &str) -> Self {
        match kind.trim().to_lowercase().as_str() {
            "enhancement" | "feature" => Self::Enhancement,
            _ => Self::Bug,
        }
    }
}

pub fn code_review(snippet_id: &str) -> String {
    format!(
        "You are performing a professional code review.\n\
         First, run the analyze_snippet tool with snippet_id={snippet_id} to get the basic metrics.\n\
         Then run get_snippet with the same id to read the code itself.\n\n\
         Review the code for:\n\
         - **Readability**: is the code clear and easy to follow?\n\
         - **Performance**: is there room for improvement?\n\
         - **Security**: are there potential security problems?\n\
         - **Maintainability**: is the code easy to maintain?\n\
         - **Patterns**: are suitable design patterns in use?\n\n\
         Be specific: cite line numbers and suggest concrete code."
    )
}

pub fn debug_help(error_message: &str, context: &str) -> String {
    let context_line = if context.is_empty() {
        String::new()
    } else {
        format!("Additional context: {context}")
    };
    format!(
        "You are a debugging expert.\n\
         The user hit the following error:\n\n\
         ```\n{error_message}\n```\n\n\
         {context_line}\n\n\
         Analyze the error and provide:\n\
         1. **Cause**: what most likely triggers the error\n\
         2. **Quick fix**: how to fix it now\n\
         3. **Lasting fix**: how to prevent it in the future\n\
         4. **Tests**: which tests to add\n\n\
         If relevant, look for related snippets with search_by_code.\n\
         Be specific."
    )
}

pub fn issue_template(kind: IssueKind, description: &str) -> String {
    match kind {
        IssueKind::Bug => format!(
            "Create a bug issue on GitHub.\n\n\
             Problem description: {description}\n\n\
             Use the github_create_issue tool with this structure:\n\n\
             **Title**: [short and focused]\n\n\
             **Body** (Markdown):\n\
             ## Bug description\n\
             [clear description of the problem]\n\n\
             ## Steps to reproduce\n\
             1. ...\n2. ...\n\n\
             ## Expected behavior\n\
             [what should have happened]\n\n\
             ## Actual behavior\n\
             [what actually happens]\n\n\
             ## Environment\n\
             - Python / Node.js version\n\
             - Operating system\n\n\
             labels: ['bug']"
        ),
        IssueKind::Enhancement => format!(
            "Create an enhancement issue on GitHub.\n\n\
             Description: {description}\n\n\
             Use the github_create_issue tool with this structure:\n\n\
             **Title**: [feat: short description]\n\n\
             **Body** (Markdown):\n\
             ## Feature description\n\
             [what the feature does and why it is needed]\n\n\
             ## Proposed solution\n\
             [how to implement it]\n\n\
             ## Alternatives considered\n\
             [if relevant]\n\n\
             ## Tasks\n\
             - [ ] Task 1\n- [ ] Task 2\n\n\
             labels: ['enhancement']"
        ),
    }
}

pub fn deploy_check() -> String {
    "You are about to deploy.\n\
     First, run these checks:\n\n\
     1. **Run** render_service_status to check the current service state\n\
     2. **Run** render_list_deploys to see the latest deploy\n\
     3. **Run** github_list_issues with labels='bug' to check open bugs\n\n\
     Then show the user:\n\
     - The current service state\n\
     - The result of the latest deploy\n\
     - Open bugs that might be affected\n\n\
     Ask the user whether to continue with the deploy.\n\
     If they confirm, use render_trigger_deploy.\n\n\
     Never deploy without explicit confirmation!"
        .to_string()
}

pub fn summarize_logs(logs: &str) -> String {
    format!(
        "You are analyzing technical logs.\n\
         The following logs need analysis:\n\n\
         ```\n{logs}\n```\n\n\
         Provide an analysis covering:\n\n\
         ### Errors\n\
         Each error: line, type, severity and impact.\n\n\
         ### Warnings\n\
         Warnings that need attention.\n\n\
         ### Patterns\n\
         Are there recurring patterns? Errors that happen frequently?\n\n\
         ### Recommendations\n\
         What to fix first and how.\n\n\
         Be technical and precise. Cite line numbers."
    )
}

pub fn optimize_snippet(snippet_id: &str) -> String {
    format!(
        "You are an optimization expert.\n\
         Run get_snippet with snippet_id={snippet_id} and analyze_snippet with the same id.\n\n\
         Then suggest optimizations:\n\n\
         1. **Performance**: Big-O, redundant loops, caching\n\
         2. **Memory**: needless objects, generators vs lists\n\
         3. **Readability**: naming, structure, separation of concerns\n\
         4. **Idioms**: use of the language's idioms\n\n\
         For each suggestion, show the current code next to the proposed code.\n\
         If the suggestions are significant, offer to update the snippet with update_snippet."
    )
}

pub fn tools_guide() -> &'static str {
    "# Codebot tools\n\
     \n\
     ## Snippets\n\
     - `list_snippets` - list snippets with filters\n\
     - `get_snippet` - fetch one snippet\n\
     - `create_snippet` - store a new snippet\n\
     - `update_snippet` - update a snippet\n\
     - `delete_snippet` - delete a snippet\n\
     - `search_by_code` - search inside code\n\
     - `get_stats` - store statistics\n\
     \n\
     ## Code analysis\n\
     - `analyze_snippet` - metrics and patterns\n\
     - `bulk_tag_snippets` - add or remove tags in bulk\n"
}

fn join_counts(counts: &[(String, usize)]) -> String {
    counts
        .iter()
        .map(|(name, count)| format!("{name} ({count})"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn stats_summary(stats: &StoreStats) -> String {
    format!(
        "Codebot store:\n\
         Total snippets: {}\n\
         Languages: {}\n\
         Popular tags: {}",
        stats.total_snippets,
        join_counts(&stats.languages),
        join_counts(&stats.popular_tags)
    )
}
