use anyhow::Result;

use super::read_input;
use crate::cli::PromptCommand;
use crate::prompts::{self, IssueKind};

/// Render the requested prompt template
pub fn render_prompt(action: PromptCommand) -> Result<String> {
    let text = match action {
        PromptCommand::CodeReview { snippet_id } => prompts::code_review(&snippet_id),
        PromptCommand::Debug {
            error_message,
            context,
        } => prompts::debug_help(&error_message, &context),
        PromptCommand::Issue { description, kind } => {
            prompts::issue_template(IssueKind::parse_or_bug(&kind), &description)
        }
        PromptCommand::DeployCheck => prompts::deploy_check(),
        PromptCommand::Logs { input } => prompts::summarize_logs(&read_input(&input)?),
        PromptCommand::Optimize { snippet_id } => prompts::optimize_snippet(&snippet_id),
    };
    Ok(text)
}

pub fn handle_prompt(action: PromptCommand) -> Result<()> {
    println!("{}", render_prompt(action)?);
    Ok(())
}
