//! Prompt templates for agent turns and nested-workflow summaries

use crate::conversation::message::Message;

/// Templates for generating prompts for each participant kind
pub struct PromptTemplate;

impl PromptTemplate {
    /// Default role instructions for the planner
    pub fn planner_system() -> &'static str {
        r#"You are a project manager. Your only job is to take a high-level task and create a detailed, step-by-step plan for your team.
End your plan with the phrase 'PLAN COMPLETE'."#
    }

    /// Default role instructions for the developer
    pub fn developer_system() -> &'static str {
        r#"You are a software developer. Your job is to write code to accomplish the given task.
When you are done, present the code and say 'DEVELOPMENT COMPLETE'."#
    }

    /// Default role instructions for the tester
    pub fn tester_system() -> &'static str {
        r#"You are a software tester. Your job is to write unit tests for the given code.
When you are done, present the tests and say 'TESTING COMPLETE'."#
    }

    /// Default role instructions for the documentation writer
    pub fn doc_writer_system() -> &'static str {
        r#"You are a technical writer. Your job is to write clear and concise documentation for the given code.
When you are done, present the documentation and say 'DOCUMENTATION COMPLETE'."#
    }

    /// Instruction prepended to the task handed to a nested workflow
    pub fn nested_instruction() -> &'static str {
        r#"You are a self-contained team of software developers. You will be given a plan to execute.
Follow the plan and return the final result."#
    }

    /// Prompt asking a model to summarize a finished nested run
    pub fn nested_response_prompt() -> &'static str {
        "Summarize the inner team's work and final output."
    }

    /// Render messages as a plain transcript, one block per message.
    pub fn transcript(messages: &[Message]) -> String {
        let mut out = String::new();
        for message in messages {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("[{}]\n{}\n", message.source, message.content));
        }
        out
    }

    /// User prompt for an agent turn: the full conversation so far.
    pub fn agent_turn(name: &str, messages: &[Message]) -> String {
        format!(
            r#"Conversation so far:

{}
You are {}. Continue the conversation with your next contribution."#,
            Self::transcript(messages),
            name
        )
    }

    /// Task that seeds a nested workflow.
    pub fn nested_task(instruction: &str, messages: &[Message]) -> String {
        format!(
            "{}\n\n{}",
            instruction.trim_end(),
            Self::transcript(messages)
        )
    }

    /// Prompt asking a model to summarize a nested run's transcript.
    pub fn nested_summary(response_prompt: &str, messages: &[Message]) -> String {
        format!(
            "{}\n\n{}",
            Self::transcript(messages),
            response_prompt.trim_end()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::log::ConversationLog;

    fn sample() -> ConversationLog {
        let mut log = ConversationLog::new();
        log.append("user", "build factorial function");
        log.append("Planner", "1. code\nPLAN COMPLETE");
        log
    }

    #[test]
    fn test_transcript_contains_sources_in_order() {
        let transcript = PromptTemplate::transcript(sample().messages());
        let user = transcript.find("[user]").unwrap();
        let planner = transcript.find("[Planner]").unwrap();
        assert!(user < planner);
        assert!(transcript.contains("PLAN COMPLETE"));
    }

    #[test]
    fn test_nested_task_ends_with_latest_content() {
        let task = PromptTemplate::nested_task(PromptTemplate::nested_instruction(), sample().messages());
        assert!(task.starts_with("You are a self-contained team"));
        assert!(task.trim_end().ends_with("PLAN COMPLETE"));
    }

    #[test]
    fn test_agent_turn_names_the_agent() {
        let prompt = PromptTemplate::agent_turn("Developer", sample().messages());
        assert!(prompt.contains("You are Developer."));
    }

    #[test]
    fn test_role_prompts_carry_completion_markers() {
        assert!(PromptTemplate::planner_system().contains("PLAN COMPLETE"));
        assert!(PromptTemplate::developer_system().contains("DEVELOPMENT COMPLETE"));
    }
}
