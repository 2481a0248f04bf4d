//! Prompt templates for the external documentation generator. The service
//! call itself lives outside this crate; these helpers only assemble the
//! prompt text from raw markup and clean up replies.

/// Prompt asking for step-by-step documentation of a workflow.
pub fn documentation_prompt(xaml: &str) -> String {
    format!(
        "You are an expert in documenting UiPath workflows in extreme detail.\n\
         Given the following XAML code, produce a thorough, step-by-step documentation.\n\
         Include all libraries or packages used, how each activity and element works, \
         the purpose of this RPA workflow, expected inputs/outputs:\n\
         {xaml}\n\n\
         Return only the documentation text."
    )
}

/// Prompt asking for a revised workflow incorporating user instructions.
pub fn revision_prompt(xaml: &str, instructions: &str) -> String {
    format!(
        "You are an advanced UiPath RPA developer.\n\
         Do not remove any attributes from the XAML file that are used in the body. \
         For example, if scg is used in the body, the attribute should also remain in \
         the activity, as the reference is used.\n\
         Integrate these changes into XAML. Return only the complete, updated code in plain-text.\n\
         You have the following current UiPath XAML code:\n\
         {xaml}\n\n\
         The user wants changes or enhancements based on the following instructions:\n\
         {instructions}"
    )
}

/// Strip markdown code fencing from a generator reply.
pub fn strip_code_fences(reply: &str) -> String {
    reply.trim().replace("```xml", "").replace("```", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documentation_prompt_embeds_markup() {
        let prompt = documentation_prompt("<Activity/>");
        assert!(prompt.contains("<Activity/>"));
        assert!(prompt.contains("step-by-step"));
    }

    #[test]
    fn revision_prompt_embeds_both_inputs() {
        let prompt = revision_prompt("<Activity/>", "add a logging step");
        assert!(prompt.contains("<Activity/>"));
        assert!(prompt.contains("add a logging step"));
    }

    #[test]
    fn code_fences_are_stripped() {
        let reply = "```xml\n<Activity/>\n```";
        assert_eq!(strip_code_fences(reply).trim(), "<Activity/>");
    }
}
