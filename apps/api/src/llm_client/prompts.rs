//! Prompt template for the AI strategy flow.
//!
//! The template is fixed; the only variable part is the user's business
//! problem, interpolated verbatim (untrimmed — emptiness is checked by the
//! caller against the trimmed value, but the raw text is what gets sent).

/// Tools the recommendation is constrained to draw from.
pub const TOOLSET: &str = "n8n, Python, MERN, OpenAI API, AWS, SQL";

/// Upper bound the model is asked to respect for the recommendation.
pub const MAX_WORDS: u32 = 150;

/// Builds the full prompt for one strategy request.
pub fn strategy_prompt(problem: &str) -> String {
    format!(
        "You are Abdulraheem's AI Assistant, an expert in Digital Transformation \
         and Automation Engineering.\n\n\
         The user has the following business problem or process they want to improve:\n\
         \"{problem}\"\n\n\
         Please act as a Senior Automation Consultant and provide a concise, technical \
         strategic recommendation (max {MAX_WORDS} words).\n\
         Suggest specific tools from Abdulraheem's stack ({TOOLSET}) to solve this.\n\
         Format the response with Markdown, using bolding for key tools."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_problem_verbatim() {
        let prompt = strategy_prompt("  I spend 2 hours a day on lead emails  ");
        // Raw value, untrimmed
        assert!(prompt.contains("\"  I spend 2 hours a day on lead emails  \""));
    }

    #[test]
    fn test_prompt_frames_consultant_persona() {
        let prompt = strategy_prompt("anything");
        assert!(prompt.contains("Senior Automation Consultant"));
        assert!(prompt.contains("max 150 words"));
        assert!(prompt.contains("Markdown"));
    }

    #[test]
    fn test_prompt_names_the_fixed_toolset() {
        let prompt = strategy_prompt("anything");
        for tool in ["n8n", "Python", "MERN", "OpenAI API", "AWS", "SQL"] {
            assert!(prompt.contains(tool), "missing tool: {tool}");
        }
    }
}
