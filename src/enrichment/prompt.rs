// file: src/enrichment/prompt.rs
// description: prompt construction for repository classification

/// Builds the single user message sent to the chat-completion endpoint.
pub fn build_prompt(name: &str, description: Option<&str>, readme_excerpt: &str) -> String {
    let description = description.filter(|d| !d.trim().is_empty()).unwrap_or("(none)");
    let readme_excerpt = if readme_excerpt.trim().is_empty() {
        "(no README available)"
    } else {
        readme_excerpt
    };

    format!(
        r#"Analyze the following repository:
Name: {name}
Description: {description}
README Content (excerpt):
{readme_excerpt}

Provide a JSON response with two keys:
1. "category": A short category name (e.g., "AI", "Tools", "Web", "System", "Learning", "Mobile").
2. "enhanced_description": A polished, one-sentence description (in Chinese if the input is Chinese, else English).

Return ONLY valid JSON."#
    )
}
