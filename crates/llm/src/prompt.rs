//! Prompt construction for the generation pipelines.
//!
//! Collected rows are serialized to pretty JSON and truncated to a byte
//! budget before they reach the prompt; the model never sees unbounded
//! catalog dumps.

use autoux_core::page::PageKind;

/// Byte budget for the search pipeline's data block.
pub const SEARCH_DATA_BUDGET: usize = 15 * 1024;

/// Byte budget for the page pipeline's data block.
pub const PAGE_DATA_BUDGET: usize = 5 * 1024;

/// System prompt for per-page layout generation.
pub fn page_system_prompt() -> &'static str {
    "You are a web designer for an insurance site. You build page sections \
     from real catalog data.\n\
     Hard rules:\n\
     1. Use only the data provided; never invent products, prices, or quotes.\n\
     2. No <img> tags; use emoji for visuals.\n\
     3. Inline CSS only; no class names.\n\
     4. Every component's content field holds real HTML.\n\
     Respond with a JSON array of components, each an object with the fields \
     type, id, title, content, style, priority, data."
}

/// User prompt for per-page layout generation.
pub fn page_user_prompt(page: PageKind, data_json: &str, requirements: &str) -> String {
    format!(
        "Build the '{page}' page.\n\n\
         Catalog data (JSON):\n{data}\n\n\
         Requirements: {requirements}\n\n\
         Respond with the JSON component array only.",
        page = page.as_str(),
        data = truncate_to_budget(data_json, PAGE_DATA_BUDGET),
        requirements = requirements,
    )
}

/// System prompt for the free-text search pipeline.
pub fn search_system_prompt() -> &'static str {
    "You are a web designer and insurance advisor. The user asked a free-text \
     question; you answer it with page sections built from the catalog data \
     provided.\n\
     Hard rules:\n\
     1. Use only the data provided; never invent products, prices, or quotes.\n\
     2. When an age is known, only show products whose enrollment window \
     covers it (age_limit_min <= age <= age_limit_max).\n\
     3. Honor the presentation hints (size, style, layout) in the request \
     profile.\n\
     4. No <img> tags; use emoji for visuals.\n\
     5. Inline CSS only; no class names.\n\
     Respond with a JSON array of components, each an object with the fields \
     type, id, title, content, style, priority, data."
}

/// User prompt for the free-text search pipeline.
pub fn search_user_prompt(request: &str, data_json: &str, profile_summary: &str) -> String {
    format!(
        "User request: {request}\n\n\
         Request profile: {profile}\n\n\
         Catalog data (JSON):\n{data}\n\n\
         Respond with the JSON component array only.",
        request = request,
        profile = profile_summary,
        data = truncate_to_budget(data_json, SEARCH_DATA_BUDGET),
    )
}

/// System prompt for query-plan extraction (function calling).
pub fn plan_system_prompt() -> &'static str {
    "You translate insurance-catalog questions into one structured read.\n\
     Tables:\n\
     - products: insurance products (name, description, base_price = monthly \
     premium, max_coverage, age_limit_min, age_limit_max, tags).\n\
     - categories: product categories.\n\
     - faqs: frequently asked questions (question, answer, category).\n\
     - testimonials: customer reviews (title, content, rating, is_verified).\n\
     - claims: filed claims (claim_type, status, amount, filed_at).\n\
     Guidance:\n\
     - When the question names an age or an age group, add an age_eligible \
     filter with a representative age.\n\
     - Use keyword filters for product lines (dental, cancer, travel, ...).\n\
     - Questions asking 'how many', 'average', 'cheapest', or 'most \
     expensive' want an aggregate, not rows.\n\
     Call plan_catalog_query exactly once."
}

/// Truncate a data block to `budget` bytes on a char boundary.
pub fn truncate_to_budget(data: &str, budget: usize) -> &str {
    if data.len() <= budget {
        return data;
    }
    let mut end = budget;
    while end > 0 && !data.is_char_boundary(end) {
        end -= 1;
    }
    &data[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_data_passes_through() {
        assert_eq!(truncate_to_budget("{}", PAGE_DATA_BUDGET), "{}");
    }

    #[test]
    fn long_data_is_cut_to_budget() {
        let data = "x".repeat(SEARCH_DATA_BUDGET + 100);
        assert_eq!(truncate_to_budget(&data, SEARCH_DATA_BUDGET).len(), SEARCH_DATA_BUDGET);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let data = "é".repeat(10); // 2 bytes each
        let cut = truncate_to_budget(&data, 5);
        assert_eq!(cut.len(), 4);
        assert!(cut.chars().all(|c| c == 'é'));
    }

    #[test]
    fn page_prompt_embeds_page_and_data() {
        let prompt = page_user_prompt(PageKind::Home, "{\"categories\":[]}", "friendly tone");
        assert!(prompt.contains("'home' page"));
        assert!(prompt.contains("{\"categories\":[]}"));
        assert!(prompt.contains("friendly tone"));
    }

    #[test]
    fn search_prompt_embeds_profile() {
        let prompt = search_user_prompt("dental for kids", "{}", "age: 7 | interested in: dental");
        assert!(prompt.contains("dental for kids"));
        assert!(prompt.contains("age: 7"));
    }
}
