//! Prompt text for Analyzer implementations.
//!
//! The response contracts the extractors in [`crate::extract`] rely on are
//! stated here (two weather lines, bare hex code, `{"stage"}` JSON, the
//! healthy sentinel), so vendor implementations and extraction stay in
//! sync.

/// Phrase the infection check asks for when no issues are visible.
pub const HEALTHY_SENTINEL: &str = "Healthy - No infections detected";

/// Closed option list offered to the growth-stage classifier. The journal
/// field itself stays an open enumeration.
pub const GROWTH_STAGES: &[&str] = &[
    "Seedling",
    "Early Vegetative",
    "Vegetative",
    "Flowering",
    "Fruiting",
    "Mature",
];

pub fn describe(name: &str) -> String {
    format!(
        "Write a factual 1-2 paragraph description about the plant \"{name}\". \
         Include basic/complex care info and other relevant information such as \
         exact temperature and humidity that it needs and other numerical info."
    )
}

pub fn weather(city: &str) -> String {
    format!(
        "Search for weather in {city} for today and tomorrow.\n\
         For each day, provide: High and Low temperatures, Humidity, Sunrise time, \
         Sunset time, and Total Daylight Hours.\n\
         Format as exactly 2 lines:\n\
         Line 1: \"High [X]°F, Low [Y]°F, Humidity [Z]%, Sunrise [time], Sunset [time], \
         Daylight [hours]\" (for today)\n\
         Line 2: \"High [X]°F, Low [Y]°F, Humidity [Z]%, Sunrise [time], Sunset [time], \
         Daylight [hours]\" (for tomorrow)\n\
         Do NOT include any prefixes like \"Today:\" or \"Tomorrow:\" - just the weather data."
    )
}

pub fn color() -> String {
    "Analyze this image of a plant. Determine the average color of the PLANT itself \
     (not the background, pot, or soil - just the plant leaves/stems). \
     Return ONLY the hex color code in the format #XXXXXX. Nothing else."
        .to_string()
}

pub fn leaf_count() -> String {
    "Analyze this image of a plant. Count the number of visible leaves on the plant. \
     Return ONLY a single number representing the leaf count. Nothing else."
        .to_string()
}

pub fn infection_check(name: &str, about: &str) -> String {
    format!(
        "This is a \"{name}\" plant.\n\n\
         Plant care information:\n{about}\n\n\
         Analyze this image of the plant for any signs of disease, infection, pest damage, \
         or health issues based on the plant type and its care requirements.\n\
         If the plant appears healthy, respond with: \"{HEALTHY_SENTINEL}\"\n\
         If you detect any issues, describe them briefly in 1-2 sentences including the \
         type of infection/disease if identifiable."
    )
}

pub fn growth_stage(name: &str, day: u32, leaf_count: &str, plant_color: &str) -> String {
    let options = GROWTH_STAGES
        .iter()
        .map(|s| format!("- {s}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "The plant is a \"{name}\" and the photo was taken on \"Day {day}\".\n\
         Additional context:\n\
         - Current leaf count: {leaf_count}\n\
         - Current plant color: {plant_color}\n\n\
         Search online for growth stages of {name} plants and analyze this image along \
         with the provided context.\n\
         Identify its growth stage from these options:\n{options}\n\n\
         Return ONLY a JSON object in this exact format:\n\
         {{\"stage\": \"<stage>\"}}"
    )
}

pub fn predict_next(name: &str, next_day: u32) -> String {
    format!(
        "Generate a photorealistic image of this {name} plant as it would look tomorrow \
         (Day {next_day}).\n\
         Keep the pot, soil, and background identical.\n\
         Only simulate extremely subtle growth (1mm taller, slightly larger leaves).\n\
         Maintain high fidelity to the original image."
    )
}

pub fn insights(name: &str, context: &str) -> String {
    format!(
        "You are an expert gardening assistant for a \"{name}\" plant journal.\n\n\
         Recent journal data:\n{context}\n\
         Based on the actual readings above, respond with a short bulleted list \
         (3-5 bullets) of care recommendations. Reference specific metrics when \
         giving advice and keep each bullet to one sentence."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_prompt_demands_two_lines() {
        let p = weather("San Francisco");
        assert!(p.contains("San Francisco"));
        assert!(p.contains("exactly 2 lines"));
    }

    #[test]
    fn infection_prompt_embeds_sentinel_and_care_info() {
        let p = infection_check("Basil", "Likes 65-80F.");
        assert!(p.contains(HEALTHY_SENTINEL));
        assert!(p.contains("Likes 65-80F."));
    }

    #[test]
    fn growth_stage_prompt_lists_all_options() {
        let p = growth_stage("Basil", 20, "7", "#4A7C3B");
        for stage in GROWTH_STAGES {
            assert!(p.contains(stage));
        }
        assert!(p.contains("{\"stage\": \"<stage>\"}"));
    }
}
