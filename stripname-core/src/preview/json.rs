use crate::planner::RenamePlan;

/// Render plan as JSON
pub fn render_json(plan: &RenamePlan) -> String {
    serde_json::to_string_pretty(plan).unwrap_or_else(|_| "null".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::test_support::sample_plan;

    #[test]
    fn test_render_json_shape() {
        let output = render_json(&sample_plan());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["mode"], "smart");
        assert_eq!(value["root"], "/samples");
        assert_eq!(value["entries"].as_array().unwrap().len(), 5);
        assert_eq!(value["entries"][0]["original"], "pack_snare.wav");
        assert_eq!(value["entries"][0]["candidate"], "snare.wav");
        assert_eq!(value["entries"][1]["hidden"], true);
        assert_eq!(value["patterns"][0]["prefix"], "pack_");
        assert_eq!(value["patterns"][0]["spec"]["kind"], "derived");
        assert_eq!(value["warnings"][0]["path"], "/samples/locked");
    }
}
