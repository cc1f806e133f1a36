use crate::sliders::{Configuration, Slider};

/// Templated architecture explanation for the current slider values.
pub fn explanation(config: &Configuration) -> String {
    let v = |slider: Slider| config.get(slider);
    format!(
        "**Architecture Explanation:**\n\
         - Azure + GCP cloud with {} services\n\
         - Containers usage: {}/10, Serverless: {}/10\n\
         - ML/Dataiku workflow complexity: {}/10\n\
         - CI/CD automation: {}/10\n\
         - Security layers: {}/10\n\
         - Cost efficiency: {}/10, Scalability: {}/10\n\
         - AI/LLM integration: {}/10\n\
         **Note:** MVP simulates enterprise workflows, CI/CD, ML/Dataiku, and security remediation.\n",
        v(Slider::NumServices),
        v(Slider::Containers),
        v(Slider::Serverless),
        v(Slider::MlComplexity),
        v(Slider::CiCd),
        v(Slider::Security),
        v(Slider::Cost),
        v(Slider::Scalability),
        v(Slider::Ai),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_every_value() {
        let config = Configuration::new([
            (Slider::NumServices, 3),
            (Slider::Containers, 0),
            (Slider::Serverless, 10),
            (Slider::Security, 2),
            (Slider::Ai, 9),
        ])
        .unwrap();
        let text = explanation(&config);
        assert!(text.starts_with("**Architecture Explanation:**\n"));
        assert!(text.contains("- Azure + GCP cloud with 3 services\n"));
        assert!(text.contains("- Containers usage: 0/10, Serverless: 10/10\n"));
        assert!(text.contains("- ML/Dataiku workflow complexity: 5/10\n"));
        assert!(text.contains("- CI/CD automation: 6/10\n"));
        assert!(text.contains("- Security layers: 2/10\n"));
        assert!(text.contains("- Cost efficiency: 7/10, Scalability: 8/10\n"));
        assert!(text.contains("- AI/LLM integration: 9/10\n"));
        assert_eq!(text.lines().count(), 9);
    }
}
