//! Default micro-prompt catalog
//!
//! The catalog is a fixed ordered list of short follow-up prompts supplied
//! to the suggestion engine at session start. Users can replace it via the
//! `[catalog]` section of the config file.

/// Built-in catalog shipped with the profile assistant backend.
pub const DEFAULT_CATALOG: [&str; 30] = [
    "CV summary",
    "Research projects",
    "Machine learning work",
    "ISRO internship",
    "Technical skills",
    "Academic background",
    "Publications outputs",
    "Leadership experience",
    "Collaboration skills",
    "Research motivation",
    "Future PhD goals",
    "Optical polarization project",
    "Deep learning system",
    "BRAHMa tool",
    "Data analysis skills",
    "Astrophysics experience",
    "Python programming",
    "MATLAB proficiency",
    "Communication skills",
    "Critical thinking",
    "Scientific computing",
    "Awards and recognitions",
    "JEE Mains percentile",
    "BHU UET rank",
    "IIT JAM rank",
    "Mentorship experience",
    "Research exposure",
    "Stellar observations",
    "Image processing techniques",
    "Motivational background",
];

/// Returns the catalog to use for a session: the config override when one
/// is present and non-empty, otherwise the built-in default.
pub fn session_catalog(override_prompts: Option<&[String]>) -> Vec<String> {
    match override_prompts {
        Some(prompts) if !prompts.is_empty() => prompts.to_vec(),
        _ => DEFAULT_CATALOG.iter().map(|p| p.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_distinct() {
        let mut seen = std::collections::HashSet::new();
        for prompt in DEFAULT_CATALOG {
            assert!(seen.insert(prompt), "duplicate catalog entry: {}", prompt);
        }
    }

    #[test]
    fn test_session_catalog_uses_default() {
        let catalog = session_catalog(None);
        assert_eq!(catalog.len(), DEFAULT_CATALOG.len());
        assert_eq!(catalog[0], "CV summary");
    }

    #[test]
    fn test_session_catalog_override() {
        let custom = vec!["Alpha".to_string(), "Beta".to_string()];
        let catalog = session_catalog(Some(&custom));
        assert_eq!(catalog, custom);
    }

    #[test]
    fn test_empty_override_falls_back() {
        let catalog = session_catalog(Some(&[]));
        assert_eq!(catalog.len(), DEFAULT_CATALOG.len());
    }
}
