//! Diagram languages the process map can be written in.

/// Supported diagram languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagramLanguage {
    #[default]
    Mermaid,
    GraphViz,
    PlantUml,
    D2,
}

impl DiagramLanguage {
    /// Parse language from a code fence info string.
    ///
    /// Supports both direct language names (`mermaid`) and `kroki-` prefixed
    /// names (`kroki-mermaid`). Matching ignores ASCII case.
    ///
    /// Returns None if the language is not a supported diagram type.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let lang = lower.strip_prefix("kroki-").unwrap_or(&lower);

        match lang {
            "mermaid" => Some(Self::Mermaid),
            "graphviz" | "dot" => Some(Self::GraphViz),
            "plantuml" => Some(Self::PlantUml),
            "d2" => Some(Self::D2),
            _ => None,
        }
    }

    /// Kroki endpoint name for this diagram type.
    #[must_use]
    pub fn kroki_endpoint(self) -> &'static str {
        match self {
            Self::Mermaid => "mermaid",
            Self::GraphViz => "graphviz",
            Self::PlantUml => "plantuml",
            Self::D2 => "d2",
        }
    }

    /// Name shown to readers in error messages.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Mermaid => "Mermaid.js",
            Self::GraphViz => "Graphviz",
            Self::PlantUml => "PlantUML",
            Self::D2 => "D2",
        }
    }

    /// Whether a fence info string selects this language.
    #[must_use]
    pub fn matches_fence(self, info: &str) -> bool {
        Self::parse(info) == Some(self)
    }
}
