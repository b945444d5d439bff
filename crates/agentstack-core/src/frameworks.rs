//! Supported agent frameworks and the aliases accepted on the command line

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Agent framework a project is generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Framework {
    Crewai,
    Langgraph,
    OpenaiSwarm,
    Llamaindex,
}

impl Framework {
    /// All supported frameworks
    pub const ALL: [Framework; 4] = [
        Framework::Crewai,
        Framework::Langgraph,
        Framework::OpenaiSwarm,
        Framework::Llamaindex,
    ];

    /// Canonical name as written to agentstack.json
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crewai => "crewai",
            Self::Langgraph => "langgraph",
            Self::OpenaiSwarm => "openai_swarm",
            Self::Llamaindex => "llamaindex",
        }
    }

    fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        resolve_framework(s)
    }
}

/// Alias to canonical framework mapping
///
/// Every canonical name is also listed as its own alias.
pub const ALIASED_FRAMEWORKS: &[(&str, Framework)] = &[
    ("crewai", Framework::Crewai),
    ("crew", Framework::Crewai),
    ("langgraph", Framework::Langgraph),
    ("lang_graph", Framework::Langgraph),
    ("openai_swarm", Framework::OpenaiSwarm),
    ("swarm", Framework::OpenaiSwarm),
    ("openai", Framework::OpenaiSwarm),
    ("llamaindex", Framework::Llamaindex),
    ("llama_index", Framework::Llamaindex),
];

/// Resolve a framework name or alias (case-insensitive) to a framework
pub fn resolve_framework(input: &str) -> Result<Framework> {
    let needle = input.trim().to_lowercase().replace('-', "_");
    ALIASED_FRAMEWORKS
        .iter()
        .find(|(alias, _)| *alias == needle)
        .map(|(_, framework)| *framework)
        .ok_or_else(|| Error::unsupported_framework(input, Framework::supported_list()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_names_resolve_to_themselves() {
        for framework in Framework::ALL {
            assert_eq!(resolve_framework(framework.as_str()).unwrap(), framework);
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!(resolve_framework("crew").unwrap(), Framework::Crewai);
        assert_eq!(resolve_framework("Swarm").unwrap(), Framework::OpenaiSwarm);
        assert_eq!(resolve_framework("llama-index").unwrap(), Framework::Llamaindex);
        assert_eq!("lang_graph".parse::<Framework>().unwrap(), Framework::Langgraph);
    }

    #[test]
    fn test_unknown_framework_lists_supported() {
        let err = resolve_framework("autogen").unwrap_err().to_string();
        assert!(err.contains("autogen"));
        assert!(err.contains("crewai"));
        assert!(err.contains("llamaindex"));
    }

    #[test]
    fn test_serde_uses_canonical_names() {
        let json = serde_json::to_string(&Framework::OpenaiSwarm).unwrap();
        assert_eq!(json, "\"openai_swarm\"");
    }
}
