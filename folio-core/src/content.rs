use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};
use crate::scene::PROJECT_CARDS;

const BUNDLED: &str = include_str!("../content/site.json");

/// One entry of the primary technical stack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StackItem {
    pub name: String,
    pub category: String,
}

/// Project card shown in the pinned projects scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    pub repo: String,
    pub demo: String,
    /// Still image shown while the card is not hovered.
    pub preview: String,
    /// Video or animated image shown on hover.
    pub active: String,
    #[serde(default)]
    pub coming_soon: bool,
}

impl Project {
    pub fn has_video(&self) -> bool {
        self.active.to_ascii_lowercase().ends_with(".mp4")
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolGroup {
    pub category: String,
    pub tools: Vec<String>,
}

/// Long-form write-up listed in the projects modal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectDetail {
    pub id: String,
    pub title: String,
    pub intent: String,
    #[serde(default)]
    pub screens: Vec<String>,
    pub problem: String,
    pub decision: String,
    pub outcome: String,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub deep_tech: Vec<ToolGroup>,
    pub github: String,
    /// Absent while the project is not deployed yet.
    pub live: Option<String>,
    pub video: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Principle {
    pub title: String,
    pub desc: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub label: String,
    pub title: String,
    pub influence: String,
    pub output: String,
}

/// Artwork shown in the about modal's horizontal strip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisualRecord {
    pub title: String,
    pub purpose: String,
    pub img: String,
    /// CSS `aspect-ratio` value, e.g. `3/4`.
    pub ratio: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    pub title: String,
    pub kind: String,
    pub img: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Archive {
    #[serde(default)]
    pub records: Vec<VisualRecord>,
    #[serde(default)]
    pub experiments: Vec<Experiment>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub owner: String,
    pub primary_stack: Vec<StackItem>,
    pub secondary_stack: Vec<String>,
    pub projects: Vec<Project>,
    #[serde(default)]
    pub details: Vec<ProjectDetail>,
    #[serde(default)]
    pub principles: Vec<Principle>,
    #[serde(default)]
    pub domains: Vec<Domain>,
    #[serde(default)]
    pub archive: Archive,
    pub resume: String,
}

impl Content {
    /// Site content compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let content: Content =
            serde_json::from_str(text).map_err(|e| FolioError::Content(e.to_string()))?;
        content.validate()?;
        Ok(content)
    }

    fn validate(&self) -> Result<()> {
        if self.projects.len() != PROJECT_CARDS {
            return Err(FolioError::Content(format!(
                "expected {PROJECT_CARDS} project cards, found {}",
                self.projects.len()
            )));
        }
        if self.primary_stack.is_empty() {
            return Err(FolioError::Content("primary stack is empty".into()));
        }
        Ok(())
    }

    pub fn primary_labels(&self) -> Vec<&str> {
        self.primary_stack.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn secondary_labels(&self) -> Vec<&str> {
        self.secondary_stack.iter().map(String::as_str).collect()
    }

    /// Images the preloader waits for: card previews and animated
    /// hover images, deduplicated in first-seen order. Videos stream and
    /// are not awaited.
    pub fn preload_assets(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for p in &self.projects {
            let mut candidates = vec![&p.preview];
            if !p.has_video() {
                candidates.push(&p.active);
            }
            for src in candidates {
                if !out.iter().any(|s| s == src) {
                    out.push(src.clone());
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bundled_content_parses() {
        let content = Content::bundled().expect("bundled content");
        assert_eq!(content.primary_labels().len(), 7);
        assert_eq!(content.secondary_labels()[0], "HTML");
        assert_eq!(content.details.len(), content.projects.len());
        assert!(content.projects[0].has_video());
        assert_eq!(content.details[2].live, None);
        assert_eq!(content.archive.records.len(), 5);
        assert_eq!(content.archive.experiments[1].kind, "Knight's journey");
        assert!(content.details.iter().all(|d| d.video.is_some()));
    }

    #[test]
    fn preload_list_skips_videos_and_duplicates() {
        let content = Content::bundled().expect("bundled content");
        assert_eq!(
            content.preload_assets(),
            vec![
                "img/fikra-static.png".to_string(),
                "img/authplay.png".to_string(),
                "img/projects/fikra-demo.gif".to_string(),
                "img/dev.png".to_string(),
            ]
        );
    }

    #[test]
    fn wrong_card_count_is_rejected() {
        let mut content = Content::bundled().expect("bundled content");
        content.projects.pop();
        let json = serde_json::to_string(&content).expect("serialize");
        assert!(matches!(
            Content::from_json(&json),
            Err(FolioError::Content(_))
        ));
    }
}
