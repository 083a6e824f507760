use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Image shown when a project has none configured
pub const PLACEHOLDER_IMAGE: &str = "/images/projects/placeholder.jpg";

/// The whole portfolio: everything the page renders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub personal: Personal,
    pub about: About,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub social: Vec<SocialLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Personal {
    pub name: String,
    pub title: String,
    pub tagline: String,
    pub email: String,
    pub location: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub resume_url: Option<String>,
}

impl Personal {
    /// First word of the name, used for the logo
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct About {
    pub bio: Vec<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
    pub years_of_experience: u32,
    pub completed_projects: u32,
    pub portfolio_value: String,
    /// Stat tiles; derived from the fields above when left empty
    #[serde(default)]
    pub stats: Vec<Stat>,
}

impl About {
    /// Stat tiles to display, in order
    pub fn stats(&self) -> Vec<Stat> {
        if !self.stats.is_empty() {
            return self.stats.clone();
        }

        vec![
            Stat::number("Years Experience", self.years_of_experience as u64),
            Stat::number("Projects Completed", self.completed_projects as u64),
            Stat {
                label: "Portfolio Supported".to_string(),
                value: StatValue::Text(self.portfolio_value.clone()),
                animated: false,
            },
        ]
    }
}

/// A labelled figure in the About section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub label: String,
    pub value: StatValue,
    /// Whether the value counts up when revealed
    #[serde(default = "default_true")]
    pub animated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(u64),
    Text(String),
}

impl std::fmt::Display for StatValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatValue::Number(n) => write!(f, "{}", n),
            StatValue::Text(s) => f.write_str(s),
        }
    }
}

fn non_digits() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\D").expect("static regex"))
}

impl Stat {
    pub fn number(label: &str, value: u64) -> Self {
        Self {
            label: label.to_string(),
            value: StatValue::Number(value),
            animated: true,
        }
    }

    /// Counter target, or `None` when the value must be shown raw
    pub fn counter_target(&self) -> Option<u64> {
        if !self.animated {
            return None;
        }
        match &self.value {
            StatValue::Number(n) => Some(*n),
            StatValue::Text(s) => {
                let digits = non_digits().replace_all(s, "");
                if digits.is_empty() {
                    None
                } else {
                    digits.parse().ok()
                }
            }
        }
    }

    /// Display text for the current counter value
    pub fn display(&self, current: Option<u64>) -> String {
        match (self.counter_target(), current) {
            (Some(_), Some(n)) => format!("{}+", n),
            (Some(_), None) => "0+".to_string(),
            (None, _) => self.value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Legacy single image, superseded by `thumbnail` and `preview_image`
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub preview_image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub methodology: Option<String>,
    #[serde(default)]
    pub results: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// A link that is absent, empty or "#" is hidden
fn visible_link(value: &Option<String>) -> Option<&str> {
    present(value).filter(|s| s.trim() != "#")
}

impl Project {
    /// Card image: thumbnail, then legacy image, then placeholder
    pub fn thumbnail_url(&self) -> &str {
        present(&self.thumbnail)
            .or_else(|| present(&self.image))
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// Detail image: preview, then thumbnail, then legacy image, then placeholder
    pub fn preview_url(&self) -> &str {
        present(&self.preview_image)
            .or_else(|| present(&self.thumbnail))
            .or_else(|| present(&self.image))
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    pub fn github_link(&self) -> Option<&str> {
        visible_link(&self.github_url)
    }

    pub fn live_link(&self) -> Option<&str> {
        visible_link(&self.live_url)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Kept for content compatibility; not displayed
    #[serde(default)]
    pub level: Option<u8>,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
    pub icon: String,
}

fn default_true() -> bool {
    true
}

impl Portfolio {
    pub fn featured_projects(&self) -> Vec<&Project> {
        self.projects.iter().filter(|p| p.featured).collect()
    }

    pub fn other_projects(&self) -> Vec<&Project> {
        self.projects.iter().filter(|p| !p.featured).collect()
    }

    pub fn find_project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Skills grouped by category, categories in first-appearance order
    pub fn skills_by_category(&self) -> Vec<(&str, Vec<&Skill>)> {
        let mut groups: Vec<(&str, Vec<&Skill>)> = Vec::new();

        for skill in &self.skills {
            match groups.iter_mut().find(|(cat, _)| *cat == skill.category) {
                Some((_, skills)) => skills.push(skill),
                None => groups.push((skill.category.as_str(), vec![skill])),
            }
        }

        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: &str) -> Project {
        Project {
            id: id.to_string(),
            title: format!("Project {}", id),
            description: String::new(),
            image: None,
            thumbnail: None,
            preview_image: None,
            tags: Vec::new(),
            live_url: None,
            github_url: None,
            featured: false,
            methodology: None,
            results: None,
        }
    }

    #[test]
    fn test_image_fallbacks() {
        let mut p = project("1");
        assert_eq!(p.thumbnail_url(), PLACEHOLDER_IMAGE);
        assert_eq!(p.preview_url(), PLACEHOLDER_IMAGE);

        p.image = Some("legacy.jpg".into());
        assert_eq!(p.thumbnail_url(), "legacy.jpg");
        assert_eq!(p.preview_url(), "legacy.jpg");

        p.thumbnail = Some("thumb.jpg".into());
        assert_eq!(p.thumbnail_url(), "thumb.jpg");
        assert_eq!(p.preview_url(), "thumb.jpg");

        p.preview_image = Some("big.jpg".into());
        assert_eq!(p.thumbnail_url(), "thumb.jpg");
        assert_eq!(p.preview_url(), "big.jpg");
    }

    #[test]
    fn test_hash_links_are_hidden() {
        let mut p = project("1");
        p.live_url = Some("#".into());
        p.github_url = Some("https://github.com/x/y".into());
        assert_eq!(p.live_link(), None);
        assert_eq!(p.github_link(), Some("https://github.com/x/y"));
    }

    #[test]
    fn test_counter_target() {
        assert_eq!(Stat::number("Years", 10).counter_target(), Some(10));

        let text = Stat {
            label: "Projects".into(),
            value: StatValue::Text("25".into()),
            animated: true,
        };
        assert_eq!(text.counter_target(), Some(25));

        let raw = Stat {
            label: "Value".into(),
            value: StatValue::Text("$60M+".into()),
            animated: false,
        };
        assert_eq!(raw.counter_target(), None);
        assert_eq!(raw.display(Some(3)), "$60M+");

        let words = Stat {
            label: "Mood".into(),
            value: StatValue::Text("great".into()),
            animated: true,
        };
        assert_eq!(words.counter_target(), None);
        assert_eq!(words.display(None), "great");
    }

    #[test]
    fn test_stat_display_appends_plus() {
        let stat = Stat::number("Years", 10);
        assert_eq!(stat.display(None), "0+");
        assert_eq!(stat.display(Some(7)), "7+");
    }

    #[test]
    fn test_skills_grouped_in_first_appearance_order() {
        let skill = |name: &str, category: &str| Skill {
            name: name.into(),
            level: None,
            category: category.into(),
        };
        let portfolio = Portfolio {
            personal: Personal {
                name: "Ada Lovelace".into(),
                title: String::new(),
                tagline: String::new(),
                email: "ada@example.com".into(),
                location: String::new(),
                avatar: None,
                resume_url: None,
            },
            about: About {
                bio: Vec::new(),
                profile_image: None,
                years_of_experience: 1,
                completed_projects: 2,
                portfolio_value: "n/a".into(),
                stats: Vec::new(),
            },
            projects: vec![project("1")],
            skills: vec![
                skill("Rust", "Programming"),
                skill("Tableau", "BI"),
                skill("Python", "Programming"),
            ],
            social: Vec::new(),
        };

        let groups = portfolio.skills_by_category();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "Programming");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[0].1[1].name, "Python");
        assert_eq!(groups[1].0, "BI");

        assert_eq!(portfolio.personal.first_name(), "Ada");
        assert_eq!(portfolio.about.stats().len(), 3);
    }
}
