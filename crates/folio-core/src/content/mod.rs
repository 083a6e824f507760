mod models;
mod store;

pub use models::{
    About, Personal, Portfolio, Project, Skill, SocialLink, Stat, StatValue, PLACEHOLDER_IMAGE,
};
pub use store::ContentStore;

use crate::viewport::Section;

/// Anchor ids of the page regions, in document order
pub const HERO: &str = "hero";
pub const ABOUT: &str = "about";
pub const PROJECTS: &str = "projects";
pub const SKILLS: &str = "skills";
pub const CONTACT: &str = "contact";

/// Navigation entries: (anchor id, label)
pub const NAV_ITEMS: [(&str, &str); 5] = [
    (HERO, "Home"),
    (ABOUT, "About"),
    (PROJECTS, "Projects"),
    (SKILLS, "Skills"),
    (CONTACT, "Contact"),
];

/// Sections registered with the scroll-spy, in document order
pub fn page_sections() -> Vec<Section> {
    NAV_ITEMS
        .iter()
        .enumerate()
        .map(|(order, (id, label))| Section::new(*id, *label, order))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_sections_follow_nav_order() {
        let sections = page_sections();
        assert_eq!(sections.len(), NAV_ITEMS.len());
        assert_eq!(sections[0].id, HERO);
        assert_eq!(sections[0].label, "Home");
        assert_eq!(sections[4].id, CONTACT);
        assert!(sections.iter().enumerate().all(|(i, s)| s.order == i));
    }
}
