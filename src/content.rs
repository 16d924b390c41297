use crate::config;

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct FeatureItem {
    pub title: &'static str,
    pub img: &'static str,
}

pub const NAV_LINKS: &[NavLink] = &[
    NavLink { label: "Jobs", href: "#" },
    NavLink { label: "Syllabus", href: "#" },
    NavLink { label: "Results", href: "#" },
    NavLink { label: "Mentorship", href: "#" },
];

pub const FEATURE_ITEMS: &[FeatureItem] = &[
    FeatureItem {
        title: "Syllabus",
        img: "https://images.unsplash.com/photo-1503676260728-1c00da094a0b?q=80&w=1600&auto=format&fit=crop",
    },
    FeatureItem {
        title: "Results",
        img: "https://images.unsplash.com/photo-1557426272-fc759fdf7a8d?q=80&w=1600&auto=format&fit=crop",
    },
    FeatureItem {
        title: "Career Connect",
        img: "https://images.unsplash.com/photo-1521737604893-d14cc237f11d?q=80&w=1600&auto=format&fit=crop",
    },
    FeatureItem {
        title: "Mentorship",
        img: "https://images.unsplash.com/photo-1523580846011-d3a5bc25702b?q=80&w=1600&auto=format&fit=crop",
    },
];

pub const MARQUEE_PHRASES: &[&str] = &["UNIVERSITY PARTNERS • ", "RECENT PLACEMENTS • "];

pub const CTA_IMAGE: &str =
    "https://images.unsplash.com/photo-1523050854058-8df90110c9f1?q=80&w=1600&auto=format&fit=crop";

pub fn marquee_text(phrase: &str) -> String {
    phrase.repeat(config::MARQUEE_REPEAT)
}

pub fn copyright(year: i32) -> String {
    format!("© {} UniConnect", year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_items_keep_their_order() {
        let titles: Vec<&str> = FEATURE_ITEMS.iter().map(|item| item.title).collect();
        assert_eq!(titles, ["Syllabus", "Results", "Career Connect", "Mentorship"]);
        assert!(FEATURE_ITEMS.iter().all(|item| item.img.starts_with("https://")));
    }

    #[test]
    fn nav_has_four_links() {
        let labels: Vec<&str> = NAV_LINKS.iter().map(|l| l.label).collect();
        assert_eq!(labels, ["Jobs", "Syllabus", "Results", "Mentorship"]);
    }

    #[test]
    fn marquee_text_repeats_phrase() {
        let text = marquee_text("AB ");
        assert_eq!(text.len(), 3 * config::MARQUEE_REPEAT);
        assert!(text.starts_with("AB AB "));
    }

    #[test]
    fn copyright_interpolates_year() {
        assert_eq!(copyright(2026), "© 2026 UniConnect");
    }
}
