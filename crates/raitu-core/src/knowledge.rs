//! Static organic farming knowledge base with search and topic filter.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Pest,
    Nutrition,
    Seasonal,
    Water,
}

pub const CATEGORIES: [Category; 4] = [
    Category::Pest,
    Category::Nutrition,
    Category::Seasonal,
    Category::Water,
];

impl Category {
    pub fn id(self) -> &'static str {
        match self {
            Category::Pest => "pest",
            Category::Nutrition => "nutrition",
            Category::Seasonal => "seasonal",
            Category::Water => "water",
        }
    }

    /// Translation key for the category's display name.
    pub fn name_key(self) -> &'static str {
        match self {
            Category::Pest => "knowledge.filter.pest",
            Category::Nutrition => "knowledge.filter.crop",
            Category::Seasonal => "knowledge.filter.seasonal",
            Category::Water => "knowledge.filter.water",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        CATEGORIES
            .into_iter()
            .find(|c| c.id() == wanted)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown category: {0} (expected one of pest, nutrition, seasonal, water)")]
pub struct ParseCategoryError(String);

/// A knowledge base article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: u32,
    pub title: &'static str,
    pub category: Category,
    /// "Traditional", "Modern" or both.
    pub kind: &'static str,
    pub description: &'static str,
    pub read_minutes: u32,
    pub content: &'static str,
}

pub fn articles() -> &'static [Article] {
    ARTICLES
}

/// The article with this id, if any.
pub fn article(id: u32) -> Option<&'static Article> {
    articles().iter().find(|a| a.id == id)
}

/// Articles whose title or description contains `query` (case-insensitive),
/// optionally restricted to one category. Empty query matches everything.
/// The query is matched as typed, surrounding spaces included.
pub fn search(query: &str, category: Option<Category>) -> Vec<&'static Article> {
    let query = query.to_lowercase();
    ARTICLES
        .iter()
        .filter(|a| {
            query.is_empty()
                || a.title.to_lowercase().contains(&query)
                || a.description.to_lowercase().contains(&query)
        })
        .filter(|a| category.map_or(true, |c| a.category == c))
        .collect()
}

const ARTICLES: &[Article] = &[
    Article {
        id: 1,
        title: "Natural Neem-Based Pest Control",
        category: Category::Pest,
        kind: "Traditional + Modern",
        description: "Learn how to prepare and use neem-based organic pesticides combining ancient wisdom with modern techniques",
        read_minutes: 5,
        content: "Neem has been used for centuries in traditional farming...",
    },
    Article {
        id: 2,
        title: "Composting Techniques for Rich Soil",
        category: Category::Nutrition,
        kind: "Traditional",
        description: "Create nutrient-rich compost using locally available materials following time-tested methods",
        read_minutes: 7,
        content: "Proper composting enriches soil naturally...",
    },
    Article {
        id: 3,
        title: "Monsoon Crop Planning Guide",
        category: Category::Seasonal,
        kind: "Modern",
        description: "Weather-based planning for optimal crop selection and care during monsoon season",
        read_minutes: 6,
        content: "Understanding monsoon patterns helps in crop selection...",
    },
    Article {
        id: 4,
        title: "Drip Irrigation with Local Resources",
        category: Category::Water,
        kind: "Traditional + Modern",
        description: "Set up efficient water conservation systems using affordable and locally available materials",
        read_minutes: 8,
        content: "Water conservation is crucial for sustainable farming...",
    },
    Article {
        id: 5,
        title: "Turmeric as Natural Fungicide",
        category: Category::Pest,
        kind: "Traditional",
        description: "Traditional recipe for turmeric-based antifungal treatment for crops",
        read_minutes: 4,
        content: "Turmeric's antifungal properties make it ideal...",
    },
    Article {
        id: 6,
        title: "Organic Fertilizer Preparation",
        category: Category::Nutrition,
        kind: "Traditional + Modern",
        description: "Step-by-step guide to creating balanced organic fertilizers from kitchen and farm waste",
        read_minutes: 6,
        content: "Organic fertilizers improve soil health over time...",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(found: &[&Article]) -> Vec<u32> {
        found.iter().map(|a| a.id).collect()
    }

    #[test]
    fn empty_query_returns_all() {
        assert_eq!(search("", None).len(), articles().len());
    }

    #[test]
    fn search_is_case_insensitive() {
        assert_eq!(ids(&search("NEEM", None)), [1]);
    }

    #[test]
    fn search_matches_description() {
        // "locally available" only appears in descriptions.
        assert_eq!(ids(&search("locally available", None)), [2, 4]);
    }

    #[test]
    fn category_filter() {
        assert_eq!(ids(&search("", Some(Category::Pest))), [1, 5]);
        assert_eq!(ids(&search("organic", Some(Category::Nutrition))), [6]);
        assert!(search("neem", Some(Category::Water)).is_empty());
    }

    #[test]
    fn query_is_not_trimmed() {
        assert_eq!(ids(&search("neem", None)), [1]);
        assert!(search("neem ", None).is_empty());
    }

    #[test]
    fn article_by_id() {
        let a = article(5).unwrap();
        assert_eq!(a.title, "Turmeric as Natural Fungicide");
        assert!(a.content.starts_with("Turmeric"));
        assert!(article(42).is_none());
    }

    #[test]
    fn parse_category() {
        assert_eq!("Water".parse::<Category>().unwrap(), Category::Water);
        assert!("soil".parse::<Category>().is_err());
    }
}
