use std::fmt;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TopicError {
    #[error("no topic selected")]
    Empty,
}

/// Topics whose questions are generated instead of fetched from the trivia API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GeneratedTopic {
    BollywoodMovies,
    BollywoodMusic,
}

impl GeneratedTopic {
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::BollywoodMovies => "11",
            Self::BollywoodMusic => "12",
        }
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "11" => Some(Self::BollywoodMovies),
            "12" => Some(Self::BollywoodMusic),
            _ => None,
        }
    }
}

/// What the player picked, resolved to an acquisition family.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Topic {
    Generated(GeneratedTopic),
    Remote { category: String },
}

impl Topic {
    /// Resolve a topic identifier. Reserved identifiers select generated
    /// content; anything else is passed to the trivia API as a category.
    ///
    /// # Errors
    ///
    /// Returns `TopicError::Empty` for a blank identifier.
    pub fn parse(id: &str) -> Result<Self, TopicError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(TopicError::Empty);
        }
        Ok(GeneratedTopic::from_id(id).map_or_else(
            || Self::Remote {
                category: id.to_owned(),
            },
            Self::Generated,
        ))
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Generated(topic) => topic.id(),
            Self::Remote { category } => category,
        }
    }

    #[must_use]
    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }

    /// Display name from the catalog, if the identifier is listed.
    #[must_use]
    pub fn display_name(&self) -> Option<&'static str> {
        CATALOG
            .iter()
            .find(|info| info.id == self.id())
            .map(|info| info.name)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.display_name() {
            Some(name) => f.write_str(name),
            None => write!(f, "category {}", self.id()),
        }
    }
}

/// A selectable entry in the topic picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TopicInfo {
    pub id: &'static str,
    pub name: &'static str,
}

pub const CATALOG: &[TopicInfo] = &[
    TopicInfo {
        id: "9",
        name: "General Knowledge",
    },
    TopicInfo {
        id: "11",
        name: "Bollywood Movies",
    },
    TopicInfo {
        id: "12",
        name: "Bollywood Music",
    },
    TopicInfo {
        id: "17",
        name: "Science & Nature",
    },
    TopicInfo {
        id: "21",
        name: "Sports",
    },
    TopicInfo {
        id: "22",
        name: "Geography",
    },
    TopicInfo {
        id: "23",
        name: "History",
    },
];
