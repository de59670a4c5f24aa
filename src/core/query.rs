//! Tag queries for `next_tag`

/// Which tag `next_tag` should stop on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TagQuery {
    /// The next opening tag of any name
    #[default]
    Any,
    /// The next opening tag with exactly this name
    ByName(String),
    /// Every given filter must hold
    ByFilter {
        tag_name: Option<String>,
        /// 1-based: stop on the Nth matching tag
        match_offset: Option<usize>,
        /// Also stop on closing tags
        visit_closers: bool,
    },
}

impl TagQuery {
    pub fn name(name: impl Into<String>) -> Self {
        TagQuery::ByName(name.into())
    }

    pub fn filter() -> Self {
        TagQuery::ByFilter {
            tag_name: None,
            match_offset: None,
            visit_closers: false,
        }
    }

    /// Restrict a query to one tag name
    pub fn with_tag_name(self, name: impl Into<String>) -> Self {
        match self.into_filter() {
            TagQuery::ByFilter {
                match_offset,
                visit_closers,
                ..
            } => TagQuery::ByFilter {
                tag_name: Some(name.into()),
                match_offset,
                visit_closers,
            },
            other => other,
        }
    }

    /// Stop on the Nth match. Offsets below 1 are ignored.
    pub fn with_match_offset(self, offset: usize) -> Self {
        match self.into_filter() {
            TagQuery::ByFilter {
                tag_name,
                visit_closers,
                ..
            } => TagQuery::ByFilter {
                tag_name,
                match_offset: (offset > 0).then_some(offset),
                visit_closers,
            },
            other => other,
        }
    }

    pub fn visiting_closers(self) -> Self {
        match self.into_filter() {
            TagQuery::ByFilter {
                tag_name,
                match_offset,
                ..
            } => TagQuery::ByFilter {
                tag_name,
                match_offset,
                visit_closers: true,
            },
            other => other,
        }
    }

    fn into_filter(self) -> Self {
        match self {
            TagQuery::Any => TagQuery::filter(),
            TagQuery::ByName(name) => TagQuery::ByFilter {
                tag_name: Some(name),
                match_offset: None,
                visit_closers: false,
            },
            filter => filter,
        }
    }

    pub fn tag_name(&self) -> Option<&str> {
        match self {
            TagQuery::Any => None,
            TagQuery::ByName(name) => Some(name.as_str()),
            TagQuery::ByFilter { tag_name, .. } => tag_name.as_deref(),
        }
    }

    pub fn match_offset(&self) -> usize {
        match self {
            TagQuery::ByFilter {
                match_offset: Some(offset),
                ..
            } => *offset,
            _ => 1,
        }
    }

    pub fn visits_closers(&self) -> bool {
        matches!(
            self,
            TagQuery::ByFilter {
                visit_closers: true,
                ..
            }
        )
    }
}

impl From<&str> for TagQuery {
    fn from(name: &str) -> Self {
        TagQuery::ByName(name.to_string())
    }
}

impl From<String> for TagQuery {
    fn from(name: String) -> Self {
        TagQuery::ByName(name)
    }
}

impl From<Option<&str>> for TagQuery {
    fn from(name: Option<&str>) -> Self {
        name.map_or(TagQuery::Any, TagQuery::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let query = TagQuery::Any;
        assert_eq!(query.tag_name(), None);
        assert_eq!(query.match_offset(), 1);
        assert!(!query.visits_closers());
    }

    #[test]
    fn test_builders() {
        let query = TagQuery::name("item").with_match_offset(3).visiting_closers();
        assert_eq!(query.tag_name(), Some("item"));
        assert_eq!(query.match_offset(), 3);
        assert!(query.visits_closers());

        let query = TagQuery::filter().with_tag_name("a").with_match_offset(0);
        assert_eq!(query.match_offset(), 1);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(TagQuery::from("div"), TagQuery::ByName("div".into()));
        assert_eq!(TagQuery::from(None), TagQuery::Any);
    }
}
