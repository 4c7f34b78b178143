use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Member(String), // .name
    Index(usize),   // [0]
}

/// Location of the current comparison inside the expectation graph.
///
/// Displays as `inner.name` or `items[2].id`; the root displays as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberPath {
    segments: Vec<Segment>,
}

impl MemberPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn member(&self, name: &str) -> Self {
        self.with(Segment::Member(name.to_string()))
    }

    pub fn index(&self, index: usize) -> Self {
        self.with(Segment::Index(index))
    }

    /// Human-readable subject of a failure message: `subject` or `member a.b`.
    pub fn describe(&self) -> String {
        if self.is_root() {
            "subject".to_string()
        } else {
            format!("member {self}")
        }
    }

    fn with(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }
}

impl fmt::Display for MemberPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Member(name) if i == 0 => f.write_str(name)?,
                Segment::Member(name) => write!(f, ".{name}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_members_and_indices() {
        let path = MemberPath::root().member("items").index(2).member("id");
        assert_eq!(path.to_string(), "items[2].id");
        assert_eq!(path.describe(), "member items[2].id");
    }

    #[test]
    fn root_is_the_subject() {
        assert_eq!(MemberPath::root().describe(), "subject");
        assert_eq!(MemberPath::root().index(0).to_string(), "[0]");
    }
}
