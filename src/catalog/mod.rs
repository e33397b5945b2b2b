//! Subject → topic → subtopic → concept taxonomy.
//!
//! Built-in entries come from [`builtin`]; users may append topics and
//! subtopics at runtime. Nothing is ever removed or renamed.

mod builtin;

use clap::ValueEnum;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Separator between path segments in a topic path.
pub const PATH_SEPARATOR: &str = " - ";

/// Importance label given to subtopics created at runtime.
pub const UNSPECIFIED_IMPORTANCE: &str = "Not specified";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Subject {
    #[value(alias = "Math")]
    Math,
    #[value(alias = "Reading")]
    Reading,
}

impl Subject {
    pub const ALL: [Subject; 2] = [Subject::Math, Subject::Reading];

    /// First segment of every topic path under this subject.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Math => "Math",
            Self::Reading => "Reading",
        }
    }

    /// Key under `custom_topics` in the persisted document.
    pub fn storage_key(&self) -> &'static str {
        match self {
            Self::Math => "math",
            Self::Reading => "reading",
        }
    }

    pub fn tab_title(&self) -> &'static str {
        match self {
            Self::Math => "Mathematics",
            Self::Reading => "Reading",
        }
    }

    pub fn other(&self) -> Subject {
        match self {
            Self::Math => Self::Reading,
            Self::Reading => Self::Math,
        }
    }
}

/// Leaf-level catalog node: carries the study metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtopicNode {
    #[serde(default)]
    pub subtopics: Vec<String>,
    #[serde(default)]
    pub key_concepts: Vec<String>,
    #[serde(default = "default_importance")]
    pub importance: String,
}

fn default_importance() -> String {
    UNSPECIFIED_IMPORTANCE.into()
}

impl Default for SubtopicNode {
    fn default() -> Self {
        Self {
            subtopics: vec![],
            key_concepts: vec![],
            importance: default_importance(),
        }
    }
}

/// Topic-level node: only an ordered set of named subtopics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicNode {
    pub subtopics: IndexMap<String, SubtopicNode>,
}

pub type TopicMap = IndexMap<String, TopicNode>;

/// One visible row of a subject tree.
///
/// `subtopic` is set for subtopic and concept rows, `concept` only for
/// concept rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
    pub topic: String,
    pub subtopic: Option<String>,
    pub concept: Option<String>,
}

impl CatalogRow {
    pub fn depth(&self) -> usize {
        match (&self.subtopic, &self.concept) {
            (None, _) => 0,
            (Some(_), None) => 1,
            (Some(_), Some(_)) => 2,
        }
    }

    pub fn label(&self) -> &str {
        self.concept
            .as_deref()
            .or(self.subtopic.as_deref())
            .unwrap_or(&self.topic)
    }

    pub fn path(&self, subject: Subject) -> String {
        let mut segments = vec![self.topic.as_str()];
        segments.extend(self.subtopic.as_deref());
        segments.extend(self.concept.as_deref());
        topic_path(subject, segments)
    }
}

/// Joins the subject label and node names into the record key.
pub fn topic_path<'a, I>(subject: Subject, segments: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut path = String::from(subject.label());
    for seg in segments {
        path.push_str(PATH_SEPARATOR);
        path.push_str(seg);
    }
    path
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    math: TopicMap,
    reading: TopicMap,
}

impl Catalog {
    /// The seeded taxonomy shipped with the application.
    pub fn builtin() -> Self {
        Self {
            math: builtin::math_topics(),
            reading: builtin::reading_topics(),
        }
    }

    pub fn topics(&self, subject: Subject) -> &TopicMap {
        match subject {
            Subject::Math => &self.math,
            Subject::Reading => &self.reading,
        }
    }

    fn topics_mut(&mut self, subject: Subject) -> &mut TopicMap {
        match subject {
            Subject::Math => &mut self.math,
            Subject::Reading => &mut self.reading,
        }
    }

    pub fn topic_names(&self, subject: Subject) -> Vec<String> {
        self.topics(subject).keys().cloned().collect()
    }

    /// Inserts an empty topic. An existing topic of the same name is
    /// replaced by the empty one and keeps its position; the replaced node
    /// is returned.
    pub fn add_topic(&mut self, subject: Subject, name: &str) -> Option<TopicNode> {
        let prev = self
            .topics_mut(subject)
            .insert(name.to_string(), TopicNode::default());
        tracing::info!(
            subject = subject.label(),
            topic = name,
            replaced = prev.is_some(),
            "added topic"
        );
        prev
    }

    /// Inserts a fresh subtopic under an existing topic. Returns `false`
    /// and leaves the catalog untouched when the topic does not exist.
    pub fn add_subtopic(&mut self, subject: Subject, topic: &str, name: &str) -> bool {
        let Some(node) = self.topics_mut(subject).get_mut(topic) else {
            tracing::debug!(subject = subject.label(), topic, "add_subtopic: no such topic");
            return false;
        };
        node.subtopics
            .insert(name.to_string(), SubtopicNode::default());
        tracing::info!(subject = subject.label(), topic, subtopic = name, "added subtopic");
        true
    }

    pub fn subtopic(&self, subject: Subject, topic: &str, name: &str) -> Option<&SubtopicNode> {
        self.topics(subject).get(topic)?.subtopics.get(name)
    }

    /// Shallow merge by topic name: incoming topics replace same-named ones
    /// in place, new names are appended.
    pub fn merge_topics(&mut self, subject: Subject, incoming: TopicMap) {
        let topics = self.topics_mut(subject);
        for (name, node) in incoming {
            topics.insert(name, node);
        }
    }

    /// Rows of the subject tree in display order.
    pub fn enumerate(&self, subject: Subject) -> Vec<CatalogRow> {
        let mut rows = Vec::new();
        for (topic, node) in self.topics(subject) {
            rows.push(CatalogRow {
                topic: topic.clone(),
                subtopic: None,
                concept: None,
            });
            for (sub, details) in &node.subtopics {
                rows.push(CatalogRow {
                    topic: topic.clone(),
                    subtopic: Some(sub.clone()),
                    concept: None,
                });
                for concept in &details.subtopics {
                    rows.push(CatalogRow {
                        topic: topic.clone(),
                        subtopic: Some(sub.clone()),
                        concept: Some(concept.clone()),
                    });
                }
            }
        }
        rows
    }

    /// Whether `path` names a row currently shown in either subject tree.
    pub fn contains_path(&self, path: &str) -> bool {
        Subject::ALL.iter().any(|&subject| {
            path.starts_with(subject.label())
                && self
                    .enumerate(subject)
                    .iter()
                    .any(|row| row.path(subject) == path)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(c: &Catalog, s: Subject) -> Vec<String> {
        c.topic_names(s)
    }

    #[test]
    fn builtin_has_expected_shape() {
        let c = Catalog::builtin();
        assert_eq!(
            names(&c, Subject::Math),
            vec![
                "Heart of Algebra",
                "Problem Solving and Data Analysis",
                "Passport to Advanced Math"
            ]
        );
        assert_eq!(
            names(&c, Subject::Reading),
            vec!["Command of Evidence", "Words in Context"]
        );
        for subject in Subject::ALL {
            for node in c.topics(subject).values() {
                assert!((1..=2).contains(&node.subtopics.len()));
                for sub in node.subtopics.values() {
                    assert_eq!(sub.subtopics.len(), 4);
                    assert_eq!(sub.key_concepts.len(), 4);
                    assert!(!sub.importance.is_empty());
                }
            }
        }
    }

    #[test]
    fn add_topic_appends_once() {
        let mut c = Catalog::builtin();
        assert!(c.add_topic(Subject::Math, "NewAlgebra").is_none());
        let topics = names(&c, Subject::Math);
        assert_eq!(topics.last().map(String::as_str), Some("NewAlgebra"));
        assert_eq!(topics.iter().filter(|t| *t == "NewAlgebra").count(), 1);
        // reading untouched
        assert_eq!(names(&c, Subject::Reading).len(), 2);
    }

    #[test]
    fn add_topic_overwrites_existing_in_place() {
        let mut c = Catalog::builtin();
        let prev = c.add_topic(Subject::Math, "Heart of Algebra");
        assert_eq!(prev.map(|n| n.subtopics.len()), Some(2));
        assert_eq!(names(&c, Subject::Math)[0], "Heart of Algebra");
        assert!(c.topics(Subject::Math)["Heart of Algebra"]
            .subtopics
            .is_empty());
    }

    #[test]
    fn add_subtopic_under_missing_topic_is_noop() {
        let mut c = Catalog::builtin();
        let before = c.clone();
        assert!(!c.add_subtopic(Subject::Math, "NonexistentTopic", "X"));
        assert_eq!(c, before);
    }

    #[test]
    fn add_subtopic_uses_default_metadata() {
        let mut c = Catalog::builtin();
        assert!(c.add_subtopic(Subject::Reading, "Words in Context", "Idioms"));
        let node = c
            .subtopic(Subject::Reading, "Words in Context", "Idioms")
            .unwrap();
        assert!(node.subtopics.is_empty());
        assert!(node.key_concepts.is_empty());
        assert_eq!(node.importance, "Not specified");
    }

    #[test]
    fn enumerate_preserves_order_and_paths() {
        let c = Catalog::builtin();
        let rows = c.enumerate(Subject::Reading);
        let labels: Vec<_> = rows.iter().map(|r| (r.depth(), r.label())).collect();
        assert_eq!(labels[0], (0, "Command of Evidence"));
        assert_eq!(labels[1], (1, "Finding Evidence"));
        assert_eq!(labels[2], (2, "Text citations"));
        assert_eq!(labels[6], (0, "Words in Context"));
        assert_eq!(rows.len(), 12);
        assert_eq!(
            rows[2].path(Subject::Reading),
            "Reading - Command of Evidence - Finding Evidence - Text citations"
        );
    }

    #[test]
    fn topic_path_joins_with_separator() {
        assert_eq!(
            topic_path(Subject::Math, ["Heart of Algebra", "Linear Equations"]),
            "Math - Heart of Algebra - Linear Equations"
        );
        assert_eq!(topic_path(Subject::Reading, [] as [&str; 0]), "Reading");
    }

    #[test]
    fn contains_path_matches_rows_only() {
        let mut c = Catalog::builtin();
        assert!(c.contains_path("Math - Heart of Algebra - Linear Equations"));
        assert!(c.contains_path("Math - Heart of Algebra"));
        assert!(!c.contains_path("Math - Heart of algebra"));
        assert!(!c.contains_path("Reading - Heart of Algebra"));
        c.add_topic(Subject::Reading, "Grammar");
        assert!(c.contains_path("Reading - Grammar"));
    }

    #[test]
    fn merge_replaces_by_name_and_is_idempotent() {
        let mut c = Catalog::builtin();
        let mut incoming = TopicMap::new();
        let mut custom = TopicNode::default();
        custom
            .subtopics
            .insert("Exponents".into(), SubtopicNode::default());
        incoming.insert("Custom".into(), custom.clone());
        c.merge_topics(Subject::Math, incoming.clone());
        c.merge_topics(Subject::Math, incoming);
        let topics = names(&c, Subject::Math);
        assert_eq!(topics.iter().filter(|t| *t == "Custom").count(), 1);
        assert_eq!(c.topics(Subject::Math)["Custom"], custom);
    }

    #[test]
    fn subtopic_node_deserializes_with_defaults() {
        let node: SubtopicNode = serde_json::from_str(r#"{"subtopics": ["a"]}"#).unwrap();
        assert_eq!(node.subtopics, vec!["a"]);
        assert!(node.key_concepts.is_empty());
        assert_eq!(node.importance, UNSPECIFIED_IMPORTANCE);
    }
}
