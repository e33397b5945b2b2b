use super::{SubtopicNode, TopicMap, TopicNode};

fn subtopic(subtopics: [&str; 4], key_concepts: [&str; 4], importance: &str) -> SubtopicNode {
    SubtopicNode {
        subtopics: subtopics.iter().map(|s| s.to_string()).collect(),
        key_concepts: key_concepts.iter().map(|s| s.to_string()).collect(),
        importance: importance.to_string(),
    }
}

fn topic<const N: usize>(entries: [(&str, SubtopicNode); N]) -> TopicNode {
    TopicNode {
        subtopics: entries
            .into_iter()
            .map(|(name, node)| (name.to_string(), node))
            .collect(),
    }
}

pub(super) fn math_topics() -> TopicMap {
    let mut m = TopicMap::new();
    m.insert(
        "Heart of Algebra".into(),
        topic([
            (
                "Linear Equations",
                subtopic(
                    [
                        "Single-variable equations",
                        "Systems of linear equations",
                        "Linear inequalities",
                        "Graphing linear equations",
                    ],
                    [
                        "Solving for variables",
                        "Understanding slope and y-intercept",
                        "Interpreting graphs",
                        "Word problems with linear relationships",
                    ],
                    "High - 25-30% of Math section",
                ),
            ),
            (
                "Linear Functions",
                subtopic(
                    [
                        "Function notation",
                        "Domain and range",
                        "Function graphs",
                        "Linear modeling",
                    ],
                    [
                        "Understanding f(x) notation",
                        "Identifying functions",
                        "Real-world applications",
                        "Rate of change",
                    ],
                    "High - Part of algebra foundation",
                ),
            ),
        ]),
    );
    m.insert(
        "Problem Solving and Data Analysis".into(),
        topic([
            (
                "Statistics",
                subtopic(
                    [
                        "Mean, median, mode",
                        "Standard deviation",
                        "Interquartile range",
                        "Data interpretation",
                    ],
                    [
                        "Calculating central tendency",
                        "Understanding spread",
                        "Reading charts and graphs",
                        "Statistical significance",
                    ],
                    "Medium - 15-20% of Math section",
                ),
            ),
            (
                "Ratios and Proportions",
                subtopic(
                    [
                        "Unit rates",
                        "Proportional relationships",
                        "Percentage problems",
                        "Scale factors",
                    ],
                    [
                        "Setting up proportions",
                        "Cross multiplication",
                        "Unit conversion",
                        "Real-world applications",
                    ],
                    "High - Frequently tested",
                ),
            ),
        ]),
    );
    m.insert(
        "Passport to Advanced Math".into(),
        topic([
            (
                "Quadratic Equations",
                subtopic(
                    [
                        "Factoring",
                        "Completing the square",
                        "Quadratic formula",
                        "Graphing parabolas",
                    ],
                    [
                        "Finding roots",
                        "Vertex form",
                        "Maximum/minimum values",
                        "Word problems",
                    ],
                    "High - 15-20% of Math section",
                ),
            ),
            (
                "Polynomial Functions",
                subtopic(
                    [
                        "Operations with polynomials",
                        "Polynomial factors",
                        "Polynomial graphs",
                        "Complex numbers",
                    ],
                    [
                        "Factor theorem",
                        "Polynomial division",
                        "End behavior",
                        "Zeros of polynomials",
                    ],
                    "Medium - Advanced topic",
                ),
            ),
        ]),
    );
    m
}

pub(super) fn reading_topics() -> TopicMap {
    let mut m = TopicMap::new();
    m.insert(
        "Command of Evidence".into(),
        topic([(
            "Finding Evidence",
            subtopic(
                [
                    "Text citations",
                    "Data interpretation",
                    "Supporting claims",
                    "Multiple sources",
                ],
                [
                    "Identifying relevant evidence",
                    "Connecting ideas across passages",
                    "Evaluating support",
                    "Drawing conclusions",
                ],
                "High - Core reading skill",
            ),
        )]),
    );
    m.insert(
        "Words in Context".into(),
        topic([(
            "Vocabulary",
            subtopic(
                [
                    "Context clues",
                    "Multiple meanings",
                    "Tone and connotation",
                    "Academic vocabulary",
                ],
                [
                    "Using context",
                    "Word families",
                    "Denotation vs connotation",
                    "Root words",
                ],
                "High - Throughout reading section",
            ),
        )]),
    );
    m
}
