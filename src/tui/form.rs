//! Modal "New Topic" / "New Subtopic" forms.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::catalog::{Catalog, Subject};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Topic,
    Subtopic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Subject,
    Topic,
    Name,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormRequest {
    AddTopic {
        subject: Subject,
        name: String,
    },
    AddSubtopic {
        subject: Subject,
        topic: String,
        name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Pending,
    Cancel,
    Submit(FormRequest),
}

#[derive(Debug, Clone)]
pub struct EntryForm {
    pub kind: FormKind,
    pub subject: Subject,
    pub field: Field,
    pub name: String,
    pub error: Option<&'static str>,
    math_topics: Vec<String>,
    reading_topics: Vec<String>,
    topic_idx: usize,
}

impl EntryForm {
    pub fn new(kind: FormKind, subject: Subject, catalog: &Catalog) -> Self {
        Self {
            kind,
            subject,
            field: Field::Subject,
            name: String::new(),
            error: None,
            math_topics: catalog.topic_names(Subject::Math),
            reading_topics: catalog.topic_names(Subject::Reading),
            topic_idx: 0,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            FormKind::Topic => " Add New Topic ",
            FormKind::Subtopic => " Add New Subtopic ",
        }
    }

    pub fn fields(&self) -> &'static [Field] {
        match self.kind {
            FormKind::Topic => &[Field::Subject, Field::Name],
            FormKind::Subtopic => &[Field::Subject, Field::Topic, Field::Name],
        }
    }

    pub fn topics(&self) -> &[String] {
        match self.subject {
            Subject::Math => &self.math_topics,
            Subject::Reading => &self.reading_topics,
        }
    }

    pub fn selected_topic(&self) -> Option<&str> {
        self.topics().get(self.topic_idx).map(String::as_str)
    }

    fn step_field(&mut self, delta: isize) {
        let fields = self.fields();
        let pos = fields.iter().position(|f| *f == self.field).unwrap_or(0) as isize;
        let n = fields.len() as isize;
        self.field = fields[((pos + delta).rem_euclid(n)) as usize];
    }

    fn cycle_choice(&mut self, delta: isize) {
        match self.field {
            Field::Subject => {
                self.subject = self.subject.other();
                self.topic_idx = 0;
            }
            Field::Topic => {
                let n = self.topics().len() as isize;
                if n > 0 {
                    self.topic_idx = ((self.topic_idx as isize + delta).rem_euclid(n)) as usize;
                }
            }
            Field::Name => {}
        }
    }

    pub fn handle_key(&mut self, k: &KeyEvent) -> FormOutcome {
        match (k.code, k.modifiers) {
            (KeyCode::Esc, _) => return FormOutcome::Cancel,
            (KeyCode::Enter, _) => match self.request() {
                Ok(req) => return FormOutcome::Submit(req),
                Err(msg) => self.error = Some(msg),
            },
            (KeyCode::Tab, _) | (KeyCode::Down, _) => self.step_field(1),
            (KeyCode::BackTab, _) | (KeyCode::Up, _) => self.step_field(-1),
            (KeyCode::Left, _) => self.cycle_choice(-1),
            (KeyCode::Right, _) => self.cycle_choice(1),
            (KeyCode::Backspace, _) if self.field == Field::Name => {
                self.name.pop();
            }
            (KeyCode::Char(ch), m) if self.field == Field::Name && !m.contains(KeyModifiers::CONTROL) => {
                self.name.push(ch);
                self.error = None;
            }
            (KeyCode::Char(' '), _) => self.cycle_choice(1),
            _ => {}
        }
        FormOutcome::Pending
    }

    /// Empty names are the only thing rejected.
    pub fn request(&self) -> Result<FormRequest, &'static str> {
        let name = self.name.trim();
        match self.kind {
            FormKind::Topic => {
                if name.is_empty() {
                    return Err("Please enter a topic name");
                }
                Ok(FormRequest::AddTopic {
                    subject: self.subject,
                    name: name.to_string(),
                })
            }
            FormKind::Subtopic => match self.selected_topic() {
                Some(topic) if !name.is_empty() => Ok(FormRequest::AddSubtopic {
                    subject: self.subject,
                    topic: topic.to_string(),
                    name: name.to_string(),
                }),
                _ => Err("Please fill in all fields"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(form: &mut EntryForm, s: &str) {
        for ch in s.chars() {
            form.handle_key(&key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn empty_topic_name_is_rejected() {
        let mut form = EntryForm::new(FormKind::Topic, Subject::Math, &Catalog::builtin());
        assert_eq!(form.handle_key(&key(KeyCode::Enter)), FormOutcome::Pending);
        assert_eq!(form.error, Some("Please enter a topic name"));
    }

    #[test]
    fn topic_form_submits_trimmed_name_for_chosen_subject() {
        let mut form = EntryForm::new(FormKind::Topic, Subject::Math, &Catalog::builtin());
        form.handle_key(&key(KeyCode::Right));
        form.handle_key(&key(KeyCode::Tab));
        assert_eq!(form.field, Field::Name);
        type_str(&mut form, " Grammar ");
        assert_eq!(
            form.handle_key(&key(KeyCode::Enter)),
            FormOutcome::Submit(FormRequest::AddTopic {
                subject: Subject::Reading,
                name: "Grammar".into()
            })
        );
    }

    #[test]
    fn subtopic_form_cycles_topics_of_subject() {
        let mut form = EntryForm::new(FormKind::Subtopic, Subject::Math, &Catalog::builtin());
        assert_eq!(form.selected_topic(), Some("Heart of Algebra"));
        form.handle_key(&key(KeyCode::Tab));
        assert_eq!(form.field, Field::Topic);
        form.handle_key(&key(KeyCode::Left));
        assert_eq!(form.selected_topic(), Some("Passport to Advanced Math"));
        form.handle_key(&key(KeyCode::Tab));
        assert_eq!(form.handle_key(&key(KeyCode::Enter)), FormOutcome::Pending);
        assert_eq!(form.error, Some("Please fill in all fields"));
        type_str(&mut form, "Exponents");
        assert_eq!(
            form.handle_key(&key(KeyCode::Enter)),
            FormOutcome::Submit(FormRequest::AddSubtopic {
                subject: Subject::Math,
                topic: "Passport to Advanced Math".into(),
                name: "Exponents".into()
            })
        );
    }

    #[test]
    fn esc_cancels() {
        let mut form = EntryForm::new(FormKind::Subtopic, Subject::Reading, &Catalog::builtin());
        assert_eq!(form.handle_key(&key(KeyCode::Esc)), FormOutcome::Cancel);
    }
}
