use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    MoveDown,
    MoveUp,
    SwitchTab,
    RatingUp,
    RatingDown,
    EditNotes,
    NewTopic,
    NewSubtopic,
    ResizeLeftShrink,
    ResizeLeftExpand,
    Reload,
    Quit,
}

pub type KeyMap = HashMap<char, KeyAction>;

/// Entries from the `[keys]` table are layered over the defaults; keys
/// that are not a single character or name no known action are skipped.
pub fn keymap_from(overrides: &HashMap<String, String>) -> KeyMap {
    let mut out = default_keymap();
    for (k, v) in overrides {
        let mut chars = k.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            tracing::warn!(key = %k, "keymap: key must be a single character");
            continue;
        };
        match action_from_str(v) {
            Some(act) => {
                out.insert(ch, act);
            }
            None => tracing::warn!(key = %k, action = %v, "keymap: unknown action"),
        }
    }
    out
}

fn action_from_str(s: &str) -> Option<KeyAction> {
    use KeyAction::*;
    Some(match s {
        "down" => MoveDown,
        "up" => MoveUp,
        "switch_tab" => SwitchTab,
        "rating_up" => RatingUp,
        "rating_down" => RatingDown,
        "edit_notes" => EditNotes,
        "new_topic" => NewTopic,
        "new_subtopic" => NewSubtopic,
        "shrink_left" => ResizeLeftShrink,
        "expand_left" => ResizeLeftExpand,
        "reload" => Reload,
        "quit" => Quit,
        _ => return None,
    })
}

pub fn default_keymap() -> KeyMap {
    use KeyAction::*;
    let mut m = HashMap::new();
    m.insert('j', MoveDown);
    m.insert('k', MoveUp);
    m.insert('+', RatingUp);
    m.insert('=', RatingUp);
    m.insert('-', RatingDown);
    m.insert('e', EditNotes);
    m.insert('t', NewTopic);
    m.insert('s', NewSubtopic);
    m.insert('<', ResizeLeftShrink);
    m.insert('>', ResizeLeftExpand);
    m.insert('R', Reload);
    m.insert('q', Quit);
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_layer_on_defaults() {
        let mut o = HashMap::new();
        o.insert("p".to_string(), "rating_up".to_string());
        o.insert("x".to_string(), "launch_rockets".to_string());
        o.insert("ab".to_string(), "quit".to_string());
        let km = keymap_from(&o);
        assert_eq!(km.get(&'p'), Some(&KeyAction::RatingUp));
        assert_eq!(km.get(&'q'), Some(&KeyAction::Quit));
        assert!(!km.contains_key(&'x'));
        assert!(!km.contains_key(&'a'));
    }
}
