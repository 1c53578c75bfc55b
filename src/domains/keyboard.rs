use serde::{Deserialize, Serialize};

/// What pressing a button does: either a callback payload routed back into
/// the bot, or an external URL opened by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonAction {
    Callback(String),
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    pub action: ButtonAction,
}

impl Button {
    pub fn callback(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Callback(payload.into()),
        }
    }

    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Url(url.into()),
        }
    }
}

/// An inline keyboard as pure data: an ordered grid of buttons. Rendering
/// the grid is the transport's job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn new(rows: Vec<Vec<Button>>) -> Self {
        Self { rows }
    }

    /// Single row with a single button, the common "back" layout.
    pub fn single(button: Button) -> Self {
        Self {
            rows: vec![vec![button]],
        }
    }

    /// Wraps a flat button list into rows using a per-row arity hint, e.g.
    /// `&[2, 2, 1, 1]`. Buttons left over after the hint is exhausted get
    /// one per row; a zero arity is skipped.
    pub fn from_flat(buttons: Vec<Button>, arity: &[usize]) -> Self {
        let mut rows = Vec::new();
        let mut iter = buttons.into_iter();
        for &width in arity {
            if width == 0 {
                continue;
            }
            let row: Vec<Button> = iter.by_ref().take(width).collect();
            if row.is_empty() {
                break;
            }
            rows.push(row);
        }
        for button in iter {
            rows.push(vec![button]);
        }
        Self { rows }
    }

    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }
}
