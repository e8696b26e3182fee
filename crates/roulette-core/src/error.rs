use crate::options::Label;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A level with no labels. Selection on such a level has no answer.
    #[error("empty option level at {}", display_path(.path))]
    EmptyLevel { path: Vec<Label> },
    /// A blank label; the committed value would read as nothing.
    #[error("blank label in option level at {}", display_path(.path))]
    BlankLabel { path: Vec<Label> },
    #[error("the hover roulette takes a flat option list, got {depth} levels")]
    NestedHover { depth: usize },
    #[error("invalid widget size {0}")]
    InvalidSize(String),
}

fn display_path(path: &[Label]) -> String {
    if path.is_empty() {
        return "<root>".to_string();
    }
    path.iter()
        .map(Label::as_str)
        .collect::<Vec<_>>()
        .join(" / ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_level_names_its_path() {
        let root = Error::EmptyLevel { path: vec![] };
        assert_eq!(root.to_string(), "empty option level at <root>");

        let nested = Error::EmptyLevel {
            path: vec![Label::new("Região Sul"), Label::new("Faro")],
        };
        assert_eq!(
            nested.to_string(),
            "empty option level at Região Sul / Faro"
        );
    }

    #[test]
    fn blank_label_and_nested_hover_messages() {
        let blank = Error::BlankLabel {
            path: vec![Label::new("Região Norte")],
        };
        assert_eq!(
            blank.to_string(),
            "blank label in option level at Região Norte"
        );
        assert_eq!(
            Error::NestedHover { depth: 2 }.to_string(),
            "the hover roulette takes a flat option list, got 2 levels"
        );
    }
}
