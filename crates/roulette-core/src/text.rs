use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub width: f64,
    /// Font bounding box height (ascent + descent).
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line<'a> {
    pub text: &'a str,
    /// Baseline origin handed to `fill_text`.
    pub origin: Point,
}

/// Breaks `text` on spaces and stacks the words as lines centered on `anchor`.
pub fn stack_lines<'a, E>(
    text: &'a str,
    anchor: Point,
    line_height: f64,
    mut width_of: impl FnMut(&str) -> Result<f64, E>,
) -> Result<Vec<Line<'a>>, E> {
    let words: Vec<&str> = text.split(' ').collect();
    let block = words.len() as f64 * line_height;

    words
        .into_iter()
        .enumerate()
        .map(|(i, word)| {
            let width = width_of(word)?;
            Ok(Line {
                text: word,
                origin: Point::new(
                    anchor.x - width / 2.0,
                    anchor.y - block / 2.0 + (i as f64 + 0.75) * line_height,
                ),
            })
        })
        .collect()
}
