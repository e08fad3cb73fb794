use crate::foundation::error::PostreelResult;

/// Horizontal advance of a run of text, in pixels.
pub trait TextMeasure {
    fn measure(&mut self, text: &str) -> PostreelResult<f32>;
}

/// Fixed advance per `char`; handy for tests and for sizing estimates.
#[derive(Clone, Copy, Debug)]
pub struct MonospaceMeasure {
    pub advance_px: f32,
}

impl TextMeasure for MonospaceMeasure {
    fn measure(&mut self, text: &str) -> PostreelResult<f32> {
        Ok(text.chars().count() as f32 * self.advance_px)
    }
}

/// Greedy word wrap by measured width.
///
/// Words are separated by single spaces. A candidate line is measured with its trailing space,
/// and a word only moves to a new line when the current one is non-empty, so a word wider than
/// `max_width_px` sits alone on its own line. Returned lines carry no trailing space.
pub fn wrap_greedy(
    text: &str,
    max_width_px: f32,
    measure: &mut dyn TextMeasure,
) -> PostreelResult<Vec<String>> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split(' ') {
        let mut candidate = String::with_capacity(current.len() + word.len() + 1);
        candidate.push_str(&current);
        candidate.push_str(word);
        candidate.push(' ');

        if measure.measure(&candidate)? > max_width_px && !current.is_empty() {
            lines.push(finish_line(&current));
            current.clear();
            current.push_str(word);
            current.push(' ');
        } else {
            current = candidate;
        }
    }
    lines.push(finish_line(&current));

    Ok(lines)
}

fn finish_line(line: &str) -> String {
    line.strip_suffix(' ').unwrap_or(line).to_owned()
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
