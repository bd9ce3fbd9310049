//! Plain-text step renderer for terminal output.

use ncahp_core::wizard::{StepRenderer, StepView};

/// Width of the progress bar in characters.
const BAR_WIDTH: usize = 20;

pub struct TextRenderer;

impl StepRenderer for TextRenderer {
    type Output = String;

    fn render(&self, view: &StepView<'_>) -> String {
        let descriptor = view.descriptor;
        let filled = BAR_WIDTH * usize::from(view.position) / usize::from(view.total.max(1));

        let mut line = format!(
            "[{}{}] {}/{} {}: {}",
            "#".repeat(filled),
            "-".repeat(BAR_WIDTH - filled),
            view.position,
            view.total,
            descriptor.title,
            descriptor.description,
        );
        if descriptor.is_optional {
            line.push_str(" (optional)");
        }
        if view.is_terminal {
            line.push_str(" [submit]");
        } else if !view.can_advance {
            line.push_str(" [incomplete]");
        }
        line
    }
}
