//! Tab label derivation.
//!
//! A label is a pure function of the slot's title and its position, so
//! whenever positions change the affected labels are recomputed instead of
//! copied.

use qelly_config::TabLabelStyle;

/// Computes the displayed label of a slot
pub trait LabelScheme {
    fn label(&self, title: &str, index: usize) -> String;
}

/// Shows the title unchanged
#[derive(Debug, Default, Clone, Copy)]
pub struct TitleLabels;

impl LabelScheme for TitleLabels {
    fn label(&self, title: &str, _index: usize) -> String {
        title.to_string()
    }
}

/// Prefixes the title with its 1-based position, matching the numeric
/// shortcuts (`10` is reached with `0`)
#[derive(Debug, Default, Clone, Copy)]
pub struct NumberedLabels;

impl LabelScheme for NumberedLabels {
    fn label(&self, title: &str, index: usize) -> String {
        format!("{}. {}", index + 1, title)
    }
}

/// Build the scheme selected in the config
pub fn scheme_for(style: TabLabelStyle) -> Box<dyn LabelScheme> {
    match style {
        TabLabelStyle::Title => Box::new(TitleLabels),
        TabLabelStyle::Numbered => Box::new(NumberedLabels),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_labels() {
        assert_eq!(TitleLabels.label("ptt.cc", 4), "ptt.cc");
    }

    #[test]
    fn test_numbered_labels() {
        assert_eq!(NumberedLabels.label("ptt.cc", 0), "1. ptt.cc");
        assert_eq!(NumberedLabels.label("ptt.cc", 9), "10. ptt.cc");
    }

    #[test]
    fn test_scheme_for_style() {
        assert_eq!(scheme_for(TabLabelStyle::Numbered).label("a", 2), "3. a");
        assert_eq!(scheme_for(TabLabelStyle::Title).label("a", 2), "a");
    }
}
