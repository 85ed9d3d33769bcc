pub(crate) mod document;

/// A presentation.
///
/// This owns the slides and keeps track of which one is being displayed.
#[derive(Debug)]
pub(crate) struct Presentation {
    slides: Vec<String>,
    current_slide_index: usize,
}

impl Presentation {
    /// Construct a new presentation.
    ///
    /// An empty list of slides is turned into a single empty slide.
    pub(crate) fn new(mut slides: Vec<String>) -> Self {
        if slides.is_empty() {
            slides.push(String::new());
        }
        Self { slides, current_slide_index: 0 }
    }

    /// Iterate the slides in this presentation.
    pub(crate) fn iter_slides(&self) -> impl Iterator<Item = &String> {
        self.slides.iter()
    }

    /// Get the current slide.
    pub(crate) fn current_slide(&self) -> &str {
        &self.slides[self.current_slide_index]
    }

    /// Get the current slide index.
    pub(crate) fn current_slide_index(&self) -> usize {
        self.current_slide_index
    }

    pub(crate) fn total_slides(&self) -> usize {
        self.slides.len()
    }

    /// Jump forwards.
    ///
    /// Returns whether the current slide changed.
    pub(crate) fn jump_next(&mut self) -> bool {
        if self.current_slide_index < self.slides.len() - 1 {
            self.current_slide_index += 1;
            true
        } else {
            false
        }
    }

    /// Jump backwards.
    pub(crate) fn jump_previous(&mut self) -> bool {
        if self.current_slide_index > 0 {
            self.current_slide_index -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to the first slide.
    pub(crate) fn jump_first_slide(&mut self) -> bool {
        self.go_to_slide(0)
    }

    /// Jump to the last slide.
    pub(crate) fn jump_last_slide(&mut self) -> bool {
        let last_slide_index = self.slides.len().saturating_sub(1);
        self.go_to_slide(last_slide_index)
    }

    /// Jump to a specific slide.
    ///
    /// Indexes past the last slide are ignored.
    pub(crate) fn go_to_slide(&mut self, slide_index: usize) -> bool {
        if slide_index < self.slides.len() && slide_index != self.current_slide_index {
            self.current_slide_index = slide_index;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    fn presentation(count: usize) -> Presentation {
        Presentation::new((0..count).map(|index| format!("slide {index}")).collect())
    }

    #[test]
    fn previous_at_first_slide() {
        let mut presentation = presentation(3);
        assert!(!presentation.jump_previous());
        assert_eq!(presentation.current_slide_index(), 0);
    }

    #[test]
    fn next_at_last_slide() {
        let mut presentation = presentation(3);
        assert!(presentation.jump_next());
        assert!(presentation.jump_next());
        assert!(!presentation.jump_next());
        assert_eq!(presentation.current_slide_index(), 2);
        assert_eq!(presentation.current_slide(), "slide 2");
    }

    #[test]
    fn first_and_last() {
        let mut presentation = presentation(4);
        assert!(presentation.jump_last_slide());
        assert_eq!(presentation.current_slide_index(), 3);
        assert!(!presentation.jump_last_slide());
        assert!(presentation.jump_first_slide());
        assert_eq!(presentation.current_slide_index(), 0);
    }

    #[rstest]
    #[case::valid(2, true, 2)]
    #[case::current(0, false, 0)]
    #[case::out_of_bounds(10, false, 0)]
    fn go_to(#[case] index: usize, #[case] changed: bool, #[case] expected: usize) {
        let mut presentation = presentation(3);
        assert_eq!(presentation.go_to_slide(index), changed);
        assert_eq!(presentation.current_slide_index(), expected);
    }

    #[test]
    fn never_empty() {
        let mut presentation = Presentation::new(vec![]);
        assert_eq!(presentation.total_slides(), 1);
        assert!(!presentation.jump_next());
        assert!(!presentation.jump_previous());
        assert_eq!(presentation.current_slide(), "");
    }
}
