use crate::{
    input::user::{Command, UserInput},
    markup::{
        block::SlideRenderer,
        handlers::BlockHandlerRegistry,
        registry::{RegistryError, StyleRegistry},
        text_style::{Color, TextStyle},
        validate::{validate, ValidationError},
        RenderError,
    },
    presentation::{document::Document, Presentation},
    render::{ansi::truncate, block::StyledBlock, properties::ViewportGeometry, terminal::Terminal},
    ui::footer::StatusLine,
};
use std::{io, time::Duration};

const POLL_TIMEOUT: Duration = Duration::from_millis(250);
const ERROR_INDENT: &str = "  ";

/// A slideshow presenter.
///
/// This type puts everything else together.
pub struct Presenter {
    styles: StyleRegistry,
    handlers: BlockHandlerRegistry,
    status_line: StatusLine,
    viewport: ViewportGeometry,
    state: PresenterState,
}

impl Presenter {
    /// Construct a new presenter.
    ///
    /// The document's custom styles are merged with the built in ones, which fails if any of them
    /// is defined twice. Every slide is then validated: if any of them references an undefined style
    /// or block handler, the presenter will only display the list of errors.
    pub fn new(
        document: Document,
        handlers: BlockHandlerRegistry,
        viewport: ViewportGeometry,
    ) -> Result<Self, RegistryError> {
        let Document { config, slides } = document;
        let styles = StyleRegistry::new(&config.style)?;
        let presentation = Presentation::new(slides);
        let slides: Vec<_> = presentation.iter_slides().collect();
        let errors = validate(&slides, &styles, &handlers);
        let state = if errors.is_empty() {
            PresenterState::Presenting(presentation)
        } else {
            tracing::warn!("found {} errors in presentation", errors.len());
            for error in &errors {
                tracing::warn!("{error}");
            }
            PresenterState::Failure { errors, scroll: 0, presentation }
        };
        let status_line = StatusLine::new(config.author);
        Ok(Self { styles, handlers, status_line, viewport, state })
    }

    /// Run a presentation.
    pub fn present(mut self) -> Result<(), PresentationError> {
        let mut terminal = Terminal::new(io::stdout())?;
        let mut input = UserInput::default();
        loop {
            let frame = self.render_frame()?;
            terminal.draw_frame(&frame)?;
            loop {
                let Some(command) = input.poll_next_command(POLL_TIMEOUT)? else {
                    if self.handlers.poll_images() {
                        break;
                    }
                    continue;
                };
                match self.apply_command(command) {
                    CommandSideEffect::Exit => return Ok(()),
                    CommandSideEffect::Redraw => break,
                    CommandSideEffect::None => (),
                };
            }
        }
    }

    /// Render everything that should be on the screen.
    ///
    /// This is the current slide, or the list of errors, followed by the status line.
    pub(crate) fn render_frame(&self) -> Result<String, RenderError> {
        let presentation = self.state.presentation();
        let status = self.status_line.render(
            presentation.current_slide_index() + 1,
            presentation.total_slides(),
            self.viewport.width,
        );
        if self.viewport.content_rows() == 0 {
            return Ok(status);
        }
        let body = match &self.state {
            PresenterState::Presenting(presentation) => {
                let renderer = SlideRenderer::new(&self.styles, &self.handlers);
                renderer.render_slide(presentation.current_slide(), self.viewport)?
            }
            PresenterState::Failure { errors, scroll, .. } => self.render_errors(errors, *scroll),
        };
        Ok(format!("{body}\n{status}"))
    }

    fn render_errors(&self, errors: &[ValidationError], scroll: usize) -> String {
        let ViewportGeometry { width, .. } = self.viewport;
        let rows = self.viewport.content_rows();
        let max_width = (width as usize).saturating_sub(ERROR_INDENT.len());
        let heading_style = TextStyle::default().bold().fg_color(Color::Red);
        let error_style = TextStyle::default().fg_color(Color::Red);

        let heading = truncate(&format!("{} error(s) found", errors.len()), max_width);
        let mut lines = vec![String::new(), format!("{ERROR_INDENT}{}", heading_style.apply(heading)), String::new()];
        for error in errors.iter().skip(scroll) {
            let error = truncate(&error.to_string(), max_width);
            lines.push(format!("{ERROR_INDENT}{}", error_style.apply(error)));
        }
        StyledBlock::default().width(width).max_width(width).height(rows).max_height(rows).render(&lines.join("\n"))
    }

    pub(crate) fn apply_command(&mut self, command: Command) -> CommandSideEffect {
        let needs_redraw = match command {
            Command::Exit => return CommandSideEffect::Exit,
            Command::Resize { width, height } => {
                self.viewport = ViewportGeometry::new(width, height);
                true
            }
            command => self.state.navigate(command),
        };
        if needs_redraw { CommandSideEffect::Redraw } else { CommandSideEffect::None }
    }
}

pub(crate) enum CommandSideEffect {
    Exit,
    Redraw,
    None,
}

enum PresenterState {
    Presenting(Presentation),
    Failure {
        errors: Vec<ValidationError>,
        scroll: usize,
        presentation: Presentation,
    },
}

impl PresenterState {
    fn presentation(&self) -> &Presentation {
        match self {
            Self::Presenting(presentation) | Self::Failure { presentation, .. } => presentation,
        }
    }

    /// Apply a navigation command, returning whether anything changed.
    ///
    /// When displaying errors, navigating scrolls the list of errors instead of moving across slides.
    fn navigate(&mut self, command: Command) -> bool {
        match self {
            Self::Presenting(presentation) => {
                let changed = match command {
                    Command::Next => presentation.jump_next(),
                    Command::Previous => presentation.jump_previous(),
                    Command::First => presentation.jump_first_slide(),
                    Command::Last => presentation.jump_last_slide(),
                    Command::GoToSlide(number) => presentation.go_to_slide(number.saturating_sub(1) as usize),
                    Command::Resize { .. } | Command::Exit => false,
                };
                if changed {
                    tracing::debug!("moved to slide {}", presentation.current_slide_index() + 1);
                }
                changed
            }
            Self::Failure { errors, scroll, .. } => {
                let last = errors.len().saturating_sub(1);
                let next = match command {
                    Command::Next => (*scroll + 1).min(last),
                    Command::Previous => scroll.saturating_sub(1),
                    Command::First => 0,
                    Command::Last => last,
                    Command::GoToSlide(_) | Command::Resize { .. } | Command::Exit => *scroll,
                };
                let changed = next != *scroll;
                *scroll = next;
                changed
            }
        }
    }
}

/// An error during the presentation.
#[derive(thiserror::Error, Debug)]
pub enum PresentationError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("io: {0}")]
    Io(#[from] io::Error),
}
