//! Form state and the reducer that drives it.
//!
//! Every UI event becomes a [`FormAction`]; the view is a pure function of
//! [`FormState`]. Each submission carries a request generation and only the
//! generation currently in flight may resolve the form.

use crate::api::PredictionOutcome;
use crate::config::GENERIC_FAILURE_MESSAGE;
use crate::{Selection, Submission};
use log::debug;
use std::rc::Rc;
use yew::functional::Reducible;

/// The three dropdowns of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    State,
    Job,
    Experience,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::State, Field::Job, Field::Experience];
}

/// Current value of one dropdown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSlot {
    pub selection: Option<Selection>,
    /// Set once the user has changed the control; drives placeholder styling.
    pub touched: bool,
}

/// What the result area shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResultView {
    #[default]
    Empty,
    Estimate(String),
    BackendError(String),
    Failure,
}

impl ResultView {
    pub fn from_outcome(submission: &Submission, outcome: PredictionOutcome) -> Self {
        match outcome {
            PredictionOutcome::Estimate(value) => {
                ResultView::Estimate(submission.estimate_text(value))
            }
            PredictionOutcome::BackendError(msg) => ResultView::BackendError(msg),
            PredictionOutcome::Unusable => ResultView::Failure,
        }
    }

    pub fn text(&self) -> String {
        match self {
            ResultView::Empty => String::new(),
            ResultView::Estimate(text) => text.clone(),
            ResultView::BackendError(msg) => format!("Error: {}", msg),
            ResultView::Failure => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    fn keeps_heading_hidden(&self) -> bool {
        matches!(self, ResultView::Estimate(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    Select(Field, Option<Selection>),
    BeginRequest { generation: u64 },
    Resolve { generation: u64, result: ResultView },
    Reset,
    TogglePopover,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub state: SelectionSlot,
    pub job: SelectionSlot,
    pub experience: SelectionSlot,
    pub loading: bool,
    pub heading_visible: bool,
    pub result: ResultView,
    pub in_flight: Option<u64>,
    pub popover_open: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            state: SelectionSlot::default(),
            job: SelectionSlot::default(),
            experience: SelectionSlot::default(),
            loading: false,
            heading_visible: true,
            result: ResultView::Empty,
            in_flight: None,
            popover_open: false,
        }
    }
}

impl FormState {
    pub fn slot(&self, field: Field) -> &SelectionSlot {
        match field {
            Field::State => &self.state,
            Field::Job => &self.job,
            Field::Experience => &self.experience,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut SelectionSlot {
        match field {
            Field::State => &mut self.state,
            Field::Job => &mut self.job,
            Field::Experience => &mut self.experience,
        }
    }

    /// True when every dropdown holds a non-empty choice.
    pub fn is_ready(&self) -> bool {
        Field::ALL.iter().all(|&field| {
            self.slot(field)
                .selection
                .as_ref()
                .is_some_and(|s| !s.id.is_empty())
        })
    }

    /// Snapshot of the three choices, or `None` while the form is incomplete.
    pub fn submission(&self) -> Option<Submission> {
        if !self.is_ready() {
            return None;
        }
        Some(Submission {
            state: self.state.selection.clone()?,
            job: self.job.selection.clone()?,
            experience: self.experience.selection.clone()?,
        })
    }
}

impl Reducible for FormState {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            FormAction::Select(field, selection) => {
                let slot = next.slot_mut(field);
                slot.selection = selection.filter(|s| !s.id.is_empty());
                slot.touched = true;
            }
            FormAction::BeginRequest { generation } => {
                next.heading_visible = false;
                next.loading = true;
                next.result = ResultView::Empty;
                next.in_flight = Some(generation);
            }
            FormAction::Resolve { generation, result } => {
                if next.in_flight != Some(generation) {
                    debug!(
                        "Discarding stale response for request {} (in flight: {:?})",
                        generation, next.in_flight
                    );
                    return self;
                }
                next.loading = false;
                next.in_flight = None;
                next.heading_visible = !result.keeps_heading_hidden();
                next.result = result;
            }
            FormAction::Reset => {
                for field in Field::ALL {
                    next.slot_mut(field).selection = None;
                }
                next.loading = false;
                next.in_flight = None;
                next.heading_visible = true;
                next.result = ResultView::Empty;
            }
            FormAction::TogglePopover => {
                next.popover_open = !next.popover_open;
            }
        }
        Rc::new(next)
    }
}
