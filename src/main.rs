//! Main module for the salary estimator application using Yew.
//! Wires the form state, option populators and the prediction request.

use log::{error, info};
use salary_estimator::{
    api::request_prediction,
    config::*,
    state::{Field, FormAction, FormState, ResultView},
    with_minimum_duration, Selection, Submission,
};
use yew::prelude::*;

mod components;
mod hooks;

use components::{render_heading, render_loader, render_result, InfoPopover, SelectControl};
use hooks::use_option_populator;

/// Run one prediction round trip, keeping the loader up for the minimum time.
async fn run_prediction(submission: &Submission) -> ResultView {
    let response = with_minimum_duration(
        MIN_LOADER_DISPLAY_MS,
        request_prediction(submission.features()),
    )
    .await;

    match response {
        Ok(resp) => ResultView::from_outcome(submission, resp.outcome()),
        Err(e) => {
            error!("Error: {}", e);
            ResultView::Failure
        }
    }
}

/// Primary application component wiring state, effects, and UI elements.
#[function_component(App)]
fn app() -> Html {
    let form = use_reducer(FormState::default);
    let states = use_option_populator(STATES_ENDPOINT);
    let jobs = use_option_populator(JOBS_ENDPOINT);
    let levels = use_option_populator(EXPERIENCE_ENDPOINT);
    // last generation handed out; survives re-renders
    let request_counter = use_mut_ref(|| 0u64);

    let select_handler = |field: Field| {
        let form = form.clone();
        Callback::from(move |selection: Option<Selection>| {
            form.dispatch(FormAction::Select(field, selection));
        })
    };

    let onsubmit = {
        let form = form.clone();
        let request_counter = request_counter.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(submission) = form.submission() else {
                return;
            };

            let generation = {
                let mut counter = request_counter.borrow_mut();
                *counter += 1;
                *counter
            };
            info!(
                "Submitting request {}: {} / {} / {}",
                generation, submission.state.label, submission.job.label, submission.experience.label
            );
            form.dispatch(FormAction::BeginRequest { generation });

            let form = form.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = run_prediction(&submission).await;
                form.dispatch(FormAction::Resolve { generation, result });
            });
        })
    };

    let onreset = {
        let form = form.clone();
        Callback::from(move |_: MouseEvent| form.dispatch(FormAction::Reset))
    };

    let ontoggle = {
        let form = form.clone();
        Callback::from(move |_: ()| form.dispatch(FormAction::TogglePopover))
    };

    html! {
        <div class="container">
            <div class="response-container">
                { render_heading(form.heading_visible) }
                { render_loader(form.loading) }
                { render_result(form.result.text()) }
            </div>

            <form id="prediction-form" class="prediction-form" {onsubmit}>
                <SelectControl
                    id="state_list"
                    label="State"
                    placeholder="Select a state"
                    options={states}
                    slot={form.state.clone()}
                    onchange={select_handler(Field::State)}
                />
                <SelectControl
                    id="job_list"
                    label="Job Title"
                    placeholder="Select a job title"
                    options={jobs}
                    slot={form.job.clone()}
                    onchange={select_handler(Field::Job)}
                />
                <SelectControl
                    id="experience_list"
                    label="Experience Level"
                    placeholder="Select an experience level"
                    options={levels}
                    slot={form.experience.clone()}
                    onchange={select_handler(Field::Experience)}
                />

                <div class="button-row">
                    <button id="submit-btn" type="submit" class="btn-primary" disabled={!form.is_ready()}>
                        { "Estimate Salary" }
                    </button>
                    <button id="reset-btn" type="button" class="btn-secondary" onclick={onreset}>
                        { "Reset" }
                    </button>
                </div>
            </form>

            <InfoPopover open={form.popover_open} {ontoggle} />
        </div>
    }
}

/// Entry point: installs diagnostics and renders the App component.
fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(LOG_LEVEL));
    yew::Renderer::<App>::new().render();
}
