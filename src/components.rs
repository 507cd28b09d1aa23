//! Yew view components for the salary estimator UI.
//!
//! Everything here renders from props; the form state lives in `main.rs`.

use salary_estimator::state::SelectionSlot;
use salary_estimator::{OptionEntry, Selection};
use std::rc::Rc;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

fn display(visible: bool, shown_as: &'static str) -> &'static str {
    if visible {
        shown_as
    } else {
        "display: none"
    }
}

/// Dropdown filled from one of the enumeration endpoints.
#[derive(Properties, PartialEq)]
pub struct SelectControlProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub placeholder: AttrValue,
    pub options: Rc<Vec<OptionEntry>>,
    pub slot: SelectionSlot,
    pub onchange: Callback<Option<Selection>>,
}

#[function_component(SelectControl)]
pub fn select_control(props: &SelectControlProps) -> Html {
    let select_ref = use_node_ref();

    // Push the state's choice into the DOM; covers reset and late option loads.
    {
        let select_ref = select_ref.clone();
        let value = props
            .slot
            .selection
            .as_ref()
            .map(|s| s.id.clone())
            .unwrap_or_default();
        use_effect_with((value, props.options.len()), move |(value, _)| {
            if let Some(select) = select_ref.cast::<HtmlSelectElement>() {
                if select.value() != *value {
                    select.set_value(value);
                }
            }
            || ()
        });
    }

    let onchange = {
        let options = props.options.clone();
        let emit = props.onchange.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            // index 0 is the placeholder
            let picked = usize::try_from(select.selected_index())
                .ok()
                .and_then(|i| i.checked_sub(1))
                .and_then(|i| options.get(i))
                .map(Selection::from);
            emit.emit(picked);
        })
    };

    let class = if props.slot.touched {
        "form-select selected"
    } else {
        "form-select placeholder"
    };

    html! {
        <div class="form-group">
            <label for={props.id.clone()}>{ props.label.clone() }</label>
            <select id={props.id.clone()} name={props.id.clone()} ref={select_ref} {class} {onchange}>
                <option value="">{ props.placeholder.clone() }</option>
                { props.options.iter().map(|entry| html! {
                    <option value={entry.id.clone()}>{ entry.label.clone() }</option>
                }).collect::<Html>() }
            </select>
        </div>
    }
}

/// Title and subtitle, hidden while a request is running or an estimate is shown.
pub fn render_heading(visible: bool) -> Html {
    html! {
        <>
            <h1 id="response-container-h1" style={display(visible, "display: block")}>
                { "What should you be paid?" }
            </h1>
            <p id="response-subtitle" class="subtitle" style={display(visible, "display: block")}>
                { "Pick a state, a job title and your experience level to get a salary estimate." }
            </p>
        </>
    }
}

pub fn render_loader(visible: bool) -> Html {
    html! {
        <div id="loader" class="loader" style={display(visible, "display: flex")}>
            <div class="spinner"></div>
        </div>
    }
}

/// Result text; the estimate contains blank lines, so whitespace is kept.
pub fn render_result(text: String) -> Html {
    html! {
        <p id="prediction-result" class="prediction-result" style="white-space: pre-line">
            { text }
        </p>
    }
}

#[derive(Properties, PartialEq)]
pub struct InfoPopoverProps {
    pub open: bool,
    pub ontoggle: Callback<()>,
}

#[function_component(InfoPopover)]
pub fn info_popover(props: &InfoPopoverProps) -> Html {
    let onclick = props.ontoggle.reform(|_: MouseEvent| ());
    html! {
        <div class="info">
            <span id="info-icon" class="info-icon" role="button" {onclick}>{ "ⓘ" }</span>
            <div id="popover" class="popover" style={display(props.open, "display: flex")}>
                <p>
                    { "Estimates come from a model trained on published salary data. \
                       Treat them as a starting point for negotiation, not a guarantee." }
                </p>
            </div>
        </div>
    }
}
