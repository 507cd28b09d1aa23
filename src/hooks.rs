use salary_estimator::{
    api::{fetch_options, options_or_empty},
    OptionEntry,
};
use std::rc::Rc;
use yew::prelude::*;

/// Loads the options of one dropdown once, when the component mounts.
///
/// A failed fetch is only logged: the list stays empty, so the form can never
/// become ready.
#[hook]
pub fn use_option_populator(endpoint: &'static str) -> Rc<Vec<OptionEntry>> {
    let options: UseStateHandle<Rc<Vec<OptionEntry>>> = use_state(|| Rc::new(Vec::new()));

    {
        let options_setter = options.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let entries = options_or_empty(endpoint, fetch_options(endpoint).await);
                if !entries.is_empty() {
                    options_setter.set(Rc::new(entries));
                }
            });
            || ()
        });
    }

    (*options).clone()
}
