use leptos::prelude::*;
use thaw::{Spinner, SpinnerSize};

#[component]
pub fn LoadingView(message: Option<String>) -> impl IntoView {
    view! {
        <div class="map-skeleton" role="status" aria-live="polite">
            <Spinner size=SpinnerSize::Large />
            <p class="loading-message">
                {message.unwrap_or_else(|| "در حال بارگذاری نقشه...".to_string())}
            </p>
        </div>
    }
}
