use leptos::prelude::*;
use thaw::{MessageBar, MessageBarIntent};

#[component]
pub fn ErrorView(message: Option<String>, #[prop(optional)] hint: Option<String>) -> impl IntoView {
    view! {
        <MessageBar intent=MessageBarIntent::Error>
            <div class="error-body">
                <strong>{message.unwrap_or_else(|| "خطایی رخ داد. دوباره تلاش کنید.".to_string())}</strong>
                {hint.map(|hint| view! { <p class="error-hint">{hint}</p> })}
            </div>
        </MessageBar>
    }
}
