use leptos::prelude::*;
use thaw::{Button, ButtonAppearance, MessageBar, MessageBarIntent};

use crate::locator::{LocatorAction, ViewMode};
use crate::views::locator::handle::LocatorHandle;

#[component]
pub fn FilterBar(handle: LocatorHandle, categories: Vec<String>) -> impl IntoView {
    let snapshot = handle.snapshot();
    let query = move || snapshot.with(|s| s.filter.query.clone());
    let category = move || snapshot.with(|s| s.filter.category.clone().unwrap_or_default());

    view! {
        <div class="locator-filters">
            <input
                id="q"
                type="search"
                placeholder="جستجو در نام یا آدرس"
                prop:value=query
                on:input=move |ev| handle.dispatch(LocatorAction::SetQuery(event_target_value(&ev)))
            />
            <select
                id="device"
                prop:value=category
                on:change=move |ev| handle.dispatch(LocatorAction::SetCategory(event_target_value(&ev)))
            >
                <option value="">"همه دستگاه‌ها"</option>
                {categories
                    .into_iter()
                    .map(|category| {
                        let label = category.clone();
                        view! { <option value=category>{label}</option> }
                    })
                    .collect_view()}
            </select>
            <div class="filter-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| handle.dispatch(LocatorAction::ApplyFilters)
                >
                    "اعمال"
                </Button>
                <Button on_click=move |_| handle.dispatch(LocatorAction::Reset)>"پاک کردن"</Button>
                <Button on_click=move |_| handle.dispatch(LocatorAction::LocateNearest)>
                    "نزدیک‌ترین مرکز"
                </Button>
            </div>
            <p class="result-count">
                "تعداد مراکز: "
                <span id="count">{move || snapshot.with(|s| s.count)}</span>
            </p>
        </div>
    }
}

#[component]
pub fn Notice(handle: LocatorHandle) -> impl IntoView {
    let snapshot = handle.snapshot();

    move || {
        snapshot.with(|s| s.notice).map(|notice| {
            view! {
                <div class="locator-notice" role="alert">
                    <MessageBar intent=MessageBarIntent::Warning>{notice.user_message()}</MessageBar>
                    <button
                        type="button"
                        class="notice-dismiss"
                        aria-label="بستن"
                        on:click=move |_| handle.dispatch(LocatorAction::DismissNotice)
                    >
                        "×"
                    </button>
                </div>
            }
        })
    }
}

#[component]
pub fn ViewTabs(handle: LocatorHandle) -> impl IntoView {
    let snapshot = handle.snapshot();
    let tab = move |mode: ViewMode, label: &'static str| {
        view! {
            <button
                type="button"
                class="view-tab"
                data-mode=mode.as_str()
                aria-pressed=move || (snapshot.with(|s| s.view) == mode).to_string()
                on:click=move |_| handle.dispatch(LocatorAction::SetView(mode))
            >
                {label}
            </button>
        }
    };

    view! {
        <div class="view-tabs" role="group">
            {tab(ViewMode::List, "فهرست")}
            {tab(ViewMode::Map, "نقشه")}
        </div>
    }
}
