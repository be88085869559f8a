use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::{
    components::{Route, Router, Routes},
    StaticSegment,
};
use thaw::ssr::SSRMountStyleProvider;
use thaw::*;

use crate::data::store::{page_data, PageData};
use crate::views::locator::LocatorPage;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <SSRMountStyleProvider>
            <!DOCTYPE html>
            <html lang="fa" dir="rtl">
                <head>
                    <meta charset="utf-8"/>
                    <meta name="viewport" content="width=device-width, initial-scale=1"/>
                    <AutoReload options=options.clone() />
                    <HydrationScripts options/>
                    <MetaTags/>
                </head>
                <body>
                    <App page=page_data()/>
                </body>
            </html>
        </SSRMountStyleProvider>
    }
}

#[component]
pub fn App(page: PageData) -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    view! {
        // injects a stylesheet into the document <head>
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/web.css"/>

        <Title text="مراکز خدمات"/>

        <ConfigProvider>
            <Router>
                <main>
                    <Routes fallback=|| "صفحه پیدا نشد.".into_view()>
                        <Route path=StaticSegment("") view=move || view! { <LocatorPage page=page.clone()/> }/>
                    </Routes>
                </main>
            </Router>
        </ConfigProvider>
    }
}
