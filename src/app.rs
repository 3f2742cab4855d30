use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::core::particles::FieldPreset;
use crate::ui::pages::{LaunchPage, NotFoundPage};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body class="bg-gray-950">
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    view! {
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/leakhunterx.css"/>

        <Title text="LeakHunterX - Coming Soon"/>

        <Router>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=path!("/") view=|| view! { <LaunchPage preset=FieldPreset::Drift/> }/>
                <Route path=path!("/warm") view=|| view! { <LaunchPage preset=FieldPreset::Symbiotic/> }/>
                <Route path=path!("/calm") view=|| view! { <LaunchPage preset=FieldPreset::Ambient/> }/>
            </Routes>
        </Router>
    }
}
