//! Not found page component
//!
//! A 404 error page displayed when a route is not found.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::core::particles::FieldPreset;
use crate::ui::icon::{Icon, icons};
use crate::ui::particle_canvas::ParticleCanvas;

/// Not found (404) page component
#[component]
pub fn NotFoundPage() -> impl IntoView {
    // Tell the server renderer to answer with a real 404
    #[cfg(feature = "ssr")]
    {
        if let Some(response) = use_context::<leptos_axum::ResponseOptions>() {
            response.set_status(axum::http::StatusCode::NOT_FOUND);
        }
    }

    view! {
        <ParticleCanvas preset=FieldPreset::Ambient />

        <div class="min-h-screen flex flex-col items-center justify-center p-4 text-white">
            <div class="text-center">
                <div class="w-24 h-24 mx-auto mb-6 bg-gray-800/60 rounded-full flex items-center justify-center">
                    <Icon name=icons::SEARCH class="w-12 h-12" />
                </div>

                <h1 class="text-6xl font-bold mb-4">"404"</h1>

                <h2 class="text-2xl font-semibold mb-2">"Page Not Found"</h2>

                <p class="text-gray-400 mb-8 max-w-md mx-auto">
                    "Nothing has leaked here. The page you're looking for doesn't exist."
                </p>

                <A
                    href="/"
                    attr:class="px-6 py-3 bg-gradient-to-r from-primary-600 to-blue-600 hover:from-primary-700 hover:to-blue-700 text-white font-medium rounded-lg transition-colors"
                >
                    "Back to launch"
                </A>
            </div>

            <div class="absolute bottom-8 text-center">
                <p class="text-sm text-gray-500">"© 2026 LeakHunterX by Tantralogic AI"</p>
            </div>
        </div>
    }
}
