//! Launch ("Coming Soon") page
//!
//! The same page is served on every background route; only the particle
//! preset changes:
//! - SEO meta tags
//! - MVP badge, title and tagline
//! - Countdown to the launch instant
//! - Waitlist form with a live "waiting" counter
//! - Highlights of what ships at launch
//! - Footer

use leptos::prelude::*;
use leptos_meta::{Meta, Title};

use crate::core::countdown::{default_launch_target, launch_target};
use crate::core::particles::FieldPreset;
use crate::core::waitlist::JoinResponse;
use crate::ui::countdown_timer::CountdownTimer;
use crate::ui::cursor_effect::CursorEffect;
use crate::ui::icon::{Icon, icons};
use crate::ui::particle_canvas::ParticleCanvas;
use crate::ui::waitlist_form::WaitlistForm;

/// Shown until the live count arrives
const FALLBACK_WAITING: &str = "850+";

#[component]
pub fn LaunchPage(#[prop(default = FieldPreset::Drift)] preset: FieldPreset) -> impl IntoView {
    let target = launch_target().unwrap_or_else(|e| {
        leptos::logging::warn!("{}; using the default launch date", e);
        default_launch_target()
    });

    let waiting = RwSignal::new(None::<u64>);

    #[cfg(not(feature = "ssr"))]
    Effect::new(move |_| {
        use crate::ui::waitlist_form::fetch_stats;

        leptos::task::spawn_local(async move {
            match fetch_stats().await {
                Ok(stats) => waiting.set(Some(stats.total)),
                Err(e) => leptos::logging::warn!("could not load waitlist stats: {}", e),
            }
        });
    });

    let on_joined = Callback::new(move |joined: JoinResponse| {
        waiting.set(Some(joined.total));
    });

    let waiting_label = move || {
        waiting
            .get()
            .map(|total| format!("{} waiting", total))
            .unwrap_or_else(|| format!("{} waiting", FALLBACK_WAITING))
    };

    view! {
        <SeoMeta />

        <ParticleCanvas preset=preset />
        {preset.wants_cursor_effect().then(|| view! { <CursorEffect /> })}

        <main class="min-h-screen bg-gradient-to-br from-gray-950/80 via-gray-900/60 to-gray-950/80 text-white flex items-center justify-center p-4 relative overflow-hidden">
            // Background orbs
            <div class="absolute top-0 -left-40 w-96 h-96 bg-primary-600/20 rounded-full blur-3xl animate-pulse" aria-hidden="true"></div>
            <div class="absolute bottom-0 -right-40 w-96 h-96 bg-blue-600/20 rounded-full blur-3xl animate-pulse animation-delay-2000" aria-hidden="true"></div>

            <div class="max-w-4xl w-full relative z-10 py-16">
                // MVP badge
                <div class="flex justify-center mb-8">
                    <div class="inline-flex items-center gap-2 px-4 py-2 bg-primary-500/10 border border-primary-500/20 rounded-full">
                        <Icon name=icons::ROCKET class="w-4 h-4" />
                        <span class="text-sm font-medium text-primary-400">"MVP Launch"</span>
                        <span class="text-xs text-gray-500 ml-2">
                            {target.format("%B %Y").to_string()}
                        </span>
                    </div>
                </div>

                <h1 class="text-5xl md:text-7xl font-bold text-center mb-4">
                    <span class="text-white">"Coming "</span>
                    <span class="bg-gradient-to-r from-primary-400 to-blue-400 bg-clip-text text-transparent">
                        "Soon"
                    </span>
                </h1>

                <p class="text-xl text-gray-400 text-center mb-12 max-w-2xl mx-auto">
                    "The world's most intelligent secret scanning platform is launching in"
                </p>

                <CountdownTimer target=target />

                <WaitlistForm on_joined=on_joined />

                // Stats
                <div class="flex flex-wrap justify-center gap-8 text-sm">
                    <Stat icon=icons::USERS>{waiting_label}</Stat>
                    <Stat icon=icons::ZAP>"5x faster scanning"</Stat>
                    <Stat icon=icons::SHIELD>"0.8% false positives"</Stat>
                </div>

                <Highlights />

                <footer class="mt-16 text-center text-sm text-gray-500">
                    "© 2026 LeakHunterX by Tantralogic AI. All rights reserved."
                </footer>
            </div>
        </main>
    }
}

#[component]
fn Stat(icon: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="flex items-center gap-2 text-gray-400">
            <Icon name=icon class="w-4 h-4" />
            <span>{children()}</span>
        </div>
    }
}

/// What ships at launch
#[component]
fn Highlights() -> impl IntoView {
    view! {
        <section class="mt-20 grid md:grid-cols-3 gap-6" aria-label="What's coming">
            <HighlightCard
                icon=icons::SEARCH
                title="Deep secret detection"
                description="Scan repositories, CI logs and container images for leaked keys, tokens and credentials."
            />
            <HighlightCard
                icon=icons::ZAP
                title="Fast by default"
                description="Incremental scans that only look at what changed since the last run."
            />
            <HighlightCard
                icon=icons::SHIELD
                title="Low noise"
                description="Verification of candidate secrets keeps false positives under one percent."
            />
        </section>
    }
}

#[component]
fn HighlightCard(
    icon: &'static str,
    title: &'static str,
    description: &'static str,
) -> impl IntoView {
    view! {
        <div class="bg-gray-800/40 backdrop-blur-sm p-6 rounded-2xl border border-gray-700/50 hover:border-primary-500/30
                    transition-all duration-300 hover:-translate-y-1">
            <div class="w-10 h-10 rounded-lg bg-primary-500/10 flex items-center justify-center mb-4">
                <Icon name=icon class="w-5 h-5" />
            </div>
            <h3 class="text-lg font-semibold text-white mb-2">{title}</h3>
            <p class="text-gray-400 text-sm leading-relaxed">{description}</p>
        </div>
    }
}

/// SEO Meta tags component using leptos_meta
#[component]
fn SeoMeta() -> impl IntoView {
    view! {
        <Title text="LeakHunterX - Coming Soon" />
        <Meta name="description" content="LeakHunterX, the intelligent secret scanning platform, is launching soon. Join the waitlist for early access." />
        <Meta property="og:type" content="website" />
        <Meta property="og:title" content="LeakHunterX - Coming Soon" />
        <Meta property="og:description" content="The world's most intelligent secret scanning platform is launching soon." />
        <Meta property="twitter:card" content="summary" />
        <Meta property="twitter:title" content="LeakHunterX - Coming Soon" />
    }
}
