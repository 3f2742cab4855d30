//! Waitlist signup form
//!
//! Email input plus submit button driven by [`FormState`]. Invalid input is
//! never sent; failures show a generic message and nothing is retried.

use leptos::prelude::*;
use leptos::task::spawn_local;

#[cfg(not(feature = "ssr"))]
use crate::core::waitlist::WaitlistStats;
use crate::core::waitlist::{FormState, FormStatus, JoinResponse, WaitlistError};
use crate::ui::icon::{Icon, icons};

/// POST the email to the waitlist API
#[cfg(not(feature = "ssr"))]
pub async fn join_waitlist(email: String) -> Result<JoinResponse, WaitlistError> {
    use crate::core::waitlist::{ApiError, JOIN_PATH, JoinRequest};
    use gloo_net::http::Request;

    let response = Request::post(JOIN_PATH)
        .json(&JoinRequest { email })
        .map_err(|e| WaitlistError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| WaitlistError::Network(e.to_string()))?;

    if response.ok() {
        response
            .json::<JoinResponse>()
            .await
            .map_err(|e| WaitlistError::Network(e.to_string()))
    } else {
        let status = response.status();
        let body = response.json::<ApiError>().await.ok();
        Err(WaitlistError::from_api(status, body))
    }
}

#[cfg(feature = "ssr")]
pub async fn join_waitlist(_email: String) -> Result<JoinResponse, WaitlistError> {
    Err(WaitlistError::Network(
        "waitlist requests are only sent from the browser".to_string(),
    ))
}

/// GET the displayed waitlist size
#[cfg(not(feature = "ssr"))]
pub async fn fetch_stats() -> Result<WaitlistStats, WaitlistError> {
    use crate::core::waitlist::STATS_PATH;
    use gloo_net::http::Request;

    let response = Request::get(STATS_PATH)
        .send()
        .await
        .map_err(|e| WaitlistError::Network(e.to_string()))?;
    if !response.ok() {
        return Err(WaitlistError::from_api(response.status(), None));
    }
    response
        .json::<WaitlistStats>()
        .await
        .map_err(|e| WaitlistError::Network(e.to_string()))
}

#[component]
pub fn WaitlistForm(
    /// Placeholder text for the email input
    #[prop(default = "Get notified when we launch")]
    placeholder: &'static str,
    /// Called after a successful join
    #[prop(optional, into)]
    on_joined: Option<Callback<JoinResponse>>,
) -> impl IntoView {
    let email = RwSignal::new(String::new());
    let state = RwSignal::new(FormState::default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let mut next = state.get_untracked();
        let Some((submission, address)) = next.begin(&email.get_untracked()) else {
            return;
        };
        state.set(next);

        spawn_local(async move {
            let result = join_waitlist(address).await;
            match &result {
                Ok(joined) => {
                    leptos::logging::log!("joined waitlist at position {}", joined.position);
                    email.set(String::new());
                    if let Some(on_joined) = on_joined {
                        on_joined.run(joined.clone());
                    }
                }
                Err(e) => leptos::logging::warn!("waitlist signup failed: {}", e),
            }
            state.update(|s| s.finish(submission, result));

            #[cfg(not(feature = "ssr"))]
            {
                use crate::core::waitlist::STATUS_RESET_MS;
                gloo_timers::future::TimeoutFuture::new(STATUS_RESET_MS).await;
                state.try_update(|s| s.reset(submission));
            }
        });
    };

    let locked = move || state.with(FormState::is_locked);
    let status = move || state.with(|s| s.status().clone());

    view! {
        <div class="relative max-w-md mx-auto mb-12">
            <form on:submit=on_submit class="relative" novalidate=true>
                <div class="flex items-center bg-gray-800/50 backdrop-blur-sm border border-gray-700/50 rounded-2xl overflow-hidden focus-within:border-primary-500/50 transition-all">
                    <Icon name=icons::MAIL class="w-5 h-5 text-gray-400 ml-4" />
                    <input
                        type="email"
                        placeholder=placeholder
                        aria-label="Email address"
                        class="flex-1 bg-transparent px-4 py-4 text-white placeholder-gray-500 focus:outline-none"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                        disabled=locked
                    />
                    <button
                        type="submit"
                        aria-label="Join the waitlist"
                        class="px-6 py-4 bg-gradient-to-r from-primary-600 to-blue-600 hover:from-primary-700 hover:to-blue-700 disabled:opacity-50 transition-all"
                        disabled=locked
                    >
                        {move || match status() {
                            FormStatus::Loading => {
                                view! {
                                    <div class="w-5 h-5 border-2 border-white border-t-transparent rounded-full animate-spin"></div>
                                }
                                    .into_any()
                            }
                            FormStatus::Success(_) => {
                                view! { <Icon name=icons::CHECK_CIRCLE class="w-5 h-5" /> }.into_any()
                            }
                            _ => view! { <Icon name=icons::SEND class="w-5 h-5" /> }.into_any(),
                        }}
                    </button>
                </div>
            </form>

            <div class="mt-4 text-center min-h-[2.5rem]" aria-live="polite">
                {move || match status() {
                    FormStatus::Success(joined) => {
                        view! {
                            <div class="inline-flex items-center gap-2 px-4 py-2 bg-green-500/10 border border-green-500/20 rounded-lg">
                                <Icon name=icons::CHECK_CIRCLE class="w-4 h-4" />
                                <span class="text-sm text-green-400">
                                    {format!(
                                        "Thanks! You're #{} on the list. We'll notify you at launch",
                                        joined.position,
                                    )}
                                </span>
                            </div>
                        }
                            .into_any()
                    }
                    FormStatus::Error(message) => {
                        view! {
                            <div class="inline-flex items-center gap-2 px-4 py-2 bg-red-500/10 border border-red-500/20 rounded-lg">
                                <Icon name=icons::ALERT_CIRCLE class="w-4 h-4" />
                                <span class="text-sm text-red-400">{message}</span>
                            </div>
                        }
                            .into_any()
                    }
                    _ => ().into_any(),
                }}
            </div>
        </div>
    }
}
