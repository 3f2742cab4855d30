//! Spring cursor overlay
//!
//! A ring and a softer halo chase the pointer with [`Spring2`] motion, plus
//! two short "data stream" lines crossing at the pointer. Purely decorative
//! and rendered only once the pointer has moved.
//!
//! [`Spring2`]: crate::core::spring::Spring2

use leptos::prelude::*;

/// Ring diameter in px
const RING_SIZE: f64 = 32.0;
/// Halo diameter in px
const HALO_SIZE: f64 = 64.0;
/// Half length of each data stream line along both axes
const STREAM_REACH: f64 = 50.0;

#[component]
pub fn CursorEffect() -> impl IntoView {
    let pointer = RwSignal::new(None::<(f64, f64)>);
    let ring = RwSignal::new((0.0_f64, 0.0_f64));
    let halo = RwSignal::new((0.0_f64, 0.0_f64));

    #[cfg(not(feature = "ssr"))]
    {
        use glam::DVec2;
        use leptos::ev::mousemove;
        use std::cell::RefCell;
        use std::rc::Rc;

        use crate::core::spring::{Spring2, SpringParams};
        use crate::ui::animation_frame::FrameDriver;

        struct Followers {
            ring: Spring2,
            halo: Spring2,
            last_timestamp: Option<f64>,
        }

        let followers = Rc::new(RefCell::new(Followers {
            ring: Spring2::new(SpringParams::RING, DVec2::ZERO),
            halo: Spring2::new(SpringParams::HALO, DVec2::ZERO),
            last_timestamp: None,
        }));

        let driver = StoredValue::new_local(None::<FrameDriver>);

        let followers_for_frame = followers.clone();
        let frame_driver = FrameDriver::new(move |timestamp| {
            let mut f = followers_for_frame.borrow_mut();
            let dt = f
                .last_timestamp
                .map(|last| (timestamp - last) / 1000.0)
                .unwrap_or(0.0);
            f.last_timestamp = Some(timestamp);

            let r = f.ring.step(dt);
            let h = f.halo.step(dt);
            ring.set((r.x, r.y));
            halo.set((h.x, h.y));

            // Idle until the pointer moves again
            if f.ring.is_at_rest() && f.halo.is_at_rest() {
                f.last_timestamp = None;
                driver.with_value(|d| {
                    if let Some(d) = d {
                        d.stop();
                    }
                });
            }
        });
        driver.set_value(Some(frame_driver));

        let on_move = window_event_listener(mousemove, move |ev| {
            let target = DVec2::new(ev.client_x() as f64, ev.client_y() as f64);
            {
                let mut f = followers.borrow_mut();
                if pointer.get_untracked().is_none() {
                    // First sighting: appear under the pointer instead of flying in
                    f.ring = Spring2::new(SpringParams::RING, target);
                    f.halo = Spring2::new(SpringParams::HALO, target);
                    ring.set((target.x, target.y));
                    halo.set((target.x, target.y));
                }
                f.ring.set_target(target);
                f.halo.set_target(target);
            }
            pointer.set(Some((target.x, target.y)));
            driver.with_value(|d| {
                if let Some(d) = d {
                    d.start();
                }
            });
        });

        on_cleanup(move || {
            on_move.remove();
            driver.try_update_value(|d| d.take());
        });
    }

    let ring_style = move || {
        let (x, y) = ring.get();
        format!(
            "transform: translate({}px, {}px);",
            x - RING_SIZE / 2.0,
            y - RING_SIZE / 2.0
        )
    };
    let halo_style = move || {
        let (x, y) = halo.get();
        format!(
            "transform: translate({}px, {}px);",
            x - HALO_SIZE / 2.0,
            y - HALO_SIZE / 2.0
        )
    };

    view! {
        <Show when=move || pointer.get().is_some()>
            <div
                class="fixed top-0 left-0 w-8 h-8 pointer-events-none z-50 mix-blend-screen"
                style=ring_style
                aria-hidden="true"
            >
                <div class="relative w-full h-full">
                    <div class="absolute inset-0 rounded-full border-2 border-cyan-400 animate-pulse"></div>
                    <div class="absolute inset-2 rounded-full bg-cyan-400/30 blur-sm"></div>
                </div>
            </div>

            <div
                class="fixed top-0 left-0 w-16 h-16 pointer-events-none z-40"
                style=halo_style
                aria-hidden="true"
            >
                <div class="w-full h-full rounded-full bg-gradient-to-r from-cyan-500/10 to-blue-500/10 blur-xl"></div>
            </div>

            <svg class="fixed inset-0 w-full h-full pointer-events-none z-30" aria-hidden="true">
                <defs>
                    <linearGradient id="cursor-stream" x1="0%" y1="0%" x2="100%" y2="0%">
                        <stop offset="0%" stop-color="#00ffff" stop-opacity="0"></stop>
                        <stop offset="50%" stop-color="#00ffff" stop-opacity="0.5"></stop>
                        <stop offset="100%" stop-color="#00ffff" stop-opacity="0"></stop>
                    </linearGradient>
                </defs>
                {move || {
                    pointer
                        .get()
                        .map(|(x, y)| {
                            view! {
                                <line
                                    x1={x - STREAM_REACH}
                                    y1={y - STREAM_REACH}
                                    x2={x + STREAM_REACH}
                                    y2={y + STREAM_REACH}
                                    stroke="url(#cursor-stream)"
                                    stroke-width="1"
                                ></line>
                                <line
                                    x1={x + STREAM_REACH}
                                    y1={y - STREAM_REACH}
                                    x2={x - STREAM_REACH}
                                    y2={y + STREAM_REACH}
                                    stroke="url(#cursor-stream)"
                                    stroke-width="1"
                                ></line>
                            }
                        })
                }}
            </svg>
        </Show>
    }
}
