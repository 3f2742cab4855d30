//! Full-viewport particle background
//!
//! Renders a fixed `<canvas>` behind the page. On the client the canvas is
//! sized to the window, a [`ParticleField`] is seeded from the preset and a
//! [`FrameDriver`] steps and draws it every display frame. Window resizes
//! re-seed the field and restart the loop; pointer movement is forwarded to
//! the field. Everything is torn down when the component unmounts.
//!
//! [`ParticleField`]: crate::core::particles::ParticleField
//! [`FrameDriver`]: crate::ui::animation_frame::FrameDriver

use leptos::html;
use leptos::prelude::*;

use crate::core::particles::FieldPreset;

#[cfg(not(feature = "ssr"))]
mod browser {
    use glam::DVec2;
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    use crate::core::particles::{FieldPreset, Hsla, Painter, ParticleField, draw_field};
    use crate::ui::animation_frame::FrameDriver;

    /// [`Painter`] over a 2D canvas context
    pub struct CanvasPainter {
        ctx: CanvasRenderingContext2d,
    }

    impl Painter for CanvasPainter {
        fn clear(&mut self, width: f64, height: f64) {
            self.ctx.clear_rect(0.0, 0.0, width, height);
        }

        fn radial_glow(&mut self, center: DVec2, radius: f64, inner: Hsla, outer: Hsla) {
            let Ok(gradient) = self
                .ctx
                .create_radial_gradient(center.x, center.y, 0.0, center.x, center.y, radius)
            else {
                return;
            };
            let _ = gradient.add_color_stop(0.0, &inner.to_string());
            let _ = gradient.add_color_stop(1.0, &outer.to_string());
            self.ctx.set_fill_style_canvas_gradient(&gradient);
            self.ctx.begin_path();
            let _ = self.ctx.arc(center.x, center.y, radius, 0.0, TAU);
            self.ctx.fill();
        }

        fn fill_circle(&mut self, center: DVec2, radius: f64, color: Hsla) {
            self.ctx.set_fill_style_str(&color.to_string());
            self.ctx.begin_path();
            let _ = self.ctx.arc(center.x, center.y, radius.max(0.0), 0.0, TAU);
            self.ctx.fill();
        }

        fn line(&mut self, from: DVec2, to: DVec2, width: f64, color: Hsla) {
            self.ctx.set_stroke_style_str(&color.to_string());
            self.ctx.set_line_width(width);
            self.ctx.begin_path();
            self.ctx.move_to(from.x, from.y);
            self.ctx.line_to(to.x, to.y);
            self.ctx.stroke();
        }
    }

    struct Scene {
        canvas: HtmlCanvasElement,
        field: ParticleField,
        painter: CanvasPainter,
    }

    impl Scene {
        fn draw(&mut self) {
            self.field.step();
            draw_field(&self.field, &mut self.painter);
        }
    }

    /// A running particle background
    pub struct CanvasAnimation {
        scene: Rc<RefCell<Scene>>,
        driver: FrameDriver,
    }

    impl CanvasAnimation {
        pub fn start(canvas: HtmlCanvasElement, preset: FieldPreset) -> Result<Self, JsValue> {
            let ctx = canvas
                .get_context("2d")?
                .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
                .dyn_into::<CanvasRenderingContext2d>()?;

            let (width, height) = viewport_size();
            canvas.set_width(width as u32);
            canvas.set_height(height as u32);

            let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
            let field = ParticleField::new(preset.config(), width, height, seed);
            leptos::logging::log!(
                "particle field '{}' started with {} particles",
                preset.as_str(),
                field.len()
            );

            let scene = Rc::new(RefCell::new(Scene {
                canvas,
                field,
                painter: CanvasPainter { ctx },
            }));

            let scene_for_frame = scene.clone();
            let driver = FrameDriver::new(move |_timestamp| {
                scene_for_frame.borrow_mut().draw();
            });
            driver.start();

            Ok(Self { scene, driver })
        }

        /// Match the new window size: re-seed and restart the loop
        pub fn resize(&self) {
            let (width, height) = viewport_size();
            {
                let mut scene = self.scene.borrow_mut();
                scene.canvas.set_width(width as u32);
                scene.canvas.set_height(height as u32);
                scene.field.resize(width, height);
            }
            self.driver.restart();
        }

        pub fn set_pointer(&self, x: f64, y: f64) {
            self.scene.borrow_mut().field.set_pointer(x, y);
        }

        pub fn clear_pointer(&self) {
            self.scene.borrow_mut().field.clear_pointer();
        }

        pub fn stop(&self) {
            self.driver.stop();
        }
    }

    fn viewport_size() -> (f64, f64) {
        let Some(window) = web_sys::window() else {
            return (0.0, 0.0);
        };
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        (width.floor(), height.floor())
    }
}

/// Animated particle background for one of the named presets
#[component]
pub fn ParticleCanvas(#[prop(default = FieldPreset::Drift)] preset: FieldPreset) -> impl IntoView {
    let canvas_ref = NodeRef::<html::Canvas>::new();

    #[cfg(not(feature = "ssr"))]
    {
        use leptos::ev::{mousemove, mouseout, resize};

        let animation = StoredValue::new_local(None::<browser::CanvasAnimation>);

        Effect::new(move |_| {
            let Some(canvas) = canvas_ref.get() else {
                return;
            };
            if animation.with_value(Option::is_some) {
                return;
            }
            match browser::CanvasAnimation::start(canvas, preset) {
                Ok(started) => animation.set_value(Some(started)),
                Err(e) => leptos::logging::warn!("particle canvas disabled: {:?}", e),
            }
        });

        let on_resize = window_event_listener(resize, move |_| {
            animation.with_value(|a| {
                if let Some(a) = a {
                    a.resize();
                }
            });
        });

        let on_move = window_event_listener(mousemove, move |ev| {
            let (x, y) = (ev.client_x() as f64, ev.client_y() as f64);
            animation.with_value(|a| {
                if let Some(a) = a {
                    a.set_pointer(x, y);
                }
            });
        });

        // Pointer left the window
        let on_leave = window_event_listener(mouseout, move |ev| {
            if ev.related_target().is_none() {
                animation.with_value(|a| {
                    if let Some(a) = a {
                        a.clear_pointer();
                    }
                });
            }
        });

        on_cleanup(move || {
            on_resize.remove();
            on_move.remove();
            on_leave.remove();
            animation.try_update_value(|a| {
                if let Some(a) = a.take() {
                    a.stop();
                }
            });
        });
    }

    view! {
        <canvas
            node_ref=canvas_ref
            class="fixed inset-0 w-full h-full pointer-events-none -z-10"
            data-preset=preset.as_str()
            aria-hidden="true"
        ></canvas>
    }
}
