use leptos::prelude::*;

#[component]
pub fn Icon(
    /// Icon name (file under `/icons` without the `.svg` extension)
    name: &'static str,
    /// CSS classes for sizing and colour
    #[prop(default = "w-5 h-5")]
    class: &'static str,
) -> impl IntoView {
    let icon_path = format!("/icons/{}.svg", name);

    view! {
        <img
            src=icon_path
            class=class
            alt=""
            aria-hidden="true"
            draggable=false
        />
    }
}

/// Icons shipped in `public/icons`
pub mod icons {
    pub const ROCKET: &str = "rocket";
    pub const MAIL: &str = "mail";
    pub const SEND: &str = "send";
    pub const CHECK_CIRCLE: &str = "check-circle";
    pub const ALERT_CIRCLE: &str = "alert-circle";
    pub const USERS: &str = "users";
    pub const ZAP: &str = "zap";
    pub const SHIELD: &str = "shield";
    pub const SEARCH: &str = "search";
}
