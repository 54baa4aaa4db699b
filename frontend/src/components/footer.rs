//! Footer component

use leptos::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer>
            <div>"Powered by " <span class="rust-badge">"🦀 Rust + Leptos"</span> " and OCR.Space"</div>
        </footer>
    }
}
