//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"Platescan"</h1>
            <p class="subtitle">
                "Upload a photo of a vehicle to read its license plate."
            </p>
        </div>
    }
}
