pub mod global_context;
pub mod header;
pub mod left;

use leptos::prelude::*;

/// Application shell.
///
/// ```text
/// +------------------------------+
/// |            Header            |
/// +------------------------------+
/// |  Left (list)  |    Center    |
/// +------------------------------+
/// ```
#[component]
pub fn Shell<L, C>(left: L, center: C) -> impl IntoView
where
    L: Fn() -> AnyView + 'static + Send,
    C: Fn() -> AnyView + 'static + Send,
{
    view! {
        <div class="app-layout">
            <header::Header />
            <div class="app-body">
                <left::Left>
                    {left()}
                </left::Left>
                <main class="app-main">
                    {center()}
                </main>
            </div>
        </div>
    }
}
