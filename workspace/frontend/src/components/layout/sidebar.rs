use common::view::SidebarItem;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub items: Vec<SidebarItem>,
    pub on_select: Callback<String>,
}

/// Repository picker; disabled entries ignore clicks.
#[function_component(Sidebar)]
pub fn sidebar(props: &Props) -> Html {
    html! {
        <div class="drawer-side z-50">
            <label aria-label="close sidebar" class="drawer-overlay" for="repository-drawer"></label>
            <ul class="menu p-4 w-80 min-h-full bg-base-100 text-base-content border-r border-base-300">
                <li class="menu-title">{"Repositories"}</li>
                { for props.items.iter().map(|item| {
                    let onclick = {
                        let key = item.key.clone();
                        let on_select = props.on_select.clone();
                        Callback::from(move |_: MouseEvent| on_select.emit(key.clone()))
                    };

                    html! {
                        <li key={item.key.clone()} class={classes!(item.disabled.then_some("disabled"))}>
                            <button
                                class={classes!("nav-link", item.selected.then_some("active"))}
                                disabled={item.disabled}
                                aria-pressed={item.selected.to_string()}
                                {onclick}
                            >
                                <i class="fab fa-github w-5"></i> { &item.label }
                            </button>
                        </li>
                    }
                }) }
            </ul>
        </div>
    }
}
