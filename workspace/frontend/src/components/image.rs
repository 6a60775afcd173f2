use common::view::ImageView;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub image: ImageView,
}

/// Server-rendered forecast image with its caption.
///
/// A missing URL still renders the `<img>` so the alt text shows in place of
/// the picture.
#[function_component(ImageCard)]
pub fn image_card(props: &Props) -> Html {
    let image = &props.image;

    html! {
        <figure class="card bg-base-100 shadow my-4">
            <figcaption class="card-body pb-2">
                <h3 class="card-title text-lg">{ &image.caption }</h3>
            </figcaption>
            <img class="w-full" src={image.src.clone()} alt={image.alt.clone()} loading="lazy" />
        </figure>
    }
}
