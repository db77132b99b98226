use super::dom::{warn_on_error, DomError};
use js_sys::Array;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

const REVEAL_THRESHOLD: f64 = 0.1;
const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

struct RevealObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn observe_once(element: &Element, on_visible: impl Fn() + 'static) -> Result<RevealObserver, DomError> {
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() {
                    observer.unobserve(&entry.target());
                    on_visible();
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    options.set_root_margin(REVEAL_ROOT_MARGIN);

    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
        .map_err(|error| DomError::js("IntersectionObserver", error))?;
    observer.observe(element);

    Ok(RevealObserver {
        observer,
        _callback: callback,
    })
}

/// `true` once the referenced element has scrolled into view. Without
/// observer support everything counts as revealed.
#[hook]
pub fn use_reveal(node: NodeRef) -> bool {
    let revealed = use_state_eq(|| false);

    {
        let revealed = revealed.clone();
        use_effect_with(node, move |node| {
            let observer = match node.cast::<Element>() {
                Some(element) => {
                    let handle = revealed.clone();
                    warn_on_error(
                        "scroll reveal",
                        observe_once(&element, move || handle.set(true)),
                    )
                }
                None => None,
            };
            if observer.is_none() {
                revealed.set(true);
            }
            move || drop(observer)
        });
    }

    *revealed
}

pub fn reveal_classes(revealed: bool) -> Classes {
    classes!("fade-in-up", revealed.then_some("animate-in"))
}

#[derive(Properties, PartialEq)]
pub struct RevealProps {
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(Reveal)]
pub fn reveal(props: &RevealProps) -> Html {
    let node = use_node_ref();
    let revealed = use_reveal(node.clone());

    html! {
        <div ref={node} class={classes!(props.class.clone(), reveal_classes(revealed))}>
            {props.children.clone()}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SectionHeaderProps {
    pub title: AttrValue,
    pub subtitle: AttrValue,
}

#[function_component(SectionHeader)]
pub fn section_header(props: &SectionHeaderProps) -> Html {
    html! {
        <Reveal class="section-header">
            <h2 class="section-title">{props.title.clone()}</h2>
            <p class="section-subtitle">{props.subtitle.clone()}</p>
        </Reveal>
    }
}
