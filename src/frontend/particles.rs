use super::{
    dom::{self, warn_on_error, Debouncer, DomError, Listener},
    AppContext,
};
use crate::{
    particles::{ParticleConfig, ParticleField},
    timing::{CancellationToken, RESIZE_DEBOUNCE_MS},
};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use std::{cell::RefCell, f64::consts::TAU, rc::Rc};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

type SharedField = Rc<RefCell<Option<ParticleField>>>;

#[function_component(ParticleCanvas)]
pub fn particle_canvas() -> Html {
    let Some(app) = use_context::<AppContext>() else {
        return html! {};
    };
    let canvas_ref = use_node_ref();
    let field: SharedField = use_mut_ref(|| None);
    let running = app.particles_running();

    {
        let canvas_ref = canvas_ref.clone();
        let field = field.clone();
        use_effect_with(running, move |running| {
            let token = CancellationToken::new();
            if *running {
                warn_on_error("particle background", start(&canvas_ref, field, token.clone()));
            }
            move || token.cancel()
        });
    }

    {
        let canvas_ref = canvas_ref.clone();
        let field = field.clone();
        use_effect_with((), move |_| {
            let debouncer = Debouncer::new(RESIZE_DEBOUNCE_MS);
            let listener = {
                let debouncer = debouncer.clone();
                Listener::on_window("resize", move |_| {
                    let canvas_ref = canvas_ref.clone();
                    let field = field.clone();
                    debouncer.call(move || fit_canvas(&canvas_ref, &field));
                })
            };
            let listener = warn_on_error("canvas resize tracking", listener);
            move || {
                drop(listener);
                debouncer.cancel();
            }
        });
    }

    html! {
        <canvas ref={canvas_ref} class="particles-canvas" aria-hidden="true"></canvas>
    }
}

fn canvas_element(canvas_ref: &NodeRef) -> Result<HtmlCanvasElement, DomError> {
    canvas_ref
        .cast::<HtmlCanvasElement>()
        .ok_or_else(|| DomError::MissingElement("particles canvas".to_string()))
}

fn fit_canvas(canvas_ref: &NodeRef, field: &RefCell<Option<ParticleField>>) {
    let Ok(canvas) = canvas_element(canvas_ref) else {
        return;
    };
    let (width, height) = canvas
        .parent_element()
        .map(|hero| (hero.client_width(), hero.client_height()))
        .unwrap_or((canvas.client_width(), canvas.client_height()));
    let (width, height) = (width.max(0) as u32, height.max(0) as u32);

    canvas.set_width(width);
    canvas.set_height(height);
    if let Some(field) = field.borrow_mut().as_mut() {
        field.resize(f64::from(width), f64::from(height));
    }
}

fn start(canvas_ref: &NodeRef, field: SharedField, token: CancellationToken) -> Result<(), DomError> {
    let canvas = canvas_element(canvas_ref)?;
    let context = canvas
        .get_context("2d")
        .map_err(|error| DomError::js("getContext", error))?
        .and_then(|context| context.dyn_into::<CanvasRenderingContext2d>().ok())
        .ok_or(DomError::Unsupported("2d canvas"))?;

    fit_canvas(canvas_ref, &field);
    if field.borrow().is_none() {
        let mut rng = Pcg32::seed_from_u64(dom::now_ms() as u64);
        let created = ParticleField::new(
            ParticleConfig::default(),
            f64::from(canvas.width()),
            f64::from(canvas.height()),
            &mut rng,
        );
        log::debug!("particle field created with {} particles", created.particles().len());
        *field.borrow_mut() = Some(created);
    }

    dom::run_frames(token, move || {
        let mut guard = field.borrow_mut();
        let Some(field) = guard.as_mut() else {
            return false;
        };
        field.step();
        draw(&context, field);
        true
    });
    Ok(())
}

fn draw(context: &CanvasRenderingContext2d, field: &ParticleField) {
    let config = field.config();
    context.clear_rect(0.0, 0.0, field.width(), field.height());

    for particle in field.particles() {
        context.begin_path();
        if context
            .arc(particle.x, particle.y, particle.radius, 0.0, TAU)
            .is_err()
        {
            continue;
        }
        context.set_fill_style_str(&config.color.rgba(particle.opacity));
        context.fill();
    }

    context.set_line_width(config.link_width);
    for link in field.links() {
        context.begin_path();
        context.set_stroke_style_str(&config.color.rgba(link.opacity));
        context.move_to(link.from.0, link.from.1);
        context.line_to(link.to.0, link.to.1);
        context.stroke();
    }
}
