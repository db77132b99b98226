#![cfg(target_arch = "wasm32")]

use gloo_timers::future::sleep;
use std::time::Duration;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
async fn mounted_page_applies_stored_theme_and_renders_sections() {
    let window = web_sys::window().expect("browser window");
    let document = window.document().expect("document");
    let storage = window
        .local_storage()
        .expect("storage access")
        .expect("local storage");
    storage
        .set_item("portfolio-theme", "light")
        .expect("theme stored");

    let mount = document.create_element("div").expect("mount point");
    mount.set_id("app");
    document
        .body()
        .expect("body")
        .append_child(&mount)
        .expect("mount appended");

    portfolio_site::frontend::run();
    sleep(Duration::from_millis(100)).await;

    let body = document.body().expect("body");
    assert!(body.class_list().contains("light-theme"));
    for id in ["home", "about", "skills", "projects", "contact"] {
        assert!(document.get_element_by_id(id).is_some(), "section #{id}");
    }
    assert_eq!(
        document.query_selector_all(".project-card").expect("selector").length(),
        6
    );
    assert!(document.query_selector(".loading-screen").expect("selector").is_some());

    storage.remove_item("portfolio-theme").expect("theme cleared");
}
