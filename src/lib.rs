pub mod about;
pub mod contact;
pub mod navigation;
pub mod particles;
pub mod projects;
pub mod skills;
pub mod state;
pub mod storage;
pub mod theme;
pub mod timing;
pub mod tween;
pub mod typing;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

#[cfg(not(target_arch = "wasm32"))]
pub mod server;
