use actix_web::{web, HttpRequest, HttpResponse};

use super::{AppState, SessionHandle};
use crate::views::render;

pub async fn index(req: HttpRequest, app: web::Data<AppState>) -> HttpResponse {
    let handle = SessionHandle::from_request(&req, &app);
    match handle.session.manager() {
        Some(manager) => {
            let page = render::manager(&manager.snapshot());
            handle.html(page)
        }
        None => handle.html(render::landing(&app.api_url, None)),
    }
}

pub async fn open_manager(req: HttpRequest, app: web::Data<AppState>) -> HttpResponse {
    let handle = SessionHandle::from_request(&req, &app);
    if let Some(manager) = handle.session.open_manager() {
        manager.load_all().await;
    }
    handle.redirect_home()
}

pub async fn back(req: HttpRequest, app: web::Data<AppState>) -> HttpResponse {
    let handle = SessionHandle::from_request(&req, &app);
    handle.session.back();
    handle.redirect_home()
}

pub async fn login(req: HttpRequest, app: web::Data<AppState>) -> HttpResponse {
    log::info!("Login requested but authentication is not available");
    let handle = SessionHandle::from_request(&req, &app);
    handle.html(render::landing(&app.api_url, Some(render::LOGIN_NOTICE)))
}
