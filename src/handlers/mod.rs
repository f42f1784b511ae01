pub mod employee;
pub mod landing;

use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use std::sync::Arc;
use url::Url;

use crate::session::{Session, SessionStore, SESSION_COOKIE};

pub struct AppState {
    pub sessions: SessionStore,
    pub api_url: Url,
}

/// The caller's session, plus the cookie to set when it was just created.
pub struct SessionHandle {
    pub session: Arc<Session>,
    cookie: Option<Cookie<'static>>,
}

impl SessionHandle {
    pub fn from_request(req: &HttpRequest, app: &AppState) -> Self {
        let existing = req.cookie(SESSION_COOKIE);
        let (id, session, fresh) = app.sessions.get_or_create(existing.as_ref().map(|c| c.value()));
        let cookie = fresh.then(|| {
            Cookie::build(SESSION_COOKIE, id.to_string())
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .finish()
        });
        SessionHandle { session, cookie }
    }

    pub fn html(self, body: String) -> HttpResponse {
        let mut builder = HttpResponse::Ok();
        builder.content_type("text/html; charset=utf-8");
        if let Some(cookie) = self.cookie {
            builder.cookie(cookie);
        }
        builder.body(body)
    }

    pub fn redirect_home(self) -> HttpResponse {
        let mut builder = HttpResponse::SeeOther();
        builder.insert_header((header::LOCATION, "/"));
        if let Some(cookie) = self.cookie {
            builder.cookie(cookie);
        }
        builder.finish()
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(landing::index)))
        .service(web::resource("/open").route(web::post().to(landing::open_manager)))
        .service(web::resource("/back").route(web::post().to(landing::back)))
        .service(web::resource("/login").route(web::post().to(landing::login)))
        .service(web::resource("/search").route(web::get().to(employee::search_employees)))
        .service(web::resource("/employees").route(web::post().to(employee::submit_employee)))
        .service(web::resource("/employees/edit").route(web::post().to(employee::edit_employee)))
        .service(web::resource("/employees/cancel").route(web::post().to(employee::cancel_edit)))
        .service(
            web::resource("/employees/delete")
                .route(web::get().to(employee::confirm_delete))
                .route(web::post().to(employee::delete_employee)),
        );
}
