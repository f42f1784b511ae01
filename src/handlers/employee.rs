use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use super::{AppState, SessionHandle};
use crate::models::employee::FormState;
use crate::views::manager::{Confirm, EDIT_MISSING};
use crate::views::render;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    q: String,
}

#[derive(Deserialize)]
pub struct EmployeeId {
    id: String,
}

#[derive(Deserialize)]
pub struct DeleteAnswer {
    id: String,
    #[serde(default)]
    confirm: String,
}

impl Confirm for DeleteAnswer {
    fn confirm(&self, _message: &str) -> bool {
        self.confirm.eq_ignore_ascii_case("yes")
    }
}

pub async fn search_employees(
    req: HttpRequest,
    app: web::Data<AppState>,
    params: web::Query<SearchParams>,
) -> HttpResponse {
    let handle = SessionHandle::from_request(&req, &app);
    let Some(manager) = handle.session.manager() else {
        return handle.redirect_home();
    };

    manager.search(&params.q).await;
    let page = render::manager(&manager.snapshot());
    handle.html(page)
}

pub async fn submit_employee(
    req: HttpRequest,
    app: web::Data<AppState>,
    form: web::Form<FormState>,
) -> HttpResponse {
    let handle = SessionHandle::from_request(&req, &app);
    if let Some(manager) = handle.session.manager() {
        manager.update_form(form.into_inner());
        manager.submit().await;
    }
    handle.redirect_home()
}

pub async fn edit_employee(
    req: HttpRequest,
    app: web::Data<AppState>,
    form: web::Form<EmployeeId>,
) -> HttpResponse {
    let handle = SessionHandle::from_request(&req, &app);
    if let Some(manager) = handle.session.manager() {
        if let Err(err) = manager.begin_edit_by_id(&form.id) {
            log::error!("Cannot edit employee {}: {}", form.id, err);
            manager.show_error(EDIT_MISSING);
        }
    }
    handle.redirect_home()
}

pub async fn cancel_edit(req: HttpRequest, app: web::Data<AppState>) -> HttpResponse {
    let handle = SessionHandle::from_request(&req, &app);
    if let Some(manager) = handle.session.manager() {
        manager.cancel_edit();
    }
    handle.redirect_home()
}

pub async fn confirm_delete(
    req: HttpRequest,
    app: web::Data<AppState>,
    params: web::Query<EmployeeId>,
) -> HttpResponse {
    let handle = SessionHandle::from_request(&req, &app);
    if handle.session.manager().is_none() {
        return handle.redirect_home();
    }
    handle.html(render::confirm_delete(&params.id))
}

pub async fn delete_employee(
    req: HttpRequest,
    app: web::Data<AppState>,
    answer: web::Form<DeleteAnswer>,
) -> HttpResponse {
    let handle = SessionHandle::from_request(&req, &app);
    if let Some(manager) = handle.session.manager() {
        manager.delete(&answer.id, &*answer).await;
    }
    handle.redirect_home()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::ready;
    use crate::api::MockEmployeeApi;
    use crate::handlers::configure;
    use crate::models::employee::{EmployeePayload, EmployeeRecord};
    use crate::session::{SessionStore, SESSION_COOKIE};
    use actix_web::cookie::Cookie;
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, App};
    use std::sync::Arc;
    use std::time::Duration;
    use url::Url;

    fn app_state(api: MockEmployeeApi) -> web::Data<AppState> {
        web::Data::new(AppState {
            sessions: SessionStore::new(Arc::new(api), Duration::from_secs(60)),
            api_url: Url::parse("http://localhost:5000").unwrap(),
        })
    }

    fn amy() -> EmployeeRecord {
        EmployeeRecord {
            id: "7".to_string(),
            first_name: "Amy".to_string(),
            last_name: "Lee".to_string(),
            email: "amy@x.com".to_string(),
            gender: "Female".to_string(),
            salary: Some(50000.0),
        }
    }

    macro_rules! body_of {
        ($app:expr, $req:expr) => {{
            let body = test::call_and_read_body(&$app, $req).await;
            String::from_utf8(body.to_vec()).unwrap()
        }};
    }

    fn session_cookie(resp: &actix_web::dev::ServiceResponse) -> Cookie<'static> {
        resp.response().cookies().find(|c| c.name() == SESSION_COOKIE).unwrap().into_owned()
    }

    #[actix_web::test]
    async fn first_visit_shows_landing_and_sets_cookie() {
        let app = test::init_service(App::new().app_data(app_state(MockEmployeeApi::new())).configure(configure)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.response().cookies().any(|c| c.name() == SESSION_COOKIE));
        let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(body.contains("Open Employee UI"));
    }

    #[actix_web::test]
    async fn manager_routes_redirect_while_on_landing() {
        let mut api = MockEmployeeApi::new();
        api.expect_search().never();
        let app = test::init_service(App::new().app_data(app_state(api)).configure(configure)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/search?q=amy").to_request()).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
    }

    #[actix_web::test]
    async fn login_shows_notice_without_leaving_landing() {
        let app = test::init_service(App::new().app_data(app_state(MockEmployeeApi::new())).configure(configure)).await;

        let body = body_of!(app, test::TestRequest::post().uri("/login").to_request());
        assert!(body.contains(render::LOGIN_NOTICE));
        assert!(body.contains("Open Employee UI"));
    }

    #[actix_web::test]
    async fn full_management_flow() {
        let mut api = MockEmployeeApi::new();
        let mut lists = vec![vec![amy()], Vec::new(), Vec::new()].into_iter();
        api.expect_list_all().times(3).returning(move || ready(Ok(lists.next().unwrap_or_default())));
        api.expect_search().withf(|q: &str| q == "zz").times(1).returning(|_| ready(Ok(Vec::new())));
        api.expect_delete().withf(|id: &str| id == "7").times(1).returning(|_| ready(Ok(())));
        api.expect_create()
            .withf(|payload: &EmployeePayload| payload.first_name == "Ann" && payload.salary == Some(50000.0))
            .times(1)
            .returning(|_| ready(Ok(())));
        let app = test::init_service(App::new().app_data(app_state(api)).configure(configure)).await;

        // landing, then open the manager
        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let cookie = session_cookie(&resp);

        let resp = test::call_service(&app, test::TestRequest::post().uri("/open").cookie(cookie.clone()).to_request()).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let body = body_of!(app, test::TestRequest::get().uri("/").cookie(cookie.clone()).to_request());
        assert!(body.contains("<td>Amy</td>"));
        assert!(body.contains("Create Employee"));

        // search
        let body = body_of!(app, test::TestRequest::get().uri("/search?q=zz").cookie(cookie.clone()).to_request());
        assert!(body.contains("No employees found."));
        assert!(body.contains("value=\"zz\""));

        // a declined delete sends nothing, a confirmed one deletes then reloads
        let body = body_of!(app, test::TestRequest::get().uri("/employees/delete?id=7").cookie(cookie.clone()).to_request());
        assert!(body.contains("Are you sure you want to delete this employee?"));
        for answer in ["no", "yes"] {
            let resp = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri("/employees/delete")
                    .cookie(cookie.clone())
                    .set_form([("id", "7"), ("confirm", answer)])
                    .to_request(),
            )
            .await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        }

        // create, then a reload
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/employees")
                .cookie(cookie.clone())
                .set_form([
                    ("first_name", "Ann"),
                    ("last_name", "Lee"),
                    ("email", "ann@x.com"),
                    ("gender", "Female"),
                    ("salary", "50000"),
                ])
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        // back to landing
        test::call_service(&app, test::TestRequest::post().uri("/back").cookie(cookie.clone()).to_request()).await;
        let body = body_of!(app, test::TestRequest::get().uri("/").cookie(cookie).to_request());
        assert!(body.contains("Employee Management System"));
    }

    #[actix_web::test]
    async fn editing_a_vanished_record_shows_banner() {
        let mut api = MockEmployeeApi::new();
        api.expect_list_all().times(1).returning(|| ready(Ok(vec![amy()])));
        let app = test::init_service(App::new().app_data(app_state(api)).configure(configure)).await;

        let resp = test::call_service(&app, test::TestRequest::post().uri("/open").to_request()).await;
        let cookie = session_cookie(&resp);

        let resp = test::call_service(
            &app,
            test::TestRequest::post().uri("/employees/edit").cookie(cookie.clone()).set_form([("id", "missing")]).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");

        let body = body_of!(app, test::TestRequest::get().uri("/").cookie(cookie).to_request());
        assert!(body.contains(&format!("<div class=\"error\" role=\"alert\">{}</div>", EDIT_MISSING)));
        assert!(body.contains("<h2>Create Employee</h2>"));
        assert!(body.contains("<td>Amy</td>"));
    }

    #[actix_web::test]
    async fn edit_then_cancel_round_trip() {
        let mut api = MockEmployeeApi::new();
        api.expect_list_all().times(1).returning(|| ready(Ok(vec![amy()])));
        let app = test::init_service(App::new().app_data(app_state(api)).configure(configure)).await;

        let resp = test::call_service(&app, test::TestRequest::post().uri("/open").to_request()).await;
        let cookie = session_cookie(&resp);

        test::call_service(
            &app,
            test::TestRequest::post().uri("/employees/edit").cookie(cookie.clone()).set_form([("id", "7")]).to_request(),
        )
        .await;
        let body = body_of!(app, test::TestRequest::get().uri("/").cookie(cookie.clone()).to_request());
        assert!(body.contains("<h2>Update Employee</h2>"));
        assert!(body.contains("value=\"amy@x.com\""));

        test::call_service(&app, test::TestRequest::post().uri("/employees/cancel").cookie(cookie.clone()).to_request()).await;
        let body = body_of!(app, test::TestRequest::get().uri("/").cookie(cookie).to_request());
        assert!(body.contains("<h2>Create Employee</h2>"));
    }
}
