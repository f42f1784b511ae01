use maud::{html, Markup, DOCTYPE};
use url::form_urlencoded;
use url::Url;

use crate::models::employee::{format_salary, Gender};
use crate::views::manager::{ManagerState, DELETE_PROMPT};

pub const LOGIN_NOTICE: &str = "Login functionality will be implemented next!";

const ENDPOINTS: [(&str, &str); 3] = [
    ("/api", "API Status"),
    ("/api/employees", "Employee List (raw JSON)"),
    ("/api/health", "Health Check"),
];

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) }
            }
            body style="padding: 24px" {
                (body)
            }
        }
    }
    .into_string()
}

fn backend_link(base: &Url, path: &str) -> String {
    format!("{}{}", base.as_str().trim_end_matches('/'), path)
}

pub fn landing(api_base: &Url, notice: Option<&str>) -> String {
    let body = html! {
        h1 { "Employee Management System" }
        h2 { "COMP 3123 Assignment 2" }
        div class="status" style="background-color: #d4edda; color: #155724; padding: 12px 16px; margin: 16px 0" {
            "Employee Management API is working! - Backend is connected!"
        }
        @if let Some(notice) = notice {
            div class="notice" role="alert" { (notice) }
        }
        h3 { "Available Endpoints:" }
        ul {
            @for (path, label) in ENDPOINTS {
                li {
                    a href=(backend_link(api_base, path)) target="_blank" rel="noreferrer" { (path) }
                    " - " (label)
                }
            }
        }
        div style="margin-top: 24px; display: flex; gap: 12px" {
            form method="post" action="/login" { button type="submit" { "Go to Login" } }
            form method="post" action="/open" { button type="submit" { "Open Employee UI" } }
        }
    };
    page("Employee Management System", body)
}

fn text_input(label: &str, name: &str, kind: &str, value: &str) -> Markup {
    html! {
        div style="margin-bottom: 10px" {
            label {
                (label) " "
                input type=(kind) name=(name) value=(value) step=[(kind == "number").then_some("any")] required;
            }
        }
    }
}

fn gender_select(selected: &str) -> Markup {
    html! {
        div style="margin-bottom: 10px" {
            label {
                "Gender "
                select name="gender" required {
                    option value="" { "Select gender" }
                    @for gender in Gender::ALL {
                        option value=(gender.as_str()) selected[gender.as_str() == selected] { (gender.as_str()) }
                    }
                }
            }
        }
    }
}

fn delete_href(id: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new()).append_pair("id", id).finish();
    format!("/employees/delete?{}", query)
}

pub fn manager(state: &ManagerState) -> String {
    let title = if state.is_editing() { "Update Employee" } else { "Create Employee" };
    let form = &state.form;
    let body = html! {
        form method="post" action="/back" style="margin-bottom: 16px" {
            button type="submit" class="back-btn secondary" { "\u{2190} Back to Home" }
        }
        h1 { "Employee Management UI" }
        p { "This screen is powered by the backend API at " code { "/api/employees" } "." }

        div class="panel" {
            h2 { "Search Employees" }
            p { "Filter by first name, last name, or email." }
            form method="get" action="/search" class="search-box" {
                input type="text" name="q" value=(state.query) placeholder="Type to search..."
                    oninput="this.form.requestSubmit()" autofocus[!state.query.is_empty()];
            }
        }

        @if !state.error.is_empty() {
            div class="error" role="alert" { (state.error) }
        }
        @if state.loading {
            p class="loading" { "Loading..." }
        }

        div class="panel" {
            h2 { (title) }
            form method="post" action="/employees" {
                (text_input("First Name", "first_name", "text", &form.first_name))
                (text_input("Last Name", "last_name", "text", &form.last_name))
                (text_input("Email", "email", "email", &form.email))
                (gender_select(&form.gender))
                (text_input("Salary", "salary", "number", &form.salary))
                div style="margin-top: 12px; display: flex; gap: 8px" {
                    button type="submit" { (title) }
                    @if state.is_editing() {
                        button type="submit" class="secondary" formaction="/employees/cancel" formnovalidate { "Cancel Edit" }
                    }
                }
            }
        }

        div class="panel" {
            h2 { "Employee List" }
            @if state.employees.is_empty() {
                p { "No employees found." }
            } @else {
                table {
                    thead {
                        tr {
                            th { "First Name" }
                            th { "Last Name" }
                            th { "Email" }
                            th { "Gender" }
                            th style="text-align: right" { "Salary" }
                            th style="text-align: center" { "Actions" }
                        }
                    }
                    tbody {
                        @for emp in &state.employees {
                            tr {
                                td { (emp.first_name) }
                                td { (emp.last_name) }
                                td { (emp.email) }
                                td { (emp.gender) }
                                td style="text-align: right" { (emp.salary.map(format_salary).unwrap_or_default()) }
                                td style="text-align: center" {
                                    form method="post" action="/employees/edit" style="display: inline" {
                                        input type="hidden" name="id" value=(emp.id);
                                        button type="submit" { "Edit" }
                                    }
                                    " "
                                    a class="secondary" href=(delete_href(&emp.id)) { "Delete" }
                                }
                            }
                        }
                    }
                }
            }
        }
    };
    page("Employee Management UI", body)
}

pub fn confirm_delete(id: &str) -> String {
    let body = html! {
        h1 { "Delete Employee" }
        p { (DELETE_PROMPT) }
        form method="post" action="/employees/delete" style="display: flex; gap: 8px" {
            input type="hidden" name="id" value=(id);
            button type="submit" name="confirm" value="yes" { "OK" }
            button type="submit" name="confirm" value="no" class="secondary" { "Cancel" }
        }
    };
    page("Delete Employee", body)
}
