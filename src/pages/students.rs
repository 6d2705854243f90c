//! Student roster page, restricted to staff roles.

use leptos::prelude::*;

use crate::components::route_guard::RoleGate;
use crate::components::student_form::StudentForm;
use crate::net::controller::AuthController;
use crate::net::types::{ApiError, Student};
use crate::state::auth::Role;

/// Student administration page: roster list plus the creation form.
///
/// The role gate here is advisory; a guardian who somehow reaches the
/// fetch still gets nothing back from the backend's row security, which
/// surfaces as the "access restricted" load error below.
#[component]
pub fn StudentsPage() -> impl IntoView {
    let controller = expect_context::<AuthController>();
    let auth = controller.state();

    let fetch_controller = controller.clone();
    let students: LocalResource<Result<Vec<Student>, ApiError>> = LocalResource::new(move || {
        let config = fetch_controller.config();
        let token = auth.get().access_token().map(ToOwned::to_owned);
        async move {
            match token {
                Some(token) => crate::net::rest::fetch_students(&config, &token).await,
                None => Err(ApiError::AccessRestricted),
            }
        }
    });

    let show_form = RwSignal::new(false);

    view! {
        <RoleGate allowed=vec![Role::Admin, Role::Teacher]>
            <div class="students-page">
                <header class="students-page__header">
                    <h1>"Student Administration"</h1>
                    <button class="btn btn--primary" on:click=move |_| show_form.set(true)>
                        "+ Add New Student"
                    </button>
                </header>

                <Suspense fallback=move || view! { <p>"Loading students..."</p> }>
                    {move || {
                        students
                            .get()
                            .map(|result| match result {
                                Ok(list) => {
                                    view! {
                                        <div class="students-page__list">
                                            <h2>{format!("Total Students: {}", list.len())}</h2>
                                            {list
                                                .into_iter()
                                                .map(|s| {
                                                    view! { <StudentRow student=s/> }
                                                })
                                                .collect::<Vec<_>>()}
                                        </div>
                                    }
                                        .into_any()
                                }
                                Err(ApiError::AccessRestricted) => {
                                    view! {
                                        <p class="students-page__error">
                                            "Error loading students: access may be restricted."
                                        </p>
                                    }
                                        .into_any()
                                }
                                Err(err) => {
                                    view! {
                                        <p class="students-page__error">
                                            {format!("Error loading students: {err}")}
                                        </p>
                                    }
                                        .into_any()
                                }
                            })
                    }}
                </Suspense>

                <Show when=move || show_form.get()>
                    <StudentForm open=show_form students=students/>
                </Show>
            </div>
        </RoleGate>
    }
}

/// One roster row: "Last, First" with id and class, linking to the profile.
#[component]
fn StudentRow(student: Student) -> impl IntoView {
    let href = format!("/students/{}", student.id);

    view! {
        <div class="student-row">
            <div>
                <p class="student-row__name">
                    {format!("{}, {}", student.last_name, student.first_name)}
                </p>
                <p class="student-row__meta">
                    {format!("ID: {} | Class: {}", student.student_id, student.class)}
                </p>
            </div>
            <a class="btn" href=href>
                "View Profile"
            </a>
        </div>
    }
}
