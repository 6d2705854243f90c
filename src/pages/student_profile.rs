//! Individual student profile page.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

/// Profile details for a single student, keyed by the `:id` route param.
///
/// TODO: fetch and render the full record (grades, guardian consents) once
/// those tables exist; today only the identifier is shown.
#[component]
pub fn StudentProfilePage() -> impl IntoView {
    let params = use_params_map();
    let student_id = move || params.read().get("id").unwrap_or_default();

    view! {
        <div class="student-profile">
            <h1>"Student Profile Details"</h1>
            <p>
                "Viewing profile for student: "
                <span class="student-profile__id">{student_id}</span>
            </p>
        </div>
    }
}
