//! Modal form for registering a new student.

use leptos::prelude::*;

use crate::components::toast::show_toast;
use crate::net::controller::AuthController;
use crate::net::types::{ApiError, NewStudent, Student};
use crate::state::toasts::{ToastState, ToastVariant};

/// Modal dialog creating a student record. On success the fields are
/// cleared, the dialog closes, and the roster resource refetches. A
/// duplicate student id gets its own message, distinct from generic
/// failures — the id must be unique school-wide.
#[component]
pub fn StudentForm(
    open: RwSignal<bool>,
    students: LocalResource<Result<Vec<Student>, ApiError>>,
) -> impl IntoView {
    let controller = expect_context::<AuthController>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let student_id = RwSignal::new(String::new());
    let date_of_birth = RwSignal::new(String::new());
    let class = RwSignal::new(String::new());
    let submitting = RwSignal::new(false);

    let clear = move || {
        first_name.set(String::new());
        last_name.set(String::new());
        student_id.set(String::new());
        date_of_birth.set(String::new());
        class.set(String::new());
    };

    let on_cancel = Callback::new(move |()| open.set(false));

    let submit = Callback::new(move |()| {
        if submitting.get() {
            return;
        }
        let student = NewStudent {
            student_id: student_id.get().trim().to_owned(),
            first_name: first_name.get().trim().to_owned(),
            last_name: last_name.get().trim().to_owned(),
            class: class.get().trim().to_owned(),
            date_of_birth: date_of_birth.get(),
        };
        if student.student_id.is_empty()
            || student.first_name.is_empty()
            || student.last_name.is_empty()
            || student.class.is_empty()
            || student.date_of_birth.is_empty()
        {
            show_toast(toasts, "Missing fields", "All fields are required.", ToastVariant::Error);
            return;
        }

        submitting.set(true);
        let controller = controller.clone();
        leptos::task::spawn_local(async move {
            let config = controller.config();
            let token = controller
                .state()
                .get_untracked()
                .access_token()
                .map(ToOwned::to_owned)
                .unwrap_or_default();
            let result = crate::net::rest::create_student(&config, &token, &student).await;
            submitting.set(false);
            match result {
                Ok(()) => {
                    show_toast(
                        toasts,
                        "Success",
                        &format!("Student {} successfully registered.", student.first_name),
                        ToastVariant::Success,
                    );
                    clear();
                    open.set(false);
                    students.refetch();
                }
                Err(ApiError::DuplicateKey(_)) => {
                    show_toast(
                        toasts,
                        "Submission failed",
                        "Student ID already exists. Use a unique ID.",
                        ToastVariant::Error,
                    );
                }
                Err(err) => {
                    show_toast(toasts, "Submission failed", &err.to_string(), ToastVariant::Error);
                }
            }
        });
    });

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>"Register New Student"</h2>
                <div class="dialog__grid">
                    <label class="dialog__label">
                        "First Name"
                        <input
                            class="dialog__input"
                            type="text"
                            prop:value=move || first_name.get()
                            on:input=move |ev| first_name.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="dialog__label">
                        "Last Name"
                        <input
                            class="dialog__input"
                            type="text"
                            prop:value=move || last_name.get()
                            on:input=move |ev| last_name.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="dialog__label">
                        "Student ID (unique)"
                        <input
                            class="dialog__input"
                            type="text"
                            prop:value=move || student_id.get()
                            on:input=move |ev| student_id.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="dialog__label">
                        "Date of Birth"
                        <input
                            class="dialog__input"
                            type="date"
                            prop:value=move || date_of_birth.get()
                            on:input=move |ev| date_of_birth.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="dialog__label dialog__label--wide">
                        "Class/Grade"
                        <input
                            class="dialog__input"
                            type="text"
                            prop:value=move || class.get()
                            on:input=move |ev| class.set(event_target_value(&ev))
                        />
                    </label>
                </div>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button
                        class="btn btn--primary"
                        disabled=move || submitting.get()
                        on:click=move |_| submit.run(())
                    >
                        {move || if submitting.get() { "Registering..." } else { "Register Student" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
