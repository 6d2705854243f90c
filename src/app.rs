//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::footer::Footer;
use crate::components::navigation::Navigation;
use crate::components::route_guard::ProtectedRoute;
use crate::components::toast::ToastHost;
use crate::net::config::BackendConfig;
use crate::net::controller::AuthController;
use crate::net::session::SessionClient;
use crate::pages::auth::AuthPage;
use crate::pages::home::HomePage;
use crate::pages::student_profile::StudentProfilePage;
use crate::pages::students::StudentsPage;
use crate::state::toasts::ToastState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Constructs the auth controller, provides the shared contexts, and sets
/// up client-side routing. The login page is public; everything else sits
/// behind the route guard.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Missing backend configuration is unrecoverable; refuse to start
    // rather than render an app where every request fails.
    let config = match BackendConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            leptos::logging::error!("{err}");
            panic!("{err}");
        }
    };

    let controller = AuthController::new(SessionClient::new(config));
    controller.initialize();
    provide_context(controller.clone());
    provide_context(RwSignal::new(ToastState::default()));

    let teardown = controller.clone();
    on_cleanup(move || teardown.teardown());

    view! {
        <Stylesheet id="leptos" href="/pkg/sis-client.css"/>
        <Title text="Student Information System"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("auth") view=AuthPage/>
                <Route
                    path=StaticSegment("")
                    view=|| {
                        view! {
                            <ProtectedRoute>
                                <MainLayout>
                                    <HomePage/>
                                </MainLayout>
                            </ProtectedRoute>
                        }
                    }
                />
                <Route
                    path=StaticSegment("students")
                    view=|| {
                        view! {
                            <ProtectedRoute>
                                <MainLayout>
                                    <StudentsPage/>
                                </MainLayout>
                            </ProtectedRoute>
                        }
                    }
                />
                <Route
                    path=(StaticSegment("students"), ParamSegment("id"))
                    view=|| {
                        view! {
                            <ProtectedRoute>
                                <MainLayout>
                                    <StudentProfilePage/>
                                </MainLayout>
                            </ProtectedRoute>
                        }
                    }
                />
            </Routes>
        </Router>
        <ToastHost/>
    }
}

/// Shared chrome for authenticated pages: navigation bar, content, footer.
#[component]
fn MainLayout(children: ChildrenFn) -> impl IntoView {
    view! {
        <Navigation/>
        <main class="layout__main">{children()}</main>
        <Footer/>
    }
}
