use axum::{Router, middleware::from_fn_with_state};

use crate::middleware::session_teardown::teardown_on_unauthorized;
use crate::models::AppState;
use crate::services::{
    appointment::Appointments,
    category::HospitalCategories,
    contact::Contacts,
    doctor::Doctors,
    hospital::Hospitals,
    insurance::{CashlessInsuranceCompanies, InsuranceCompanies},
    panel::GovernmentPanels,
    surgery::Surgeries,
};

pub mod auth_routes;
pub mod home_routes;
pub mod resource_routes;
pub mod wizard_routes;

use resource_routes::{editable_router, listed_router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1/auth", auth_routes::router())
        .nest("/api/v1/wizard", wizard_routes::router())
        .nest("/api/v1/hospitals", editable_router::<Hospitals>())
        .nest("/api/v1/categories", editable_router::<HospitalCategories>())
        .nest("/api/v1/insurance-companies", editable_router::<InsuranceCompanies>())
        .nest(
            "/api/v1/cashless-insurance-companies",
            editable_router::<CashlessInsuranceCompanies>(),
        )
        .nest("/api/v1/panels", editable_router::<GovernmentPanels>())
        .nest("/api/v1/doctors", editable_router::<Doctors>())
        .nest("/api/v1/surgeries", editable_router::<Surgeries>())
        .nest("/api/v1/contacts", listed_router::<Contacts>())
        .nest("/api/v1/appointments", listed_router::<Appointments>())
        .nest("/api/v1", home_routes::router())
        .layer(from_fn_with_state(state.clone(), teardown_on_unauthorized))
        .with_state(state)
}
