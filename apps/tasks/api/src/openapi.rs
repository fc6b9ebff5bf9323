use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "Tasks API",
    description = "Create tasks for users, optionally bound to a location"
))]
struct ServiceDoc;

/// Combined API documentation, served at `/api-docs/openapi.json`
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = ServiceDoc::openapi();
        doc.merge(domain_tasks::ApiDoc::openapi());
        doc
    }
}
